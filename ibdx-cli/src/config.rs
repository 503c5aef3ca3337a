//! Configuration handling for the IBDx CLI
//!
//! Supports loading configuration from ibdx.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use ibdx_core::{ExpressionParams, GeneratorConfig, SeedStrategy, VolcanoParams};
use ibdx_render::{ExportConfig, RenderStyle};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "ibdx.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub generator: GeneratorSection,
    #[serde(default)]
    pub render: RenderSection,
    #[serde(default)]
    pub volcano: VolcanoSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Session seed mixed into every per-key generator
    #[serde(default = "default_seed")]
    pub seed: String,

    /// "session" (hashed seed) or "char_sum" (legacy character-sum LCG)
    #[serde(default)]
    pub strategy: SeedStrategy,

    /// Delay between a request and its render, in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSection {
    /// Number of bulk genes (Gene_1..Gene_N)
    #[serde(default = "default_synthetic_genes")]
    pub synthetic_genes: usize,

    #[serde(default = "default_fold_change_span")]
    pub fold_change_span: f64,

    /// Noise amplitude on drawn pathway, target and similarity scores
    #[serde(default = "default_score_jitter")]
    pub score_jitter: f64,

    #[serde(default = "default_true")]
    pub include_catalogue_genes: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSection {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_font_family")]
    pub font_family: String,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default = "default_background")]
    pub background: String,

    #[serde(default = "default_true")]
    pub legend: bool,

    #[serde(default = "default_true")]
    pub axes: bool,

    #[serde(default = "default_true")]
    pub value_labels: bool,

    /// Version and timestamp footer; disable for reproducible files
    #[serde(default = "default_true")]
    pub footer: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolcanoSection {
    #[serde(default = "default_volcano_points")]
    pub points: usize,

    #[serde(default = "default_max_fold_change")]
    pub max_fold_change: f64,

    /// -log10(p) significance cut
    #[serde(default = "default_p_threshold")]
    pub p_threshold: f64,

    /// |log2FC| regulation cut
    #[serde(default = "default_fc_threshold")]
    pub fc_threshold: f64,
}

// Default value functions
fn default_seed() -> String { ibdx_core::rng::DEFAULT_SESSION_SEED.to_string() }
fn default_delay_ms() -> u64 { 500 }
fn default_synthetic_genes() -> usize { 1000 }
fn default_fold_change_span() -> f64 { 5.0 }
fn default_score_jitter() -> f64 { 0.05 }
fn default_true() -> bool { true }
fn default_width() -> u32 { 900 }
fn default_height() -> u32 { 500 }
fn default_font_family() -> String { "Arial, sans-serif".to_string() }
fn default_font_size() -> u32 { 12 }
fn default_background() -> String { "#ffffff".to_string() }
fn default_volcano_points() -> usize { 1000 }
fn default_max_fold_change() -> f64 { 4.0 }
fn default_p_threshold() -> f64 { 1.3 }
fn default_fc_threshold() -> f64 { 1.0 }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            strategy: SeedStrategy::default(),
            delay_ms: default_delay_ms(),
        }
    }
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            synthetic_genes: default_synthetic_genes(),
            fold_change_span: default_fold_change_span(),
            score_jitter: default_score_jitter(),
            include_catalogue_genes: true,
        }
    }
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            background: default_background(),
            legend: true,
            axes: true,
            value_labels: true,
            footer: true,
        }
    }
}

impl Default for VolcanoSection {
    fn default() -> Self {
        Self {
            points: default_volcano_points(),
            max_fold_change: default_max_fold_change(),
            p_threshold: default_p_threshold(),
            fc_threshold: default_fc_threshold(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)
            }
            None => Self::load_from_candidates(&Self::candidate_paths()),
        }
    }

    /// `./ibdx.toml`, then `<config dir>/ibdx/ibdx.toml`
    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("ibdx").join(CONFIG_FILE_NAME));
        }
        paths
    }

    /// First existing candidate wins
    pub fn load_from_candidates(candidates: &[PathBuf]) -> Result<Self> {
        match candidates.iter().find(|p| p.exists()) {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)
            }
            None => {
                log::info!("Using default configuration");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default()).context("Failed to serialize default configuration")
    }

    /// Command-line flags take precedence over file values
    pub fn apply_overrides(&mut self, seed: Option<String>, charsum: bool) {
        if let Some(seed) = seed {
            self.general.seed = seed;
        }
        if charsum {
            self.general.strategy = SeedStrategy::CharSum;
        }
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            strategy: self.general.strategy,
            session_seed: self.general.seed.clone(),
            expression: ExpressionParams {
                synthetic_genes: self.generator.synthetic_genes,
                fold_change_span: self.generator.fold_change_span,
                include_catalogue_genes: self.generator.include_catalogue_genes,
            },
            score_jitter: self.generator.score_jitter,
            volcano: VolcanoParams {
                points: self.volcano.points,
                max_fold_change: self.volcano.max_fold_change,
                p_threshold: self.volcano.p_threshold,
                fc_threshold: self.volcano.fc_threshold,
            },
        }
    }

    pub fn render_style(&self) -> RenderStyle {
        RenderStyle {
            width: self.render.width as f64,
            height: self.render.height as f64,
            background: self.render.background.clone(),
            font_family: self.render.font_family.clone(),
            font_size: self.render.font_size as f64,
            legend: self.render.legend,
            axes: self.render.axes,
            value_labels: self.render.value_labels,
            ..RenderStyle::default()
        }
    }

    pub fn export_config(&self, chart: &str) -> ExportConfig {
        let strategy = match self.general.strategy {
            SeedStrategy::Session => "session",
            SeedStrategy::CharSum => "char_sum",
        };
        ExportConfig {
            show_footer: self.render.footer,
            footer_label: Some(chart.to_string()),
            provenance_comment: Some(format!(
                "IBDx v{}\nchart={}\nseed={} strategy={}",
                ibdx_core::VERSION,
                chart,
                self.general.seed,
                strategy
            )),
            font_family: self.render.font_family.clone(),
            font_size: self.render.font_size as f64,
        }
    }
}
