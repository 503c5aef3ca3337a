//! Mouse model vs human disease comparison metrics

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{IbdxError, Result};
use crate::rng::{RandomSource, Seeder};
use crate::schema::{ContextSchema, Species};
use crate::types::clamp_score;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMetrics {
    pub overall: f64,
    pub gene_correlation: f64,
    pub pathway_overlap: f64,
    pub de_overlap: f64,
}

impl ComparisonMetrics {
    pub const fn new(overall: f64, gene_correlation: f64, pathway_overlap: f64, de_overlap: f64) -> Self {
        Self {
            overall,
            gene_correlation,
            pathway_overlap,
            de_overlap,
        }
    }

    pub fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("Overall similarity", self.overall),
            ("Gene correlation", self.gene_correlation),
            ("Pathway overlap", self.pathway_overlap),
            ("DE gene overlap", self.de_overlap),
        ]
    }

    fn jittered(self, jitter: f64, rng: &mut dyn RandomSource) -> Self {
        let mut j = |v: f64| clamp_score(v + rng.jitter(jitter), 0.0, 1.0);
        Self {
            overall: j(self.overall),
            gene_correlation: j(self.gene_correlation),
            pathway_overlap: j(self.pathway_overlap),
            de_overlap: j(self.de_overlap),
        }
    }
}

/// Curated bases; the chronic DSS row applies to either disease type
pub fn base_metrics(mouse: &str, human: &str) -> ComparisonMetrics {
    match (mouse, human) {
        ("il10ko", "human_cd") => ComparisonMetrics::new(0.85, 0.82, 0.88, 0.85),
        ("cd45rb", "human_uc") => ComparisonMetrics::new(0.80, 0.78, 0.82, 0.80),
        ("il10ko", "human_uc") => ComparisonMetrics::new(0.75, 0.72, 0.78, 0.75),
        ("cd45rb", "human_cd") => ComparisonMetrics::new(0.70, 0.68, 0.72, 0.70),
        ("chronic_dss", _) => ComparisonMetrics::new(0.65, 0.62, 0.68, 0.65),
        _ => ComparisonMetrics::new(0.60, 0.58, 0.62, 0.60),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub mouse: String,
    pub human: String,
    pub metrics: ComparisonMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelComparison {
    pub mouse_models: Vec<String>,
    pub human_types: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

impl ModelComparison {
    pub fn build(schema: &ContextSchema, jitter: f64, seeder: &Seeder) -> Self {
        let mouse_models: Vec<String> = schema.by_species(Species::Mouse).map(|m| m.id.clone()).collect();
        let human_types: Vec<String> = schema.by_species(Species::Human).map(|m| m.id.clone()).collect();

        let mut rows = Vec::with_capacity(mouse_models.len() * human_types.len());
        for mouse in &mouse_models {
            for human in &human_types {
                let mut rng = seeder.for_parts(&["comparison", mouse.as_str(), human.as_str()]);
                let metrics = base_metrics(mouse, human).jittered(jitter, &mut *rng);
                rows.push(ComparisonRow {
                    mouse: mouse.clone(),
                    human: human.clone(),
                    metrics,
                });
            }
        }

        debug!(
            "Built model comparison: {} mouse models x {} human types",
            mouse_models.len(),
            human_types.len()
        );

        Self {
            mouse_models,
            human_types,
            rows,
        }
    }

    pub fn get(&self, mouse: &str, human: &str) -> Result<&ComparisonMetrics> {
        self.rows
            .iter()
            .find(|r| r.mouse == mouse && r.human == human)
            .map(|r| &r.metrics)
            .ok_or_else(|| IbdxError::UnknownModel(format!("{} vs {}", mouse, human)))
    }

    /// Mouse model with the highest overall similarity to a human disease type
    pub fn best_match(&self, human: &str) -> Result<&ComparisonRow> {
        self.rows
            .iter()
            .filter(|r| r.human == human)
            .max_by(|a, b| a.metrics.overall.total_cmp(&b.metrics.overall))
            .ok_or_else(|| IbdxError::UnknownModel(human.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_and_ranges() {
        let c = ModelComparison::build(&ContextSchema::ibd(), 0.05, &Seeder::default());
        assert_eq!(c.rows.len(), 8);
        for row in &c.rows {
            for (_, v) in row.metrics.named() {
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_best_matches() {
        let c = ModelComparison::build(&ContextSchema::ibd(), 0.05, &Seeder::default());
        // 0.85 vs at most 0.70 + jitter
        assert_eq!(c.best_match("human_cd").unwrap().mouse, "il10ko");
        // 0.80 vs at most 0.75 + jitter, so allow either on a close draw
        let uc = c.best_match("human_uc").unwrap();
        assert!(uc.mouse == "cd45rb" || uc.mouse == "il10ko");
        assert!(c.best_match("human_ibs").is_err());
    }

    #[test]
    fn test_zero_jitter_is_base() {
        let c = ModelComparison::build(&ContextSchema::ibd(), 0.0, &Seeder::default());
        assert_eq!(*c.get("chronic_dss", "human_uc").unwrap(), base_metrics("chronic_dss", "human_cd"));
        assert_eq!(c.get("acute_dss", "human_cd").unwrap().gene_correlation, 0.58);
        assert_eq!(c.best_match("human_uc").unwrap().mouse, "cd45rb");
    }
}
