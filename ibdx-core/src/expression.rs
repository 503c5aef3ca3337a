//! Gene expression table
//!
//! Curated genes are copied verbatim from the catalogue. Every other gene
//! draws one base level and a signed fold change per disease condition.
//! Baseline conditions always keep the base level.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{self, CuratedGene};
use crate::error::{IbdxError, Result};
use crate::rng::{RandomSource, Seeder};
use crate::schema::{ContextSchema, ModelSpec};
use crate::types::{Context, Provenance};

/// Floor for the fold-change divisor
pub const DIVISOR_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionParams {
    /// Number of bulk genes, named `Gene_1..=Gene_N`
    pub synthetic_genes: usize,
    /// Fold changes are drawn from `[-span, span)`
    pub fold_change_span: f64,
    /// Also generate the IBD gene catalogue
    pub include_catalogue_genes: bool,
}

impl Default for ExpressionParams {
    fn default() -> Self {
        Self {
            synthetic_genes: 1000,
            fold_change_span: 5.0,
            include_catalogue_genes: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextLevel {
    pub context: Context,
    pub value: f64,
    pub baseline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionProfile {
    pub gene: String,
    pub provenance: Provenance,
    /// One level per context, in schema order
    pub levels: Vec<ContextLevel>,
}

impl ExpressionProfile {
    pub fn value(&self, model: &str, condition: &str) -> Option<f64> {
        self.levels
            .iter()
            .find(|l| l.context.model == model && l.context.condition == condition)
            .map(|l| l.value)
    }

    /// `(baseline, disease)` for one model
    pub fn pair(&self, model: &str) -> Option<(f64, f64)> {
        let mut base = None;
        let mut disease = None;
        for level in self.levels.iter().filter(|l| l.context.model == model) {
            if level.baseline {
                base = Some(level.value);
            } else {
                disease = Some(level.value);
            }
        }
        Some((base?, disease?))
    }

    pub fn max_value(&self) -> f64 {
        self.levels.iter().map(|l| l.value).fold(0.0, f64::max)
    }

    /// Levels ordered by model, then condition
    pub fn sorted_levels(&self) -> Vec<ContextLevel> {
        let mut levels = self.levels.clone();
        levels.sort_by(|a, b| a.context.cmp(&b.context));
        levels
    }
}

fn synthetic_pair(gene: &str, model: &ModelSpec, base: f64, span: f64, seeder: &Seeder) -> (f64, f64) {
    let mut rng = seeder.for_parts(&[gene, model.id.as_str()]);
    let fc = rng.uniform(-span, span);
    let disease = if fc > 0.0 {
        base * (1.0 + fc)
    } else {
        base / (1.0 - fc).max(DIVISOR_EPSILON)
    };
    (base, disease)
}

/// Base level in `1..=100`, keyed by the gene name alone
fn base_level(gene: &str, seeder: &Seeder) -> f64 {
    let mut rng = seeder.for_key(gene);
    (rng.next_f64() * 100.0).floor() + 1.0
}

fn push_pair(levels: &mut Vec<ContextLevel>, model: &ModelSpec, (base, disease): (f64, f64)) {
    levels.push(ContextLevel {
        context: model.baseline_context(),
        value: base,
        baseline: true,
    });
    levels.push(ContextLevel {
        context: model.disease_context(),
        value: disease,
        baseline: false,
    });
}

pub fn synthesize_profile(
    gene: &str,
    schema: &ContextSchema,
    params: &ExpressionParams,
    seeder: &Seeder,
) -> ExpressionProfile {
    let base = base_level(gene, seeder);
    let mut levels = Vec::with_capacity(schema.len() * 2);
    for model in schema.models() {
        let pair = synthetic_pair(gene, model, base, params.fold_change_span, seeder);
        push_pair(&mut levels, model, pair);
    }
    ExpressionProfile {
        gene: gene.to_string(),
        provenance: Provenance::Synthetic,
        levels,
    }
}

/// Curated values win; models the curated table does not cover are drawn
pub fn curated_profile(
    curated: &CuratedGene,
    schema: &ContextSchema,
    params: &ExpressionParams,
    seeder: &Seeder,
) -> ExpressionProfile {
    let mut levels = Vec::with_capacity(schema.len() * 2);
    let mut base = None;
    for model in schema.models() {
        let pair = match (curated.level(&model.id, true), curated.level(&model.id, false)) {
            (Some(b), Some(d)) => (b, d),
            _ => {
                let b = *base.get_or_insert_with(|| base_level(curated.name, seeder));
                synthetic_pair(curated.name, model, b, params.fold_change_span, seeder)
            }
        };
        push_pair(&mut levels, model, pair);
    }
    ExpressionProfile {
        gene: curated.name.to_string(),
        provenance: Provenance::Curated,
        levels,
    }
}

/// Entity -> context -> level, extended lazily on lookup of unseen genes
#[derive(Debug, Clone)]
pub struct ExpressionTable {
    schema: ContextSchema,
    params: ExpressionParams,
    seeder: Seeder,
    profiles: BTreeMap<String, ExpressionProfile>,
}

impl ExpressionTable {
    pub fn build(schema: &ContextSchema, params: &ExpressionParams, seeder: &Seeder) -> Self {
        let mut profiles = BTreeMap::new();

        for curated in catalog::CURATED_GENES {
            profiles.insert(curated.name.to_string(), curated_profile(curated, schema, params, seeder));
        }

        if params.include_catalogue_genes {
            for gene in catalog::catalogue_genes() {
                profiles
                    .entry(gene.to_string())
                    .or_insert_with(|| synthesize_profile(gene, schema, params, seeder));
            }
        }

        for n in 1..=params.synthetic_genes {
            let gene = catalog::bulk_gene_name(n);
            let profile = synthesize_profile(&gene, schema, params, seeder);
            profiles.entry(gene).or_insert(profile);
        }

        debug!(
            "Built expression table: {} genes x {} contexts",
            profiles.len(),
            schema.len() * 2
        );

        Self {
            schema: schema.clone(),
            params: params.clone(),
            seeder: seeder.clone(),
            profiles,
        }
    }

    /// Map a free-text query to a known key: exact match, then case-insensitive
    pub fn resolve_name(&self, query: &str) -> Result<Option<String>> {
        let name = query.trim();
        if name.is_empty() {
            return Err(IbdxError::InvalidQuery("empty gene name".into()));
        }
        if self.profiles.contains_key(name) {
            return Ok(Some(name.to_string()));
        }
        Ok(self
            .profiles
            .keys()
            .find(|k| k.eq_ignore_ascii_case(name))
            .cloned())
    }

    /// Look up a gene, synthesizing and storing a profile for unseen names
    pub fn lookup(&mut self, query: &str) -> Result<&ExpressionProfile> {
        let key = match self.resolve_name(query)? {
            Some(key) => key,
            None => {
                let name = query.trim().to_string();
                debug!("Synthesizing expression profile for unseen gene {}", name);
                let profile = synthesize_profile(&name, &self.schema, &self.params, &self.seeder);
                self.profiles.insert(name.clone(), profile);
                name
            }
        };
        self.profiles
            .get(&key)
            .ok_or_else(|| IbdxError::InvalidQuery(format!("gene {} vanished from table", key)))
    }

    /// Look up without extending the table
    pub fn peek(&self, query: &str) -> Option<&ExpressionProfile> {
        let key = self.resolve_name(query).ok().flatten()?;
        self.profiles.get(&key)
    }

    pub fn genes(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &ExpressionProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn schema(&self) -> &ContextSchema {
        &self.schema
    }

    pub fn search(&self, term: &str, limit: usize) -> Vec<String> {
        catalog::search(self.genes(), term, limit)
    }
}
