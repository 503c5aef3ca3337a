//! Pathway enrichment scores per (pathway, model)

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{IbdxError, Result};
use crate::rng::{RandomSource, Seeder};
use crate::schema::ContextSchema;
use crate::types::{clamp_score, EntityKind, Provenance};

pub const PATHWAYS: &[&str] = &[
    "inflammatory_response",
    "cytokine_signaling",
    "t_cell_activation",
    "b_cell_receptor",
    "nfkb_signaling",
    "tnf_signaling",
    "il17_signaling",
    "tlr_signaling",
    "jak_stat_signaling",
    "mapk_signaling",
];

pub const MAX_ENRICHMENT: f64 = 10.0;

const ACRONYMS: &[&str] = &["nfkb", "tnf", "il17", "tlr", "jak", "stat", "mapk"];

/// `t_cell_activation` -> `T Cell Activation`, `jak_stat_signaling` -> `JAK STAT Signaling`
pub fn display_name(pathway: &str) -> String {
    pathway
        .split('_')
        .map(|word| {
            if ACRONYMS.contains(&word) {
                word.to_uppercase()
            } else {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fixed (pathway, model) scores plus per-pathway draw ranges for everything else
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathwayPriors {
    pub fixed: Vec<(String, String, f64)>,
    pub ranges: Vec<(String, f64, f64)>,
    pub default_range: (f64, f64),
}

impl PathwayPriors {
    pub fn ibd() -> Self {
        let fixed = [
            ("inflammatory_response", "il10ko", 9.5),
            ("inflammatory_response", "cd45rb", 8.7),
            ("inflammatory_response", "human_cd", 9.2),
            ("inflammatory_response", "human_uc", 8.9),
            ("cytokine_signaling", "cd45rb", 9.3),
            ("cytokine_signaling", "il10ko", 9.0),
            ("cytokine_signaling", "human_cd", 8.8),
            ("t_cell_activation", "cd45rb", 9.8),
            ("t_cell_activation", "human_cd", 8.5),
            ("t_cell_activation", "human_uc", 8.2),
            ("tlr_signaling", "acute_dss", 9.4),
            ("tlr_signaling", "chronic_dss", 9.1),
        ];
        let ranges = [
            ("inflammatory_response", 7.5, 9.5),
            ("cytokine_signaling", 7.0, 9.0),
            ("t_cell_activation", 6.5, 8.5),
            ("tlr_signaling", 6.0, 9.0),
        ];
        Self {
            fixed: fixed
                .iter()
                .map(|(p, m, s)| (p.to_string(), m.to_string(), *s))
                .collect(),
            ranges: ranges
                .iter()
                .map(|(p, lo, hi)| (p.to_string(), *lo, *hi))
                .collect(),
            default_range: (5.0, 10.0),
        }
    }

    pub fn fixed_score(&self, pathway: &str, model: &str) -> Option<f64> {
        self.fixed
            .iter()
            .find(|(p, m, _)| p == pathway && m == model)
            .map(|(_, _, s)| *s)
    }

    pub fn range(&self, pathway: &str) -> (f64, f64) {
        self.ranges
            .iter()
            .find(|(p, _, _)| p == pathway)
            .map(|(_, lo, hi)| (*lo, *hi))
            .unwrap_or(self.default_range)
    }
}

impl Default for PathwayPriors {
    fn default() -> Self {
        Self::ibd()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathwayScore {
    pub score: f64,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathwayTable {
    pathways: Vec<String>,
    models: Vec<String>,
    /// pathway -> model -> score
    scores: BTreeMap<String, BTreeMap<String, PathwayScore>>,
}

impl PathwayTable {
    pub fn build(schema: &ContextSchema, priors: &PathwayPriors, jitter: f64, seeder: &Seeder) -> Self {
        let models: Vec<String> = schema.ids().iter().map(|s| s.to_string()).collect();
        let mut scores = BTreeMap::new();

        for pathway in PATHWAYS {
            let row: BTreeMap<String, PathwayScore> = models
                .iter()
                .map(|model| {
                    let cell = match priors.fixed_score(pathway, model) {
                        Some(score) => PathwayScore {
                            score: clamp_score(score, 0.0, MAX_ENRICHMENT),
                            provenance: Provenance::Curated,
                        },
                        None => {
                            let (lo, hi) = priors.range(pathway);
                            let mut rng = seeder.for_parts(&["pathway", *pathway, model.as_str()]);
                            let drawn = rng.uniform(lo, hi) + rng.jitter(jitter);
                            PathwayScore {
                                score: clamp_score(drawn, 0.0, MAX_ENRICHMENT),
                                provenance: Provenance::Synthetic,
                            }
                        }
                    };
                    (model.clone(), cell)
                })
                .collect();
            scores.insert(pathway.to_string(), row);
        }

        debug!("Built pathway table: {} pathways x {} models", PATHWAYS.len(), models.len());

        Self {
            pathways: PATHWAYS.iter().map(|s| s.to_string()).collect(),
            models,
            scores,
        }
    }

    pub fn pathways(&self) -> &[String] {
        &self.pathways
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    fn row_for(&self, pathway: &str) -> Result<&BTreeMap<String, PathwayScore>> {
        let key = pathway.trim().to_ascii_lowercase();
        self.scores.get(&key).ok_or_else(|| {
            warn!("Pathway {} not found", pathway);
            IbdxError::lookup_miss(EntityKind::Pathway, pathway.trim(), self.pathways.clone())
        })
    }

    pub fn score(&self, pathway: &str, model: &str) -> Result<f64> {
        self.row_for(pathway)?
            .get(model)
            .map(|cell| cell.score)
            .ok_or_else(|| IbdxError::UnknownModel(model.to_string()))
    }

    /// Scores for one pathway, in schema model order
    pub fn row(&self, pathway: &str) -> Result<Vec<(String, f64)>> {
        let row = self.row_for(pathway)?;
        Ok(self
            .models
            .iter()
            .filter_map(|m| row.get(m).map(|cell| (m.clone(), cell.score)))
            .collect())
    }

    pub fn cell(&self, pathway: &str, model: &str) -> Option<PathwayScore> {
        self.scores.get(pathway)?.get(model).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PathwayTable {
        PathwayTable::build(&ContextSchema::ibd(), &PathwayPriors::ibd(), 0.05, &Seeder::default())
    }

    #[test]
    fn test_fixed_priors_are_exact() {
        let t = table();
        assert_eq!(t.score("inflammatory_response", "il10ko").unwrap(), 9.5);
        assert_eq!(t.score("t_cell_activation", "cd45rb").unwrap(), 9.8);
        assert_eq!(t.score("tlr_signaling", "chronic_dss").unwrap(), 9.1);
        assert_eq!(
            t.cell("tlr_signaling", "acute_dss").unwrap().provenance,
            Provenance::Curated
        );
    }

    #[test]
    fn test_drawn_scores_respect_range() {
        let t = table();
        for pathway in t.pathways() {
            for (model, score) in t.row(pathway).unwrap() {
                assert!((0.0..=MAX_ENRICHMENT).contains(&score), "{} {}", pathway, model);
            }
        }
        let s = t.score("tlr_signaling", "human_uc").unwrap();
        assert!((5.95..=9.05).contains(&s));
    }

    #[test]
    fn test_unknown_pathway_is_lookup_miss() {
        let t = table();
        let err = t.score("wnt_signaling", "il10ko").unwrap_err();
        assert!(err.is_lookup_miss());
        assert!(matches!(t.score("tnf_signaling", "rat"), Err(IbdxError::UnknownModel(_))));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("t_cell_activation"), "T Cell Activation");
        assert_eq!(display_name("jak_stat_signaling"), "JAK STAT Signaling");
    }
}
