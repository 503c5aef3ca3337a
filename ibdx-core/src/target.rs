//! Therapeutic target scores

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{IbdxError, Result};
use crate::rng::{RandomSource, Seeder};
use crate::types::{clamp_score, EntityKind, Provenance};

pub const TARGETS: &[&str] = &[
    "TNF", "IL1B", "IL6", "IL17A", "IL23A", "IL12B", "IFNG", "TLR4", "NOD2", "STAT3", "JAK2",
    "MAPK14", "NFKB1", "RELA", "FOXP3", "RORC", "ITGB7", "CCR9", "S1PR1", "PTGS2", "PDE4", "SMAD7",
];

/// `(targets, [de, pathway relevance, conservation, druggability], therapy)`
const CURATED_TARGETS: &[(&[&str], [f64; 4], &str)] = &[
    (&["TNF"], [0.95, 0.98, 0.90, 0.99], "infliximab, adalimumab"),
    (&["IL12B", "IL23A"], [0.90, 0.92, 0.88, 0.95], "ustekinumab"),
    (&["ITGB7"], [0.85, 0.88, 0.82, 0.90], "vedolizumab"),
    (&["JAK2", "STAT3"], [0.88, 0.90, 0.85, 0.92], "tofacitinib"),
    (&["PDE4"], [0.80, 0.82, 0.78, 0.85], "apremilast"),
    (&["S1PR1"], [0.82, 0.84, 0.80, 0.88], "ozanimod"),
    (&["IL1B"], [0.86, 0.88, 0.84, 0.86], "potential target"),
    (&["IL6"], [0.84, 0.86, 0.82, 0.84], "potential target"),
];

const DRAW_RANGE: (f64, f64) = (0.5, 0.8);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetScore {
    pub name: String,
    pub de_score: f64,
    pub pathway_relevance: f64,
    pub conservation: f64,
    pub druggability: f64,
    pub provenance: Provenance,
    pub therapy: Option<String>,
}

impl TargetScore {
    /// Mean of the four sub-scores
    pub fn overall(&self) -> f64 {
        (self.de_score + self.pathway_relevance + self.conservation + self.druggability) / 4.0
    }

    pub fn sub_scores(&self) -> [(&'static str, f64); 4] {
        [
            ("Differential expression", self.de_score),
            ("Pathway relevance", self.pathway_relevance),
            ("Conservation", self.conservation),
            ("Druggability", self.druggability),
        ]
    }

    fn curated(name: &str, scores: [f64; 4], therapy: &str) -> Self {
        let [de, pr, co, dr] = scores.map(|s| clamp_score(s, 0.0, 1.0));
        Self {
            name: name.to_string(),
            de_score: de,
            pathway_relevance: pr,
            conservation: co,
            druggability: dr,
            provenance: Provenance::Curated,
            therapy: Some(therapy.to_string()),
        }
    }

    fn synthetic(name: &str, jitter: f64, seeder: &Seeder) -> Self {
        let mut rng = seeder.for_parts(&["target", name]);
        let mut draw = || {
            let (lo, hi) = DRAW_RANGE;
            clamp_score(rng.uniform(lo, hi) + rng.jitter(jitter), 0.0, 1.0)
        };
        Self {
            name: name.to_string(),
            de_score: draw(),
            pathway_relevance: draw(),
            conservation: draw(),
            druggability: draw(),
            provenance: Provenance::Synthetic,
            therapy: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetTable {
    targets: Vec<TargetScore>,
}

impl TargetTable {
    pub fn build(jitter: f64, seeder: &Seeder) -> Self {
        let targets: Vec<TargetScore> = TARGETS
            .iter()
            .map(|name| {
                CURATED_TARGETS
                    .iter()
                    .find(|(names, _, _)| names.contains(name))
                    .map(|(_, scores, therapy)| TargetScore::curated(name, *scores, therapy))
                    .unwrap_or_else(|| TargetScore::synthetic(name, jitter, seeder))
            })
            .collect();
        debug!("Built target table: {} targets", targets.len());
        Self { targets }
    }

    pub fn get(&self, name: &str) -> Result<&TargetScore> {
        let query = name.trim();
        if query.is_empty() {
            return Err(IbdxError::InvalidQuery("empty target name".into()));
        }
        self.targets
            .iter()
            .find(|t| t.name == query)
            .or_else(|| self.targets.iter().find(|t| t.name.eq_ignore_ascii_case(query)))
            .ok_or_else(|| {
                warn!("Target {} not found", query);
                IbdxError::lookup_miss(EntityKind::Target, query, self.suggestions(query))
            })
    }

    /// Targets sharing a prefix with the query, falling back to the top of the ranking
    fn suggestions(&self, query: &str) -> Vec<String> {
        let upper = query.to_uppercase();
        let prefix: String = upper.chars().take(2).collect();
        let mut hits: Vec<String> = self
            .targets
            .iter()
            .filter(|t| t.name.starts_with(&prefix))
            .map(|t| t.name.clone())
            .collect();
        if hits.is_empty() {
            hits = self.ranked().iter().take(3).map(|t| t.name.clone()).collect();
        }
        hits.truncate(5);
        hits
    }

    pub fn all(&self) -> &[TargetScore] {
        &self.targets
    }

    /// Sorted by overall score, highest first; ties keep catalogue order
    pub fn ranked(&self) -> Vec<&TargetScore> {
        let mut ranked: Vec<&TargetScore> = self.targets.iter().collect();
        ranked.sort_by(|a, b| b.overall().total_cmp(&a.overall()));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TargetTable {
        TargetTable::build(0.05, &Seeder::default())
    }

    #[test]
    fn test_curated_tnf() {
        let t = table();
        let tnf = t.get("TNF").unwrap();
        assert_eq!(tnf.de_score, 0.95);
        assert_eq!(tnf.druggability, 0.99);
        assert_eq!(tnf.therapy.as_deref(), Some("infliximab, adalimumab"));
        assert!((tnf.overall() - 0.955).abs() < 1e-12);
    }

    #[test]
    fn test_shared_constants() {
        let t = table();
        assert_eq!(t.get("IL23A").unwrap().overall(), t.get("IL12B").unwrap().overall());
        assert_eq!(t.get("stat3").unwrap().conservation, 0.85);
    }

    #[test]
    fn test_synthetic_scores_in_range() {
        let t = table();
        assert_eq!(t.all().len(), 22);
        for target in t.all().iter().filter(|t| t.provenance == Provenance::Synthetic) {
            for (_, s) in target.sub_scores() {
                assert!((0.45..=0.85).contains(&s), "{} {}", target.name, s);
            }
        }
    }

    #[test]
    fn test_ranking_puts_tnf_first() {
        let t = table();
        let ranked = t.ranked();
        assert_eq!(ranked[0].name, "TNF");
        assert!(ranked.windows(2).all(|w| w[0].overall() >= w[1].overall()));
    }

    #[test]
    fn test_unknown_target_is_lookup_miss() {
        let t = table();
        let err = t.get("ZZZFAKE").unwrap_err();
        assert!(err.is_lookup_miss());
        assert!(err.status_line().starts_with("Target ZZZFAKE not found in dataset"));
        match t.get("ILX").unwrap_err() {
            IbdxError::LookupMiss { suggestions, .. } => assert!(suggestions.contains(&"IL6".to_string())),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
