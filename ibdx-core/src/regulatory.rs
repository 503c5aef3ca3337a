//! Curated gene regulatory network: which genes each regulator activates or represses

use std::collections::BTreeSet;

use log::warn;
use serde::Serialize;

use crate::error::{IbdxError, Result};
use crate::types::EntityKind;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RegulatoryRule {
    pub regulator: &'static str,
    pub activates: &'static [&'static str],
    pub represses: &'static [&'static str],
}

/// How a regulator acts on one target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Activates,
    Represses,
}

macro_rules! rule {
    ($regulator:literal => [$($up:literal),* $(,)?] / [$($down:literal),* $(,)?]) => {
        RegulatoryRule {
            regulator: $regulator,
            activates: &[$($up),*],
            represses: &[$($down),*],
        }
    };
}

pub const NETWORK: &[RegulatoryRule] = &[
    // NF-kB
    rule!("NFKB1" => ["TNF", "IL1B", "IL6", "IL8", "CXCL10", "CCL2", "ICAM1", "VCAM1", "MMP9", "COX2", "NFKBIA"]
        / ["IL10", "FOXP3"]),
    rule!("RELA" => ["TNF", "IL1B", "IL6", "IL8", "CXCL10", "CCL2", "ICAM1", "VCAM1", "MMP9", "COX2"]
        / ["IL10"]),
    // STAT
    rule!("STAT1" => ["CXCL10", "IRF1", "IDO1", "ICAM1", "VCAM1", "MHC1", "MHC2", "SOCS1"]
        / ["IL17A", "RORC"]),
    rule!("STAT3" => ["IL6", "IL17A", "IL21", "IL22", "IL23R", "RORC", "BCL2", "SOCS3", "HIF1A"]
        / ["IL12", "IFNG", "TNF"]),
    rule!("STAT4" => ["IFNG", "TBX21", "IL12RB1", "IL12RB2"] / ["IL4", "GATA3"]),
    rule!("STAT6" => ["IL4", "IL13", "GATA3", "CCL11", "CCL17", "CCL22"] / ["IFNG", "TBX21"]),
    // T cell transcription factors
    rule!("TBX21" => ["IFNG", "IL12RB1", "IL12RB2"] / ["IL4", "IL5", "IL13", "GATA3"]),
    rule!("RORC" => ["IL17A", "IL17F", "IL22", "IL23R", "CCR6"] / ["FOXP3", "IFNG"]),
    rule!("GATA3" => ["IL4", "IL5", "IL13", "IL10"] / ["IFNG", "TBX21"]),
    rule!("FOXP3" => ["IL10", "TGFB1", "CTLA4", "IL2RA"] / ["IL2", "IFNG", "IL17A", "TNF"]),
    // cytokines
    rule!("TNF" => ["IL1B", "IL6", "IL8", "CXCL10", "CCL2", "ICAM1", "VCAM1", "MMP9", "COX2", "NFKB1", "RELA"]
        / ["MUC2", "CLDN1", "OCLN", "TJP1"]),
    rule!("IL1B" => ["IL6", "IL8", "CCL2", "COX2", "MMP9", "NFKB1", "RELA"] / ["MUC2", "CLDN1"]),
    rule!("IL6" => ["STAT3", "IL17A", "IL21", "IL22", "SOCS3", "CRP", "FGA", "FGB", "FGG"]
        / ["IL10", "FOXP3"]),
    rule!("IL10" => ["STAT3", "SOCS3", "IL10RA", "IL10RB", "FOXP3"]
        / ["TNF", "IL1B", "IL6", "IL12", "IL23A", "NFKB1", "RELA"]),
    rule!("IL17A" => ["IL6", "IL8", "CCL2", "CCL20", "MMP9", "MMP13", "G-CSF", "GM-CSF"] / []),
    rule!("IFNG" => ["STAT1", "IRF1", "CXCL10", "CXCL9", "CXCL11", "IDO1", "NOS2", "MHC1", "MHC2"]
        / ["IL4", "IL5", "IL13", "GATA3"]),
    rule!("TGFB1" => ["FOXP3", "SMAD2", "SMAD3", "SMAD4", "COL1A1", "COL3A1", "FN1", "ACTA2"]
        / ["IL2", "IFNG", "TNF", "IL17A"]),
    // signaling
    rule!("MYD88" => ["IRAK4", "TRAF6", "NFKB1", "RELA", "MAPK1", "MAPK14"] / []),
    rule!("JAK1" => ["STAT1", "STAT3", "STAT4", "STAT6"] / []),
    rule!("JAK2" => ["STAT1", "STAT3", "STAT4", "STAT5"] / []),
];

/// Exact match, then case-insensitive
pub fn rule(name: &str) -> Result<&'static RegulatoryRule> {
    let query = name.trim();
    if query.is_empty() {
        return Err(IbdxError::InvalidQuery("empty regulator name".into()));
    }
    NETWORK
        .iter()
        .find(|r| r.regulator == query)
        .or_else(|| NETWORK.iter().find(|r| r.regulator.eq_ignore_ascii_case(query)))
        .ok_or_else(|| {
            warn!("Regulator {} not in network", query);
            IbdxError::lookup_miss(EntityKind::Regulator, query, suggestions(query))
        })
}

pub fn activates(name: &str) -> Result<&'static [&'static str]> {
    rule(name).map(|r| r.activates)
}

pub fn represses(name: &str) -> Result<&'static [&'static str]> {
    rule(name).map(|r| r.represses)
}

pub fn regulators() -> impl Iterator<Item = &'static str> {
    NETWORK.iter().map(|r| r.regulator)
}

/// Every rule acting on `target`, in network order
pub fn regulated_by(target: &str) -> Vec<(&'static str, Effect)> {
    let target = target.trim();
    NETWORK
        .iter()
        .flat_map(|r| {
            let up = r
                .activates
                .iter()
                .filter(move |g| g.eq_ignore_ascii_case(target))
                .map(move |_| (r.regulator, Effect::Activates));
            let down = r
                .represses
                .iter()
                .filter(move |g| g.eq_ignore_ascii_case(target))
                .map(move |_| (r.regulator, Effect::Represses));
            up.chain(down)
        })
        .collect()
}

/// Regulators and all their targets, sorted and deduplicated
pub fn network_genes() -> Vec<&'static str> {
    let genes: BTreeSet<&'static str> = NETWORK
        .iter()
        .flat_map(|r| {
            std::iter::once(r.regulator)
                .chain(r.activates.iter().copied())
                .chain(r.represses.iter().copied())
        })
        .collect();
    genes.into_iter().collect()
}

/// Regulators sharing the first two letters, else the whole regulator list
fn suggestions(query: &str) -> Vec<String> {
    let prefix: String = query.to_uppercase().chars().take(2).collect();
    let mut hits: Vec<String> = regulators()
        .filter(|r| r.starts_with(&prefix))
        .map(str::to_string)
        .collect();
    if hits.is_empty() {
        hits = regulators().take(5).map(str::to_string).collect();
    }
    hits.truncate(5);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_has_twenty_regulators() {
        assert_eq!(NETWORK.len(), 20);
        let unique: BTreeSet<&str> = regulators().collect();
        assert_eq!(unique.len(), 20);
    }

    #[test]
    fn test_activates_and_represses() {
        assert!(activates("NFKB1").unwrap().contains(&"TNF"));
        assert_eq!(represses("NFKB1").unwrap(), &["IL10", "FOXP3"]);
        assert_eq!(activates("jak1").unwrap(), &["STAT1", "STAT3", "STAT4", "STAT6"]);
        assert!(represses("MYD88").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_regulator_is_lookup_miss() {
        let err = activates("STAT9").unwrap_err();
        assert!(err.is_lookup_miss());
        match err {
            IbdxError::LookupMiss { kind, suggestions, .. } => {
                assert_eq!(kind, EntityKind::Regulator);
                assert!(suggestions.contains(&"STAT3".to_string()));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(matches!(represses("  "), Err(IbdxError::InvalidQuery(_))));
    }

    #[test]
    fn test_regulated_by_lists_both_effects() {
        let tnf = regulated_by("TNF");
        assert!(tnf.contains(&("NFKB1", Effect::Activates)));
        assert!(tnf.contains(&("IL10", Effect::Represses)));
        assert!(regulated_by("ZZZ").is_empty());
    }

    #[test]
    fn test_network_genes_cover_targets() {
        let genes = network_genes();
        for gene in ["NFKBIA", "SOCS3", "G-CSF", "STAT5", "JAK2", "ACTA2"] {
            assert!(genes.contains(&gene), "{}", gene);
        }
        let mut sorted = genes.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted, genes);
    }
}
