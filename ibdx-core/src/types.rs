use serde::{Deserialize, Serialize};
use std::fmt;

/// A (model, condition) pair under which an entity is measured
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Context {
    pub model: String,
    pub condition: String,
}

impl Context {
    pub fn new<M: Into<String>, C: Into<String>>(model: M, condition: C) -> Self {
        Self {
            model: model.into(),
            condition: condition.into(),
        }
    }

    /// Label used on chart axes and tooltips
    pub fn label(&self) -> String {
        format!("{} - {}", self.model, self.condition)
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.model, self.condition)
    }
}

/// Where a value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Hand-authored constant, never regenerated
    Curated,
    /// Drawn from the seeded generator
    Synthetic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Gene,
    Pathway,
    Target,
    Regulator,
}

impl EntityKind {
    pub fn noun(&self) -> &'static str {
        match self {
            EntityKind::Gene => "gene",
            EntityKind::Pathway => "pathway",
            EntityKind::Target => "target",
            EntityKind::Regulator => "regulator",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Gene => write!(f, "Gene"),
            EntityKind::Pathway => write!(f, "Pathway"),
            EntityKind::Target => write!(f, "Target"),
            EntityKind::Regulator => write!(f, "Regulator"),
        }
    }
}

/// Clamp a score into `[lo, hi]`, mapping NaN to `lo`
pub fn clamp_score(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        return lo;
    }
    value.max(lo).min(hi)
}
