//! IBDx Core Library
//!
//! Seeded generators, curated catalogues, and the per-session data tables
//! behind the IBDx charts.

pub mod error;
pub mod rng;
pub mod types;
pub mod schema;
pub mod catalog;
pub mod regulatory;
pub mod expression;
pub mod pathway;
pub mod target;
pub mod similarity;
pub mod comparison;
pub mod volcano;
pub mod pca;
pub mod session;

// Re-export commonly used types and functions
pub use error::{IbdxError, Result};
pub use rng::{RandomSource, SeedStrategy, Seeder, CharSumLcg, KeyedRng};
pub use types::{Context, Provenance, EntityKind};
pub use schema::{ContextSchema, ModelSpec, Species};
pub use expression::{ExpressionProfile, ExpressionTable, ContextLevel, ExpressionParams};
pub use pathway::{PathwayTable, PathwayPriors};
pub use target::{TargetScore, TargetTable};
pub use similarity::SimilarityMatrix;
pub use comparison::{ComparisonMetrics, ModelComparison};
pub use volcano::{VolcanoPoint, VolcanoData, Regulation, VolcanoParams};
pub use pca::{PcaPoint, PcaData};
pub use regulatory::{Effect, RegulatoryRule};
pub use session::{Session, GeneratorConfig};

/// Version information for the IBDx core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
