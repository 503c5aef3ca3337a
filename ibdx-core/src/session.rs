//! One generated dataset, built once and passed by reference to renderers

use log::info;
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::comparison::ModelComparison;
use crate::error::Result;
use crate::expression::{ExpressionParams, ExpressionProfile, ExpressionTable};
use crate::pathway::{PathwayPriors, PathwayTable};
use crate::pca::PcaData;
use crate::rng::{SeedStrategy, Seeder, DEFAULT_SESSION_SEED};
use crate::schema::ContextSchema;
use crate::similarity::SimilarityMatrix;
use crate::target::{TargetScore, TargetTable};
use crate::volcano::{VolcanoData, VolcanoParams};

/// All knobs of the generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub strategy: SeedStrategy,
    pub session_seed: String,
    pub expression: ExpressionParams,
    /// Amplitude of the additive noise on drawn scores
    pub score_jitter: f64,
    pub volcano: VolcanoParams,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            strategy: SeedStrategy::default(),
            session_seed: DEFAULT_SESSION_SEED.to_string(),
            expression: ExpressionParams::default(),
            score_jitter: 0.05,
            volcano: VolcanoParams::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn seeder(&self) -> Seeder {
        Seeder::new(self.strategy, self.session_seed.clone())
    }
}

pub struct Session {
    config: GeneratorConfig,
    schema: ContextSchema,
    seeder: Seeder,
    expression: ExpressionTable,
    pathways: PathwayTable,
    targets: TargetTable,
    similarity: SimilarityMatrix,
    comparison: ModelComparison,
    pca: PcaData,
}

impl Session {
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_schema(config, ContextSchema::ibd(), PathwayPriors::ibd())
    }

    pub fn with_schema(config: GeneratorConfig, schema: ContextSchema, priors: PathwayPriors) -> Self {
        let seeder = config.seeder();
        let jitter = config.score_jitter;

        let expression = ExpressionTable::build(&schema, &config.expression, &seeder);
        let pathways = PathwayTable::build(&schema, &priors, jitter, &seeder);
        let targets = TargetTable::build(jitter, &seeder);
        let similarity = SimilarityMatrix::build(&schema, jitter, &seeder);
        let comparison = ModelComparison::build(&schema, jitter, &seeder);
        let pca = PcaData::generate(&schema, &seeder);

        info!(
            "Session ready: {} genes, {} models, seed strategy {:?}",
            expression.len(),
            schema.len(),
            config.strategy
        );

        Self {
            config,
            schema,
            seeder,
            expression,
            pathways,
            targets,
            similarity,
            comparison,
            pca,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn schema(&self) -> &ContextSchema {
        &self.schema
    }

    /// Free-text gene lookup; unseen names are synthesized and kept
    pub fn gene(&mut self, name: &str) -> Result<&ExpressionProfile> {
        self.expression.lookup(name)
    }

    pub fn peek_gene(&self, name: &str) -> Option<&ExpressionProfile> {
        self.expression.peek(name)
    }

    pub fn search_genes(&self, term: &str) -> Vec<String> {
        self.expression.search(term, catalog::DEFAULT_SEARCH_LIMIT)
    }

    pub fn gene_description(&self, name: &str) -> String {
        let resolved = self
            .expression
            .resolve_name(name)
            .ok()
            .flatten()
            .unwrap_or_else(|| name.trim().to_string());
        catalog::description(&resolved)
    }

    pub fn expression(&self) -> &ExpressionTable {
        &self.expression
    }

    pub fn pathways(&self) -> &PathwayTable {
        &self.pathways
    }

    pub fn target(&self, name: &str) -> Result<&TargetScore> {
        self.targets.get(name)
    }

    pub fn targets(&self) -> &TargetTable {
        &self.targets
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn comparison(&self) -> &ModelComparison {
        &self.comparison
    }

    pub fn pca(&self) -> &PcaData {
        &self.pca
    }

    /// Volcano data is keyed by comparison name, so regenerating is stable
    pub fn volcano(&self, comparison: &str) -> VolcanoData {
        VolcanoData::generate(comparison, &self.config.volcano, &self.seeder)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> GeneratorConfig {
        GeneratorConfig {
            expression: ExpressionParams {
                synthetic_genes: 20,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_session_tables_are_populated() {
        let session = Session::new(small());
        assert_eq!(session.pathways().pathways().len(), 10);
        assert_eq!(session.targets().all().len(), 22);
        assert_eq!(session.similarity().len(), 6);
        assert_eq!(session.pca().points.len(), 12);
        assert!(session.peek_gene("Gene_20").is_some());
    }

    #[test]
    fn test_gene_description_resolves_case() {
        let session = Session::new(small());
        assert!(session.gene_description("tnf").starts_with("Tumor Necrosis Factor"));
    }

    #[test]
    fn test_volcano_is_stable() {
        let session = Session::new(small());
        assert_eq!(session.volcano("a_vs_b"), session.volcano("a_vs_b"));
        assert_ne!(session.volcano("a_vs_b").points, session.volcano("c_vs_d").points);
    }
}
