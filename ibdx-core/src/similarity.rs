//! Symmetric model-to-model similarity matrix

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{IbdxError, Result};
use crate::rng::{RandomSource, Seeder};
use crate::schema::ContextSchema;
use crate::types::clamp_score;

/// Curated bases between mouse models and human disease types
pub const BASE_SIMILARITY: &[(&str, &str, f64)] = &[
    ("cd45rb", "human_uc", 0.75),
    ("cd45rb", "human_cd", 0.65),
    ("acute_dss", "human_uc", 0.60),
    ("acute_dss", "human_cd", 0.55),
    ("chronic_dss", "human_uc", 0.65),
    ("chronic_dss", "human_cd", 0.70),
    ("il10ko", "human_uc", 0.70),
    ("il10ko", "human_cd", 0.80),
];

const DRAW_RANGE: (f64, f64) = (0.5, 0.9);

fn base_for(a: &str, b: &str) -> Option<f64> {
    BASE_SIMILARITY
        .iter()
        .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map(|(_, _, v)| *v)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    /// Model ids, in schema order
    pub ids: Vec<String>,
    /// Display names, parallel to `ids`
    pub names: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    pub fn build(schema: &ContextSchema, jitter: f64, seeder: &Seeder) -> Self {
        let n = schema.len();
        let models = schema.models();
        let mut values = vec![vec![1.0; n]; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (models[i].id.as_str(), models[j].id.as_str());
                // one draw per unordered pair
                let (lo_key, hi_key) = if a <= b { (a, b) } else { (b, a) };
                let mut rng = seeder.for_parts(&["similarity", lo_key, hi_key]);
                let base = match base_for(a, b) {
                    Some(v) => v,
                    None => rng.uniform(DRAW_RANGE.0, DRAW_RANGE.1),
                };
                let v = clamp_score(base + rng.jitter(jitter), 0.0, 1.0);
                values[i][j] = v;
                values[j][i] = v;
            }
        }

        debug!("Built {}x{} similarity matrix", n, n);

        Self {
            ids: models.iter().map(|m| m.id.clone()).collect(),
            names: models.iter().map(|m| m.name.clone()).collect(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn index_of(&self, model: &str) -> Result<usize> {
        let query = model.trim();
        self.ids
            .iter()
            .zip(&self.names)
            .position(|(id, name)| id.eq_ignore_ascii_case(query) || name.eq_ignore_ascii_case(query))
            .ok_or_else(|| IbdxError::UnknownModel(query.to_string()))
    }

    /// Similarity between two models, addressed by id or display name
    pub fn value(&self, a: &str, b: &str) -> Result<f64> {
        let (i, j) = (self.index_of(a)?, self.index_of(b)?);
        Ok(self.values[i][j])
    }
}
