//! Placed sample coordinates for the PCA scatter
//!
//! Coordinates are drawn inside fixed cluster boxes: baselines on the left,
//! disease conditions on the right grouped by how closely each mouse model
//! tracks a human disease type.

use serde::{Deserialize, Serialize};

use crate::rng::{RandomSource, Seeder};
use crate::schema::{ContextSchema, ModelSpec};
use crate::types::Context;

pub const PC1_VARIANCE: f64 = 35.2;
pub const PC2_VARIANCE: f64 = 18.7;

type Cluster = ((f64, f64), (f64, f64));

const BASELINE_CLUSTER: Cluster = ((-5.0, -3.0), (-2.0, 2.0));
const CD_LIKE_CLUSTER: Cluster = ((3.0, 5.0), (2.0, 4.0));
const UC_LIKE_CLUSTER: Cluster = ((2.0, 4.0), (-1.0, 1.0));
const DSS_CLUSTER: Cluster = ((1.0, 3.0), (-3.0, -1.0));

fn cluster_for(model: &ModelSpec, baseline: bool) -> Cluster {
    if baseline {
        return BASELINE_CLUSTER;
    }
    match model.id.as_str() {
        "il10ko" | "human_cd" => CD_LIKE_CLUSTER,
        "cd45rb" | "human_uc" => UC_LIKE_CLUSTER,
        _ => DSS_CLUSTER,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcaPoint {
    pub context: Context,
    /// Model display name
    pub model_name: String,
    pub baseline: bool,
    pub x: f64,
    pub y: f64,
}

impl PcaPoint {
    pub fn label(&self) -> String {
        format!("{} - {}", self.model_name, self.context.condition)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcaData {
    pub points: Vec<PcaPoint>,
}

impl PcaData {
    pub fn generate(schema: &ContextSchema, seeder: &Seeder) -> Self {
        let mut points = Vec::with_capacity(schema.len() * 2);
        for model in schema.models() {
            for (context, baseline) in [(model.baseline_context(), true), (model.disease_context(), false)] {
                let ((x0, x1), (y0, y1)) = cluster_for(model, baseline);
                let mut rng = seeder.for_parts(&["pca", context.model.as_str(), context.condition.as_str()]);
                let x = rng.uniform(x0, x1);
                let y = rng.uniform(y0, y1);
                points.push(PcaPoint {
                    context,
                    model_name: model.name.clone(),
                    baseline,
                    x,
                    y,
                });
            }
        }
        Self { points }
    }

    pub fn x_label() -> String {
        format!("PC1 ({:.1}% variance)", PC1_VARIANCE)
    }

    pub fn y_label() -> String {
        format!("PC2 ({:.1}% variance)", PC2_VARIANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_land_in_clusters() {
        let pca = PcaData::generate(&ContextSchema::ibd(), &Seeder::default());
        assert_eq!(pca.points.len(), 12);
        for p in &pca.points {
            if p.baseline {
                assert!(p.x < -3.0 + 1e-9 && p.x >= -5.0);
            } else {
                assert!(p.x >= 1.0, "{}", p.label());
            }
        }
        let cd = pca.points.iter().find(|p| p.context.condition == "CD").unwrap();
        assert!(cd.y >= 2.0 && cd.y <= 4.0);
        let dss = pca.points.iter().find(|p| p.context.condition == "DSS").unwrap();
        assert!(dss.y <= -1.0);
    }

    #[test]
    fn test_axis_labels() {
        assert_eq!(PcaData::x_label(), "PC1 (35.2% variance)");
        assert_eq!(PcaData::y_label(), "PC2 (18.7% variance)");
    }
}
