//! Simulated differential-expression results for volcano plots

use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::bulk_gene_name;
use crate::rng::{RandomSource, Seeder};

pub const DEFAULT_COMPARISON: &str = "il10ko_IL10KO_vs_WT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regulation {
    Up,
    Down,
    NotSignificant,
}

impl Regulation {
    pub fn label(&self) -> &'static str {
        match self {
            Regulation::Up => "Up-regulated",
            Regulation::Down => "Down-regulated",
            Regulation::NotSignificant => "Not significant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolcanoParams {
    pub points: usize,
    /// log2 fold changes are drawn from `[-max_fold_change, max_fold_change)`
    pub max_fold_change: f64,
    /// -log10 p above which a point is significant (0.05)
    pub p_threshold: f64,
    /// |log2FC| above which a point is regulated
    pub fc_threshold: f64,
}

impl Default for VolcanoParams {
    fn default() -> Self {
        Self {
            points: 1000,
            max_fold_change: 4.0,
            p_threshold: 1.3,
            fc_threshold: 1.0,
        }
    }
}

impl VolcanoParams {
    pub fn classify(&self, log2_fc: f64, neg_log10_p: f64) -> Regulation {
        if neg_log10_p > self.p_threshold && log2_fc > self.fc_threshold {
            Regulation::Up
        } else if neg_log10_p > self.p_threshold && log2_fc < -self.fc_threshold {
            Regulation::Down
        } else {
            Regulation::NotSignificant
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolcanoPoint {
    pub gene: String,
    pub log2_fc: f64,
    pub neg_log10_p: f64,
    pub regulation: Regulation,
}

impl VolcanoPoint {
    pub fn marker_size(&self) -> f64 {
        5.0 + 2.0 * self.log2_fc.abs()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolcanoData {
    pub comparison: String,
    pub params: VolcanoParams,
    pub points: Vec<VolcanoPoint>,
}

/// -log10 p range: larger fold changes get stronger significance
fn p_range(abs_fc: f64) -> (f64, f64) {
    if abs_fc > 2.0 {
        (3.0, 6.0)
    } else if abs_fc > 1.0 {
        (1.0, 4.0)
    } else {
        (0.0, 3.0)
    }
}

impl VolcanoData {
    pub fn generate(comparison: &str, params: &VolcanoParams, seeder: &Seeder) -> Self {
        let points: Vec<VolcanoPoint> = (1..=params.points)
            .map(|n| {
                let gene = bulk_gene_name(n);
                let mut rng = seeder.for_parts(&["volcano", comparison, gene.as_str()]);
                let log2_fc = rng.uniform(-params.max_fold_change, params.max_fold_change);
                let (lo, hi) = p_range(log2_fc.abs());
                let neg_log10_p = rng.uniform(lo, hi);
                VolcanoPoint {
                    regulation: params.classify(log2_fc, neg_log10_p),
                    gene,
                    log2_fc,
                    neg_log10_p,
                }
            })
            .collect();

        debug!("Generated {} volcano points for {}", points.len(), comparison);

        Self {
            comparison: comparison.to_string(),
            params: params.clone(),
            points,
        }
    }

    pub fn count(&self, regulation: Regulation) -> usize {
        self.points.iter().filter(|p| p.regulation == regulation).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_rules() {
        let params = VolcanoParams::default();
        assert_eq!(params.classify(1.5, 2.0), Regulation::Up);
        assert_eq!(params.classify(-1.5, 2.0), Regulation::Down);
        assert_eq!(params.classify(1.5, 1.3), Regulation::NotSignificant);
        assert_eq!(params.classify(0.5, 5.0), Regulation::NotSignificant);
    }

    #[test]
    fn test_points_follow_fold_change_bands() {
        let data = VolcanoData::generate(DEFAULT_COMPARISON, &VolcanoParams::default(), &Seeder::default());
        assert_eq!(data.points.len(), 1000);
        assert_eq!(data.points[0].gene, "Gene_1");
        for p in &data.points {
            assert!((-4.0..4.0).contains(&p.log2_fc));
            let (lo, hi) = p_range(p.log2_fc.abs());
            assert!(p.neg_log10_p >= lo && p.neg_log10_p <= hi);
            // strong changes are always significant
            if p.log2_fc.abs() > 2.0 {
                assert_ne!(p.regulation, Regulation::NotSignificant);
            }
        }
        assert_eq!(
            data.count(Regulation::Up) + data.count(Regulation::Down) + data.count(Regulation::NotSignificant),
            1000
        );
    }

    #[test]
    fn test_marker_size() {
        let p = VolcanoPoint {
            gene: "g".into(),
            log2_fc: -2.5,
            neg_log10_p: 4.0,
            regulation: Regulation::Down,
        };
        assert_eq!(p.marker_size(), 10.0);
    }
}
