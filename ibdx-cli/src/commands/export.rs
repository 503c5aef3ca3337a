//! Export command: JSON snapshots of every session table

use anyhow::{Context, Result};
use ibdx_core::volcano::DEFAULT_COMPARISON;
use ibdx_core::{ExpressionProfile, Session};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::container::Container;
use crate::error::CliError;

fn to_json<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value).with_context(|| format!("Failed to serialize {}", what))
}

pub fn execute(session: &Session, dir: &Path) -> Result<Vec<PathBuf>> {
    log::info!("Exporting session snapshots to {}", dir.display());

    let profiles: Vec<&ExpressionProfile> = session.expression().profiles().collect();
    let snapshots = vec![
        ("config.json", to_json(session.config(), "generator config")?),
        ("schema.json", to_json(session.schema(), "context schema")?),
        ("expression.json", to_json(&profiles, "expression table")?),
        ("pathways.json", to_json(session.pathways(), "pathway table")?),
        ("targets.json", to_json(session.targets().all(), "target table")?),
        ("similarity.json", to_json(session.similarity(), "similarity matrix")?),
        ("comparison.json", to_json(session.comparison(), "model comparison")?),
        ("pca.json", to_json(session.pca(), "PCA data")?),
        ("volcano.json", to_json(&session.volcano(DEFAULT_COMPARISON), "volcano data")?),
    ];

    let mut written = Vec::with_capacity(snapshots.len());
    for (file, json) in snapshots {
        let container = Container::new(dir.join(file));
        match container.replace(&json) {
            Ok(()) => {
                log::debug!("Wrote {} ({} bytes)", container.path().display(), json.len());
                written.push(container.path().to_path_buf());
            }
            Err(CliError::EmptyContainer { path }) => {
                log::error!("Export directory missing, nothing written: {}", path.display());
                return Ok(written);
            }
            Err(e) => return Err(e.into()),
        }
    }
    log::info!("Exported {} snapshots", written.len());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ibdx_core::{ExpressionParams, GeneratorConfig};

    fn small_session() -> Session {
        Session::new(GeneratorConfig {
            expression: ExpressionParams {
                synthetic_genes: 5,
                ..Default::default()
            },
            ..Default::default()
        })
    }

    #[test]
    fn test_export_writes_all_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let written = execute(&small_session(), dir.path()).unwrap();
        assert_eq!(written.len(), 9);

        let targets: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("targets.json")).unwrap()).unwrap();
        assert_eq!(targets.as_array().map(|a| a.len()), Some(22));
        assert_eq!(targets[0]["name"], "TNF");

        let similarity = std::fs::read_to_string(dir.path().join("similarity.json")).unwrap();
        assert!(similarity.contains("IL-10KO"));
    }

    #[test]
    fn test_export_to_missing_directory_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let written = execute(&small_session(), &dir.path().join("absent")).unwrap();
        assert!(written.is_empty());
    }
}
