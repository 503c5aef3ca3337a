//! Chart containers and the delayed render queue
//!
//! A container is an output file whose whole content is replaced on every
//! render. Replacement goes through a temp file in the same directory and a
//! rename, so readers never see a half-written chart and the last applied
//! render wins.

use anyhow::{anyhow, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::task::JoinSet;

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    path: PathBuf,
}

impl Container {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    /// The surface is present when its directory exists
    pub fn is_present(&self) -> bool {
        self.parent().is_dir()
    }

    /// Clear and rewrite the container atomically
    pub fn replace(&self, content: &str) -> CliResult<()> {
        if !self.is_present() {
            return Err(CliError::empty_container(self.path.clone()));
        }
        let mut tmp = NamedTempFile::new_in(self.parent())?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| CliError::io(e.to_string()))?;
        Ok(())
    }
}

/// A fully generated chart waiting for its render slot
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub label: String,
    pub container: Container,
    pub document: String,
}

impl RenderRequest {
    pub fn new<S: Into<String>>(label: S, container: Container, document: String) -> Self {
        Self {
            label: label.into(),
            container,
            document,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderReport {
    pub written: Vec<PathBuf>,
    /// Requests whose container was absent
    pub skipped: Vec<PathBuf>,
}

/// Apply every request after `delay` on a single-threaded runtime.
///
/// Requests are spawned in order and never cancelled. A missing container is
/// logged and skipped; any other failure aborts the run.
pub fn run_renders(requests: Vec<RenderRequest>, delay: Duration) -> Result<RenderReport> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    runtime.block_on(async move {
        let mut tasks = JoinSet::new();
        for (order, request) in requests.into_iter().enumerate() {
            tasks.spawn(async move {
                tokio::time::sleep(delay).await;
                let outcome = request.container.replace(&request.document);
                (order, request, outcome)
            });
        }

        let mut applied = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let (order, request, outcome) = joined.map_err(|e| anyhow!("render task failed: {}", e))?;
            applied.push((order, request, outcome));
        }
        // completion order of equal delays is not guaranteed
        applied.sort_by_key(|(order, _, _)| *order);

        let mut report = RenderReport::default();
        for (_, request, outcome) in applied {
            match outcome {
                Ok(()) => {
                    log::info!("Rendered {} to {}", request.label, request.container.path().display());
                    report.written.push(request.container.path().to_path_buf());
                }
                Err(CliError::EmptyContainer { path }) => {
                    log::error!("No container for {} at {}, skipping render", request.label, path.display());
                    report.skipped.push(path);
                }
                Err(e) => return Err(anyhow::Error::from(e)),
            }
        }
        Ok::<_, anyhow::Error>(report)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_overwrites_content() {
        let dir = tempfile::tempdir().unwrap();
        let container = Container::new(dir.path().join("chart.svg"));
        container.replace("<svg>first</svg>").unwrap();
        container.replace("<svg>second</svg>").unwrap();
        assert_eq!(std::fs::read_to_string(container.path()).unwrap(), "<svg>second</svg>");
        // no temp files left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_directory_is_empty_container() {
        let dir = tempfile::tempdir().unwrap();
        let container = Container::new(dir.path().join("missing").join("chart.svg"));
        assert!(!container.is_present());
        assert!(matches!(
            container.replace("x"),
            Err(CliError::EmptyContainer { .. })
        ));
    }

    #[test]
    fn test_run_renders_skips_absent_containers() {
        let dir = tempfile::tempdir().unwrap();
        let good = Container::new(dir.path().join("a.svg"));
        let bad = Container::new(dir.path().join("nope").join("b.svg"));
        let report = run_renders(
            vec![
                RenderRequest::new("a", good.clone(), "A".into()),
                RenderRequest::new("b", bad, "B".into()),
            ],
            Duration::from_millis(1),
        )
        .unwrap();
        assert_eq!(report.written, vec![good.path().to_path_buf()]);
        assert_eq!(report.skipped.len(), 1);
    }

    #[test]
    fn test_every_request_is_applied_to_shared_container() {
        let dir = tempfile::tempdir().unwrap();
        let shared = Container::new(dir.path().join("gene.svg"));
        let requests = ["TNF", "IL6", "IL10"]
            .iter()
            .map(|g| RenderRequest::new(*g, shared.clone(), format!("<svg>{}</svg>", g)))
            .collect();
        let report = run_renders(requests, Duration::from_millis(0)).unwrap();
        assert_eq!(report.written.len(), 3);
        let content = std::fs::read_to_string(shared.path()).unwrap();
        assert!(["<svg>TNF</svg>", "<svg>IL6</svg>", "<svg>IL10</svg>"].contains(&content.as_str()));
    }

    #[test]
    fn test_configured_delay_elapses_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let container = Container::new(dir.path().join("late.svg"));
        let delay = Duration::from_millis(80);
        let started = std::time::Instant::now();
        let report = run_renders(vec![RenderRequest::new("late", container.clone(), "L".into())], delay).unwrap();
        assert!(started.elapsed() >= delay, "wrote after {:?}", started.elapsed());
        assert_eq!(report.written, vec![container.path().to_path_buf()]);
    }
}
