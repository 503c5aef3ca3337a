//! Chart commands: gene expression, pathways, comparison, correlation, volcano and PCA

use anyhow::{Context, Result};
use ibdx_core::pathway::display_name;
use ibdx_core::Session;
use ibdx_render::bar::{records_from_profile, render_comparison, render_expression, BarRecord};
use ibdx_render::heatmap::{render_heatmap, HeatmapData};
use ibdx_render::scatter::{render_pca, render_volcano};
use std::path::Path;

use crate::commands::{report_miss, single, status_document, submit, svg_document};
use crate::config::Config;
use crate::container::{Container, RenderReport, RenderRequest};
use crate::error::CliError;

/// One request per gene. A directory `out` gets one file per gene; a file
/// `out` receives every render in turn and keeps the last.
pub fn gene(
    config: &Config,
    session: &mut Session,
    names: &[String],
    model: Option<&str>,
    out: &Path,
) -> Result<RenderReport> {
    log::info!("Rendering expression for {} gene(s)", names.len());
    let style = config.render_style();
    let model_name = match model {
        Some(query) => Some(session.schema().resolve(query).map_err(CliError::from)?.name.clone()),
        None => None,
    };

    let mut requests = Vec::with_capacity(names.len());
    for name in names {
        let schema = session.schema().clone();
        let profile = session
            .gene(name)
            .map_err(CliError::from)
            .with_context(|| format!("Failed to look up gene {:?}", name))?;
        let gene = profile.gene.clone();
        let mut records: Vec<BarRecord> = records_from_profile(profile, &schema);
        if let Some(model_name) = &model_name {
            records.retain(|r| &r.model == model_name);
        }
        log::debug!("{}: {} bars ({:?})", gene, records.len(), profile.provenance);

        let document = svg_document(config, &format!("expression {}", gene), |surface| {
            render_expression(surface, &gene, &records, &style)
        });
        let container = if out.is_dir() {
            Container::new(out.join(format!("{}.svg", gene)))
        } else {
            Container::new(out)
        };
        requests.push(RenderRequest::new(gene, container, document));
    }
    submit(config, requests)
}

/// Pathway enrichment heatmap; `pathway` also prints one row of scores
pub fn pathways(
    config: &Config,
    session: &Session,
    pathway: Option<&str>,
    out: Option<&Path>,
) -> Result<RenderReport> {
    let table = session.pathways();

    if let Some(query) = pathway {
        match table.row(query) {
            Ok(row) => {
                println!("{}", display_name(query.trim()));
                for (model, score) in row {
                    let name = session.schema().get(&model).map(|m| m.name.clone()).unwrap_or(model);
                    println!("  {:<20} {:>6.2}", name, score);
                }
            }
            Err(err) => {
                let status = report_miss(err)?;
                if let Some(out) = out {
                    return single(config, "pathways", out, status_document(config, "pathways", &status));
                }
                return Ok(RenderReport::default());
            }
        }
    }

    match out {
        Some(out) => {
            let style = config.render_style();
            let data = HeatmapData::pathways(table, session.schema());
            let document = svg_document(config, "pathways", |surface| render_heatmap(surface, &data, &style));
            single(config, "pathways", out, document)
        }
        None => Ok(RenderReport::default()),
    }
}

/// Mouse-vs-human grouped bars, plus the closest mouse model per human type
pub fn compare(config: &Config, session: &Session, out: &Path) -> Result<RenderReport> {
    let comparison = session.comparison();
    for human in &comparison.human_types {
        if let Ok(best) = comparison.best_match(human) {
            let name = |id: &str| session.schema().get(id).map(|m| m.name.clone()).unwrap_or_else(|| id.to_string());
            log::info!(
                "Closest model to {}: {} (overall {:.2})",
                name(human),
                name(&best.mouse),
                best.metrics.overall
            );
        }
    }

    let style = config.render_style();
    let schema = session.schema().clone();
    let document = svg_document(config, "comparison", |surface| {
        render_comparison(surface, comparison, &schema, &style)
    });
    single(config, "comparison", out, document)
}

pub fn correlation(config: &Config, session: &Session, out: &Path) -> Result<RenderReport> {
    let style = config.render_style();
    let data = HeatmapData::similarity(session.similarity());
    let document = svg_document(config, "correlation", |surface| render_heatmap(surface, &data, &style));
    single(config, "correlation", out, document)
}

pub fn volcano(config: &Config, session: &Session, comparison: &str, out: &Path) -> Result<RenderReport> {
    if comparison.trim().is_empty() {
        return Err(CliError::invalid_argument("comparison name must not be empty").into());
    }
    let data = session.volcano(comparison.trim());
    log::info!(
        "Volcano {}: {} up, {} down",
        data.comparison,
        data.count(ibdx_core::Regulation::Up),
        data.count(ibdx_core::Regulation::Down)
    );
    let style = config.render_style();
    let document = svg_document(config, "volcano", |surface| render_volcano(surface, &data, &style));
    single(config, "volcano", out, document)
}

pub fn pca(config: &Config, session: &Session, out: &Path) -> Result<RenderReport> {
    let style = config.render_style();
    let document = svg_document(config, "pca", |surface| render_pca(surface, session.pca(), &style));
    single(config, "pca", out, document)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> Config {
        let mut config = Config::default();
        config.general.delay_ms = 0;
        config.render.footer = false;
        config.generator.synthetic_genes = 20;
        config.volcano.points = 30;
        config
    }

    #[test]
    fn test_gene_writes_curated_chart() {
        let config = quiet_config();
        let mut session = crate::commands::build_session(&config);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("tnf.svg");

        let report = gene(&config, &mut session, &["TNF".to_string()], None, &out).unwrap();
        assert_eq!(report.written, vec![out.clone()]);
        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.contains("Expression of TNF"));
        assert!(svg.contains("<title>IL-10KO - IL10KO: 55.0</title>"));
        assert!(svg.contains("chart=expression TNF"));
    }

    #[test]
    fn test_dashed_gene_name_keeps_comment_well_formed() {
        let mut config = quiet_config();
        config.general.seed = "a---b".to_string();
        let mut session = crate::commands::build_session(&config);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("dashed.svg");

        gene(&config, &mut session, &["IL---X".to_string()], None, &out).unwrap();
        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.contains("chart=expression IL- - -X"));
        for line in svg.lines().filter(|l| l.trim_start().starts_with("<!--")) {
            let inner = line.trim().trim_start_matches("<!--").trim_end_matches("-->");
            assert!(!inner.contains("--"), "{}", line);
        }
    }

    #[test]
    fn test_gene_into_directory_and_model_filter() {
        let config = quiet_config();
        let mut session = crate::commands::build_session(&config);
        let dir = tempfile::tempdir().unwrap();
        let names = vec!["TNF".to_string(), "Gene_9999".to_string()];

        let report = gene(&config, &mut session, &names, Some("il10ko"), dir.path()).unwrap();
        assert_eq!(report.written.len(), 2);
        let svg = std::fs::read_to_string(dir.path().join("TNF.svg")).unwrap();
        assert!(svg.contains("IL-10KO - WT: 15.0"));
        assert!(!svg.contains("Human CD"));
        assert!(dir.path().join("Gene_9999.svg").exists());
    }

    #[test]
    fn test_unknown_model_is_an_error() {
        let config = quiet_config();
        let mut session = crate::commands::build_session(&config);
        let dir = tempfile::tempdir().unwrap();
        let err = gene(&config, &mut session, &["TNF".to_string()], Some("zebrafish"), dir.path()).unwrap_err();
        assert!(err.to_string().contains("zebrafish"));
    }

    #[test]
    fn test_missing_output_directory_is_not_fatal() {
        let config = quiet_config();
        let session = crate::commands::build_session(&config);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("absent").join("pca.svg");
        let report = pca(&config, &session, &out).unwrap();
        assert!(report.written.is_empty());
        assert_eq!(report.skipped, vec![out]);
    }

    #[test]
    fn test_unknown_pathway_renders_status() {
        let config = quiet_config();
        let session = crate::commands::build_session(&config);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("pathways.svg");
        pathways(&config, &session, Some("wnt_signaling"), Some(&out)).unwrap();
        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.contains("Pathway wnt_signaling not found in dataset"));
    }

    #[test]
    fn test_remaining_charts_render() {
        let config = quiet_config();
        let session = crate::commands::build_session(&config);
        let dir = tempfile::tempdir().unwrap();

        pathways(&config, &session, None, Some(&dir.path().join("p.svg"))).unwrap();
        compare(&config, &session, &dir.path().join("c.svg")).unwrap();
        correlation(&config, &session, &dir.path().join("r.svg")).unwrap();
        volcano(&config, &session, "il10ko_IL10KO_vs_WT", &dir.path().join("v.svg")).unwrap();

        let read = |f: &str| std::fs::read_to_string(dir.path().join(f)).unwrap();
        assert!(read("p.svg").contains("Pathway Enrichment Across Models"));
        assert!(read("c.svg").contains("Mouse Model Similarity to Human IBD"));
        assert!(read("r.svg").contains("Gene Expression Correlation Between Models"));
        assert!(read("v.svg").contains("Volcano Plot: il10ko_IL10KO_vs_WT"));
        assert!(volcano(&config, &session, "  ", &dir.path().join("v.svg")).is_err());
    }
}
