//! Targets command: ranking table or single-target validation scores

use anyhow::Result;
use ibdx_core::{Session, TargetScore};
use ibdx_render::table::{render_target_detail, render_target_table, table_rows};
use std::path::Path;

use crate::commands::{report_miss, single, status_document, svg_document};
use crate::config::Config;
use crate::container::RenderReport;

fn print_ranking(ranked: &[&TargetScore]) {
    println!(
        "{:<5} {:<8} {:>6} {:>8} {:>13} {:>13} {:>8}  Therapy",
        "Rank", "Target", "DE", "Pathway", "Conservation", "Druggability", "Overall"
    );
    for row in table_rows(ranked) {
        println!(
            "{:<5} {:<8} {:>6} {:>8} {:>13} {:>13} {:>8}  {}",
            row[0], row[1], row[2], row[3], row[4], row[5], row[6], row[7]
        );
    }
}

fn print_detail(target: &TargetScore) {
    println!("{} ({:?})", target.name, target.provenance);
    for (name, score) in target.sub_scores() {
        println!("  {:<24} {:.2}", name, score);
    }
    println!("  {:<24} {:.2}", "Overall", target.overall());
    if let Some(therapy) = &target.therapy {
        println!("  Therapy: {}", therapy);
    }
}

pub fn execute(config: &Config, session: &Session, name: Option<&str>, out: Option<&Path>) -> Result<RenderReport> {
    let style = config.render_style();

    let document = match name {
        None => {
            let ranked = session.targets().ranked();
            print_ranking(&ranked);
            svg_document(config, "targets", |surface| render_target_table(surface, &ranked, &style))
        }
        Some(query) => match session.target(query) {
            Ok(target) => {
                print_detail(target);
                svg_document(config, "targets", |surface| render_target_detail(surface, target, &style))
            }
            // not fatal: the status replaces the chart
            Err(err) => {
                let status = report_miss(err)?;
                status_document(config, "targets", &status)
            }
        },
    };

    match out {
        Some(out) => single(config, "targets", out, document),
        None => Ok(RenderReport::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> Config {
        let mut config = Config::default();
        config.general.delay_ms = 0;
        config.render.footer = false;
        config.generator.synthetic_genes = 10;
        config
    }

    #[test]
    fn test_ranking_table_written() {
        let config = quiet_config();
        let session = crate::commands::build_session(&config);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("targets.svg");
        execute(&config, &session, None, Some(&out)).unwrap();
        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.contains("Therapeutic Target Ranking"));
        assert!(svg.contains("infliximab, adalimumab"));
    }

    #[test]
    fn test_unknown_target_is_not_fatal() {
        let config = quiet_config();
        let session = crate::commands::build_session(&config);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("target.svg");
        let report = execute(&config, &session, Some("ZZZFAKE"), Some(&out)).unwrap();
        assert_eq!(report.written, vec![out.clone()]);
        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.contains("Target ZZZFAKE not found in dataset"));
    }

    #[test]
    fn test_empty_target_name_is_an_error() {
        let config = quiet_config();
        let session = crate::commands::build_session(&config);
        assert!(execute(&config, &session, Some("  "), None).is_err());
    }
}
