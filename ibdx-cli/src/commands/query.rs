//! Text queries: gene search and gene information

use anyhow::Result;
use ibdx_core::regulatory::{self, Effect};
use ibdx_core::Session;

use crate::error::CliError;

pub fn search(session: &Session, term: &str) -> Result<Vec<String>> {
    if term.trim().is_empty() {
        return Err(CliError::invalid_argument("search term must not be empty").into());
    }
    let hits = session.search_genes(term);
    if hits.is_empty() {
        log::warn!("No genes match {:?}", term.trim());
        eprintln!("No genes match '{}'", term.trim());
    }
    for hit in &hits {
        println!("{}", hit);
    }
    Ok(hits)
}

/// Description followed by the per-context expression table
pub fn info(session: &mut Session, name: &str) -> Result<String> {
    let description = session.gene_description(name);
    let schema = session.schema().clone();
    let profile = session.gene(name).map_err(CliError::from)?;

    let mut text = format!("{}\n\n{}\n", profile.gene, description);
    for model in schema.models() {
        if let Some((base, disease)) = profile.pair(&model.id) {
            text.push_str(&format!(
                "  {:<20} {:<12} {:>8.1}   {:<12} {:>8.1}\n",
                model.name, model.baseline, base, model.disease, disease
            ));
        }
    }
    print!("{}", text);
    Ok(text)
}

fn join_or_none(genes: &[&str]) -> String {
    if genes.is_empty() {
        "(none)".to_string()
    } else {
        genes.join(", ")
    }
}

/// Regulatory rules of a gene: what it controls, and what controls it
pub fn network(name: &str) -> Result<String> {
    let upstream = regulatory::regulated_by(name);
    let rule = match regulatory::rule(name) {
        Ok(rule) => Some(rule),
        // plain network targets have no outgoing rules
        Err(e) if e.is_lookup_miss() && !upstream.is_empty() => None,
        Err(e) => return Err(CliError::from(e).into()),
    };

    let gene = rule.map(|r| r.regulator.to_string()).unwrap_or_else(|| name.trim().to_uppercase());
    let mut text = format!("{}\n", gene);
    if let Some(rule) = rule {
        text.push_str(&format!("  activates: {}\n", join_or_none(rule.activates)));
        text.push_str(&format!("  represses: {}\n", join_or_none(rule.represses)));
    }
    let by = |effect: Effect| -> Vec<&'static str> {
        upstream
            .iter()
            .filter(|(_, e)| *e == effect)
            .map(|(r, _)| *r)
            .collect()
    };
    let activated_by = by(Effect::Activates);
    let repressed_by = by(Effect::Represses);
    text.push_str(&format!("  activated by: {}\n", join_or_none(&activated_by)));
    text.push_str(&format!("  repressed by: {}\n", join_or_none(&repressed_by)));

    print!("{}", text);
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ibdx_core::{ExpressionParams, GeneratorConfig};

    fn session() -> Session {
        Session::new(GeneratorConfig {
            expression: ExpressionParams {
                synthetic_genes: 15,
                ..Default::default()
            },
            ..Default::default()
        })
    }

    #[test]
    fn test_search_is_case_insensitive_and_limited() {
        let session = session();
        let hits = search(&session, "il1b").unwrap();
        assert!(hits.contains(&"IL1B".to_string()));
        assert!(hits.len() <= 10);
        assert!(search(&session, " ").is_err());
    }

    #[test]
    fn test_info_curated_and_generic() {
        let mut session = session();
        let tnf = info(&mut session, "TNF").unwrap();
        assert!(tnf.contains("Tumor Necrosis Factor"));
        assert!(tnf.contains("55.0"));

        let other = info(&mut session, "Gene_3").unwrap();
        assert!(other.contains("Gene_3 is involved in inflammatory bowel disease pathways"));
    }

    #[test]
    fn test_network_for_regulator() {
        let text = network("stat3").unwrap();
        assert!(text.starts_with("STAT3\n"));
        assert!(text.contains("  represses: IL12, IFNG, TNF\n"));
        assert!(text.contains("  activated by: IL6, IL10, JAK1, JAK2\n"));
        assert!(text.contains("  repressed by: (none)\n"));
    }

    #[test]
    fn test_network_for_plain_target() {
        let text = network("SOCS3").unwrap();
        assert!(!text.contains("activates:"));
        assert!(text.contains("  activated by: STAT3, IL6, IL10\n"));
    }

    #[test]
    fn test_network_unknown_gene_is_not_found() {
        let err = network("ZZZFAKE").unwrap_err();
        let cli_err = err.downcast_ref::<CliError>().unwrap();
        assert!(matches!(cli_err, CliError::NotFound { .. }));
        assert!(cli_err.to_string().starts_with("Regulator ZZZFAKE not found"));
    }
}
