//! Curated gene tables, the IBD gene catalogue, and gene search

use crate::regulatory;

/// Hand-authored expression for one gene: `(model id, baseline, disease)`
#[derive(Debug, Clone, Copy)]
pub struct CuratedGene {
    pub name: &'static str,
    pub levels: &'static [(&'static str, f64, f64)],
}

impl CuratedGene {
    pub fn level(&self, model: &str, is_baseline: bool) -> Option<f64> {
        self.levels
            .iter()
            .find(|(id, _, _)| *id == model)
            .map(|(_, base, disease)| if is_baseline { *base } else { *disease })
    }
}

macro_rules! curated {
    ($name:literal: $($model:literal => $base:literal / $disease:literal),+ $(,)?) => {
        CuratedGene {
            name: $name,
            levels: &[$(($model, $base as f64, $disease as f64)),+],
        }
    };
}

pub const CURATED_GENES: &[CuratedGene] = &[
    curated!("TNF": "cd45rb" => 10/45, "acute_dss" => 12/60, "chronic_dss" => 11/40,
        "il10ko" => 15/55, "human_uc" => 18/50, "human_cd" => 20/65),
    curated!("IL1B": "cd45rb" => 15/70, "acute_dss" => 18/90, "chronic_dss" => 16/65,
        "il10ko" => 20/75, "human_uc" => 25/80, "human_cd" => 22/85),
    curated!("IL6": "cd45rb" => 8/55, "acute_dss" => 10/75, "chronic_dss" => 9/50,
        "il10ko" => 12/60, "human_uc" => 15/65, "human_cd" => 14/70),
    curated!("IL10": "cd45rb" => 25/10, "acute_dss" => 28/12, "chronic_dss" => 26/15,
        "il10ko" => 30/0, "human_uc" => 35/18, "human_cd" => 32/14),
    curated!("IL17A": "cd45rb" => 5/35, "acute_dss" => 6/25, "chronic_dss" => 5/30,
        "il10ko" => 7/40, "human_uc" => 8/30, "human_cd" => 7/45),
    curated!("FOXP3": "cd45rb" => 20/8, "acute_dss" => 22/10, "chronic_dss" => 21/12,
        "il10ko" => 25/15, "human_uc" => 28/14, "human_cd" => 26/10),
    curated!("IFNG": "cd45rb" => 12/50, "acute_dss" => 14/40, "chronic_dss" => 13/45,
        "il10ko" => 16/55, "human_uc" => 18/45, "human_cd" => 17/60),
    curated!("TLR4": "cd45rb" => 30/60, "acute_dss" => 32/70, "chronic_dss" => 31/65,
        "il10ko" => 35/75, "human_uc" => 38/70, "human_cd" => 36/80),
    curated!("MUC2": "cd45rb" => 100/40, "acute_dss" => 110/30, "chronic_dss" => 105/35,
        "il10ko" => 120/50, "human_uc" => 130/25, "human_cd" => 125/45),
    curated!("CLDN1": "cd45rb" => 80/30, "acute_dss" => 85/25, "chronic_dss" => 82/28,
        "il10ko" => 90/35, "human_uc" => 95/20, "human_cd" => 92/30),
    // knockout view
    curated!("NFKB1": "cd45rb" => 25/60, "acute_dss" => 28/70, "chronic_dss" => 26/65,
        "il10ko" => 30/75, "human_uc" => 32/68, "human_cd" => 30/72),
    curated!("RELA": "cd45rb" => 30/65, "acute_dss" => 32/75, "chronic_dss" => 31/70,
        "il10ko" => 35/80, "human_uc" => 38/72, "human_cd" => 36/78),
    curated!("STAT3": "cd45rb" => 35/70, "acute_dss" => 38/65, "chronic_dss" => 36/68,
        "il10ko" => 40/85, "human_uc" => 42/75, "human_cd" => 40/80),
];

pub fn curated_gene(name: &str) -> Option<&'static CuratedGene> {
    CURATED_GENES.iter().find(|g| g.name == name)
}

/// IBD-related genes grouped by functional category
pub const GENE_CATEGORIES: &[(&str, &[&str])] = &[
    ("Cytokines and receptors", &[
        "IL2", "IL4", "IL5", "IL12A", "IL12B", "IL13", "IL18", "IL21", "IL22", "IL23A",
        "IL23R", "IL27", "TGFB1", "TGFBR1", "TGFBR2", "TNFRSF1A", "TNFRSF1B", "TNFSF13B",
    ]),
    ("Chemokines and receptors", &[
        "CCL2", "CCL3", "CCL4", "CCL5", "CCL11", "CCL17", "CCL20", "CCL22", "CCL25", "CCR1",
        "CCR2", "CCR5", "CCR6", "CCR7", "CCR9", "CXCL1", "CXCL2", "CXCL8", "CXCL10", "CXCR3",
    ]),
    ("Transcription factors", &[
        "NFKB1", "RELA", "STAT1", "STAT3", "STAT4", "STAT6", "TBX21", "RORC", "GATA3",
    ]),
    ("Pattern recognition receptors", &[
        "TLR1", "TLR2", "TLR3", "TLR5", "TLR6", "TLR7", "TLR8", "TLR9", "NOD1", "NOD2", "NLRP3",
    ]),
    ("Adhesion molecules", &[
        "ICAM1", "VCAM1", "MADCAM1", "ITGA4", "ITGB7", "ITGAE", "SELP", "SELE",
    ]),
    ("Barrier function", &[
        "OCLN", "TJP1", "CLDN2", "CLDN3", "CLDN4", "MUC1", "MUC3A", "MUC4", "MUC5AC", "MUC13",
    ]),
    ("Antimicrobial peptides", &[
        "DEFB1", "DEFB4A", "REG3A", "REG3G", "LCN2", "LYZ", "S100A8", "S100A9",
    ]),
    ("Inflammasome and signaling", &[
        "CASP1", "PYCARD", "IL1A", "IL1R1", "IL1RN", "MYD88", "TRAF6", "IRAK4", "MAPK1",
        "MAPK3", "MAPK8", "MAPK14", "JAK1", "JAK2", "JAK3", "TYK2",
    ]),
    ("Autophagy", &["ATG16L1", "IRGM", "LRRK2", "XBP1"]),
    ("Metabolism", &["HIF1A", "PPARG", "PPARA", "IDO1", "ARG1", "NOS2"]),
    ("Apoptosis", &["BCL2", "BAX", "CASP3", "CASP8", "FAS", "FASLG"]),
    ("Extracellular matrix", &[
        "MMP2", "MMP9", "MMP13", "TIMP1", "TIMP2", "COL1A1", "COL3A1", "FN1",
    ]),
    ("Growth factors", &["EGF", "EGFR", "VEGFA", "VEGFR2", "IGF1", "IGF1R"]),
    ("Immune cell markers", &[
        "CD3E", "CD4", "CD8A", "CD19", "CD14", "CD68", "CD11B", "CD11C", "ITGAX", "CD20", "MS4A1",
    ]),
    ("Other", &["PDE4", "S1PR1", "CARD9", "PTPN22", "IL10RA", "IL10RB", "TNFSF15"]),
];

/// Catalogue genes in declaration order, then regulatory network genes not
/// listed in any category. Curated genes are skipped.
pub fn catalogue_genes() -> impl Iterator<Item = &'static str> {
    let network = regulatory::network_genes()
        .into_iter()
        .filter(|g| category_of(g).is_none());
    GENE_CATEGORIES
        .iter()
        .flat_map(|(_, genes)| genes.iter().copied())
        .chain(network)
        .filter(|g| curated_gene(g).is_none())
}

pub fn category_of(gene: &str) -> Option<&'static str> {
    GENE_CATEGORIES
        .iter()
        .find(|(_, genes)| genes.contains(&gene))
        .map(|(category, _)| *category)
}

/// Name of the n-th bulk gene (1-based)
pub fn bulk_gene_name(n: usize) -> String {
    format!("Gene_{}", n)
}

const DESCRIPTIONS: &[(&str, &str)] = &[
    ("TNF", "Tumor Necrosis Factor Alpha (TNF-α) is a pro-inflammatory cytokine involved in systemic inflammation and acute phase reaction. It plays a key role in IBD pathogenesis and is a major therapeutic target."),
    ("IL1B", "Interleukin 1 Beta (IL-1β) is a pro-inflammatory cytokine that mediates inflammatory responses and is involved in cell proliferation, differentiation, and apoptosis."),
    ("IL6", "Interleukin 6 (IL-6) is a pro-inflammatory cytokine that plays a role in inflammation and B cell maturation. It is elevated in IBD and correlates with disease activity."),
    ("IL10", "Interleukin 10 (IL-10) is an anti-inflammatory cytokine that inhibits the production of pro-inflammatory cytokines. Defects in IL-10 signaling are associated with early-onset IBD."),
    ("IL17A", "Interleukin 17A (IL-17A) is a pro-inflammatory cytokine produced by Th17 cells that stimulates the production of other inflammatory mediators."),
    ("FOXP3", "Forkhead Box P3 (FOXP3) is a transcription factor essential for the development and function of regulatory T cells, which suppress excessive immune responses."),
    ("IFNG", "Interferon Gamma (IFN-γ) is a cytokine that is critical for innate and adaptive immunity against viral and bacterial infections and for tumor control."),
    ("TLR4", "Toll-like Receptor 4 (TLR4) recognizes lipopolysaccharide (LPS) from Gram-negative bacteria and plays a key role in pathogen recognition and activation of innate immunity."),
    ("MUC2", "Mucin 2 (MUC2) is the major component of intestinal mucus, which forms a protective barrier between the epithelium and the gut microbiota."),
    ("CLDN1", "Claudin 1 (CLDN1) is a tight junction protein that regulates paracellular permeability and epithelial barrier function in the intestine."),
];

pub fn description(gene: &str) -> String {
    DESCRIPTIONS
        .iter()
        .find(|(name, _)| *name == gene)
        .map(|(_, text)| text.to_string())
        .unwrap_or_else(|| {
            format!(
                "{} is involved in inflammatory bowel disease pathways. Expression data is available across multiple mouse models and human IBD samples.",
                gene
            )
        })
}

pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Case-insensitive substring search. Results are sorted and truncated to `limit`.
pub fn search<'a, I>(names: I, term: &str, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = term.trim().to_uppercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let mut hits: Vec<String> = names
        .into_iter()
        .filter(|name| name.to_uppercase().contains(&needle))
        .map(str::to_string)
        .collect();
    hits.sort();
    hits.dedup();
    hits.truncate(limit);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curated_tnf_levels() {
        let tnf = curated_gene("TNF").unwrap();
        assert_eq!(tnf.level("il10ko", true), Some(15.0));
        assert_eq!(tnf.level("il10ko", false), Some(55.0));
        assert_eq!(tnf.level("rat", true), None);
        assert!(curated_gene("tnf").is_none());
    }

    #[test]
    fn test_every_curated_gene_covers_all_models() {
        for gene in CURATED_GENES {
            assert_eq!(gene.levels.len(), 6, "{}", gene.name);
        }
    }

    #[test]
    fn test_catalogue_skips_curated() {
        let genes: Vec<&str> = catalogue_genes().collect();
        assert!(genes.contains(&"IL23A"));
        assert!(!genes.contains(&"NFKB1"));
        assert!(!genes.contains(&"STAT3"));
        assert_eq!(category_of("NOD2"), Some("Pattern recognition receptors"));
    }

    #[test]
    fn test_catalogue_includes_network_targets_once() {
        let genes: Vec<&str> = catalogue_genes().collect();
        for gene in regulatory::network_genes() {
            if curated_gene(gene).is_none() {
                assert_eq!(genes.iter().filter(|g| **g == gene).count(), 1, "{}", gene);
            }
        }
        assert!(genes.contains(&"SOCS3"));
        assert!(genes.contains(&"NFKBIA"));
    }

    #[test]
    fn test_descriptions() {
        assert!(description("TNF").starts_with("Tumor Necrosis Factor Alpha"));
        assert!(description("Gene_5").starts_with("Gene_5 is involved in inflammatory bowel disease"));
    }

    #[test]
    fn test_search_is_sorted_and_limited() {
        let names = ["IL6", "IL10", "IL1B", "TNF", "IL17A"];
        assert_eq!(search(names, "il1", 10), vec!["IL10", "IL17A", "IL1B"]);
        assert_eq!(search(names, "IL", 2), vec!["IL10", "IL17A"]);
        assert!(search(names, "  ", 10).is_empty());
        assert!(search(names, "zzz", 10).is_empty());
    }
}
