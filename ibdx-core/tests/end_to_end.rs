use ibdx_core::{
    regulatory, ContextSchema, EntityKind, ExpressionParams, ExpressionProfile, GeneratorConfig, IbdxError,
    Provenance, SeedStrategy, Session,
};

fn config(strategy: SeedStrategy) -> GeneratorConfig {
    GeneratorConfig {
        strategy,
        expression: ExpressionParams {
            synthetic_genes: 100,
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn tnf_returns_curated_six_context_table() {
    let mut session = Session::new(config(SeedStrategy::Session));
    let tnf = session.gene("TNF").expect("TNF is curated");
    assert_eq!(tnf.provenance, Provenance::Curated);
    assert_eq!(tnf.levels.len(), 12);

    let expected = [
        ("cd45rb", 10.0, 45.0),
        ("acute_dss", 12.0, 60.0),
        ("chronic_dss", 11.0, 40.0),
        ("il10ko", 15.0, 55.0),
        ("human_uc", 18.0, 50.0),
        ("human_cd", 20.0, 65.0),
    ];
    for (model, base, disease) in expected {
        assert_eq!(tnf.pair(model), Some((base, disease)), "{}", model);
    }
}

#[test]
fn unseen_gene_is_generated_once_and_kept() {
    let mut session = Session::new(config(SeedStrategy::Session));
    assert!(session.peek_gene("Gene_9999").is_none());

    let first = session.gene("Gene_9999").unwrap().clone();
    assert_eq!(first.provenance, Provenance::Synthetic);
    assert_eq!(first.levels.len(), 12);

    let second = session.gene("Gene_9999").unwrap().clone();
    assert_eq!(first, second);
    assert!(session.peek_gene("Gene_9999").is_some());

    let bases: Vec<f64> = first.levels.iter().filter(|l| l.baseline).map(|l| l.value).collect();
    assert!(bases.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn charsum_strategy_gene_9999_base() {
    let mut session = Session::new(config(SeedStrategy::CharSum));
    let profile = session.gene("Gene_9999").unwrap();
    assert_eq!(profile.pair("il10ko").map(|(base, _)| base), Some(36.0));
}

#[test]
fn unknown_target_is_a_lookup_miss() {
    let session = Session::new(config(SeedStrategy::Session));
    match session.target("ZZZFAKE") {
        Err(IbdxError::LookupMiss { kind, name, .. }) => {
            assert_eq!(kind, EntityKind::Target);
            assert_eq!(name, "ZZZFAKE");
        }
        other => panic!("expected LookupMiss, got {:?}", other.map(|t| t.name.clone())),
    }
}

#[test]
fn same_seed_same_tables() {
    for strategy in [SeedStrategy::Session, SeedStrategy::CharSum] {
        let a = Session::new(config(strategy));
        let b = Session::new(config(strategy));
        let pa: Vec<_> = a.expression().profiles().cloned().collect();
        let pb: Vec<_> = b.expression().profiles().cloned().collect();
        assert_eq!(pa, pb);
        assert_eq!(a.similarity(), b.similarity());
        assert_eq!(a.comparison(), b.comparison());
        assert_eq!(a.pca(), b.pca());
        assert_eq!(a.targets().all(), b.targets().all());
    }
}

#[test]
fn different_session_seeds_differ() {
    let a = Session::new(config(SeedStrategy::Session));
    let b = Session::new(GeneratorConfig {
        session_seed: "another-seed".into(),
        ..config(SeedStrategy::Session)
    });
    assert_ne!(a.peek_gene("Gene_1"), b.peek_gene("Gene_1"));
    // curated values ignore the seed
    assert_eq!(a.peek_gene("IL6"), b.peek_gene("IL6"));
}

#[test]
fn curated_precedence_survives_lookup_order() {
    let mut session = Session::new(config(SeedStrategy::Session));
    for name in ["Gene_5000", "zzz", "stat3", "NFKB1"] {
        session.gene(name).unwrap();
    }
    let stat3 = session.gene("STAT3").unwrap();
    assert_eq!(stat3.provenance, Provenance::Curated);
    assert_eq!(stat3.pair("il10ko"), Some((40.0, 85.0)));
    assert_eq!(session.peek_gene("nfkb1").unwrap().provenance, Provenance::Curated);
}

#[test]
fn il10_knockout_keeps_curated_zero() {
    let session = Session::new(config(SeedStrategy::Session));
    assert_eq!(session.peek_gene("IL10").unwrap().value("il10ko", "IL10KO"), Some(0.0));
}

#[test]
fn model_resolution_by_display_name() {
    let schema = ContextSchema::ibd();
    let model = schema.resolve("CD45RBHigh T cell").unwrap();
    assert_eq!(model.id, "cd45rb");
    assert!(matches!(schema.resolve(""), Err(IbdxError::UnknownModel(_))));
}

#[test]
fn curated_profile_survives_json_snapshot() {
    let mut session = Session::new(config(SeedStrategy::Session));
    let tnf = session.gene("TNF").unwrap().clone();
    let json = serde_json::to_string(&tnf).unwrap();
    let back: ExpressionProfile = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tnf);
    assert!(json.contains("\"provenance\":\"curated\""));
}

#[test]
fn regulatory_network_serializes_as_rules() {
    let json = serde_json::to_value(regulatory::NETWORK).unwrap();
    let rules = json.as_array().unwrap();
    assert_eq!(rules.len(), 20);
    assert_eq!(rules[0]["regulator"], "NFKB1");
    assert_eq!(rules[0]["represses"], serde_json::json!(["IL10", "FOXP3"]));

    let mut session = Session::new(config(SeedStrategy::Session));
    for gene in regulatory::network_genes() {
        assert!(session.peek_gene(gene).is_some(), "{} missing from expression table", gene);
    }
    assert!(session.gene("NFKBIA").is_ok());
}
