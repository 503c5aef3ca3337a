use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ibdx_core::{ContextSchema, ExpressionParams, ExpressionTable, GeneratorConfig, SeedStrategy, Seeder, Session};

fn bench_expression_table(c: &mut Criterion) {
    let schema = ContextSchema::ibd();
    let params = ExpressionParams::default();

    for strategy in [SeedStrategy::Session, SeedStrategy::CharSum] {
        let seeder = Seeder::new(strategy, "bench");
        c.bench_function(&format!("expression_table_1000_{:?}", strategy), |b| {
            b.iter(|| {
                let table = ExpressionTable::build(black_box(&schema), &params, &seeder);
                black_box(table.len())
            })
        });
    }
}

fn bench_session(c: &mut Criterion) {
    c.bench_function("session_default", |b| {
        b.iter(|| {
            let session = Session::new(black_box(GeneratorConfig::default()));
            black_box(session.targets().ranked().len())
        })
    });
}

fn bench_lazy_lookup(c: &mut Criterion) {
    let mut session = Session::new(GeneratorConfig::default());
    let mut n = 0usize;
    c.bench_function("lazy_gene_lookup", |b| {
        b.iter(|| {
            n += 1;
            let name = format!("Unseen_{}", n);
            black_box(session.gene(&name).map(|p| p.levels.len()).ok())
        })
    });
}

criterion_group!(benches, bench_expression_table, bench_session, bench_lazy_lookup);
criterion_main!(benches);
