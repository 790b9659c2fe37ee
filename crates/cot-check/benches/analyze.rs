use cot_check::ConsistencyAnalyzer;
use cot_core::StepSequence;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_analyze(c: &mut Criterion) {
    let analyzer = ConsistencyAnalyzer::default();
    let sequence: StepSequence = (1..=50)
        .map(|i| (format!("({} + 7) * 3 - {}", i, i), (i as f64 + 7.0) * 3.0 - i as f64))
        .collect();

    c.bench_function("analyze_50_steps", |b| {
        b.iter(|| analyzer.analyze(black_box(&sequence)))
    });

    c.bench_function("evaluate_nested", |b| {
        b.iter(|| cot_eval::evaluate(black_box("((23 + 7) * (15 - 8)) / (2.5e1 - -3)")))
    });
}

criterion_group!(benches, bench_analyze);
criterion_main!(benches);
