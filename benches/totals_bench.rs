use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use comprobante::core::*;

fn build_lines(n: u32) -> Vec<InvoiceLine> {
    (1..=n)
        .map(|i| {
            let category = match i % 4 {
                0 => TaxCategory::Exempt,
                1 | 2 => TaxCategory::Taxed,
                _ => TaxCategory::Unaffected,
            };
            LineBuilder::new(i, format!("ITEM {i}"), dec!(2), dec!(9.99))
                .tax_category(category)
                .build()
        })
        .collect()
}

fn bench_compute_line(c: &mut Criterion) {
    c.bench_function("compute_line taxed", |b| {
        b.iter(|| {
            compute_line(
                black_box(dec!(2)),
                black_box(dec!(100.00)),
                TaxCategory::Taxed,
                IgvRate::default(),
            )
        })
    });
}

fn bench_aggregate_10_lines(c: &mut Criterion) {
    let lines = build_lines(10);
    c.bench_function("aggregate 10 lines", |b| {
        b.iter(|| aggregate(black_box(&lines), IgvRate::default()))
    });
}

fn bench_aggregate_1000_lines(c: &mut Criterion) {
    let lines = build_lines(1000);
    c.bench_function("aggregate 1000 lines", |b| {
        b.iter(|| aggregate(black_box(&lines), IgvRate::default()))
    });
}

criterion_group!(
    benches,
    bench_compute_line,
    bench_aggregate_10_lines,
    bench_aggregate_1000_lines
);
criterion_main!(benches);
