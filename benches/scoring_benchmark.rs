//! Benchmarks for the scoring engine.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use multisource::model::{Cell, PartRow, PartsTable, VendorCatalog};
use multisource::parsers::{normalize, read_parts_str, DEFAULT_DELIMITER};
use multisource::scoring::{annotate_winners, RawParameters, ScoringEngine};
use std::hint::black_box;

const VENDORS: [&str; 3] = ["Encompass", "Marcone", "Reliable"];

fn parts_table(rows: usize) -> PartsTable {
    let rows = (0..rows)
        .map(|i| {
            let mut row = PartRow::new()
                .with("Part Number", format!("P{i:05}").as_str())
                .with("Title", format!("Part {i}").as_str())
                .with("Installs", ((i * 37) % 500).to_string().as_str());
            for (offset, vendor) in VENDORS.iter().enumerate() {
                let price = 5.0 + ((i * 13 + offset * 7) % 300) as f64 / 4.0;
                row.insert(*vendor, Cell::Number(price));
            }
            row
        })
        .collect();
    let mut headers: Vec<String> = ["Part Number", "Title", "Installs"]
        .map(String::from)
        .to_vec();
    headers.extend(VENDORS.map(String::from));
    PartsTable::new(headers, rows)
}

fn upload_text(rows: usize) -> String {
    let mut text = String::from("Part Number;Title;Installs;Encompass;Marcone;Reliable\n");
    for i in 0..rows {
        text.push_str(&format!(
            "P{i:05};Part {i};{};${}.50;$1,{:03}.00;${}.99\n",
            i % 500,
            i % 90 + 10,
            i % 1000,
            i % 70 + 5
        ));
    }
    text
}

fn benchmark_score(c: &mut Criterion) {
    let table = parts_table(5_000);
    let engine = ScoringEngine::new(VendorCatalog::builtin(), VENDORS);

    let mut group = c.benchmark_group("score");
    for orders in [20usize, 500, 2_000] {
        let params = engine
            .prepare(&table, &RawParameters::suggested().orders(orders))
            .expect("benchmark parameters are valid");
        group.bench_with_input(BenchmarkId::from_parameter(orders), &params, |b, params| {
            b.iter(|| {
                let outcome = engine.score(black_box(&table), params).expect("scores");
                black_box(annotate_winners(&outcome.scored));
            });
        });
    }
    group.finish();
}

fn benchmark_normalize(c: &mut Criterion) {
    let text = upload_text(5_000);
    c.bench_function("read_and_normalize_5000", |b| {
        b.iter(|| {
            let table = read_parts_str(black_box(&text), DEFAULT_DELIMITER).expect("reads");
            black_box(normalize(table, &VENDORS).expect("normalizes"));
        });
    });
}

criterion_group!(benches, benchmark_score, benchmark_normalize);
criterion_main!(benches);
