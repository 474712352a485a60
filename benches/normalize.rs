//! Benchmarks for record normalization.
//!
//! Run with: cargo bench --bench normalize

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use mdrm_catalog::config::ColumnSpec;
use mdrm_catalog::normalizer::{Normalizer, decode_text, parse_date};
use mdrm_catalog::source::read_source;
use std::fmt::Write as _;
use std::fs;
use tempfile::TempDir;

const HEADER: &str = "Mnemonic,Item Code,Start Date,End Date,Item Name,Confidentiality,ItemType,Reporting Form,Description,SeriesGlossary,";

/// Export with `rows` synthetic items in the published layout
fn write_export(dir: &TempDir, rows: usize) -> std::path::PathBuf {
    let mut content = format!("PUBLIC\n{}\n", HEADER);
    for i in 0..rows {
        let _ = writeln!(
            content,
            "RCON,{:04},1/1/1976 12:00:00 AM,12/31/9999 12:00:00 AM,ITEM {},N,F,FFIEC 031,\"Line one&#x0D;Line two &amp; more\",,",
            i % 10_000,
            i
        );
    }

    let path = dir.path().join(format!("mdrm_{}.csv", rows));
    fs::write(&path, content).unwrap();
    path
}

fn bench_normalize_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_all");
    let temp_dir = TempDir::new().unwrap();

    for rows in [1_000, 10_000, 50_000] {
        let table = read_source(&write_export(&temp_dir, rows), 1).unwrap();
        let normalizer = Normalizer::for_table(&ColumnSpec::default(), &table);

        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, _| {
            b.iter(|| {
                let (normalized, _) = normalizer.normalize_all(black_box(&table));
                black_box(normalized.len())
            });
        });
    }

    group.finish();
}

fn bench_field_transforms(c: &mut Criterion) {
    c.bench_function("parse_date_datetime", |b| {
        b.iter(|| parse_date(black_box("12/31/9999 12:00:00 AM")))
    });
    c.bench_function("parse_date_date_only", |b| {
        b.iter(|| parse_date(black_box("2024-06-01")))
    });
    c.bench_function("decode_text", |b| {
        b.iter(|| decode_text(black_box("Total assets&#x0D;Includes cash &amp; securities")))
    });
}

criterion_group!(benches, bench_normalize_all, bench_field_transforms);
criterion_main!(benches);
