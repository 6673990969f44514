//! Benchmarks for mapping loads and log resolution.
//!
//! Uses a generated mapping with many types and overloaded methods, and a synthetic
//! Unity log mixing exception frames, debug-log frames and plain messages:
//! - Mapping document parsing
//! - Single line resolution for each frame convention
//! - Whole-log resolution, sequential and on the rayon pool

extern crate symresolve;

use criterion::{criterion_group, criterion_main, Criterion};
use std::{fmt::Write, hint::black_box};
use symresolve::{resolve_text, resolver::resolve_line, MappingTable, ResolveOptions};

const TYPES: usize = 2_000;

fn mapping_document() -> String {
    let mut document = String::from("<mapping>\n  <assembly name=\"Assembly-CSharp\">\n");
    for i in 0..TYPES {
        let _ = writeln!(
            document,
            "    <type fullName=\"Game.Type{i}\" newFullName=\"$T{i}\">\n      \
             <method oldStackTraceSignature=\"Game.Type{i}:Run(int)\" newStackTraceSignature=\"$T{i}:$r(int)\" />\n      \
             <method oldStackTraceSignature=\"Game.Type{i}:Run(Game.Type0)\" newStackTraceSignature=\"$T{i}:$r($T0)\" />\n    \
             </type>"
        );
    }
    document.push_str("  </assembly>\n</mapping>\n");
    document
}

fn log_text(lines: usize) -> String {
    let mut text = String::new();
    for i in 0..lines {
        let _ = match i % 3 {
            0 => writeln!(text, "  at $T{i}.$r ($T0) [0x00000] in <filename unknown>:0"),
            1 => writeln!(text, "$T{i}:$r(int)"),
            _ => writeln!(text, "frame {i} touched $T{i} and $Unknown"),
        };
    }
    text
}

/// Benchmark parsing the generated mapping document.
fn bench_load_mapping(c: &mut Criterion) {
    let document = mapping_document();

    c.bench_function("load_mapping_2000_types", |b| {
        b.iter(|| {
            let table = MappingTable::from_xml(black_box(&document)).unwrap();
            black_box(table)
        });
    });
}

/// Benchmark resolving one line of each convention.
fn bench_resolve_line(c: &mut Criterion) {
    let table = MappingTable::from_xml(&mapping_document()).unwrap();

    c.bench_function("resolve_line_exception", |b| {
        b.iter(|| {
            black_box(resolve_line(
                black_box("  at $T42.$r ($T0) [0x00000] in <filename unknown>:0"),
                &table,
            ))
        });
    });

    c.bench_function("resolve_line_debug_log", |b| {
        b.iter(|| black_box(resolve_line(black_box("$T42:$r(int)"), &table)));
    });

    c.bench_function("resolve_line_plain", |b| {
        b.iter(|| {
            black_box(resolve_line(
                black_box("Loaded 42 assets for $T7 in 12ms"),
                &table,
            ))
        });
    });
}

/// Benchmark resolving a whole log, below and above the parallel threshold.
fn bench_resolve_text(c: &mut Criterion) {
    let table = MappingTable::from_xml(&mapping_document()).unwrap();
    let text = log_text(TYPES);

    c.bench_function("resolve_text_sequential", |b| {
        let options = ResolveOptions {
            parallel_threshold: usize::MAX,
            ..ResolveOptions::default()
        };
        b.iter(|| black_box(resolve_text(&table, black_box(&text), &options)));
    });

    c.bench_function("resolve_text_parallel", |b| {
        let options = ResolveOptions {
            parallel_threshold: 1,
            ..ResolveOptions::default()
        };
        b.iter(|| black_box(resolve_text(&table, black_box(&text), &options)));
    });
}

criterion_group!(
    benches,
    bench_load_mapping,
    bench_resolve_line,
    bench_resolve_text,
);
criterion_main!(benches);
