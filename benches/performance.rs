// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for scalekey
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Scale generation with and without the cache
//! - Hand-pan adaptation
//! - Transposition throughput

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use scalekey::{
    EngineConfig, GenerationOptions, Instrument, PitchClass, ScaleKeyEngine, ScaleType,
};

fn engine(cache: bool, instrument: Option<Instrument>) -> ScaleKeyEngine {
    let config = EngineConfig {
        cache,
        instrument,
        ..EngineConfig::default()
    };
    ScaleKeyEngine::new(config).expect("default engine config is valid")
}

/// Benchmark cache hits against full generation
fn bench_generate_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_scale");

    let mut cached = engine(true, None);
    group.bench_function("cached", |b| {
        b.iter(|| {
            let scale = cached
                .generate_scale(black_box("D"), black_box("dorian"), GenerationOptions::new())
                .unwrap();
            black_box(scale.notes.len())
        })
    });

    let mut uncached = engine(false, None);
    group.bench_function("uncached", |b| {
        b.iter(|| {
            let scale = uncached
                .generate_scale(black_box("D"), black_box("dorian"), GenerationOptions::new())
                .unwrap();
            black_box(scale.notes.len())
        })
    });

    group.finish();
}

/// Benchmark hand-pan adaptation across note counts
fn bench_hand_pan(c: &mut Criterion) {
    let mut group = c.benchmark_group("hand_pan");
    let mut engine = engine(false, Some(Instrument::HandPan));

    for count in [5usize, 8, 12].iter() {
        group.bench_with_input(BenchmarkId::new("adapt", count), count, |b, &count| {
            b.iter(|| {
                let options = GenerationOptions::new().with_note_count(count);
                let scale = engine.generate(PitchClass::D, ScaleType::Minor, options).unwrap();
                black_box(scale.adaptation.as_ref().map(|a| a.note_count))
            })
        });
    }

    group.finish();
}

/// Benchmark transposing a melody line
fn bench_transpose(c: &mut Criterion) {
    let mut engine = engine(true, None);
    let melody: Vec<String> = ["C4", "E4", "G4", "B4", "D5", "F5", "A5", "C6"]
        .iter()
        .cycle()
        .take(64)
        .map(|s| s.to_string())
        .collect();

    c.bench_function("transpose_64_notes", |b| {
        b.iter(|| black_box(engine.transpose_key("C", "F#", black_box(&melody)).unwrap()))
    });
}

criterion_group!(benches, bench_generate_scale, bench_hand_pan, bench_transpose);
criterion_main!(benches);
