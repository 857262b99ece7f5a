//! Criterion benchmarks for the tape delay engine
//!
//! Run with: cargo bench
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use cinta_engine::{TapeDelay, TapeDelayParams};

const SAMPLE_RATE: f64 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_process_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("TapeDelay");

    let params = TapeDelayParams {
        time_ms: 350.0,
        feedback: 0.6,
        mix: 0.4,
        flutter_amount_ms: 0.5,
        flutter_rand: 0.5,
        drive: 0.4,
        ..TapeDelayParams::default()
    };

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);
        let mut delay = TapeDelay::new();
        delay.prepare(SAMPLE_RATE, block_size, 2);

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, _| {
                let mut left = vec![0.0f32; block_size];
                let mut right = vec![0.0f32; block_size];
                b.iter(|| {
                    left.copy_from_slice(&input);
                    right.copy_from_slice(&input);
                    delay.process_block(
                        black_box(&mut [&mut left, &mut right]),
                        black_box(&params),
                    );
                    black_box(left[0])
                })
            },
        );
    }

    group.finish();
}

fn bench_flutter_disabled_vs_enabled(c: &mut Criterion) {
    let mut group = c.benchmark_group("TapeDelayFlutter");
    let input = generate_test_signal(512);

    for (label, amount) in [("off", 0.0f32), ("on", 2.0f32)] {
        let params = TapeDelayParams {
            flutter_amount_ms: amount,
            ..TapeDelayParams::default()
        };
        let mut delay = TapeDelay::new();
        delay.prepare(SAMPLE_RATE, 512, 2);

        group.bench_function(label, |b| {
            let mut left = vec![0.0f32; 512];
            let mut right = vec![0.0f32; 512];
            b.iter(|| {
                left.copy_from_slice(&input);
                right.copy_from_slice(&input);
                delay.process_block(&mut [&mut left, &mut right], black_box(&params));
                black_box(left[0])
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_process_block, bench_flutter_disabled_vs_enabled);
criterion_main!(benches);
