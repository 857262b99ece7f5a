//! Property-based tests for the tape delay engine.
//!
//! Randomized parameter snapshots — including deliberately out-of-range
//! values — driven through multi-block runs with per-block automation
//! changes. The engine must stay finite, bounded, and in its safe
//! delay-offset region throughout.

use proptest::prelude::*;

use cinta_engine::{TapeDelay, TapeDelayParams};

/// An arbitrary snapshot, wider than the legal ranges so the defensive
/// clamping is part of what gets tested.
fn wild_params() -> impl Strategy<Value = TapeDelayParams> {
    (
        (
            -100.0f32..4000.0, // time_ms
            any::<bool>(),
            0usize..16, // sync_division
            -1.0f32..2.0,  // feedback
            -1.0f32..2.0,  // mix
            -24.0f32..24.0, // output_db
        ),
        (
            0.0f32..2000.0,    // low_cut_hz
            1000.0f32..20000.0, // hi_cut_hz
            -1.0f32..4.0,      // flutter_amount_ms
            0.0f32..16.0,      // flutter_rate_hz
            -1.0f32..2.0,      // flutter_rand
            -1.0f32..2.0,      // drive
        ),
    )
        .prop_map(
            |(
                (time_ms, sync_on, sync_division, feedback, mix, output_db),
                (low_cut_hz, hi_cut_hz, flutter_amount_ms, flutter_rate_hz, flutter_rand, drive),
            )| TapeDelayParams {
                time_ms,
                sync_on,
                sync_division,
                feedback,
                mix,
                output_db,
                low_cut_hz,
                hi_cut_hz,
                flutter_amount_ms,
                flutter_rate_hz,
                flutter_rand,
                drive,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any snapshot, however out of range, produces finite bounded output
    /// over a sustained run.
    #[test]
    fn engine_output_finite_and_bounded(
        params in wild_params(),
        input in prop::collection::vec(-1.0f32..=1.0f32, 256..1024),
    ) {
        let mut delay = TapeDelay::new();
        delay.prepare(48000.0, 1024, 2);

        // Loop the input a few times so feedback has cycles to build
        for _ in 0..8 {
            let mut l = input.clone();
            let mut r = input.clone();
            delay.process_block(&mut [&mut l, &mut r], &params);
            for (i, (a, b)) in l.iter().zip(&r).enumerate() {
                prop_assert!(a.is_finite() && b.is_finite(), "non-finite at {}", i);
                // |write| < 1 + 0.95 and the output gain tops out at +12 dB,
                // with interpolator overshoot margin on top
                prop_assert!(
                    a.abs() < 16.0 && b.abs() < 16.0,
                    "implausible level at {}: {} / {}", i, a, b
                );
            }
        }
    }

    /// Per-block automation between arbitrary snapshots never glitches
    /// the engine into a non-finite or runaway state.
    #[test]
    fn engine_survives_block_automation(
        snapshots in prop::collection::vec(wild_params(), 4..12),
    ) {
        let mut delay = TapeDelay::new();
        delay.prepare(44100.0, 512, 2);

        let input: Vec<f32> = (0..512).map(|i| (i as f32 * 0.13).sin()).collect();

        for params in &snapshots {
            for _ in 0..4 {
                let mut l = input.clone();
                let mut r = input.clone();
                delay.process_block(&mut [&mut l, &mut r], params);
                prop_assert!(l.iter().chain(&r).all(|s| s.is_finite()));
            }
        }
    }

    /// reset() always returns the engine to silence, whatever state the
    /// previous parameters left behind.
    #[test]
    fn reset_returns_to_silence(params in wild_params()) {
        let mut delay = TapeDelay::new();
        delay.prepare(48000.0, 512, 2);

        let mut l = [0.7f32; 512];
        let mut r = [0.7f32; 512];
        delay.process_block(&mut [&mut l, &mut r], &params);

        delay.reset();

        let silent = TapeDelayParams { mix: 1.0, feedback: 0.0, ..params };
        let mut l = [0.0f32; 512];
        let mut r = [0.0f32; 512];
        delay.process_block(&mut [&mut l, &mut r], &silent);
        prop_assert!(l.iter().chain(&r).all(|s| s.abs() < 1e-6));
    }
}
