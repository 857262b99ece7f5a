//! Wow/flutter modulation generator.
//!
//! Real tape transports never run at a perfectly constant speed: the
//! capstan adds a quasi-periodic wobble, and mechanical slop adds a slow
//! random wander. This module models both and produces one delay-time
//! offset in milliseconds per sample, which the engine adds to the
//! smoothed time control before computing the delay length.

use cinta_core::{Lfo, WhiteNoise};

/// Weight of the periodic (capstan) component in the blend.
const LFO_WEIGHT: f32 = 0.75;
/// Weight of the noise-derived drift component in the blend.
const DRIFT_WEIGHT: f32 = 0.25;
/// One-pole coefficient applied to the noise source per sample. Small on
/// purpose: the drift should wander over seconds, not cycles.
const DRIFT_COEFF: f32 = 0.0015;

/// Flutter generator: sine wobble plus low-pass-filtered noise drift.
///
/// Per sample the output is
///
/// ```text
/// amount_ms · (0.75 · sin(phase) + 0.25 · drift · randomness)
/// ```
///
/// where `drift` is uniform noise through a one-pole low-pass with
/// coefficient 0.0015. The randomness control scales only the drift term:
/// at 0 the flutter is purely sinusoidal, at 1 the drift contributes its
/// full quarter share.
///
/// # Example
///
/// ```rust
/// use cinta_engine::Flutter;
///
/// let mut flutter = Flutter::new(48000.0);
/// let offset_ms = flutter.next(0.3, 4.0, 0.25);
/// assert!(offset_ms.abs() <= 0.3);
/// ```
#[derive(Debug, Clone)]
pub struct Flutter {
    lfo: Lfo,
    noise: WhiteNoise,
    /// One-pole drift filter state
    drift: f32,
}

impl Flutter {
    /// Create a flutter generator for the given sample rate.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            lfo: Lfo::new(sample_rate, 4.0),
            noise: WhiteNoise::new(),
            drift: 0.0,
        }
    }

    /// Advance one sample and return the delay-time offset in ms.
    ///
    /// # Arguments
    /// * `amount_ms` - Flutter depth in milliseconds
    /// * `rate_hz` - Wobble rate in Hz (applied before this sample's
    ///   phase step, so a smoothed rate stays phase-continuous)
    /// * `randomness` - Drift contribution, [0, 1]
    #[inline]
    pub fn next(&mut self, amount_ms: f32, rate_hz: f32, randomness: f32) -> f32 {
        self.lfo.set_frequency(rate_hz);
        let wobble = self.lfo.next();

        let noise = self.noise.next();
        self.drift += DRIFT_COEFF * (noise - self.drift);
        let drift_part = self.drift * randomness;

        amount_ms * (LFO_WEIGHT * wobble + DRIFT_WEIGHT * drift_part)
    }

    /// Clear the oscillator phase and the drift filter state.
    ///
    /// The noise stream itself is left running; there is nothing audible
    /// to reproduce in it.
    pub fn reset(&mut self) {
        self.lfo.reset();
        self.drift = 0.0;
    }

    /// Update the sample rate (phase increment rescales, state persists).
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.lfo.set_sample_rate(sample_rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::TAU;

    #[test]
    fn zero_amount_is_silent() {
        let mut flutter = Flutter::new(48000.0);
        for _ in 0..1000 {
            assert_eq!(flutter.next(0.0, 4.0, 1.0), 0.0);
        }
    }

    #[test]
    fn output_bounded_by_amount() {
        let mut flutter = Flutter::new(48000.0);
        for _ in 0..48000 {
            let out = flutter.next(2.0, 8.0, 1.0);
            assert!(out.abs() <= 2.0, "flutter exceeded depth: {out}");
        }
    }

    #[test]
    fn zero_randomness_is_pure_sine() {
        let mut flutter = Flutter::new(48000.0);

        let mut phase: f32 = 0.0;
        let inc = TAU * 4.0 / 48000.0;
        for _ in 0..4800 {
            let out = flutter.next(1.0, 4.0, 0.0);
            phase += inc;
            if phase >= TAU {
                phase -= TAU;
            }
            let expected = LFO_WEIGHT * libm::sinf(phase);
            assert!(
                (out - expected).abs() < 1e-4,
                "expected pure sine {expected}, got {out}"
            );
        }
    }

    #[test]
    fn randomness_scales_only_the_drift_term() {
        // Two generators sharing the same noise stream (same default
        // seed) differ only by the drift contribution.
        let mut plain = Flutter::new(48000.0);
        let mut randomized = Flutter::new(48000.0);

        let mut max_diff: f32 = 0.0;
        for _ in 0..48000 {
            let a = plain.next(1.0, 4.0, 0.0);
            let b = randomized.next(1.0, 4.0, 1.0);
            // Difference is exactly the drift share
            let diff = (b - a).abs();
            assert!(diff <= DRIFT_WEIGHT + 1e-6);
            max_diff = max_diff.max(diff);
        }
        assert!(max_diff > 1e-4, "drift never contributed: {max_diff}");
    }

    #[test]
    fn drift_moves_slowly() {
        let mut flutter = Flutter::new(48000.0);
        let mut prev = flutter.drift;
        for _ in 0..48000 {
            flutter.next(1.0, 4.0, 1.0);
            let cur = flutter.drift;
            // One-pole with coeff 0.0015 over [-1, 1) noise steps by at
            // most 2 * 0.0015 per sample
            assert!((cur - prev).abs() <= 2.0 * DRIFT_COEFF + 1e-7);
            prev = cur;
        }
    }

    #[test]
    fn reset_clears_phase_and_drift() {
        let mut flutter = Flutter::new(48000.0);
        for _ in 0..1000 {
            flutter.next(2.0, 8.0, 1.0);
        }
        flutter.reset();
        assert_eq!(flutter.drift, 0.0);
        // First post-reset sample matches a fresh generator's sine share
        let out = flutter.next(1.0, 4.0, 0.0);
        let expected = LFO_WEIGHT * libm::sinf(TAU * 4.0 / 48000.0);
        assert!((out - expected).abs() < 1e-5);
    }
}
