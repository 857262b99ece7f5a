//! Mathematical utilities for the delay engine.
//!
//! Allocation-free, `no_std`-friendly helpers shared by the processing
//! path: level conversions, the feedback saturation curve, denormal
//! protection, and time conversions.

use libm::{expf, logf, tanhf};

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use cinta_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Inputs at or below zero are floored to avoid `-inf`.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Tape-style soft clipper for the feedback path.
///
/// `tanh(x · (1 + 5·drive))` with `drive` in [0, 1]. At drive 0 the curve
/// is a plain `tanh`; higher drive pushes the signal further into the
/// saturating region, adding harmonic content and compressing level.
/// Output magnitude is always below 1, which is what keeps a feedback
/// loop with gain ≤ 0.95 bounded.
///
/// # Example
/// ```rust
/// use cinta_core::saturate;
///
/// assert!(saturate(10.0, 1.0) < 1.0);
/// assert!(saturate(-10.0, 1.0) > -1.0);
/// ```
#[inline]
pub fn saturate(x: f32, drive: f32) -> f32 {
    let gain = 1.0 + drive * 5.0;
    tanhf(x * gain)
}

/// Flush subnormal (denormalized) floats to zero.
///
/// Subnormals (~1e-38 to 1e-45) cause severe CPU slowdowns on most
/// architectures. Values below 1e-20 are replaced with zero, well before
/// the IEEE 754 subnormal range begins. Use in feedback loops where the
/// signal can decay toward zero indefinitely.
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Crossfade between dry and wet signals.
///
/// Equivalent to `dry * (1 - mix) + wet * mix` with one fewer multiply.
///
/// # Arguments
///
/// * `dry` - Unprocessed signal
/// * `wet` - Processed signal
/// * `mix` - Blend factor in \[0.0, 1.0\]: 0.0 = all dry, 1.0 = all wet
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    dry + (wet - dry) * mix
}

/// Convert milliseconds to samples.
#[inline]
pub fn ms_to_samples(ms: f32, sample_rate: f32) -> f32 {
    ms * sample_rate / 1000.0
}

/// Convert samples to milliseconds.
#[inline]
pub fn samples_to_ms(samples: f32, sample_rate: f32) -> f32 {
    samples * 1000.0 / sample_rate
}
