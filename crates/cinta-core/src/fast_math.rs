//! Fast approximations for coefficient computation.
//!
//! The filter stage recomputes its cutoff coefficient every sample while a
//! smoothed cutoff parameter is still ramping, so the `tan` in the TPT
//! prewarp is on the hot path. A Padé approximant covers the audible range
//! at a fraction of `libm::tanf`'s cost; the exact function remains the
//! fallback near the top of the range where the approximation degrades.
//!
//! These approximations target coefficient computation only — audio-rate
//! waveshaping keeps full-precision `libm`.

/// Fast tangent for small positive angles.
///
/// Padé \[2/1\] rational approximation:
///   `tan(x) ≈ x · (15 − x²) / (15 − 6x²)`
///
/// Matches the Taylor series through the x⁵ term.
///
/// # Accuracy
///
/// | Frequency (@ 48 kHz) | Argument x = π·f/sr | Relative error |
/// |----------------------|---------------------|----------------|
/// | < 4.6 kHz | < 0.3 | < 0.03% |
/// | < 7.6 kHz | < 0.5 | < 0.2% |
/// | < 15.3 kHz | < 1.0 | < 2% |
///
/// # Arguments
///
/// * `x` - Angle in radians. Valid for x ∈ \[0, π/3\]. Beyond that the
///   error grows as tan approaches its pole at π/2 — callers switch to
///   `libm::tanf` there.
#[inline]
pub fn fast_tan(x: f32) -> f32 {
    let x2 = x * x;
    x * (15.0 - x2) / (15.0 - 6.0 * x2)
}
