//! Parameter smoothing for click-free automation.
//!
//! Control values arriving once per block (or jumping under host
//! automation) must not step audibly. [`SmoothedParam`] turns a target
//! value into a per-sample sequence that approaches the target
//! exponentially, with a time constant chosen per parameter: tight for
//! level-like controls (mix, feedback), looser for delay time where fast
//! changes read as pitch artifacts.
//!
//! ## Usage
//!
//! ```rust
//! use cinta_core::SmoothedParam;
//!
//! // 30 ms time constant at 48 kHz
//! let mut feedback = SmoothedParam::with_config(0.4, 48000.0, 30.0);
//!
//! feedback.set_target(0.8);
//! for _ in 0..4800 {
//!     let fb = feedback.advance();
//!     // use fb for this sample...
//! }
//! assert!((feedback.get() - 0.8).abs() < 0.05);
//! ```

use libm::expf;

/// A control value with exponential (one-pole) smoothing.
///
/// The difference equation is `y[n] = y[n-1] + coeff · (target − y[n-1])`
/// with `coeff = 1 − exp(−1 / (τ · sample_rate))`, a first-order IIR whose
/// time constant τ is the configured smoothing time. After one τ the value
/// has covered ~63.2% of the distance to the target; after 5τ it is
/// effectively settled.
///
/// The slew is bounded: no single step exceeds
/// `coeff · |target − current|`, and the first step after a target jump is
/// the largest.
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    /// Current smoothed value
    current: f32,
    /// Value being approached
    target: f32,
    /// One-pole coefficient (1.0 = instant, →0 = very slow)
    coeff: f32,
    /// Sample rate in Hz
    sample_rate: f32,
    /// Time constant in milliseconds
    smoothing_time_ms: f32,
}

impl SmoothedParam {
    /// Create a smoothed parameter with full configuration.
    ///
    /// # Arguments
    /// * `initial` - Starting value (current and target)
    /// * `sample_rate` - Sample rate in Hz
    /// * `smoothing_time_ms` - Time constant in milliseconds (0 = instant)
    pub fn with_config(initial: f32, sample_rate: f32, smoothing_time_ms: f32) -> Self {
        let mut param = Self {
            current: initial,
            target: initial,
            coeff: 1.0,
            sample_rate,
            smoothing_time_ms,
        };
        param.recalculate_coeff();
        param
    }

    /// Set the value to approach. The transition starts from the current
    /// smoothed value, so there is never a discontinuity.
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Set target and current simultaneously (no ramp).
    ///
    /// Used at initialization and after state clears, where ramping from a
    /// stale value would itself be an artifact.
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.target = value;
        self.current = value;
    }

    /// Advance one sample and return the new smoothed value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.current += self.coeff * (self.target - self.current);
        self.current
    }

    /// Current smoothed value, without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// The value being approached.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// The per-sample smoothing coefficient.
    ///
    /// Exposed so callers can reason about the slew bound:
    /// `|Δ per sample| ≤ coeff · |target − current|`.
    #[inline]
    pub fn coeff(&self) -> f32 {
        self.coeff
    }

    /// Jump the smoothed value straight to the target.
    #[inline]
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
    }

    /// Update the sample rate, preserving the configured time constant.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coeff();
    }

    /// Change the time constant in milliseconds.
    pub fn set_smoothing_time_ms(&mut self, time_ms: f32) {
        self.smoothing_time_ms = time_ms;
        self.recalculate_coeff();
    }

    /// Recompute the one-pole coefficient from the time constant.
    ///
    /// `coeff = 1 − exp(−1 / (τ · sample_rate))` where τ is the smoothing
    /// time in seconds. A non-positive time constant or sample rate yields
    /// `coeff = 1.0`, i.e. instant response.
    fn recalculate_coeff(&mut self) {
        if self.smoothing_time_ms <= 0.0 || self.sample_rate <= 0.0 {
            self.coeff = 1.0;
        } else {
            let samples_per_tau = self.smoothing_time_ms / 1000.0 * self.sample_rate;
            self.coeff = 1.0 - expf(-1.0 / samples_per_tau);
        }
    }
}
