//! State Variable Filter for the feedback tone stages.
//!
//! # Topology
//!
//! Topology-Preserving Transform (TPT) SVF after Zavalishin, "The Art of
//! VA Filter Design" (2012). The trapezoidal integrator discretization
//! preserves the analog prototype's response and stays stable while the
//! cutoff is swept — which happens here every sample, since the low-cut
//! and hi-cut controls are smoothed and the smoothed value feeds
//! [`set_cutoff`](StateVariableFilter::set_cutoff) per sample.
//!
//! # Performance
//!
//! `set_cutoff` uses [`fast_tan`] for cutoffs below 10 kHz, falling back
//! to [`libm::tanf`] above where the Padé approximation loses accuracy.
//!
//! # Reference
//!
//! Zavalishin, "The Art of VA Filter Design", rev. 2.1.2 (2018), Chapter 3.

use core::f32::consts::PI;
use libm::tanf;

use crate::Effect;
use crate::fast_math::fast_tan;
use crate::flush_denormal;

/// Butterworth (maximally flat) Q.
pub const BUTTERWORTH_Q: f32 = 0.707;

/// Which SVF output the filter produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SvfOutput {
    /// Low-pass output — passes frequencies below the cutoff.
    #[default]
    Lowpass,
    /// High-pass output — passes frequencies above the cutoff.
    Highpass,
}

/// Two-pole (12 dB/oct) topology-preserving state variable filter.
///
/// ## Parameters
///
/// - `cutoff`: cutoff frequency in Hz (20.0 to sr×0.49, default 1000.0)
/// - `resonance`: Q factor (0.5 to 20.0, default [`BUTTERWORTH_Q`])
/// - `output_type`: lowpass or highpass (default `Lowpass`)
///
/// # Example
///
/// ```rust
/// use cinta_core::{Effect, StateVariableFilter, SvfOutput};
///
/// let mut low_cut = StateVariableFilter::new(48000.0);
/// low_cut.set_output_type(SvfOutput::Highpass);
/// low_cut.set_cutoff(120.0);
///
/// let out = low_cut.process(0.5);
/// ```
#[derive(Debug, Clone)]
pub struct StateVariableFilter {
    // Integrator states
    ic1eq: f32,
    ic2eq: f32,

    // Coefficients
    g: f32,
    k: f32,

    // Parameters
    sample_rate: f32,
    cutoff: f32,
    resonance: f32,
    output_type: SvfOutput,
}

impl Default for StateVariableFilter {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl StateVariableFilter {
    /// Create a new SVF with cutoff 1000 Hz, Q = 0.707, lowpass output.
    pub fn new(sample_rate: f32) -> Self {
        let mut svf = Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            g: 0.0,
            k: 0.0,
            sample_rate,
            cutoff: 1000.0,
            resonance: BUTTERWORTH_Q,
            output_type: SvfOutput::Lowpass,
        };
        svf.update_coefficients();
        svf
    }

    /// Set cutoff frequency in Hz, clamped to 20.0..=`sample_rate × 0.49`.
    ///
    /// Cheap enough to call every sample while a smoothed cutoff ramps.
    pub fn set_cutoff(&mut self, freq: f32) {
        self.cutoff = freq.clamp(20.0, self.sample_rate * 0.49);
        self.update_coefficients();
    }

    /// Current cutoff frequency in Hz.
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    /// Set resonance (Q factor), clamped to 0.5..=20.0.
    ///
    /// Q = 0.707 gives a Butterworth (maximally flat) response.
    pub fn set_resonance(&mut self, q: f32) {
        self.resonance = q.clamp(0.5, 20.0);
        self.update_coefficients();
    }

    /// Current resonance (Q factor).
    pub fn resonance(&self) -> f32 {
        self.resonance
    }

    /// Select the lowpass or highpass output.
    pub fn set_output_type(&mut self, output_type: SvfOutput) {
        self.output_type = output_type;
    }

    /// Currently selected output.
    pub fn output_type(&self) -> SvfOutput {
        self.output_type
    }

    /// Recompute `g` and `k` from cutoff and resonance.
    ///
    /// `fast_tan` covers cutoffs below 10 kHz with < 0.1% error; above
    /// that the exact `tanf` takes over (the hi-cut control reaches
    /// 18 kHz, where the Padé form is no longer trustworthy).
    fn update_coefficients(&mut self) {
        let arg = PI * self.cutoff / self.sample_rate;
        self.g = if self.cutoff < 10_000.0 {
            fast_tan(arg)
        } else {
            tanf(arg)
        };
        self.k = 1.0 / self.resonance;
    }

    /// Process one sample, returning `(lowpass, highpass)`.
    #[inline]
    pub fn process_both(&mut self, input: f32) -> (f32, f32) {
        let v3 = input - self.ic2eq;
        let v1 = (self.g * v3 + self.ic1eq) / (1.0 + self.g * (self.g + self.k));
        let v2 = self.ic2eq + self.g * v1;

        self.ic1eq = flush_denormal(2.0 * v1 - self.ic1eq);
        self.ic2eq = flush_denormal(2.0 * v2 - self.ic2eq);

        let lp = v2;
        let hp = input - self.k * v1 - v2;

        (lp, hp)
    }
}

impl Effect for StateVariableFilter {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let (lp, hp) = self.process_both(input);

        match self.output_type {
            SvfOutput::Lowpass => lp,
            SvfOutput::Highpass => hp,
        }
    }

    fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_coefficients();
    }
}
