//! Sine oscillator for flutter modulation.

use core::f32::consts::TAU;
use libm::sinf;

/// Phase-accumulating sine oscillator.
///
/// Advances its phase by `2π · rate / sample_rate` per sample, wrapped to
/// `[0, 2π)`. The rate can change every sample without phase jumps, which
/// is what a smoothed flutter-rate control requires.
///
/// # Example
///
/// ```rust
/// use cinta_core::Lfo;
///
/// let mut lfo = Lfo::new(48000.0, 4.0);
/// let value = lfo.next(); // in [-1.0, 1.0]
/// ```
#[derive(Debug, Clone)]
pub struct Lfo {
    /// Current phase in radians, [0, 2π)
    phase: f32,
    /// Phase increment per sample, radians
    phase_inc: f32,
    /// Sample rate in Hz
    sample_rate: f32,
}

impl Lfo {
    /// Create an oscillator at the given rate.
    pub fn new(sample_rate: f32, freq_hz: f32) -> Self {
        Self {
            phase: 0.0,
            phase_inc: TAU * freq_hz / sample_rate,
            sample_rate,
        }
    }

    /// Set the oscillation rate in Hz. Takes effect on the next sample;
    /// the phase is untouched.
    #[inline]
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.phase_inc = TAU * freq_hz / self.sample_rate;
    }

    /// Current rate in Hz.
    pub fn frequency(&self) -> f32 {
        self.phase_inc * self.sample_rate / TAU
    }

    /// Current phase in radians.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Advance one sample and return `sin(phase)`.
    #[inline]
    pub fn next(&mut self) -> f32 {
        self.phase += self.phase_inc;
        if self.phase >= TAU {
            self.phase -= TAU;
        }
        sinf(self.phase)
    }

    /// Rewind the phase to zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Update the sample rate, preserving the configured rate in Hz.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        let freq = self.frequency();
        self.sample_rate = sample_rate;
        self.set_frequency(freq);
    }
}
