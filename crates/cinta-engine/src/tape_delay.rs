//! The tape delay engine.
//!
//! One `TapeDelay` owns everything with per-sample state: two fractional
//! delay lines (left/right), two filter pairs on the feedback path, eight
//! parameter smoothers, and the flutter generator. The host owns the
//! parameters and calls [`process_block`](TapeDelay::process_block) once
//! per buffer with a value snapshot; nothing here ever re-reads live
//! parameter storage mid-block.
//!
//! # Signal flow, per sample and channel
//!
//! ```text
//!          ┌────────────────────────────────────────────┐
//!          │                 feedback                   │
//!          ▼                                            │
//! in ──▶ (+) ──▶ delay line ──┬──▶ low cut ──▶ hi cut ──▶ saturate ──▶ × fb
//!                             │
//!                             └──▶ wet ──▶ mix with dry ──▶ × out gain ──▶ out
//! ```
//!
//! The wet tap is the delay output *before* this sample's write, so a
//! read in cycle n never sees the write of cycle n. The dry path is never
//! filtered or saturated.

use cinta_core::{
    Effect, FractionalDelay, SmoothedParam, StateVariableFilter, SvfOutput, db_to_linear,
    flush_denormal, ms_to_samples, saturate, wet_dry_mix,
};
use cinta_core::{ParamDescriptor, ParamUnit, ParameterInfo};
use libm::ceil;

use crate::flutter::Flutter;
use crate::params::{self, TapeDelayParams};

/// Longest supported delay, in seconds of history per channel.
const MAX_DELAY_SECONDS: f64 = 2.0;
/// Extra buffer samples so the cubic interpolator always has neighbors.
const INTERP_GUARD_SAMPLES: usize = 8;

/// Time constant for the delay time smoother. Loose: fast time changes
/// read as pitch sweeps, so they get the gentlest ramp.
const TIME_SMOOTHING_MS: f32 = 80.0;
/// Time constant for level-like controls (feedback, mix, drive).
const LEVEL_SMOOTHING_MS: f32 = 30.0;
/// Time constant for tone and flutter controls.
const TONE_SMOOTHING_MS: f32 = 50.0;

/// Analog tape-style feedback delay engine.
///
/// Call [`prepare`](Self::prepare) before first use and whenever the
/// sample rate or maximum block size changes; call
/// [`reset`](Self::reset) to clear audio state without reallocating;
/// feed audio through [`process_block`](Self::process_block).
///
/// Stereo-first: mono input is processed as identical left/right content
/// (with only the left result written back), and channels beyond the
/// first two receive copies of the processed first channel.
///
/// # Example
///
/// ```rust
/// use cinta_engine::{TapeDelay, TapeDelayParams};
///
/// let mut delay = TapeDelay::new();
/// delay.prepare(48000.0, 256, 2);
///
/// let params = TapeDelayParams::default();
/// let mut left = [0.0f32; 256];
/// let mut right = [0.0f32; 256];
/// delay.process_block(&mut [&mut left, &mut right], &params);
/// ```
#[derive(Debug, Clone)]
pub struct TapeDelay {
    sample_rate: f64,
    max_block_size: usize,
    num_channels: usize,

    delay_l: FractionalDelay,
    delay_r: FractionalDelay,

    low_cut_l: StateVariableFilter,
    low_cut_r: StateVariableFilter,
    hi_cut_l: StateVariableFilter,
    hi_cut_r: StateVariableFilter,

    time_ms: SmoothedParam,
    feedback: SmoothedParam,
    mix: SmoothedParam,
    drive: SmoothedParam,
    low_cut_hz: SmoothedParam,
    hi_cut_hz: SmoothedParam,
    flutter_amount_ms: SmoothedParam,
    flutter_rate_hz: SmoothedParam,

    flutter: Flutter,

    /// Cleared by `prepare`/`reset`; the first block after that snaps the
    /// smoothers to its snapshot instead of ramping from stale values.
    primed: bool,

    /// Pending snapshot backing the generic `ParameterInfo` access.
    params: TapeDelayParams,
}

impl Default for TapeDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl TapeDelay {
    /// Create an engine prepared for 44.1 kHz stereo with 512-sample
    /// blocks. Call [`prepare`](Self::prepare) to match the real layout.
    pub fn new() -> Self {
        let sr = 44100.0_f32;
        let defaults = TapeDelayParams::default();
        let mut engine = Self {
            sample_rate: f64::from(sr),
            max_block_size: 512,
            num_channels: 2,
            delay_l: FractionalDelay::new(4),
            delay_r: FractionalDelay::new(4),
            low_cut_l: StateVariableFilter::new(sr),
            low_cut_r: StateVariableFilter::new(sr),
            hi_cut_l: StateVariableFilter::new(sr),
            hi_cut_r: StateVariableFilter::new(sr),
            time_ms: SmoothedParam::with_config(defaults.time_ms, sr, TIME_SMOOTHING_MS),
            feedback: SmoothedParam::with_config(defaults.feedback, sr, LEVEL_SMOOTHING_MS),
            mix: SmoothedParam::with_config(defaults.mix, sr, LEVEL_SMOOTHING_MS),
            drive: SmoothedParam::with_config(defaults.drive, sr, LEVEL_SMOOTHING_MS),
            low_cut_hz: SmoothedParam::with_config(defaults.low_cut_hz, sr, TONE_SMOOTHING_MS),
            hi_cut_hz: SmoothedParam::with_config(defaults.hi_cut_hz, sr, TONE_SMOOTHING_MS),
            flutter_amount_ms: SmoothedParam::with_config(
                defaults.flutter_amount_ms,
                sr,
                TONE_SMOOTHING_MS,
            ),
            flutter_rate_hz: SmoothedParam::with_config(
                defaults.flutter_rate_hz,
                sr,
                TONE_SMOOTHING_MS,
            ),
            flutter: Flutter::new(sr),
            primed: false,
            params: defaults,
        };
        engine.prepare(44100.0, 512, 2);
        engine
    }

    /// (Re)allocate and zero all per-channel state for a new layout.
    ///
    /// Sizes each delay line for [`MAX_DELAY_SECONDS`] of history at
    /// `sample_rate` plus an interpolation guard. This is the only place
    /// the engine allocates; it must be sequenced strictly before or
    /// after any `process_block` call, never concurrently with one.
    pub fn prepare(&mut self, sample_rate: f64, max_block_size: usize, num_channels: usize) {
        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        self.num_channels = num_channels;

        let capacity = ceil(MAX_DELAY_SECONDS * sample_rate) as usize + INTERP_GUARD_SAMPLES;
        self.delay_l = FractionalDelay::new(capacity);
        self.delay_r = FractionalDelay::new(capacity);

        let sr = sample_rate as f32;
        for filter in [&mut self.low_cut_l, &mut self.low_cut_r] {
            filter.set_output_type(SvfOutput::Highpass);
            filter.set_sample_rate(sr);
            filter.reset();
        }
        for filter in [&mut self.hi_cut_l, &mut self.hi_cut_r] {
            filter.set_output_type(SvfOutput::Lowpass);
            filter.set_sample_rate(sr);
            filter.reset();
        }

        for smoother in [
            &mut self.time_ms,
            &mut self.feedback,
            &mut self.mix,
            &mut self.drive,
            &mut self.low_cut_hz,
            &mut self.hi_cut_hz,
            &mut self.flutter_amount_ms,
            &mut self.flutter_rate_hz,
        ] {
            smoother.set_sample_rate(sr);
        }

        self.flutter.set_sample_rate(sr);
        self.flutter.reset();
        self.primed = false;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate,
            max_block_size,
            num_channels,
            delay_capacity = capacity,
            "tape delay prepared"
        );
    }

    /// Clear all transient state — delay history, filter integrators,
    /// flutter phase and drift — without reallocating.
    pub fn reset(&mut self) {
        self.delay_l.clear();
        self.delay_r.clear();
        self.low_cut_l.reset();
        self.low_cut_r.reset();
        self.hi_cut_l.reset();
        self.hi_cut_r.reset();
        self.flutter.reset();
        self.primed = false;

        #[cfg(feature = "tracing")]
        tracing::debug!("tape delay reset");
    }

    /// Sample rate the engine was last prepared for.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// The pending snapshot backing [`ParameterInfo`] access. Hosts that
    /// drive the engine generically pass this to `process_block`.
    pub fn params(&self) -> TapeDelayParams {
        self.params
    }

    /// Process one block of planar channel buffers in place.
    ///
    /// Exactly `channels[0].len()` samples are consumed and produced per
    /// channel. Zero channels or zero samples is a no-op. Every snapshot
    /// field is clamped before use, and the computed delay length is
    /// clamped to the buffer's addressable range every sample, so no
    /// parameter combination can reach out of bounds.
    pub fn process_block(&mut self, channels: &mut [&mut [f32]], params: &TapeDelayParams) {
        let num_channels = channels.len();
        if num_channels == 0 {
            return;
        }
        let num_samples = channels[0].len();
        if num_samples == 0 {
            return;
        }
        debug_assert!(num_samples <= self.max_block_size, "block exceeds prepared size");
        debug_assert!(
            num_channels <= self.num_channels,
            "layout exceeds prepared channel count"
        );
        debug_assert!(
            channels.iter().all(|ch| ch.len() == num_samples),
            "channel buffers must share one length"
        );

        let p = params.clamped();
        self.time_ms.set_target(p.time_ms);
        self.feedback.set_target(p.feedback);
        self.mix.set_target(p.mix);
        self.drive.set_target(p.drive);
        self.low_cut_hz.set_target(p.low_cut_hz);
        self.hi_cut_hz.set_target(p.hi_cut_hz);
        self.flutter_amount_ms.set_target(p.flutter_amount_ms);
        self.flutter_rate_hz.set_target(p.flutter_rate_hz);

        if !self.primed {
            self.time_ms.snap_to_target();
            self.feedback.snap_to_target();
            self.mix.snap_to_target();
            self.drive.snap_to_target();
            self.low_cut_hz.snap_to_target();
            self.hi_cut_hz.snap_to_target();
            self.flutter_amount_ms.snap_to_target();
            self.flutter_rate_hz.snap_to_target();
            self.primed = true;
        }

        // Output gain and randomness follow the snapshot per block.
        let out_gain = db_to_linear(p.output_db);
        let sr = self.sample_rate as f32;
        let max_offset = self.delay_l.max_offset();
        let stereo = num_channels > 1;

        for i in 0..num_samples {
            let time_ms = self.time_ms.advance();
            let fb = self.feedback.advance();
            let mix = self.mix.advance();
            let drive = self.drive.advance();
            let low_cut = self.low_cut_hz.advance();
            let hi_cut = self.hi_cut_hz.advance();
            let flutter_ms = self.flutter_amount_ms.advance();
            let flutter_hz = self.flutter_rate_hz.advance();

            self.low_cut_l.set_cutoff(low_cut);
            self.low_cut_r.set_cutoff(low_cut);
            self.hi_cut_l.set_cutoff(hi_cut);
            self.hi_cut_r.set_cutoff(hi_cut);

            let mod_ms = self.flutter.next(flutter_ms, flutter_hz, p.flutter_rand);
            let offset = ms_to_samples(time_ms + mod_ms, sr).clamp(1.0, max_offset);

            let in_l = channels[0][i];
            let in_r = if stereo { channels[1][i] } else { in_l };

            // Read before write: the wet tap never contains this cycle's
            // input.
            let wet_l = self.delay_l.read(offset);
            let wet_r = self.delay_r.read(offset);

            // Feedback path only: filter, then saturate.
            let fb_l = saturate(self.hi_cut_l.process(self.low_cut_l.process(wet_l)), drive);
            let fb_r = saturate(self.hi_cut_r.process(self.low_cut_r.process(wet_r)), drive);

            self.delay_l.write(flush_denormal(in_l + fb_l * fb));
            self.delay_r.write(flush_denormal(in_r + fb_r * fb));

            channels[0][i] = wet_dry_mix(in_l, wet_l, mix) * out_gain;
            if stereo {
                channels[1][i] = wet_dry_mix(in_r, wet_r, mix) * out_gain;
            }
        }

        // Channels beyond the stereo pair mirror the processed first
        // channel.
        if num_channels > 2 {
            let (head, tail) = channels.split_at_mut(2);
            let src: &[f32] = &*head[0];
            for extra in tail {
                extra.copy_from_slice(src);
            }
        }
    }
}

impl ParameterInfo for TapeDelay {
    fn param_count(&self) -> usize {
        10
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(ParamDescriptor {
                name: "Time",
                short_name: "Time",
                unit: ParamUnit::Milliseconds,
                min: params::TIME_MS_RANGE.0,
                max: params::TIME_MS_RANGE.1,
                default: 400.0,
                step: 1.0,
            }),
            1 => Some(ParamDescriptor {
                name: "Feedback",
                short_name: "FB",
                unit: ParamUnit::None,
                min: params::FEEDBACK_RANGE.0,
                max: params::FEEDBACK_RANGE.1,
                default: 0.4,
                step: 0.01,
            }),
            2 => Some(ParamDescriptor {
                name: "Mix",
                short_name: "Mix",
                unit: ParamUnit::None,
                min: params::MIX_RANGE.0,
                max: params::MIX_RANGE.1,
                default: 0.25,
                step: 0.01,
            }),
            3 => Some(ParamDescriptor {
                name: "Output",
                short_name: "Out",
                unit: ParamUnit::Decibels,
                min: params::OUTPUT_DB_RANGE.0,
                max: params::OUTPUT_DB_RANGE.1,
                default: 0.0,
                step: 0.1,
            }),
            4 => Some(ParamDescriptor {
                name: "Low Cut",
                short_name: "LoCut",
                unit: ParamUnit::Hertz,
                min: params::LOW_CUT_HZ_RANGE.0,
                max: params::LOW_CUT_HZ_RANGE.1,
                default: 120.0,
                step: 1.0,
            }),
            5 => Some(ParamDescriptor {
                name: "Hi Cut",
                short_name: "HiCut",
                unit: ParamUnit::Hertz,
                min: params::HI_CUT_HZ_RANGE.0,
                max: params::HI_CUT_HZ_RANGE.1,
                default: 7000.0,
                step: 10.0,
            }),
            6 => Some(ParamDescriptor {
                name: "Flutter Amount",
                short_name: "FlAmt",
                unit: ParamUnit::Milliseconds,
                min: params::FLUTTER_AMOUNT_MS_RANGE.0,
                max: params::FLUTTER_AMOUNT_MS_RANGE.1,
                default: 0.3,
                step: 0.01,
            }),
            7 => Some(ParamDescriptor {
                name: "Flutter Rate",
                short_name: "FlRate",
                unit: ParamUnit::Hertz,
                min: params::FLUTTER_RATE_HZ_RANGE.0,
                max: params::FLUTTER_RATE_HZ_RANGE.1,
                default: 4.0,
                step: 0.1,
            }),
            8 => Some(ParamDescriptor {
                name: "Flutter Random",
                short_name: "FlRnd",
                unit: ParamUnit::None,
                min: params::FLUTTER_RAND_RANGE.0,
                max: params::FLUTTER_RAND_RANGE.1,
                default: 0.25,
                step: 0.01,
            }),
            9 => Some(ParamDescriptor {
                name: "Drive",
                short_name: "Drive",
                unit: ParamUnit::None,
                min: params::DRIVE_RANGE.0,
                max: params::DRIVE_RANGE.1,
                default: 0.2,
                step: 0.01,
            }),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.params.time_ms,
            1 => self.params.feedback,
            2 => self.params.mix,
            3 => self.params.output_db,
            4 => self.params.low_cut_hz,
            5 => self.params.hi_cut_hz,
            6 => self.params.flutter_amount_ms,
            7 => self.params.flutter_rate_hz,
            8 => self.params.flutter_rand,
            9 => self.params.drive,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        let Some(desc) = self.param_info(index) else {
            return;
        };
        let value = desc.clamp(value);
        match index {
            0 => self.params.time_ms = value,
            1 => self.params.feedback = value,
            2 => self.params.mix = value,
            3 => self.params.output_db = value,
            4 => self.params.low_cut_hz = value,
            5 => self.params.hi_cut_hz = value,
            6 => self.params.flutter_amount_ms = value,
            7 => self.params.flutter_rate_hz = value,
            8 => self.params.flutter_rand = value,
            9 => self.params.drive = value,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transparent_params() -> TapeDelayParams {
        TapeDelayParams {
            time_ms: 10.0,
            feedback: 0.0,
            mix: 1.0,
            output_db: 0.0,
            low_cut_hz: 20.0,
            hi_cut_hz: 18000.0,
            flutter_amount_ms: 0.0,
            flutter_rate_hz: 4.0,
            flutter_rand: 0.0,
            drive: 0.0,
            ..TapeDelayParams::default()
        }
    }

    #[test]
    fn empty_buffers_are_a_no_op() {
        let mut delay = TapeDelay::new();
        delay.prepare(48000.0, 64, 2);

        delay.process_block(&mut [], &TapeDelayParams::default());

        let mut empty_l: [f32; 0] = [];
        let mut empty_r: [f32; 0] = [];
        delay.process_block(&mut [&mut empty_l, &mut empty_r], &TapeDelayParams::default());
    }

    #[test]
    fn mono_impulse_echoes_once() {
        let mut delay = TapeDelay::new();
        delay.prepare(48000.0, 1024, 1);

        let mut buf = [0.0f32; 1024];
        buf[0] = 1.0;
        delay.process_block(&mut [&mut buf], &transparent_params());

        // 10 ms at 48 kHz = 480 samples
        assert!((buf[480] - 1.0).abs() < 1e-3, "echo level {}", buf[480]);
        let stray: f32 = buf
            .iter()
            .enumerate()
            .filter(|(i, _)| !(478..=482).contains(i))
            .map(|(_, s)| s.abs())
            .sum();
        assert!(stray < 1e-3, "stray energy {stray}");
    }

    #[test]
    fn prepare_resizes_for_sample_rate() {
        let mut delay = TapeDelay::new();
        delay.prepare(96000.0, 64, 2);
        assert_eq!(delay.sample_rate(), 96000.0);

        // 2 s at 96 kHz must be addressable: run a 1.9 s echo through
        let params = TapeDelayParams {
            time_ms: 1900.0,
            ..transparent_params()
        };
        let mut found = false;
        for block in 0..3000 {
            let mut l = [0.0f32; 64];
            let mut r = [0.0f32; 64];
            if block == 0 {
                l[0] = 1.0;
                r[0] = 1.0;
            }
            delay.process_block(&mut [&mut l, &mut r], &params);
            if l.iter().any(|s| s.abs() > 0.5) {
                found = true;
                break;
            }
        }
        assert!(found, "1.9 s echo should fit at 96 kHz");
    }

    #[test]
    fn reset_silences_the_tail() {
        let mut delay = TapeDelay::new();
        delay.prepare(48000.0, 512, 2);

        let params = TapeDelayParams {
            feedback: 0.9,
            ..transparent_params()
        };
        let mut l = [1.0f32; 512];
        let mut r = [1.0f32; 512];
        delay.process_block(&mut [&mut l, &mut r], &params);

        delay.reset();

        let mut l = [0.0f32; 512];
        let mut r = [0.0f32; 512];
        delay.process_block(&mut [&mut l, &mut r], &params);
        assert!(l.iter().all(|s| *s == 0.0), "reset should clear history");
        assert!(r.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn param_info_covers_all_indices() {
        let delay = TapeDelay::new();
        assert_eq!(delay.param_count(), 10);
        for i in 0..delay.param_count() {
            let desc = delay.param_info(i).expect("descriptor");
            assert!(desc.min < desc.max);
            assert!(desc.default >= desc.min && desc.default <= desc.max);
        }
        assert!(delay.param_info(10).is_none());
    }

    #[test]
    fn set_param_clamps_and_round_trips() {
        let mut delay = TapeDelay::new();
        delay.set_param(1, 5.0); // feedback, clamps to 0.95
        assert_eq!(delay.get_param(1), 0.95);
        delay.set_param(0, 250.0);
        assert_eq!(delay.get_param(0), 250.0);
        assert_eq!(delay.params().time_ms, 250.0);
        // Unknown index is ignored
        delay.set_param(42, 1.0);
    }
}
