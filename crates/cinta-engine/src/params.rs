//! The per-block parameter snapshot.
//!
//! The engine never reads live parameter storage: whoever owns the
//! controls (a plugin host, an automation lane, a UI thread) captures one
//! [`TapeDelayParams`] value per block and hands it to
//! [`TapeDelay::process_block`](crate::TapeDelay::process_block). The
//! snapshot is a plain `Copy` struct, so capturing it is a handful of
//! loads with no locking on the audio thread.
//!
//! Every field has a hard range; [`clamped`](TapeDelayParams::clamped)
//! produces an in-range copy and the engine applies it on every block, so
//! hosts that skip validation still cannot drive the engine out of its
//! safe operating region.

use cinta_core::NoteDivision;

/// Valid range of the delay time control, in milliseconds.
pub const TIME_MS_RANGE: (f32, f32) = (1.0, 2000.0);
/// Valid range of the feedback gain control.
pub const FEEDBACK_RANGE: (f32, f32) = (0.0, 0.95);
/// Valid range of the dry/wet mix control.
pub const MIX_RANGE: (f32, f32) = (0.0, 1.0);
/// Valid range of the output level control, in decibels.
pub const OUTPUT_DB_RANGE: (f32, f32) = (-12.0, 12.0);
/// Valid range of the low-cut (high-pass) cutoff, in Hz.
pub const LOW_CUT_HZ_RANGE: (f32, f32) = (20.0, 1000.0);
/// Valid range of the hi-cut (low-pass) cutoff, in Hz.
pub const HI_CUT_HZ_RANGE: (f32, f32) = (1500.0, 18000.0);
/// Valid range of the flutter depth control, in milliseconds.
pub const FLUTTER_AMOUNT_MS_RANGE: (f32, f32) = (0.0, 2.0);
/// Valid range of the flutter rate control, in Hz.
pub const FLUTTER_RATE_HZ_RANGE: (f32, f32) = (0.1, 8.0);
/// Valid range of the flutter randomness control.
pub const FLUTTER_RAND_RANGE: (f32, f32) = (0.0, 1.0);
/// Valid range of the drive control.
pub const DRIVE_RANGE: (f32, f32) = (0.0, 1.0);

/// One block's worth of control values.
///
/// `sync_on` and `sync_division` are carried for the host's benefit; the
/// engine ignores them and always uses `time_ms` as given. A host with
/// transport information resolves them through
/// [`resolved_time_ms`](Self::resolved_time_ms) before filling `time_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapeDelayParams {
    /// Delay time in milliseconds, [1, 2000]
    pub time_ms: f32,
    /// Tempo sync enable (host-side; not consulted by the engine)
    pub sync_on: bool,
    /// Tempo sync division selector index (host-side)
    pub sync_division: usize,

    /// Feedback gain, [0, 0.95]
    pub feedback: f32,
    /// Dry/wet mix, [0, 1]
    pub mix: f32,
    /// Output level in dB, [-12, 12]
    pub output_db: f32,
    /// Feedback low-cut (high-pass) cutoff in Hz, [20, 1000]
    pub low_cut_hz: f32,
    /// Feedback hi-cut (low-pass) cutoff in Hz, [1500, 18000]
    pub hi_cut_hz: f32,

    /// Flutter depth in milliseconds, [0, 2]
    pub flutter_amount_ms: f32,
    /// Flutter rate in Hz, [0.1, 8]
    pub flutter_rate_hz: f32,
    /// Flutter randomness (drift contribution), [0, 1]
    pub flutter_rand: f32,

    /// Feedback saturation drive, [0, 1]
    pub drive: f32,
}

impl Default for TapeDelayParams {
    fn default() -> Self {
        Self {
            time_ms: 400.0,
            sync_on: false,
            sync_division: NoteDivision::Quarter.index(),
            feedback: 0.4,
            mix: 0.25,
            output_db: 0.0,
            low_cut_hz: 120.0,
            hi_cut_hz: 7000.0,
            flutter_amount_ms: 0.3,
            flutter_rate_hz: 4.0,
            flutter_rand: 0.25,
            drive: 0.2,
        }
    }
}

impl TapeDelayParams {
    /// A copy with every field clamped into its valid range.
    pub fn clamped(&self) -> Self {
        Self {
            time_ms: self.time_ms.clamp(TIME_MS_RANGE.0, TIME_MS_RANGE.1),
            sync_on: self.sync_on,
            sync_division: self.sync_division.min(cinta_core::DIVISION_LABELS.len() - 1),
            feedback: self.feedback.clamp(FEEDBACK_RANGE.0, FEEDBACK_RANGE.1),
            mix: self.mix.clamp(MIX_RANGE.0, MIX_RANGE.1),
            output_db: self.output_db.clamp(OUTPUT_DB_RANGE.0, OUTPUT_DB_RANGE.1),
            low_cut_hz: self.low_cut_hz.clamp(LOW_CUT_HZ_RANGE.0, LOW_CUT_HZ_RANGE.1),
            hi_cut_hz: self.hi_cut_hz.clamp(HI_CUT_HZ_RANGE.0, HI_CUT_HZ_RANGE.1),
            flutter_amount_ms: self
                .flutter_amount_ms
                .clamp(FLUTTER_AMOUNT_MS_RANGE.0, FLUTTER_AMOUNT_MS_RANGE.1),
            flutter_rate_hz: self
                .flutter_rate_hz
                .clamp(FLUTTER_RATE_HZ_RANGE.0, FLUTTER_RATE_HZ_RANGE.1),
            flutter_rand: self
                .flutter_rand
                .clamp(FLUTTER_RAND_RANGE.0, FLUTTER_RAND_RANGE.1),
            drive: self.drive.clamp(DRIVE_RANGE.0, DRIVE_RANGE.1),
        }
    }

    /// The delay time the host should hand down, resolving tempo sync.
    ///
    /// With `sync_on` the selected [`NoteDivision`] is evaluated at `bpm`
    /// and clamped into the time control's range; otherwise `time_ms` is
    /// returned unchanged. The engine itself never calls this — it is the
    /// host-side half of the sync feature.
    pub fn resolved_time_ms(&self, bpm: f32) -> f32 {
        if self.sync_on {
            NoteDivision::from_index(self.sync_division)
                .to_ms(bpm)
                .clamp(TIME_MS_RANGE.0, TIME_MS_RANGE.1)
        } else {
            self.time_ms
        }
    }
}
