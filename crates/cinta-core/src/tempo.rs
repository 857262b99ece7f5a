//! Musical note divisions for tempo-synced delay times.
//!
//! The engine itself consumes an absolute delay time in milliseconds; when
//! the host has sync enabled it resolves the chosen division against the
//! transport tempo *before* handing the time down. This module is that
//! resolution vocabulary.

/// Note divisions offered by the sync control, shortest to longest
/// rhythmic label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoteDivision {
    /// Whole note (4 beats)
    Whole,
    /// Half note (2 beats)
    Half,
    /// Quarter note (1 beat)
    #[default]
    Quarter,
    /// Eighth note (1/2 beat)
    Eighth,
    /// Eighth-note triplet (1/3 beat)
    EighthTriplet,
    /// Sixteenth note (1/4 beat)
    Sixteenth,
    /// Sixteenth-note triplet (1/6 beat)
    SixteenthTriplet,
    /// Thirty-second note (1/8 beat)
    ThirtySecond,
}

/// Display labels, index-aligned with [`NoteDivision::from_index`].
pub const DIVISION_LABELS: [&str; 8] = [
    "1/1", "1/2", "1/4", "1/8", "1/8T", "1/16", "1/16T", "1/32",
];

impl NoteDivision {
    /// Length of this division in beats.
    pub fn beats(&self) -> f32 {
        match self {
            NoteDivision::Whole => 4.0,
            NoteDivision::Half => 2.0,
            NoteDivision::Quarter => 1.0,
            NoteDivision::Eighth => 0.5,
            NoteDivision::EighthTriplet => 1.0 / 3.0,
            NoteDivision::Sixteenth => 0.25,
            NoteDivision::SixteenthTriplet => 1.0 / 6.0,
            NoteDivision::ThirtySecond => 0.125,
        }
    }

    /// Length of this division in milliseconds at the given tempo.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cinta_core::NoteDivision;
    ///
    /// // At 120 BPM a quarter note is 500 ms
    /// assert!((NoteDivision::Quarter.to_ms(120.0) - 500.0).abs() < 0.1);
    /// ```
    pub fn to_ms(&self, bpm: f32) -> f32 {
        let ms_per_beat = 60_000.0 / bpm;
        self.beats() * ms_per_beat
    }

    /// Repetition rate of this division in Hz at the given tempo.
    pub fn to_hz(&self, bpm: f32) -> f32 {
        let beats_per_second = bpm / 60.0;
        beats_per_second / self.beats()
    }

    /// Length of this division in samples at the given tempo and rate.
    pub fn to_samples(&self, bpm: f32, sample_rate: f32) -> f32 {
        self.to_ms(bpm) / 1000.0 * sample_rate
    }

    /// Division for a stored selector index, clamping past-the-end values
    /// to the last entry.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => NoteDivision::Whole,
            1 => NoteDivision::Half,
            2 => NoteDivision::Quarter,
            3 => NoteDivision::Eighth,
            4 => NoteDivision::EighthTriplet,
            5 => NoteDivision::Sixteenth,
            6 => NoteDivision::SixteenthTriplet,
            _ => NoteDivision::ThirtySecond,
        }
    }

    /// Selector index for this division.
    pub fn index(&self) -> usize {
        match self {
            NoteDivision::Whole => 0,
            NoteDivision::Half => 1,
            NoteDivision::Quarter => 2,
            NoteDivision::Eighth => 3,
            NoteDivision::EighthTriplet => 4,
            NoteDivision::Sixteenth => 5,
            NoteDivision::SixteenthTriplet => 6,
            NoteDivision::ThirtySecond => 7,
        }
    }
}
