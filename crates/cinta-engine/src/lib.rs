//! Cinta Engine - analog tape-style feedback delay
//!
//! The per-sample processing engine of a vintage tape echo: a fractional
//! delay line with feedback-path filtering and saturation, pitch
//! "flutter" modulation, and smoothed parameter automation, numerically
//! stable under continuous real-time parameter changes.
//!
//! - [`TapeDelay`] - the engine: `prepare` / `reset` / `process_block`
//! - [`TapeDelayParams`] - per-block parameter snapshot with defensive
//!   clamping and host-side tempo sync resolution
//! - [`Flutter`] - the wow/flutter modulation generator
//!
//! ## Example
//!
//! ```rust
//! use cinta_engine::{TapeDelay, TapeDelayParams};
//!
//! let mut delay = TapeDelay::new();
//! delay.prepare(48000.0, 512, 2);
//!
//! let params = TapeDelayParams {
//!     time_ms: 350.0,
//!     feedback: 0.45,
//!     mix: 0.3,
//!     ..TapeDelayParams::default()
//! };
//!
//! let mut left = [0.0f32; 512];
//! let mut right = [0.0f32; 512];
//! delay.process_block(&mut [&mut left, &mut right], &params);
//! ```
//!
//! ## Real-time contract
//!
//! `process_block` never allocates, locks, or blocks; it reads a single
//! parameter snapshot per block and runs to completion over the buffer's
//! full sample count. Allocation happens only in `prepare`.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod flutter;
pub mod params;
pub mod tape_delay;

// Re-export main types at crate root
pub use flutter::Flutter;
pub use params::TapeDelayParams;
pub use tape_delay::TapeDelay;
