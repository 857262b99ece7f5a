//! Cinta Core - DSP primitives for the cinta tape delay engine
//!
//! The foundational building blocks the delay engine is assembled from,
//! designed for real-time audio processing with zero allocation in the
//! audio path.
//!
//! # Building Blocks
//!
//! ## Parameter Smoothing
//!
//! - [`SmoothedParam`] - Exponential (one-pole) smoothing for click-free
//!   parameter automation
//!
//! ## Delay
//!
//! - [`FractionalDelay`] - Circular-buffer delay line with cubic
//!   interpolated reads at continuously variable, non-integer offsets
//!
//! ## Filtering
//!
//! - [`StateVariableFilter`] - Topology-preserving two-pole SVF with
//!   lowpass and highpass outputs
//!
//! ## Modulation
//!
//! - [`Lfo`] - Phase-accumulating sine oscillator
//! - [`WhiteNoise`] - Allocation-free uniform noise source
//!
//! ## Utilities
//!
//! - Level/shaping math: [`db_to_linear`], [`saturate`], [`wet_dry_mix`], etc.
//! - [`fast_tan`] for cheap filter coefficient computation
//! - [`NoteDivision`] for host-side tempo sync resolution
//! - [`ParameterInfo`] vocabulary for generic parameter access
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! cinta-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: allocation only at construction, never while
//!   processing
//! - **No dependency on std**: `libm` for transcendentals
//! - **Defensive clamping**: every range-sensitive input is clamped at the
//!   point of use instead of reported as an error

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod delay;
pub mod effect;
pub mod fast_math;
pub mod lfo;
pub mod math;
pub mod noise;
pub mod param;
pub mod param_info;
pub mod svf;
pub mod tempo;

// Re-export main types at crate root
pub use delay::FractionalDelay;
pub use effect::Effect;
pub use fast_math::fast_tan;
pub use lfo::Lfo;
pub use math::{
    db_to_linear, flush_denormal, linear_to_db, ms_to_samples, samples_to_ms, saturate,
    wet_dry_mix,
};
pub use noise::WhiteNoise;
pub use param::SmoothedParam;
pub use param_info::{ParamDescriptor, ParamUnit, ParameterInfo};
pub use svf::{StateVariableFilter, SvfOutput};
pub use tempo::{DIVISION_LABELS, NoteDivision};
