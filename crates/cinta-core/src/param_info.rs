//! Parameter introspection for generic host access.
//!
//! The engine's parameters are owned by an external collaborator (a
//! plugin host, a controller mapping, a preset system). [`ParameterInfo`]
//! gives that collaborator a uniform, index-based view: how many
//! parameters exist, their display metadata and ranges, and get/set by
//! index. The engine's own processing never goes through this trait — it
//! consumes a value snapshot per block.

/// Display unit of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamUnit {
    /// Unitless scalar
    #[default]
    None,
    /// Milliseconds
    Milliseconds,
    /// Hertz
    Hertz,
    /// Decibels
    Decibels,
    /// Percentage (0-100)
    Percent,
}

/// Static metadata describing one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full display name, e.g. "Low Cut"
    pub name: &'static str,
    /// Abbreviated name for small displays
    pub short_name: &'static str,
    /// Display unit
    pub unit: ParamUnit,
    /// Minimum plain value
    pub min: f32,
    /// Maximum plain value
    pub max: f32,
    /// Default plain value
    pub default: f32,
    /// Suggested UI step size
    pub step: f32,
}

impl ParamDescriptor {
    /// Clamp a plain value into this parameter's range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Index-based parameter discovery and access.
///
/// Indices are stable for the lifetime of the type. `set_param` accepts
/// any plain value and clamps into range; `get_param` returns the plain
/// value last set (or the default).
pub trait ParameterInfo {
    /// Number of parameters exposed.
    fn param_count(&self) -> usize;

    /// Metadata for the parameter at `index`, or `None` past the end.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Plain value of the parameter at `index` (0.0 past the end).
    fn get_param(&self, index: usize) -> f32;

    /// Set the parameter at `index` from a plain value. Out-of-range
    /// values are clamped; out-of-range indices are ignored.
    fn set_param(&mut self, index: usize, value: f32);
}
