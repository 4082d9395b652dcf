//! Shared pieces of the continuous scales
//!
//! A continuous scale normalizes an input against its domain (after an
//! optional transform) and interpolates the result into its output range.

/// Input extent of a scale: `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Domain {
    pub start: f64,
    pub end: f64,
}

impl Domain {
    pub fn new(start: f64, end: f64) -> Self {
        Domain { start, end }
    }

    /// True when both endpoints coincide and every input normalizes to the midpoint
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// Output extent of a scale: `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub start: f64,
    pub end: f64,
}

impl Range {
    pub fn new(start: f64, end: f64) -> Self {
        Range { start, end }
    }

    pub fn midpoint(&self) -> f64 {
        interpolate(self.start, self.end, 0.5)
    }
}

/// A scale mapping a continuous input domain onto a continuous output range
pub trait ContinuousScale {
    fn domain(&self) -> Domain;
    fn range(&self) -> Range;

    /// Map a domain value into the range. Values outside the domain are
    /// extrapolated, not clamped.
    fn apply(&self, value: f64) -> f64;
}

/// Position of `x` within `[a, b]` as a fraction; `0.5` for an empty interval
pub(crate) fn normalize(a: f64, b: f64, x: f64) -> f64 {
    let width = b - a;
    if width == 0.0 {
        0.5
    } else {
        (x - a) / width
    }
}

/// Blend `a` and `b`; `t == 0` yields `a` and `t == 1` yields `b` exactly
pub(crate) fn interpolate(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}
