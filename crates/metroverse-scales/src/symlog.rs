//! Symmetric log scale
//!
//! Inputs go through `sign(x) * ln(1 + |x| / c)` before linear
//! interpolation, so the scale stays defined at and around zero.

use super::common::{interpolate, normalize, ContinuousScale, Domain, Range};

/// Default transform constant
pub const DEFAULT_CONSTANT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymlogScale {
    domain: Domain,
    range: Range,
    constant: f64,
}

impl SymlogScale {
    pub fn new(domain: Domain, range: Range) -> Self {
        Self::with_constant(domain, range, DEFAULT_CONSTANT)
    }

    /// Build with a custom constant. The constant controls where the scale
    /// switches from roughly linear to roughly logarithmic behaviour.
    pub fn with_constant(domain: Domain, range: Range, constant: f64) -> Self {
        SymlogScale { domain, range, constant }
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    fn transform(&self, x: f64) -> f64 {
        x.signum() * (x.abs() / self.constant).ln_1p()
    }
}

impl ContinuousScale for SymlogScale {
    fn domain(&self) -> Domain {
        self.domain
    }

    fn range(&self) -> Range {
        self.range
    }

    fn apply(&self, value: f64) -> f64 {
        let t = normalize(
            self.transform(self.domain.start),
            self.transform(self.domain.end),
            self.transform(value),
        );
        interpolate(self.range.start, self.range.end, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symlog_endpoints() {
        let scale = SymlogScale::new(Domain::new(0.001, 1.0), Range::new(2.0, 8.5));
        assert_eq!(scale.apply(0.001), 2.0);
        assert_eq!(scale.apply(1.0), 8.5);
    }

    #[test]
    fn test_symlog_compresses_large_values() {
        let scale = SymlogScale::new(Domain::new(0.0, 10_000.0), Range::new(2.0, 8.5));
        let linear_position = 2.0 + 6.5 * (100.0 / 10_000.0);
        // Small values get pushed further up the range than a linear scale would.
        assert!(scale.apply(100.0) > linear_position);
        assert!(scale.apply(100.0) < scale.apply(1000.0));
    }

    #[test]
    fn test_symlog_symmetric_around_zero() {
        let scale = SymlogScale::new(Domain::new(-10.0, 10.0), Range::new(-1.0, 1.0));
        assert_eq!(scale.apply(0.0), 0.0);
        assert!((scale.apply(3.0) + scale.apply(-3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_symlog_degenerate_domain() {
        let scale = SymlogScale::new(Domain::new(1.0, 1.0), Range::new(2.0, 8.5));
        assert_eq!(scale.apply(1.0), 5.25);
    }
}
