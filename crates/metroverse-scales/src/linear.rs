//! Linear scale

use super::common::{interpolate, normalize, ContinuousScale, Domain, Range};

/// `y = range.start + (x - domain.start) / (domain.end - domain.start) * span`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearScale {
    domain: Domain,
    range: Range,
}

impl LinearScale {
    pub fn new(domain: Domain, range: Range) -> Self {
        LinearScale { domain, range }
    }

    /// Inverse mapping from the range back into the domain
    pub fn invert(&self, value: f64) -> f64 {
        let t = normalize(self.range.start, self.range.end, value);
        interpolate(self.domain.start, self.domain.end, t)
    }
}

impl ContinuousScale for LinearScale {
    fn domain(&self) -> Domain {
        self.domain
    }

    fn range(&self) -> Range {
        self.range
    }

    fn apply(&self, value: f64) -> f64 {
        let t = normalize(self.domain.start, self.domain.end, value);
        interpolate(self.range.start, self.range.end, t)
    }
}
