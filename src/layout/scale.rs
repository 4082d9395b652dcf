//! Radius scales for industry-space nodes

use super::GlobalMinMax;
use crate::composition::CompositionType;
use metroverse_scales::{ContinuousScale, Domain, LinearScale, Range, SymlogScale};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MIN: f64 = 0.001;
pub const DEFAULT_MAX: f64 = 1.0;

/// Pixel radius range of the linear scale
pub const LINEAR_RADIUS_RANGE: (f64, f64) = (5.0, 15.0);
/// Pixel radius range of the symlog scale
pub const LOG_RADIUS_RANGE: (f64, f64) = (2.0, 8.5);

/// Domain of the radius scales
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for RadiusBounds {
    fn default() -> Self {
        RadiusBounds {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
        }
    }
}

impl RadiusBounds {
    /// Bounds of the global sums for one metric; an absent, zero or
    /// non-finite bound falls back to its default
    pub fn from_min_max(min_max: Option<&GlobalMinMax>, metric: CompositionType) -> Self {
        match (min_max, metric) {
            (None, _) => Self::from_extent(None, None),
            (Some(m), CompositionType::Companies) => {
                Self::from_extent(m.min_sum_num_company, m.max_sum_num_company)
            }
            (Some(m), CompositionType::Employees) => {
                Self::from_extent(m.min_sum_num_employ, m.max_sum_num_employ)
            }
        }
    }

    /// Extent of observed values, with the same fallbacks
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let (mut min, mut max) = (None::<f64>, None::<f64>);
        for v in values.into_iter().filter(|v| v.is_finite()) {
            min = Some(min.map_or(v, |m| m.min(v)));
            max = Some(max.map_or(v, |m| m.max(v)));
        }
        Self::from_extent(min, max)
    }

    fn from_extent(min: Option<f64>, max: Option<f64>) -> Self {
        let usable = |v: Option<f64>| v.filter(|v| v.is_finite() && *v != 0.0);
        RadiusBounds {
            min: usable(min).unwrap_or(DEFAULT_MIN),
            max: usable(max).unwrap_or(DEFAULT_MAX),
        }
    }
}

/// Which radius scale a caller renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiusScaleKind {
    Linear,
    Log,
}

impl FromStr for RadiusScaleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(RadiusScaleKind::Linear),
            "log" | "symlog" => Ok(RadiusScaleKind::Log),
            other => Err(format!("unknown radius scale: {}", other)),
        }
    }
}

impl fmt::Display for RadiusScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RadiusScaleKind::Linear => write!(f, "linear"),
            RadiusScaleKind::Log => write!(f, "log"),
        }
    }
}

/// Both radius scales built over the same bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusScales {
    pub bounds: RadiusBounds,
    pub linear: LinearScale,
    pub log: SymlogScale,
}

impl RadiusScales {
    pub fn new(bounds: RadiusBounds) -> Self {
        let domain = Domain::new(bounds.min, bounds.max);
        RadiusScales {
            bounds,
            linear: LinearScale::new(
                domain,
                Range::new(LINEAR_RADIUS_RANGE.0, LINEAR_RADIUS_RANGE.1),
            ),
            log: SymlogScale::new(domain, Range::new(LOG_RADIUS_RANGE.0, LOG_RADIUS_RANGE.1)),
        }
    }

    pub fn apply(&self, kind: RadiusScaleKind, value: f64) -> f64 {
        match kind {
            RadiusScaleKind::Linear => self.linear.apply(value),
            RadiusScaleKind::Log => self.log.apply(value),
        }
    }

    /// Fixed radius for uniform sizing: the middle of the chosen range
    pub fn uniform(&self, kind: RadiusScaleKind) -> f64 {
        match kind {
            RadiusScaleKind::Linear => self.linear.range().midpoint(),
            RadiusScaleKind::Log => self.log.range().midpoint(),
        }
    }
}

impl Default for RadiusScales {
    fn default() -> Self {
        Self::new(RadiusBounds::default())
    }
}
