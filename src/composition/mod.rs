//! Economic composition pipeline
//!
//! Raw per-city industry rows flow through:
//! - `filter`: classification/level/palette/hidden-sector filtering and null
//!   normalization, producing a [`FilteredComposition`]
//! - `aggregate`: grouping into ranked shares by sector or industry
//! - `compare`: the same pipeline run independently for two cities
//! - `narrative`: largest-sector highlights for side text
//!
//! Every function here is pure; callers re-run it whenever an input changes.

pub mod aggregate;
pub mod compare;
pub mod filter;
pub mod narrative;

pub use aggregate::{aggregate_by_industry, aggregate_by_sector, round_percent, RankedShare};
pub use compare::{compare_cities, AlignedDatum, ComparisonPair};
pub use filter::{filter_rows, FilterParams};
pub use narrative::{summarize_composition, CompositionSummary, IndustryHighlight, SectorHighlight};

use crate::classification::IndustryId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One city/industry/year row as returned by the data API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIndustryRow {
    #[serde(alias = "naicsId")]
    pub industry_id: IndustryId,
    #[serde(default)]
    pub num_company: Option<u64>,
    #[serde(default)]
    pub num_employ: Option<u64>,
}

impl RawIndustryRow {
    pub fn new(
        industry_id: impl Into<IndustryId>,
        num_company: Option<u64>,
        num_employ: Option<u64>,
    ) -> Self {
        RawIndustryRow {
            industry_id: industry_id.into(),
            num_company,
            num_employ,
        }
    }

    /// Count for the selected metric, with nulls read as zero
    pub fn count(&self, metric: CompositionType) -> u64 {
        match metric {
            CompositionType::Companies => self.num_company.unwrap_or(0),
            CompositionType::Employees => self.num_employ.unwrap_or(0),
        }
    }
}

/// Unknown composition type name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown composition type: {0}")]
pub struct InvalidCompositionType(pub String);

/// Metric axis: number of companies or number of employees
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositionType {
    Companies,
    #[default]
    Employees,
}

impl FromStr for CompositionType {
    type Err = InvalidCompositionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "companies" => Ok(CompositionType::Companies),
            "employees" => Ok(CompositionType::Employees),
            _ => Err(InvalidCompositionType(s.to_string())),
        }
    }
}

impl CompositionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompositionType::Companies => "companies",
            CompositionType::Employees => "employees",
        }
    }
}

impl fmt::Display for CompositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row that survived filtering, ready for chart rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredDatum {
    pub id: IndustryId,
    pub value: u64,
    pub title: String,
    pub top_level_parent_id: IndustryId,
    pub color: String,
}

/// What the caller should show for a computed dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    /// Every row was filtered out; render the "no sectors selected" message
    NoSectorsSelected,
    Ready,
}

/// Filtered rows for one city plus their total
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredComposition {
    pub data: Vec<FilteredDatum>,
    pub total: u64,
}

impl FilteredComposition {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn display_state(&self) -> DisplayState {
        if self.is_empty() {
            DisplayState::NoSectorsSelected
        } else {
            DisplayState::Ready
        }
    }

    /// Fraction of the total; 0 when the total is 0
    pub fn share_of(&self, value: u64) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            value as f64 / self.total as f64
        }
    }

    pub fn get(&self, id: &IndustryId) -> Option<&FilteredDatum> {
        self.data.iter().find(|d| &d.id == id)
    }
}
