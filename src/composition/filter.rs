//! Row filter/normalizer
//!
//! Resolves each raw row through the classification index and keeps only
//! rows at the requested digit level whose sector has a palette color and
//! is not hidden. Input order is preserved; no sorting happens here.

use super::{CompositionType, FilteredComposition, FilteredDatum, RawIndustryRow};
use crate::classification::{ClassificationIndex, DigitLevel};
use crate::palette::SectorPalette;
use crate::selection::HiddenSectors;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters shared by every city in one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    pub digit_level: DigitLevel,
    pub metric: CompositionType,
    #[serde(default)]
    pub hidden_sectors: HiddenSectors,
}

impl FilterParams {
    pub fn new(digit_level: DigitLevel, metric: CompositionType) -> Self {
        FilterParams {
            digit_level,
            metric,
            hidden_sectors: HiddenSectors::new(),
        }
    }

    pub fn with_hidden_sectors(mut self, hidden_sectors: HiddenSectors) -> Self {
        self.hidden_sectors = hidden_sectors;
        self
    }
}

/// Filter one city's rows and total them in a single pass
pub fn filter_rows(
    index: &ClassificationIndex,
    palette: &SectorPalette,
    rows: &[RawIndustryRow],
    params: &FilterParams,
) -> FilteredComposition {
    let mut data = Vec::new();
    let mut total: u64 = 0;

    for row in rows {
        let Some(industry) = index.lookup(&row.industry_id) else {
            continue;
        };
        if industry.level != params.digit_level {
            continue;
        }
        // Rows whose sector has no color are excluded outright.
        let Some(color) = palette.color_for(&industry.top_level_parent_id) else {
            continue;
        };
        if params.hidden_sectors.contains(&industry.top_level_parent_id) {
            continue;
        }

        let value = row.count(params.metric);
        total += value;
        data.push(FilteredDatum {
            id: row.industry_id.clone(),
            value,
            title: industry.display_name().to_string(),
            top_level_parent_id: industry.top_level_parent_id.clone(),
            color: color.to_string(),
        });
    }

    debug!(
        "Filtered {} of {} rows at {} level, total {} {}",
        data.len(),
        rows.len(),
        params.digit_level,
        total,
        params.metric
    );

    FilteredComposition { data, total }
}
