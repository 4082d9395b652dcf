//! Narrative summary
//!
//! Picks the two largest sectors of a city and the largest three-digit
//! industry inside each, with shares of the sector-level total. Used for the
//! composition side text, so it describes the whole city: the palette and
//! hidden sectors do not apply here.

use super::aggregate::round_percent;
use super::{CompositionType, RawIndustryRow};
use crate::classification::{ClassificationIndex, DigitLevel, IndustryId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryHighlight {
    pub id: IndustryId,
    pub name: String,
    pub count: u64,
    pub share_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorHighlight {
    pub id: IndustryId,
    pub name: String,
    pub count: u64,
    pub share_percent: f64,
    /// Largest three-digit industry in this sector, if the city has any
    pub top_industry: Option<IndustryHighlight>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionSummary {
    pub metric: CompositionType,
    pub total: u64,
    pub largest: SectorHighlight,
    pub second: SectorHighlight,
}

struct Entry<'a> {
    id: &'a IndustryId,
    name: &'a str,
    sector: &'a IndustryId,
    count: u64,
}

/// Summarize a city's rows; `None` when fewer than two sectors are present
pub fn summarize_composition(
    index: &ClassificationIndex,
    rows: &[RawIndustryRow],
    metric: CompositionType,
) -> Option<CompositionSummary> {
    let mut total: u64 = 0;
    let mut sectors: Vec<Entry> = Vec::new();
    let mut three_digit: Vec<Entry> = Vec::new();

    for row in rows {
        let Some(industry) = index.lookup(&row.industry_id) else {
            continue;
        };
        let count = row.count(metric);
        let entry = Entry {
            id: &industry.id,
            name: industry.display_name(),
            sector: &industry.top_level_parent_id,
            count,
        };
        match industry.level {
            DigitLevel::Sector => {
                total += count;
                sectors.push(entry);
            }
            DigitLevel::Three => three_digit.push(entry),
            _ => {}
        }
    }

    sectors.sort_by(|a, b| b.count.cmp(&a.count));
    three_digit.sort_by(|a, b| b.count.cmp(&a.count));

    let highlight = |sector: &Entry| SectorHighlight {
        id: sector.id.clone(),
        name: sector.name.to_string(),
        count: sector.count,
        share_percent: percent(sector.count, total),
        top_industry: three_digit
            .iter()
            .find(|industry| industry.sector == sector.id)
            .map(|industry| IndustryHighlight {
                id: industry.id.clone(),
                name: industry.name.to_string(),
                count: industry.count,
                share_percent: percent(industry.count, total),
            }),
    };

    let largest = highlight(sectors.first()?);
    let second = highlight(sectors.get(1)?);

    Some(CompositionSummary {
        metric,
        total,
        largest,
        second,
    })
}

fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        round_percent(count as f64 / total as f64)
    }
}
