//! Composition aggregator
//!
//! Groups filtered rows by sector or by industry, sums each group and ranks
//! the groups by value. Groups are collected in first-appearance order and
//! then stably sorted, so ties keep their input order.

use super::{FilteredComposition, FilteredDatum};
use crate::classification::{ClassificationIndex, IndustryId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One ranked group with its share of the city total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedShare {
    pub id: IndustryId,
    pub title: String,
    pub color: String,
    pub value: u64,
    /// Unrounded `value / total`
    pub share: f64,
}

impl RankedShare {
    /// Share as a percentage rounded to two decimals, for display only
    pub fn share_percent(&self) -> f64 {
        round_percent(self.share)
    }
}

/// Convert a fraction to a percentage with two decimals
pub fn round_percent(share: f64) -> f64 {
    (share * 100.0 * 100.0).round() / 100.0
}

/// Sum filtered rows per top-level sector
pub fn aggregate_by_sector(
    composition: &FilteredComposition,
    index: &ClassificationIndex,
) -> Vec<RankedShare> {
    rank(composition, |d| &d.top_level_parent_id, |sector, _| {
        index
            .lookup(sector)
            .map(|c| c.display_name().to_string())
            .unwrap_or_default()
    })
}

/// Sum filtered rows per industry id
pub fn aggregate_by_industry(composition: &FilteredComposition) -> Vec<RankedShare> {
    rank(composition, |d| &d.id, |_, first| first.title.clone())
}

fn rank<K, T>(composition: &FilteredComposition, key: K, title: T) -> Vec<RankedShare>
where
    K: Fn(&FilteredDatum) -> &IndustryId,
    T: Fn(&IndustryId, &FilteredDatum) -> String,
{
    let mut groups: IndexMap<&IndustryId, (&FilteredDatum, u64)> = IndexMap::new();
    for datum in &composition.data {
        groups
            .entry(key(datum))
            .and_modify(|(_, sum)| *sum += datum.value)
            .or_insert((datum, datum.value));
    }

    let mut ranked: Vec<RankedShare> = groups
        .into_iter()
        .map(|(id, (first, value))| RankedShare {
            id: id.clone(),
            title: title(id, first),
            color: first.color.clone(),
            value,
            share: composition.share_of(value),
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.value.cmp(&a.value));
    ranked
}
