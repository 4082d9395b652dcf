//! Comparison assembler
//!
//! Runs the filter independently for a primary and a secondary city with the
//! same parameters. Totals stay per city; no cross-city rescaling happens.

use super::aggregate::{aggregate_by_sector, RankedShare};
use super::filter::{filter_rows, FilterParams};
use super::{DisplayState, FilteredComposition, RawIndustryRow};
use crate::classification::{ClassificationIndex, IndustryId};
use crate::palette::SectorPalette;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Independent results for two cities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonPair {
    pub primary: FilteredComposition,
    pub secondary: FilteredComposition,
}

/// Both cities' values for one industry, for paired bars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedDatum {
    pub id: IndustryId,
    pub title: String,
    pub color: String,
    pub primary: Option<u64>,
    pub secondary: Option<u64>,
}

impl ComparisonPair {
    /// Empty only when both sides are empty; one empty side still renders
    pub fn display_state(&self) -> DisplayState {
        if self.primary.is_empty() && self.secondary.is_empty() {
            DisplayState::NoSectorsSelected
        } else {
            DisplayState::Ready
        }
    }

    /// Join both sides by industry id: primary order first, then ids that
    /// only the secondary city has
    pub fn aligned(&self) -> Vec<AlignedDatum> {
        let mut joined: IndexMap<&IndustryId, AlignedDatum> = IndexMap::new();

        for datum in &self.primary.data {
            let entry = joined.entry(&datum.id).or_insert_with(|| AlignedDatum {
                id: datum.id.clone(),
                title: datum.title.clone(),
                color: datum.color.clone(),
                primary: None,
                secondary: None,
            });
            entry.primary = Some(entry.primary.unwrap_or(0) + datum.value);
        }
        for datum in &self.secondary.data {
            let entry = joined.entry(&datum.id).or_insert_with(|| AlignedDatum {
                id: datum.id.clone(),
                title: datum.title.clone(),
                color: datum.color.clone(),
                primary: None,
                secondary: None,
            });
            entry.secondary = Some(entry.secondary.unwrap_or(0) + datum.value);
        }

        joined.into_values().collect()
    }

    /// Sector rankings of each side, each against its own city total
    pub fn ranked_by_sector(
        &self,
        index: &ClassificationIndex,
    ) -> (Vec<RankedShare>, Vec<RankedShare>) {
        (
            aggregate_by_sector(&self.primary, index),
            aggregate_by_sector(&self.secondary, index),
        )
    }

    pub fn primary_share(&self, datum: &AlignedDatum) -> Option<f64> {
        datum.primary.map(|v| self.primary.share_of(v))
    }

    pub fn secondary_share(&self, datum: &AlignedDatum) -> Option<f64> {
        datum.secondary.map(|v| self.secondary.share_of(v))
    }
}

/// Filter both cities' rows with shared parameters
pub fn compare_cities(
    index: &ClassificationIndex,
    palette: &SectorPalette,
    primary_rows: &[RawIndustryRow],
    secondary_rows: &[RawIndustryRow],
    params: &FilterParams,
) -> ComparisonPair {
    let primary = filter_rows(index, palette, primary_rows, params);
    let secondary = filter_rows(index, palette, secondary_rows, params);
    debug!(
        "Compared cities: primary {} rows (total {}), secondary {} rows (total {})",
        primary.len(),
        primary.total,
        secondary.len(),
        secondary.total
    );
    ComparisonPair { primary, secondary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::DigitLevel;
    use crate::composition::CompositionType;

    fn fixtures() -> (ClassificationIndex, SectorPalette) {
        let index = ClassificationIndex::from_json_str(
            r#"[
                {"id": "54", "name": "Professional Services", "level": 1, "topLevelParentId": "54"},
                {"id": "31", "name": "Manufacturing", "level": 1, "topLevelParentId": "31"},
                {"id": "44", "name": "Retail", "level": 1, "topLevelParentId": "44"}
            ]"#,
        )
        .unwrap();
        let palette = SectorPalette::from_json_str(
            r##"[{"id": "54", "color": "#ff0000"}, {"id": "31", "color": "#0000ff"}, {"id": "44", "color": "#00ff00"}]"##,
        )
        .unwrap();
        (index, palette)
    }

    #[test]
    fn test_cities_are_independent() {
        let (index, palette) = fixtures();
        let params = FilterParams::new(DigitLevel::Sector, CompositionType::Companies);
        let primary = vec![
            RawIndustryRow::new("54", Some(10), None),
            RawIndustryRow::new("31", Some(5), None),
        ];
        let secondary = vec![RawIndustryRow::new("54", Some(1000), None)];

        let pair = compare_cities(&index, &palette, &primary, &secondary, &params);
        assert_eq!(pair.primary.total, 15);
        assert_eq!(pair.secondary.total, 1000);

        let alone = filter_rows(&index, &palette, &primary, &params);
        assert_eq!(pair.primary, alone);
    }

    #[test]
    fn test_one_empty_side_still_ready() {
        let (index, palette) = fixtures();
        let params = FilterParams::new(DigitLevel::Sector, CompositionType::Companies);
        let primary = vec![RawIndustryRow::new("54", Some(10), None)];

        let pair = compare_cities(&index, &palette, &primary, &[], &params);
        assert_eq!(pair.display_state(), DisplayState::Ready);

        let pair = compare_cities(&index, &palette, &[], &[], &params);
        assert_eq!(pair.display_state(), DisplayState::NoSectorsSelected);
    }

    #[test]
    fn test_aligned_join() {
        let (index, palette) = fixtures();
        let params = FilterParams::new(DigitLevel::Sector, CompositionType::Employees);
        let primary = vec![
            RawIndustryRow::new("31", None, Some(30)),
            RawIndustryRow::new("54", None, Some(10)),
        ];
        let secondary = vec![
            RawIndustryRow::new("44", None, Some(4)),
            RawIndustryRow::new("54", None, Some(16)),
        ];

        let pair = compare_cities(&index, &palette, &primary, &secondary, &params);
        let aligned = pair.aligned();

        let ids: Vec<&str> = aligned.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["31", "54", "44"]);
        assert_eq!(aligned[0].secondary, None);
        assert_eq!(aligned[1].primary, Some(10));
        assert_eq!(aligned[1].secondary, Some(16));
        assert_eq!(aligned[2].primary, None);

        assert_eq!(pair.primary_share(&aligned[1]), Some(0.25));
        assert_eq!(pair.secondary_share(&aligned[1]), Some(0.8));
        assert_eq!(pair.primary_share(&aligned[2]), None);
    }

    #[test]
    fn test_sector_rankings_per_side() {
        let (index, palette) = fixtures();
        let params = FilterParams::new(DigitLevel::Sector, CompositionType::Companies);
        let primary = vec![
            RawIndustryRow::new("31", Some(10), None),
            RawIndustryRow::new("54", Some(30), None),
        ];
        let secondary = vec![
            RawIndustryRow::new("54", Some(1), None),
            RawIndustryRow::new("44", Some(3), None),
        ];

        let pair = compare_cities(&index, &palette, &primary, &secondary, &params);
        let (first, second) = pair.ranked_by_sector(&index);

        let ids = |ranked: &[RankedShare]| -> Vec<String> {
            ranked.iter().map(|r| r.id.to_string()).collect()
        };
        assert_eq!(ids(&first), vec!["54", "31"]);
        assert_eq!(ids(&second), vec!["44", "54"]);
        assert_eq!(first[0].share, 0.75);
        assert_eq!(second[0].share, 0.75);
        assert_eq!(second[1].title, "Professional Services");
    }
}
