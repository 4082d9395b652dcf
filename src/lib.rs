//! Metroverse derived industry metrics
//!
//! Turns raw per-city industry rows into chart-ready datasets for the city
//! economy explorer: tree map and bar chart compositions, two-city
//! comparisons, narrative highlights and the industry space layout.
//!
//! # Architecture
//!
//! Reference data is loaded once and shared read-only:
//! - [`ClassificationIndex`]: industry id → name, digit level, sector
//! - [`SectorPalette`]: sector id → display color
//! - [`StaticLayout`] and [`GlobalIndustryAggregates`]: the industry space graph
//!   and global per-industry sums
//!
//! Every computation over that data is a pure function of its inputs. UI
//! state (hidden sectors, digit level, metric) travels in explicit
//! parameters ([`FilterParams`], [`ViewSettings`], [`HiddenSectors`]).
//!
//! ## Example Usage
//!
//! ```rust
//! use metroverse::{
//!     aggregate_by_sector, filter_rows, ClassificationIndex, CompositionType, DigitLevel,
//!     FilterParams, RawIndustryRow, SectorPalette,
//! };
//!
//! let index = ClassificationIndex::from_json_str(r#"[
//!     {"id": "54", "name": "Professional Services", "level": 1, "topLevelParentId": "54"},
//!     {"id": "31", "name": "Manufacturing", "level": 1, "topLevelParentId": "31"}
//! ]"#).unwrap();
//! let palette = SectorPalette::from_json_str(
//!     r##"[{"id": "54", "color": "#ff0000"}, {"id": "31", "color": "#0000ff"}]"##,
//! ).unwrap();
//!
//! let rows = vec![
//!     RawIndustryRow::new("54", Some(120), Some(4500)),
//!     RawIndustryRow::new("31", Some(40), None),
//! ];
//! let params = FilterParams::new(DigitLevel::Sector, CompositionType::Companies);
//!
//! let composition = filter_rows(&index, &palette, &rows, &params);
//! assert_eq!(composition.total, 160);
//!
//! let ranked = aggregate_by_sector(&composition, &index);
//! assert_eq!(ranked[0].title, "Professional Services");
//! assert_eq!(ranked[0].share_percent(), 75.0);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod classification;
pub mod composition;
pub mod layout;
pub mod palette;
pub mod selection;
pub mod settings;

// Re-export main types for convenience
pub use classification::{
    ClassificationError, ClassificationIndex, ClassificationResult, DigitLevel,
    IndustryClassification, IndustryId,
};

pub use composition::{
    aggregate_by_industry, aggregate_by_sector, compare_cities, filter_rows,
    summarize_composition, AlignedDatum, ComparisonPair, CompositionSummary, CompositionType,
    DisplayState, FilterParams, FilteredComposition, FilteredDatum, RankedShare, RawIndustryRow,
};

pub use layout::{
    GlobalIndustryAggregates, IndustrySpaceLayout, LayoutError, LayoutMapper, LayoutNode,
    LayoutResult, RadiusBounds, RadiusScaleKind, RadiusScales, SpaceView, StaticLayout,
};

pub use palette::{PaletteError, SectorPalette, LOW_INTENSITY_NODE_COLOR};
pub use selection::HiddenSectors;
pub use settings::{ClusterMode, NodeSizing, SettingsError, ViewSettings};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
