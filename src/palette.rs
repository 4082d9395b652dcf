//! Sector color palette
//!
//! Static sector id → display color table. The filtering path drops rows
//! whose sector has no color; the layout path substitutes
//! [`LOW_INTENSITY_NODE_COLOR`] instead.

use crate::classification::IndustryId;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Neutral color for industry-space nodes without a sector color
pub const LOW_INTENSITY_NODE_COLOR: &str = "#dddddd";

/// Errors raised while loading the palette
#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("Malformed sector color data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read sector color data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Duplicate color entry for sector {0}")]
    DuplicateSector(IndustryId),
}

pub type PaletteResult<T> = Result<T, PaletteError>;

/// One row of the color table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorColor {
    pub id: IndustryId,
    pub color: String,
}

/// Sector color lookup
#[derive(Debug, Clone, Default)]
pub struct SectorPalette {
    entries: Vec<SectorColor>,
    by_sector: FxHashMap<IndustryId, usize>,
}

impl SectorPalette {
    pub fn new(entries: Vec<SectorColor>) -> PaletteResult<Self> {
        let mut by_sector = FxHashMap::default();
        for (idx, entry) in entries.iter().enumerate() {
            if by_sector.insert(entry.id.clone(), idx).is_some() {
                return Err(PaletteError::DuplicateSector(entry.id.clone()));
            }
        }
        Ok(SectorPalette { entries, by_sector })
    }

    pub fn from_json_str(json: &str) -> PaletteResult<Self> {
        let entries: Vec<SectorColor> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> PaletteResult<Self> {
        let path = path.as_ref();
        let palette = Self::from_json_str(&std::fs::read_to_string(path)?)?;
        info!("Loaded {} sector colors from {:?}", palette.len(), path);
        Ok(palette)
    }

    pub fn color_for(&self, sector: &IndustryId) -> Option<&str> {
        self.by_sector
            .get(sector)
            .map(|&idx| self.entries[idx].color.as_str())
    }

    /// Color for a sector, or the neutral low-intensity color
    pub fn color_or_neutral(&self, sector: &IndustryId) -> &str {
        self.color_for(sector).unwrap_or(LOW_INTENSITY_NODE_COLOR)
    }

    /// Sector ids with a color, in table order
    pub fn sector_ids(&self) -> impl Iterator<Item = &IndustryId> {
        self.entries.iter().map(|e| &e.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
