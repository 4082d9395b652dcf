//! Classification index
//!
//! Immutable id → classification lookup built from the reference table.

use super::types::{DigitLevel, IndustryClassification, IndustryId};
use rustc_hash::FxHashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while loading the classification table
#[derive(Error, Debug)]
pub enum ClassificationError {
    /// Reference JSON is malformed or missing a required field
    #[error("Malformed classification data: {0}")]
    Json(#[from] serde_json::Error),

    /// Reference file could not be read
    #[error("Failed to read classification data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Duplicate classification id {0}")]
    DuplicateId(IndustryId),

    #[error("Sector {id} has top-level parent {parent}, expected itself")]
    SectorParentMismatch {
        id: IndustryId,
        parent: IndustryId,
    },
}

pub type ClassificationResult<T> = Result<T, ClassificationError>;

/// Read-only classification lookup
#[derive(Debug, Clone, Default)]
pub struct ClassificationIndex {
    /// Entries in load order
    entries: Vec<IndustryClassification>,
    /// id -> position in `entries`
    by_id: FxHashMap<IndustryId, usize>,
}

impl ClassificationIndex {
    /// Build the index, validating the hierarchy invariants
    pub fn from_classifications(
        classifications: Vec<IndustryClassification>,
    ) -> ClassificationResult<Self> {
        let mut by_id =
            FxHashMap::with_capacity_and_hasher(classifications.len(), Default::default());

        for (idx, classification) in classifications.iter().enumerate() {
            if classification.is_sector()
                && classification.top_level_parent_id != classification.id
            {
                return Err(ClassificationError::SectorParentMismatch {
                    id: classification.id.clone(),
                    parent: classification.top_level_parent_id.clone(),
                });
            }
            if by_id.insert(classification.id.clone(), idx).is_some() {
                return Err(ClassificationError::DuplicateId(classification.id.clone()));
            }
        }

        debug!("Indexed {} classifications", classifications.len());

        Ok(ClassificationIndex {
            entries: classifications,
            by_id,
        })
    }

    /// Parse a JSON array of classifications
    pub fn from_json_str(json: &str) -> ClassificationResult<Self> {
        let classifications: Vec<IndustryClassification> = serde_json::from_str(json)?;
        Self::from_classifications(classifications)
    }

    /// Load a JSON array of classifications from disk
    pub fn from_json_file(path: impl AsRef<Path>) -> ClassificationResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let index = Self::from_json_str(&json)?;
        info!("Loaded {} classifications from {:?}", index.len(), path);
        Ok(index)
    }

    pub fn lookup(&self, id: &IndustryId) -> Option<&IndustryClassification> {
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }

    pub fn contains(&self, id: &IndustryId) -> bool {
        self.by_id.contains_key(id)
    }

    /// All sector-level classifications, in load order
    pub fn sectors(&self) -> impl Iterator<Item = &IndustryClassification> {
        self.at_level(DigitLevel::Sector)
    }

    pub fn at_level(&self, level: DigitLevel) -> impl Iterator<Item = &IndustryClassification> {
        self.entries.iter().filter(move |c| c.level == level)
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndustryClassification> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
