//! Hidden-sector selection
//!
//! The set of sectors the user has switched off in the legend. Held by the
//! caller and passed into each pipeline run rather than kept as global state.

use crate::classification::IndustryId;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Insertion-ordered set of hidden top-level sector ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HiddenSectors(IndexSet<IndustryId>);

impl HiddenSectors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &IndustryId) -> bool {
        self.0.contains(id)
    }

    pub fn hide(&mut self, id: IndustryId) {
        self.0.insert(id);
    }

    pub fn show(&mut self, id: &IndustryId) {
        self.0.shift_remove(id);
    }

    /// Hide a visible sector or show a hidden one
    pub fn toggle(&mut self, id: IndustryId) {
        if !self.0.shift_remove(&id) {
            self.0.insert(id);
        }
    }

    /// Show only `id`. Isolating the sector that is already the only visible
    /// one shows everything again.
    pub fn isolate<'a>(&mut self, id: &IndustryId, all_sectors: impl IntoIterator<Item = &'a IndustryId>) {
        let all: Vec<&IndustryId> = all_sectors.into_iter().collect();
        let already_isolated = self.0.len() + 1 == all.len() && !self.0.contains(id);
        if already_isolated {
            self.0.clear();
        } else {
            self.0 = all.into_iter().filter(|s| *s != id).cloned().collect();
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndustryId> {
        self.0.iter()
    }
}

impl FromIterator<IndustryId> for HiddenSectors {
    fn from_iter<I: IntoIterator<Item = IndustryId>>(iter: I) -> Self {
        HiddenSectors(iter.into_iter().collect())
    }
}
