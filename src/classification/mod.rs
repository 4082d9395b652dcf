//! Industry classification reference data
//!
//! The classification table is loaded once at start-up and shared read-only
//! by every downstream computation. Lookups are by industry id in O(1).

pub mod index;
pub mod types;

pub use index::{ClassificationError, ClassificationIndex, ClassificationResult};
pub use types::{DigitLevel, IndustryClassification, IndustryId, InvalidDigitLevel};
