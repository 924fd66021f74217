//! Attendance state persistence
//!
//! The round in progress is kept in a single flat JSON file:
//! - Loading never fails; a missing or corrupt file starts a fresh round
//! - Saving replaces the file atomically

mod store;

pub use store::{StateStore, StoreError, StoreResult, DEFAULT_DATA_FILE};
