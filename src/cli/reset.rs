use crate::models::AttendanceState;
use crate::state::StateStore;
use crate::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// Discard the round in progress
pub fn run(data_file: &Path) -> Result<()> {
    let store = StateStore::new(data_file);
    store
        .save(&AttendanceState::new())
        .with_context(|| format!("Failed to reset {}", data_file.display()))?;

    tracing::info!(path = %data_file.display(), "State reset");
    println!("{}", "✓ All groups are pending again".green());
    Ok(())
}
