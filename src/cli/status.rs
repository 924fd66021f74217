use crate::models::{AttendanceState, GroupStatus, GROUP_COUNT};
use crate::state::StateStore;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Print the persisted round without contacting Telegram
pub fn run(data_file: &Path, json: bool) -> Result<()> {
    let store = StateStore::new(data_file);

    // Unlike the bot, report a corrupt file instead of silently resetting it
    let state = match store.try_load() {
        Ok(state) => state.unwrap_or_default(),
        Err(e) => {
            if json {
                println!("{}", serde_json::json!({ "error": e.to_string() }));
            } else {
                println!("{}", format!("State file is unreadable: {}", e).red());
            }
            return Ok(());
        }
    };

    if json {
        println!("{}", render_json(&state)?);
        return Ok(());
    }

    println!(
        "{}",
        format!("Attendance round: {}", data_file.display()).cyan().bold()
    );
    println!();

    for (group, value) in state.iter() {
        match GroupStatus::from(value) {
            GroupStatus::Pending => println!("   Grupo {}: {}", group, "❌ pendiente".yellow()),
            GroupStatus::Reported(count) => {
                println!("   Grupo {}: {}", group, format!("✅ {}", count).green())
            }
        }
    }

    println!();
    println!("   Reported:  {}/{}", state.reported(), GROUP_COUNT);

    Ok(())
}

fn render_json(state: &AttendanceState) -> Result<String> {
    let value = serde_json::json!({
        "groups": state,
        "reported": state.reported(),
        "complete": state.is_complete(),
    });
    Ok(serde_json::to_string(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GroupId;

    #[test]
    fn test_render_json() {
        let mut state = AttendanceState::new();
        state.record(GroupId::new(1).unwrap(), 4);

        let rendered: serde_json::Value = serde_json::from_str(&render_json(&state).unwrap()).unwrap();
        assert_eq!(rendered["groups"]["1"], 4);
        assert!(rendered["groups"]["2"].is_null());
        assert_eq!(rendered["reported"], 1);
        assert_eq!(rendered["complete"], false);
    }

    #[test]
    fn test_run_on_missing_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        assert!(run(&temp_dir.path().join("data.json"), true).is_ok());
    }
}
