//! Reply texts sent back to users

use super::parse::Report;
use crate::models::{AttendanceState, GroupStatus, Summary};
use crate::transport::ChatId;
use std::fmt::Write;

pub const HELP: &str = "Bot de asistencia listo.\n\
Comandos:\n\
/asistencia <grupo> <número>  — reportar asistentes por Zoom (grupos 1-6)\n\
/estado  — ver quién ya reportó\n\
/help — muestra esto\n\n\
Ejemplo: /asistencia 3 12";

pub const BROADCAST_FAILED: &str = "⚠️ Falló el envío del reporte al chat final (ver logs).";

pub fn acknowledgment(report: &Report) -> String {
    format!(
        "✅ Grupo {} reportó {} asistentes por Zoom.",
        report.group, report.count
    )
}

/// Round summary, formatted as Telegram Markdown
pub fn summary(summary: &Summary) -> String {
    let mut text = String::from("📊 *Resumen de asistencia por Zoom*\n\n");
    for (group, count) in &summary.counts {
        let _ = writeln!(text, "Grupo {group}: {count}");
    }
    let _ = write!(text, "\n-------------------\n✅ *Total:* {}", summary.total);
    text
}

pub fn status(state: &AttendanceState) -> String {
    let mut text = String::from("📌 Estado actual de reportes:\n");
    for (group, value) in state.iter() {
        let _ = match GroupStatus::from(value) {
            GroupStatus::Pending => writeln!(text, "Grupo {group}: ❌ pendiente"),
            GroupStatus::Reported(count) => writeln!(text, "Grupo {group}: ✅ {count} asistentes"),
        };
    }
    text
}

pub fn chat_id(chat: ChatId) -> String {
    format!("Este chat tiene id: {chat}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GroupId;

    #[test]
    fn test_acknowledgment() {
        let report = Report {
            group: GroupId::new(2).unwrap(),
            count: 15,
        };
        assert_eq!(
            acknowledgment(&report),
            "✅ Grupo 2 reportó 15 asistentes por Zoom."
        );
    }

    #[test]
    fn test_summary_lists_groups_and_total() {
        let mut state = AttendanceState::new();
        for (group, count) in GroupId::ALL.into_iter().zip([5, 0, 10, 2, 1, 0]) {
            state.record(group, count);
        }
        let text = summary(&state.summary().unwrap());

        assert!(text.starts_with("📊 *Resumen de asistencia por Zoom*\n\n"));
        assert!(text.contains("Grupo 1: 5\nGrupo 2: 0\nGrupo 3: 10\n"));
        assert!(text.contains("Grupo 6: 0\n"));
        assert!(text.ends_with("✅ *Total:* 18"));
    }

    #[test]
    fn test_status_mixed() {
        let mut state = AttendanceState::new();
        state.record(GroupId::new(1).unwrap(), 7);

        let text = status(&state);
        assert!(text.starts_with("📌 Estado actual de reportes:\n"));
        assert!(text.contains("Grupo 1: ✅ 7 asistentes\n"));
        assert!(text.contains("Grupo 2: ❌ pendiente\n"));
        assert_eq!(text.matches("pendiente").count(), 5);
    }

    #[test]
    fn test_chat_id() {
        assert_eq!(chat_id(ChatId(-100123)), "Este chat tiene id: -100123");
    }
}
