//! Command parsing
//!
//! Turns message text into a typed [`Command`], or a [`Rejection`] naming why
//! the arguments were refused. Text that is not one of our commands parses to
//! `None` and is ignored by the dispatcher.

use crate::models::GroupId;

/// A recognised bot command with validated arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/start`
    Start,
    /// `/help`
    Help,
    /// `/asistencia <grupo> <número>`
    Report(Report),
    /// `/estado`
    Status,
    /// `/getchatid`
    ChatId,
}

impl Command {
    /// Command name as typed by users, without the slash
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::Report(_) => REPORT_COMMAND,
            Command::Status => "estado",
            Command::ChatId => "getchatid",
        }
    }
}

const REPORT_COMMAND: &str = "asistencia";

/// Validated arguments of an attendance report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub group: GroupId,
    pub count: u32,
}

impl Report {
    /// Validate the arguments of `/asistencia`
    pub fn parse(args: &[&str]) -> Result<Self, Rejection> {
        let [group, count] = args else {
            return Err(Rejection::WrongArgumentCount { given: args.len() });
        };

        let group = group
            .parse::<GroupId>()
            .map_err(|_| Rejection::InvalidGroup(group.to_string()))?;

        // Signed parse so "-0" counts as zero; negatives and values past
        // u32 are refused
        let count = count
            .parse::<i64>()
            .ok()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| Rejection::InvalidCount(count.to_string()))?;

        Ok(Self { group, count })
    }
}

/// Reason a command's arguments were refused
///
/// The `Display` text is the reply sent back to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Formato: /asistencia <grupo> <número>  (ej: /asistencia 2 15)")]
    WrongArgumentCount { given: usize },

    #[error("Grupo inválido. Usa un número entre 1 y 6.")]
    InvalidGroup(String),

    #[error("El número debe ser un entero >= 0.")]
    InvalidCount(String),
}

/// Parse a message into a command
///
/// Returns `None` for plain text, unknown commands, and commands addressed to
/// another bot (`/estado@OtherBot`) when `bot_username` is known.
pub fn parse(text: &str, bot_username: Option<&str>) -> Option<Result<Command, Rejection>> {
    let mut tokens = text.split_whitespace();
    let head = tokens.next()?.strip_prefix('/')?;
    let args: Vec<&str> = tokens.collect();

    let name = match head.split_once('@') {
        Some((name, addressee)) => {
            if let Some(username) = bot_username {
                if !addressee.eq_ignore_ascii_case(username) {
                    return None;
                }
            }
            name
        }
        None => head,
    };

    let command = match name {
        "start" => Command::Start,
        "help" => Command::Help,
        REPORT_COMMAND => return Some(Report::parse(&args).map(Command::Report)),
        "estado" => Command::Status,
        "getchatid" => Command::ChatId,
        _ => return None,
    };
    Some(Ok(command))
}
