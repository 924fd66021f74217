//! Chat commands: parsing, reply texts and the dispatcher that applies them
//! to the attendance state.

mod dispatcher;
pub mod parse;
pub mod replies;

pub use dispatcher::{Dispatcher, Outcome};
pub use parse::{Command, Rejection, Report};
