mod commands;
mod session;

pub use commands::{Command, CommandParseError};
pub use session::{Flow, Session};
