//! Line-oriented shell over a [`Tree`](crate::tree::Tree).
//!
//! Each input line is split shell-style and dispatched through a
//! [`CommandRegistry`]. Command failures are printed and the loop goes on.

mod command;
mod commands;
mod error;
#[allow(clippy::module_inception)]
mod repl;

pub use command::{Command, CommandCallback, CommandContext, CommandRegistry, Flow};
pub use commands::standard_commands;
pub use error::ReplError;
pub use repl::Repl;
