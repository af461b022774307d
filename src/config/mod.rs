//! Session configuration read from a YAML file.

mod seed;
mod shell_config;

pub use seed::{Seed, SeedEntry};
pub use shell_config::{ColorChoice, ConfigCreationError, ShellConfig};
