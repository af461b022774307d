use std::path::PathBuf;

use vtree::config::ColorChoice;

use crate::cli::Cli;

/// The part of the command line the session needs once logging is set up.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub config_path: Option<PathBuf>,
    pub color: Option<ColorChoice>,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            config_path: cli.config,
            color: cli.color,
        }
    }
}
