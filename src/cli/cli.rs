use std::path::PathBuf;

use clap::Parser;
use vtree::config::ColorChoice;

use crate::application::data::LogLevel;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Interactive shell over an in-memory folder tree")]
pub struct Cli {
    /// YAML file with the prompt, colour and initial layout of the tree
    #[clap(long, short)]
    pub config: Option<PathBuf>,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Overrides the colour setting of the config file
    #[clap(long, value_enum)]
    pub color: Option<ColorChoice>,
}
