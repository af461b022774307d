use std::io;

use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};
use vtree::config::{ConfigCreationError, ShellConfig};
use vtree::repl::{Repl, ReplError};
use vtree::tree::{Tree, TreeError};

use crate::application::RuntimeConfig;

pub struct Application;

impl Application {
    pub async fn run(runtime_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let runtime_config: RuntimeConfig = runtime_config.into();
        let config = ShellConfig::load(runtime_config.config_path.as_deref())
            .await
            .context(ConfigSnafu)?;

        let color = runtime_config.color.unwrap_or(config.color);
        debug!("Colour choice: {}", color);
        colored::control::set_override(color.enabled());

        let mut tree = Tree::new();
        config.seed.apply(&mut tree).context(SeedSnafu)?;
        info!("Starting shell with {} nodes", tree.len());

        let stdin = io::stdin();
        let stdout = io::stdout();
        Repl::new(tree, &config)
            .run(stdin.lock(), &mut stdout.lock())
            .context(SessionSnafu)?;

        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered during configuration stage"))]
    ConfigError { source: ConfigCreationError },
    #[snafu(display("Critical failure encountered while seeding the tree"))]
    SeedError { source: TreeError },
    #[snafu(display("Critical failure encountered during the shell session"))]
    SessionError { source: ReplError },
}
