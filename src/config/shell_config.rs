use std::path::Path;

use clap::ValueEnum;
use compio::fs;
use derive_more::Display;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::{debug, warn};

use crate::config::seed::Seed;

const DEFAULT_PROMPT: &str = "> ";

/// When to colour REPL output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display)]
pub enum ColorChoice {
    #[default]
    #[display("auto")]
    Auto,
    #[display("always")]
    Always,
    #[display("never")]
    Never,
}

impl ColorChoice {
    pub fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => supports_color::on(supports_color::Stream::Stdout).is_some(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// Settings of an interactive session, usually read from a YAML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub prompt: String,
    pub lowercase_input: bool,
    pub color: ColorChoice,
    pub seed: Seed,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            prompt: DEFAULT_PROMPT.to_string(),
            lowercase_input: true,
            color: ColorChoice::default(),
            seed: Seed::default(),
        }
    }
}

impl ShellConfig {
    pub async fn from_path(path: &Path) -> Result<Self, ConfigCreationError> {
        debug!("Opening config file: {}", path.display());
        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: path.display().to_string(),
        })?;
        debug!("Successfully read config file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.display().to_string(),
        })?;
        contents.as_str().try_into()
    }

    /// Reads `path` when given, otherwise falls back to the defaults.
    pub async fn load(path: Option<&Path>) -> Result<Self, ConfigCreationError> {
        match path {
            Some(path) => Self::from_path(path).await,
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn apply_setting(&mut self, key: &str, value: &Yaml) -> Result<(), ConfigCreationError> {
        match key {
            "prompt" => {
                self.prompt = value
                    .as_str()
                    .context(InvalidSettingSnafu {
                        key,
                        expected: "a string",
                    })?
                    .to_string();
            }
            "lowercase_input" => {
                self.lowercase_input = match value {
                    Yaml::Value(Scalar::Boolean(flag)) => *flag,
                    _ => {
                        return InvalidSettingSnafu {
                            key,
                            expected: "a boolean",
                        }
                        .fail();
                    }
                };
            }
            "color" => {
                self.color = value
                    .as_str()
                    .and_then(|choice| ColorChoice::from_str(choice, true).ok())
                    .context(InvalidSettingSnafu {
                        key,
                        expected: "one of auto, always, never",
                    })?;
            }
            "seed" => {
                self.seed = Seed::from_yaml(value)?;
            }
            _ => warn!("Skipping unknown config key '{}'", key),
        }
        Ok(())
    }
}

impl TryFrom<&str> for ShellConfig {
    type Error = ConfigCreationError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents)
            .map_err(|e| ConfigCreationError::ParseError { source: e })?;

        let mut config = ShellConfig::default();
        let Some(document) = documents.first() else {
            debug!("Config file is empty, using defaults");
            return Ok(config);
        };

        let top_level = document
            .as_mapping()
            .ok_or(ConfigCreationError::TopLevelNotMap)?;

        for (key, value) in top_level.iter() {
            match key.as_str() {
                Some(key) => config.apply_setting(key, value)?,
                None => warn!("Skipping non-string config key: {:?}", key),
            }
        }

        debug!("Loaded config: {:?}", config);
        Ok(config)
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigCreationError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Config file {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Setting '{}' should be {}", key, expected))]
    InvalidSetting { key: String, expected: &'static str },
    #[snafu(display("Seed section should be a map"))]
    SeedNotMap,
    #[snafu(display("Seed entry '{}' should be a map (folder) or empty (file)", name))]
    InvalidSeedEntry { name: String },
}
