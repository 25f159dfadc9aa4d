use std::path::PathBuf;

use serde::Deserialize;
use tracing::Level;

use crate::errors::ConfigError;

const ENV_PREFIX: &str = "DUOQUEUE_";

/// Binary configuration, read from `DUOQUEUE_*` environment variables.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Command script to replay instead of reading stdin.
    pub script: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_owned()
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        envy::prefixed(ENV_PREFIX)
            .from_env::<Config>()
            .map_err(|err| ConfigError::Invalid(err.to_string()))
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter::<_, Config>(vars)
            .map_err(|err| ConfigError::Invalid(err.to_string()))
    }

    pub fn level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}
