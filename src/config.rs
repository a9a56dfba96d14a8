//! Runtime configuration
//!
//! Layered with figment: built-in defaults, then an optional TOML file
//! (`ringside.toml` in the working directory unless a path is given), then
//! `RINGSIDE_*` environment variables.

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::duel::MAX_ROUNDS;

/// Default TOML file looked up when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "ringside.toml";

/// Log line encoding on stderr
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Duel runner configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rounds before a duel is called a draw
    pub max_rounds: u32,
    /// tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,
    pub log_format: LogFormat,
    /// Print the round banner and status blocks
    pub banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_rounds: MAX_ROUNDS,
            log_filter: "ringside=info".to_string(),
            log_format: LogFormat::Text,
            banner: true,
        }
    }
}

impl Config {
    /// Load configuration, reading `path` instead of the default file if given.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Self::figment(file).extract()
    }

    fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed("RINGSIDE_"))
    }
}
