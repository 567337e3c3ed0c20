/// User configuration, read from `config.json` in the gurnel config directory.
///
/// Keys are PascalCase (`MinimumWordCount`, `Editor`, ...) so files written
/// for earlier releases keep working. Unknown keys are ignored and missing
/// keys take their defaults.
use gurnel_core::scanner::DEFAULT_SCANNERS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Directory under the platform config dir holding gurnel's files.
pub const APP_DIR: &str = "gurnel";
pub const CONFIG_FILE: &str = "config.json";

/// Number of words listed in each ranking section by default.
pub const DEFAULT_TOP_WORDS: usize = 100;
/// Words a day's entry needs before it counts toward a goal.
pub const DEFAULT_MINIMUM_WORD_COUNT: u32 = 750;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no user config directory on this platform")]
    NoConfigDir,

    #[error("reading config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parsing config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Config {
    /// Scanner worker threads for `stats`.
    pub scanners: usize,
    /// Words per ranking section in `stats`.
    pub top_words: usize,
    /// Reference frequency CSV replacing the bundled table.
    pub reference_path: Option<PathBuf>,

    pub minimum_word_count: u32,
    pub editor: String,

    pub beeminder_enabled: bool,
    pub beeminder_user: String,
    pub beeminder_token_file: String,
    pub beeminder_goal: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scanners: DEFAULT_SCANNERS,
            top_words: DEFAULT_TOP_WORDS,
            reference_path: None,
            minimum_word_count: DEFAULT_MINIMUM_WORD_COUNT,
            editor: String::new(),
            beeminder_enabled: false,
            beeminder_user: String::new(),
            beeminder_token_file: String::new(),
            beeminder_goal: String::new(),
        }
    }
}

impl Config {
    /// `<config dir>/gurnel/config.json`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
