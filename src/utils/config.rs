use super::collate::{Collation, CollationKind, TransliterationKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_NAME: &str = "texindex";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("index_columns must be at least 1")]
    ZeroColumns,

    #[error("alphabet must contain at least one letter")]
    EmptyAlphabet,
}

/// Index settings read from `config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Number of columns each letter group is split into
    #[serde(default = "default_index_columns")]
    pub index_columns: usize,

    /// Letters that get their own group; anything else is a symbol
    #[serde(default = "default_alphabet")]
    pub alphabet: String,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default)]
    pub collation: CollationKind,

    #[serde(default)]
    pub transliteration: TransliterationKind,
}

fn default_index_columns() -> usize {
    2
}

fn default_alphabet() -> String {
    ('A'..='Z').collect()
}

fn default_title() -> String {
    "Index".to_string()
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            index_columns: default_index_columns(),
            alphabet: default_alphabet(),
            title: default_title(),
            collation: CollationKind::default(),
            transliteration: TransliterationKind::default(),
        }
    }
}

impl IndexConfig {
    /// Load from an explicit path, else from the app data directory, else
    /// return the defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match get_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_json(&content).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse { path, source },
            other => other,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: IndexConfig =
            serde_json::from_str(content).map_err(|source| ConfigError::Parse {
                path: PathBuf::new(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.index_columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if self.alphabet.trim().is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        Ok(())
    }

    /// Whether `letter` (already uppercased) heads its own group
    pub fn is_group_letter(&self, letter: &str) -> bool {
        let mut chars = letter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.alphabet.to_uppercase().contains(c),
            _ => false,
        }
    }

    pub fn collation(&self) -> Collation {
        Collation::from_kinds(self.collation, self.transliteration)
    }
}

/// Path of `config.json` in the platform data directory
pub fn get_config_path() -> Option<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: XDG_CONFIG_HOME or ~/.config
        dirs::config_dir()
    };
    base.map(|b| b.join(APP_NAME).join(CONFIG_FILE))
}
