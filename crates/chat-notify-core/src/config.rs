use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, COUNT_PLACEHOLDER, DEFAULT_SUFFIX_ONE, DEFAULT_SUFFIX_OTHER,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Count suffix templates appended after a conversation name.
/// `{count}` is replaced with the number of messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountSuffixes {
    pub one: String,
    pub other: String,
}

impl Default for CountSuffixes {
    fn default() -> Self {
        Self {
            one: DEFAULT_SUFFIX_ONE.to_string(),
            other: DEFAULT_SUFFIX_OTHER.to_string(),
        }
    }
}

impl CountSuffixes {
    pub fn render(&self, count: usize) -> String {
        let template = if count == 1 { &self.one } else { &self.other };
        template.replace(COUNT_PLACEHOLDER, &count.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreConfig {
    #[serde(default)]
    pub count_suffixes: CountSuffixes,
}

impl CoreConfig {
    /// Load config from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from the default location, falling back to defaults when no file exists
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to deserialize config")
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }
}
