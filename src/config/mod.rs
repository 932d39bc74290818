use anyhow::{Context, Result};
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runtime settings. Resolution: CLI flag > config file > default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub root: String,
    pub dataset: PathBuf,
    pub api_base: String,
    pub model: String,
    pub max_tokens: u32,
    pub recommendation_count: usize,
    /// Name of the environment variable holding the completion API key.
    pub api_key_env: String,
    /// Unset means the HTTP client's default (no timeout).
    pub timeout_secs: Option<u64>,
    pub wiki_api: String,
    pub thumbnail_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: ".".into(),
            dataset: PathBuf::from("new.json"),
            api_base: "https://api.openai.com".into(),
            model: "gpt-3.5-turbo-instruct".into(),
            max_tokens: 100,
            recommendation_count: 3,
            api_key_env: "OPENAI_API_KEY".into(),
            timeout_secs: None,
            wiki_api: "https://en.wikipedia.org/w/api.php".into(),
            thumbnail_size: 500,
        }
    }
}

impl Config {
    /// Reads a TOML config file; missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// The completion API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}
