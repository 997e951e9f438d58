use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::session::engine::ModeConfig;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_word_limit")]
    pub word_limit: usize,
    #[serde(default)]
    pub modes: ModeConfig,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}

fn default_word_limit() -> usize {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            word_limit: default_word_limit(),
            modes: ModeConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocadrill")
            .join("config.toml")
    }

    /// Keep a hand-edited word limit inside sane bounds.
    pub fn normalize(&mut self) {
        self.word_limit = self.word_limit.clamp(1, 100);
    }
}
