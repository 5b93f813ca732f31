//! CLI configuration.

use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base directory of the flat-file conversation store.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Path of the SQLite database file.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("conversations")
}

fn default_db_path() -> PathBuf {
    PathBuf::from("conversations.db")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            db_path: default_db_path(),
        }
    }
}

impl Config {
    /// Load config from a specific file path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config from `./convodesk.toml`, then the per-user config
    /// directory, or fall back to defaults.
    pub fn load() -> Result<Self> {
        let local = PathBuf::from("convodesk.toml");
        if local.exists() {
            return Self::load_from(&local);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user = config_dir.join("convodesk").join("config.toml");
            if user.exists() {
                return Self::load_from(&user);
            }
        }

        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.log_dir, PathBuf::from("conversations"));
        assert_eq!(config.db_path, PathBuf::from("conversations.db"));
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: Config = toml::from_str(r#"log_dir = "/tmp/chats""#).unwrap();
        assert_eq!(config.log_dir, PathBuf::from("/tmp/chats"));
        assert_eq!(config.db_path, PathBuf::from("conversations.db"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "log_dir = \"/tmp/chats\"\ndb_path = \"/tmp/chats.db\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.log_dir, PathBuf::from("/tmp/chats"));
        assert_eq!(config.db_path, PathBuf::from("/tmp/chats.db"));
    }
}
