use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Where a `Database` keeps its heap files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// one `<name>.db` file per relation and index lives here
    pub data_dir: PathBuf,
    /// keep everything in process memory, `data_dir` is ignored
    pub in_memory: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            in_memory: false,
        }
    }
}

impl Config {
    pub fn in_memory() -> Self {
        Self {
            in_memory: true,
            ..Self::default()
        }
    }
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    IOError(#[from] std::io::Error),
    #[error("bad config: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert!(!config.in_memory);
        assert!(Config::in_memory().in_memory);
    }

    #[test]
    fn from_json_and_file() {
        let config = Config::from_json(r#"{"data_dir": "/tmp/heapdb"}"#).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/heapdb"));
        assert!(matches!(
            Config::from_json(r#"{"data_dir": 3}"#),
            Err(ConfigError::Json(_))
        ));

        let path = std::env::temp_dir().join(format!("heapdb-{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, serde_json::to_string(&Config::in_memory()).unwrap()).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), Config::in_memory());
        fs::remove_file(&path).unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::IOError(_))
        ));
    }
}
