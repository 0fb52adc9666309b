use serde::{Deserialize, Serialize};

use std::future::Future;
use std::path::Path;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::session::{SessionProvider, SessionToken};

/// Default timeout for calls to the wiki API.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Base URL of the wiki API function. Actions are selected with `?action=`.
    pub endpoint: String,
    /// The admin session token, if logged in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionToken>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Config {
    /// Loads the configuration from the provided loader.
    pub async fn load(loader: &impl Loader) -> Result<Self, ConfigError> {
        loader.load().await
    }
    /// Saves the configuration using the provided saver.
    pub async fn save(&self, saver: &impl Saver) -> Result<(), ConfigError> {
        saver.save(self).await
    }

    /// Replace the stored session, e.g. with a token given on the command line.
    pub fn with_session(mut self, token: Option<SessionToken>) -> Self {
        if token.is_some() {
            self.session = token;
        }
        self
    }
}

impl Default for Config {
    /// Creates a new default configuration pointing at a local backend.
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/wiki-api".to_owned(),
            session: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SessionProvider for Config {
    fn session_token(&self) -> Option<SessionToken> {
        self.session.clone().filter(|t| !t.is_empty())
    }
}

/// The trait for loading configuration data.
pub trait Loader {
    /// Loads the configuration data.
    fn load(&self) -> impl Future<Output = Result<Config, ConfigError>> + Send;
}

/// The trait for saving configuration data.
pub trait Saver {
    /// Saves the configuration data.
    fn save(&self, config: &Config) -> impl Future<Output = Result<(), ConfigError>> + Send;
}

/// An implementation of [`Loader`] and [`Saver`] that reads and writes a configuration file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a new [`FileStore`] with the given path.
    ///
    /// The format is chosen from the extension: `.toml` or `.json`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format(&self) -> Result<Format, ConfigError> {
        match self.path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            _ => Err(ConfigError::UnsupportedFormat(
                self.path.display().to_string(),
            )),
        }
    }
}

enum Format {
    Json,
    Toml,
}

impl Loader for FileStore {
    async fn load(&self) -> Result<Config, ConfigError> {
        let format = self.format()?;
        let raw = std::fs::read_to_string(&self.path)?;
        let config = match format {
            Format::Json => serde_json::from_str(&raw)?,
            Format::Toml => toml::from_str(&raw)?,
        };
        tracing::debug!(path = %self.path.display(), "loaded config");
        Ok(config)
    }
}

impl Saver for FileStore {
    async fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let contents = match self.format()? {
            Format::Json => serde_json::to_string_pretty(config)?,
            Format::Toml => toml::to_string_pretty(config)?,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, contents)?;
        tracing::debug!(path = %self.path.display(), "saved config");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_toml_round_trip_keeps_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("lorewiki.toml"));
        let config = Config {
            endpoint: "https://wiki.example.com/api".into(),
            session: Some(SessionToken::new("7656:3")),
            request_timeout_secs: 10,
        };

        config.save(&store).await.unwrap();
        let loaded = Config::load(&store).await.unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.session_token().unwrap().as_str(), "7656:3");
    }

    #[tokio::test]
    async fn test_missing_timeout_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lorewiki.json");
        std::fs::write(&path, r#"{ "endpoint": "https://wiki.example.com/api" }"#).unwrap();

        let loaded = Config::load(&FileStore::new(&path)).await.unwrap();
        assert_eq!(loaded.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(loaded.session.is_none());
    }

    #[tokio::test]
    async fn test_unknown_extension_is_rejected() {
        let store = FileStore::new("/tmp/lorewiki.ini");
        let err = Config::load(&store).await.unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_with_session_only_overrides_when_given() {
        let config = Config {
            session: Some(SessionToken::new("stored")),
            ..Config::default()
        };
        let kept = config.clone().with_session(None);
        assert_eq!(kept.session_token().unwrap().as_str(), "stored");

        let replaced = config.with_session(Some(SessionToken::new("cli")));
        assert_eq!(replaced.session_token().unwrap().as_str(), "cli");
    }
}
