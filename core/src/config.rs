//! Configuration file and resolved settings.
//!
//! The optional config file lives at `~/.shellaid/config.json`. Environment
//! variables (`EMAIL`, `TMP`, `TMPDIR`) override it, and the result is a
//! [`Settings`] value passed explicitly into every service.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};

/// Configuration data stored in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Recipient for `emailme`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Directory for capture buffers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmp_dir: Option<PathBuf>,

    /// Time between checks in `wait-ext` and `wait-port`, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Per-attempt connect timeout for `wait-port`, in milliseconds.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Host probed by `wait-port`.
    #[serde(default = "default_host")]
    pub host: String,

    /// Remote that `sync-fork` pulls from.
    #[serde(default = "default_upstream_remote")]
    pub upstream_remote: String,

    /// Branch that `sync-fork` updates.
    #[serde(default = "default_main_branch")]
    pub main_branch: String,

    /// Mail transport program.
    #[serde(default = "default_sendmail")]
    pub sendmail: String,
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_probe_timeout_ms() -> u64 {
    1000
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_upstream_remote() -> String {
    "upstream".to_string()
}

fn default_main_branch() -> String {
    "master".to_string()
}

fn default_sendmail() -> String {
    "sendmail".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            email: None,
            tmp_dir: None,
            poll_interval_ms: default_poll_interval_ms(),
            probe_timeout_ms: default_probe_timeout_ms(),
            host: default_host(),
            upstream_remote: default_upstream_remote(),
            main_branch: default_main_branch(),
            sendmail: default_sendmail(),
        }
    }
}

impl Config {
    /// Keys accepted by [`Config::set`].
    pub const KEYS: [&'static str; 8] = [
        "email",
        "tmpDir",
        "pollIntervalMs",
        "probeTimeoutMs",
        "host",
        "upstreamRemote",
        "mainBranch",
        "sendmail",
    ];

    /// Set one field from its JSON key and a string value.
    ///
    /// An empty value clears the optional fields (`email`, `tmpDir`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let non_empty = |field: &str| {
            if value.is_empty() {
                Err(Error::Config(format!("{} cannot be empty", field)))
            } else {
                Ok(value.to_string())
            }
        };
        let millis = |field: &str| {
            value
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| Error::Config(format!("{} must be a positive integer", field)))
        };

        match key {
            "email" => self.email = Some(value.to_string()).filter(|v| !v.is_empty()),
            "tmpDir" => self.tmp_dir = Some(PathBuf::from(value)).filter(|_| !value.is_empty()),
            "pollIntervalMs" => self.poll_interval_ms = millis(key)?,
            "probeTimeoutMs" => self.probe_timeout_ms = millis(key)?,
            "host" => self.host = non_empty(key)?,
            "upstreamRemote" => self.upstream_remote = non_empty(key)?,
            "mainBranch" => self.main_branch = non_empty(key)?,
            "sendmail" => self.sendmail = non_empty(key)?,
            _ => {
                return Err(Error::Config(format!(
                    "unknown key '{}' (expected one of: {})",
                    key,
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

/// Configuration store for the optional config file.
pub struct ConfigStore {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a new config store with the default path.
    ///
    /// Default path: `~/.shellaid/config.json`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

        Ok(Self {
            config_path: home.join(".shellaid").join("config.json"),
        })
    }

    /// Create a config store with a custom path.
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub async fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub async fn save(&self, config: &Config) -> Result<()> {
        if let Some(config_dir) = self.config_path.parent() {
            if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
                fs::create_dir_all(config_dir).await.map_err(|e| {
                    Error::Config(format!("Failed to create config directory: {}", e))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(config)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        // Write to a temp file then rename, so readers never see a partial file
        let temp_path = self.config_path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to create temp config file: {}", e)))?;

        file.write_all(content.as_bytes())
            .await
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| Error::Config(format!("Failed to sync config: {}", e)))?;

        fs::rename(&temp_path, &self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to rename config file: {}", e)))?;

        Ok(())
    }

    /// Load, change one key, save.
    pub async fn set(&self, key: &str, value: &str) -> Result<Config> {
        let mut config = self.load().await?;
        config.set(key, value)?;
        self.save(&config).await?;
        Ok(config)
    }
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub email: Option<String>,
    pub tmp_dir: PathBuf,
    #[serde(rename = "pollIntervalMs", serialize_with = "as_millis")]
    pub poll_interval: Duration,
    #[serde(rename = "probeTimeoutMs", serialize_with = "as_millis")]
    pub probe_timeout: Duration,
    pub host: String,
    pub upstream_remote: String,
    pub main_branch: String,
    pub sendmail: String,
}

fn as_millis<S: serde::Serializer>(d: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(d.as_millis() as u64)
}

impl Settings {
    /// Layer environment variables over the file configuration.
    ///
    /// `env` looks up a variable; empty values count as unset.
    pub fn resolve<E>(config: Config, env: E) -> Self
    where
        E: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| env(name).filter(|v| !v.is_empty());

        let email = var("EMAIL").or(config.email);
        let tmp_dir = var("TMP")
            .or_else(|| var("TMPDIR"))
            .map(PathBuf::from)
            .or(config.tmp_dir)
            .unwrap_or_else(std::env::temp_dir);

        Self {
            email,
            tmp_dir,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            probe_timeout: Duration::from_millis(config.probe_timeout_ms),
            host: config.host,
            upstream_remote: config.upstream_remote,
            main_branch: config.main_branch,
            sendmail: config.sendmail,
        }
    }

    /// Resolve from the process environment.
    pub fn from_env(config: Config) -> Self {
        Self::resolve(config, |name| std::env::var(name).ok())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(Config::default(), |_| None)
    }
}
