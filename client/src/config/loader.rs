use crate::config::error::{ConfigError, Result};
use crate::retry::RetryPolicy;
use crate::retry::classifier::DEFAULT_RETRYABLE_BUSINESS_CODES;
use config::{Config, Environment, File};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend API root, e.g. `http://localhost:8080/api`
    pub base_url: String,

    /// Per-request transport timeout
    pub request_timeout_ms: u64,

    /// Policy for user-initiated calls (surfacing mode)
    pub interactive_retry: RetryPolicy,

    /// Policy for background polling (silent mode)
    pub polling_retry: RetryPolicy,

    /// Envelope codes that are worth retrying
    pub retryable_business_codes: Vec<i64>,

    /// Send the `X-Device-Id` header
    pub send_device_id: bool,

    /// Refuse to send authenticated requests without a usable session
    pub require_credentials: bool,

    /// Lifetime assigned to a freshly issued access token
    pub access_token_ttl_ms: u64,

    /// Share one execution between identical concurrent GETs
    pub coalesce_identical_gets: bool,

    /// JSON credential file; in-memory credentials when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            request_timeout_ms: 30_000,
            interactive_retry: RetryPolicy::interactive(),
            polling_retry: RetryPolicy::polling(),
            retryable_business_codes: DEFAULT_RETRYABLE_BUSINESS_CODES.to_vec(),
            send_device_id: true,
            require_credentials: false,
            access_token_ttl_ms: 2 * 60 * 60 * 1000,
            coalesce_identical_gets: false,
            credentials_path: None,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(self.base_url.trim()).map_err(|err| {
            ConfigError::ValidationError(format!("base_url `{}`: {err}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError(format!(
                "base_url `{}` must use http or https",
                self.base_url
            )));
        }

        if self.request_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_ms must be greater than 0".to_string(),
            ));
        }

        self.interactive_retry
            .validate()
            .map_err(|source| ConfigError::InvalidPolicy {
                name: "interactive_retry",
                source,
            })?;
        self.polling_retry
            .validate()
            .map_err(|source| ConfigError::InvalidPolicy {
                name: "polling_retry",
                source,
            })?;

        Ok(())
    }
}

/// Configuration loader with layered merging support
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds a [`ClientConfig`] from built-in defaults, then the TOML file
    /// given to [`ConfigLoader::with_file`], then `CVS_*` variables, and
    /// validates the result. Nested keys use `__`, as in
    /// `CVS_POLLING_RETRY__MAX_ATTEMPTS=8`.
    pub fn load(&self) -> Result<ClientConfig> {
        let defaults = serde_json::to_string(&ClientConfig::default())?;
        let mut layers =
            Config::builder().add_source(File::from_str(&defaults, config::FileFormat::Json));

        if let Some(path) = &self.config_path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
            layers = layers.add_source(File::from(path.as_path()));
        }

        let merged: ClientConfig = layers
            .add_source(
                Environment::with_prefix("CVS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("retryable_business_codes"),
            )
            .build()?
            .try_deserialize()?;
        merged.validate()?;
        Ok(merged)
    }

    /// First existing file among `./cvs.toml`, `<config dir>/cvs/config.toml`
    /// and `~/.cvs.toml`.
    pub fn find_config_file() -> Option<PathBuf> {
        let candidates = [
            Some(PathBuf::from("./cvs.toml")),
            dirs::config_dir().map(|dir| dir.join("cvs").join("config.toml")),
            dirs::home_dir().map(|dir| dir.join(".cvs.toml")),
        ];
        candidates.into_iter().flatten().find(|path| path.exists())
    }

    pub fn load_default() -> Result<ClientConfig> {
        match Self::find_config_file() {
            Some(path) => Self::new().with_file(path).load(),
            None => Self::new().load(),
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
