//! MapQuest client configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::MapQuestError;

/// Hard provider limit of locations per batch geocoding call
pub const BATCH_LIMIT: usize = 100;

/// Public MapQuest key, fine for testing but rate limited
const TESTING_API_KEY: &str = "Fmjtd|luub256alu,7s=o5-9u82ur";

/// Configuration for the MapQuest client
///
/// Constructed once and handed to [`MapQuestClient`](crate::MapQuestClient);
/// every request reads its key from here.
#[derive(Clone, Serialize, Deserialize)]
pub struct MapQuestConfig {
    /// Base URL of the MapQuest API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (sensitive - never serialized)
    #[serde(default = "default_api_key", skip_serializing)]
    pub api_key: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Locations per batch geocoding request (1-100)
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://open.mapquestapi.com".to_string()
}

fn default_api_key() -> SecretString {
    SecretString::from(TESTING_API_KEY)
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_batch_size() -> usize {
    BATCH_LIMIT
}

fn default_user_agent() -> String {
    concat!("integration_mapquest/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for MapQuestConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: default_api_key(),
            timeout_secs: default_timeout_secs(),
            batch_size: default_batch_size(),
            user_agent: default_user_agent(),
        }
    }
}

impl std::fmt::Debug for MapQuestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapQuestConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("batch_size", &self.batch_size)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl MapQuestConfig {
    /// Default configuration with the given API key
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            ..Default::default()
        }
    }

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Load from an optional `mapquest.{toml,json,yaml}` file in the working
    /// directory, overridden by `MAPQUEST_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or the result is invalid.
    pub fn load() -> Result<Self, MapQuestError> {
        Self::load_from("mapquest")
    }

    /// Like [`load`](Self::load) with an explicit file name
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or the result is invalid.
    pub fn load_from(file: &str) -> Result<Self, MapQuestError> {
        Self::load_with_env(file, Self::environment())
    }

    /// Environment source, e.g. `MAPQUEST_API_KEY`, `MAPQUEST_TIMEOUT_SECS`
    ///
    /// Values stay strings; numeric fields are converted on deserialization
    /// so keys such as `0012345` keep their exact text.
    fn environment() -> config::Environment {
        config::Environment::with_prefix("MAPQUEST")
    }

    fn load_with_env(file: &str, env: config::Environment) -> Result<Self, MapQuestError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(env)
            .build()
            .map_err(|e| MapQuestError::ConfigurationError(e.to_string()))?;

        let config: Self = settings
            .try_deserialize()
            .map_err(|e| MapQuestError::ConfigurationError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// The API key in clear text, for building request URLs
    #[must_use]
    pub fn api_key_str(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Full URL of an endpoint below `base_url`
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), MapQuestError> {
        let invalid = |msg: &str| -> Result<(), MapQuestError> {
            Err(MapQuestError::ConfigurationError(msg.to_string()))
        };

        if self.base_url.is_empty() {
            return invalid("base_url must not be empty");
        }

        match Url::parse(&self.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {},
            Ok(_) => return invalid("base_url must use http or https"),
            Err(_) => return invalid("base_url is not a valid URL"),
        }

        if self.api_key_str().trim().is_empty() {
            return invalid("api_key must not be empty");
        }

        if self.timeout_secs == 0 {
            return invalid("timeout_secs must be greater than 0");
        }

        if !(1..=BATCH_LIMIT).contains(&self.batch_size) {
            return invalid("batch_size must be between 1 and 100");
        }

        Ok(())
    }
}
