//! TOML configuration.
//!
//! Every field has a default, so an empty file and no file at all are both
//! valid. Command-line flags take precedence over these values.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use dualtem_analytics::market::SourcePreference;
use dualtem_analytics::series::{DEFAULT_ACCEPT_LANGUAGE, DEFAULT_SERIES_BASE_URL};
use dualtem_analytics::snapshot::{default_feeds, FeedEndpoint};
use dualtem_ext_http::{HttpSettings, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use dualtem_traits::SeriesId;

use crate::error::{CliError, CliResult};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DualtemConfig {
    /// Remote endpoints.
    pub sources: SourcesConfig,
    /// HTTP client settings.
    pub http: HttpConfig,
    /// Defaults for report flags.
    pub defaults: DefaultsConfig,
}

/// Remote endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    /// Root of the monetary statistics API.
    pub series_base_url: String,
    /// Live feeds, in priority order.
    pub feeds: Vec<FeedEndpoint>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            series_base_url: DEFAULT_SERIES_BASE_URL.to_string(),
            feeds: default_feeds(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// `Accept-Language` sent to the statistics API.
    pub accept_language: String,
    /// Retry once without certificate checks after a TLS failure.
    pub insecure_tls_fallback: bool,
    /// `User-Agent` header.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            insecure_tls_fallback: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Defaults for report flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Skip holidays when shifting the observation window.
    pub use_holidays: bool,
    /// Reference-rate series id; resolved from the catalog when unset.
    pub series_id: Option<SeriesId>,
    /// Market TEM selection rule.
    pub market_source: SourcePreference,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            use_holidays: true,
            series_id: None,
            market_source: SourcePreference::Auto,
        }
    }
}

impl DualtemConfig {
    /// Loads `path`, or the defaults when no path is given or the file does
    /// not exist.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> CliResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| CliError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Serialization(e.to_string()))
    }

    /// Checks values serde cannot.
    pub fn validate(&self) -> CliResult<()> {
        if self.http.timeout_secs == 0 {
            return Err(CliError::Config("http.timeout_secs must be positive".into()));
        }
        if self.sources.series_base_url.trim().is_empty() {
            return Err(CliError::Config("sources.series_base_url is empty".into()));
        }
        if let Some(feed) = self.sources.feeds.iter().find(|f| f.url.trim().is_empty()) {
            return Err(CliError::Config(format!("feed '{}' has no url", feed.name)));
        }
        Ok(())
    }

    /// Settings for the HTTP source.
    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            timeout: Duration::from_secs(self.http.timeout_secs),
            user_agent: self.http.user_agent.clone(),
            insecure_tls_fallback: self.http.insecure_tls_fallback,
        }
    }
}
