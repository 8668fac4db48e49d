//! Blocking reqwest client.

use std::error::Error as StdError;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde_json::Value;
use tracing::{debug, warn};

use dualtem_traits::{JsonRequest, JsonSource, TraitError, TraitResult};

/// Per-request timeout unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("dualtem/", env!("CARGO_PKG_VERSION"));

/// Client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    /// Per-request timeout.
    pub timeout: Duration,
    /// `User-Agent` header.
    pub user_agent: String,
    /// Retry once without certificate verification after a TLS failure.
    pub insecure_tls_fallback: bool,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            insecure_tls_fallback: true,
        }
    }
}

/// JSON over HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpJsonSource {
    client: Client,
    insecure: Option<Client>,
}

impl HttpJsonSource {
    /// Builds the client, and the unverified fallback client when enabled.
    pub fn new(settings: &HttpSettings) -> TraitResult<Self> {
        let client = build_client(settings, false)?;
        let insecure = if settings.insecure_tls_fallback {
            Some(build_client(settings, true)?)
        } else {
            None
        };
        Ok(Self { client, insecure })
    }

    fn send(client: &Client, request: &JsonRequest) -> reqwest::Result<Response> {
        let mut builder = client.get(&request.url).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.send()
    }
}

fn build_client(settings: &HttpSettings, accept_invalid_certs: bool) -> TraitResult<Client> {
    Client::builder()
        .timeout(settings.timeout)
        .user_agent(settings.user_agent.clone())
        .danger_accept_invalid_certs(accept_invalid_certs)
        .build()
        .map_err(|e| TraitError::ConnectionFailed(format!("cannot build HTTP client: {e}")))
}

/// True when any error in the chain mentions a certificate or TLS problem.
fn is_tls_failure(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        let text = e.to_string().to_lowercase();
        if ["certificate", "tls", "ssl"].iter().any(|k| text.contains(k)) {
            return true;
        }
        current = e.source();
    }
    false
}

fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut current = err.source();
    while let Some(e) = current {
        parts.push(e.to_string());
        current = e.source();
    }
    parts.join(": ")
}

fn map_error(err: &reqwest::Error, url: &str) -> TraitError {
    if err.is_timeout() {
        TraitError::Timeout
    } else if err.is_decode() {
        TraitError::ParseError(format!("{url}: {}", error_chain(err)))
    } else if err.is_builder() {
        TraitError::InvalidInput(format!("{url}: {}", error_chain(err)))
    } else if let Some(status) = err.status() {
        TraitError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        }
    } else {
        TraitError::ConnectionFailed(format!("{url}: {}", error_chain(err)))
    }
}

impl JsonSource for HttpJsonSource {
    fn get_json(&self, request: &JsonRequest) -> TraitResult<Value> {
        debug!(url = %request.url, query = ?request.query, "GET");
        let response = match Self::send(&self.client, request) {
            Ok(response) => response,
            Err(e) => match &self.insecure {
                Some(insecure) if is_tls_failure(&e) => {
                    warn!(
                        url = %request.url,
                        error = %error_chain(&e),
                        "TLS verification failed, retrying without certificate checks"
                    );
                    Self::send(insecure, request).map_err(|e| map_error(&e, &request.url))?
                }
                _ => return Err(map_error(&e, &request.url)),
            },
        };

        let status = response.status();
        if !status.is_success() {
            debug!(url = %request.url, %status, "non-success status");
            return Err(TraitError::HttpStatus {
                status: status.as_u16(),
                url: request.url.clone(),
            });
        }
        response
            .json::<Value>()
            .map_err(|e| map_error(&e, &request.url))
    }
}
