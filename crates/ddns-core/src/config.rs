//! Configuration types for the DDNS system
//!
//! [`ClientConfig`] is the on-disk configuration (credentials plus domain),
//! [`DynDnsConfig`] the per-run settings of the update procedure. Both are
//! immutable once built.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default overall deadline for all remote calls of one run
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// API credential pair, sent with every remote call
///
/// The Debug implementation does NOT expose either key.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Secret API key
    #[serde(rename = "secretapikey")]
    pub secret_api_key: String,

    /// API key
    #[serde(rename = "apikey")]
    pub api_key: String,
}

impl Credentials {
    /// Create a credential pair
    pub fn new(api_key: impl Into<String>, secret_api_key: impl Into<String>) -> Self {
        Self {
            secret_api_key: secret_api_key.into(),
            api_key: api_key.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("secret_api_key", &"<REDACTED>")
            .field("api_key", &"<REDACTED>")
            .finish()
    }
}

/// Client configuration, read once at startup
///
/// Stored as a flat JSON object:
///
/// ```json
/// { "domain": "example.com", "apikey": "pk1_...", "secretapikey": "sk1_..." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Domain whose records are managed
    pub domain: String,

    /// API credentials
    #[serde(flatten)]
    pub credentials: Credentials,
}

impl ClientConfig {
    /// Create a configuration
    pub fn new(domain: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            domain: domain.into(),
            credentials,
        }
    }

    /// Load and validate the configuration file at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "failed to open config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_json(&raw)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a configuration from its JSON text
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| Error::config(format!("invalid JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.domain.trim().is_empty() {
            return Err(Error::config("domain cannot be empty"));
        }
        if self.credentials.api_key.is_empty() {
            return Err(Error::config("apikey cannot be empty"));
        }
        if self.credentials.secret_api_key.is_empty() {
            return Err(Error::config("secretapikey cannot be empty"));
        }
        Ok(())
    }
}

/// Settings of one dynamic DNS run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynDnsConfig {
    /// Domain that owns the record
    pub domain: String,

    /// Subdomain to update, empty for the root domain
    pub subdomain: String,

    /// Optional URL whose reachability proves DNS is already correct
    pub check_url: Option<String>,

    /// Overall deadline for all remote calls of the run
    pub timeout: Duration,
}

impl DynDnsConfig {
    /// Create settings for the root of `domain`
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            subdomain: String::new(),
            check_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the subdomain
    pub fn with_subdomain(mut self, subdomain: impl Into<String>) -> Self {
        self.subdomain = subdomain.into();
        self
    }

    /// Set the availability check URL (empty means none)
    pub fn with_check_url(mut self, check_url: Option<String>) -> Self {
        self.check_url = check_url.filter(|u| !u.is_empty());
        self
    }

    /// Set the overall deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fully-qualified name of the managed record
    pub fn fqdn(&self) -> String {
        dotjoin(&self.subdomain, &self.domain)
    }
}

/// Joins a subdomain label and a domain; an empty label yields the domain.
pub fn dotjoin(subdomain: &str, domain: &str) -> String {
    if subdomain.is_empty() {
        return domain.to_string();
    }
    format!("{}.{}", subdomain, domain)
}
