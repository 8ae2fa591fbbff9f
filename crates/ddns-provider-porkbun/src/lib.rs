// # Porkbun DNS Provider
//
// This crate provides a Porkbun API v3 client for the DDNS system.
//
// ## Protocol
//
// Every operation is a POST of a JSON body that embeds the credential pair
// (`apikey`, `secretapikey`) to a path under a versioned base URL. Responses
// always carry a `status` field; success is HTTP 200 with `"SUCCESS"`.
//
// - Ping: POST `/ping`
// - Retrieve records: POST `/dns/retrieve/:domain`
// - Create record: POST `/dns/create/:domain`
// - Edit records by name and type: POST `/dns/editByNameType/:domain/:type[/:subdomain]`
//
// ## Constraints
//
// - One HTTP request per operation, no retries, no caching
// - Credentials NEVER appear in logs or Debug output
// - Non-200 errors carry the raw response body
//
// ## API Reference
//
// - Porkbun API v3: https://porkbun.com/api/json/v3/documentation

use async_trait::async_trait;
use ddns_core::config::{ClientConfig, Credentials};
use ddns_core::record::{NewRecord, PingResult, Record};
use ddns_core::traits::DnsApi;
use ddns_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Dual-stack API base URL
pub const PORKBUN_API_V3_URL: &str = "https://api.porkbun.com/api/json/v3/";

/// IPv4-only API base URL; `ping` through it reports the IPv4 address
pub const PORKBUN_API_V3_IPV4_URL: &str = "https://api-ipv4.porkbun.com/api/json/v3/";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Value of `status` in successful responses
const STATUS_SUCCESS: &str = "SUCCESS";

/// Which API endpoint family to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiEndpoint {
    /// `api-ipv4.porkbun.com`
    #[default]
    Ipv4,
    /// `api.porkbun.com`
    DualStack,
}

impl ApiEndpoint {
    /// Base URL of this endpoint
    pub fn base_url(self) -> &'static str {
        match self {
            ApiEndpoint::Ipv4 => PORKBUN_API_V3_IPV4_URL,
            ApiEndpoint::DualStack => PORKBUN_API_V3_URL,
        }
    }
}

/// Body of every request: the credentials plus operation fields
#[derive(Serialize)]
struct ApiRequest<'a, T: Serialize> {
    #[serde(flatten)]
    credentials: &'a Credentials,
    #[serde(flatten)]
    fields: T,
}

/// Fields common to every response
#[derive(Debug, Deserialize)]
struct Status {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PingResponse {
    #[serde(flatten)]
    status: Status,
    #[serde(default, rename = "yourIp")]
    your_ip: String,
}

#[derive(Debug, Deserialize)]
struct RecordsResponse {
    #[serde(flatten)]
    status: Status,
    #[serde(default)]
    records: Vec<Record>,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    #[serde(flatten)]
    status: Status,
    #[serde(default)]
    id: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct EditResponse {
    #[serde(flatten)]
    status: Status,
}

#[derive(Serialize)]
struct NoFields {}

#[derive(Serialize)]
struct EditFields<'a> {
    content: &'a str,
}

/// Porkbun API client
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the credentials.
pub struct PorkbunClient {
    /// Base URL, always ending in '/'
    base_url: reqwest::Url,

    /// API credentials
    /// ⚠️ NEVER log these values
    credentials: Credentials,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the credentials
impl std::fmt::Debug for PorkbunClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PorkbunClient")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &"<REDACTED>")
            .finish()
    }
}

impl PorkbunClient {
    /// Create a client for `endpoint`
    pub fn new(credentials: Credentials, endpoint: ApiEndpoint) -> Result<Self> {
        Self::with_base_url(credentials, endpoint.base_url())
    }

    /// Create a client from a loaded configuration
    pub fn from_config(config: &ClientConfig, endpoint: ApiEndpoint) -> Result<Self> {
        Self::new(config.credentials.clone(), endpoint)
    }

    /// Create a client talking to an arbitrary base URL
    pub fn with_base_url(credentials: Credentials, base_url: impl Into<String>) -> Result<Self> {
        if credentials.api_key.is_empty() || credentials.secret_api_key.is_empty() {
            return Err(Error::config("Porkbun API credentials cannot be empty"));
        }

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = reqwest::Url::parse(&base_url)
            .map_err(|e| Error::config(format!("Invalid API base URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!("{} cannot be a base URL", base_url)));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            credentials,
            client,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn url(&self, segments: &[&str]) -> Result<reqwest::Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::config(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send one request and decode the response
    async fn post<T, R>(&self, operation: &'static str, url: reqwest::Url, fields: T) -> Result<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        tracing::debug!("POST {} ({})", url, operation);

        let body = ApiRequest {
            credentials: &self.credentials,
            fields,
        };

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::transport(operation, format!("POST failed: {}", e)))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<could not read response body: {}>", e));
            return Err(Error::HttpStatus {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::transport(operation, format!("Failed to read response: {}", e)))?;

        serde_json::from_slice(&bytes).map_err(|e| Error::decode(operation, e.to_string()))
    }
}

/// Turn a non-SUCCESS status into an error
fn check_status(operation: &'static str, status: Status) -> Result<String> {
    if status.status != STATUS_SUCCESS {
        return Err(Error::Api {
            operation,
            status: status.status,
            message: status.message.unwrap_or_default(),
        });
    }
    Ok(status.status)
}

#[async_trait]
impl DnsApi for PorkbunClient {
    async fn ping(&self) -> Result<PingResult> {
        let url = self.url(&["ping"])?;
        let response: PingResponse = self.post("ping", url, NoFields {}).await?;
        let status = check_status("ping", response.status)?;

        Ok(PingResult {
            status,
            your_ip: response.your_ip,
        })
    }

    async fn retrieve_records(&self, domain: &str) -> Result<Vec<Record>> {
        let url = self.url(&["dns", "retrieve", domain])?;
        let response: RecordsResponse = self.post("retrieve", url, NoFields {}).await?;
        check_status("retrieve", response.status)?;

        Ok(response.records)
    }

    async fn create_record(&self, domain: &str, record: &NewRecord) -> Result<String> {
        let url = self.url(&["dns", "create", domain])?;
        let response: CreateResponse = self.post("create", url, record).await?;
        check_status("create", response.status)?;

        let id = match response.id {
            serde_json::Value::String(id) => id,
            serde_json::Value::Number(id) => id.to_string(),
            other => {
                return Err(Error::decode(
                    "create",
                    format!("unexpected record id: {}", other),
                ));
            }
        };

        tracing::info!("Created {} record {} ({})", record.record_type, record.name, id);
        Ok(id)
    }

    async fn edit_records_by_name_and_type(
        &self,
        domain: &str,
        name: &str,
        record_type: &str,
        content: &str,
    ) -> Result<String> {
        let url = if name.is_empty() {
            self.url(&["dns", "editByNameType", domain, record_type])?
        } else {
            self.url(&["dns", "editByNameType", domain, record_type, name])?
        };

        let response: EditResponse = self
            .post("editByNameType", url, EditFields { content })
            .await?;
        check_status("editByNameType", response.status)
    }

    fn provider_name(&self) -> &'static str {
        "porkbun"
    }
}
