// # HTTP Availability Probe
//
// This crate provides the HTTP implementation of `AvailabilityProbe`.
//
// ## Purpose
//
// The dyndns run can be short-circuited by a URL served from the host whose
// address is being published. If a GET to that URL gets any answer at all,
// the published record must already point at this host, so no provider call
// is needed.
//
// ## Behavior
//
// - Redirects are NOT followed (a redirect is an answer)
// - Any HTTP status counts as reachable, including 4xx and 5xx
// - The status decides; a stalled body is read for at most one second
// - Transport errors and timeouts are `Unreachable`, never `Err`
// - An unparsable URL is an `Err`

use ddns_core::traits::{AvailabilityProbe, ProbeOutcome};
use ddns_core::{Error, Result};

use std::time::Duration;

/// Default request timeout, below the engine's check deadline
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(4);

/// Longest time spent reading the body once the status has arrived
const BODY_DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

/// HTTP GET availability probe
#[derive(Debug, Clone)]
pub struct HttpProbe {
    /// HTTP client (redirects disabled)
    client: reqwest::Client,
}

impl HttpProbe {
    /// Create a probe with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a probe with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl AvailabilityProbe for HttpProbe {
    async fn probe(&self, url: &str) -> Result<ProbeOutcome> {
        let url = reqwest::Url::parse(url)
            .map_err(|e| Error::invalid_input(format!("Cannot create GET request for {}: {}", url, e)))?;

        let mut response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("GET {} failed: {}", url, e);
                return Ok(ProbeOutcome::Unreachable {
                    reason: e.to_string(),
                });
            }
        };

        let status = response.status().as_u16();

        // Drain the body; a failure here still means the server answered.
        let mut bytes = 0u64;
        let drain = async {
            while let Some(chunk) = response.chunk().await? {
                bytes += chunk.len() as u64;
            }
            Ok::<(), reqwest::Error>(())
        };
        match tokio::time::timeout(BODY_DRAIN_TIMEOUT, drain).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::debug!("Failed to read body of {}: {}", url, e),
            Err(_) => tracing::debug!(
                "Body of {} incomplete after {:?}, {} bytes read",
                url,
                BODY_DRAIN_TIMEOUT,
                bytes
            ),
        }

        Ok(ProbeOutcome::Reachable { status, bytes })
    }
}
