// # Availability Probe Trait
//
// A probe answers one question: does anything answer at this URL? Any HTTP
// response counts, whatever its status code.
//
// ## Implementations
//
// - HTTP GET without redirects: `ddns-check-http` crate

use async_trait::async_trait;

/// Outcome of a single probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Something answered
    Reachable {
        /// HTTP status of the answer
        status: u16,
        /// Number of body bytes read
        bytes: u64,
    },
    /// No answer (connection error, TLS failure, timeout, ...)
    Unreachable {
        /// Why the request failed
        reason: String,
    },
}

impl ProbeOutcome {
    /// Whether the URL answered
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeOutcome::Reachable { .. })
    }
}

/// Trait for availability probes
///
/// A failed request is a normal [`ProbeOutcome::Unreachable`]; `Err` is
/// reserved for a URL that cannot be requested at all.
#[async_trait]
pub trait AvailabilityProbe: Send + Sync {
    /// Probe `url` once
    async fn probe(&self, url: &str) -> Result<ProbeOutcome, crate::Error>;
}
