//! Dynamic DNS update procedure
//!
//! The [`DynDnsUpdater`] decides whether the A record of the configured name
//! needs a write, using a chain of short-circuit checks ordered from cheapest
//! to most expensive:
//!
//! ```text
//! check URL reachable? ──yes──▶ skip
//!        │ no / not configured
//!        ▼
//!      ping ──────────────────▶ current public IP (fatal on error)
//!        │
//!        ▼
//! resolved address == IP? ─yes─▶ skip        (fatal if lookup fails)
//!        │ no
//!        ▼
//! known A record == IP? ──yes──▶ skip
//!        │ no
//!        ▼
//! IP is IPv4? ──no──▶ error
//!        │ yes
//!        ▼
//! edit records by name and type
//! ```
//!
//! One run performs at most one probe, one ping, one lookup and one write,
//! strictly in sequence, all under the overall deadline of the run.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::DynDnsConfig;
use crate::error::{Error, Result};
use crate::record::{RECORD_TYPE_A, Record, record_exists};
use crate::traits::{AvailabilityProbe, DnsApi, HostResolver, ProbeOutcome};

/// Deadline of the availability check, nested in the overall deadline
pub const CHECK_URL_TIMEOUT: Duration = Duration::from_secs(5);

/// Why a run ended without a write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The check URL answered
    CheckUrlReachable {
        /// HTTP status of the answer
        status: u16,
    },
    /// The name already resolves to the current IP
    ResolvedAddressMatches {
        /// Current public IP
        ip: String,
    },
    /// The known records already hold the current IP
    RecordExists {
        /// Current public IP
        ip: String,
    },
}

/// Result of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// No write was necessary
    Skipped(SkipReason),
    /// The A record was rewritten
    Updated {
        /// Fully-qualified name of the record
        name: String,
        /// New content
        ip: Ipv4Addr,
    },
}

impl UpdateOutcome {
    /// Whether the run wrote to the provider
    pub fn is_update(&self) -> bool {
        matches!(self, UpdateOutcome::Updated { .. })
    }
}

/// Dynamic DNS updater
///
/// Holds no state between runs; every call to [`DynDnsUpdater::run`] starts
/// from scratch.
pub struct DynDnsUpdater {
    /// Remote DNS API
    api: Arc<dyn DnsApi>,

    /// Local name resolution
    resolver: Arc<dyn HostResolver>,

    /// Availability probe, required when a check URL is configured
    probe: Option<Arc<dyn AvailabilityProbe>>,

    /// Run settings
    config: DynDnsConfig,
}

impl DynDnsUpdater {
    /// Create an updater without an availability probe
    pub fn new(
        api: Arc<dyn DnsApi>,
        resolver: Arc<dyn HostResolver>,
        config: DynDnsConfig,
    ) -> Self {
        Self {
            api,
            resolver,
            probe: None,
            config,
        }
    }

    /// Attach the probe used for the check URL
    pub fn with_probe(mut self, probe: Arc<dyn AvailabilityProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Run settings
    pub fn config(&self) -> &DynDnsConfig {
        &self.config
    }

    /// Run the update procedure once
    ///
    /// `known_records` is a snapshot of the domain's records fetched earlier
    /// in the same invocation, if any.
    ///
    /// # Returns
    ///
    /// - `Ok(UpdateOutcome)`: the run completed, with or without a write
    /// - `Err(Error)`: a fatal condition; nothing has been written unless the
    ///   write itself failed
    pub async fn run(&self, known_records: Option<&[Record]>) -> Result<UpdateOutcome> {
        match tokio::time::timeout(self.config.timeout, self.run_internal(known_records)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout(self.config.timeout)),
        }
    }

    async fn run_internal(&self, known_records: Option<&[Record]>) -> Result<UpdateOutcome> {
        // Ultra-fast path: if the check URL answers, DNS must already point here.
        if let Some(check_url) = &self.config.check_url
            && let Some(status) = self.probe_check_url(check_url).await?
        {
            info!(
                "URL check for {} successful (status {}). Skipping DNS update.",
                check_url, status
            );
            return Ok(UpdateOutcome::Skipped(SkipReason::CheckUrlReachable { status }));
        }

        let ping = self.api.ping().await?;
        let current_ip = ping.your_ip;
        info!("Your IP: {}", current_ip);

        // Fast path: the published record already matches.
        let fqdn = self.config.fqdn();
        let addrs = self.resolver.resolve(&fqdn).await.map_err(|e| match e {
            Error::Resolve { host, message } => Error::resolve(
                host,
                format!(
                    "{}. Please set up an A record before running in dyndns mode",
                    message
                ),
            ),
            other => other,
        })?;
        if addrs.iter().any(|addr| addr.to_string() == current_ip) {
            info!(
                "Current IP {} matches public DNS record for {:?}. No update required.",
                current_ip, fqdn
            );
            return Ok(UpdateOutcome::Skipped(SkipReason::ResolvedAddressMatches {
                ip: current_ip,
            }));
        }
        debug!("{} resolves to {:?}, current IP is {}", fqdn, addrs, current_ip);

        if let Some(records) = known_records
            && record_exists(records, RECORD_TYPE_A, &fqdn, &current_ip)
        {
            info!(
                "An A record for {} with IP {} already exists. No update required.",
                fqdn, current_ip
            );
            return Ok(UpdateOutcome::Skipped(SkipReason::RecordExists { ip: current_ip }));
        }

        let ip: Ipv4Addr = current_ip
            .parse()
            .map_err(|_| Error::InvalidAddress(current_ip.clone()))?;

        self.api
            .edit_records_by_name_and_type(
                &self.config.domain,
                &self.config.subdomain,
                RECORD_TYPE_A,
                &current_ip,
            )
            .await?;

        info!(
            "Updated A record for {} to {} via {}",
            fqdn,
            ip,
            self.api.provider_name()
        );
        Ok(UpdateOutcome::Updated { name: fqdn, ip })
    }

    /// Probe the check URL. `Some(status)` if it answered, `None` if the
    /// result is inconclusive.
    async fn probe_check_url(&self, url: &str) -> Result<Option<u16>> {
        let probe = self
            .probe
            .as_ref()
            .ok_or_else(|| Error::config("check URL configured without an availability probe"))?;

        match tokio::time::timeout(CHECK_URL_TIMEOUT, probe.probe(url)).await {
            Ok(Ok(ProbeOutcome::Reachable { status, bytes })) => {
                debug!("{} answered with status {} ({} bytes)", url, status, bytes);
                Ok(Some(status))
            }
            Ok(Ok(ProbeOutcome::Unreachable { reason })) => {
                warn!("URL check for {} failed: {}", url, reason);
                Ok(None)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => {
                warn!("URL check for {} timed out after {:?}", url, CHECK_URL_TIMEOUT);
                Ok(None)
            }
        }
    }
}
