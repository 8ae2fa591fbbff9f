//! Test doubles and common utilities for update procedure contract tests
//!
//! The doubles share one in-memory zone: edits made through [`MockDnsApi`]
//! are visible to [`ZoneResolver`], so consecutive runs observe each other.

#![allow(dead_code)]

use ddns_core::error::{Error, Result};
use ddns_core::traits::{AvailabilityProbe, DnsApi, HostResolver, ProbeOutcome};
use ddns_core::{DynDnsConfig, NewRecord, PingResult, Record, dotjoin};
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const DOMAIN: &str = "example.com";

/// Records shared between the API double and the resolver double
pub type Zone = Arc<Mutex<Vec<Record>>>;

/// One recorded edit call: (domain, name, type, content)
pub type Edit = (String, String, String, String);

/// Build a zone holding the given A records (fully-qualified name, content)
pub fn zone_with(a_records: &[(&str, &str)]) -> Zone {
    let records = a_records
        .iter()
        .enumerate()
        .map(|(i, (name, content))| a_record(&i.to_string(), name, content))
        .collect();
    Arc::new(Mutex::new(records))
}

pub fn a_record(id: &str, name: &str, content: &str) -> Record {
    Record {
        id: id.to_string(),
        name: name.to_string(),
        record_type: "A".to_string(),
        content: content.to_string(),
        ttl: "600".to_string(),
        ..Default::default()
    }
}

/// How the ping double answers
#[derive(Debug, Clone)]
pub enum PingBehavior {
    /// Report this IP
    Ip(String),
    /// Fail with an HTTP error
    Fail,
    /// Never answer
    Hang,
}

/// A DnsApi double that counts calls and writes into the shared zone
pub struct MockDnsApi {
    zone: Zone,
    ping: PingBehavior,
    fail_edits: bool,
    hang_retrieve: bool,
    ping_calls: AtomicUsize,
    retrieve_calls: AtomicUsize,
    edits: Mutex<Vec<Edit>>,
}

impl MockDnsApi {
    pub fn new(zone: Zone, public_ip: &str) -> Self {
        Self::with_ping(zone, PingBehavior::Ip(public_ip.to_string()))
    }

    pub fn with_ping(zone: Zone, ping: PingBehavior) -> Self {
        Self {
            zone,
            ping,
            fail_edits: false,
            hang_retrieve: false,
            ping_calls: AtomicUsize::new(0),
            retrieve_calls: AtomicUsize::new(0),
            edits: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_edits(mut self) -> Self {
        self.fail_edits = true;
        self
    }

    /// Make `retrieve_records` never answer
    pub fn hanging_retrieve(mut self) -> Self {
        self.hang_retrieve = true;
        self
    }

    pub fn ping_calls(&self) -> usize {
        self.ping_calls.load(Ordering::SeqCst)
    }

    pub fn retrieve_calls(&self) -> usize {
        self.retrieve_calls.load(Ordering::SeqCst)
    }

    pub fn edits(&self) -> Vec<Edit> {
        self.edits.lock().unwrap().clone()
    }

    pub fn edit_calls(&self) -> usize {
        self.edits.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl DnsApi for MockDnsApi {
    async fn ping(&self) -> Result<PingResult> {
        self.ping_calls.fetch_add(1, Ordering::SeqCst);
        match &self.ping {
            PingBehavior::Ip(ip) => Ok(PingResult {
                status: "SUCCESS".to_string(),
                your_ip: ip.clone(),
            }),
            PingBehavior::Fail => Err(Error::HttpStatus {
                operation: "ping",
                status: 403,
                body: "invalid api key".to_string(),
            }),
            PingBehavior::Hang => std::future::pending().await,
        }
    }

    async fn retrieve_records(&self, _domain: &str) -> Result<Vec<Record>> {
        self.retrieve_calls.fetch_add(1, Ordering::SeqCst);
        if self.hang_retrieve {
            return std::future::pending().await;
        }
        Ok(self.zone.lock().unwrap().clone())
    }

    async fn create_record(&self, domain: &str, record: &NewRecord) -> Result<String> {
        let mut zone = self.zone.lock().unwrap();
        let id = zone.len().to_string();
        let mut created = a_record(&id, &dotjoin(&record.name, domain), &record.content);
        created.record_type = record.record_type.clone();
        zone.push(created);
        Ok(id)
    }

    async fn edit_records_by_name_and_type(
        &self,
        domain: &str,
        name: &str,
        record_type: &str,
        content: &str,
    ) -> Result<String> {
        self.edits.lock().unwrap().push((
            domain.to_string(),
            name.to_string(),
            record_type.to_string(),
            content.to_string(),
        ));

        if self.fail_edits {
            return Err(Error::HttpStatus {
                operation: "editByNameType",
                status: 400,
                body: "edit rejected".to_string(),
            });
        }

        let fqdn = dotjoin(name, domain);
        for record in self.zone.lock().unwrap().iter_mut() {
            if record.name == fqdn && record.record_type == record_type {
                record.content = content.to_string();
            }
        }
        Ok("SUCCESS".to_string())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// A resolver double answering from the shared zone's A records
pub struct ZoneResolver {
    zone: Zone,
    calls: AtomicUsize,
}

impl ZoneResolver {
    pub fn new(zone: Zone) -> Self {
        Self {
            zone,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl HostResolver for ZoneResolver {
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let ips: Vec<IpAddr> = self
            .zone
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.record_type == "A" && r.name == host)
            .filter_map(|r| r.content.parse().ok())
            .collect();

        if ips.is_empty() {
            return Err(Error::resolve(host, "no such host"));
        }
        Ok(ips)
    }
}

/// How the probe double answers
#[derive(Debug, Clone)]
pub enum ProbeBehavior {
    Reachable(u16),
    Unreachable,
    Hang,
    InvalidUrl,
}

/// An AvailabilityProbe double that counts calls
pub struct MockProbe {
    behavior: ProbeBehavior,
    calls: AtomicUsize,
}

impl MockProbe {
    pub fn new(behavior: ProbeBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl AvailabilityProbe for MockProbe {
    async fn probe(&self, url: &str) -> Result<ProbeOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            ProbeBehavior::Reachable(status) => Ok(ProbeOutcome::Reachable { status, bytes: 0 }),
            ProbeBehavior::Unreachable => Ok(ProbeOutcome::Unreachable {
                reason: "connection refused".to_string(),
            }),
            ProbeBehavior::Hang => std::future::pending().await,
            ProbeBehavior::InvalidUrl => {
                Err(Error::invalid_input(format!("invalid check URL {}", url)))
            }
        }
    }
}

/// Helper to create run settings for `subdomain` of [`DOMAIN`]
pub fn dyndns_config(subdomain: &str) -> DynDnsConfig {
    DynDnsConfig::new(DOMAIN).with_subdomain(subdomain)
}
