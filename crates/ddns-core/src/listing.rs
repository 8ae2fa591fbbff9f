//! Record listing
//!
//! Read, filter and format the records of a domain. The unfiltered snapshot
//! is handed back as well so later steps of the same invocation can reuse it.

use std::collections::BTreeSet;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::record::Record;
use crate::traits::DnsApi;

/// Which record types to list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordFilter {
    /// Every record
    All,
    /// Records whose type is in the set (upper-case)
    Types(BTreeSet<String>),
}

impl RecordFilter {
    /// Parse a comma-separated list of record types, or `all`
    ///
    /// Types are matched case-insensitively; empty elements are ignored.
    pub fn parse(list: &str) -> Self {
        let mut types = BTreeSet::new();
        for item in list.split(',').map(str::trim) {
            if item == "all" {
                return RecordFilter::All;
            }
            if !item.is_empty() {
                types.insert(item.to_uppercase());
            }
        }
        RecordFilter::Types(types)
    }

    /// Whether `record` passes the filter
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            RecordFilter::All => true,
            RecordFilter::Types(types) => types.contains(&record.record_type),
        }
    }
}

/// Records of a domain together with the formatted lines of the matches
#[derive(Debug, Clone, Default)]
pub struct RecordListing {
    /// Every record of the domain, unfiltered
    pub records: Vec<Record>,
    /// One line per matching record
    pub lines: Vec<String>,
}

impl RecordListing {
    /// Build a listing from a record snapshot
    pub fn new(records: Vec<Record>, filter: &RecordFilter) -> Self {
        let lines = records
            .iter()
            .filter(|r| filter.matches(r))
            .map(ToString::to_string)
            .collect();
        Self { records, lines }
    }
}

/// Retrieve the records of `domain` and format those passing `filter`
pub async fn list_records(
    api: &dyn DnsApi,
    domain: &str,
    filter: &RecordFilter,
) -> Result<RecordListing> {
    let records = api.retrieve_records(domain).await?;
    tracing::debug!("Retrieved {} record(s) for {}", records.len(), domain);
    Ok(RecordListing::new(records, filter))
}

/// [`list_records`] under an overall deadline
///
/// Expiry yields [`Error::Timeout`] carrying `timeout`.
pub async fn list_records_within(
    api: &dyn DnsApi,
    domain: &str,
    filter: &RecordFilter,
    timeout: Duration,
) -> Result<RecordListing> {
    match tokio::time::timeout(timeout, list_records(api, domain, filter)).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout(timeout)),
    }
}
