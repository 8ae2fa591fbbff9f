// # ddns-core
//
// Core library for the Porkbun dynamic DNS updater.
//
// ## Architecture Overview
//
// This library provides the provider-independent parts of a run:
// - **DnsApi**: Trait for the remote DNS provider operations
// - **HostResolver**: Trait for local name resolution (system resolver included)
// - **AvailabilityProbe**: Trait for the optional check-URL short-circuit
// - **DynDnsUpdater**: The update decision procedure
// - **listing**: Read, filter and format the records of a domain
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Decision logic is separate from HTTP clients
// 2. **Stateless**: Nothing is cached or persisted between runs
// 3. **Explicit configuration**: Run settings are passed in, never global
// 4. **No retries**: Every failure is returned to the caller

pub mod traits;
pub mod engine;
pub mod listing;
pub mod record;
pub mod config;
pub mod error;

// Re-export core types for convenience
pub use traits::{AvailabilityProbe, DnsApi, HostResolver, ProbeOutcome, SystemResolver};
pub use engine::{DynDnsUpdater, SkipReason, UpdateOutcome};
pub use listing::{RecordFilter, RecordListing, list_records, list_records_within};
pub use record::{NewRecord, PingResult, Record, record_exists};
pub use config::{ClientConfig, Credentials, DynDnsConfig, dotjoin};
pub use error::{Error, Result};
