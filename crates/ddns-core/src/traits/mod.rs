//! Core traits for the DDNS system
//!
//! This module defines the seams between the update procedure and the
//! outside world.
//!
//! - [`DnsApi`]: Remote DNS provider operations
//! - [`HostResolver`]: Local name resolution
//! - [`AvailabilityProbe`]: Cheap reachability check of a URL

pub mod dns_api;
pub mod resolver;
pub mod probe;

pub use dns_api::DnsApi;
pub use resolver::{HostResolver, SystemResolver};
pub use probe::{AvailabilityProbe, ProbeOutcome};
