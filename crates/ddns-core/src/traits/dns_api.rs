// # DNS API Trait
//
// Defines the remote operations of a DNS provider.
//
// ## Implementations
//
// - Porkbun: `ddns-provider-porkbun` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::DnsApi;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let api = /* DnsApi implementation */;
//
//     let ping = api.ping().await?;
//     api.edit_records_by_name_and_type("example.com", "www", "A", &ping.your_ip).await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::record::{NewRecord, PingResult, Record};

/// Trait for DNS provider API clients
///
/// Each method is a single remote call. Implementations must:
/// - never retry (a failure is returned to the caller as is)
/// - never cache state between calls
/// - never log credentials
///
/// Every error must name the operation and, for HTTP failures, carry the
/// status and raw body.
#[async_trait]
pub trait DnsApi: Send + Sync {
    /// Identity check: returns the caller's public IP as seen by the provider
    async fn ping(&self) -> Result<PingResult, crate::Error>;

    /// Every record currently configured for `domain`
    async fn retrieve_records(&self, domain: &str) -> Result<Vec<Record>, crate::Error>;

    /// Create a record under `domain`, returning the new record's identifier
    async fn create_record(&self, domain: &str, record: &NewRecord)
    -> Result<String, crate::Error>;

    /// Overwrite the content of all records of `domain` matching
    /// (`name`, `record_type`). An empty `name` addresses the root domain.
    ///
    /// Returns the status reported by the provider.
    async fn edit_records_by_name_and_type(
        &self,
        domain: &str,
        name: &str,
        record_type: &str,
        content: &str,
    ) -> Result<String, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
