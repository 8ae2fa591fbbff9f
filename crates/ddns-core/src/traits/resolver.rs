// # Host Resolver Trait
//
// Local name resolution used to compare the published record with the
// current public IP. The default implementation goes through the system
// resolver (getaddrinfo), so it sees the same answer as any other client on
// the host.

use async_trait::async_trait;
use std::net::IpAddr;

use crate::error::{Error, Result};

/// Trait for host name resolution
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Resolve `host` to its addresses
    ///
    /// # Returns
    ///
    /// - `Ok(addrs)`: at least one address
    /// - `Err(Error::Resolve)`: if the name does not resolve
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>>;
}

/// Resolver backed by the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl SystemResolver {
    /// Create a system resolver
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HostResolver for SystemResolver {
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>> {
        let addrs = tokio::net::lookup_host((host, 0))
            .await
            .map_err(|e| Error::resolve(host, e.to_string()))?;

        let mut ips: Vec<IpAddr> = Vec::new();
        for addr in addrs {
            if !ips.contains(&addr.ip()) {
                ips.push(addr.ip());
            }
        }

        if ips.is_empty() {
            return Err(Error::resolve(host, "no addresses returned"));
        }

        tracing::debug!("Resolved {} to {:?}", host, ips);
        Ok(ips)
    }
}
