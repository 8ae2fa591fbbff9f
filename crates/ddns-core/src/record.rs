//! DNS record snapshots as returned by the provider
//!
//! Records are owned by the remote service; the client only ever holds
//! read-only copies. All fields are kept as strings, exactly as the provider
//! reports them.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Record type of an IPv4 address record
pub const RECORD_TYPE_A: &str = "A";

/// A DNS record of the configured domain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Provider-assigned identifier
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,

    /// Fully-qualified record name (e.g. "www.example.com")
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    /// Record type (A, AAAA, CNAME, ...)
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub record_type: String,

    /// Record value, e.g. an IP address
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,

    /// Time-to-live in seconds
    #[serde(default, deserialize_with = "lenient_string")]
    pub ttl: String,

    /// Priority, empty for types without one
    #[serde(default, deserialize_with = "lenient_string")]
    pub prio: String,

    /// Free-text notes
    #[serde(default, deserialize_with = "lenient_string")]
    pub notes: String,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} ({})",
            self.name, self.record_type, self.content, self.ttl, self.prio, self.id
        )
    }
}

/// A record to be created
///
/// `ttl` and `prio` are omitted from the request when `None`, so the provider
/// defaults apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRecord {
    /// Subdomain label, empty for the root domain, `*` for a wildcard
    pub name: String,

    /// Record type
    #[serde(rename = "type")]
    pub record_type: String,

    /// Record value
    pub content: String,

    /// Time-to-live in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,

    /// Priority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prio: Option<String>,
}

impl NewRecord {
    /// Create a record with provider-default TTL and priority
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            content: content.into(),
            ttl: None,
            prio: None,
        }
    }

    /// Set the TTL
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl.to_string());
        self
    }

    /// Set the priority
    pub fn with_prio(mut self, prio: u32) -> Self {
        self.prio = Some(prio.to_string());
        self
    }
}

/// Answer of the provider's identity check
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PingResult {
    /// Status reported by the provider
    pub status: String,

    /// The caller's public IP as seen by the provider
    #[serde(rename = "yourIp")]
    pub your_ip: String,
}

/// Returns true if `records` holds a `record_type` record called `name` whose
/// content is `content`. Comparison is exact string equality.
pub fn record_exists(records: &[Record], record_type: &str, name: &str, content: &str) -> bool {
    records
        .iter()
        .filter(|r| r.record_type == record_type)
        .any(|r| r.name == name && r.content == content)
}

/// Accepts a string, a number or null (which becomes an empty string).
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}
