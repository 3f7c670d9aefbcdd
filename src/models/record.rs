// Result record: one CSV row. Field order below is the on-disk column order.

use serde::{Deserialize, Serialize};

/// Column names, in the fixed order used by the header and every row.
pub const FIELD_NAMES: [&str; 13] = [
    "timestamp",
    "ip",
    "country",
    "colo",
    "server",
    "download",
    "upload",
    "ping",
    "jitter",
    "packet_loss",
    "user_agent",
    "client_time",
    "test_method",
];

/// Measurement provider recorded on every row; never taken from the client.
pub const TEST_METHOD: &str = "Cloudflare";

/// One stored speed test outcome. Declaration order must match [`FIELD_NAMES`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Server receipt time, ISO-8601 UTC with trailing `Z`.
    pub timestamp: String,
    pub ip: String,
    pub country: String,
    pub colo: String,
    pub server: String,
    /// Mbps
    pub download: f64,
    /// Mbps
    pub upload: f64,
    /// ms
    pub ping: f64,
    /// ms
    pub jitter: f64,
    /// percent
    pub packet_loss: f64,
    pub user_agent: String,
    /// Opaque client-supplied timestamp, informational only.
    pub client_time: String,
    pub test_method: String,
}
