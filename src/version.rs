// Build-time identity from Cargo.toml, reported by GET /version

use serde::Serialize;

/// Package version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name (from Cargo.toml).
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Debug, Clone, Serialize)]
pub struct ServiceIdentity {
    pub name: &'static str,
    pub version: &'static str,
}

pub fn identity() -> ServiceIdentity {
    ServiceIdentity {
        name: NAME,
        version: VERSION,
    }
}
