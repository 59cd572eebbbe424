//! Admin dashboard payloads.

use serde::{Deserialize, Serialize};

/// Query string of `GET /admin/v1/users`.
#[derive(Debug, Default, Deserialize)]
pub struct UsersQuery {
    pub q: Option<String>,
    pub role: Option<String>,
    pub page: Option<usize>,
}

/// Query string of `GET /admin/v1/providers`.
#[derive(Debug, Default, Deserialize)]
pub struct AdminProvidersQuery {
    pub q: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct DatabaseHealth {
    pub ok: bool,
    pub latency_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct HealthReport {
    /// `ok` when every dependency answered, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseHealth,
    pub rate_limited_identities: usize,
    pub email_configured: bool,
}
