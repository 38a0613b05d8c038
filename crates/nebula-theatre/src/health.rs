//! Liveness document.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Body returned by `/health` and `/health/{path_echo}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Health {
    /// Always 200 when the process can answer.
    pub status: u16,
    /// Always `OK`.
    pub status_message: String,
    /// Time the document was produced.
    #[serde(with = "nebula_canonical::timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Address the service is bound to.
    pub ip_address: String,
    /// Value of the `echo` query parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub echo: Option<String>,
    /// Value of the path segment after `/health/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_echo: Option<String>,
}

impl Health {
    /// Builds a health document stamped with the current time.
    pub fn ok(ip_address: &str, echo: Option<String>, path_echo: Option<String>) -> Self {
        Self {
            status: 200,
            status_message: "OK".to_string(),
            timestamp: Utc::now(),
            ip_address: ip_address.to_string(),
            echo,
            path_echo,
        }
    }
}
