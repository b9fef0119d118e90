//! REST API response types.

use serde::{Deserialize, Serialize};

use crate::store::RecordCounts;

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub records: RecordCounts,
}

impl HealthResponse {
    pub fn ok(counts: RecordCounts) -> Self {
        Self {
            status: "ok".into(),
            service: env!("CARGO_PKG_NAME").into(),
            version: env!("CARGO_PKG_VERSION").into(),
            records: counts,
        }
    }
}

/// Error body: `{"error": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
