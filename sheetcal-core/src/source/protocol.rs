//! Provider protocol types.
//!
//! Defines the JSON protocol used between sheetcal and provider binaries
//! over stdin/stdout: one request line in, one response document out.

use serde::{Deserialize, Serialize};

/// Commands that providers must implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    ReadRows,
}

/// Request sent from sheetcal to provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request<P> {
    pub command: Command,
    pub params: P,
}

/// Parameters for [`Command::ReadRows`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadRows {
    pub sheet_id: String,
    /// A1 notation including the tab, e.g. `2026 Games!A:Z`
    pub range: String,
    /// Opaque credentials from the configured env var, passed through untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<String>,
}

/// Response sent from provider to sheetcal.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}
