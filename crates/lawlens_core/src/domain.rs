//! crates/lawlens_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any storage backend or transport format;
//! they derive `Serialize`/`Deserialize` only because the persisted snapshot
//! and the HTTP adapters reuse them as-is.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated identity. Exists only while the user is logged in:
/// either a complete `Session` or none, never partially populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Gender options accepted by the signup backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// A document uploaded by the user. `analysis_result` is attached only once
/// an analysis completes; a later analysis overwrites the prior result whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_result: Option<AnalysisResult>,
}

/// The fields the upload endpoint returns; the document workflow turns this
/// into a full `Document` (with no analysis result yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedDocument {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub uploaded_at: DateTime<Utc>,
}

/// The outcome of one analysis run. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Closed-interval integer, 0 ..= 100.
    pub risk_score: u8,
    pub red_flags: Vec<RedFlag>,
    pub summary: String,
    pub clauses: Vec<Clause>,
}

/// Risk level shared by red flags and clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedFlag {
    pub id: String,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub source_clause: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub id: String,
    pub text: String,
    pub risk: Severity,
    pub explanation: String,
}

/// Context the user supplies once per upload. It is attached to the upload
/// request and not versioned afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    pub age: u32,
    pub location: String,
    pub purpose: String,
}

/// One point of the append-only, date-ascending risk time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskHistoryPoint {
    pub date: NaiveDate,
    pub score: u8,
}

/// Kind of a transient user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

/// A transient user-facing message. Ephemeral: never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates a notification with a fresh id and the current timestamp.
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}
