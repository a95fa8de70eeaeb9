//! crates/lawlens_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the concrete backend transport and storage: the store only
//! ever sees these interfaces, never `reqwest` or the filesystem.

use async_trait::async_trait;
use crate::domain::{AnalysisResult, Gender, Session, UploadedDocument, UserContext};
use crate::persist::PersistedSnapshot;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., network, disk).
/// The message carried here is the human-readable text surfaced in the workflow's
/// error field, so adapters should fill it with something a user can read.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("{0}")]
    Unauthorized(String),
}

impl PortError {
    /// The human-readable message, without the variant framing.
    pub fn message(&self) -> &str {
        match self {
            PortError::NotFound(m) | PortError::Unexpected(m) | PortError::Unauthorized(m) => m,
        }
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Backend Ports (async)
//=========================================================================================

/// What a successful login hands back: the identity plus the opaque credential
/// token the shell stores outside of reducer state.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: Session,
    pub credential_token: String,
}

/// The authentication backend.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> PortResult<LoginOutcome>;

    async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        gender: Gender,
    ) -> PortResult<Session>;
}

/// The document upload and analysis backend. The analysis algorithm itself is
/// entirely on the other side of this trait.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Uploads a binary payload together with the user's context and returns
    /// the server-assigned document identity.
    async fn upload_document(
        &self,
        payload: &[u8],
        name: &str,
        mime_type: &str,
        context: &UserContext,
    ) -> PortResult<UploadedDocument>;

    /// Runs the analysis for an already-uploaded document.
    async fn analyze_document(&self, document_id: &str) -> PortResult<AnalysisResult>;
}

//=========================================================================================
// Storage Ports (sync)
//=========================================================================================

/// Durable storage for the whitelisted state snapshot. Synchronous on purpose:
/// the store mirrors state on every transition and rehydrates before any
/// reader exists, so the calls must not introduce a suspension point.
pub trait SnapshotStore: Send + Sync {
    /// Loads the last persisted snapshot. `Ok(None)` means a clean first start.
    fn load(&self) -> PortResult<Option<PersistedSnapshot>>;

    /// Overwrites the persisted snapshot.
    fn save(&self, snapshot: &PersistedSnapshot) -> PortResult<()>;
}

/// Storage for the opaque credential token issued at login. Lives outside the
/// reducer state entirely (the snapshot never contains it).
pub trait CredentialStore: Send + Sync {
    fn store_token(&self, token: &str) -> PortResult<()>;

    fn clear_token(&self) -> PortResult<()>;
}
