//! crates/lawlens_core/src/persist.rs
//!
//! The persistence projection: which slices of state survive a restart, and
//! how a persisted snapshot is merged back into a fresh `RootState`.
//!
//! Only the whitelisted fields are ever written: the auth session and flag,
//! and the document collection, current-document pointer and risk history.
//! Loading flags, errors, the pending user context and the whole ui slice are
//! transient and always come back at their defaults.

use serde::{Deserialize, Serialize};
use crate::domain::{Document, RiskHistoryPoint, Session};
use crate::state::{AuthState, DocumentState, RootState};

/// Schema version of the snapshot file. Bumped on incompatible layout
/// changes; a mismatched version is treated the same as a corrupt snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The persisted projection of the auth slice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedAuth {
    pub session: Option<Session>,
    pub is_authenticated: bool,
}

/// The persisted projection of the document slice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedDocument {
    pub documents: Vec<Document>,
    pub current_document: Option<Document>,
    pub risk_history: Vec<RiskHistoryPoint>,
}

/// The single keyed snapshot mirrored to durable storage on every change to
/// a whitelisted slice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    pub version: u32,
    pub auth: PersistedAuth,
    pub document: PersistedDocument,
}

impl PersistedSnapshot {
    /// Projects the whitelisted slices out of the full state. Pure; the
    /// store calls this after every transition that touched `auth` or
    /// `document`.
    pub fn project(state: &RootState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            auth: PersistedAuth {
                session: state.auth.session.clone(),
                is_authenticated: state.auth.is_authenticated,
            },
            document: PersistedDocument {
                documents: state.document.documents.clone(),
                current_document: state.document.current_document.clone(),
                risk_history: state.document.risk_history.clone(),
            },
        }
    }

    /// Merges this snapshot into a default `RootState`. Everything outside
    /// the whitelist starts over: no loading flag or error can survive a
    /// restart, and the notification queue is always empty on boot.
    pub fn restore(self) -> RootState {
        RootState {
            auth: AuthState {
                session: self.auth.session,
                is_authenticated: self.auth.is_authenticated,
                ..AuthState::default()
            },
            document: DocumentState {
                documents: self.document.documents,
                current_document: self.document.current_document,
                risk_history: self.document.risk_history,
                ..DocumentState::default()
            },
            ..RootState::default()
        }
    }
}
