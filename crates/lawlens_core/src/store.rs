//! crates/lawlens_core/src/store.rs
//!
//! The single owner of all mutable application state. Every read goes
//! through a cloned view, every write goes through one of the intent methods
//! below, and every async effect (login, signup, upload, analyze) is
//! dispatched here and re-joined onto the same state-update path when it
//! settles.
//!
//! Concurrency model: transitions are applied atomically under one lock and
//! the lock is never held across an await. Overlapping async intents of the
//! same kind are serialized with a request-generation counter: a settlement
//! whose generation is no longer current is stale and dropped, so the state
//! always reflects the most recently dispatched request.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use tracing::{debug, info, warn};

use crate::domain::{Gender, NotificationKind, UserContext};
use crate::persist::PersistedSnapshot;
use crate::ports::{AnalysisApi, AuthApi, CredentialStore, PortError, PortResult, SnapshotStore};
use crate::state::{AuthState, DocumentState, RootState, UiState};

//=========================================================================================
// The Store
//=========================================================================================

/// The application state container. Cheap to share: wrap it in an `Arc` and
/// hand clones to every consumer.
pub struct Store {
    state: RwLock<RootState>,
    auth_api: Arc<dyn AuthApi>,
    analysis_api: Arc<dyn AnalysisApi>,
    snapshot_store: Arc<dyn SnapshotStore>,
    credential_store: Arc<dyn CredentialStore>,
    // One request-generation counter per async intent kind.
    auth_generation: AtomicU64,
    upload_generation: AtomicU64,
    analysis_generation: AtomicU64,
}

impl Store {
    /// Opens the store: rehydrates the last persisted snapshot (or falls back
    /// to the default initial state) before the value exists, so no reader
    /// can ever observe pre-rehydration state.
    ///
    /// A corrupt or unreadable snapshot is logged and discarded, never fatal.
    pub fn open(
        auth_api: Arc<dyn AuthApi>,
        analysis_api: Arc<dyn AnalysisApi>,
        snapshot_store: Arc<dyn SnapshotStore>,
        credential_store: Arc<dyn CredentialStore>,
    ) -> Self {
        let state = match snapshot_store.load() {
            Ok(Some(snapshot)) => {
                info!("Rehydrated persisted state snapshot.");
                snapshot.restore()
            }
            Ok(None) => {
                info!("No persisted snapshot found; starting from the default state.");
                RootState::default()
            }
            Err(e) => {
                warn!("Failed to load persisted snapshot, falling back to defaults: {e}");
                RootState::default()
            }
        };

        Self {
            state: RwLock::new(state),
            auth_api,
            analysis_api,
            snapshot_store,
            credential_store,
            auth_generation: AtomicU64::new(0),
            upload_generation: AtomicU64::new(0),
            analysis_generation: AtomicU64::new(0),
        }
    }

    //=====================================================================================
    // Internal mutation path
    //=====================================================================================

    fn read_state(&self) -> RwLockReadGuard<'_, RootState> {
        // A poisoned lock still holds structurally valid state (transitions
        // are plain field writes), so recover rather than propagate.
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies one transition atomically, then mirrors the whitelisted
    /// slices to durable storage if (and only if) they changed. Persistence
    /// failures are logged, never surfaced to the caller.
    fn mutate<R>(&self, transition: impl FnOnce(&mut RootState) -> R) -> R {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let before = PersistedSnapshot::project(&guard);
        let out = transition(&mut guard);
        let after = PersistedSnapshot::project(&guard);
        if after != before {
            if let Err(e) = self.snapshot_store.save(&after) {
                warn!("Failed to persist state snapshot: {e}");
            }
        }
        out
    }

    //=====================================================================================
    // Read access
    //=====================================================================================

    pub fn auth(&self) -> AuthState {
        self.read_state().auth.clone()
    }

    pub fn document(&self) -> DocumentState {
        self.read_state().document.clone()
    }

    pub fn ui(&self) -> UiState {
        self.read_state().ui.clone()
    }

    /// The `n` most recently uploaded documents, newest first.
    pub fn recent_documents(&self, n: usize) -> Vec<crate::domain::Document> {
        self.read_state().document.recent_documents(n)
    }

    /// Mean risk score over the whole history; `0.0` for an empty history.
    pub fn average_risk_score(&self) -> f64 {
        self.read_state().document.average_risk_score()
    }

    /// Oldest-to-newest percentage change of the risk history.
    pub fn risk_trend_percent(&self) -> i32 {
        self.read_state().document.risk_trend_percent()
    }

    /// Total red flags across every analyzed document.
    pub fn total_red_flags(&self) -> usize {
        self.read_state().document.total_red_flags()
    }

    //=====================================================================================
    // Auth intents
    //=====================================================================================

    /// Dispatches a login. The settlement is normalized into the auth slice
    /// either way; the returned result is a convenience echo for the caller
    /// (e.g. to decide navigation), not an extra error channel.
    pub async fn login(&self, email: &str, password: &str) -> PortResult<()> {
        let generation = self.auth_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.mutate(|s| s.auth.begin_request());

        let outcome = self.auth_api.login(email, password).await;
        if self.auth_generation.load(Ordering::SeqCst) != generation {
            debug!("Dropping stale login settlement (generation {generation}).");
            return Ok(());
        }

        match outcome {
            Ok(login) => {
                self.mutate(|s| s.auth.finish_request(login.user));
                // The credential token lives outside reducer state.
                if let Err(e) = self.credential_store.store_token(&login.credential_token) {
                    warn!("Failed to store credential token: {e}");
                }
                Ok(())
            }
            Err(e) => {
                self.mutate(|s| s.auth.fail_request(e.message()));
                Err(e)
            }
        }
    }

    /// Dispatches a signup. Same transition shape as `login`, but the
    /// backend issues no credential token on registration.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        gender: Gender,
    ) -> PortResult<()> {
        let generation = self.auth_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.mutate(|s| s.auth.begin_request());

        let outcome = self.auth_api.signup(name, email, password, gender).await;
        if self.auth_generation.load(Ordering::SeqCst) != generation {
            debug!("Dropping stale signup settlement (generation {generation}).");
            return Ok(());
        }

        match outcome {
            Ok(session) => {
                self.mutate(|s| s.auth.finish_request(session));
                Ok(())
            }
            Err(e) => {
                self.mutate(|s| s.auth.fail_request(e.message()));
                Err(e)
            }
        }
    }

    /// Synchronous logout. Always succeeds: clears the session and discards
    /// the stored credential token.
    pub fn logout(&self) {
        self.mutate(|s| s.auth.logout());
        if let Err(e) = self.credential_store.clear_token() {
            warn!("Failed to discard credential token: {e}");
        }
    }

    pub fn clear_auth_error(&self) {
        self.mutate(|s| s.auth.clear_error());
    }

    //=====================================================================================
    // Document intents
    //=====================================================================================

    /// Stores the context to attach to the next upload.
    pub fn set_user_context(&self, context: UserContext) {
        self.mutate(|s| s.document.set_user_context(context));
    }

    /// Repoints the current document at an existing collection entry.
    pub fn set_current_document(&self, document_id: &str) {
        self.mutate(|s| s.document.set_current_document(document_id));
    }

    pub fn clear_document_error(&self) {
        self.mutate(|s| s.document.clear_error());
    }

    /// Dispatches an upload. A fully populated context is a precondition
    /// checked upstream; an incomplete one is rejected here before any task
    /// starts and never enters the `upload_failed` state.
    pub async fn upload_document(
        &self,
        payload: &[u8],
        name: &str,
        mime_type: &str,
        context: &UserContext,
    ) -> PortResult<()> {
        if context.age == 0 || context.location.is_empty() || context.purpose.is_empty() {
            return Err(PortError::Unexpected(
                "A complete user context (age, location, purpose) is required to upload"
                    .to_string(),
            ));
        }

        let generation = self.upload_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.mutate(|s| s.document.begin_upload());

        let outcome = self
            .analysis_api
            .upload_document(payload, name, mime_type, context)
            .await;
        if self.upload_generation.load(Ordering::SeqCst) != generation {
            debug!("Dropping stale upload settlement (generation {generation}).");
            return Ok(());
        }

        match outcome {
            Ok(uploaded) => {
                self.mutate(|s| s.document.finish_upload(uploaded));
                Ok(())
            }
            Err(e) => {
                self.mutate(|s| s.document.fail_upload(e.message()));
                Err(e)
            }
        }
    }

    /// Dispatches an analysis for the current document.
    ///
    /// Idempotency guard: unless `document_id` names the current document
    /// and that document has no result yet, the call is a no-op and no task
    /// is started. A failed analysis leaves the machine retryable: calling
    /// again with the same id re-enters `analyzing`.
    pub async fn analyze_document(&self, document_id: &str) -> PortResult<()> {
        {
            let state = self.read_state();
            let Some(current) = state.document.current_document.as_ref() else {
                return Ok(());
            };
            if current.id != document_id || current.analysis_result.is_some() {
                return Ok(());
            }
        }

        let generation = self.analysis_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.mutate(|s| s.document.begin_analysis());

        let outcome = self.analysis_api.analyze_document(document_id).await;
        if self.analysis_generation.load(Ordering::SeqCst) != generation {
            debug!("Dropping stale analysis settlement (generation {generation}).");
            return Ok(());
        }

        match outcome {
            Ok(result) => {
                self.mutate(|s| s.document.finish_analysis(result));
                Ok(())
            }
            Err(e) => {
                self.mutate(|s| s.document.fail_analysis(e.message()));
                Err(e)
            }
        }
    }

    //=====================================================================================
    // UI intents
    //=====================================================================================

    /// Pushes a notification and returns its assigned id.
    pub fn push_notification(&self, kind: NotificationKind, message: impl Into<String>) -> String {
        self.mutate(|s| s.ui.push_notification(kind, message))
    }

    pub fn dismiss_notification(&self, id: &str) {
        self.mutate(|s| s.ui.dismiss_notification(id));
    }

    pub fn toggle_theme(&self) {
        self.mutate(|s| s.ui.toggle_theme());
    }

    pub fn toggle_sidebar(&self) {
        self.mutate(|s| s.ui.toggle_sidebar());
    }

    pub fn open_modal(&self, name: impl Into<String>) {
        self.mutate(|s| s.ui.open_modal(name));
    }

    pub fn close_modal(&self) {
        self.mutate(|s| s.ui.close_modal());
    }
}

//=========================================================================================
// Tests
//=========================================================================================
