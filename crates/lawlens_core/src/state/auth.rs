//! crates/lawlens_core/src/state/auth.rs
//!
//! The authentication state machine: `anonymous` -> `authenticating` ->
//! `authenticated` (or back to `anonymous` with an error). Logout is the only
//! way back from `authenticated` and it always succeeds.

use crate::domain::Session;

/// State of the auth workflow. `session` and `is_authenticated` are persisted;
/// `is_loading` and `error` are transient and always rehydrate to defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    /// Pending transition for both login and signup: the workflow enters
    /// `authenticating` and any prior error is cleared.
    pub fn begin_request(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    /// Fulfilled transition: stores the complete session and marks the user
    /// authenticated. Login and signup share this shape.
    pub fn finish_request(&mut self, session: Session) {
        self.is_loading = false;
        self.session = Some(session);
        self.is_authenticated = true;
    }

    /// Rejected transition: records the human-readable message and drops the
    /// loading flag. The session is left as it was (for a failed first login
    /// that means it stays `None`).
    pub fn fail_request(&mut self, message: impl Into<String>) {
        self.is_loading = false;
        self.error = Some(message.into());
    }

    /// Explicit logout. Always succeeds, regardless of prior state: clears the
    /// session, the authenticated flag and any lingering error.
    pub fn logout(&mut self) {
        self.session = None;
        self.is_authenticated = false;
        self.error = None;
    }

    /// Clears the last error without touching the rest of the machine.
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
