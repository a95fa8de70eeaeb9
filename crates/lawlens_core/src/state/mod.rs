//! crates/lawlens_core/src/state/mod.rs
//!
//! The three workflow state slices and the root state composing them.
//!
//! Each slice is a plain struct with synchronous transition methods and no
//! I/O, so every reachable state is unit-testable without a runtime. Only the
//! `Store` (see `crate::store`) is allowed to call the transitions.

pub mod auth;
pub mod document;
pub mod ui;

pub use auth::AuthState;
pub use document::DocumentState;
pub use ui::UiState;

/// The single process-wide state snapshot, composed of one slice per
/// workflow. `auth` and `document` are (partially) persisted; `ui` never is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootState {
    pub auth: AuthState,
    pub document: DocumentState,
    pub ui: UiState,
}
