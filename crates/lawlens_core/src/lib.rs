pub mod domain;
pub mod persist;
pub mod ports;
pub mod state;
pub mod store;

pub use domain::{
    AnalysisResult, Clause, Document, Gender, Notification, NotificationKind, RedFlag,
    RiskHistoryPoint, Session, Severity, UploadedDocument, UserContext,
};
pub use persist::PersistedSnapshot;
pub use ports::{
    AnalysisApi, AuthApi, CredentialStore, LoginOutcome, PortError, PortResult, SnapshotStore,
};
pub use state::{AuthState, DocumentState, RootState, UiState};
pub use store::Store;
