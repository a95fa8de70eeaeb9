pub mod file_store;
pub mod http_auth;
pub mod mock_analysis;

pub use file_store::{FileCredentialStore, FileSnapshotStore};
pub use http_auth::HttpAuthAdapter;
pub use mock_analysis::MockAnalysisAdapter;
