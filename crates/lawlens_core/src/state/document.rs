//! crates/lawlens_core/src/state/document.rs
//!
//! The document workflow state machine. Two independently tracked slots:
//! upload (`idle -> uploading -> uploaded | upload_failed`) and, gated on a
//! completed upload, analysis (`idle -> analyzing -> analyzed |
//! analysis_failed`). The loading flags are the machine's `uploading` /
//! `analyzing` markers; the failed states are `error` plus a dropped flag.

use chrono::Utc;
use crate::domain::{AnalysisResult, Document, RiskHistoryPoint, UploadedDocument, UserContext};

/// State of the document workflow. `documents`, `current_document` and
/// `risk_history` are persisted; the loading flags, the user context and the
/// error are transient.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentState {
    pub documents: Vec<Document>,
    pub current_document: Option<Document>,
    pub upload_loading: bool,
    pub analysis_loading: bool,
    pub user_context: Option<UserContext>,
    pub risk_history: Vec<RiskHistoryPoint>,
    pub error: Option<String>,
}

//=========================================================================================
// Transitions
//=========================================================================================

impl DocumentState {
    /// Stores the context to send with the next upload. No validation here:
    /// a fully populated context is the caller's responsibility.
    pub fn set_user_context(&mut self, context: UserContext) {
        self.user_context = Some(context);
    }

    /// Repoints `current_document` at the collection entry with this id.
    /// An unknown id is a no-op, so the pointer can never leave the
    /// collection.
    pub fn set_current_document(&mut self, document_id: &str) {
        if let Some(doc) = self.documents.iter().find(|d| d.id == document_id) {
            self.current_document = Some(doc.clone());
        }
    }

    /// Pending transition of the upload slot.
    pub fn begin_upload(&mut self) {
        self.upload_loading = true;
        self.error = None;
    }

    /// Fulfilled transition of the upload slot: the server-assigned identity
    /// becomes a full `Document` (no analysis result yet), is appended to the
    /// collection and becomes the current document.
    pub fn finish_upload(&mut self, uploaded: UploadedDocument) {
        self.upload_loading = false;
        let document = Document {
            id: uploaded.id,
            name: uploaded.name,
            mime_type: uploaded.mime_type,
            uploaded_at: uploaded.uploaded_at,
            analysis_result: None,
        };
        self.documents.push(document.clone());
        self.current_document = Some(document);
    }

    /// Rejected transition of the upload slot. No partial document is
    /// created; the current document stays whatever it was before.
    pub fn fail_upload(&mut self, message: impl Into<String>) {
        self.upload_loading = false;
        self.error = Some(message.into());
    }

    /// Pending transition of the analysis slot.
    pub fn begin_analysis(&mut self) {
        self.analysis_loading = true;
        self.error = None;
    }

    /// Fulfilled transition of the analysis slot: attaches the result to the
    /// current document, mirrors that same content into the collection entry
    /// with the matching id (the two must never diverge), and appends a point
    /// to the risk history.
    pub fn finish_analysis(&mut self, result: AnalysisResult) {
        self.analysis_loading = false;
        if let Some(current) = self.current_document.as_mut() {
            let score = result.risk_score;
            current.analysis_result = Some(result);
            let current = current.clone();
            if let Some(entry) = self.documents.iter_mut().find(|d| d.id == current.id) {
                *entry = current;
            }
            self.risk_history.push(RiskHistoryPoint {
                date: Utc::now().date_naive(),
                score,
            });
        }
    }

    /// Rejected transition of the analysis slot. The document keeps no
    /// result and the machine is retryable: a later `begin_analysis` for the
    /// same document is permitted.
    pub fn fail_analysis(&mut self, message: impl Into<String>) {
        self.analysis_loading = false;
        self.error = Some(message.into());
    }

    /// Clears the last workflow error.
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

//=========================================================================================
// Derived Reads (pure functions over the canonical state, never stored)
//=========================================================================================

impl DocumentState {
    /// The `n` most recently uploaded documents, newest first.
    pub fn recent_documents(&self, n: usize) -> Vec<Document> {
        self.documents.iter().rev().take(n).cloned().collect()
    }

    /// Arithmetic mean of the risk history. An empty history averages to
    /// `0.0` by definition, never NaN.
    pub fn average_risk_score(&self) -> f64 {
        if self.risk_history.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.risk_history.iter().map(|p| u32::from(p.score)).sum();
        f64::from(sum) / self.risk_history.len() as f64
    }

    /// Percentage change between the oldest and newest history point, rounded
    /// to the nearest integer. Defined as `0` for fewer than two points and
    /// for a zero-valued baseline (no division by zero).
    pub fn risk_trend_percent(&self) -> i32 {
        let (Some(first), Some(last)) = (self.risk_history.first(), self.risk_history.last())
        else {
            return 0;
        };
        if self.risk_history.len() < 2 || first.score == 0 {
            return 0;
        }
        let first = f64::from(first.score);
        let last = f64::from(last.score);
        (((last - first) / first) * 100.0).round() as i32
    }

    /// Total red flags across every analyzed document in the collection.
    pub fn total_red_flags(&self) -> usize {
        self.documents
            .iter()
            .filter_map(|d| d.analysis_result.as_ref())
            .map(|r| r.red_flags.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RedFlag, Severity};
    use chrono::NaiveDate;

    fn uploaded(id: &str, name: &str) -> UploadedDocument {
        UploadedDocument {
            id: id.to_string(),
            name: name.to_string(),
            mime_type: "application/pdf".to_string(),
            uploaded_at: Utc::now(),
        }
    }

    fn result_with_score(score: u8) -> AnalysisResult {
        AnalysisResult {
            risk_score: score,
            red_flags: vec![RedFlag {
                id: "1".to_string(),
                severity: Severity::High,
                title: "Automatic Renewal Clause".to_string(),
                description: "Contract automatically renews without explicit consent".to_string(),
                source_clause: "This agreement shall automatically renew...".to_string(),
            }],
            summary: "Moderate risk exposure.".to_string(),
            clauses: Vec::new(),
        }
    }

    fn point(date: (i32, u32, u32), score: u8) -> RiskHistoryPoint {
        RiskHistoryPoint {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            score,
        }
    }

    #[test]
    fn successful_upload_appends_once_and_repoints_current() {
        let mut state = DocumentState::default();
        state.begin_upload();
        assert!(state.upload_loading);

        state.finish_upload(uploaded("doc1", "lease.pdf"));
        assert!(!state.upload_loading);

        let current = state.current_document.as_ref().unwrap();
        assert_eq!(current.name, "lease.pdf");
        assert_eq!(current.analysis_result, None);
        let matches = state.documents.iter().filter(|d| d.id == "doc1").count();
        assert_eq!(matches, 1);
    }

    #[test]
    fn failed_upload_creates_no_partial_document() {
        let mut state = DocumentState::default();
        state.finish_upload(uploaded("doc1", "lease.pdf"));

        state.begin_upload();
        state.fail_upload("Upload failed");

        assert!(!state.upload_loading);
        assert_eq!(state.documents.len(), 1);
        assert_eq!(state.current_document.as_ref().unwrap().id, "doc1");
        assert_eq!(state.error.as_deref(), Some("Upload failed"));
    }

    #[test]
    fn analysis_result_never_diverges_between_current_and_collection() {
        let mut state = DocumentState::default();
        state.finish_upload(uploaded("doc1", "lease.pdf"));
        state.begin_analysis();
        state.finish_analysis(result_with_score(72));

        let current = state.current_document.as_ref().unwrap();
        let entry = state.documents.iter().find(|d| d.id == "doc1").unwrap();
        assert_eq!(current.analysis_result, entry.analysis_result);
        assert_eq!(entry.analysis_result.as_ref().unwrap().risk_score, 72);
    }

    #[test]
    fn later_analysis_overwrites_the_prior_result_whole() {
        let mut state = DocumentState::default();
        state.finish_upload(uploaded("doc1", "lease.pdf"));
        state.finish_analysis(result_with_score(30));
        state.finish_analysis(result_with_score(85));

        let entry = state.documents.iter().find(|d| d.id == "doc1").unwrap();
        assert_eq!(entry.analysis_result.as_ref().unwrap().risk_score, 85);
        assert_eq!(state.risk_history.len(), 2);
        assert_eq!(state.risk_history.last().unwrap().score, 85);
    }

    #[test]
    fn set_current_document_ignores_unknown_ids() {
        let mut state = DocumentState::default();
        state.finish_upload(uploaded("doc1", "lease.pdf"));
        state.finish_upload(uploaded("doc2", "nda.pdf"));

        state.set_current_document("doc1");
        assert_eq!(state.current_document.as_ref().unwrap().id, "doc1");

        state.set_current_document("nope");
        assert_eq!(state.current_document.as_ref().unwrap().id, "doc1");
    }

    #[test]
    fn recent_documents_are_newest_first() {
        let mut state = DocumentState::default();
        state.finish_upload(uploaded("doc1", "first.pdf"));
        state.finish_upload(uploaded("doc2", "second.pdf"));
        state.finish_upload(uploaded("doc3", "third.pdf"));

        let recent = state.recent_documents(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, "doc3");
        assert_eq!(recent[1].id, "doc2");
    }

    #[test]
    fn average_over_empty_history_is_zero_not_nan() {
        let state = DocumentState::default();
        assert_eq!(state.average_risk_score(), 0.0);
    }

    #[test]
    fn average_is_the_arithmetic_mean() {
        let mut state = DocumentState::default();
        state.risk_history = vec![
            point((2025, 1, 1), 45),
            point((2025, 1, 15), 62),
            point((2025, 1, 30), 38),
        ];
        let avg = state.average_risk_score();
        assert!((avg - 145.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn trend_guards_short_histories_and_zero_baselines() {
        let mut state = DocumentState::default();
        assert_eq!(state.risk_trend_percent(), 0);

        state.risk_history = vec![point((2025, 1, 1), 45)];
        assert_eq!(state.risk_trend_percent(), 0);

        state.risk_history = vec![point((2025, 1, 1), 0), point((2025, 1, 15), 80)];
        assert_eq!(state.risk_trend_percent(), 0);

        state.risk_history = vec![point((2025, 1, 1), 50), point((2025, 1, 15), 75)];
        assert_eq!(state.risk_trend_percent(), 50);
    }

    #[test]
    fn red_flags_are_summed_across_analyzed_documents() {
        let mut state = DocumentState::default();
        state.finish_upload(uploaded("doc1", "lease.pdf"));
        state.finish_analysis(result_with_score(40));
        state.finish_upload(uploaded("doc2", "nda.pdf"));

        // doc2 has no result yet and contributes nothing.
        assert_eq!(state.total_red_flags(), 1);
    }
}
