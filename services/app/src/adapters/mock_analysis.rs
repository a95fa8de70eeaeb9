//! services/app/src/adapters/mock_analysis.rs
//!
//! This module contains the placeholder analysis adapter. The real analysis
//! engine lives behind an external service that is not part of this
//! repository, so the adapter simulates its latency and returns canned
//! results: a random risk score plus a fixed set of red flags and clauses.

use async_trait::async_trait;
use chrono::Utc;
use lawlens_core::domain::{
    AnalysisResult, Clause, RedFlag, Severity, UploadedDocument, UserContext,
};
use lawlens_core::ports::{AnalysisApi, PortResult};
use rand::Rng;
use std::time::Duration;
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `AnalysisApi` port with placeholder
/// behavior: uploads are acknowledged with a fresh id after a short delay,
/// analyses come back with a random score and canned findings.
#[derive(Clone)]
pub struct MockAnalysisAdapter {
    upload_delay: Duration,
    analysis_delay: Duration,
}

impl MockAnalysisAdapter {
    /// Creates an adapter with the latency the real endpoints exhibit.
    pub fn new() -> Self {
        Self {
            upload_delay: Duration::from_secs(2),
            analysis_delay: Duration::from_secs(3),
        }
    }

    /// Creates an adapter with no artificial latency, for tests.
    pub fn instant() -> Self {
        Self {
            upload_delay: Duration::ZERO,
            analysis_delay: Duration::ZERO,
        }
    }
}

impl Default for MockAnalysisAdapter {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================================
// `AnalysisApi` Trait Implementation
//=========================================================================================

#[async_trait]
impl AnalysisApi for MockAnalysisAdapter {
    async fn upload_document(
        &self,
        _payload: &[u8],
        name: &str,
        mime_type: &str,
        _context: &UserContext,
    ) -> PortResult<UploadedDocument> {
        tokio::time::sleep(self.upload_delay).await;
        Ok(UploadedDocument {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            uploaded_at: Utc::now(),
        })
    }

    async fn analyze_document(&self, _document_id: &str) -> PortResult<AnalysisResult> {
        tokio::time::sleep(self.analysis_delay).await;
        let risk_score = rand::thread_rng().gen_range(0..100);
        Ok(AnalysisResult {
            risk_score,
            red_flags: vec![
                RedFlag {
                    id: "1".to_string(),
                    severity: Severity::High,
                    title: "Automatic Renewal Clause".to_string(),
                    description: "Contract automatically renews without explicit consent"
                        .to_string(),
                    source_clause: "This agreement shall automatically renew for successive terms..."
                        .to_string(),
                },
                RedFlag {
                    id: "2".to_string(),
                    severity: Severity::Medium,
                    title: "Liability Limitation".to_string(),
                    description: "Limits company liability in case of damages".to_string(),
                    source_clause: "Company liability shall not exceed the amount paid..."
                        .to_string(),
                },
            ],
            summary: "This employment contract contains several standard clauses with moderate risk exposure."
                .to_string(),
            clauses: vec![Clause {
                id: "1".to_string(),
                text: "Employee agrees to work exclusively for the company...".to_string(),
                risk: Severity::Medium,
                explanation: "Non-compete clause may limit future employment opportunities"
                    .to_string(),
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_acknowledges_with_a_fresh_id() {
        let adapter = MockAnalysisAdapter::instant();
        let context = UserContext {
            age: 25,
            location: "NY".to_string(),
            purpose: "review".to_string(),
        };
        let first = adapter
            .upload_document(b"%PDF-", "lease.pdf", "application/pdf", &context)
            .await
            .unwrap();
        let second = adapter
            .upload_document(b"%PDF-", "lease.pdf", "application/pdf", &context)
            .await
            .unwrap();

        assert_eq!(first.name, "lease.pdf");
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn analysis_scores_stay_in_the_closed_interval() {
        let adapter = MockAnalysisAdapter::instant();
        for _ in 0..20 {
            let result = adapter.analyze_document("doc1").await.unwrap();
            assert!(result.risk_score <= 100);
            assert!(!result.red_flags.is_empty());
        }
    }
}
