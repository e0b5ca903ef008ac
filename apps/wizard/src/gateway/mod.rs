//! Remote Operation Gateway.
//!
//! Every backend call goes through here and follows one contract:
//! validate locally, call, normalize, fall back on failure.
//! Only upload and PDF generation surface errors; everything else degrades
//! to a deterministic fallback so the wizard is never blocked.

pub mod client;
pub mod fallback;
pub mod upload;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::errors::{Result, WizardError};
use crate::models::{EnhancementResult, FeedbackResult, ResumeRecord, TemplateDescriptor};
use client::ResumeBackend;
use fallback::display_name;
use upload::{validate_upload, UploadFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Word,
}

impl DocumentFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Word => "docx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            // The Word path only ever produces a text placeholder.
            DocumentFormat::Word => "text/plain",
        }
    }
}

/// A rendered resume ready to be saved.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub format: DocumentFormat,
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

pub struct Gateway<B> {
    backend: B,
    max_upload_bytes: u64,
}

impl<B: ResumeBackend> Gateway<B> {
    pub fn new(backend: B, max_upload_bytes: u64) -> Self {
        Self {
            backend,
            max_upload_bytes,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Validates and uploads a resume file for extraction.
    /// There is no fallback: without real content the wizard cannot proceed.
    pub async fn upload(&self, file: &UploadFile) -> Result<ResumeRecord> {
        validate_upload(file, self.max_upload_bytes)?;

        match self.backend.extract(file).await {
            Ok(record) => {
                info!("Extracted resume from {}", file.file_name);
                Ok(record.normalized())
            }
            Err(e) => {
                error!("Resume extraction failed for {}: {e}", file.file_name);
                Err(WizardError::Upload(e))
            }
        }
    }

    pub async fn enhance(&self, record: &ResumeRecord) -> EnhancementResult {
        match self.backend.enhance(record).await {
            Ok(mut result) => {
                if result.original_resume == ResumeRecord::default() {
                    result.original_resume = record.clone();
                }
                result.normalize();
                result.enhanced_resume.dedup_skills();
                result
            }
            Err(e) => {
                error!("Resume enhancement failed, using fallback enhancement: {e}");
                fallback::mock_enhancement(record)
            }
        }
    }

    pub async fn ats_score(
        &self,
        record: &ResumeRecord,
        job_description: &str,
    ) -> FeedbackResult {
        match self.backend.ats_score(record, job_description).await {
            Ok(feedback) => feedback,
            Err(e) => {
                error!("ATS scoring failed, using fallback score: {e}");
                fallback::mock_feedback()
            }
        }
    }

    /// An empty catalog is treated like a failure; the wizard needs something to pick.
    pub async fn list_templates(&self) -> Vec<TemplateDescriptor> {
        match self.backend.list_templates().await {
            Ok(templates) if !templates.is_empty() => templates
                .into_iter()
                .map(|mut t| {
                    t.normalize();
                    t
                })
                .collect(),
            Ok(_) => {
                warn!("Template catalog is empty, using built-in templates");
                fallback::default_templates()
            }
            Err(e) => {
                error!("Failed to load templates, using built-in templates: {e}");
                fallback::default_templates()
            }
        }
    }

    /// Renders the resume. PDF failures are surfaced; Word never reaches the backend.
    pub async fn generate(
        &self,
        record: &ResumeRecord,
        template_id: &str,
        format: DocumentFormat,
    ) -> Result<GeneratedDocument> {
        let bytes = match format {
            DocumentFormat::Pdf => self
                .backend
                .generate_pdf(record, template_id)
                .await
                .map_err(|e| {
                    error!("PDF generation failed for template {template_id}: {e}");
                    WizardError::Generate(e)
                })?,
            DocumentFormat::Word => fallback::word_placeholder(record, template_id),
        };

        Ok(GeneratedDocument {
            format,
            file_name: document_file_name(record, template_id, format),
            content_type: format.content_type(),
            bytes,
        })
    }
}

/// `<full name or "Resume">_<template>.<ext>`, with path separators replaced.
pub fn document_file_name(
    record: &ResumeRecord,
    template_id: &str,
    format: DocumentFormat,
) -> String {
    let name = format!(
        "{}_{}.{}",
        display_name(record),
        template_id,
        format.extension()
    );
    name.replace(['/', '\\'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::fixtures::sample_resume;
    use crate::testing::StubBackend;
    use upload::{DOCX_MIME, PDF_MIME};

    const LIMIT: u64 = 10 * 1024 * 1024;

    #[tokio::test]
    async fn test_rejected_mime_makes_no_network_call() {
        let gateway = Gateway::new(StubBackend::healthy(), LIMIT);
        let file = UploadFile::new("notes.txt", "text/plain", &b"hello"[..]);

        let err = gateway.upload(&file).await.unwrap_err();
        assert!(matches!(err, WizardError::InvalidFileType { .. }));
        assert!(err.to_string().contains("PDF, DOCX, DOC"));
        assert_eq!(gateway.backend().call_count(), 0);
    }

    #[tokio::test]
    async fn test_oversized_upload_makes_no_network_call() {
        let gateway = Gateway::new(StubBackend::healthy(), 4);
        let file = UploadFile::new("cv.docx", DOCX_MIME, &b"12345"[..]);

        assert!(matches!(
            gateway.upload(&file).await,
            Err(WizardError::FileTooLarge { .. })
        ));
        assert_eq!(gateway.backend().call_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_failure_is_surfaced() {
        let gateway = Gateway::new(StubBackend::failing(), LIMIT);
        let file = UploadFile::new("cv.pdf", PDF_MIME, &b"%PDF"[..]);

        let err = gateway.upload(&file).await.unwrap_err();
        assert!(matches!(err, WizardError::Upload(_)));
        assert_eq!(gateway.backend().call_count(), 1);
    }

    #[tokio::test]
    async fn test_enhance_success_is_normalized() {
        let gateway = Gateway::new(StubBackend::healthy(), LIMIT);
        let record = sample_resume();

        let result = gateway.enhance(&record).await;
        assert_eq!(result.original_resume, record);
        assert_eq!(result.enhanced_resume.skills, vec!["Java", "SQL"]);
        assert!(result.enhanced_resume.summary.starts_with("Enhanced: "));
    }

    #[tokio::test]
    async fn test_enhance_failure_falls_back() {
        let gateway = Gateway::new(StubBackend::failing(), LIMIT);
        let result = gateway.enhance(&sample_resume()).await;

        assert_eq!(
            result.enhanced_resume.skills,
            vec!["Java", "SQL", "Leadership", "Strategic Planning", "Problem Solving"]
        );
        assert!(!result.improvements.is_empty());
        assert!(!result.ai_suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_ats_failure_keeps_full_schema() {
        let gateway = Gateway::new(StubBackend::failing(), LIMIT);
        let feedback = gateway.ats_score(&sample_resume(), "").await;

        assert!(feedback.ats_score <= 100);
        assert_eq!(feedback.ats_score, fallback::FALLBACK_ATS_SCORE);
        assert!(!feedback.keyword_density.is_empty());

        // Same serialized shape as a real response.
        let value = serde_json::to_value(&feedback).unwrap();
        for key in [
            "atsScore",
            "missingSkills",
            "keywordDensity",
            "suggestions",
            "formatIssues",
            "matchPercentage",
            "recommendations",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }

    #[tokio::test]
    async fn test_templates_fall_back_on_failure_and_empty_catalog() {
        let failing = Gateway::new(StubBackend::failing(), LIMIT);
        assert_eq!(failing.list_templates().await, fallback::default_templates());

        let empty = Gateway::new(StubBackend::default(), LIMIT);
        assert_eq!(empty.list_templates().await.len(), 5);

        let healthy = Gateway::new(StubBackend::healthy(), LIMIT);
        let templates = healthy.list_templates().await;
        assert_eq!(templates.len(), 2);
        assert!(templates.iter().all(|t| !t.preview.is_empty()));
    }

    #[tokio::test]
    async fn test_pdf_failure_is_surfaced() {
        let gateway = Gateway::new(StubBackend::failing(), LIMIT);
        let err = gateway
            .generate(&sample_resume(), "minimalist", DocumentFormat::Pdf)
            .await
            .unwrap_err();
        assert!(matches!(err, WizardError::Generate(_)));
    }

    #[tokio::test]
    async fn test_word_never_calls_backend() {
        let gateway = Gateway::new(StubBackend::failing(), LIMIT);
        let doc = gateway
            .generate(&sample_resume(), "traditional", DocumentFormat::Word)
            .await
            .unwrap();

        assert_eq!(gateway.backend().call_count(), 0);
        assert_eq!(doc.file_name, "Jane Doe_traditional.docx");
        assert_eq!(doc.content_type, "text/plain");
        assert!(!doc.bytes.is_empty());
    }

    #[test]
    fn test_file_name_defaults_to_resume() {
        let record = ResumeRecord::default();
        assert_eq!(
            document_file_name(&record, "minimalist", DocumentFormat::Pdf),
            "Resume_minimalist.pdf"
        );
    }
}
