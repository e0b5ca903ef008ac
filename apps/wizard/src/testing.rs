//! In-memory backend for gateway and wizard tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::GatewayError;
use crate::gateway::client::ResumeBackend;
use crate::gateway::upload::UploadFile;
use crate::models::resume::fixtures::sample_resume;
use crate::models::{EnhancementResult, FeedbackResult, ResumeRecord, TemplateDescriptor};

/// Scripted backend that counts every call it receives.
#[derive(Clone, Default)]
pub struct StubBackend {
    pub calls: Arc<AtomicUsize>,
    pub fail: bool,
    pub templates: Vec<TemplateDescriptor>,
    pub last_job_description: Arc<Mutex<Option<String>>>,
}

impl StubBackend {
    pub fn healthy() -> Self {
        Self {
            templates: vec![
                TemplateDescriptor::new("minimalist", "Minimalist", "Clean", ""),
                TemplateDescriptor::new("traditional", "Traditional", "Classic", ""),
            ],
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) -> Result<(), GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(GatewayError::Api {
                status: 503,
                message: "backend unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ResumeBackend for StubBackend {
    async fn extract(&self, _file: &UploadFile) -> Result<ResumeRecord, GatewayError> {
        self.hit()?;
        Ok(sample_resume())
    }

    async fn enhance(&self, record: &ResumeRecord) -> Result<EnhancementResult, GatewayError> {
        self.hit()?;
        let mut enhanced = record.clone();
        enhanced.summary = format!("Enhanced: {}", record.summary);
        enhanced.skills.push(record.skills.first().cloned().unwrap_or_default());
        Ok(EnhancementResult {
            original_resume: ResumeRecord::default(),
            enhanced_resume: enhanced,
            improvements: vec!["Sharpened summary".to_string()],
            ai_suggestions: Vec::new(),
        })
    }

    async fn ats_score(
        &self,
        _record: &ResumeRecord,
        job_description: &str,
    ) -> Result<FeedbackResult, GatewayError> {
        self.hit()?;
        if let Ok(mut last) = self.last_job_description.lock() {
            *last = Some(job_description.to_string());
        }
        Ok(FeedbackResult {
            ats_score: 91,
            ..FeedbackResult::default()
        })
    }

    async fn list_templates(&self) -> Result<Vec<TemplateDescriptor>, GatewayError> {
        self.hit()?;
        Ok(self.templates.clone())
    }

    async fn generate_pdf(
        &self,
        _record: &ResumeRecord,
        template_id: &str,
    ) -> Result<Bytes, GatewayError> {
        self.hit()?;
        Ok(Bytes::from(format!("%PDF-1.4 {template_id}")))
    }
}
