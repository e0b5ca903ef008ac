//! HTTP client for the resume backend. The only code that talks to the network.
//!
//! Extraction, enhancement, scoring, template listing and PDF rendering all
//! live behind this seam. `ResumeBackend` is the trait the gateway depends on,
//! `HttpBackend` the production implementation.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{multipart, Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::errors::GatewayError;
use crate::gateway::upload::UploadFile;
use crate::models::{EnhancementResult, FeedbackResult, ResumeRecord, TemplateDescriptor};

pub const EXTRACT_ENDPOINT: &str = "/extract";
pub const ENHANCE_ENDPOINT: &str = "/enhance";
pub const ATS_SCORE_ENDPOINT: &str = "/ats-score";
pub const TEMPLATES_ENDPOINT: &str = "/templates";
pub const GENERATE_PDF_ENDPOINT: &str = "/generate-pdf";

#[async_trait]
pub trait ResumeBackend: Send + Sync {
    async fn extract(&self, file: &UploadFile) -> Result<ResumeRecord, GatewayError>;

    async fn enhance(&self, record: &ResumeRecord) -> Result<EnhancementResult, GatewayError>;

    async fn ats_score(
        &self,
        record: &ResumeRecord,
        job_description: &str,
    ) -> Result<FeedbackResult, GatewayError>;

    async fn list_templates(&self) -> Result<Vec<TemplateDescriptor>, GatewayError>;

    async fn generate_pdf(
        &self,
        record: &ResumeRecord,
        template_id: &str,
    ) -> Result<Bytes, GatewayError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AtsScoreRequest<'a> {
    resume_data: &'a ResumeRecord,
    job_description: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeneratePdfRequest<'a> {
    resume_data: &'a ResumeRecord,
    template_id: &'a str,
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    config: Config,
}

impl HttpBackend {
    pub fn new(config: Config) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { client, config })
    }

    async fn post_json<T, R>(&self, endpoint: &str, body: &T) -> Result<R, GatewayError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.config.endpoint_url(endpoint);
        debug!("POST {url}");
        let response = self.client.post(&url).json(body).send().await?;
        read_json(ensure_success(response).await?).await
    }
}

#[async_trait]
impl ResumeBackend for HttpBackend {
    async fn extract(&self, file: &UploadFile) -> Result<ResumeRecord, GatewayError> {
        let part = multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        let form = multipart::Form::new().part("file", part);

        let url = self.config.endpoint_url(EXTRACT_ENDPOINT);
        debug!("POST {url} ({} bytes)", file.size());
        let response = self.client.post(&url).multipart(form).send().await?;
        read_json(ensure_success(response).await?).await
    }

    async fn enhance(&self, record: &ResumeRecord) -> Result<EnhancementResult, GatewayError> {
        self.post_json(ENHANCE_ENDPOINT, record).await
    }

    async fn ats_score(
        &self,
        record: &ResumeRecord,
        job_description: &str,
    ) -> Result<FeedbackResult, GatewayError> {
        self.post_json(
            ATS_SCORE_ENDPOINT,
            &AtsScoreRequest {
                resume_data: record,
                job_description,
            },
        )
        .await
    }

    async fn list_templates(&self) -> Result<Vec<TemplateDescriptor>, GatewayError> {
        let url = self.config.endpoint_url(TEMPLATES_ENDPOINT);
        debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        read_json(ensure_success(response).await?).await
    }

    async fn generate_pdf(
        &self,
        record: &ResumeRecord,
        template_id: &str,
    ) -> Result<Bytes, GatewayError> {
        let url = self.config.endpoint_url(GENERATE_PDF_ENDPOINT);
        debug!("POST {url} (template {template_id})");
        let response = self
            .client
            .post(&url)
            .json(&GeneratePdfRequest {
                resume_data: record,
                template_id,
            })
            .send()
            .await?;
        let bytes = ensure_success(response).await?.bytes().await?;
        if bytes.is_empty() {
            return Err(GatewayError::EmptyBody);
        }
        Ok(bytes)
    }
}

/// Turns any non-2xx response into `GatewayError::Api`.
async fn ensure_success(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or(body);
    Err(GatewayError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn read_json<R: DeserializeOwned>(response: Response) -> Result<R, GatewayError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Pulls a human-readable message out of the backend's error envelopes:
/// `{"error": "..."}`, `{"error": {"message": "..."}}`, `{"message": "..."}`
/// or `{"detail": "..."}`.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let candidates = [
        value.get("error").and_then(Value::as_str),
        value.pointer("/error/message").and_then(Value::as_str),
        value.get("message").and_then(Value::as_str),
        value.get("detail").and_then(Value::as_str),
    ];
    let found = candidates.into_iter().flatten().next().map(String::from);
    found
}
