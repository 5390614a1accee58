//! API client: the single point of entry for all calls to the resume compiler service.
//!
//! Components never build requests themselves; they go through `CompilerApi`.
//! No retries, no caching: transport and HTTP errors reach the caller as-is.
use async_trait::async_trait;
use reqwest::{multipart, Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::ClientError;
use crate::models::job_description::CreateJobDescriptionRequest;
use crate::models::outcome::RecordOutcomeRequest;
use crate::models::resume::ResumeFile;
use crate::models::variant::{CompileVariantRequest, VariantFilter};
use crate::models::{
    ApplicationOutcome, JobDescription, OutcomeStatus, Persona, Platform, Resume, ResumeVariant,
};

#[cfg(test)]
pub mod fake;

/// Banner returned by `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub docs: Option<String>,
}

/// Typed operations of the resume compiler service.
///
/// Components hold an `Arc<dyn CompilerApi>`; tests swap in an in-memory fake.
#[async_trait]
pub trait CompilerApi: Send + Sync {
    async fn service_info(&self) -> Result<ServiceInfo, ClientError>;

    async fn upload_resume(&self, file: ResumeFile, user_id: &str) -> Result<Resume, ClientError>;

    async fn get_resume(&self, id: &str) -> Result<Resume, ClientError>;

    async fn list_resumes(&self, user_id: &str) -> Result<Vec<Resume>, ClientError>;

    async fn create_job_description(
        &self,
        platform: Platform,
        raw_text: &str,
    ) -> Result<JobDescription, ClientError>;

    async fn get_job_description(&self, id: &str) -> Result<JobDescription, ClientError>;

    async fn compile_variant(
        &self,
        resume_id: &str,
        jd_id: &str,
        persona: Persona,
        platform: Platform,
    ) -> Result<ResumeVariant, ClientError>;

    async fn get_variant(&self, id: &str) -> Result<ResumeVariant, ClientError>;

    /// Filters that are `None` are omitted from the query string.
    async fn list_variants(
        &self,
        resume_id: Option<&str>,
        jd_id: Option<&str>,
    ) -> Result<Vec<ResumeVariant>, ClientError>;

    async fn record_outcome(
        &self,
        variant_id: &str,
        status: OutcomeStatus,
    ) -> Result<ApplicationOutcome, ClientError>;

    async fn list_outcomes(
        &self,
        variant_id: Option<&str>,
    ) -> Result<Vec<ApplicationOutcome>, ClientError>;
}

/// HTTP implementation of `CompilerApi` over `reqwest`.
///
/// No per-request timeout is configured: compilation can run long server-side,
/// so the transport's defaults apply.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a prepared request and decodes a 2xx JSON body into `T`.
    /// Non-2xx responses become `ClientError::Request` carrying the backend detail.
    async fn send<T: DeserializeOwned>(
        &self,
        label: &str,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{label} returned {status}: {body}");
            return Err(ClientError::from_response_body(status, &body));
        }

        let body = response.bytes().await?;
        debug!("{label} succeeded ({} bytes)", body.len());
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl CompilerApi for ApiClient {
    async fn service_info(&self) -> Result<ServiceInfo, ClientError> {
        self.send("GET /", self.client.get(self.url("/"))).await
    }

    async fn upload_resume(&self, file: ResumeFile, user_id: &str) -> Result<Resume, ClientError> {
        let mime = file.mime_type();
        let part = multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name)
            .mime_str(mime)?;
        // reqwest sets the multipart content type and boundary itself.
        let form = multipart::Form::new()
            .part("file", part)
            .text("user_id", user_id.to_string());

        self.send(
            "POST /resumes/upload",
            self.client.post(self.url("/resumes/upload")).multipart(form),
        )
        .await
    }

    async fn get_resume(&self, id: &str) -> Result<Resume, ClientError> {
        self.send(
            "GET /resumes/{id}",
            self.client.get(self.url(&format!("/resumes/{id}"))),
        )
        .await
    }

    async fn list_resumes(&self, user_id: &str) -> Result<Vec<Resume>, ClientError> {
        self.send(
            "GET /resumes",
            self.client
                .get(self.url("/resumes"))
                .query(&[("user_id", user_id)]),
        )
        .await
    }

    async fn create_job_description(
        &self,
        platform: Platform,
        raw_text: &str,
    ) -> Result<JobDescription, ClientError> {
        let body = CreateJobDescriptionRequest { platform, raw_text };
        self.send("POST /jds", self.client.post(self.url("/jds")).json(&body))
            .await
    }

    async fn get_job_description(&self, id: &str) -> Result<JobDescription, ClientError> {
        self.send(
            "GET /jds/{id}",
            self.client.get(self.url(&format!("/jds/{id}"))),
        )
        .await
    }

    async fn compile_variant(
        &self,
        resume_id: &str,
        jd_id: &str,
        persona: Persona,
        platform: Platform,
    ) -> Result<ResumeVariant, ClientError> {
        let body = CompileVariantRequest {
            resume_id,
            jd_id,
            persona,
            platform,
        };
        self.send(
            "POST /variants/compile",
            self.client.post(self.url("/variants/compile")).json(&body),
        )
        .await
    }

    async fn get_variant(&self, id: &str) -> Result<ResumeVariant, ClientError> {
        self.send(
            "GET /variants/{id}",
            self.client.get(self.url(&format!("/variants/{id}"))),
        )
        .await
    }

    async fn list_variants(
        &self,
        resume_id: Option<&str>,
        jd_id: Option<&str>,
    ) -> Result<Vec<ResumeVariant>, ClientError> {
        let filter = VariantFilter { resume_id, jd_id };
        self.send(
            "GET /variants",
            self.client.get(self.url("/variants")).query(&filter),
        )
        .await
    }

    async fn record_outcome(
        &self,
        variant_id: &str,
        status: OutcomeStatus,
    ) -> Result<ApplicationOutcome, ClientError> {
        let body = RecordOutcomeRequest { variant_id, status };
        self.send(
            "POST /outcomes",
            self.client.post(self.url("/outcomes")).json(&body),
        )
        .await
    }

    async fn list_outcomes(
        &self,
        variant_id: Option<&str>,
    ) -> Result<Vec<ApplicationOutcome>, ClientError> {
        let mut request = self.client.get(self.url("/outcomes"));
        if let Some(variant_id) = variant_id {
            request = request.query(&[("variant_id", variant_id)]);
        }
        self.send("GET /outcomes", request).await
    }
}
