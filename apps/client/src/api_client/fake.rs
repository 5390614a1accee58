//! In-memory `CompilerApi` used by component tests. Records every call and
//! answers from queued responses, falling back to canned fixtures.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::StatusCode;

use super::{CompilerApi, ServiceInfo};
use crate::errors::ClientError;
use crate::models::resume::ResumeFile;
use crate::models::variant::SurvivabilityScores;
use crate::models::{
    ApplicationOutcome, JobDescription, OutcomeStatus, Persona, Platform, Resume, ResumeVariant,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ServiceInfo,
    UploadResume { file_name: String, user_id: String },
    GetResume(String),
    ListResumes(String),
    CreateJobDescription { platform: Platform, raw_text: String },
    GetJobDescription(String),
    CompileVariant {
        resume_id: String,
        jd_id: String,
        persona: Persona,
        platform: Platform,
    },
    GetVariant(String),
    ListVariants {
        resume_id: Option<String>,
        jd_id: Option<String>,
    },
    RecordOutcome { variant_id: String, status: OutcomeStatus },
    ListOutcomes(Option<String>),
}

/// A canned HTTP failure; rebuilt into a `ClientError` when served.
#[derive(Debug, Clone)]
pub struct Failure {
    pub status: StatusCode,
    pub body: String,
}

impl Failure {
    pub fn detail(status: u16, detail: &str) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            body: serde_json::json!({ "detail": detail }).to_string(),
        }
    }

    pub fn bare(status: u16) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            body: String::new(),
        }
    }

    fn into_error(self) -> ClientError {
        ClientError::from_response_body(self.status, &self.body)
    }
}

type Queue<T> = Mutex<VecDeque<Result<T, Failure>>>;

#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    pub uploads: Queue<Resume>,
    pub jds: Queue<JobDescription>,
    pub compiles: Queue<ResumeVariant>,
    pub variant_lists: Queue<Vec<ResumeVariant>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn push_upload(&self, result: Result<Resume, Failure>) {
        self.uploads.lock().unwrap().push_back(result);
    }

    pub fn push_jd(&self, result: Result<JobDescription, Failure>) {
        self.jds.lock().unwrap().push_back(result);
    }

    pub fn push_compile(&self, result: Result<ResumeVariant, Failure>) {
        self.compiles.lock().unwrap().push_back(result);
    }

    pub fn push_variant_list(&self, result: Result<Vec<ResumeVariant>, Failure>) {
        self.variant_lists.lock().unwrap().push_back(result);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn serve<T>(queue: &Queue<T>, fallback: impl FnOnce() -> T) -> Result<T, ClientError> {
    match queue.lock().unwrap().pop_front() {
        Some(Ok(value)) => Ok(value),
        Some(Err(failure)) => Err(failure.into_error()),
        None => Ok(fallback()),
    }
}

pub fn resume(id: &str) -> Resume {
    Resume {
        id: id.to_string(),
        user_id: "default_user".to_string(),
        raw_text: "Jane Doe\nSenior Engineer".to_string(),
        parsed_json: None,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    }
}

pub fn job_description(id: &str, platform: Platform) -> JobDescription {
    JobDescription {
        id: id.to_string(),
        platform,
        raw_text: "Senior Engineer...".to_string(),
        extracted_signals: None,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 5, 0).unwrap(),
    }
}

pub fn scores(keyword: f64, title: f64, survivability: f64) -> SurvivabilityScores {
    SurvivabilityScores {
        keyword_score: keyword,
        title_score: title,
        age_proxy_risk: 0.1,
        overqual_risk: 0.2,
        survivability,
    }
}

pub fn variant(id: &str, persona: Persona, platform: Platform) -> ResumeVariant {
    ResumeVariant {
        id: id.to_string(),
        resume_id: "r1".to_string(),
        jd_id: "j1".to_string(),
        persona,
        platform,
        compiled_text: format!("Compiled {id}"),
        scores: Some(scores(0.8, 0.9, 0.85)),
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 10, 0).unwrap(),
    }
}

#[async_trait]
impl CompilerApi for FakeApi {
    async fn service_info(&self) -> Result<ServiceInfo, ClientError> {
        self.record(Call::ServiceInfo);
        Ok(ServiceInfo {
            message: "ATS Resume Compiler API".to_string(),
            version: Some("1.0.0".to_string()),
            docs: Some("/docs".to_string()),
        })
    }

    async fn upload_resume(&self, file: ResumeFile, user_id: &str) -> Result<Resume, ClientError> {
        self.record(Call::UploadResume {
            file_name: file.file_name,
            user_id: user_id.to_string(),
        });
        serve(&self.uploads, || resume("r1"))
    }

    async fn get_resume(&self, id: &str) -> Result<Resume, ClientError> {
        self.record(Call::GetResume(id.to_string()));
        Ok(resume(id))
    }

    async fn list_resumes(&self, user_id: &str) -> Result<Vec<Resume>, ClientError> {
        self.record(Call::ListResumes(user_id.to_string()));
        Ok(vec![resume("r1")])
    }

    async fn create_job_description(
        &self,
        platform: Platform,
        raw_text: &str,
    ) -> Result<JobDescription, ClientError> {
        self.record(Call::CreateJobDescription {
            platform,
            raw_text: raw_text.to_string(),
        });
        serve(&self.jds, || job_description("j1", platform))
    }

    async fn get_job_description(&self, id: &str) -> Result<JobDescription, ClientError> {
        self.record(Call::GetJobDescription(id.to_string()));
        Ok(job_description(id, Platform::Linkedin))
    }

    async fn compile_variant(
        &self,
        resume_id: &str,
        jd_id: &str,
        persona: Persona,
        platform: Platform,
    ) -> Result<ResumeVariant, ClientError> {
        self.record(Call::CompileVariant {
            resume_id: resume_id.to_string(),
            jd_id: jd_id.to_string(),
            persona,
            platform,
        });
        serve(&self.compiles, || variant("v1", persona, platform))
    }

    async fn get_variant(&self, id: &str) -> Result<ResumeVariant, ClientError> {
        self.record(Call::GetVariant(id.to_string()));
        Ok(variant(id, Persona::Ic, Platform::Linkedin))
    }

    async fn list_variants(
        &self,
        resume_id: Option<&str>,
        jd_id: Option<&str>,
    ) -> Result<Vec<ResumeVariant>, ClientError> {
        self.record(Call::ListVariants {
            resume_id: resume_id.map(str::to_string),
            jd_id: jd_id.map(str::to_string),
        });
        serve(&self.variant_lists, Vec::new)
    }

    async fn record_outcome(
        &self,
        variant_id: &str,
        status: OutcomeStatus,
    ) -> Result<ApplicationOutcome, ClientError> {
        self.record(Call::RecordOutcome {
            variant_id: variant_id.to_string(),
            status,
        });
        Ok(ApplicationOutcome {
            id: "o1".to_string(),
            variant_id: variant_id.to_string(),
            status,
            recorded_at: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        })
    }

    async fn list_outcomes(
        &self,
        variant_id: Option<&str>,
    ) -> Result<Vec<ApplicationOutcome>, ClientError> {
        self.record(Call::ListOutcomes(variant_id.map(str::to_string)));
        Ok(Vec::new())
    }
}
