use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Persona, Platform};

/// ATS survivability bundle. Values are conventionally 0.0 to 1.0; the backend
/// is trusted and nothing here clamps them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivabilityScores {
    pub keyword_score: f64,
    pub title_score: f64,
    pub age_proxy_risk: f64,
    pub overqual_risk: f64,
    pub survivability: f64,
}

/// A compiled resume tailored to one persona/platform pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeVariant {
    pub id: String,
    pub resume_id: String,
    pub jd_id: String,
    pub persona: Persona,
    pub platform: Platform,
    pub compiled_text: String,
    #[serde(default)]
    pub scores: Option<SurvivabilityScores>,
    pub created_at: DateTime<Utc>,
}

impl ResumeVariant {
    /// Name of the exported text file, e.g. `resume-architect-indeed.txt`.
    pub fn export_file_name(&self) -> String {
        format!("resume-{}-{}.txt", self.persona, self.platform)
    }
}

#[derive(Debug, Serialize)]
pub struct CompileVariantRequest<'a> {
    pub resume_id: &'a str,
    pub jd_id: &'a str,
    pub persona: Persona,
    pub platform: Platform,
}

/// Optional filters for `GET /variants`. Absent filters are not sent at all.
#[derive(Debug, Default, Serialize)]
pub struct VariantFilter<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jd_id: Option<&'a str>,
}
