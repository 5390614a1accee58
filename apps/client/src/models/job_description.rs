use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::Platform;

/// A job description with the signals the backend extracted from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    pub id: String,
    pub platform: Platform,
    pub raw_text: String,
    #[serde(default)]
    pub extracted_signals: Option<ExtractedSignals>,
    pub created_at: DateTime<Utc>,
}

/// Signals extracted from a JD. Every field is optional; unrecognised keys are
/// kept in `extra` so newer backends do not break deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSignals {
    #[serde(default)]
    pub top_terms: Vec<String>,
    #[serde(default)]
    pub seniority: Option<String>,
    #[serde(default)]
    pub signals: Option<BiasFlags>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiasFlags {
    #[serde(default)]
    pub hands_on: bool,
    #[serde(default)]
    pub fast_paced: bool,
}

#[derive(Debug, Serialize)]
pub struct CreateJobDescriptionRequest<'a> {
    pub platform: Platform,
    pub raw_text: &'a str,
}
