use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened after a variant was sent out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Rejected,
    Interview,
    Ghosted,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Rejected => "rejected",
            OutcomeStatus::Interview => "interview",
            OutcomeStatus::Ghosted => "ghosted",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutcomeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rejected" => Ok(OutcomeStatus::Rejected),
            "interview" => Ok(OutcomeStatus::Interview),
            "ghosted" => Ok(OutcomeStatus::Ghosted),
            other => Err(format!(
                "unknown status '{other}' (expected one of: rejected, interview, ghosted)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationOutcome {
    pub id: String,
    pub variant_id: String,
    pub status: OutcomeStatus,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct RecordOutcomeRequest<'a> {
    pub variant_id: &'a str,
    pub status: OutcomeStatus,
}
