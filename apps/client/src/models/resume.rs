use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A parsed resume as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub id: String,
    pub user_id: String,
    pub raw_text: String,
    /// Structured extraction; the backend does not populate it yet.
    #[serde(default)]
    pub parsed_json: Option<Map<String, Value>>,
    pub created_at: DateTime<Utc>,
}

/// A resume file picked for upload.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub bytes: bytes::Bytes,
}

impl ResumeFile {
    /// MIME type derived from the extension; unknown extensions go up as octet-stream.
    pub fn mime_type(&self) -> &'static str {
        match extension(&self.file_name).as_deref() {
            Some(".pdf") => "application/pdf",
            Some(".docx") => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Some(".txt") => "text/plain",
            _ => "application/octet-stream",
        }
    }
}

/// Lowercased extension including the leading dot, taken after the last `.`.
pub fn extension(file_name: &str) -> Option<String> {
    file_name
        .rfind('.')
        .map(|idx| file_name[idx..].to_lowercase())
}
