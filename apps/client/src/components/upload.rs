//! Resume upload form: extension check on selection, single-file upload.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::api_client::CompilerApi;
use crate::components::view;
use crate::errors::ClientError;
use crate::models::resume::{extension, ResumeFile};
use crate::models::Resume;

pub const ALLOWED_EXTENSIONS: [&str; 3] = [".pdf", ".docx", ".txt"];

pub const INVALID_TYPE_ERROR: &str = "Please upload a PDF, DOCX, or TXT file";
pub const NO_FILE_ERROR: &str = "Please select a file";
pub const UPLOAD_FALLBACK_ERROR: &str = "Upload failed. Please try again.";

/// True when the name ends in `.pdf`, `.docx` or `.txt`, ignoring case.
/// Names without a dot are never accepted.
pub fn is_allowed_file(file_name: &str) -> bool {
    extension(file_name)
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// A file accepted by the selector; its bytes are read at submit time.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
}

pub struct UploadForm {
    api: Arc<dyn CompilerApi>,
    user_id: String,
    file: Option<SelectedFile>,
    uploading: bool,
    error: Option<String>,
    success: bool,
}

impl UploadForm {
    pub fn new(api: Arc<dyn CompilerApi>, user_id: impl Into<String>) -> Self {
        Self {
            api,
            user_id: user_id.into(),
            file: None,
            uploading: false,
            error: None,
            success: false,
        }
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    #[cfg(test)]
    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[cfg(test)]
    pub fn succeeded(&self) -> bool {
        self.success
    }

    /// Mirrors the enabled state of the upload button.
    pub fn can_submit(&self) -> bool {
        self.file.is_some() && !self.uploading
    }

    /// Picks a file. A disallowed extension sets the type error and leaves no
    /// file selected; an accepted file clears both error and success.
    pub fn select_file(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if !is_allowed_file(&name) {
            self.file = None;
            self.error = Some(INVALID_TYPE_ERROR.to_string());
            return false;
        }

        self.file = Some(SelectedFile { name, path });
        self.error = None;
        self.success = false;
        true
    }

    /// Uploads the selected file and hands the new resume id to `on_upload_success`.
    ///
    /// Without a selection this only sets the "select a file" error. The
    /// in-flight flag is cleared on every path.
    pub async fn submit(&mut self, on_upload_success: impl FnOnce(String)) {
        let Some(file) = self.file.clone() else {
            self.error = Some(NO_FILE_ERROR.to_string());
            return;
        };

        self.uploading = true;
        self.error = None;

        let result = self.upload(&file).await;
        self.uploading = false;

        match result {
            Ok(resume) => {
                info!("Uploaded {} as resume {}", file.name, resume.id);
                self.success = true;
                on_upload_success(resume.id);
            }
            Err(e) => {
                warn!("Failed to upload {}: {e}", file.name);
                self.error = Some(e.user_message(UPLOAD_FALLBACK_ERROR));
            }
        }
    }

    async fn upload(&self, file: &SelectedFile) -> Result<Resume, ClientError> {
        let bytes = tokio::fs::read(&file.path).await?;
        let payload = ResumeFile {
            file_name: file.name.clone(),
            bytes: bytes.into(),
        };
        self.api.upload_resume(payload, &self.user_id).await
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("Select Resume File (.pdf, .docx, .txt)\n");
        if let Some(file) = &self.file {
            out.push_str(&format!("Selected: {}\n", file.name));
        }
        if let Some(error) = &self.error {
            view::error_banner(&mut out, error);
        }
        if self.success {
            view::success_banner(&mut out, "Resume uploaded successfully!");
        }
        let label = if self.uploading {
            "Uploading..."
        } else {
            "Upload Resume"
        };
        view::button(&mut out, label, self.can_submit());
        out
    }
}
