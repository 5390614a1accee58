//! Job-description form: platform selector and free-text submission.

use std::sync::Arc;

use tracing::info;

use crate::api_client::CompilerApi;
use crate::components::view;
use crate::models::Platform;

pub const EMPTY_TEXT_ERROR: &str = "Please enter a job description";
pub const CREATE_FALLBACK_ERROR: &str = "Failed to create job description. Please try again.";

pub struct JobDescriptionForm {
    api: Arc<dyn CompilerApi>,
    platform: Platform,
    raw_text: String,
    creating: bool,
    error: Option<String>,
    success: bool,
}

impl JobDescriptionForm {
    pub fn new(api: Arc<dyn CompilerApi>) -> Self {
        Self {
            api,
            platform: Platform::default(),
            raw_text: String::new(),
            creating: false,
            error: None,
            success: false,
        }
    }

    pub fn set_platform(&mut self, platform: Platform) {
        self.platform = platform;
    }

    pub fn set_raw_text(&mut self, text: impl Into<String>) {
        self.raw_text = text.into();
    }

    #[cfg(test)]
    pub fn is_creating(&self) -> bool {
        self.creating
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[cfg(test)]
    pub fn succeeded(&self) -> bool {
        self.success
    }

    pub fn can_submit(&self) -> bool {
        !self.creating && !self.raw_text.trim().is_empty()
    }

    /// Submits the JD and hands the new id to `on_jd_created`.
    /// Whitespace-only text is rejected before any request is made.
    pub async fn submit(&mut self, on_jd_created: impl FnOnce(String)) {
        if self.raw_text.trim().is_empty() {
            self.error = Some(EMPTY_TEXT_ERROR.to_string());
            return;
        }

        self.creating = true;
        self.error = None;

        let result = self
            .api
            .create_job_description(self.platform, &self.raw_text)
            .await;
        self.creating = false;

        match result {
            Ok(jd) => {
                info!("Created job description {} ({})", jd.id, jd.platform);
                self.success = true;
                on_jd_created(jd.id);
            }
            Err(e) => self.error = Some(e.user_message(CREATE_FALLBACK_ERROR)),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        view::selector(
            &mut out,
            "Platform",
            &Platform::ALL,
            self.platform,
            Platform::label,
        );
        out.push_str("Job Description:\n");
        if self.raw_text.is_empty() {
            out.push_str("  (paste the job description here)\n");
        } else {
            for line in self.raw_text.lines() {
                out.push_str("  ");
                out.push_str(line);
                out.push('\n');
            }
        }
        if let Some(error) = &self.error {
            view::error_banner(&mut out, error);
        }
        if self.success {
            view::success_banner(&mut out, "Job description processed successfully!");
        }
        let label = if self.creating {
            "Processing..."
        } else {
            "Process Job Description"
        };
        view::button(&mut out, label, self.can_submit());
        out
    }
}
