//! Page shell: the two forms side by side, and the variant workspace once
//! both a resume id and a job-description id exist.

use std::sync::Arc;

use tracing::debug;

use crate::api_client::CompilerApi;
use crate::components::jd_form::JobDescriptionForm;
use crate::components::upload::UploadForm;
use crate::components::view;
use crate::components::workspace::VariantWorkspace;

pub struct PageShell {
    api: Arc<dyn CompilerApi>,
    pub upload: UploadForm,
    pub jd_form: JobDescriptionForm,
    workspace: Option<VariantWorkspace>,
    resume_id: Option<String>,
    jd_id: Option<String>,
}

impl PageShell {
    pub fn new(api: Arc<dyn CompilerApi>, user_id: impl Into<String>) -> Self {
        Self {
            upload: UploadForm::new(api.clone(), user_id),
            jd_form: JobDescriptionForm::new(api.clone()),
            api,
            workspace: None,
            resume_id: None,
            jd_id: None,
        }
    }

    pub fn resume_id(&self) -> Option<&str> {
        self.resume_id.as_deref()
    }

    pub fn jd_id(&self) -> Option<&str> {
        self.jd_id.as_deref()
    }

    pub fn workspace(&self) -> Option<&VariantWorkspace> {
        self.workspace.as_ref()
    }

    pub fn workspace_mut(&mut self) -> Option<&mut VariantWorkspace> {
        self.workspace.as_mut()
    }

    pub async fn submit_upload(&mut self) {
        let resume_id = &mut self.resume_id;
        self.upload.submit(|id| *resume_id = Some(id)).await;
        self.sync_workspace().await;
    }

    pub async fn submit_job_description(&mut self) {
        let jd_id = &mut self.jd_id;
        self.jd_form.submit(|id| *jd_id = Some(id)).await;
        self.sync_workspace().await;
    }

    /// Mounts the workspace when both ids are present. A new pair replaces
    /// the previous workspace, dropping its state with it.
    async fn sync_workspace(&mut self) {
        let (Some(resume_id), Some(jd_id)) = (&self.resume_id, &self.jd_id) else {
            self.workspace = None;
            return;
        };

        if self
            .workspace
            .as_ref()
            .is_some_and(|ws| ws.is_for(resume_id, jd_id))
        {
            return;
        }

        debug!("Mounting workspace for resume {resume_id} / jd {jd_id}");
        let workspace =
            VariantWorkspace::mount(self.api.clone(), resume_id.clone(), jd_id.clone()).await;
        self.workspace = Some(workspace);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        view::heading(&mut out, "ATS Resume Compiler");
        out.push_str("Translate your resume into ATS-optimized variants\n\n");

        view::subheading(&mut out, "Upload Resume");
        out.push_str(&self.upload.render());
        out.push('\n');

        view::subheading(&mut out, "Job Description");
        out.push_str(&self.jd_form.render());

        if let Some(workspace) = &self.workspace {
            out.push('\n');
            view::subheading(&mut out, "Resume Variants");
            out.push_str(&workspace.render());
        }
        out
    }
}
