//! Variant workspace: compile, compare and export variants for one
//! (resume, job description) pair.
//!
//! State machine: `Idle → Compiling → Idle` per compile action. Selection is
//! always available and never touches the network.

use std::fmt::Write;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::api_client::CompilerApi;
use crate::components::{download, view};
use crate::models::{Persona, Platform, ResumeVariant};

pub const COMPILE_FALLBACK_ERROR: &str = "Failed to compile variant. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Compiling,
}

pub struct VariantWorkspace {
    api: Arc<dyn CompilerApi>,
    resume_id: String,
    jd_id: String,
    persona: Persona,
    platform: Platform,
    variants: Vec<ResumeVariant>,
    phase: Phase,
    error: Option<String>,
    /// Index into `variants`; the sequence is append-only so it stays valid.
    selected: Option<usize>,
}

impl VariantWorkspace {
    /// Creates the workspace for a pair and loads the variants already
    /// compiled for it, selecting the first one.
    ///
    /// A failed load is logged and leaves the list empty; it is never shown
    /// to the user.
    pub async fn mount(
        api: Arc<dyn CompilerApi>,
        resume_id: impl Into<String>,
        jd_id: impl Into<String>,
    ) -> Self {
        let mut workspace = Self {
            api,
            resume_id: resume_id.into(),
            jd_id: jd_id.into(),
            persona: Persona::default(),
            platform: Platform::default(),
            variants: Vec::new(),
            phase: Phase::Idle,
            error: None,
            selected: None,
        };
        workspace.load_existing().await;
        workspace
    }

    async fn load_existing(&mut self) {
        let result = self
            .api
            .list_variants(Some(self.resume_id.as_str()), Some(self.jd_id.as_str()))
            .await;
        match result {
            Ok(existing) => {
                info!(
                    "Loaded {} existing variants for resume {} / jd {}",
                    existing.len(),
                    self.resume_id,
                    self.jd_id
                );
                self.selected = if existing.is_empty() { None } else { Some(0) };
                self.variants = existing;
            }
            Err(e) => warn!("Failed to load variants: {e}"),
        }
    }

    pub fn is_for(&self, resume_id: &str, jd_id: &str) -> bool {
        self.resume_id == resume_id && self.jd_id == jd_id
    }

    pub fn resume_id(&self) -> &str {
        &self.resume_id
    }

    pub fn jd_id(&self) -> &str {
        &self.jd_id
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }

    pub fn set_persona(&mut self, persona: Persona) {
        self.persona = persona;
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn set_platform(&mut self, platform: Platform) {
        self.platform = platform;
    }

    pub fn variants(&self) -> &[ResumeVariant] {
        &self.variants
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_compiling(&self) -> bool {
        self.phase == Phase::Compiling
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> Option<&ResumeVariant> {
        self.selected.and_then(|i| self.variants.get(i))
    }

    /// Compiles a variant for the current persona/platform, appends it and
    /// selects it. Ignored while a compile is already running.
    pub async fn compile(&mut self) {
        if self.phase == Phase::Compiling {
            return;
        }

        self.phase = Phase::Compiling;
        self.error = None;

        let result = self
            .api
            .compile_variant(&self.resume_id, &self.jd_id, self.persona, self.platform)
            .await;
        self.phase = Phase::Idle;

        match result {
            Ok(variant) => {
                info!(
                    "Compiled variant {} ({} / {})",
                    variant.id, variant.persona, variant.platform
                );
                self.variants.push(variant);
                self.selected = Some(self.variants.len() - 1);
            }
            Err(e) => self.error = Some(e.user_message(COMPILE_FALLBACK_ERROR)),
        }
    }

    /// Selects the card at `index`. Returns false when out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.variants.len() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    pub fn select_id(&mut self, id: &str) -> bool {
        match self.variants.iter().position(|v| v.id == id) {
            Some(index) => self.select(index),
            None => false,
        }
    }

    /// Writes the selected variant's text to `resume-{persona}-{platform}.txt`
    /// under `dir`. Returns `None` when nothing is selected.
    pub fn export_selected(&self, dir: &Path) -> io::Result<Option<PathBuf>> {
        let Some(variant) = self.selected() else {
            return Ok(None);
        };
        let path = download::save_text(dir, &variant.export_file_name(), &variant.compiled_text)?;
        Ok(Some(path))
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        view::selector(
            &mut out,
            "Persona",
            &Persona::ALL,
            self.persona,
            Persona::label,
        );
        view::selector(
            &mut out,
            "Platform",
            &Platform::ALL,
            self.platform,
            Platform::label,
        );
        let label = if self.is_compiling() {
            "Compiling..."
        } else {
            "Compile Variant"
        };
        view::button(&mut out, label, !self.is_compiling());

        if let Some(error) = &self.error {
            view::error_banner(&mut out, error);
        }

        if !self.variants.is_empty() {
            out.push('\n');
            view::subheading(&mut out, "Compiled Variants");
            for (index, variant) in self.variants.iter().enumerate() {
                out.push_str(&render_card(index, variant, self.selected == Some(index)));
            }
        }

        if let Some(variant) = self.selected() {
            out.push('\n');
            out.push_str(&render_detail(variant));
        }
        out
    }
}

fn render_card(index: usize, variant: &ResumeVariant, selected: bool) -> String {
    let marker = if selected { '*' } else { ' ' };
    let mut card = format!(
        "{marker} {}. {} - {}\n",
        index + 1,
        variant.persona.as_str().to_uppercase(),
        variant.platform.as_str().to_uppercase()
    );
    if let Some(scores) = &variant.scores {
        let _ = writeln!(card, "     Survivability: {}%", view::percent(scores.survivability));
    }
    card
}

/// Detail view of the selected variant. Only keyword, title and overall
/// scores are shown; the risk scores stay in the model.
fn render_detail(variant: &ResumeVariant) -> String {
    let mut out = String::new();
    view::subheading(&mut out, "Compiled Resume");
    if let Some(scores) = &variant.scores {
        let _ = writeln!(out, "Keyword: {}%", view::percent(scores.keyword_score));
        let _ = writeln!(out, "Title: {}%", view::percent(scores.title_score));
        let _ = writeln!(out, "Overall: {}%", view::percent(scores.survivability));
    }
    out.push('\n');
    out.push_str(&variant.compiled_text);
    if !variant.compiled_text.ends_with('\n') {
        out.push('\n');
    }
    out.push('\n');
    view::button(&mut out, "Download as TXT", true);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::fake::{self, Call, FakeApi, Failure};

    async fn mounted(api: &Arc<FakeApi>) -> VariantWorkspace {
        VariantWorkspace::mount(api.clone(), "r1", "j1").await
    }

    #[tokio::test]
    async fn test_mount_loads_pair_and_selects_first() {
        let api = Arc::new(FakeApi::new());
        api.push_variant_list(Ok(vec![
            fake::variant("v1", Persona::Ic, Platform::Linkedin),
            fake::variant("v2", Persona::Hybrid, Platform::Dice),
        ]));
        let ws = mounted(&api).await;

        assert_eq!(
            api.calls(),
            vec![Call::ListVariants {
                resume_id: Some("r1".into()),
                jd_id: Some("j1".into()),
            }]
        );
        assert_eq!(ws.variants().len(), 2);
        assert_eq!(ws.selected().unwrap().id, "v1");
        assert_eq!(ws.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_mount_with_no_variants_selects_nothing() {
        let api = Arc::new(FakeApi::new());
        let ws = mounted(&api).await;
        assert!(ws.variants().is_empty());
        assert!(ws.selected().is_none());
    }

    #[tokio::test]
    async fn test_mount_failure_is_silent() {
        let api = Arc::new(FakeApi::new());
        api.push_variant_list(Err(Failure::detail(500, "database unavailable")));
        let ws = mounted(&api).await;

        assert!(ws.variants().is_empty());
        assert_eq!(ws.error(), None);
        assert!(!ws.is_compiling());
    }

    #[tokio::test]
    async fn test_compile_appends_and_selects() {
        let api = Arc::new(FakeApi::new());
        api.push_variant_list(Ok(vec![
            fake::variant("v1", Persona::Ic, Platform::Linkedin),
            fake::variant("v2", Persona::Ic, Platform::Indeed),
        ]));
        api.push_compile(Ok(fake::variant("v3", Persona::Architect, Platform::Dice)));
        let mut ws = mounted(&api).await;
        ws.set_persona(Persona::Architect);
        ws.set_platform(Platform::Dice);

        ws.compile().await;

        let ids: Vec<&str> = ws.variants().iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["v1", "v2", "v3"]);
        assert_eq!(ws.selected().unwrap().id, "v3");
        assert_eq!(ws.phase(), Phase::Idle);
        assert_eq!(
            api.calls()[1],
            Call::CompileVariant {
                resume_id: "r1".into(),
                jd_id: "j1".into(),
                persona: Persona::Architect,
                platform: Platform::Dice,
            }
        );
    }

    #[tokio::test]
    async fn test_compile_failure_keeps_sequence_and_selection() {
        let api = Arc::new(FakeApi::new());
        api.push_variant_list(Ok(vec![fake::variant("v1", Persona::Ic, Platform::Linkedin)]));
        api.push_compile(Err(Failure::detail(404, "Resume not found")));
        let mut ws = mounted(&api).await;

        ws.compile().await;

        assert_eq!(ws.error(), Some("Resume not found"));
        assert_eq!(ws.variants().len(), 1);
        assert_eq!(ws.selected().unwrap().id, "v1");
        assert_eq!(ws.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_compile_failure_without_detail_uses_fallback() {
        let api = Arc::new(FakeApi::new());
        api.push_compile(Err(Failure::bare(504)));
        let mut ws = mounted(&api).await;
        ws.compile().await;
        assert_eq!(ws.error(), Some(COMPILE_FALLBACK_ERROR));
    }

    #[tokio::test]
    async fn test_next_compile_clears_previous_error() {
        let api = Arc::new(FakeApi::new());
        api.push_compile(Err(Failure::bare(500)));
        let mut ws = mounted(&api).await;
        ws.compile().await;
        assert!(ws.error().is_some());

        ws.compile().await;
        assert_eq!(ws.error(), None);
        assert_eq!(ws.variants().len(), 1);
    }

    #[tokio::test]
    async fn test_select_changes_only_selection() {
        let api = Arc::new(FakeApi::new());
        api.push_variant_list(Ok(vec![
            fake::variant("v1", Persona::Ic, Platform::Linkedin),
            fake::variant("v2", Persona::Architect, Platform::Indeed),
            fake::variant("v3", Persona::Hybrid, Platform::Dice),
        ]));
        let mut ws = mounted(&api).await;
        let before: Vec<ResumeVariant> = ws.variants().to_vec();
        let calls_before = api.call_count();

        assert!(ws.select(2));
        assert_eq!(ws.selected().unwrap().id, "v3");
        assert!(ws.select_id("v2"));
        assert_eq!(ws.selected().unwrap().id, "v2");
        assert!(!ws.select(7));
        assert!(!ws.select_id("missing"));
        assert_eq!(ws.selected().unwrap().id, "v2");

        assert_eq!(ws.variants(), before.as_slice());
        assert_eq!(api.call_count(), calls_before);
    }

    #[tokio::test]
    async fn test_detail_shows_rounded_percentages() {
        let api = Arc::new(FakeApi::new());
        let mut variant = fake::variant("v1", Persona::Architect, Platform::Indeed);
        variant.scores = Some(fake::scores(0.8, 0.9, 0.85));
        api.push_compile(Ok(variant));
        let mut ws = mounted(&api).await;
        ws.compile().await;

        let out = ws.render();
        assert!(out.contains("Keyword: 80%"));
        assert!(out.contains("Title: 90%"));
        assert!(out.contains("Overall: 85%"));
        assert!(out.contains("* 1. ARCHITECT - INDEED"));
        assert!(out.contains("Survivability: 85%"));
        // Risk scores are not surfaced.
        assert!(!out.contains("10%"));
        assert!(!out.contains("20%"));
    }

    #[tokio::test]
    async fn test_detail_without_scores_shows_text_only() {
        let api = Arc::new(FakeApi::new());
        let mut variant = fake::variant("v1", Persona::Ic, Platform::Linkedin);
        variant.scores = None;
        variant.compiled_text = "Plain text".into();
        api.push_variant_list(Ok(vec![variant]));
        let ws = mounted(&api).await;

        let out = ws.render();
        assert!(out.contains("Plain text\n"));
        assert!(!out.contains("Keyword:"));
        assert!(!out.contains("Survivability:"));
    }

    #[tokio::test]
    async fn test_export_writes_named_file() {
        let api = Arc::new(FakeApi::new());
        let mut variant = fake::variant("v1", Persona::Architect, Platform::Indeed);
        variant.compiled_text = "Line1\nLine2".into();
        api.push_compile(Ok(variant));
        let mut ws = mounted(&api).await;
        ws.compile().await;
        let calls_before = api.call_count();

        let dir = tempfile::tempdir().unwrap();
        let path = ws.export_selected(dir.path()).unwrap().unwrap();

        assert_eq!(path.file_name().unwrap(), "resume-architect-indeed.txt");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Line1\nLine2");
        assert_eq!(api.call_count(), calls_before);
    }

    #[tokio::test]
    async fn test_export_without_selection_is_noop() {
        let api = Arc::new(FakeApi::new());
        let ws = mounted(&api).await;
        let dir = tempfile::tempdir().unwrap();
        assert!(ws.export_selected(dir.path()).unwrap().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
