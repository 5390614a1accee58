use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::api_client::{ApiClient, CompilerApi};
use crate::components::jd_form::JobDescriptionForm;
use crate::components::shell::PageShell;
use crate::components::upload::UploadForm;
use crate::components::workspace::VariantWorkspace;
use crate::config::{normalize_base_url, Config};
use crate::models::{OutcomeStatus, Persona, Platform};

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "Terminal client for the ATS resume compiler service")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Backend base URL. Overrides API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Owner id sent with uploads. Overrides USER_ID.
    #[arg(long, global = true)]
    pub user_id: Option<String>,

    /// Directory exported variants are written to. Overrides DOWNLOAD_DIR.
    #[arg(long, global = true)]
    pub download_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the service banner.
    Info,
    /// Upload a resume (.pdf, .docx or .txt).
    Upload { file: PathBuf },
    /// List resumes owned by the user.
    Resumes,
    /// Show one resume.
    Resume { id: String },
    /// Submit a job description, from --text or --file.
    Jd {
        #[arg(long, default_value = "linkedin")]
        platform: Platform,
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Show one job description.
    ShowJd { id: String },
    /// Compile a variant for a resume / job description pair.
    Compile {
        #[arg(long)]
        resume_id: String,
        #[arg(long)]
        jd_id: String,
        #[arg(long, default_value = "ic")]
        persona: Persona,
        #[arg(long, default_value = "linkedin")]
        platform: Platform,
        /// Also write the compiled text to the download directory.
        #[arg(long)]
        export: bool,
    },
    /// List variants; with both ids the workspace view is shown.
    Variants {
        #[arg(long)]
        resume_id: Option<String>,
        #[arg(long)]
        jd_id: Option<String>,
        /// Select this variant in the workspace view. Needs both ids.
        #[arg(long, requires_all = ["resume_id", "jd_id"])]
        select: Option<String>,
        /// Write the selected variant to the download directory. Needs both ids.
        #[arg(long, requires_all = ["resume_id", "jd_id"])]
        export: bool,
    },
    /// Show one variant.
    Variant { id: String },
    /// Record what happened after applying with a variant.
    Outcome {
        #[arg(long)]
        variant_id: String,
        #[arg(long)]
        status: OutcomeStatus,
    },
    /// List recorded outcomes.
    Outcomes {
        #[arg(long)]
        variant_id: Option<String>,
    },
    /// Whole flow: upload, submit the JD, compile, show and optionally export.
    Run {
        #[arg(long)]
        resume: PathBuf,
        #[arg(long)]
        jd_file: PathBuf,
        /// Platform the job description was posted on.
        #[arg(long, default_value = "linkedin")]
        jd_platform: Platform,
        #[arg(long, default_value = "ic")]
        persona: Persona,
        /// Target platform for the variant; defaults to --jd-platform.
        #[arg(long)]
        platform: Option<Platform>,
        #[arg(long)]
        export: bool,
    },
}

/// Applies command-line overrides on top of the environment configuration.
pub fn apply_overrides(mut config: Config, args: &Args) -> Result<Config> {
    if let Some(url) = &args.api_url {
        config.api_url = normalize_base_url(url).context("--api-url must be an http(s) URL")?;
    }
    if let Some(user_id) = &args.user_id {
        config.user_id = user_id.clone();
    }
    if let Some(dir) = &args.download_dir {
        config.download_dir = dir.clone();
    }
    Ok(config)
}

pub async fn dispatch(args: Args, config: Config) -> Result<()> {
    let client = ApiClient::new(config.api_url.clone()).context("Failed to build HTTP client")?;
    info!("Using API at {}", client.base_url());
    let api: Arc<dyn CompilerApi> = Arc::new(client);
    run_command(args.cmd, api, &config).await
}

async fn run_command(cmd: Command, api: Arc<dyn CompilerApi>, config: &Config) -> Result<()> {
    match cmd {
        Command::Info => print_json(&api.service_info().await?),
        Command::Upload { file } => upload(api, config, file).await,
        Command::Resumes => print_json(&api.list_resumes(&config.user_id).await?),
        Command::Resume { id } => print_json(&api.get_resume(&id).await?),
        Command::Jd {
            platform,
            text,
            file,
        } => {
            let text = read_jd_text(text, file.as_deref()).await?;
            submit_jd(api, platform, text).await
        }
        Command::ShowJd { id } => print_json(&api.get_job_description(&id).await?),
        Command::Compile {
            resume_id,
            jd_id,
            persona,
            platform,
            export,
        } => {
            let mut workspace = VariantWorkspace::mount(api, resume_id, jd_id).await;
            workspace.set_persona(persona);
            workspace.set_platform(platform);
            compile_and_show(&mut workspace, export.then_some(config.download_dir.as_path()))
                .await
        }
        Command::Variants {
            resume_id,
            jd_id,
            select,
            export,
        } => match (resume_id, jd_id) {
            (Some(resume_id), Some(jd_id)) => {
                let mut workspace = VariantWorkspace::mount(api, resume_id, jd_id).await;
                show_variants(
                    &mut workspace,
                    select.as_deref(),
                    export.then_some(config.download_dir.as_path()),
                )
                .map(|_| ())
            }
            (resume_id, jd_id) => print_json(
                &api.list_variants(resume_id.as_deref(), jd_id.as_deref())
                    .await?,
            ),
        },
        Command::Variant { id } => print_json(&api.get_variant(&id).await?),
        Command::Outcome { variant_id, status } => {
            print_json(&api.record_outcome(&variant_id, status).await?)
        }
        Command::Outcomes { variant_id } => {
            print_json(&api.list_outcomes(variant_id.as_deref()).await?)
        }
        Command::Run {
            resume,
            jd_file,
            jd_platform,
            persona,
            platform,
            export,
        } => {
            let jd_text = read_jd_text(None, Some(&jd_file)).await?;
            let flow = RunFlow {
                resume,
                jd_text,
                jd_platform,
                persona,
                platform: platform.unwrap_or(jd_platform),
                export_dir: export.then(|| config.download_dir.clone()),
            };
            run_flow(api, &config.user_id, flow).await
        }
    }
}

async fn upload(api: Arc<dyn CompilerApi>, config: &Config, file: PathBuf) -> Result<()> {
    let mut form = UploadForm::new(api, config.user_id.clone());
    if !form.select_file(file) {
        print!("{}", form.render());
        anyhow::bail!("{}", form.error().unwrap_or("file type not allowed"));
    }
    if let Some(file) = form.file() {
        info!("Uploading {} for {}", file.path.display(), config.user_id);
    }
    let mut resume_id = None;
    form.submit(|id| resume_id = Some(id)).await;
    print!("{}", form.render());
    match resume_id {
        Some(id) => {
            println!("Resume ID: {id}");
            Ok(())
        }
        None => anyhow::bail!("{}", form.error().unwrap_or("upload failed")),
    }
}

async fn submit_jd(api: Arc<dyn CompilerApi>, platform: Platform, text: String) -> Result<()> {
    let mut form = JobDescriptionForm::new(api);
    form.set_platform(platform);
    form.set_raw_text(text);
    let mut jd_id = None;
    form.submit(|id| jd_id = Some(id)).await;
    print!("{}", form.render());
    match jd_id {
        Some(id) => {
            println!("Job description ID: {id}");
            Ok(())
        }
        None => anyhow::bail!("{}", form.error().unwrap_or("job description failed")),
    }
}

async fn compile_and_show(workspace: &mut VariantWorkspace, export_dir: Option<&Path>) -> Result<()> {
    info!(
        "Compiling {} / {} variant...",
        workspace.persona(),
        workspace.platform()
    );
    workspace.compile().await;
    print!("{}", workspace.render());

    if let Some(error) = workspace.error() {
        anyhow::bail!("{error}");
    }
    if let Some(dir) = export_dir {
        if let Some(path) = workspace.export_selected(dir)? {
            println!("Saved {}", path.display());
        }
    }
    Ok(())
}

/// Shows the workspace for a pair, optionally selecting a variant by id
/// first and exporting the selection. Returns the exported path, if any.
fn show_variants(
    workspace: &mut VariantWorkspace,
    select: Option<&str>,
    export_dir: Option<&Path>,
) -> Result<Option<PathBuf>> {
    info!(
        "{} variants for resume {} / jd {}",
        workspace.variants().len(),
        workspace.resume_id(),
        workspace.jd_id()
    );
    if let Some(id) = select {
        if !workspace.select_id(id) {
            anyhow::bail!("unknown variant id '{id}'");
        }
    }
    print!("{}", workspace.render());

    let Some(dir) = export_dir else {
        return Ok(None);
    };
    let path = workspace
        .export_selected(dir)?
        .context("no variant to export: compile one first")?;
    println!("Saved {}", path.display());
    Ok(Some(path))
}

struct RunFlow {
    resume: PathBuf,
    jd_text: String,
    jd_platform: Platform,
    persona: Persona,
    platform: Platform,
    export_dir: Option<PathBuf>,
}

/// Drives the page shell the way a user would: upload, JD, then compile.
async fn run_flow(api: Arc<dyn CompilerApi>, user_id: &str, flow: RunFlow) -> Result<()> {
    let mut shell = PageShell::new(api, user_id);

    if !shell.upload.select_file(flow.resume) {
        print!("{}", shell.render());
        anyhow::bail!("{}", shell.upload.error().unwrap_or("file type not allowed"));
    }
    shell.submit_upload().await;
    if let Some(error) = shell.upload.error() {
        print!("{}", shell.render());
        anyhow::bail!("{error}");
    }

    shell.jd_form.set_platform(flow.jd_platform);
    shell.jd_form.set_raw_text(flow.jd_text);
    shell.submit_job_description().await;
    if let Some(error) = shell.jd_form.error() {
        print!("{}", shell.render());
        anyhow::bail!("{error}");
    }

    let Some(workspace) = shell.workspace_mut() else {
        anyhow::bail!("workspace not available: resume or job description missing");
    };
    workspace.set_persona(flow.persona);
    workspace.set_platform(flow.platform);
    info!("Compiling {} / {} variant...", flow.persona, flow.platform);
    workspace.compile().await;

    print!("{}", shell.render());

    if let (Some(resume_id), Some(jd_id)) = (shell.resume_id(), shell.jd_id()) {
        println!("Resume ID: {resume_id}");
        println!("Job description ID: {jd_id}");
    }

    let workspace = shell
        .workspace()
        .context("workspace disappeared after compile")?;
    if let Some(error) = workspace.error() {
        anyhow::bail!("{error}");
    }
    if let Some(dir) = &flow.export_dir {
        if let Some(path) = workspace.export_selected(dir)? {
            println!("Saved {}", path.display());
        }
    }
    Ok(())
}

/// JD text comes from `--text` or is read from `--file`; neither yields an
/// empty string, which the form then rejects.
async fn read_jd_text(text: Option<String>, file: Option<&Path>) -> Result<String> {
    match (text, file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read job description from {}", path.display())),
        (None, None) => Ok(String::new()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
