use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wizard::gateway::client::HttpBackend;
use wizard::gateway::upload::{format_file_size, UploadFile};
use wizard::gateway::DocumentFormat;
use wizard::models::ResumeVersion;
use wizard::store::preferences::FilePreferences;
use wizard::{Config, StepOutcome, Wizard, WizardStep};

/// Runs one wizard session end to end:
/// `wizard <resume-file> [job-description-file]`
#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume wizard v{}", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let Some(resume_path) = args.next().map(PathBuf::from) else {
        bail!("usage: wizard <resume-file> [job-description-file]");
    };
    let job_description = match args.next() {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read job description {path}"))?,
        None => String::new(),
    };

    let preferences = FilePreferences::open(&config.preferences_dir).with_context(|| {
        format!(
            "failed to open preferences in {}",
            config.preferences_dir.display()
        )
    })?;
    let backend = HttpBackend::new(config.clone())?;
    info!("Backend: {}", config.backend_url);

    let wizard = Wizard::from_config(&config, backend, Arc::new(preferences));
    run_session(&wizard, &config, &resume_path, &job_description).await
}

async fn run_session(
    wizard: &Wizard<HttpBackend>,
    config: &Config,
    resume_path: &Path,
    job_description: &str,
) -> Result<()> {
    wizard.enter(WizardStep::Upload);
    let file = UploadFile::from_path(resume_path)
        .with_context(|| format!("failed to read {}", resume_path.display()))?;
    info!(
        "Uploading {} ({})",
        file.file_name,
        format_file_size(file.size())
    );
    let record = wizard.upload(&file).await?;
    info!(
        "Extracted {} skills, {} roles",
        record.skills.len(),
        record.experience.len()
    );

    let next = wizard.confirm_preview()?;
    expect_ready(wizard.enter(next))?;

    let choices = wizard.load_templates().await;
    let template = match choices.selected {
        Some(template) => template,
        None => choices
            .templates
            .first()
            .cloned()
            .context("no templates available")?,
    };
    info!("Using template {} ({})", template.name, template.id);
    wizard.select_template(template);

    expect_ready(wizard.enter(WizardStep::Enhance))?;
    let enhancement = wizard.enhance().await?;
    for improvement in &enhancement.improvements {
        info!("Improvement: {improvement}");
    }
    wizard.choose_version(ResumeVersion::Enhanced)?;

    let next = wizard.proceed_from_enhancement()?;
    expect_ready(wizard.enter(next))?;
    let feedback = wizard.score(job_description).await?;
    info!(
        "ATS score {}/100: {}",
        feedback.ats_score,
        feedback.score_message()
    );
    if !feedback.missing_skills.is_empty() {
        warn!("Missing skills: {}", feedback.missing_skills.join(", "));
    }

    expect_ready(wizard.enter(WizardStep::Download))?;
    let document = wizard.download(DocumentFormat::Pdf).await?;
    std::fs::create_dir_all(&config.output_dir)?;
    let out = config.output_dir.join(&document.file_name);
    std::fs::write(&out, &document.bytes)
        .with_context(|| format!("failed to write {}", out.display()))?;
    info!("Saved {}", out.display());

    Ok(())
}

fn expect_ready(outcome: StepOutcome) -> Result<()> {
    match outcome {
        StepOutcome::Ready => Ok(()),
        StepOutcome::Redirect(step) => bail!("wizard redirected to {}", step.path()),
    }
}
