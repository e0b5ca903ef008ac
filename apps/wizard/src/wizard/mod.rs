//! Headless wizard controller.
//!
//! Owns one session's store, edit history and gateway, and encodes what each
//! screen needs before it can be shown. Screens call into `Wizard` and render
//! whatever it returns; no screen keeps its own copy of the record.

pub mod step;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::config::Config;
use crate::errors::{Result, WizardError};
use crate::gateway::client::ResumeBackend;
use crate::gateway::upload::UploadFile;
use crate::gateway::{DocumentFormat, Gateway, GeneratedDocument};
use crate::history::{lock, EditHistory};
use crate::models::{
    EnhancementResult, FeedbackResult, ResumeRecord, ResumeVersion, TemplateDescriptor,
};
use crate::store::preferences::Preferences;
use crate::store::ResumeStore;
pub use step::{StepOutcome, WizardStep};

/// Template catalog plus the entry restored from an earlier session, if any.
#[derive(Debug, Clone)]
pub struct TemplateChoices {
    pub templates: Vec<TemplateDescriptor>,
    pub selected: Option<TemplateDescriptor>,
}

/// Clears the busy flag when a primary action finishes, however it finishes.
pub(crate) struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct Wizard<B> {
    store: ResumeStore,
    history: EditHistory,
    gateway: Gateway<B>,
    busy: AtomicBool,
    chosen_version: Mutex<Option<ResumeVersion>>,
    step: Mutex<WizardStep>,
}

impl<B: ResumeBackend> Wizard<B> {
    pub fn new(store: ResumeStore, history: EditHistory, gateway: Gateway<B>) -> Self {
        Self {
            store,
            history,
            gateway,
            busy: AtomicBool::new(false),
            chosen_version: Mutex::new(None),
            step: Mutex::new(WizardStep::Upload),
        }
    }

    pub fn from_config(config: &Config, backend: B, preferences: Arc<dyn Preferences>) -> Self {
        let store = ResumeStore::new(preferences);
        let history = EditHistory::new(
            store.clone(),
            config.history_debounce,
            config.history_capacity,
        );
        let gateway = Gateway::new(backend, config.max_upload_bytes);
        Self::new(store, history, gateway)
    }

    pub fn store(&self) -> &ResumeStore {
        &self.store
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn gateway(&self) -> &Gateway<B> {
        &self.gateway
    }

    pub fn current_step(&self) -> WizardStep {
        *lock(&self.step)
    }

    /// `true` while a primary action (upload, enhance, score, download) is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Navigates to `step`. A step whose preconditions are not met redirects
    /// to Upload, which always starts the session over.
    pub fn enter(&self, step: WizardStep) -> StepOutcome {
        if step == WizardStep::Upload {
            self.restart();
            *lock(&self.step) = WizardStep::Upload;
            return StepOutcome::Ready;
        }

        let missing_resume = step.requires_resume() && !self.store.has_resume();
        let missing_template = step.requires_template() && self.store.template().is_none();
        if missing_resume || missing_template {
            debug!("Step {step:?} is not reachable yet, redirecting to upload");
            self.enter(WizardStep::Upload);
            return StepOutcome::Redirect(WizardStep::Upload);
        }

        *lock(&self.step) = step;
        StepOutcome::Ready
    }

    /// Clears the record, template, enhancement and history.
    pub fn restart(&self) {
        self.store.reset();
        self.history.clear();
        *lock(&self.chosen_version) = None;
        info!("Wizard session restarted");
    }

    pub(crate) fn begin_action(&self) -> Result<InFlight<'_>> {
        if self.busy.swap(true, Ordering::SeqCst) {
            return Err(WizardError::Busy);
        }
        Ok(InFlight(&self.busy))
    }

    /// Uploads a resume file and makes the extracted record the live one.
    pub async fn upload(&self, file: &UploadFile) -> Result<ResumeRecord> {
        let _guard = self.begin_action()?;
        let record = self.gateway.upload(file).await?;

        self.store.set_resume(Some(record.clone()));
        self.store.set_enhancement(None);
        *lock(&self.chosen_version) = None;
        self.history.reset_baseline();
        *lock(&self.step) = WizardStep::Preview;
        Ok(record)
    }

    /// Applies an edit to the live record and signals the history.
    ///
    /// Must be called from within a tokio runtime, as must `add_skill` and
    /// `remove_skill`; the history's debounce timer is a spawned task.
    pub fn edit<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ResumeRecord),
    {
        if !self.store.update(f) {
            return Err(WizardError::NoResume);
        }
        self.history.record_edit();
        Ok(())
    }

    pub fn add_skill(&self, skill: &str) -> Result<bool> {
        let mut added = false;
        self.edit(|r| added = r.add_skill(skill))?;
        Ok(added)
    }

    pub fn remove_skill(&self, index: usize) -> Result<Option<String>> {
        let mut removed = None;
        self.edit(|r| removed = r.remove_skill(index))?;
        Ok(removed)
    }

    pub fn undo(&self) -> bool {
        self.history.undo()
    }

    pub fn redo(&self) -> bool {
        self.history.redo()
    }

    /// Finishes the preview screen. Full name and email must be filled in.
    pub fn confirm_preview(&self) -> Result<WizardStep> {
        self.history.flush();
        let record = self.store.resume().ok_or(WizardError::NoResume)?;
        if let Some(field) = record.missing_required() {
            return Err(WizardError::MissingField(field));
        }
        Ok(WizardStep::Preview.next())
    }

    /// Loads the catalog and re-selects the template chosen in an earlier session.
    pub async fn load_templates(&self) -> TemplateChoices {
        let templates = self.gateway.list_templates().await;
        let selected = self.store.restore_template(&templates);
        TemplateChoices {
            templates,
            selected,
        }
    }

    pub fn select_template(&self, template: TemplateDescriptor) {
        self.store.set_template(template);
    }

    /// Returns the cached enhancement, or asks the backend for one.
    pub async fn enhance(&self) -> Result<EnhancementResult> {
        if let Some(cached) = self.store.enhancement() {
            return Ok(cached);
        }
        let _guard = self.begin_action()?;
        self.run_enhancement().await
    }

    /// Discards the cached enhancement and any version choice, then enhances again.
    /// A call rejected as busy leaves both untouched.
    pub async fn regenerate_enhancement(&self) -> Result<EnhancementResult> {
        let _guard = self.begin_action()?;
        self.store.set_enhancement(None);
        *lock(&self.chosen_version) = None;
        self.run_enhancement().await
    }

    /// Callers hold the in-flight guard.
    async fn run_enhancement(&self) -> Result<EnhancementResult> {
        let record = self.store.resume().ok_or(WizardError::NoResume)?;
        let result = self.gateway.enhance(&record).await;
        self.store.set_enhancement(Some(result.clone()));
        Ok(result)
    }

    /// Makes the chosen version the live record.
    pub fn choose_version(&self, version: ResumeVersion) -> Result<()> {
        let enhancement = self
            .store
            .enhancement()
            .ok_or(WizardError::NoEnhancement)?;
        self.store
            .set_resume(Some(enhancement.version(version).clone()));
        self.history.reset_baseline();
        *lock(&self.chosen_version) = Some(version);
        debug!("Using {version:?} resume");
        Ok(())
    }

    pub fn chosen_version(&self) -> Option<ResumeVersion> {
        *lock(&self.chosen_version)
    }

    pub fn proceed_from_enhancement(&self) -> Result<WizardStep> {
        self.chosen_version()
            .ok_or(WizardError::VersionNotChosen)?;
        Ok(WizardStep::Enhance.next())
    }

    /// Scores the live record. A non-empty `job_description` is attached to the
    /// record first; otherwise the one already on the record is used.
    pub async fn score(&self, job_description: &str) -> Result<FeedbackResult> {
        let _guard = self.begin_action()?;
        let job_description = job_description.trim();
        if !job_description.is_empty()
            && self
                .store
                .update(|r| r.job_description = job_description.to_string())
        {
            self.history.record_edit();
        }
        let record = self.store.resume().ok_or(WizardError::NoResume)?;
        Ok(self
            .gateway
            .ats_score(&record, &record.job_description)
            .await)
    }

    /// Renders the live record with the selected template.
    pub async fn download(&self, format: DocumentFormat) -> Result<GeneratedDocument> {
        let _guard = self.begin_action()?;
        let record = self.store.resume().ok_or(WizardError::NoResume)?;
        let template = self.store.template().ok_or(WizardError::NoTemplate)?;
        let document = self.gateway.generate(&record, &template.id, format).await?;
        info!(
            "Generated {} ({} bytes)",
            document.file_name,
            document.bytes.len()
        );
        Ok(document)
    }
}
