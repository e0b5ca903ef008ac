//! Single source of truth for session state.
//!
//! Holds the current resume record, the selected template and the latest
//! enhancement result. Each slot is a `watch` channel, so callers get both a
//! synchronous getter and a push-based subscription. A cloned `ResumeStore`
//! is a handle to the same state.

pub mod preferences;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::models::{EnhancementResult, ResumeRecord, TemplateDescriptor};
use preferences::{Preferences, SELECTED_TEMPLATE_KEY};

#[derive(Clone)]
pub struct ResumeStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    resume: watch::Sender<Option<ResumeRecord>>,
    template: watch::Sender<Option<TemplateDescriptor>>,
    enhancement: watch::Sender<Option<EnhancementResult>>,
    preferences: Arc<dyn Preferences>,
}

impl ResumeStore {
    pub fn new(preferences: Arc<dyn Preferences>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                resume: watch::channel(None).0,
                template: watch::channel(None).0,
                enhancement: watch::channel(None).0,
                preferences,
            }),
        }
    }

    /// Replaces the current record. No validation is performed here.
    pub fn set_resume(&self, record: Option<ResumeRecord>) {
        self.inner.resume.send_replace(record);
    }

    /// Returns a copy of the current record. `None` means "nothing uploaded yet".
    pub fn resume(&self) -> Option<ResumeRecord> {
        self.inner.resume.borrow().clone()
    }

    pub fn has_resume(&self) -> bool {
        self.inner.resume.borrow().is_some()
    }

    /// Mutates the current record in place and notifies subscribers.
    /// Returns `false` (and notifies nobody) when no record is loaded.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut ResumeRecord),
    {
        self.inner.resume.send_if_modified(|slot| match slot {
            Some(record) => {
                f(record);
                true
            }
            None => false,
        })
    }

    pub fn subscribe_resume(&self) -> watch::Receiver<Option<ResumeRecord>> {
        self.inner.resume.subscribe()
    }

    /// Selects a template and remembers its id across restarts.
    /// A storage failure is logged; the in-memory selection still applies.
    pub fn set_template(&self, template: TemplateDescriptor) {
        if let Err(e) = self
            .inner
            .preferences
            .set(SELECTED_TEMPLATE_KEY, &template.id)
        {
            warn!("Failed to persist template selection '{}': {e}", template.id);
        }
        debug!("Template selected: {}", template.id);
        self.inner.template.send_replace(Some(template));
    }

    pub fn template(&self) -> Option<TemplateDescriptor> {
        self.inner.template.borrow().clone()
    }

    pub fn subscribe_template(&self) -> watch::Receiver<Option<TemplateDescriptor>> {
        self.inner.template.subscribe()
    }

    /// The template id chosen in an earlier session, if one was stored.
    pub fn persisted_template_id(&self) -> Option<String> {
        self.inner.preferences.get(SELECTED_TEMPLATE_KEY)
    }

    /// Re-selects the previously chosen template if it is still in `catalog`.
    pub fn restore_template(&self, catalog: &[TemplateDescriptor]) -> Option<TemplateDescriptor> {
        if let Some(current) = self.template() {
            if catalog.iter().any(|t| t.id == current.id) {
                return Some(current);
            }
        }
        let stored_id = self.persisted_template_id()?;
        let template = catalog.iter().find(|t| t.id == stored_id)?.clone();
        self.inner.template.send_replace(Some(template.clone()));
        Some(template)
    }

    pub fn set_enhancement(&self, result: Option<EnhancementResult>) {
        self.inner.enhancement.send_replace(result);
    }

    pub fn enhancement(&self) -> Option<EnhancementResult> {
        self.inner.enhancement.borrow().clone()
    }

    pub fn subscribe_enhancement(&self) -> watch::Receiver<Option<EnhancementResult>> {
        self.inner.enhancement.subscribe()
    }

    /// Clears all three slots. The persisted template id is kept as a hint
    /// for the next template selection.
    pub fn reset(&self) {
        self.inner.resume.send_replace(None);
        self.inner.template.send_replace(None);
        self.inner.enhancement.send_replace(None);
        debug!("Resume store reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::fixtures::sample_resume;
    use preferences::MemoryPreferences;

    fn store() -> ResumeStore {
        ResumeStore::new(Arc::new(MemoryPreferences::default()))
    }

    #[test]
    fn test_absent_is_a_valid_state() {
        let store = store();
        assert!(store.resume().is_none());
        assert!(!store.update(|r| r.summary.push('x')));
    }

    #[test]
    fn test_update_mutates_in_place() {
        let store = store();
        store.set_resume(Some(sample_resume()));
        assert!(store.update(|r| {
            r.add_skill("Rust");
        }));
        assert!(store
            .resume()
            .unwrap()
            .skills
            .contains(&"Rust".to_string()));
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = store();
        let mut rx = store.subscribe_resume();
        assert!(rx.borrow_and_update().is_none());

        store.set_resume(Some(sample_resume()));
        rx.changed().await.unwrap();
        assert_eq!(
            rx.borrow_and_update().as_ref().map(|r| r.skills.len()),
            Some(2)
        );

        store.update(|r| r.summary = "Updated".to_string());
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().unwrap().summary, "Updated");
    }

    #[test]
    fn test_template_persisted_and_restored() {
        let prefs = Arc::new(MemoryPreferences::default());
        let catalog = vec![
            TemplateDescriptor::new("minimalist", "Minimalist", "", ""),
            TemplateDescriptor::new("traditional", "Traditional", "", ""),
        ];

        let first = ResumeStore::new(prefs.clone());
        first.set_template(catalog[1].clone());

        // A fresh session over the same storage.
        let second = ResumeStore::new(prefs);
        assert!(second.template().is_none());
        assert_eq!(
            second.persisted_template_id().as_deref(),
            Some("traditional")
        );
        let restored = second.restore_template(&catalog).unwrap();
        assert_eq!(restored.id, "traditional");
        assert_eq!(second.template().unwrap().id, "traditional");
    }

    #[test]
    fn test_restore_ignores_ids_missing_from_catalog() {
        let store = store();
        store.set_template(TemplateDescriptor::new("retired", "Retired", "", ""));
        store.reset();
        let catalog = vec![TemplateDescriptor::new("minimalist", "Minimalist", "", "")];
        assert!(store.restore_template(&catalog).is_none());
    }

    #[test]
    fn test_reset_clears_everything() {
        let store = store();
        store.set_resume(Some(sample_resume()));
        store.set_template(TemplateDescriptor::new("minimalist", "Minimalist", "", ""));
        store.set_enhancement(Some(EnhancementResult::default()));

        store.reset();
        assert!(store.resume().is_none());
        assert!(store.template().is_none());
        assert!(store.enhancement().is_none());
        assert_eq!(store.persisted_template_id().as_deref(), Some("minimalist"));
    }
}
