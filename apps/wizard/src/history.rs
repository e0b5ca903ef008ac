//! Linear undo/redo over the resume record.
//!
//! Edits are coalesced: `record_edit` (re)arms a debounce timer and only when
//! the timer fires is a snapshot of the live record pushed. The bottom entry
//! of the undo stack is the baseline and is never popped.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::models::ResumeRecord;
use crate::store::ResumeStore;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);
pub const DEFAULT_CAPACITY: usize = 20;

#[derive(Debug)]
struct Stacks {
    undo: VecDeque<ResumeRecord>,
    redo: Vec<ResumeRecord>,
    capacity: usize,
}

impl Stacks {
    /// Pushes a snapshot, evicting the oldest entry past capacity.
    /// A snapshot equal to the current top is not a new state and is dropped.
    fn push(&mut self, snapshot: ResumeRecord) -> bool {
        if self.undo.back() == Some(&snapshot) {
            return false;
        }
        self.undo.push_back(snapshot);
        while self.undo.len() > self.capacity {
            self.undo.pop_front();
        }
        self.redo.clear();
        true
    }
}

pub struct EditHistory {
    store: ResumeStore,
    stacks: Arc<Mutex<Stacks>>,
    pending: Mutex<Option<JoinHandle<()>>>,
    debounce: Duration,
}

impl EditHistory {
    /// Creates a history bound to `store`, seeded with the store's current record.
    pub fn new(store: ResumeStore, debounce: Duration, capacity: usize) -> Self {
        let history = Self {
            store,
            stacks: Arc::new(Mutex::new(Stacks {
                undo: VecDeque::with_capacity(capacity),
                redo: Vec::new(),
                capacity: capacity.max(1),
            })),
            pending: Mutex::new(None),
            debounce,
        };
        history.reset_baseline();
        history
    }

    /// Signals that the live record changed. At most one snapshot is taken
    /// per debounce window, no matter how often this is called.
    ///
    /// Must be called from within a tokio runtime.
    pub fn record_edit(&self) {
        let mut pending = lock(&self.pending);
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let store = self.store.clone();
        let stacks = Arc::clone(&self.stacks);
        let debounce = self.debounce;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            commit(&store, &stacks);
        }));
    }

    /// Commits a pending debounced edit right away.
    pub fn flush(&self) {
        let handle = lock(&self.pending).take();
        if let Some(handle) = handle {
            if !handle.is_finished() {
                handle.abort();
                commit(&self.store, &self.stacks);
            }
        }
    }

    /// Steps back one entry. Returns `false` when there is nothing to undo.
    pub fn undo(&self) -> bool {
        self.flush();
        let restored = {
            let mut stacks = lock(&self.stacks);
            if stacks.undo.len() <= 1 {
                return false;
            }
            let Some(top) = stacks.undo.pop_back() else {
                return false;
            };
            stacks.redo.push(top);
            stacks.undo.back().cloned()
        };
        debug!("Undo applied");
        self.store.set_resume(restored);
        true
    }

    /// Re-applies the most recently undone entry. Returns `false` when redo is empty.
    pub fn redo(&self) -> bool {
        self.flush();
        let restored = {
            let mut stacks = lock(&self.stacks);
            let Some(entry) = stacks.redo.pop() else {
                return false;
            };
            stacks.undo.push_back(entry.clone());
            while stacks.undo.len() > stacks.capacity {
                stacks.undo.pop_front();
            }
            entry
        };
        debug!("Redo applied");
        self.store.set_resume(Some(restored));
        true
    }

    /// Drops all history and seeds the baseline with the current record.
    pub fn reset_baseline(&self) {
        self.cancel_pending();
        let mut stacks = lock(&self.stacks);
        stacks.undo.clear();
        stacks.redo.clear();
        if let Some(record) = self.store.resume() {
            stacks.undo.push_back(record);
        }
    }

    /// Drops all history without taking a new baseline.
    pub fn clear(&self) {
        self.cancel_pending();
        let mut stacks = lock(&self.stacks);
        stacks.undo.clear();
        stacks.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        lock(&self.stacks).undo.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !lock(&self.stacks).redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        lock(&self.stacks).undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        lock(&self.stacks).redo.len()
    }

    fn cancel_pending(&self) {
        if let Some(handle) = lock(&self.pending).take() {
            handle.abort();
        }
    }
}

impl Drop for EditHistory {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

fn commit(store: &ResumeStore, stacks: &Mutex<Stacks>) {
    let Some(snapshot) = store.resume() else {
        return;
    };
    let mut stacks = lock(stacks);
    if stacks.push(snapshot) {
        debug!(
            undo_depth = stacks.undo.len(),
            "Edit history snapshot recorded"
        );
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
