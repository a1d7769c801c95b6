//! Auto-save controller: a single-slot deadline register plus the one-time
//! draft → persisted promotion.
//!
//! Arming the slot never suspends anything; it records a deadline that the
//! periodic tick compares against the injected clock, so tests drive time
//! directly.

use crate::constants::AUTOSAVE_DEBOUNCE_MS;

#[derive(Debug, Default)]
pub struct AutosaveController {
    workflow_id: Option<String>,
    deadline_ms: Option<u64>,
}

impl AutosaveController {
    pub fn workflow_id(&self) -> Option<&str> {
        self.workflow_id.as_deref()
    }

    pub fn is_persisted(&self) -> bool {
        self.workflow_id.is_some()
    }

    /// Adopt the id exactly once. The first caller wins; a stale create
    /// response racing a page-supplied id must not flip it.
    pub fn adopt_workflow_id(&mut self, id: String) -> bool {
        if self.workflow_id.is_some() {
            return false;
        }
        self.workflow_id = Some(id);
        true
    }

    /// (Re)start the debounce window. Only the last armed deadline counts.
    pub fn arm(&mut self, now_ms: u64) {
        self.deadline_ms = Some(now_ms + AUTOSAVE_DEBOUNCE_MS);
    }

    /// Drop any pending save, e.g. on unmount or right after an immediate
    /// save already shipped the current document.
    pub fn disarm(&mut self) {
        self.deadline_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Consume the slot if its deadline has passed. At most one save fires
    /// per armed window.
    pub fn take_due(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}
