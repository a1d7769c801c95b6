//! The editor's state container. One `EditorState` exists per open editor
//! session, owned by the controller. There is no global store.

use crate::autosave::AutosaveController;
use crate::catalog::TypeCatalog;
use crate::credentials::CredentialStore;
use crate::graph::WorkflowGraph;
use crate::models::WorkflowDocument;
use crate::wizard::WizardState;

pub struct EditorState {
    pub graph: WorkflowGraph,
    pub wizard: WizardState,
    pub catalog: TypeCatalog,
    pub credentials: CredentialStore,
    pub autosave: AutosaveController,
    pub title: String,

    /// Blocking load of an existing workflow is in flight.
    pub is_loading: bool,
    /// An execute request is outstanding.
    pub is_executing: bool,

    /// Clock snapshot for the message currently being processed, written by
    /// the controller at dispatch time.
    pub clock_ms: u64,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        EditorState {
            graph: WorkflowGraph::new(),
            wizard: WizardState::Idle,
            catalog: TypeCatalog::default(),
            credentials: CredentialStore::default(),
            autosave: AutosaveController::default(),
            title: crate::constants::DEFAULT_WORKFLOW_TITLE.to_string(),
            is_loading: false,
            is_executing: false,
            clock_ms: 0,
        }
    }

    /// Record that nodes or edges changed. Arms the debounce window,
    /// unless the graph is back to the bare placeholder, in which case any
    /// pending save is dropped (nothing meaningful to persist).
    pub fn mark_graph_modified(&mut self) {
        if self.graph.is_placeholder_only() {
            self.autosave.disarm();
        } else {
            self.autosave.arm(self.clock_ms);
        }
    }

    pub fn current_document(&self) -> WorkflowDocument {
        self.graph.to_document(&self.title)
    }
}
