// src/messages.rs
//
// The events that can occur in the editor, and the side effects they ask
// for. Canvas interactions arrive as plain messages; node data never
// carries callbacks.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::models::{ActionType, StoredCredential, WorkflowDocument};
use crate::shell::ToastKind;

#[derive(Debug, Clone)]
pub enum Message {
    /// Start (or resume) an editor session. A `workflow_id` means the page
    /// URL referenced an existing workflow to load.
    BootstrapEditor { workflow_id: Option<String> },

    // Catalog
    CatalogLoaded {
        triggers: Vec<ActionType>,
        actions: Vec<ActionType>,
    },
    CatalogLoadFailed { error: String },

    // Workflow load
    WorkflowLoaded { document: WorkflowDocument },
    WorkflowLoadFailed { error: String },

    // Credential cache
    CredentialsLoaded(Vec<StoredCredential>),
    CredentialsLoadFailed { error: String },

    // Canvas events (the command channel replacing node-data callbacks)
    SentinelClicked,
    AddChildRequested { parent_id: String },
    DeleteRequested { node_id: String },
    RunRequested,
    NodeClicked { node_id: String },
    ConnectNodes { source: String, target: String },
    NodeMoved { node_id: String, x: f64, y: f64 },

    // Wizard
    TriggerChosen { descriptor: ActionType },
    ActionChosen { descriptor: ActionType },
    ConfigValueChanged { key: String, value: Value },
    ConfigSubmitted,
    BackToActionPicker,
    WizardCancelled,

    // Form trigger minting
    FormTriggerCreated {
        descriptor: ActionType,
        form_id: String,
        webhook_url: String,
        form_url: String,
    },
    FormTriggerCreateFailed { error: String },

    // Credential collection
    CredentialSubmitted {
        label: String,
        fields: BTreeMap<String, String>,
    },
    CredentialSaved { platform: String },
    CredentialSaveFailed { error: String },
    OAuthStartFailed { error: String },

    // Persistence
    Tick,
    WorkflowCreated { workflow_id: String },
    WorkflowSaved,
    WorkflowSaveFailed { error: String },
    DeletePersistFailed { error: String },

    // Execution
    ExecutionAcknowledged,
    ExecutionFailed { error: String },
}

/// Side effects requested by the reducer, executed after the state update.
#[derive(Debug)]
pub enum Command {
    /// Chain another message through the normal dispatch loop.
    SendMessage(Box<Message>),

    FetchCatalog,
    FetchWorkflow { workflow_id: String },
    FetchCredentials,

    CreateWorkflow { document: WorkflowDocument },
    UpdateWorkflow {
        workflow_id: String,
        document: WorkflowDocument,
    },
    /// Update issued for a node deletion, outside the debounce window. A
    /// failure is surfaced to the user, unlike a routine auto-save.
    PersistDeletion {
        workflow_id: String,
        document: WorkflowDocument,
    },
    ExecuteWorkflow { workflow_id: String },

    SaveCredential {
        platform: String,
        title: String,
        data: BTreeMap<String, String>,
    },
    /// Fetch the OAuth authorization URL and navigate away to it. On
    /// success the page unloads; only the failure path comes back.
    StartOAuth { platform: String },

    CreateFormTrigger {
        descriptor: ActionType,
        workflow_id: Option<String>,
    },

    Toast { kind: ToastKind, message: String },
    /// Rewrite the visible URL so a reload resumes the same workflow.
    UpdateUrl { workflow_id: String },
    /// Present the public form URL of a freshly minted form trigger.
    ShowFormUrl { url: String },
}

impl Command {
    pub fn send(msg: Message) -> Self {
        Command::SendMessage(Box::new(msg))
    }

    pub fn toast_error(message: impl Into<String>) -> Self {
        Command::Toast {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    pub fn toast_success(message: impl Into<String>) -> Self {
        Command::Toast {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }
}
