//! Shell port: everything the core asks the embedding page to do: toasts,
//! URL rewrites, external navigation, and the form-URL modal. The core
//! never touches the DOM itself.

use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

pub trait Shell {
    fn toast(&mut self, kind: ToastKind, message: &str);

    /// Rewrite the visible URL to reference a now-persisted workflow.
    fn set_workflow_url(&mut self, workflow_id: &str);

    /// Navigate the whole page away, e.g. into an OAuth consent screen.
    fn navigate(&mut self, url: &str);

    /// Present the shareable public form URL to the user.
    fn show_form_url(&mut self, url: &str);
}

/// Headless shell: logs every request. Useful as a default and in tools
/// that run the core without a page around it.
#[derive(Debug, Default)]
pub struct LoggingShell;

impl Shell for LoggingShell {
    fn toast(&mut self, kind: ToastKind, message: &str) {
        match kind {
            ToastKind::Error => error!(target: "shell", "{message}"),
            _ => info!(target: "shell", "{message}"),
        }
    }

    fn set_workflow_url(&mut self, workflow_id: &str) {
        info!(target: "shell", "url -> /workflows/create?id={workflow_id}");
    }

    fn navigate(&mut self, url: &str) {
        info!(target: "shell", "navigate -> {url}");
    }

    fn show_form_url(&mut self, url: &str) {
        info!(target: "shell", "form url ready: {url}");
    }
}
