//! Lifecycle and persistence reducer: bootstrap fetches, catalog and
//! workflow load results, the debounced auto-save tick, and execution.

use tracing::{error, info, warn};

use crate::graph::WorkflowGraph;
use crate::messages::{Command, Message};
use crate::state::EditorState;

pub fn update(state: &mut EditorState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::BootstrapEditor { workflow_id } => {
            cmds.push(Command::FetchCatalog);
            cmds.push(Command::FetchCredentials);
            if let Some(id) = workflow_id {
                state.autosave.adopt_workflow_id(id.clone());
                state.is_loading = true;
                cmds.push(Command::FetchWorkflow {
                    workflow_id: id.clone(),
                });
            }
            true
        }
        Message::CatalogLoaded { triggers, actions } => {
            state.catalog.replace(triggers.clone(), actions.clone());
            true
        }
        Message::CatalogLoadFailed { error } => {
            // The built-in catalog seeded at startup stays in place.
            warn!(error = %error, "type catalog fetch failed, keeping built-ins");
            cmds.push(Command::toast_error("Failed to load node types"));
            true
        }
        Message::WorkflowLoaded { document } => {
            state.graph = WorkflowGraph::from_document(document);
            state.title = document.title.clone();
            state.is_loading = false;
            // Loading is not a local edit; the save slot stays empty.
            state.autosave.disarm();
            true
        }
        Message::WorkflowLoadFailed { error } => {
            error!(error = %error, "workflow load failed");
            state.is_loading = false;
            state.graph.reset_to_placeholder();
            cmds.push(Command::toast_error("Failed to load workflow"));
            true
        }
        Message::Tick => {
            if state.autosave.take_due(state.clock_ms) {
                let document = state.current_document();
                match state.autosave.workflow_id() {
                    Some(id) => cmds.push(Command::UpdateWorkflow {
                        workflow_id: id.to_string(),
                        document,
                    }),
                    None => cmds.push(Command::CreateWorkflow { document }),
                }
            }
            true
        }
        Message::WorkflowCreated { workflow_id } => {
            if state.autosave.adopt_workflow_id(workflow_id.clone()) {
                info!(workflow_id = %workflow_id, "draft promoted to persisted workflow");
                cmds.push(Command::UpdateUrl {
                    workflow_id: workflow_id.clone(),
                });
            }
            true
        }
        Message::WorkflowSaved => true,
        Message::WorkflowSaveFailed { error } => {
            // Local state is authoritative; a failed save never rolls the
            // canvas back. The next edit re-arms the debounce and retries.
            warn!(error = %error, "workflow save failed");
            true
        }
        Message::DeletePersistFailed { error } => {
            // The node stays removed client-side; re-adding it silently
            // would surprise the user more than a stale server copy.
            warn!(error = %error, "deletion save failed");
            cmds.push(Command::toast_error("Failed to save the deletion"));
            true
        }
        Message::RunRequested => {
            if state.is_executing {
                return true;
            }
            match state.autosave.workflow_id() {
                Some(id) => {
                    state.is_executing = true;
                    cmds.push(Command::ExecuteWorkflow {
                        workflow_id: id.to_string(),
                    });
                }
                None => {
                    cmds.push(Command::toast_error(
                        "Save the workflow before running it",
                    ));
                }
            }
            true
        }
        Message::ExecutionAcknowledged => {
            state.is_executing = false;
            cmds.push(Command::toast_success("Workflow execution started"));
            true
        }
        Message::ExecutionFailed { error } => {
            state.is_executing = false;
            warn!(error = %error, "workflow execution failed");
            cmds.push(Command::toast_error("Failed to execute workflow"));
            true
        }
        _ => false,
    }
}
