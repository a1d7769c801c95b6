//! Graph mutation reducer: node deletion, manual connections, drags.

use tracing::debug;

use crate::graph::DeleteOutcome;
use crate::messages::{Command, Message};
use crate::state::EditorState;

pub fn update(state: &mut EditorState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::DeleteRequested { node_id } => {
            let outcome = state.graph.delete_node(node_id);
            match outcome {
                DeleteOutcome::Ignored => {}
                DeleteOutcome::ResetToPlaceholder | DeleteOutcome::Removed { .. } => {
                    debug!(node_id, ?outcome, "node deleted");
                    // A lost delete surprises more than a lost drag, so it
                    // skips the debounce when the workflow already exists.
                    if let Some(workflow_id) =
                        state.autosave.workflow_id().map(|id| id.to_string())
                    {
                        state.autosave.disarm();
                        cmds.push(Command::PersistDeletion {
                            workflow_id,
                            document: state.current_document(),
                        });
                    } else {
                        state.mark_graph_modified();
                    }
                }
            }
            true
        }
        Message::ConnectNodes { source, target } => {
            if let Some(edge_id) = state.graph.connect(source, target) {
                debug!(edge_id, "edge drawn on canvas");
                state.mark_graph_modified();
            }
            true
        }
        Message::NodeMoved { node_id, x, y } => {
            if state.graph.update_node_position(node_id, *x, *y) {
                state.mark_graph_modified();
            }
            true
        }
        _ => false,
    }
}
