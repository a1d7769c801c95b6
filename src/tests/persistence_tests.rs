//! Auto-save reconciliation driven by a virtual clock: debounce, the
//! one-time create/promote, immediate deletes, and failure handling.

use super::support::{controller, descriptor, ApiCall};
use crate::constants::AUTOSAVE_DEBOUNCE_MS;
use crate::messages::Message;
use crate::models::{DocumentNode, NodeData, Position, WorkflowDocument};
use crate::shell::ToastKind;

fn add_trigger(ctl: &mut crate::EditorController<super::support::FakeApi, super::support::RecordingShell>, now: u64) {
    ctl.dispatch(Message::SentinelClicked, now);
    ctl.dispatch(
        Message::TriggerChosen {
            descriptor: descriptor("manual-trigger"),
        },
        now,
    );
}

fn two_node_document() -> WorkflowDocument {
    let mut document = WorkflowDocument::empty("Loaded Flow");
    for (id, type_id) in [("node-1", "manual-trigger"), ("node-2", "webhook")] {
        document.nodes.insert(
            id.to_string(),
            DocumentNode {
                position: Position { x: 400.0, y: 300.0 },
                data: NodeData {
                    label: type_id.to_string(),
                    type_id: type_id.to_string(),
                    color: String::new(),
                    config: Default::default(),
                },
                kind: "custom".to_string(),
            },
        );
    }
    document.connections.insert(
        "edge-node-1-node-2".to_string(),
        crate::models::DocumentConnection {
            source: "node-1".to_string(),
            target: "node-2".to_string(),
        },
    );
    document
}

#[test]
fn first_due_save_creates_then_promotes() {
    let mut ctl = controller();
    add_trigger(&mut ctl, 1_000);

    // Before the window elapses nothing is persisted.
    ctl.dispatch(Message::Tick, 1_000 + AUTOSAVE_DEBOUNCE_MS - 1);
    assert_eq!(ctl.api().create_calls(), 0);

    ctl.dispatch(Message::Tick, 1_000 + AUTOSAVE_DEBOUNCE_MS);
    assert_eq!(ctl.api().create_calls(), 1);
    assert_eq!(ctl.state().autosave.workflow_id(), Some("wf-1"));
    assert_eq!(ctl.shell().urls, vec!["wf-1"]);

    // Subsequent edits update in place; no second create, no second URL
    // rewrite.
    ctl.dispatch(
        Message::NodeMoved {
            node_id: "node-1".to_string(),
            x: 10.0,
            y: 20.0,
        },
        10_000,
    );
    ctl.dispatch(Message::Tick, 10_000 + AUTOSAVE_DEBOUNCE_MS);
    assert_eq!(ctl.api().create_calls(), 1);
    let updates = ctl.api().update_calls();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, "wf-1");
    assert_eq!(ctl.shell().urls.len(), 1);
}

#[test]
fn rapid_edits_collapse_into_one_save() {
    let mut ctl = controller();
    add_trigger(&mut ctl, 0);
    for t in [500, 1_000, 2_000] {
        ctl.dispatch(
            Message::NodeMoved {
                node_id: "node-1".to_string(),
                x: t as f64,
                y: 0.0,
            },
            t,
        );
    }

    // The window restarted at 2_000; the earlier deadlines never fire.
    ctl.dispatch(Message::Tick, 2_000 + AUTOSAVE_DEBOUNCE_MS - 1);
    ctl.dispatch(Message::Tick, 2_000 + AUTOSAVE_DEBOUNCE_MS);
    ctl.dispatch(Message::Tick, 60_000);
    assert_eq!(ctl.api().create_calls(), 1);
}

#[test]
fn loading_a_workflow_does_not_arm_autosave() {
    let mut ctl = controller();
    *ctl.api().stored_workflow.borrow_mut() = Some(two_node_document());
    ctl.dispatch(
        Message::BootstrapEditor {
            workflow_id: Some("wf-9".to_string()),
        },
        0,
    );

    assert_eq!(ctl.state().graph.node_count(), 2);
    assert_eq!(ctl.state().title, "Loaded Flow");
    assert!(!ctl.state().autosave.is_armed());
    ctl.dispatch(Message::Tick, 600_000);
    assert_eq!(ctl.api().create_calls(), 0);
    assert!(ctl.api().update_calls().is_empty());
}

#[test]
fn delete_on_persisted_workflow_saves_immediately() {
    let mut ctl = controller();
    *ctl.api().stored_workflow.borrow_mut() = Some(two_node_document());
    ctl.dispatch(
        Message::BootstrapEditor {
            workflow_id: Some("wf-9".to_string()),
        },
        0,
    );

    ctl.dispatch(
        Message::DeleteRequested {
            node_id: "node-2".to_string(),
        },
        100,
    );

    // No tick needed; the shrunken document went out right away.
    let updates = ctl.api().update_calls();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, "wf-9");
    assert!(!updates[0].1.nodes.contains_key("node-2"));
    assert!(updates[0].1.connections.is_empty());
    assert!(!ctl.state().autosave.is_armed());
}

#[test]
fn failed_deletion_save_notifies_but_keeps_the_delete() {
    let mut ctl = controller();
    *ctl.api().stored_workflow.borrow_mut() = Some(two_node_document());
    ctl.dispatch(
        Message::BootstrapEditor {
            workflow_id: Some("wf-9".to_string()),
        },
        0,
    );

    ctl.api().fail_saves.set(true);
    ctl.dispatch(
        Message::DeleteRequested {
            node_id: "node-2".to_string(),
        },
        100,
    );

    assert!(ctl.state().graph.node("node-2").is_none());
    assert!(ctl
        .shell()
        .toasts
        .iter()
        .any(|(kind, msg)| *kind == ToastKind::Error && msg.contains("deletion")));
}

#[test]
fn deleting_everything_before_first_save_persists_nothing() {
    let mut ctl = controller();
    add_trigger(&mut ctl, 0);
    ctl.dispatch(
        Message::DeleteRequested {
            node_id: "node-1".to_string(),
        },
        1_000,
    );

    assert!(ctl.state().graph.is_placeholder_only());
    assert!(!ctl.state().autosave.is_armed());
    ctl.dispatch(Message::Tick, 600_000);
    assert_eq!(ctl.api().create_calls(), 0);
}

#[test]
fn failed_save_never_rolls_back_local_state() {
    let mut ctl = controller();
    ctl.api().fail_saves.set(true);
    add_trigger(&mut ctl, 0);
    ctl.dispatch(Message::Tick, AUTOSAVE_DEBOUNCE_MS);

    // The create failed; the canvas keeps its node and the draft stays
    // unpromoted.
    assert_eq!(ctl.api().create_calls(), 1);
    assert_eq!(ctl.state().graph.node_count(), 1);
    assert!(ctl.state().autosave.workflow_id().is_none());

    // The next edit re-arms and retries once the backend recovers.
    ctl.api().fail_saves.set(false);
    ctl.dispatch(
        Message::NodeMoved {
            node_id: "node-1".to_string(),
            x: 1.0,
            y: 1.0,
        },
        10_000,
    );
    ctl.dispatch(Message::Tick, 10_000 + AUTOSAVE_DEBOUNCE_MS);
    assert_eq!(ctl.api().create_calls(), 2);
    assert_eq!(ctl.state().autosave.workflow_id(), Some("wf-1"));
}

#[test]
fn stale_create_response_cannot_steal_an_adopted_id() {
    let mut ctl = controller();
    add_trigger(&mut ctl, 0);
    ctl.dispatch(Message::Tick, AUTOSAVE_DEBOUNCE_MS);
    assert_eq!(ctl.state().autosave.workflow_id(), Some("wf-1"));

    ctl.dispatch(
        Message::WorkflowCreated {
            workflow_id: "wf-99".to_string(),
        },
        20_000,
    );
    assert_eq!(ctl.state().autosave.workflow_id(), Some("wf-1"));
    assert_eq!(ctl.shell().urls, vec!["wf-1"]);
}

#[test]
fn sentinel_only_graph_is_never_created() {
    let mut ctl = controller();
    ctl.dispatch(Message::BootstrapEditor { workflow_id: None }, 0);
    ctl.dispatch(Message::Tick, 600_000);
    assert_eq!(ctl.api().create_calls(), 0);
}

#[test]
fn run_requires_a_persisted_workflow() {
    let mut ctl = controller();
    add_trigger(&mut ctl, 0);
    ctl.dispatch(Message::RunRequested, 100);
    assert!(ctl
        .api()
        .calls()
        .iter()
        .all(|c| !matches!(c, ApiCall::Execute(_))));
    assert!(ctl
        .shell()
        .toasts
        .iter()
        .any(|(kind, _)| *kind == ToastKind::Error));

    ctl.dispatch(Message::Tick, AUTOSAVE_DEBOUNCE_MS);
    ctl.dispatch(Message::RunRequested, 10_000);
    assert!(ctl
        .api()
        .calls()
        .iter()
        .any(|c| matches!(c, ApiCall::Execute(id) if id == "wf-1")));
    // The fake acknowledges synchronously, so the busy flag has cleared.
    assert!(!ctl.state().is_executing);
}

#[test]
fn unauthenticated_session_skips_backend_commands() {
    let mut ctl = controller();
    ctl.session_mut().logout();
    ctl.dispatch(Message::BootstrapEditor { workflow_id: None }, 0);
    add_trigger(&mut ctl, 0);
    ctl.dispatch(Message::Tick, 600_000);
    assert!(ctl.api().calls().is_empty());
}

#[test]
fn cancel_pending_saves_drops_the_armed_slot() {
    let mut ctl = controller();
    add_trigger(&mut ctl, 0);
    assert!(ctl.state().autosave.is_armed());
    ctl.cancel_pending_saves();
    ctl.dispatch(Message::Tick, 600_000);
    assert_eq!(ctl.api().create_calls(), 0);
}
