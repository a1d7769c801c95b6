//! Wizard reducer: the trigger/action/edit modal flow.

use tracing::debug;

use crate::constants::FORM_TRIGGER_TYPE;
use crate::credentials::GateDecision;
use crate::messages::{Command, Message};
use crate::models::{ConfigMap, NodeRole};
use crate::state::EditorState;
use crate::variables;
use crate::wizard::{ConfigTarget, WizardState};

pub fn update(state: &mut EditorState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::SentinelClicked => {
            state.wizard = WizardState::TriggerSelect { minting_form: false };
            true
        }
        Message::AddChildRequested { parent_id } => {
            if state.graph.node(parent_id).is_some() {
                state.wizard = WizardState::ActionSelect {
                    parent_id: parent_id.clone(),
                };
            }
            true
        }
        Message::NodeClicked { node_id } => {
            handle_node_clicked(state, node_id);
            true
        }
        Message::TriggerChosen { descriptor } => {
            if !matches!(state.wizard, WizardState::TriggerSelect { .. }) {
                return true;
            }
            if descriptor.id == FORM_TRIGGER_TYPE {
                // Mint the form endpoint first; the node is only added once
                // the backend hands back its id and webhook URL.
                state.wizard = WizardState::TriggerSelect { minting_form: true };
                cmds.push(Command::CreateFormTrigger {
                    descriptor: descriptor.clone(),
                    workflow_id: state.autosave.workflow_id().map(str::to_string),
                });
            } else {
                state
                    .graph
                    .add_trigger_node(descriptor, ConfigMap::new());
                state.mark_graph_modified();
                state.wizard = WizardState::Idle;
            }
            true
        }
        Message::FormTriggerCreated {
            descriptor,
            form_id,
            webhook_url,
            form_url,
        } => {
            let mut config = ConfigMap::new();
            config.insert(
                crate::constants::CONFIG_KEY_FORM_ID.to_string(),
                serde_json::Value::String(form_id.clone()),
            );
            config.insert(
                crate::constants::CONFIG_KEY_WEBHOOK_URL.to_string(),
                serde_json::Value::String(webhook_url.clone()),
            );
            config.insert(
                crate::constants::CONFIG_KEY_FORM_URL.to_string(),
                serde_json::Value::String(form_url.clone()),
            );
            state.graph.add_trigger_node(descriptor, config);
            state.mark_graph_modified();
            state.wizard = WizardState::Idle;
            cmds.push(Command::ShowFormUrl {
                url: form_url.clone(),
            });
            true
        }
        Message::FormTriggerCreateFailed { error } => {
            debug!(error = %error, "form trigger mint failed");
            cmds.push(Command::toast_error("Failed to create form trigger"));
            state.wizard = WizardState::TriggerSelect { minting_form: false };
            true
        }
        Message::ActionChosen { descriptor } => {
            let WizardState::ActionSelect { parent_id } = &state.wizard else {
                return true;
            };
            let parent_id = parent_id.clone();
            match state.credentials.resolve(&descriptor.id) {
                GateDecision::NeedsCredential(requirement) => {
                    state.wizard = WizardState::CredentialCollect {
                        parent_id,
                        pending: descriptor.clone(),
                        requirement,
                        submitting: false,
                    };
                }
                GateDecision::Ready => {
                    begin_action_config(state, &parent_id, descriptor.clone());
                }
            }
            true
        }
        Message::ConfigValueChanged { key, value } => {
            if let WizardState::ConfigureFields { values, .. } = &mut state.wizard {
                values.insert(key.clone(), value.clone());
            }
            true
        }
        Message::ConfigSubmitted => {
            let wizard = std::mem::take(&mut state.wizard);
            match wizard {
                WizardState::ConfigureFields {
                    target: ConfigTarget::NewAction { parent_id },
                    descriptor,
                    values,
                    ..
                } => {
                    if state
                        .graph
                        .add_action_node(&descriptor, &parent_id, values)
                        .is_some()
                    {
                        state.mark_graph_modified();
                    }
                }
                WizardState::ConfigureFields {
                    target: ConfigTarget::ExistingNode { node_id },
                    values,
                    ..
                } => {
                    if state.graph.update_node_config(&node_id, values) {
                        state.mark_graph_modified();
                    }
                }
                other => state.wizard = other,
            }
            true
        }
        Message::BackToActionPicker => {
            if state.wizard.can_go_back_to_selector() {
                if let WizardState::ConfigureFields {
                    target: ConfigTarget::NewAction { parent_id },
                    ..
                } = std::mem::take(&mut state.wizard)
                {
                    state.wizard = WizardState::ActionSelect { parent_id };
                }
            }
            true
        }
        Message::WizardCancelled => {
            state.wizard = WizardState::Idle;
            true
        }
        _ => false,
    }
}

fn handle_node_clicked(state: &mut EditorState, node_id: &str) {
    let Some(node) = state.graph.node(node_id) else {
        return;
    };
    if node.is_sentinel() {
        state.wizard = WizardState::TriggerSelect { minting_form: false };
        return;
    }
    // Triggers (manual or form-backed) have nothing to re-configure.
    if node.role == NodeRole::Trigger {
        return;
    }
    let Some(descriptor) = state.catalog.descriptor(&node.data.type_id).cloned() else {
        debug!(node_id, type_id = %node.data.type_id, "no descriptor for node type");
        return;
    };
    let values = node.data.config.clone();
    let upstream = variables::upstream_of(&state.graph, node_id);
    state.wizard = WizardState::ConfigureFields {
        target: ConfigTarget::ExistingNode {
            node_id: node_id.to_string(),
        },
        descriptor,
        values,
        upstream,
    };
}

/// Credential gate passed: either open the configure step or, when the
/// descriptor has no fields, commit the node straight away.
pub(crate) fn begin_action_config(
    state: &mut EditorState,
    parent_id: &str,
    descriptor: crate::models::ActionType,
) {
    if descriptor.has_config_fields() {
        let upstream = variables::upstream_for_new_action(&state.graph, parent_id);
        state.wizard = WizardState::ConfigureFields {
            target: ConfigTarget::NewAction {
                parent_id: parent_id.to_string(),
            },
            descriptor,
            values: ConfigMap::new(),
            upstream,
        };
    } else {
        if state
            .graph
            .add_action_node(&descriptor, parent_id, ConfigMap::new())
            .is_some()
        {
            state.mark_graph_modified();
        }
        state.wizard = WizardState::Idle;
    }
}
