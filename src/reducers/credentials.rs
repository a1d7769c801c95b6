//! Credential reducer: cache refreshes plus the collect-and-save step the
//! wizard routes through before a gated action is added.

use tracing::warn;

use crate::messages::{Command, Message};
use crate::reducers::wizard::begin_action_config;
use crate::state::EditorState;
use crate::wizard::WizardState;

pub fn update(state: &mut EditorState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::CredentialsLoaded(credentials) => {
            state.credentials.replace(credentials.clone());
            true
        }
        Message::CredentialsLoadFailed { error } => {
            warn!(error = %error, "credential list fetch failed");
            true
        }
        Message::CredentialSubmitted { label, fields } => {
            let WizardState::CredentialCollect {
                requirement,
                submitting,
                ..
            } = &mut state.wizard
            else {
                return true;
            };
            if *submitting {
                return true;
            }
            *submitting = true;
            if requirement.use_oauth {
                cmds.push(Command::StartOAuth {
                    platform: requirement.platform.to_string(),
                });
            } else {
                cmds.push(Command::SaveCredential {
                    platform: requirement.platform.to_string(),
                    title: label.clone(),
                    data: fields.clone(),
                });
            }
            true
        }
        Message::CredentialSaved { platform } => {
            cmds.push(Command::toast_success(format!(
                "{platform} credentials saved successfully!"
            )));
            cmds.push(Command::FetchCredentials);
            if let WizardState::CredentialCollect {
                parent_id, pending, ..
            } = std::mem::take(&mut state.wizard)
            {
                begin_action_config(state, &parent_id, pending);
            }
            true
        }
        Message::CredentialSaveFailed { error } => {
            warn!(error = %error, "credential save failed");
            cmds.push(Command::toast_error("Failed to save credentials"));
            if let WizardState::CredentialCollect { submitting, .. } = &mut state.wizard {
                *submitting = false;
            }
            true
        }
        Message::OAuthStartFailed { error } => {
            warn!(error = %error, "oauth authorization failed to start");
            cmds.push(Command::toast_error("Failed to start authorization"));
            if let WizardState::CredentialCollect { submitting, .. } = &mut state.wizard {
                *submitting = false;
            }
            true
        }
        _ => false,
    }
}
