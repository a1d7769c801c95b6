//! The editor controller: owns the state, runs the message/command loop,
//! and turns commands into backend calls or shell requests.
//!
//! `dispatch` takes the current clock so the debounce logic never reads
//! wall time itself; tests drive a virtual clock through the same path.

use std::collections::VecDeque;

use tracing::warn;

use crate::messages::{Command, Message};
use crate::network::BackendApi;
use crate::session::Session;
use crate::shell::Shell;
use crate::state::EditorState;
use crate::update;

pub struct EditorController<A: BackendApi, S: Shell> {
    state: EditorState,
    session: Session,
    api: A,
    shell: S,
}

impl<A: BackendApi, S: Shell> EditorController<A, S> {
    pub fn new(session: Session, api: A, shell: S) -> Self {
        EditorController {
            state: EditorState::new(),
            session,
            api,
            shell,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut S {
        &mut self.shell
    }

    /// Drop any armed auto-save, e.g. when the editor page unmounts.
    pub fn cancel_pending_saves(&mut self) {
        self.state.autosave.disarm();
    }

    /// Apply one message and every message it transitively produces.
    /// `now_ms` becomes the state clock for the whole batch. Returns
    /// whether the initial message was claimed by a reducer.
    pub fn dispatch(&mut self, msg: Message, now_ms: u64) -> bool {
        self.state.clock_ms = now_ms;
        let mut queue = VecDeque::new();
        queue.push_back(msg);
        let mut first_handled = None;

        while let Some(msg) = queue.pop_front() {
            let mut cmds = Vec::new();
            let handled = update::update(&mut self.state, &msg, &mut cmds);
            first_handled.get_or_insert(handled);
            for cmd in cmds {
                match cmd {
                    Command::SendMessage(next) => queue.push_back(*next),
                    other => {
                        if let Some(produced) = self.execute(other) {
                            queue.push_back(produced);
                        }
                    }
                }
            }
        }
        first_handled.unwrap_or(false)
    }

    fn execute(&mut self, cmd: Command) -> Option<Message> {
        match cmd {
            Command::SendMessage(msg) => Some(*msg),

            Command::FetchCatalog => {
                let token = self.require_token("FetchCatalog")?;
                let result = self
                    .api
                    .fetch_trigger_types(&token)
                    .and_then(|triggers| {
                        let actions = self.api.fetch_action_types(&token)?;
                        Ok((triggers, actions))
                    });
                Some(match result {
                    Ok((triggers, actions)) => Message::CatalogLoaded { triggers, actions },
                    Err(e) => Message::CatalogLoadFailed {
                        error: e.to_string(),
                    },
                })
            }

            Command::FetchWorkflow { workflow_id } => {
                let token = self.require_token("FetchWorkflow")?;
                Some(match self.api.fetch_workflow(&token, &workflow_id) {
                    Ok(document) => Message::WorkflowLoaded { document },
                    Err(e) => Message::WorkflowLoadFailed {
                        error: e.to_string(),
                    },
                })
            }

            Command::FetchCredentials => {
                let token = self.require_token("FetchCredentials")?;
                Some(match self.api.list_credentials(&token) {
                    Ok(credentials) => Message::CredentialsLoaded(credentials),
                    Err(e) => Message::CredentialsLoadFailed {
                        error: e.to_string(),
                    },
                })
            }

            Command::CreateWorkflow { document } => {
                let token = self.require_token("CreateWorkflow")?;
                Some(match self.api.create_workflow(&token, &document) {
                    Ok(workflow_id) => Message::WorkflowCreated { workflow_id },
                    Err(e) => Message::WorkflowSaveFailed {
                        error: e.to_string(),
                    },
                })
            }

            Command::UpdateWorkflow {
                workflow_id,
                document,
            } => {
                let token = self.require_token("UpdateWorkflow")?;
                Some(
                    match self.api.update_workflow(&token, &workflow_id, &document) {
                        Ok(()) => Message::WorkflowSaved,
                        Err(e) => Message::WorkflowSaveFailed {
                            error: e.to_string(),
                        },
                    },
                )
            }

            Command::PersistDeletion {
                workflow_id,
                document,
            } => {
                let token = self.require_token("PersistDeletion")?;
                Some(
                    match self.api.update_workflow(&token, &workflow_id, &document) {
                        Ok(()) => Message::WorkflowSaved,
                        Err(e) => Message::DeletePersistFailed {
                            error: e.user_message(),
                        },
                    },
                )
            }

            Command::ExecuteWorkflow { workflow_id } => {
                let token = self.require_token("ExecuteWorkflow")?;
                Some(match self.api.execute_workflow(&token, &workflow_id) {
                    Ok(()) => Message::ExecutionAcknowledged,
                    Err(e) => Message::ExecutionFailed {
                        error: e.user_message(),
                    },
                })
            }

            Command::SaveCredential {
                platform,
                title,
                data,
            } => {
                let token = self.require_token("SaveCredential")?;
                Some(
                    match self.api.save_credential(&token, &platform, &title, &data) {
                        Ok(()) => Message::CredentialSaved { platform },
                        Err(e) => Message::CredentialSaveFailed {
                            error: e.user_message(),
                        },
                    },
                )
            }

            Command::StartOAuth { platform } => {
                let token = self.require_token("StartOAuth")?;
                match self.api.oauth_authorize_url(&token, &platform) {
                    Ok(url) => {
                        // The page unloads here; nothing comes back on success.
                        self.shell.navigate(&url);
                        None
                    }
                    Err(e) => Some(Message::OAuthStartFailed {
                        error: e.user_message(),
                    }),
                }
            }

            Command::CreateFormTrigger {
                descriptor,
                workflow_id,
            } => {
                let token = self.require_token("CreateFormTrigger")?;
                Some(
                    match self.api.create_form_trigger(
                        &token,
                        workflow_id.as_deref(),
                        &descriptor.id,
                    ) {
                        Ok(trigger) => Message::FormTriggerCreated {
                            descriptor,
                            form_id: trigger.form_id,
                            webhook_url: trigger.webhook_url,
                            form_url: trigger.form_url,
                        },
                        Err(e) => Message::FormTriggerCreateFailed {
                            error: e.to_string(),
                        },
                    },
                )
            }

            Command::Toast { kind, message } => {
                self.shell.toast(kind, &message);
                None
            }
            Command::UpdateUrl { workflow_id } => {
                self.shell.set_workflow_url(&workflow_id);
                None
            }
            Command::ShowFormUrl { url } => {
                self.shell.show_form_url(&url);
                None
            }
        }
    }

    /// Clone the token out so `self.api` can be borrowed during the call.
    fn require_token(&mut self, command: &str) -> Option<String> {
        match self.session.token() {
            Some(token) => Some(token.to_string()),
            None => {
                warn!(command, "skipping backend command without a session token");
                None
            }
        }
    }
}
