//! Wizard state machine for the add-trigger / add-action / edit-node modal
//! flow. States are mutually exclusive at the top level; the configure step
//! carries its target so submit knows whether to append or update.

use crate::credentials::CredentialRequirement;
use crate::models::{ActionType, ConfigMap};
use crate::variables::UpstreamRef;

/// Where submitted config values go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigTarget {
    /// A new action appended under this parent.
    NewAction { parent_id: String },
    /// An existing node being re-configured in place.
    ExistingNode { node_id: String },
}

#[derive(Debug, Clone, Default)]
pub enum WizardState {
    #[default]
    Idle,
    /// Picking the workflow's trigger. `minting_form` is set while the
    /// form-trigger endpoint round trip is in flight.
    TriggerSelect { minting_form: bool },
    /// Picking an action to hang under `parent_id`.
    ActionSelect { parent_id: String },
    /// Collecting a credential before the pending action may be added.
    CredentialCollect {
        parent_id: String,
        pending: ActionType,
        requirement: &'static CredentialRequirement,
        submitting: bool,
    },
    /// Filling in the action's configurable fields.
    ConfigureFields {
        target: ConfigTarget,
        descriptor: ActionType,
        values: ConfigMap,
        upstream: Vec<UpstreamRef>,
    },
}

impl WizardState {
    pub fn is_idle(&self) -> bool {
        matches!(self, WizardState::Idle)
    }

    /// Back navigation from the configure step only exists when a selector
    /// was open to go back to.
    pub fn can_go_back_to_selector(&self) -> bool {
        matches!(
            self,
            WizardState::ConfigureFields {
                target: ConfigTarget::NewAction { .. },
                ..
            }
        )
    }
}
