//! Credential gating: which platforms the user already has credentials for,
//! and which action types demand one before they can be added.
//!
//! The gate only ever learns *that* a credential exists for a platform;
//! secret values stay server-side.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::models::StoredCredential;

/// Input kinds for a credential form are narrower than action config forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFieldKind {
    Text,
    Password,
    Email,
}

#[derive(Debug, Clone)]
pub struct CredentialFieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: CredentialFieldKind,
    pub placeholder: &'static str,
    pub required: bool,
}

/// What an action type needs before it may be added to the graph: either a
/// set of directly entered fields or an OAuth round trip.
#[derive(Debug, Clone)]
pub struct CredentialRequirement {
    pub platform: &'static str,
    pub fields: Vec<CredentialFieldSpec>,
    pub use_oauth: bool,
}

lazy_static! {
    static ref ACTION_CREDENTIAL_REQUIREMENTS: HashMap<&'static str, CredentialRequirement> = {
        let mut map = HashMap::new();
        map.insert(
            "telegram-api",
            CredentialRequirement {
                platform: "telegram",
                fields: vec![CredentialFieldSpec {
                    key: "botToken",
                    label: "Bot Token",
                    kind: CredentialFieldKind::Password,
                    placeholder: "Enter your Telegram bot token",
                    required: true,
                }],
                use_oauth: false,
            },
        );
        map.insert(
            "email-send",
            CredentialRequirement {
                platform: "gmail",
                fields: Vec::new(),
                use_oauth: true,
            },
        );
        map.insert(
            "gemini",
            CredentialRequirement {
                platform: "gemini",
                fields: vec![CredentialFieldSpec {
                    key: "apiKey",
                    label: "API Key",
                    kind: CredentialFieldKind::Password,
                    placeholder: "Enter your Gemini API key",
                    required: true,
                }],
                use_oauth: false,
            },
        );
        map
    };
}

/// Static lookup: the requirement attached to an action type, if any.
pub fn requirement_for(action_type_id: &str) -> Option<&'static CredentialRequirement> {
    ACTION_CREDENTIAL_REQUIREMENTS.get(action_type_id)
}

/// The single gating decision the wizard consumes.
#[derive(Debug, Clone)]
pub enum GateDecision {
    Ready,
    NeedsCredential(&'static CredentialRequirement),
}

/// Read-through cache of the user's stored credential references.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    credentials: Vec<StoredCredential>,
    pub loaded: bool,
}

impl CredentialStore {
    pub fn replace(&mut self, credentials: Vec<StoredCredential>) {
        self.credentials = credentials;
        self.loaded = true;
    }

    pub fn all(&self) -> &[StoredCredential] {
        &self.credentials
    }

    pub fn has_credential(&self, platform: &str) -> bool {
        self.credentials.iter().any(|c| c.platform == platform)
    }

    pub fn resolve(&self, action_type_id: &str) -> GateDecision {
        match requirement_for(action_type_id) {
            Some(requirement) if !self.has_credential(requirement.platform) => {
                GateDecision::NeedsCredential(requirement)
            }
            _ => GateDecision::Ready,
        }
    }
}
