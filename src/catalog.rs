//! Trigger/action type catalog: fetched once per session, with built-in
//! defaults so the editor is usable before (or without) the fetch.

use crate::models::{ActionType, ConfigField, FieldKind, FieldOption};

#[derive(Debug, Clone)]
pub struct TypeCatalog {
    pub triggers: Vec<ActionType>,
    pub actions: Vec<ActionType>,
    /// Set once the server copy has replaced the defaults.
    pub loaded: bool,
}

impl Default for TypeCatalog {
    fn default() -> Self {
        TypeCatalog {
            triggers: default_trigger_types(),
            actions: default_action_types(),
            loaded: false,
        }
    }
}

impl TypeCatalog {
    pub fn replace(&mut self, triggers: Vec<ActionType>, actions: Vec<ActionType>) {
        self.triggers = triggers;
        self.actions = actions;
        self.loaded = true;
    }

    /// Look up a descriptor by type id across both halves of the catalog.
    pub fn descriptor(&self, type_id: &str) -> Option<&ActionType> {
        self.triggers
            .iter()
            .chain(self.actions.iter())
            .find(|t| t.id == type_id)
    }
}

fn text_field(key: &str, label: &str, placeholder: &str, required: bool) -> ConfigField {
    ConfigField {
        key: key.to_string(),
        label: label.to_string(),
        kind: FieldKind::Text,
        placeholder: Some(placeholder.to_string()),
        required,
        options: Vec::new(),
    }
}

fn textarea_field(key: &str, label: &str, placeholder: &str, required: bool) -> ConfigField {
    ConfigField {
        key: key.to_string(),
        label: label.to_string(),
        kind: FieldKind::Textarea,
        placeholder: Some(placeholder.to_string()),
        required,
        options: Vec::new(),
    }
}

pub fn default_trigger_types() -> Vec<ActionType> {
    vec![
        ActionType {
            id: crate::constants::MANUAL_TRIGGER_TYPE.to_string(),
            label: "Manual Trigger".to_string(),
            color: "#10B981".to_string(),
            description: Some("Start the workflow by hand".to_string()),
            config_fields: Vec::new(),
        },
        ActionType {
            id: crate::constants::FORM_TRIGGER_TYPE.to_string(),
            label: "Form Submission".to_string(),
            color: "#3B82F6".to_string(),
            description: Some("Run whenever someone submits your form".to_string()),
            config_fields: Vec::new(),
        },
    ]
}

pub fn default_action_types() -> Vec<ActionType> {
    vec![
        ActionType {
            id: "telegram-api".to_string(),
            label: "Telegram API".to_string(),
            color: "#0088CC".to_string(),
            description: Some("Send a message to a Telegram chat".to_string()),
            config_fields: vec![
                text_field("chatId", "Chat ID", "e.g. 123456789", true),
                textarea_field("message", "Message", "Message text to send", true),
            ],
        },
        ActionType {
            id: "email-send".to_string(),
            label: "Email Send".to_string(),
            color: "#EF4444".to_string(),
            description: Some("Send an email via your Gmail account".to_string()),
            config_fields: vec![
                ConfigField {
                    key: "to".to_string(),
                    label: "To".to_string(),
                    kind: FieldKind::Email,
                    placeholder: Some("recipient@example.com".to_string()),
                    required: true,
                    options: Vec::new(),
                },
                text_field("subject", "Subject", "Email subject", true),
                textarea_field("body", "Body", "Email body", true),
            ],
        },
        ActionType {
            id: "gemini".to_string(),
            label: "Gemini".to_string(),
            color: "#A855F7".to_string(),
            description: Some("Generate text with the Gemini API".to_string()),
            config_fields: vec![textarea_field(
                "prompt",
                "Prompt",
                "Prompt sent to the model",
                true,
            )],
        },
        ActionType {
            id: "webhook".to_string(),
            label: "Webhook".to_string(),
            color: "#8B5CF6".to_string(),
            description: Some("Call an external HTTP endpoint".to_string()),
            config_fields: vec![
                text_field("url", "URL", "https://example.com/hook", true),
                ConfigField {
                    key: "method".to_string(),
                    label: "Method".to_string(),
                    kind: FieldKind::Select,
                    placeholder: None,
                    required: true,
                    options: vec![
                        FieldOption {
                            label: "POST".to_string(),
                            value: "POST".to_string(),
                        },
                        FieldOption {
                            label: "GET".to_string(),
                            value: "GET".to_string(),
                        },
                    ],
                },
            ],
        },
        ActionType {
            id: "database".to_string(),
            label: "Database".to_string(),
            color: "#F59E0B".to_string(),
            description: Some("Run a query against the project database".to_string()),
            config_fields: vec![textarea_field("query", "Query", "SELECT ...", true)],
        },
    ]
}
