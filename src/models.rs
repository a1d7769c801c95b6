//! Shared data model: catalog descriptors, graph nodes/edges, stored
//! credential references, and the persisted workflow document shape.
//!
//! Only `NodeData` ever crosses the wire inside a node; everything the
//! editor needs at runtime but must not persist (role, selection, pending
//! callbacks in the old UI) lives outside of it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{
    DOCUMENT_NODE_KIND, SENTINEL_NODE_ID, SENTINEL_NODE_LABEL, SENTINEL_NODE_TYPE,
    TRIGGER_TYPE_IDS,
};

pub type ConfigMap = BTreeMap<String, Value>;

/// Kind of input rendered for one configurable field of an action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Number,
    Textarea,
    Select,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

/// One configurable field of an action type, in catalog order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigField {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
}

/// A trigger-type or action-type catalog entry. Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionType {
    pub id: String,
    pub label: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "configFields", skip_serializing_if = "Vec::is_empty")]
    pub config_fields: Vec<ConfigField>,
}

impl ActionType {
    pub fn has_config_fields(&self) -> bool {
        !self.config_fields.is_empty()
    }

    pub fn is_trigger_type(&self) -> bool {
        TRIGGER_TYPE_IDS.contains(&self.id.as_str())
    }
}

/// Reference to a credential stored server-side. The secret itself never
/// reaches the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredential {
    pub id: String,
    pub platform: String,
    pub title: String,
    #[serde(default, rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Row in the "My Workflows" listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowSummary {
    pub id: String,
    pub title: String,
    pub enabled: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Trigger,
    Action,
}

/// The persisted payload of a node. Exactly `{label, type, color, config}`.
/// Nothing transient is representable here, so serialization can never leak
/// editor-only state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
    #[serde(rename = "type")]
    pub type_id: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub config: ConfigMap,
}

/// A node as the editor holds it in memory.
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub id: String,
    pub kind: String,
    pub position: Position,
    pub data: NodeData,
    pub role: NodeRole,
}

impl GraphNode {
    pub fn is_sentinel(&self) -> bool {
        self.id == SENTINEL_NODE_ID
    }

    /// The synthetic placeholder standing in for an empty graph.
    pub fn sentinel() -> Self {
        GraphNode {
            id: SENTINEL_NODE_ID.to_string(),
            kind: SENTINEL_NODE_TYPE.to_string(),
            position: Position {
                x: crate::constants::TRIGGER_ORIGIN_X,
                y: crate::constants::TRIGGER_ORIGIN_Y,
            },
            data: NodeData {
                label: SENTINEL_NODE_LABEL.to_string(),
                type_id: SENTINEL_NODE_TYPE.to_string(),
                color: String::new(),
                config: ConfigMap::new(),
            },
            role: NodeRole::Trigger,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

// ---------------------------------------------------------------------------
// Persisted workflow document: the exact backend shape from
// GET/POST/PUT /workflow. Unknown extra keys are tolerated on load.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentNode {
    pub position: Position,
    pub data: NodeData,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConnection {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowDocument {
    pub title: String,
    pub enabled: bool,
    #[serde(default)]
    pub nodes: BTreeMap<String, DocumentNode>,
    #[serde(default)]
    pub connections: BTreeMap<String, DocumentConnection>,
}

impl WorkflowDocument {
    pub fn empty(title: &str) -> Self {
        WorkflowDocument {
            title: title.to_string(),
            enabled: true,
            nodes: BTreeMap::new(),
            connections: BTreeMap::new(),
        }
    }
}

/// Response of `POST /create-form-trigger`, plus the public form URL the
/// client derives from its configured app origin.
#[derive(Debug, Clone)]
pub struct FormTrigger {
    pub form_id: String,
    pub webhook_url: String,
    pub form_url: String,
}

impl Default for NodeData {
    fn default() -> Self {
        NodeData {
            label: String::new(),
            type_id: String::new(),
            color: String::new(),
            config: ConfigMap::new(),
        }
    }
}

/// Derive a loaded node's role from its stored type id. Roles are a runtime
/// concept; the document never carries them.
pub fn derive_role(kind: &str, type_id: &str) -> NodeRole {
    if kind == SENTINEL_NODE_TYPE || TRIGGER_TYPE_IDS.contains(&type_id) {
        NodeRole::Trigger
    } else {
        NodeRole::Action
    }
}

impl DocumentNode {
    pub fn of(node: &GraphNode) -> Self {
        DocumentNode {
            position: node.position,
            data: node.data.clone(),
            kind: DOCUMENT_NODE_KIND.to_string(),
        }
    }
}
