//! Constants for the editor core.
//!
//! This module centralizes commonly used string literals and layout numbers
//! to prevent typos and enable safe refactoring across the codebase.

// Sentinel placeholder shown when the graph has no real nodes. It is never
// persisted and never has edges.
pub const SENTINEL_NODE_ID: &str = "add-trigger";
pub const SENTINEL_NODE_TYPE: &str = "addTrigger";
pub const SENTINEL_NODE_LABEL: &str = "Add Trigger";

// Real node ids follow `node-<n>`; the counter is recomputed on every load.
pub const NODE_ID_PREFIX: &str = "node-";
pub const EDGE_ID_PREFIX: &str = "edge-";

// Document node kind for every real node (the canvas renders them all with
// the same component).
pub const DOCUMENT_NODE_KIND: &str = "custom";

// Canvas placement
pub const TRIGGER_ORIGIN_X: f64 = 400.0;
pub const TRIGGER_ORIGIN_Y: f64 = 300.0;
pub const CHILD_VERTICAL_GAP: f64 = 80.0;
pub const CHILD_HORIZONTAL_SPACING: f64 = 120.0;

// Auto-save debounce window. Each graph mutation restarts the window.
pub const AUTOSAVE_DEBOUNCE_MS: u64 = 3_000;

// Type ids
pub const MANUAL_TRIGGER_TYPE: &str = "manual-trigger";
pub const FORM_TRIGGER_TYPE: &str = "form-submission";

pub const TRIGGER_TYPE_IDS: &[&str] = &[MANUAL_TRIGGER_TYPE, FORM_TRIGGER_TYPE];

// Ancestor node types whose run output may be referenced downstream via a
// `{{nodeId.output}}` token. Send-only actions are excluded.
pub const OUTPUT_PRODUCING_TYPES: &[&str] =
    &[FORM_TRIGGER_TYPE, "gemini", "webhook", "database"];

// Config keys written onto a form-submission trigger node.
pub const CONFIG_KEY_FORM_ID: &str = "formId";
pub const CONFIG_KEY_WEBHOOK_URL: &str = "webhookUrl";
pub const CONFIG_KEY_FORM_URL: &str = "formUrl";

pub const DEFAULT_WORKFLOW_TITLE: &str = "New Workflow";
