//! The canonical in-memory workflow graph: node/edge storage, node-id
//! allocation, placement of newly attached nodes, and conversion to and
//! from the persisted document shape.
//!
//! `BTreeMap` keeps node and edge iteration deterministic, which the
//! variable-reference helper and the serialized document both rely on.

use std::collections::BTreeMap;

use crate::constants::{
    CHILD_HORIZONTAL_SPACING, CHILD_VERTICAL_GAP, EDGE_ID_PREFIX, NODE_ID_PREFIX,
    SENTINEL_NODE_ID, TRIGGER_ORIGIN_X, TRIGGER_ORIGIN_Y,
};
use crate::models::{
    derive_role, ActionType, ConfigMap, DocumentConnection, DocumentNode, GraphEdge, GraphNode,
    NodeData, NodeRole, Position, WorkflowDocument,
};

/// Outcome of a `delete_node` call, so the caller can decide whether a
/// persist is warranted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The sentinel placeholder cannot be deleted.
    Ignored,
    /// The last real node was removed; the graph is back to the placeholder.
    ResetToPlaceholder,
    /// A node and all its incident edges were removed.
    Removed { edges_removed: usize },
}

#[derive(Debug, Clone)]
pub struct WorkflowGraph {
    nodes: BTreeMap<String, GraphNode>,
    edges: BTreeMap<String, GraphEdge>,
    next_node_id: u32,
}

impl Default for WorkflowGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowGraph {
    /// A fresh editor session: only the add-trigger placeholder.
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        let sentinel = GraphNode::sentinel();
        nodes.insert(sentinel.id.clone(), sentinel);
        WorkflowGraph {
            nodes,
            edges: BTreeMap::new(),
            next_node_id: 1,
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.values()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True while the graph holds nothing but the placeholder. Nothing is
    /// persisted in this state.
    pub fn is_placeholder_only(&self) -> bool {
        self.nodes.len() == 1 && self.nodes.contains_key(SENTINEL_NODE_ID)
    }

    pub fn reset_to_placeholder(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        let sentinel = GraphNode::sentinel();
        self.nodes.insert(sentinel.id.clone(), sentinel);
        self.next_node_id = 1;
    }

    fn allocate_node_id(&mut self) -> String {
        let id = format!("{}{}", NODE_ID_PREFIX, self.next_node_id);
        self.next_node_id += 1;
        id
    }

    /// `1 + max(trailing integer of node-<n> ids)`, ignoring ids that do not
    /// match the pattern. Recomputed after every load; server ids are never
    /// assumed contiguous.
    fn recompute_next_node_id(&mut self) {
        self.next_node_id = self
            .nodes
            .keys()
            .filter_map(|id| id.strip_prefix(NODE_ID_PREFIX))
            .filter_map(|suffix| suffix.parse::<u32>().ok())
            .max()
            .map(|max| max + 1)
            .unwrap_or(1);
    }

    /// Replace the entire node set with one trigger node at the canvas
    /// origin. Any previously built action chain is discarded on purpose:
    /// picking a new trigger starts the workflow over.
    pub fn add_trigger_node(&mut self, descriptor: &ActionType, config: ConfigMap) -> String {
        self.nodes.clear();
        self.edges.clear();
        let id = self.allocate_node_id();
        let node = GraphNode {
            id: id.clone(),
            kind: crate::constants::DOCUMENT_NODE_KIND.to_string(),
            position: Position {
                x: TRIGGER_ORIGIN_X,
                y: TRIGGER_ORIGIN_Y,
            },
            data: NodeData {
                label: descriptor.label.clone(),
                type_id: descriptor.id.clone(),
                color: descriptor.color.clone(),
                config,
            },
            role: NodeRole::Trigger,
        };
        self.nodes.insert(id.clone(), node);
        id
    }

    /// Append one action node under `parent_id` plus the `parent -> new`
    /// edge. Returns the new (node id, edge id), or `None` when the parent
    /// does not exist (the graph is left unchanged).
    pub fn add_action_node(
        &mut self,
        descriptor: &ActionType,
        parent_id: &str,
        config: ConfigMap,
    ) -> Option<(String, String)> {
        let position = self.next_child_position(parent_id)?;
        let id = self.allocate_node_id();
        let node = GraphNode {
            id: id.clone(),
            kind: crate::constants::DOCUMENT_NODE_KIND.to_string(),
            position,
            data: NodeData {
                label: descriptor.label.clone(),
                type_id: descriptor.id.clone(),
                color: descriptor.color.clone(),
                config,
            },
            role: NodeRole::Action,
        };
        let edge_id = format!("{}{}-{}", EDGE_ID_PREFIX, parent_id, id);
        self.nodes.insert(id.clone(), node);
        self.edges.insert(
            edge_id.clone(),
            GraphEdge {
                id: edge_id.clone(),
                source: parent_id.to_string(),
                target: id.clone(),
            },
        );
        Some((id, edge_id))
    }

    /// Fan-out layout: the first child sits directly below the parent;
    /// further children are spaced horizontally and the row is centered
    /// under the parent.
    fn next_child_position(&self, parent_id: &str) -> Option<Position> {
        let parent = self.nodes.get(parent_id)?;
        let child_count = self
            .edges
            .values()
            .filter(|edge| edge.source == parent_id)
            .count();

        let base_y = parent.position.y + CHILD_VERTICAL_GAP;
        if child_count == 0 {
            return Some(Position {
                x: parent.position.x,
                y: base_y,
            });
        }
        let start_x =
            parent.position.x - (child_count as f64 * CHILD_HORIZONTAL_SPACING) / 2.0;
        Some(Position {
            x: start_x + child_count as f64 * CHILD_HORIZONTAL_SPACING,
            y: base_y,
        })
    }

    /// Remove a node and every edge touching it. Deleting the last real
    /// node brings back the placeholder.
    pub fn delete_node(&mut self, node_id: &str) -> DeleteOutcome {
        if node_id == SENTINEL_NODE_ID || !self.nodes.contains_key(node_id) {
            return DeleteOutcome::Ignored;
        }
        if self.real_node_count() == 1 {
            self.reset_to_placeholder();
            return DeleteOutcome::ResetToPlaceholder;
        }
        self.nodes.remove(node_id);
        let before = self.edges.len();
        self.edges
            .retain(|_, edge| edge.source != node_id && edge.target != node_id);
        DeleteOutcome::Removed {
            edges_removed: before - self.edges.len(),
        }
    }

    fn real_node_count(&self) -> usize {
        self.nodes.values().filter(|n| !n.is_sentinel()).count()
    }

    /// Replace a node's config map in place. Position, edges, and type are
    /// untouched. No-op for unknown ids.
    pub fn update_node_config(&mut self, node_id: &str, config: ConfigMap) -> bool {
        match self.nodes.get_mut(node_id) {
            Some(node) => {
                node.data.config = config;
                true
            }
            None => false,
        }
    }

    pub fn update_node_position(&mut self, node_id: &str, x: f64, y: f64) -> bool {
        match self.nodes.get_mut(node_id) {
            Some(node) if !node.is_sentinel() => {
                node.position = Position { x, y };
                true
            }
            _ => false,
        }
    }

    /// Accept an edge drawn directly on the canvas. Both endpoints must be
    /// existing real nodes; a duplicate connection is a no-op.
    pub fn connect(&mut self, source: &str, target: &str) -> Option<String> {
        if source == target
            || source == SENTINEL_NODE_ID
            || target == SENTINEL_NODE_ID
            || !self.nodes.contains_key(source)
            || !self.nodes.contains_key(target)
        {
            return None;
        }
        let edge_id = format!("{}{}-{}", EDGE_ID_PREFIX, source, target);
        if self.edges.contains_key(&edge_id) {
            return None;
        }
        self.edges.insert(
            edge_id.clone(),
            GraphEdge {
                id: edge_id.clone(),
                source: source.to_string(),
                target: target.to_string(),
            },
        );
        Some(edge_id)
    }

    /// Build the backend document. The placeholder node is excluded; every
    /// other node and edge is included verbatim.
    pub fn to_document(&self, title: &str) -> WorkflowDocument {
        let mut document = WorkflowDocument::empty(title);
        for node in self.nodes.values().filter(|n| !n.is_sentinel()) {
            document
                .nodes
                .insert(node.id.clone(), DocumentNode::of(node));
        }
        for edge in self.edges.values() {
            document.connections.insert(
                edge.id.clone(),
                DocumentConnection {
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                },
            );
        }
        document
    }

    /// Rebuild the graph from a loaded document. An empty document resets to
    /// the placeholder; the node-id counter is recomputed from what was
    /// actually loaded.
    pub fn from_document(document: &WorkflowDocument) -> Self {
        if document.nodes.is_empty() {
            return WorkflowGraph::new();
        }
        let mut graph = WorkflowGraph {
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            next_node_id: 1,
        };
        for (id, doc_node) in &document.nodes {
            graph.nodes.insert(
                id.clone(),
                GraphNode {
                    id: id.clone(),
                    kind: doc_node.kind.clone(),
                    position: doc_node.position,
                    data: doc_node.data.clone(),
                    role: derive_role(&doc_node.kind, &doc_node.data.type_id),
                },
            );
        }
        for (id, connection) in &document.connections {
            // Edges referencing unknown nodes are dropped rather than
            // carried into an inconsistent graph.
            if graph.nodes.contains_key(&connection.source)
                && graph.nodes.contains_key(&connection.target)
            {
                graph.edges.insert(
                    id.clone(),
                    GraphEdge {
                        id: id.clone(),
                        source: connection.source.clone(),
                        target: connection.target.clone(),
                    },
                );
            }
        }
        graph.recompute_next_node_id();
        graph
    }

    #[cfg(test)]
    pub(crate) fn next_node_id(&self) -> u32 {
        self.next_node_id
    }
}
