//! Upstream variable references: which ancestors of a node may be referenced
//! from its configuration via a `{{nodeId.output}}` token.

use std::collections::BTreeSet;

use crate::constants::OUTPUT_PRODUCING_TYPES;
use crate::graph::WorkflowGraph;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRef {
    pub id: String,
    pub label: String,
}

impl UpstreamRef {
    /// The copyable placeholder token the UI offers for this node.
    pub fn reference_token(&self) -> String {
        format!("{{{{{}.output}}}}", self.id)
    }
}

fn produces_output(graph: &WorkflowGraph, node_id: &str) -> bool {
    graph
        .node(node_id)
        .map(|node| OUTPUT_PRODUCING_TYPES.contains(&node.data.type_id.as_str()))
        .unwrap_or(false)
}

/// Walk the edge graph backward from `node_id` (breadth-first, each node
/// visited once) and collect every ancestor whose type produces output, in
/// first-discovered order. The node itself is never included.
pub fn upstream_of(graph: &WorkflowGraph, node_id: &str) -> Vec<UpstreamRef> {
    let mut refs = Vec::new();
    let mut visited: BTreeSet<String> = BTreeSet::new();
    visited.insert(node_id.to_string());
    let mut frontier = vec![node_id.to_string()];

    while let Some(current) = frontier.pop() {
        // Edge ids sort deterministically, so discovery order is stable.
        let mut parents: Vec<&str> = graph
            .edges()
            .filter(|edge| edge.target == current)
            .map(|edge| edge.source.as_str())
            .collect();
        parents.dedup();

        for parent in parents.drain(..) {
            if !visited.insert(parent.to_string()) {
                continue;
            }
            if produces_output(graph, parent) {
                if let Some(node) = graph.node(parent) {
                    refs.push(UpstreamRef {
                        id: node.id.clone(),
                        label: node.data.label.clone(),
                    });
                }
            }
            frontier.insert(0, parent.to_string());
        }
    }
    refs
}

/// Upstream list for a brand-new action about to be attached under
/// `parent_id`: the parent itself comes first when it qualifies, then the
/// rest of its ancestry.
pub fn upstream_for_new_action(graph: &WorkflowGraph, parent_id: &str) -> Vec<UpstreamRef> {
    let mut refs = Vec::new();
    if produces_output(graph, parent_id) {
        if let Some(parent) = graph.node(parent_id) {
            refs.push(UpstreamRef {
                id: parent.id.clone(),
                label: parent.data.label.clone(),
            });
        }
    }
    for upstream in upstream_of(graph, parent_id) {
        if refs.iter().all(|r| r.id != upstream.id) {
            refs.push(upstream);
        }
    }
    refs
}
