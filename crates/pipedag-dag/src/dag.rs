//! Pipeline graph construction and DAG validation
//!
//! Validation is Kahn's algorithm: repeatedly remove nodes with no remaining
//! incoming edges. The graph is acyclic iff every node gets removed.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// An edge whose endpoint is not a declared node
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("edge {from} -> {to} references an undeclared node")]
pub struct DanglingEdge {
    pub from: String,
    pub to: String,
}

/// Directed graph over the distinct node ids of a pipeline
///
/// Every edge endpoint is a known node; [`PipelineGraph::build`] refuses
/// anything else.
#[derive(Debug, Clone)]
pub struct PipelineGraph<'a> {
    /// Distinct node ids in first-occurrence order
    nodes: Vec<&'a str>,

    /// node -> successors, in edge input order
    children: HashMap<&'a str, Vec<&'a str>>,

    /// node -> number of incoming edges
    in_degree: HashMap<&'a str, usize>,
}

impl<'a> PipelineGraph<'a> {
    /// Build the graph from node ids and `(source, target)` pairs
    ///
    /// Duplicate node ids collapse into one node. Duplicate edges are kept and
    /// each one counts towards the target's in-degree.
    pub fn build<N, E>(nodes: N, edges: E) -> Result<Self, DanglingEdge>
    where
        N: IntoIterator<Item = &'a str>,
        E: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut ids = Vec::new();
        let mut in_degree: HashMap<&'a str, usize> = HashMap::new();

        for id in nodes {
            if let Entry::Vacant(slot) = in_degree.entry(id) {
                slot.insert(0);
                ids.push(id);
            }
        }

        let edges: Vec<(&'a str, &'a str)> = edges.into_iter().collect();

        // Reject dangling references before building anything
        if let Some(&(from, to)) = edges
            .iter()
            .find(|(from, to)| !in_degree.contains_key(from) || !in_degree.contains_key(to))
        {
            return Err(DanglingEdge {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        let mut children: HashMap<&'a str, Vec<&'a str>> =
            ids.iter().map(|&id| (id, Vec::new())).collect();

        for (from, to) in edges {
            if let Some(successors) = children.get_mut(from) {
                successors.push(to);
            }
            if let Some(degree) = in_degree.get_mut(to) {
                *degree += 1;
            }
        }

        Ok(Self {
            nodes: ids,
            children,
            in_degree,
        })
    }

    /// Number of distinct nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get all nodes in first-occurrence order
    pub(crate) fn all_nodes(&self) -> &[&'a str] {
        &self.nodes
    }

    /// Get immediate successors of a node
    pub fn children(&self, node_id: &str) -> &[&'a str] {
        self.children
            .get(node_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of incoming edges of a node
    pub fn in_degree(&self, node_id: &str) -> Option<usize> {
        self.in_degree.get(node_id).copied()
    }

    /// Get topological order of all nodes, or `None` if the graph has a cycle
    ///
    /// Zero in-degree nodes are seeded in first-occurrence order and
    /// successors are visited in edge input order, so the result is stable
    /// for a given input.
    pub fn topological_order(&self) -> Option<Vec<&'a str>> {
        let mut in_degree = self.in_degree.clone();
        let mut order = Vec::with_capacity(self.nodes.len());

        let mut queue: VecDeque<&'a str> = self
            .nodes
            .iter()
            .copied()
            .filter(|id| in_degree.get(id) == Some(&0))
            .collect();

        // Kahn's algorithm
        while let Some(node) = queue.pop_front() {
            order.push(node);

            for &child in self.children(node) {
                if let Some(degree) = in_degree.get_mut(child) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(child);
                    }
                }
            }
        }

        if order.len() == self.nodes.len() {
            Some(order)
        } else {
            debug!(
                processed = order.len(),
                nodes = self.nodes.len(),
                "cycle detected"
            );
            None
        }
    }

    /// Check if the graph has no cycle
    pub fn is_acyclic(&self) -> bool {
        self.topological_order().is_some()
    }
}

/// Check whether node ids and edges form a directed acyclic graph
///
/// Returns `false` both when an edge references an undeclared node and when
/// the graph contains a cycle.
pub fn validate<'a, N, E>(nodes: N, edges: E) -> bool
where
    N: IntoIterator<Item = &'a str>,
    E: IntoIterator<Item = (&'a str, &'a str)>,
{
    match PipelineGraph::build(nodes, edges) {
        Ok(graph) => graph.is_acyclic(),
        Err(dangling) => {
            debug!(from = %dangling.from, to = %dangling.to, "dangling edge");
            false
        }
    }
}
