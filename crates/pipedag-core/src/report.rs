//! Pipeline report
//!
//! The response record for one validation request. Field names are part of
//! the public API and must not change.

use serde::{Deserialize, Serialize};

/// Size statistics and DAG verdict for a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Number of nodes as received (duplicates counted)
    pub num_nodes: usize,

    /// Number of edges as received
    pub num_edges: usize,

    /// Whether the pipeline is a directed acyclic graph
    pub is_dag: bool,
}

impl PipelineReport {
    pub fn new(num_nodes: usize, num_edges: usize, is_dag: bool) -> Self {
        Self {
            num_nodes,
            num_edges,
            is_dag,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}
