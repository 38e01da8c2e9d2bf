//! Pipeline request model
//!
//! Typed view of a pipeline submitted for validation: a list of nodes and a
//! list of directed edges between them. Only node ids and edge endpoints take
//! part in validation; everything else is carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Node identifier, compared by string equality
pub type NodeId = String;

/// A node in the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier within the pipeline
    pub id: NodeId,

    /// Node kind as reported by the editor (e.g. "llm", "text")
    #[serde(rename = "type")]
    pub node_type: String,

    /// Canvas position, opaque to validation
    #[serde(default)]
    pub position: Map<String, Value>,

    /// Node-specific settings, opaque to validation
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Node {
    /// Create a node with empty position and data
    pub fn new(id: impl Into<NodeId>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            position: Map::new(),
            data: Map::new(),
        }
    }
}

/// A directed edge `source -> target`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,

    /// Edge identifier; not required to be unique
    #[serde(default)]
    pub id: String,
}

impl Edge {
    /// Create an edge without an identifier
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            id: String::new(),
        }
    }

    /// Set the edge identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// A pipeline as submitted by a client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Pipeline {
    /// Create a pipeline from nodes and edges
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Load pipeline from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, PipelineError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PipelineError::IoError(path.display().to_string(), e.to_string()))?;

        Self::from_str(&contents)
    }

    /// Parse pipeline from a JSON string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(json: &str) -> Result<Self, PipelineError> {
        serde_json::from_str(json).map_err(|e| PipelineError::ParseError(e.to_string()))
    }

    /// Node ids in input order, duplicates included
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    /// Edge endpoints in input order
    pub fn edge_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
    }
}

/// Pipeline loading errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Failed to read pipeline file {0}: {1}")]
    IoError(String, String),

    #[error("Failed to parse pipeline JSON: {0}")]
    ParseError(String),
}
