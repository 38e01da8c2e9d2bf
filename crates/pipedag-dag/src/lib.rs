//! Pipeline DAG validation
//!
//! This crate handles:
//! - Building a directed graph from pipeline node ids and edges
//! - Rejecting edges that reference undeclared nodes
//! - Cycle detection and topological ordering (Kahn's algorithm)
//! - The size/verdict report returned to clients

pub mod dag;
pub mod stats;

pub use dag::{validate, DanglingEdge, PipelineGraph};
pub use stats::analyze;
