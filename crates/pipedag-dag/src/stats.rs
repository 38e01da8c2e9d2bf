//! Pipeline statistics
//!
//! Pairs the raw node/edge counts of a pipeline with the DAG verdict.

use pipedag_core::{Pipeline, PipelineReport};
use tracing::debug;

use crate::dag::validate;

/// Build the report for a pipeline
///
/// Counts are the input lengths as received; duplicate node ids are counted
/// here even though validation treats them as one node.
pub fn analyze(pipeline: &Pipeline) -> PipelineReport {
    let is_dag = validate(pipeline.node_ids(), pipeline.edge_pairs());
    let report = PipelineReport::new(pipeline.nodes.len(), pipeline.edges.len(), is_dag);

    debug!(
        num_nodes = report.num_nodes,
        num_edges = report.num_edges,
        is_dag = report.is_dag,
        "analyzed pipeline"
    );

    report
}
