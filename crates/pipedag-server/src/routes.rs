//! Request handlers

use axum::Json;
use pipedag_core::{Pipeline, PipelineReport};
use serde_json::{json, Value};
use tracing::info;

/// `GET /` liveness probe
pub async fn ping() -> Json<Value> {
    Json(json!({ "Ping": "Pong" }))
}

/// `POST /pipelines/parse`
///
/// Malformed bodies never get here; the `Json` extractor rejects them.
pub async fn parse_pipeline(Json(pipeline): Json<Pipeline>) -> Json<PipelineReport> {
    let report = pipedag_dag::analyze(&pipeline);

    info!(
        num_nodes = report.num_nodes,
        num_edges = report.num_edges,
        is_dag = report.is_dag,
        "parsed pipeline"
    );

    Json(report)
}
