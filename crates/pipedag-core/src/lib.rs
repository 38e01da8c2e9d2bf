//! pipedag core
//!
//! Typed request/response model and configuration shared by the validator,
//! the HTTP server and the CLI. Report field names are part of the public API.

pub mod pipeline;
pub mod report;
pub mod config;

pub use pipeline::{Node, Edge, NodeId, Pipeline, PipelineError};
pub use report::PipelineReport;
pub use config::{Config, ServerConfig, CorsConfig, ConfigError};
