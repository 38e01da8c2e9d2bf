use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pipedag_core::{Pipeline, PipelineReport};
use pipedag_dag::{analyze, PipelineGraph};

/// pipedag - DAG validation for pipeline graphs
#[derive(Parser)]
#[command(name = "pipedag")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a pipeline JSON file describes a DAG
    Check {
        /// Pipeline file (`{"nodes": [...], "edges": [...]}`)
        file: PathBuf,

        /// Print the report as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Also save the JSON report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the nodes of a pipeline in topological order
    Order {
        /// Pipeline file (`{"nodes": [...], "edges": [...]}`)
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let ok = match cli.command {
        Commands::Check { file, json, output } => {
            check_command(&file, json, output.as_deref(), cli.verbose)?
        }
        Commands::Order { file } => order_command(&file, cli.verbose)?,
    };

    // Exit with error code if the pipeline is not a DAG
    if !ok {
        std::process::exit(1);
    }

    Ok(())
}

fn load_pipeline(path: &Path, verbose: bool) -> Result<Pipeline> {
    if verbose {
        eprintln!("{} {}", "Loading pipeline from:".cyan(), path.display());
    }

    let pipeline = Pipeline::from_file(path)?;

    if verbose {
        eprintln!(
            "{} {} nodes, {} edges",
            "Loaded".cyan(),
            pipeline.nodes.len(),
            pipeline.edges.len()
        );
    }

    Ok(pipeline)
}

/// Check command - report size and DAG verdict
fn check_command(path: &Path, json: bool, output: Option<&Path>, verbose: bool) -> Result<bool> {
    let pipeline = load_pipeline(path, verbose)?;
    let report = analyze(&pipeline);

    if let Some(output) = output {
        report.save_to_file(output)?;
        if verbose {
            eprintln!("{} {}", "Report saved to:".green(), output.display());
        }
    }

    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", format_summary(&report));
    }

    Ok(report.is_dag)
}

/// Order command - print a topological order
fn order_command(path: &Path, verbose: bool) -> Result<bool> {
    let pipeline = load_pipeline(path, verbose)?;

    let graph = match PipelineGraph::build(pipeline.node_ids(), pipeline.edge_pairs()) {
        Ok(graph) => graph,
        Err(dangling) => {
            println!("{} {}", "✗".red().bold(), dangling);
            return Ok(false);
        }
    };

    if verbose {
        eprintln!("{} {} distinct nodes", "Graph has".cyan(), graph.node_count());
    }

    match graph.topological_order() {
        Some(order) => {
            print!("{}", format_order(&graph, &order, verbose));
            Ok(true)
        }
        None => {
            println!("{}", "✗ Pipeline contains a cycle; no topological order exists".red().bold());
            Ok(false)
        }
    }
}

/// Render a topological order, one node per line
///
/// Verbose output adds each node's in-degree.
fn format_order(graph: &PipelineGraph<'_>, order: &[&str], verbose: bool) -> String {
    let mut out = String::new();

    for (i, node) in order.iter().enumerate() {
        out.push_str(&format!("  {}. {}", i + 1, node));
        if verbose {
            if let Some(degree) = graph.in_degree(node) {
                out.push_str(&format!(" (in-degree {})", degree));
            }
        }
        out.push('\n');
    }

    out
}

/// Render the report summary printed by `check`
fn format_summary(report: &PipelineReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", "=".repeat(60).bright_blue()));
    out.push_str(&format!("{}\n", "Pipeline Report".bold().bright_blue()));
    out.push_str(&format!("{}\n\n", "=".repeat(60).bright_blue()));

    out.push_str(&format!("  Nodes: {}\n", report.num_nodes));
    out.push_str(&format!("  Edges: {}\n", report.num_edges));

    let verdict = if report.is_dag {
        "Yes".green().bold()
    } else {
        "No".red().bold()
    };
    out.push_str(&format!("  DAG:   {}\n", verdict));

    out.push('\n');
    if report.is_dag {
        out.push_str(&format!("{}\n", "✓ Pipeline is a valid DAG".green().bold()));
    } else {
        out.push_str(&format!(
            "{}\n",
            "✗ Pipeline has a cycle or an edge to an undeclared node".red().bold()
        ));
    }

    out.push_str(&format!("\n{}\n", "=".repeat(60).bright_blue()));
    out
}
