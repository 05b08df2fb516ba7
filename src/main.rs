use clap::{Parser, Subcommand};
use cnvtree::engine::{downstream_closure, linear_order};
use cnvtree::model::Edge;
use cnvtree::{CnvTreeConfig, InteractionSession, Tool};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Inspect and trim single-cell lineage trees.
#[derive(Debug, Parser)]
#[command(name = "cnvtree", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the linear (pre-order) cell order as JSON
    Order { config: PathBuf },
    /// Print the downstream closure of an edge as JSON
    Closure {
        config: PathBuf,
        /// Edge id, e.g. `link_source_A_target_B`
        #[arg(long)]
        edge: Edge,
    },
    /// Trim the subtree below an edge and print the outcome as JSON
    Trim {
        config: PathBuf,
        /// Edge id, e.g. `link_source_A_target_B`
        #[arg(long)]
        edge: Edge,
    },
    /// Print the tree as ASCII art
    Show { config: PathBuf },
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Order { config } => {
            let config = CnvTreeConfig::from_json_file(config)?;
            let order = linear_order(&config.edge_index()?, &config.root_sc_id)?;
            println!("{}", serde_json::to_string_pretty(&order)?);
        }
        Command::Closure { config, edge } => {
            let config = CnvTreeConfig::from_json_file(config)?;
            let closure = downstream_closure(&config.edge_index()?, &edge)?;
            println!("{}", serde_json::to_string_pretty(&closure)?);
        }
        Command::Trim { config, edge } => {
            let config = CnvTreeConfig::from_json_file(config)?;
            let mut session = InteractionSession::from_config(&config)?;
            session.toggle_tool(Tool::Trim);
            session.hover_edge(&edge)?;
            if let Some(outcome) = session.click_edge(&edge)? {
                let translations = session.layout().translations(&outcome);
                let report = json!({
                    "outcome": outcome,
                    "translations": translations,
                    "matrix_height": session.matrix_height(),
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
        Command::Show { config } => {
            let config = CnvTreeConfig::from_json_file(config)?;
            let (_, tree) = cnvtree::build_tree(&config)?;
            print!("{}", tree.to_ascii());
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
