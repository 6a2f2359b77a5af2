use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use archdeps::app::engine::AnalysisEngine;
use archdeps::cli;
use archdeps::domain::options::ExtractionOptions;

#[derive(Parser)]
#[command(name = "archdeps")]
#[command(about = "Member-level dependency extraction over decoded .NET metadata")]
#[command(version)]
struct Cli {
    /// Path to the metadata JSON file
    input: PathBuf,

    #[command(subcommand)]
    command: Commands,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Do not create stub methods for calls into external types
    #[arg(long, global = true)]
    no_stub_calls: bool,

    /// Skip backwards and type-level dependency linking
    #[arg(long, global = true)]
    no_backwards: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Type, member and edge counts plus extraction statistics
    Summary,
    /// List types
    Types {
        /// Include stub types created for external references
        #[arg(long)]
        stubs: bool,
    },
    /// Dependencies of one member
    Member {
        /// Full member name, e.g. `Ns.Type::get_Name()`
        name: String,
    },
    /// Cycles in the type dependency graph
    Cycles,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = ExtractionOptions {
        stub_external_calls: !args.no_stub_calls,
        link_backwards: !args.no_backwards,
    };
    let engine = AnalysisEngine::load_from_json(&args.input, options)?;

    match args.command {
        Commands::Summary => cli::display_summary(&engine, args.json),
        Commands::Types { stubs } => cli::display_types(&engine, stubs, args.json),
        Commands::Member { name } => cli::display_member(&engine, &name, args.json),
        Commands::Cycles => cli::display_cycles(&engine, args.json),
    }
}
