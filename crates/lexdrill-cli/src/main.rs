//! lexdrill CLI: the interactive terminal drill.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

mod commands;
mod display;
mod input;

#[derive(Parser)]
#[command(name = "lexdrill", version, about = "Vocabulary and verb conjugation drill")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the vocabulary comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Data directory with data/concept.json and languages/<code>.json
    #[arg(long, conflicts_with_all = ["url", "offline"])]
    pub data_dir: Option<PathBuf>,

    /// Base URL serving the same layout as a data directory
    #[arg(long, conflicts_with = "offline")]
    pub url: Option<String>,

    /// Use the built-in vocabulary only
    #[arg(long)]
    pub offline: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive drill
    Drill {
        #[command(flatten)]
        source: SourceArgs,

        /// Language being learned
        #[arg(long)]
        target: Option<String>,

        /// Language answers are given in
        #[arg(long)]
        reference: Option<String>,

        /// Interaction mode: target-to-reference, reference-to-target, random
        #[arg(long)]
        mode: Option<String>,

        /// Seed for reproducible word selection
        #[arg(long)]
        seed: Option<u64>,

        /// How long a skipped word's feedback stays, in milliseconds
        #[arg(long)]
        hold_ms: Option<u64>,
    },

    /// Check a data directory for problems
    Validate {
        /// Data directory to check
        #[arg(long)]
        data_dir: PathBuf,
    },

    /// List the languages a source provides
    Languages {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Create a starter config and demo data directory
    Init,
}

#[tokio::main]
async fn main() {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "lexdrill=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Drill {
            source,
            target,
            reference,
            mode,
            seed,
            hold_ms,
        } => {
            commands::drill::execute(commands::drill::DrillArgs {
                source,
                target,
                reference,
                mode,
                seed,
                hold_ms,
            })
            .await
        }
        Commands::Validate { data_dir } => commands::validate::execute(data_dir),
        Commands::Languages { source } => commands::languages::execute(source).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
