mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crosswalk", about = "Periodic stripe detection in aerial imagery")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image dimensions and channels
    Info(commands::info::InfoArgs),
    /// Detect stripes inside one oriented box
    Analyze(commands::analyze::AnalyzeArgs),
    /// Detect stripes in every box listed in a TOML file
    Batch(commands::batch::BatchArgs),
    /// Apply a contrast or frequency filter to an image
    Enhance(commands::enhance::EnhanceArgs),
    /// Print or save a default batch file
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Batch(args) => commands::batch::run(args),
        Commands::Enhance(args) => commands::enhance::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
