mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "smudge", about = "Video deblurring dataset preparation tool")]
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
    /// Extract frames from videos at a reduced rate
    Extract(commands::extract::ExtractArgs),
    /// Degrade extracted frame directories
    Degrade(commands::degrade::DegradeArgs),
    /// Degrade whole videos, one corruption per clip
    DegradeVideo(commands::degrade_video::DegradeVideoArgs),
    /// Score degraded frames against their clean counterparts
    Compare(commands::compare::CompareArgs),
    /// Extract and degrade in one pass
    Generate(commands::generate::GenerateArgs),
    /// Print or save a default config file
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
        Commands::Extract(args) => commands::extract::run(args),
        Commands::Degrade(args) => commands::degrade::run(args),
        Commands::DegradeVideo(args) => commands::degrade_video::run(args),
        Commands::Compare(args) => commands::compare::run(args),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
