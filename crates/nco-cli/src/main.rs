//! nco CLI - Command-line interface for the nco wavetable synthesizer.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nco")]
#[command(author, version, about = "nco fixed-point wavetable synthesizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the entries of a wavetable
    Wavetable(commands::wavetable::WavetableArgs),

    /// Render notes offline and report output statistics
    Render(commands::render::RenderArgs),

    /// List factory patches or show one as TOML
    Patches(commands::patches::PatchesArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Wavetable(args) => commands::wavetable::run(args),
        Commands::Render(args) => commands::render::run(args),
        Commands::Patches(args) => commands::patches::run(args),
    }
}
