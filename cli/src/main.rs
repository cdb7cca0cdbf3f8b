//! Pairtok CLI - Command-line interface for the pair-encoding tokenizer.
//!
//! This is the main entry point for the `pairtok` command-line tool.

mod commands;

use clap::{Parser, Subcommand};
use commands::{TokenizeCommand, TrainCommand};

#[derive(Parser)]
#[command(name = "pairtok")]
#[command(about = "A pair-encoding subword tokenizer", long_about = None)]
#[command(version)]
struct Cli {
    /// Log progress, including every merge
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Learn merged tokens from a corpus
    Train(TrainCommand),
    /// Split text into tokens with a stored vocabulary
    Tokenize(TokenizeCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_secs()
        .init();

    match cli.command {
        Commands::Train(cmd) => commands::train::run(cmd, cli.verbose)?,
        Commands::Tokenize(cmd) => commands::tokenize::run(cmd)?,
    }

    Ok(())
}
