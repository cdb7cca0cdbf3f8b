//! Train command implementation.

use clap::Parser;

/// Train command arguments.
#[derive(Parser)]
pub struct TrainCommand {
    /// Path to the training corpus
    #[arg(short, long)]
    pub input: String,

    /// Vocabulary store; loaded if present and written with --save
    #[arg(long, default_value = pairtok_tokenizer::VOCAB_FILE_NAME)]
    pub vocab: String,

    /// Maximum number of merges
    #[arg(short = 'k', long, default_value_t = 1_000)]
    pub merges: usize,

    /// Write the vocabulary back to the store after training
    #[arg(short, long, default_value_t = false)]
    pub save: bool,

    /// Character stripped from the corpus before training
    #[arg(long, default_value_t = default_sentinel())]
    pub sentinel: char,
}

fn default_sentinel() -> char {
    pairtok_tokenizer::EngineConfig::default().sentinel
}

use anyhow::Result as AnyhowResult;
use log::info;
use pairtok_tokenizer::BpeEngine;
use std::fs;
use std::time::Instant;

pub fn run(cmd: TrainCommand, verbose: bool) -> AnyhowResult<()> {
    let total = Instant::now();

    let mut engine = BpeEngine::builder()
        .vocab_path(&cmd.vocab)
        .sentinel(cmd.sentinel)
        .verbose(verbose)
        .build()?;

    if engine.is_trained() {
        println!(
            "Loaded {} tokens from {}",
            engine.vocab_size(),
            cmd.vocab
        );
    } else {
        println!("No vocabulary at {}, starting empty", cmd.vocab);
    }

    // Read training data
    let start = Instant::now();
    let data = fs::read(&cmd.input)?;
    info!(
        "Read {} bytes from {} in {:.2}s",
        data.len(),
        cmd.input,
        start.elapsed().as_secs_f64()
    );

    // Train
    let before = engine.vocab_size();
    let start = Instant::now();
    engine.train_bytes(&data, cmd.save, cmd.merges)?;
    println!(
        "Training completed in {:.2}s: {} new tokens, vocab size {}",
        start.elapsed().as_secs_f64(),
        engine.vocab_size() - before,
        engine.vocab_size()
    );

    if cmd.save {
        println!("Vocabulary saved to {}", cmd.vocab);
    }
    println!("Total time: {:.2}s", total.elapsed().as_secs_f64());

    Ok(())
}
