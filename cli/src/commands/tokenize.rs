//! Tokenize command implementation.

use clap::Parser;

/// Tokenize command arguments.
#[derive(Parser)]
pub struct TokenizeCommand {
    /// Vocabulary store to tokenize with
    #[arg(long, default_value = pairtok_tokenizer::VOCAB_FILE_NAME)]
    pub vocab: String,

    /// Text to tokenize ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Print token ids instead of token text ("?" for tokens without one)
    #[arg(long, default_value_t = false)]
    pub ids: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<String>,
}

use anyhow::{bail, Result as AnyhowResult};
use pairtok_tokenizer::BpeEngine;

pub fn run(cmd: TokenizeCommand) -> AnyhowResult<()> {
    let engine = BpeEngine::builder().vocab_path(&cmd.vocab).build()?;
    if !engine.is_trained() {
        bail!("no vocabulary found at {}", cmd.vocab);
    }

    // Read input text (from stdin if "-")
    let input_text = if cmd.input == "-" {
        use std::io::Read;
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        cmd.input
    };

    let encoding = engine.encode(&input_text);

    let output = if cmd.ids {
        encoding
            .ids
            .iter()
            .map(|id| id.map_or_else(|| "?".to_string(), |id| id.to_string()))
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        encoding
            .tokens
            .iter()
            .map(|token| format!("{:?}", token))
            .collect::<Vec<_>>()
            .join(" ")
    };

    match &cmd.output {
        Some(path) => {
            std::fs::write(path, &output)?;
            println!("Wrote {} tokens to {}", encoding.len(), path);
        }
        None => {
            println!("{}", output);
        }
    }

    Ok(())
}
