//! CLI commands for the pairtok tokenizer.

pub mod tokenize;
pub mod train;

pub use tokenize::TokenizeCommand;
pub use train::TrainCommand;
