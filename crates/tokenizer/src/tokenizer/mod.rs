//! Main engine implementation.
//!
//! This module provides [`BpeEngine`], which owns the vocabulary and prefix
//! trie, learns new tokens from a corpus and segments text with them.

mod tokens;

pub use tokens::Tokens;

use crate::io::{VocabLoader, VocabSaver};
use log::{debug, info};
use pairtok_core::{PrefixTrie, Result, TokenizerError, Vocabulary};
use pairtok_training::{BpeTrainer, TrainingConfig, TrainingOutcome, DEFAULT_SENTINEL};
use std::path::{Path, PathBuf};

/// Configuration for building an engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Reserved character stripped from training corpora
    pub sentinel: char,
    /// Log each merge at `info` level
    pub verbose: bool,
    /// Location of the vocabulary store, if any
    pub vocab_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL,
            verbose: false,
            vocab_path: None,
        }
    }
}

/// Builder for creating an engine.
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    config: EngineConfig,
}

impl EngineBuilder {
    /// Create a new engine builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the vocabulary store location.
    pub fn vocab_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.vocab_path = Some(path.into());
        self
    }

    /// Set the sentinel character.
    pub fn sentinel(mut self, sentinel: char) -> Self {
        self.config.sentinel = sentinel;
        self
    }

    /// Enable or disable per-merge logging.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Build the engine, loading the vocabulary store if one is configured.
    pub fn build(self) -> Result<BpeEngine> {
        BpeEngine::new(self.config)
    }
}

/// Pair-encoding engine.
///
/// Owns the vocabulary, the trie mirroring it, and whether a vocabulary has
/// been trained or loaded. Not intended for concurrent mutation.
#[derive(Debug, Clone)]
pub struct BpeEngine {
    /// Vocabulary
    vocab: Vocabulary,
    /// Prefix trie over every vocabulary token
    trie: PrefixTrie,
    /// Set once a vocabulary has been loaded or trained
    trained: bool,
    /// Configuration
    config: EngineConfig,
}

impl BpeEngine {
    /// Create an engine with the given configuration.
    ///
    /// If `vocab_path` names an existing store, its vocabulary is loaded and
    /// the engine counts as trained. A missing store leaves the engine empty
    /// and untrained. Read or parse failures are returned.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let loaded = match &config.vocab_path {
            Some(path) => VocabLoader::load(path)?,
            None => None,
        };

        let engine = match loaded {
            Some(vocab) => {
                info!("Loaded {} vocabulary entries", vocab.len());
                Self::with_vocabulary(vocab, true, config)
            }
            None => Self {
                vocab: Vocabulary::new(),
                trie: PrefixTrie::new(),
                trained: false,
                config,
            },
        };

        Ok(engine)
    }

    /// Create an engine builder.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Create an engine seeded with `vocab`. A non-empty vocabulary counts as
    /// trained.
    pub fn from_vocabulary(vocab: Vocabulary) -> Self {
        let trained = !vocab.is_empty();
        Self::with_vocabulary(vocab, trained, EngineConfig::default())
    }

    fn with_vocabulary(vocab: Vocabulary, trained: bool, config: EngineConfig) -> Self {
        let trie: PrefixTrie = vocab.iter_by_id().collect();
        Self {
            trained,
            vocab,
            trie,
            config,
        }
    }

    /// Train on `corpus` for at most `max_merges` merges.
    ///
    /// Learned tokens extend the current vocabulary. If `persist` is set the
    /// full vocabulary is written to the configured store afterwards.
    pub fn train(&mut self, corpus: &str, persist: bool, max_merges: usize) -> Result<&Vocabulary> {
        self.train_detailed(corpus, persist, max_merges)?;
        Ok(&self.vocab)
    }

    /// Train on raw bytes, rejecting anything that is not UTF-8 text before
    /// touching any state.
    pub fn train_bytes(
        &mut self,
        corpus: &[u8],
        persist: bool,
        max_merges: usize,
    ) -> Result<&Vocabulary> {
        let corpus = std::str::from_utf8(corpus).map_err(|e| {
            TokenizerError::InvalidInput(format!("training corpus is not UTF-8 text: {}", e))
        })?;
        self.train(corpus, persist, max_merges)
    }

    /// Train like [`BpeEngine::train`], returning the per-merge record.
    pub fn train_detailed(
        &mut self,
        corpus: &str,
        persist: bool,
        max_merges: usize,
    ) -> Result<TrainingOutcome> {
        if persist && self.config.vocab_path.is_none() {
            return Err(TokenizerError::InvalidConfig(
                "persist requested but no vocabulary path is configured".to_string(),
            ));
        }

        let trainer = BpeTrainer::new(TrainingConfig {
            max_merges,
            sentinel: self.config.sentinel,
            verbose: self.config.verbose,
        });
        let outcome = trainer.train(corpus, &mut self.vocab, &mut self.trie)?;
        self.trained = true;

        debug!(
            "Corpus reduced to {} tokens after {} merges",
            outcome.tokens.len(),
            outcome.merges.len()
        );

        if persist {
            self.save()?;
        }

        Ok(outcome)
    }

    /// Write the vocabulary to the configured store.
    pub fn save(&self) -> Result<()> {
        let path = self.config.vocab_path.as_deref().ok_or_else(|| {
            TokenizerError::InvalidConfig("no vocabulary path is configured".to_string())
        })?;
        self.save_to(path)
    }

    /// Write the vocabulary to `path`, replacing any existing file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        VocabSaver::new(&self.vocab).save(path)
    }

    /// Segment `text` into tokens, lazily.
    pub fn tokenize<'a>(&'a self, text: &'a str) -> Tokens<'a> {
        Tokens::new(&self.trie, text)
    }

    /// Tokenize `text` and look up each token's id.
    ///
    /// Single-character fallbacks that are not in the vocabulary get `None`.
    pub fn encode(&self, text: &str) -> Encoding {
        let mut encoding = Encoding::default();
        for token in self.tokenize(text) {
            encoding.ids.push(self.vocab.get_id(token));
            encoding.tokens.push(token.to_string());
        }
        encoding
    }

    /// Concatenate the tokens for `ids`.
    pub fn decode(&self, ids: &[u32]) -> Result<String> {
        let mut text = String::new();
        for &id in ids {
            let token = self
                .vocab
                .get_token(id)
                .ok_or(TokenizerError::UnknownTokenId(id))?;
            text.push_str(token);
        }
        Ok(text)
    }

    /// Get the vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Get a reference to the vocabulary.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Get a reference to the prefix trie.
    pub fn trie(&self) -> &PrefixTrie {
        &self.trie
    }

    /// True once a vocabulary has been loaded or trained.
    pub fn is_trained(&self) -> bool {
        self.trained
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Result of encoding text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoding {
    /// Token strings, in order
    pub tokens: Vec<String>,
    /// Vocabulary id of each token, if it has one
    pub ids: Vec<Option<u32>>,
}

impl Encoding {
    /// Get the number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the encoding is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
