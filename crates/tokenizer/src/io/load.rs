//! Load functionality for stored vocabularies.

use super::format::SerializedVocab;
use log::debug;
use pairtok_core::{Result, TokenizerError, Vocabulary};
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

/// Vocabulary loader - reads a flat vocabulary store from disk.
pub struct VocabLoader;

impl VocabLoader {
    /// Load the vocabulary stored at `path`.
    ///
    /// Returns `Ok(None)` if nothing exists at `path`. Any other I/O failure,
    /// malformed JSON, a repeated token, a zero id, or two tokens sharing an
    /// id is an error.
    pub fn load(path: &Path) -> Result<Option<Vocabulary>> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No vocabulary at {}", path.display());
                return Ok(None);
            }
            Err(err) => {
                return Err(TokenizerError::Io {
                    path: path.to_path_buf(),
                    err,
                })
            }
        };

        let reader = BufReader::new(file);
        let serialized: SerializedVocab = serde_json::from_reader(reader).map_err(|e| {
            TokenizerError::Load(format!(
                "Failed to deserialize vocabulary {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::deserialize(serialized).map(Some)
    }

    /// Build a vocabulary from a deserialized record.
    pub fn deserialize(data: SerializedVocab) -> Result<Vocabulary> {
        let mut vocab = Vocabulary::with_capacity(data.len());

        for (token, id) in data.entries {
            if token.is_empty() {
                return Err(TokenizerError::Load(format!(
                    "Empty token string for id {}",
                    id
                )));
            }
            vocab.add_token_with_id(&token, id)?;
        }

        Ok(vocab)
    }
}
