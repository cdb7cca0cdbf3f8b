//! Save functionality for trained vocabularies.

use super::format::SerializedVocab;
use log::info;
use pairtok_core::{Result, TokenizerError, Vocabulary};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Vocabulary saver - writes the flat vocabulary store.
pub struct VocabSaver<'a> {
    /// Vocabulary reference
    vocab: &'a Vocabulary,
}

impl<'a> VocabSaver<'a> {
    /// Create a new vocabulary saver.
    pub fn new(vocab: &'a Vocabulary) -> Self {
        Self { vocab }
    }

    /// Write the complete vocabulary to `path`, replacing any existing file.
    ///
    /// Missing parent directories are created.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                TokenizerError::Save(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let file = File::create(path).map_err(|e| {
            TokenizerError::Save(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.serialize())
            .map_err(|e| TokenizerError::Save(format!("Failed to serialize vocabulary: {}", e)))?;
        writer.flush().map_err(|err| TokenizerError::Io {
            path: path.to_path_buf(),
            err,
        })?;

        info!(
            "Saved {} vocabulary entries to {}",
            self.vocab.len(),
            path.display()
        );
        Ok(())
    }

    /// Serialize the vocabulary to its flat record.
    fn serialize(&self) -> SerializedVocab {
        // Already in id order
        let entries = self
            .vocab
            .iter_by_id()
            .map(|(token, id)| (token.to_string(), id))
            .collect();
        SerializedVocab { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::VocabLoader;

    #[test]
    fn test_serialize() {
        let mut vocab = Vocabulary::new();
        vocab.add_token("hello").unwrap();
        vocab.add_token("world").unwrap();

        let serialized = VocabSaver::new(&vocab).serialize();
        assert_eq!(
            serialized.entries,
            vec![("hello".to_string(), 1), ("world".to_string(), 2)]
        );
    }

    #[test]
    fn test_save_overwrites_and_reloads() {
        let dir = std::env::temp_dir().join("pairtok_test_save");
        let path = dir.join("nested").join("vocab.json");
        std::fs::remove_dir_all(&dir).ok();

        let mut vocab = Vocabulary::new();
        vocab.add_token("a").unwrap();
        vocab.add_token("b").unwrap();
        VocabSaver::new(&vocab).save(&path).unwrap();

        let mut smaller = Vocabulary::new();
        smaller.add_token("ü").unwrap();
        VocabSaver::new(&smaller).save(&path).unwrap();

        let loaded = VocabLoader::load(&path).unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get_id("ü"), Some(1));
        assert_eq!(loaded.get_id("a"), None);

        std::fs::remove_dir_all(dir).ok();
    }
}
