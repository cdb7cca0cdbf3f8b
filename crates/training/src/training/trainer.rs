//! BPE trainer implementation.
//!
//! Learns merged tokens by repeatedly popping the most frequent pair from a
//! lazily updated priority queue, appending it to the vocabulary and trie,
//! and fusing its occurrences in the corpus.

use super::counter::PairCounter;
use compact_str::CompactString;
use log::{debug, info, log, Level};
use pairtok_core::{MergeCandidate, PairPriorityQueue, PrefixTrie, Result, Vocabulary};

/// Character stripped from the corpus and from merged token text by default.
pub const DEFAULT_SENTINEL: char = '_';

/// Configuration for BPE training.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Upper bound on merge iterations per run
    pub max_merges: usize,
    /// Reserved character removed from the corpus before training
    pub sentinel: char,
    /// Log every merge at `info` instead of `debug`
    pub verbose: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            max_merges: 1_000,
            sentinel: DEFAULT_SENTINEL,
            verbose: false,
        }
    }
}

/// Why the merge loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// All `max_merges` iterations ran
    Budget,
    /// No candidates were left in the queue
    QueueExhausted,
    /// The best remaining candidate occurred only once
    SingletonFrequency,
}

/// One merge performed during training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRecord {
    /// Text of the merged token
    pub token: CompactString,
    /// Vocabulary id of the merged token
    pub id: u32,
    /// Frequency carried by the popped queue entry
    pub frequency: u64,
    /// False if the token was already in the vocabulary before this merge
    pub new: bool,
}

/// Result of a training run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// Merges in the order they were performed
    pub merges: Vec<MergeRecord>,
    /// The corpus token sequence after the last merge
    pub tokens: Vec<CompactString>,
    /// Why the loop ended
    pub stop: StopReason,
}

impl TrainingOutcome {
    /// Number of ids newly assigned during the run.
    pub fn new_tokens(&self) -> usize {
        self.merges.iter().filter(|m| m.new).count()
    }
}

/// BPE trainer.
///
/// Trains over a single in-memory corpus, extending a caller-owned
/// vocabulary and trie in place.
#[derive(Debug, Clone, Default)]
pub struct BpeTrainer {
    /// Configuration
    config: TrainingConfig,
}

impl BpeTrainer {
    /// Create a new BPE trainer with the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Create a new BPE trainer that performs at most `max_merges` merges.
    pub fn with_max_merges(max_merges: usize) -> Self {
        Self::new(TrainingConfig {
            max_merges,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train on `text`.
    ///
    /// Every merged token is appended to `vocab` and inserted into `trie` as
    /// soon as it is learned.
    pub fn train(
        &self,
        text: &str,
        vocab: &mut Vocabulary,
        trie: &mut PrefixTrie,
    ) -> Result<TrainingOutcome> {
        let mut counter = PairCounter::from_text(text, self.config.sentinel);
        let mut queue = Self::build_queue(&counter);

        debug!(
            "Training on {} tokens, {} distinct pairs, up to {} merges",
            counter.tokens().len(),
            counter.distinct_pairs(),
            self.config.max_merges
        );

        let level = if self.config.verbose {
            Level::Info
        } else {
            Level::Debug
        };

        let mut merges = Vec::new();
        let mut stop = StopReason::Budget;

        for step in 0..self.config.max_merges {
            if queue.is_empty() {
                stop = StopReason::QueueExhausted;
                break;
            }
            let candidate = queue.extract()?;

            if candidate.count <= 1 {
                stop = StopReason::SingletonFrequency;
                break;
            }

            let token = self.strip_sentinel(&candidate.pair);
            if token.is_empty() {
                continue;
            }

            let new = !vocab.contains(&token);
            let id = vocab.add_token(&token)?;
            trie.insert(&token, id);

            let changes = counter.merge_pair(&token);
            for (pair, count) in changes {
                queue.push(MergeCandidate::new(pair, count));
            }

            log!(
                level,
                "Merge {}: {:?} -> id {} (frequency {}, {} tokens left, queue {})",
                step + 1,
                token.as_str(),
                id,
                candidate.count,
                counter.tokens().len(),
                queue.len()
            );

            merges.push(MergeRecord {
                token,
                id,
                frequency: candidate.count,
                new,
            });
        }

        info!(
            "Training finished after {} merges ({:?}), vocabulary size {}",
            merges.len(),
            stop,
            vocab.len()
        );

        Ok(TrainingOutcome {
            merges,
            tokens: counter.into_tokens(),
            stop,
        })
    }

    /// Seed the queue with one entry per distinct pair.
    fn build_queue(counter: &PairCounter) -> PairPriorityQueue {
        let mut queue = PairPriorityQueue::with_capacity(counter.distinct_pairs());

        for (pair, count) in counter.pairs() {
            queue.push(MergeCandidate::new(pair.clone(), count));
        }

        queue
    }

    fn strip_sentinel(&self, pair: &str) -> CompactString {
        pair.chars().filter(|&c| c != self.config.sentinel).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn train(text: &str, max_merges: usize) -> (Vocabulary, PrefixTrie, TrainingOutcome) {
        let mut vocab = Vocabulary::new();
        let mut trie = PrefixTrie::new();
        let outcome = BpeTrainer::with_max_merges(max_merges)
            .train(text, &mut vocab, &mut trie)
            .unwrap();
        (vocab, trie, outcome)
    }

    fn tokens(outcome: &TrainingOutcome) -> Vec<&str> {
        outcome.tokens.iter().map(|t| t.as_str()).collect()
    }

    #[test]
    fn test_single_merge() {
        let (vocab, trie, outcome) = train("aaa", 1);

        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.get_id("aa"), Some(1));
        assert_eq!(trie.get("aa"), Some(1));
        assert_eq!(tokens(&outcome), vec!["aa", "a"]);
        assert_eq!(outcome.stop, StopReason::Budget);
        assert_eq!(outcome.merges[0].frequency, 2);
    }

    #[test]
    fn test_singleton_frequency_stops() {
        let (vocab, trie, outcome) = train("abcd", 5);

        assert!(vocab.is_empty());
        assert!(trie.is_empty());
        assert!(outcome.merges.is_empty());
        assert_eq!(outcome.stop, StopReason::SingletonFrequency);
        assert_eq!(tokens(&outcome), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_queue_exhausted() {
        let (vocab, _, outcome) = train("a", 3);
        assert!(vocab.is_empty());
        assert_eq!(outcome.stop, StopReason::QueueExhausted);

        let (_, _, outcome) = train("", 3);
        assert_eq!(outcome.stop, StopReason::QueueExhausted);
        assert!(outcome.tokens.is_empty());
    }

    #[test]
    fn test_zero_budget() {
        let (vocab, _, outcome) = train("aaaa", 0);
        assert!(vocab.is_empty());
        assert_eq!(outcome.stop, StopReason::Budget);
    }

    #[test]
    fn test_stops_once_only_singletons_remain() {
        let (vocab, _, outcome) = train("aaaa", 10);

        // "aa" merges, leaving "aaa" and "aaaa" with one increment each
        assert_eq!(vocab.len(), 1);
        assert_eq!(tokens(&outcome), vec!["aa", "aa"]);
        assert_eq!(outcome.stop, StopReason::SingletonFrequency);
    }

    #[test]
    fn test_stale_counts_drive_later_merges() {
        let (vocab, trie, outcome) = train("aaaaaa", 10);

        // "aaa" is learned from queued counts although the sequence is
        // already ["aa", "aa", "aa"] and never contains it
        let merges: Vec<_> = outcome
            .merges
            .iter()
            .map(|m| (m.token.as_str(), m.id, m.frequency))
            .collect();
        assert_eq!(merges, vec![("aa", 1, 5), ("aaa", 2, 2), ("aaaa", 3, 2)]);
        assert!(outcome.merges.iter().all(|m| m.new));

        assert_eq!(tokens(&outcome), vec!["aaaa", "aa"]);
        assert_eq!(outcome.stop, StopReason::SingletonFrequency);
        assert_eq!(vocab.len(), 3);
        assert_eq!(trie.get("aaa"), Some(2));
    }

    #[test]
    fn test_sentinel_is_stripped() {
        let (vocab, _, outcome) = train("a_a_a", 1);

        assert_eq!(vocab.get_id("aa"), Some(1));
        assert_eq!(tokens(&outcome), vec!["aa", "a"]);
    }

    #[test]
    fn test_most_frequent_pair_first() {
        let (vocab, _, outcome) = train("xyxyxyab", 1);

        assert_eq!(outcome.merges[0].token, "xy");
        assert_eq!(outcome.merges[0].frequency, 3);
        assert_eq!(vocab.get_id("xy"), Some(1));
    }

    #[test]
    fn test_growth_bound_and_sequential_ids() {
        let mut vocab = Vocabulary::new();
        vocab.add_token("zz").unwrap();
        vocab.add_token("qq").unwrap();
        let mut trie: PrefixTrie = vocab.iter_by_id().collect();
        let before = vocab.len() as u32;

        let k = 4;
        let outcome = BpeTrainer::with_max_merges(k)
            .train(
                "the cat sat on the mat, the hat sat on the cat",
                &mut vocab,
                &mut trie,
            )
            .unwrap();

        assert!(outcome.new_tokens() <= k);
        assert!(outcome.merges.len() <= k);
        for (n, merge) in outcome.merges.iter().filter(|m| m.new).enumerate() {
            assert_eq!(merge.id, before + n as u32 + 1);
            assert_eq!(trie.get(&merge.token), Some(merge.id));
        }
        assert_eq!(vocab.len(), before as usize + outcome.new_tokens());
    }

    #[test]
    fn test_existing_token_keeps_id() {
        let mut vocab = Vocabulary::new();
        vocab.add_token("aa").unwrap();
        let mut trie: PrefixTrie = vocab.iter_by_id().collect();

        let outcome = BpeTrainer::with_max_merges(1)
            .train("aaa", &mut vocab, &mut trie)
            .unwrap();

        assert_eq!(vocab.len(), 1);
        assert_eq!(outcome.merges[0].id, 1);
        assert!(!outcome.merges[0].new);
        assert_eq!(outcome.new_tokens(), 0);
    }

    #[test]
    fn test_custom_sentinel() {
        let trainer = BpeTrainer::new(TrainingConfig {
            max_merges: 1,
            sentinel: '#',
            verbose: true,
        });
        let mut vocab = Vocabulary::new();
        let mut trie = PrefixTrie::new();

        let outcome = trainer.train("b#b#b", &mut vocab, &mut trie).unwrap();
        assert_eq!(vocab.get_id("bb"), Some(1));
        assert_eq!(outcome.tokens.len(), 2);
    }
}
