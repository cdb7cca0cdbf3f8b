//! Pair counting for BPE training.
//!
//! The corpus is held as a flat sequence of token strings, starting at one
//! token per `char`. Pairs are keyed by the concatenated text of the two
//! tokens, so a learned token and an unmerged pair that spell the same text
//! share one counter.

use ahash::AHashMap;
use compact_str::CompactString;
use pairtok_core::PairId;

/// Counter for adjacent-pair frequencies over a single token sequence.
#[derive(Debug, Clone, Default)]
pub struct PairCounter {
    /// Current token sequence
    tokens: Vec<CompactString>,
    /// Pair -> frequency count
    pair_counts: AHashMap<PairId, u64>,
    /// Distinct pairs in order of first occurrence
    first_seen: Vec<PairId>,
}

impl PairCounter {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a counter from raw corpus text.
    ///
    /// Every `sentinel` character is removed, then the remainder is split
    /// into one token per `char` and the initial pair counts are taken.
    pub fn from_text(text: &str, sentinel: char) -> Self {
        let tokens = text
            .chars()
            .filter(|&c| c != sentinel)
            .map(|c| CompactString::new(c.encode_utf8(&mut [0; 4])))
            .collect();

        let mut counter = Self {
            tokens,
            ..Self::default()
        };
        counter.count_pairs();
        counter
    }

    /// Recount every adjacent pair of the current sequence from scratch.
    pub fn count_pairs(&mut self) {
        self.pair_counts.clear();
        self.first_seen.clear();

        for window in self.tokens.windows(2) {
            let pair = concat(&window[0], &window[1]);
            match self.pair_counts.get_mut(&pair) {
                Some(count) => *count += 1,
                None => {
                    self.first_seen.push(pair.clone());
                    self.pair_counts.insert(pair, 1);
                }
            }
        }
    }

    /// Distinct pairs with their counts, in order of first occurrence.
    pub fn pairs(&self) -> impl Iterator<Item = (&PairId, u64)> + '_ {
        self.first_seen
            .iter()
            .map(move |pair| (pair, self.pair_counts.get(pair).copied().unwrap_or(0)))
    }

    /// Number of distinct pairs seen so far.
    pub fn distinct_pairs(&self) -> usize {
        self.pair_counts.len()
    }

    /// Get the current count for a pair.
    pub fn get_count(&self, pair: &str) -> Option<u64> {
        self.pair_counts.get(pair).copied()
    }

    /// Get a reference to the current token sequence.
    pub fn tokens(&self) -> &[CompactString] {
        &self.tokens
    }

    /// Consume the counter, returning the token sequence.
    pub fn into_tokens(self) -> Vec<CompactString> {
        self.tokens
    }

    /// Fuse every non-overlapping adjacent pair spelling `merged`, scanning
    /// left to right, into a freshly built sequence.
    ///
    /// For each fusion, the pair formed with the left neighbour (already
    /// processed) and the pair formed with the right neighbour (not yet
    /// processed) each have their count incremented. Counts of the pairs the
    /// fusion destroyed are left untouched.
    ///
    /// Returns the incremented pairs with their new counts, in the order the
    /// increments happened.
    pub fn merge_pair(&mut self, merged: &str) -> Vec<(PairId, u64)> {
        let mut changes = Vec::new();
        if self.tokens.len() < 2 || merged.is_empty() {
            return changes;
        }

        let mut out: Vec<CompactString> = Vec::with_capacity(self.tokens.len());
        let mut i = 0;

        while i < self.tokens.len() {
            let spells_merged = i + 1 < self.tokens.len()
                && spells(&self.tokens[i], &self.tokens[i + 1], merged);

            if !spells_merged {
                out.push(self.tokens[i].clone());
                i += 1;
                continue;
            }

            let token = CompactString::new(merged);
            if let Some(left) = out.last() {
                let pair = concat(left, &token);
                changes.push(self.increment(pair));
            }
            if let Some(right) = self.tokens.get(i + 2) {
                let pair = concat(&token, right);
                changes.push(self.increment(pair));
            }

            out.push(token);
            i += 2;
        }

        self.tokens = out;
        changes
    }

    fn increment(&mut self, pair: PairId) -> (PairId, u64) {
        let count = match self.pair_counts.get_mut(&pair) {
            Some(count) => {
                *count += 1;
                *count
            }
            None => {
                self.first_seen.push(pair.clone());
                self.pair_counts.insert(pair.clone(), 1);
                1
            }
        };
        (pair, count)
    }
}

#[inline]
fn concat(left: &str, right: &str) -> PairId {
    let mut pair = CompactString::with_capacity(left.len() + right.len());
    pair.push_str(left);
    pair.push_str(right);
    pair
}

/// True if `left` followed by `right` is exactly `merged`.
#[inline]
fn spells(left: &str, right: &str, merged: &str) -> bool {
    left.len() + right.len() == merged.len()
        && merged.starts_with(left)
        && &merged[left.len()..] == right
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(counter: &PairCounter) -> Vec<&str> {
        counter.tokens().iter().map(|t| t.as_str()).collect()
    }

    #[test]
    fn test_from_text_strips_sentinel() {
        let counter = PairCounter::from_text("a_b__c", '_');
        assert_eq!(tokens(&counter), vec!["a", "b", "c"]);
        assert_eq!(counter.get_count("ab"), Some(1));
        assert_eq!(counter.get_count("bc"), Some(1));
        assert_eq!(counter.distinct_pairs(), 2);
    }

    #[test]
    fn test_count_pairs_overlapping() {
        let counter = PairCounter::from_text("aaa", '_');
        assert_eq!(counter.get_count("aa"), Some(2));
        assert_eq!(counter.distinct_pairs(), 1);
    }

    #[test]
    fn test_pairs_in_first_seen_order() {
        let counter = PairCounter::from_text("cabca", '_');
        let pairs: Vec<_> = counter.pairs().map(|(p, c)| (p.as_str(), c)).collect();
        assert_eq!(pairs, vec![("ca", 2), ("ab", 1), ("bc", 1)]);
    }

    #[test]
    fn test_short_inputs_have_no_pairs() {
        assert_eq!(PairCounter::from_text("", '_').distinct_pairs(), 0);
        assert_eq!(PairCounter::from_text("a", '_').distinct_pairs(), 0);
        assert_eq!(PairCounter::from_text("_a_", '_').distinct_pairs(), 0);
    }

    #[test]
    fn test_merge_is_left_to_right_non_overlapping() {
        let mut counter = PairCounter::from_text("aaa", '_');
        let changes = counter.merge_pair("aa");

        assert_eq!(tokens(&counter), vec!["aa", "a"]);
        assert_eq!(changes, vec![(PairId::from("aaa"), 1)]);
    }

    #[test]
    fn test_merge_neighbour_updates() {
        let mut counter = PairCounter::from_text("abab ab", '_');
        assert_eq!(counter.get_count("ab"), Some(3));

        let changes = counter.merge_pair("ab");
        assert_eq!(tokens(&counter), vec!["ab", "ab", " ", "ab"]);

        // Left neighbours are already merged, right neighbours are not yet
        let changes: Vec<_> = changes.iter().map(|(p, c)| (p.as_str(), *c)).collect();
        assert_eq!(
            changes,
            vec![("aba", 1), ("abab", 1), ("ab ", 1), (" ab", 1)]
        );

        // Destroyed pairs keep their old counts
        assert_eq!(counter.get_count("ba"), Some(1));
        assert_eq!(counter.get_count("ab"), Some(3));
    }

    #[test]
    fn test_merge_increments_existing_counts() {
        let mut counter = PairCounter::from_text("aaaa", '_');
        let changes = counter.merge_pair("aa");

        assert_eq!(tokens(&counter), vec!["aa", "aa"]);
        let changes: Vec<_> = changes.iter().map(|(p, c)| (p.as_str(), *c)).collect();
        assert_eq!(changes, vec![("aaa", 1), ("aaaa", 1)]);

        let changes = counter.merge_pair("aaaa");
        assert_eq!(tokens(&counter), vec!["aaaa"]);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_merge_multibyte() {
        let mut counter = PairCounter::from_text("日本日本", '_');
        counter.merge_pair("日本");
        assert_eq!(tokens(&counter), vec!["日本", "日本"]);
        assert_eq!(counter.get_count("日本日本"), Some(1));
    }

    #[test]
    fn test_merge_without_occurrence_is_noop() {
        let mut counter = PairCounter::from_text("abc", '_');
        let changes = counter.merge_pair("xy");
        assert!(changes.is_empty());
        assert_eq!(tokens(&counter), vec!["a", "b", "c"]);
    }
}
