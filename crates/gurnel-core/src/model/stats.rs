/// Per-entry scan results and the corpus-wide aggregate they fold into.
use super::EntryPath;
use crate::error::StatsError;
use chrono::NaiveDate;
use compact_str::CompactString;
use std::collections::HashMap;

/// Lowercased word -> number of occurrences.
pub type WordCounts = HashMap<CompactString, u64>;

/// Words and date extracted from one successfully loaded entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryScan {
    pub words: WordCounts,
    pub date: NaiveDate,
}

impl EntryScan {
    /// Total words in the entry (sum of all counts).
    pub fn word_count(&self) -> u64 {
        self.words.values().sum()
    }
}

/// Outcome of scanning one entry. Produced by exactly one worker and
/// consumed exactly once by the aggregator.
#[derive(Debug)]
pub struct ScanResult {
    pub path: EntryPath,
    pub outcome: Result<EntryScan, StatsError>,
}

/// Corpus-wide totals. Written only by the aggregator.
///
/// The default value is the empty corpus: no entries, no words, and no
/// earliest date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateStats {
    pub entries: u64,
    pub total_words: u64,
    pub words: WordCounts,
    /// Earliest entry date seen. `None` exactly when `entries == 0`.
    pub earliest: Option<NaiveDate>,
}

impl AggregateStats {
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Fold one entry's word counts into the totals.
    pub fn absorb_words(&mut self, words: WordCounts) {
        self.entries += 1;
        for (word, count) in words {
            self.total_words += count;
            *self.words.entry(word).or_insert(0) += count;
        }
    }

    /// Mean words per entry, or `0.0` for an empty corpus.
    pub fn average_words(&self) -> f64 {
        if self.entries == 0 {
            0.0
        } else {
            self.total_words as f64 / self.entries as f64
        }
    }
}
