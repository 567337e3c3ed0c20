/// Unusual-word ranking: journal word frequencies against a reference corpus.
///
/// For a word seen `c` times among `total` journal words, the local frequency
/// is `f = c / total`; `r` is its reference frequency (zero if unknown).
///
/// - `f > r`: score `f / r`, or `0` when `r == 0` (no baseline to compare).
/// - `f <= r`: score `-(r / f)`. `f` is never zero because every ranked word
///   occurred at least once.
///
/// Positive scores are over-represented words, negative ones
/// under-represented. One descending sort puts both tails at the two ends of
/// the same list.
use super::ReferenceTable;
use crate::model::AggregateStats;
use compact_str::CompactString;
use rayon::prelude::*;

/// One word's occurrence count and signed relative-frequency score.
#[derive(Debug, Clone, PartialEq)]
pub struct WordStat {
    pub word: CompactString,
    pub occurrences: u64,
    pub score: f64,
}

/// Signed ratio of journal frequency to reference frequency.
pub fn relative_score(frequency: f64, reference: f64) -> f64 {
    if frequency > reference {
        if reference > 0.0 {
            frequency / reference
        } else {
            0.0
        }
    } else {
        -(reference / frequency)
    }
}

/// Every word's [`WordStat`], sorted once by score descending.
#[derive(Debug, Clone, Default)]
pub struct WordRanking {
    stats: Vec<WordStat>,
}

impl WordRanking {
    /// Score every word in `stats` against `reference`.
    ///
    /// Returns `None` when there is nothing to compare: an empty reference
    /// table or a corpus without words.
    pub fn rank(stats: &AggregateStats, reference: &ReferenceTable) -> Option<Self> {
        if reference.is_empty() || stats.total_words == 0 {
            return None;
        }

        let total = stats.total_words as f64;
        let mut ranked: Vec<WordStat> = stats
            .words
            .par_iter()
            .map(|(word, &occurrences)| WordStat {
                word: word.clone(),
                occurrences,
                score: relative_score(occurrences as f64 / total, reference.frequency(word)),
            })
            .collect();

        // Stable sort; equal scores fall back to the word so output does not
        // depend on hash iteration order.
        ranked.par_sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.word.cmp(&b.word)));

        Some(Self { stats: ranked })
    }

    /// All words, highest score first.
    pub fn all(&self) -> &[WordStat] {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Up to `n` most over-represented words, highest score first.
    pub fn unusually_frequent(&self, n: usize) -> &[WordStat] {
        &self.stats[..n.min(self.stats.len())]
    }

    /// Up to `n` most under-represented words, most negative score first.
    pub fn unusually_infrequent(&self, n: usize) -> impl Iterator<Item = &WordStat> + '_ {
        let start = self.stats.len().saturating_sub(n);
        self.stats[start..].iter().rev()
    }
}
