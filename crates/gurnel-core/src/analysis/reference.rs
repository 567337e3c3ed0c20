/// Reference word frequencies from a large general-purpose corpus.
///
/// Each record is `word,frequency` where frequency is the word's share of
/// all word occurrences in the reference corpus (e.g. `the,0.0506`). The
/// table is loaded once and never mutated.
use crate::error::StatsError;
use compact_str::CompactString;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Bundled frequency list: the ~10,000 most common English words in rank
/// order, each with a Zipf-distributed share of running text. Configure
/// `ReferencePath` to use measured frequencies instead.
const BUNDLED_CSV: &str = include_str!("../../assets/reference_frequencies.csv");

#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    frequencies: HashMap<CompactString, f64>,
}

impl ReferenceTable {
    /// The table shipped with the binary.
    pub fn bundled() -> Result<Self, StatsError> {
        Self::from_reader(BUNDLED_CSV.as_bytes())
    }

    pub fn from_path(path: &Path) -> Result<Self, StatsError> {
        let file = File::open(path).map_err(|source| StatsError::ReferenceIo {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file)?;
        debug!("Loaded {} reference frequencies from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parse headerless `word,frequency` records.
    ///
    /// Words are lowercased; records differing only in case are summed.
    /// A record without exactly two fields, with an empty word or frequency,
    /// or with a frequency that is not a finite non-negative number is
    /// rejected with its line number.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StatsError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut frequencies = HashMap::new();
        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let malformed = |reason: String| StatsError::MalformedReference { line, reason };

            if record.len() != 2 {
                return Err(malformed(format!("expected 2 fields, found {}", record.len())));
            }
            let word = record[0].trim();
            let frequency = record[1].trim();
            if word.is_empty() {
                return Err(malformed("missing word".into()));
            }
            if frequency.is_empty() {
                return Err(malformed("missing frequency".into()));
            }
            let frequency: f64 = frequency
                .parse()
                .map_err(|e| malformed(format!("invalid frequency {frequency:?}: {e}")))?;
            if !frequency.is_finite() || frequency < 0.0 {
                return Err(malformed(format!("frequency {frequency} out of range")));
            }

            *frequencies
                .entry(CompactString::new(word.to_lowercase()))
                .or_insert(0.0) += frequency;
        }

        Ok(Self { frequencies })
    }

    /// Reference frequency of `word`, `0.0` if the corpus never saw it.
    pub fn frequency(&self, word: &str) -> f64 {
        self.frequencies.get(word).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for ReferenceTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let frequencies = iter
            .into_iter()
            .map(|(w, f)| (CompactString::new(w.as_ref().to_lowercase()), f))
            .collect();
        Self { frequencies }
    }
}
