/// Entry collaborator: loading one journal file into a body and a date.
///
/// The pipeline only needs three things from an entry: load it, ask for its
/// date, and iterate its words. [`EntryFactory`] builds an entry for each
/// discovered path so tests (or other storage formats) can substitute their
/// own implementation.
pub mod journal;

pub use journal::{EntryMetadata, JournalEntry};

use crate::error::EntryError;
use crate::model::EntryPath;
use chrono::NaiveDate;

pub trait Entry {
    /// Read the entry from storage.
    ///
    /// Returns `true` when the stored content changed since the previous
    /// successful load (always `true` on the first load).
    fn load(&mut self) -> Result<bool, EntryError>;

    /// Calendar day the entry was written for.
    fn date(&self) -> Result<NaiveDate, EntryError>;

    /// Free text following the metadata header.
    fn body(&self) -> &str;

    /// Words of the body: maximal runs of non-whitespace characters.
    fn words(&self) -> std::str::SplitWhitespace<'_> {
        self.body().split_whitespace()
    }
}

/// Builds an [`Entry`] for a discovered path. Shared by all scanner workers.
pub trait EntryFactory: Send + Sync {
    type Entry: Entry;

    fn open(&self, path: &EntryPath) -> Self::Entry;
}

/// Default factory: Markdown files with YAML frontmatter on the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct JournalFiles;

impl EntryFactory for JournalFiles {
    type Entry = JournalEntry;

    fn open(&self, path: &EntryPath) -> JournalEntry {
        JournalEntry::new(path.as_path())
    }
}
