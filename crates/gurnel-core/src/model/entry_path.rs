/// Journal entry naming convention.
///
/// Entries are named after the day they were written, e.g.
/// `2024-03-07-Journal-Entry-for-Mar-7.md`. The name is the contract between
/// whatever creates entries and the statistics pipeline that discovers them.
use chrono::NaiveDate;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Base-name pattern every journal entry must match.
pub const ENTRY_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}-Journal-Entry-for-\D{3}-\d{1,2}\.md$";

/// `chrono` format that produces a name matching [`ENTRY_PATTERN`].
pub const ENTRY_FORMAT: &str = "%Y-%m-%d-Journal-Entry-for-%b-%-d.md";

static ENTRY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ENTRY_PATTERN).expect("ENTRY_PATTERN is a valid regex"));

/// `true` if `name` (a base file name, not a path) looks like a journal entry.
pub fn is_entry_name(name: &str) -> bool {
    ENTRY_NAME.is_match(name)
}

/// File name of the entry for `date`.
pub fn entry_file_name(date: NaiveDate) -> String {
    date.format(ENTRY_FORMAT).to_string()
}

/// Calendar date encoded in the leading `YYYY-MM-DD` of an entry name.
pub fn date_from_name(name: &str) -> Option<NaiveDate> {
    let prefix = name.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// Path of a file whose base name matched [`ENTRY_PATTERN`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryPath(PathBuf);

impl EntryPath {
    /// Wrap `path` if its base name is an entry name.
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        is_entry_name(name).then_some(Self(path))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Base file name. Always valid UTF-8 because construction checked it.
    pub fn file_name(&self) -> &str {
        self.0
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        date_from_name(self.file_name())
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for EntryPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
