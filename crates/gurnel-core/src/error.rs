/// Error taxonomy for the statistics pipeline.
///
/// Every failure is fatal to the run that produced it: the pipeline reports
/// either a complete result or exactly one of these errors, never both.
use std::path::PathBuf;
use thiserror::Error;

/// A single journal entry could not be turned into words and a date.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("reading entry: {0}")]
    Io(#[from] std::io::Error),

    #[error("entry is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("decoding frontmatter: {0}")]
    Frontmatter(#[from] serde_yaml::Error),

    #[error("frontmatter block is missing its closing `---`")]
    UnterminatedFrontmatter,

    #[error("entry name {name:?} does not start with a YYYY-MM-DD date")]
    Undated { name: String },
}

/// Terminal error of a statistics run.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Directory traversal failed (permission denied, I/O error, missing root).
    #[error("walking journal directory: {0}")]
    Walk(#[from] jwalk::Error),

    /// The walk stopped because the pipeline was cancelled.
    #[error("walk canceled")]
    Canceled,

    /// One entry failed to load. The first such failure aborts the run.
    #[error("loading entry {}: {source}", path.display())]
    EntryLoad {
        path: PathBuf,
        #[source]
        source: EntryError,
    },

    #[error("reading reference frequencies: {0}")]
    ReferenceCsv(#[from] csv::Error),

    #[error("reading reference frequencies from {}: {source}", path.display())]
    ReferenceIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A reference record is missing its word or frequency, or the
    /// frequency is not a usable number.
    #[error("invalid reference frequency record on line {line}: {reason}")]
    MalformedReference { line: u64, reason: String },

    #[error("spawning pipeline thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("{0} thread panicked")]
    WorkerPanicked(&'static str),
}

impl StatsError {
    /// `true` for the cancellation marker, which never explains a failure
    /// on its own when another error is available.
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }
}
