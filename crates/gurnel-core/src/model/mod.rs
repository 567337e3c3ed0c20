/// Data model for the statistics pipeline.
///
/// Re-exports the entry naming convention and the scan/aggregate types.
pub mod entry_path;
pub mod stats;

pub use entry_path::{date_from_name, entry_file_name, is_entry_name, EntryPath};
pub use stats::{AggregateStats, EntryScan, ScanResult, WordCounts};
