/// Gurnel Core: journal corpus statistics.
///
/// This crate contains the statistics pipeline and analysis with no
/// terminal or configuration dependencies, so any front end can drive it.
///
/// # Modules
///
/// - [`model`]: entry naming convention, per-entry scans and corpus totals.
/// - [`entry`]: loading one journal file (frontmatter plus body).
/// - [`scanner`]: the concurrent locate/scan/aggregate pipeline.
/// - [`analysis`]: cadence, reference frequencies and unusual-word ranking.
/// - [`clock`]: injectable source of today's date.
/// - [`error`]: pipeline error types.
pub mod analysis;
pub mod clock;
pub mod entry;
pub mod error;
pub mod model;
pub mod scanner;
