/// Analysis modules: post-scan computations over the aggregated corpus.
pub mod cadence;
pub mod frequency;
pub mod reference;
pub mod summary;

pub use cadence::{journaling_cadence, Cadence};
pub use frequency::{relative_score, WordRanking, WordStat};
pub use reference::ReferenceTable;
pub use summary::StatsReport;
