/// Scanner module: orchestrates the corpus statistics pipeline.
///
/// ```text
/// locator thread ──paths──▶ N scanner workers ──results──▶ aggregator
///        │                                                     │
///        └──────────── terminal outcome (one slot) ────────────┘
/// ```
///
/// - [`locator`]: walks the journal directory and streams entry paths.
/// - [`pool`]: fan-out of entry loading and word counting.
/// - [`aggregate`]: fan-in fold into [`AggregateStats`].
/// - [`cancel`]: the shared cancellation signal every stage observes.
///
/// The first error anywhere cancels every stage. All threads are joined
/// before [`collect_stats`] returns.
pub mod aggregate;
pub mod cancel;
pub mod locator;
pub mod pool;

pub use aggregate::aggregate;
pub use cancel::Cancellation;
pub use locator::{locate, EntryStream};
pub use pool::{ScannerPool, DEFAULT_SCANNERS};

use crate::entry::EntryFactory;
use crate::error::StatsError;
use crate::model::AggregateStats;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{debug, info};

/// Run the whole pipeline over `root` on the calling thread.
///
/// Returns complete totals or exactly one error. A walk failure discovered
/// after the scan finished still replaces the totals.
pub fn collect_stats<F>(
    root: PathBuf,
    factory: Arc<F>,
    scanners: usize,
    today: NaiveDate,
    cancel: &Cancellation,
) -> Result<AggregateStats, StatsError>
where
    F: EntryFactory + 'static,
{
    let start = Instant::now();
    info!("Collecting journal statistics under {}", root.display());

    let stream = locate(root, cancel)?;
    let pool = match ScannerPool::spawn(&stream.paths, factory, scanners, cancel) {
        Ok(pool) => pool,
        Err(err) => {
            cancel.cancel();
            let _ = stream.finish();
            return Err(err);
        }
    };
    debug!("Spawned {} scanner workers", pool.len());

    let aggregated = aggregate(&pool.results, cancel, today);
    let joined = pool.join();
    let walked = stream.finish();

    let stats = settle(aggregated, walked)?;
    joined?;

    info!(
        "Scanned {} entries ({} words) in {:?}",
        stats.entries,
        stats.total_words,
        start.elapsed()
    );
    Ok(stats)
}

/// Pick the single outcome of a run from the aggregator's and the walk's.
///
/// The aggregator's error wins, except that a bare `Canceled` is replaced by
/// the walk failure that caused it. A walk failure also replaces totals
/// that were complete by the time it was reported.
fn settle(
    aggregated: Result<AggregateStats, StatsError>,
    walked: Result<usize, StatsError>,
) -> Result<AggregateStats, StatsError> {
    match (aggregated, walked) {
        (Ok(stats), Ok(found)) => {
            debug!("Walk emitted {found} entries");
            Ok(stats)
        }
        (Err(err), Err(walk_err)) if err.is_canceled() => Err(walk_err),
        (Err(err), _) => Err(err),
        (Ok(_), Err(walk_err)) => Err(walk_err),
    }
}

/// Handle to a statistics run on a background thread.
pub struct StatsHandle {
    cancel: Cancellation,
    thread: thread::JoinHandle<Result<AggregateStats, StatsError>>,
}

impl StatsHandle {
    /// Request the run to stop as soon as possible.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Block until the run finishes.
    pub fn wait(self) -> Result<AggregateStats, StatsError> {
        self.thread
            .join()
            .map_err(|_| StatsError::WorkerPanicked("statistics"))?
    }
}

/// Start [`collect_stats`] on a background thread.
pub fn start_stats<F>(
    root: PathBuf,
    factory: Arc<F>,
    scanners: usize,
    today: NaiveDate,
) -> Result<StatsHandle, StatsError>
where
    F: EntryFactory + 'static,
{
    let cancel = Cancellation::new();
    let run_cancel = cancel.clone();
    let thread = thread::Builder::new()
        .name("gurnel-stats".into())
        .spawn(move || collect_stats(root, factory, scanners, today, &run_cancel))
        .map_err(StatsError::Spawn)?;

    Ok(StatsHandle { cancel, thread })
}
