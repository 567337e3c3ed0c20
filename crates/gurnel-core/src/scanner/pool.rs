/// Fixed-size pool of entry scanners (the fan-out stage).
///
/// Every worker pulls from the same path queue, so each path is claimed by
/// exactly one worker, and pushes its [`ScanResult`] onto one shared result
/// queue (the fan-in point). Each worker owns a clone of the result sender;
/// the queue closes when the last worker drops its clone, which is the
/// barrier the aggregator waits on.
use crate::entry::{Entry, EntryFactory};
use crate::error::StatsError;
use crate::model::{EntryPath, EntryScan, ScanResult, WordCounts};
use crate::scanner::Cancellation;
use compact_str::CompactString;
use crossbeam_channel::{bounded, select, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};

/// Worker count when none is configured.
pub const DEFAULT_SCANNERS: usize = 32;

/// Results buffered between the workers and the aggregator.
pub const RESULT_CHANNEL_CAPACITY: usize = 64;

pub struct ScannerPool {
    /// Receives one result per scanned entry, in completion order.
    pub results: Receiver<ScanResult>,
    workers: Vec<thread::JoinHandle<()>>,
}

impl ScannerPool {
    /// Spawn `concurrency` workers (at least one) reading from `paths`.
    pub fn spawn<F>(
        paths: &Receiver<EntryPath>,
        factory: Arc<F>,
        concurrency: usize,
        cancel: &Cancellation,
    ) -> Result<Self, StatsError>
    where
        F: EntryFactory + 'static,
    {
        let concurrency = concurrency.max(1);
        let (result_tx, result_rx) = bounded::<ScanResult>(RESULT_CHANNEL_CAPACITY);

        let mut workers = Vec::with_capacity(concurrency);
        for i in 0..concurrency {
            let paths = paths.clone();
            let results = result_tx.clone();
            let factory = Arc::clone(&factory);
            let worker_cancel = cancel.clone();
            let spawned = thread::Builder::new()
                .name(format!("gurnel-scanner-{i}"))
                .spawn(move || run_worker(paths, results, factory.as_ref(), worker_cancel));
            match spawned {
                Ok(handle) => workers.push(handle),
                Err(err) => {
                    cancel.cancel();
                    drop(result_rx);
                    abandon(workers);
                    return Err(StatsError::Spawn(err));
                }
            }
        }

        Ok(Self {
            results: result_rx,
            workers,
        })
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Wait for every worker to exit.
    pub fn join(self) -> Result<(), StatsError> {
        let Self { results, workers } = self;
        // Workers blocked on a full result queue see a disconnect and stop.
        drop(results);
        if join_all(workers) {
            Err(StatsError::WorkerPanicked("scanner"))
        } else {
            Ok(())
        }
    }
}

/// Join every handle. Returns `true` if any worker panicked.
fn join_all(workers: Vec<thread::JoinHandle<()>>) -> bool {
    let mut panicked = false;
    for handle in workers {
        panicked |= handle.join().is_err();
    }
    panicked
}

/// Join workers of a pool that failed to start. The pipeline must already be
/// cancelled so each of them exits at its next hand-off.
fn abandon(workers: Vec<thread::JoinHandle<()>>) {
    let started = workers.len();
    if join_all(workers) {
        warn!("A scanner worker panicked while the pool was shutting down");
    }
    debug!("Joined {started} scanner workers after a failed spawn");
}

fn run_worker<F: EntryFactory>(
    paths: Receiver<EntryPath>,
    results: Sender<ScanResult>,
    factory: &F,
    cancel: Cancellation,
) {
    let signal = cancel.signal().clone();
    loop {
        let path = select! {
            recv(paths) -> msg => match msg {
                Ok(path) => path,
                Err(_) => return,
            },
            recv(signal) -> _ => return,
        };
        // `select!` picks at random when both arms are ready.
        if cancel.is_cancelled() {
            return;
        }

        let result = scan_entry(factory, path);

        select! {
            send(results, result) -> sent => {
                if sent.is_err() {
                    return;
                }
            }
            recv(signal) -> _ => return,
        }
    }
}

/// Load one entry and count its words.
pub fn scan_entry<F: EntryFactory>(factory: &F, path: EntryPath) -> ScanResult {
    let mut entry = factory.open(&path);
    let outcome = entry
        .load()
        .and_then(|_| {
            let date = entry.date()?;
            Ok(EntryScan {
                words: count_words(entry.words()),
                date,
            })
        })
        .map_err(|source| StatsError::EntryLoad {
            path: path.as_path().to_path_buf(),
            source,
        });
    ScanResult { path, outcome }
}

/// Case-folded occurrence counts for a sequence of words.
pub fn count_words<'a, I>(words: I) -> WordCounts
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = WordCounts::new();
    for word in words {
        *counts.entry(CompactString::new(word.to_lowercase())).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EntryError;
    use chrono::NaiveDate;
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory entries: body is derived from the file name, and names
    /// containing "broken" fail to load.
    #[derive(Default)]
    struct FakeEntries {
        opened: AtomicUsize,
    }

    struct FakeEntry {
        path: PathBuf,
        body: String,
    }

    impl Entry for FakeEntry {
        fn load(&mut self) -> Result<bool, EntryError> {
            let name = self.path.file_name().unwrap().to_string_lossy().into_owned();
            if self.path.to_string_lossy().contains("broken") {
                return Err(EntryError::UnterminatedFrontmatter);
            }
            self.body = format!("Word word {name}");
            Ok(true)
        }

        fn date(&self) -> Result<NaiveDate, EntryError> {
            let name = self.path.file_name().unwrap().to_string_lossy().into_owned();
            crate::model::date_from_name(&name).ok_or(EntryError::Undated { name })
        }

        fn body(&self) -> &str {
            &self.body
        }
    }

    impl EntryFactory for FakeEntries {
        type Entry = FakeEntry;

        fn open(&self, path: &EntryPath) -> FakeEntry {
            self.opened.fetch_add(1, Ordering::SeqCst);
            FakeEntry {
                path: path.as_path().to_path_buf(),
                body: String::new(),
            }
        }
    }

    fn entry_path(dir: &str, day: u32) -> EntryPath {
        let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        EntryPath::from_path(PathBuf::from(dir).join(crate::model::entry_file_name(date))).unwrap()
    }

    #[test]
    fn count_words_folds_case() {
        let counts = count_words(["The", "the", "THE", "cat"]);
        assert_eq!(counts["the"], 3);
        assert_eq!(counts["cat"], 1);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn count_words_of_nothing_is_empty() {
        assert!(count_words(Vec::<&str>::new()).is_empty());
    }

    #[test]
    fn scan_entry_reports_words_and_date() {
        let result = scan_entry(&FakeEntries::default(), entry_path("ok", 5));
        let scan = result.outcome.expect("scan should succeed");
        assert_eq!(scan.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(scan.words["word"], 2);
        assert_eq!(scan.word_count(), 3);
    }

    #[test]
    fn scan_entry_carries_load_failure() {
        let result = scan_entry(&FakeEntries::default(), entry_path("broken", 5));
        match result.outcome {
            Err(StatsError::EntryLoad { path, .. }) => assert!(path.starts_with("broken")),
            other => panic!("expected EntryLoad, got {other:?}"),
        }
    }

    /// Every path is claimed by exactly one worker and yields exactly one result.
    #[test]
    fn pool_processes_each_path_once() {
        let (path_tx, path_rx) = bounded(0);
        let factory = Arc::new(FakeEntries::default());
        let cancel = Cancellation::new();
        let pool = ScannerPool::spawn(&path_rx, Arc::clone(&factory), 8, &cancel).unwrap();
        drop(path_rx);
        assert_eq!(pool.len(), 8);

        let feeder = std::thread::spawn(move || {
            for day in 1..=28 {
                path_tx.send(entry_path("ok", day)).unwrap();
            }
        });

        let results: Vec<ScanResult> = pool.results.iter().collect();
        feeder.join().unwrap();
        pool.join().unwrap();

        assert_eq!(results.len(), 28);
        let distinct: HashSet<_> = results.iter().map(|r| r.path.clone()).collect();
        assert_eq!(distinct.len(), 28);
        assert_eq!(factory.opened.load(Ordering::SeqCst), 28);
        assert!(results.iter().all(|r| r.outcome.is_ok()));
    }

    /// A failing entry does not stop other workers on its own; it is just
    /// another result.
    #[test]
    fn load_failure_is_emitted_as_result() {
        let (path_tx, path_rx) = bounded(4);
        path_tx.send(entry_path("ok", 1)).unwrap();
        path_tx.send(entry_path("broken", 2)).unwrap();
        path_tx.send(entry_path("ok", 3)).unwrap();
        drop(path_tx);

        let cancel = Cancellation::new();
        let pool =
            ScannerPool::spawn(&path_rx, Arc::new(FakeEntries::default()), 2, &cancel).unwrap();
        let results: Vec<ScanResult> = pool.results.iter().collect();
        pool.join().unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results.iter().filter(|r| r.outcome.is_err()).count(), 1);
    }

    /// Zero is clamped to one worker rather than a pool that never drains.
    #[test]
    fn zero_concurrency_spawns_one_worker() {
        let (_path_tx, path_rx) = bounded::<EntryPath>(0);
        let cancel = Cancellation::new();
        let pool =
            ScannerPool::spawn(&path_rx, Arc::new(FakeEntries::default()), 0, &cancel).unwrap();
        assert_eq!(pool.len(), 1);
        cancel.cancel();
        pool.join().unwrap();
    }

    /// Cleanup after a failed spawn joins every worker already started, even
    /// while the path queue is still open.
    #[test]
    fn abandon_joins_started_workers() {
        let (_path_tx, path_rx) = bounded::<EntryPath>(0);
        let (result_tx, result_rx) = bounded::<ScanResult>(1);
        let cancel = Cancellation::new();
        let exited = Arc::new(AtomicUsize::new(0));

        let workers: Vec<_> = (0..3)
            .map(|_| {
                let paths = path_rx.clone();
                let results = result_tx.clone();
                let cancel = cancel.clone();
                let exited = Arc::clone(&exited);
                std::thread::spawn(move || {
                    run_worker(paths, results, &FakeEntries::default(), cancel);
                    exited.fetch_add(1, Ordering::SeqCst);
                })
            })
            .collect();
        drop(result_tx);

        cancel.cancel();
        abandon(workers);
        assert_eq!(exited.load(Ordering::SeqCst), 3);
        assert!(result_rx.recv().is_err(), "every worker dropped its sender");
    }

    /// Workers blocked waiting for paths must exit once cancelled, even though
    /// the path queue is still open.
    #[test]
    fn cancel_stops_idle_workers() {
        let (_path_tx, path_rx) = bounded::<EntryPath>(0);
        let cancel = Cancellation::new();
        let pool =
            ScannerPool::spawn(&path_rx, Arc::new(FakeEntries::default()), 4, &cancel).unwrap();
        cancel.cancel();
        // Result queue closes once every worker has exited.
        assert!(pool.results.iter().next().is_none());
        pool.join().unwrap();
    }
}
