/// Entry discovery using `jwalk`'s parallel directory traversal.
///
/// The walk runs on its own thread and streams matching paths through a
/// bounded channel. Its terminal outcome travels on a separate one-slot
/// channel so "no more paths" and "the walk failed" can never race: the
/// caller drains (or abandons) the paths first, then reads the outcome.
///
/// # Deduplication
///
/// Only the first path per base file name is emitted. Two copies of the same
/// day's entry in different directories are one entry.
use crate::error::StatsError;
use crate::model::{is_entry_name, EntryPath};
use crate::scanner::Cancellation;
use crossbeam_channel::{bounded, select, Receiver, Sender};
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::thread;
use tracing::debug;

/// Paths buffered between the walker and the scanner workers.
///
/// The walk is much faster than entry loading, so a small buffer is enough
/// to keep every worker fed; beyond that the walker simply waits.
pub const PATH_CHANNEL_CAPACITY: usize = 256;

/// Stream of discovered entries plus the walk's terminal outcome.
pub struct EntryStream {
    /// Entry paths in traversal order. Closed when the walk ends.
    pub paths: Receiver<EntryPath>,
    outcome: Receiver<Result<usize, StatsError>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl EntryStream {
    /// Wait for the walk to end and return its outcome: the number of
    /// entries emitted, or the error that stopped it.
    ///
    /// Call only once `paths` has been drained or every other receiver of it
    /// has been dropped; this handle's own receiver is dropped first so an
    /// abandoned walk unblocks and reports [`StatsError::Canceled`].
    pub fn finish(self) -> Result<usize, StatsError> {
        let Self {
            paths,
            outcome,
            thread,
        } = self;
        drop(paths);

        let result = outcome
            .recv()
            .unwrap_or(Err(StatsError::WorkerPanicked("locator")));
        if let Some(handle) = thread {
            handle
                .join()
                .map_err(|_| StatsError::WorkerPanicked("locator"))?;
        }
        result
    }
}

/// Start walking `root` for journal entries.
pub fn locate(root: PathBuf, cancel: &Cancellation) -> Result<EntryStream, StatsError> {
    let (path_tx, path_rx) = bounded::<EntryPath>(PATH_CHANNEL_CAPACITY);
    let (outcome_tx, outcome_rx) = bounded::<Result<usize, StatsError>>(1);
    let cancel = cancel.clone();

    let thread = thread::Builder::new()
        .name("gurnel-locator".into())
        .spawn(move || {
            let outcome = walk_entries(&root, &path_tx, &cancel);
            // Close the path stream before publishing the outcome.
            drop(path_tx);
            if let Err(err) = &outcome {
                debug!("Entry walk of {} stopped: {err}", root.display());
                if !err.is_canceled() {
                    cancel.cancel();
                }
            }
            // One-slot buffer: never blocks.
            let _ = outcome_tx.send(outcome);
        })
        .map_err(StatsError::Spawn)?;

    Ok(EntryStream {
        paths: path_rx,
        outcome: outcome_rx,
        thread: Some(thread),
    })
}

fn walk_entries(
    root: &Path,
    paths: &Sender<EntryPath>,
    cancel: &Cancellation,
) -> Result<usize, StatsError> {
    let signal = cancel.signal().clone();
    let mut seen: HashSet<OsString> = HashSet::new();
    let mut emitted = 0usize;

    // Sorted traversal makes "first path per base name" deterministic.
    let walker = jwalk::WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .parallelism(jwalk::Parallelism::RayonNewPool(num_cpus::get()));

    for entry_result in walker {
        if cancel.is_cancelled() {
            return Err(StatsError::Canceled);
        }

        let entry = entry_result?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name();
        if seen.contains(name) || !name.to_str().is_some_and(is_entry_name) {
            continue;
        }
        seen.insert(name.to_os_string());

        let Some(path) = EntryPath::from_path(entry.path()) else {
            continue;
        };

        select! {
            send(paths, path) -> sent => {
                if sent.is_err() {
                    // Every receiver is gone: nobody will ever read this path.
                    return Err(StatsError::Canceled);
                }
            }
            recv(signal) -> _ => return Err(StatsError::Canceled),
        }
        emitted += 1;
    }

    debug!("Entry walk of {} found {emitted} entries", root.display());
    Ok(emitted)
}
