/// Single-consumer fold of scan results into [`AggregateStats`].
///
/// Aggregation is commutative (summing counts, taking a minimum date), so
/// the nondeterministic arrival order of results never changes the outcome.
/// The aggregate is owned by this function alone; no lock guards it.
use crate::error::StatsError;
use crate::model::{AggregateStats, ScanResult};
use crate::scanner::Cancellation;
use chrono::NaiveDate;
use crossbeam_channel::{select, Receiver};
use tracing::warn;

/// Consume `results` until the queue closes.
///
/// `today` seeds the earliest-date reduction: no entry should be dated after
/// it, so every real date replaces it.
///
/// On the first failed result the pipeline is cancelled, everything still in
/// flight is drained and discarded, and that error is returned in place of
/// any partial totals. External cancellation yields [`StatsError::Canceled`].
pub fn aggregate(
    results: &Receiver<ScanResult>,
    cancel: &Cancellation,
    today: NaiveDate,
) -> Result<AggregateStats, StatsError> {
    let signal = cancel.signal().clone();
    let mut stats = AggregateStats::default();
    let mut earliest = today;

    loop {
        select! {
            recv(results) -> msg => {
                let Ok(result) = msg else { break };
                match result.outcome {
                    Ok(scan) => {
                        if scan.date < earliest {
                            earliest = scan.date;
                        }
                        stats.absorb_words(scan.words);
                    }
                    Err(err) => {
                        warn!("Aborting statistics run: {err}");
                        cancel.cancel();
                        drain(results);
                        return Err(err);
                    }
                }
            }
            recv(signal) -> _ => {
                drain(results);
                return Err(StatsError::Canceled);
            }
        }
    }

    if !stats.is_empty() {
        stats.earliest = Some(earliest);
    }
    Ok(stats)
}

/// Discard results until every producer has exited.
fn drain(results: &Receiver<ScanResult>) {
    for _ in results.iter() {}
}
