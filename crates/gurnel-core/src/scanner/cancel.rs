/// Shared cancellation signal for the statistics pipeline.
///
/// Two halves, observed in different places:
/// - an `AtomicBool` for cheap polling between units of work, and
/// - a zero-capacity channel that nobody ever sends on. `cancel()` drops the
///   only `Sender`, so every `Receiver` clone becomes disconnected at once and
///   any `select!` that includes `recv(signal)` wakes immediately.
///
/// Blocked hand-offs therefore never need a timeout to notice cancellation.
use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct Cancellation {
    flag: Arc<AtomicBool>,
    trigger: Arc<Mutex<Option<Sender<()>>>>,
    signal: Receiver<()>,
}

impl Cancellation {
    pub fn new() -> Self {
        let (trigger, signal) = bounded(0);
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            trigger: Arc::new(Mutex::new(Some(trigger))),
            signal,
        }
    }

    /// Request every stage to stop. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
        self.trigger.lock().take();
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Receiver that becomes ready (disconnected) once `cancel()` runs.
    pub fn signal(&self) -> &Receiver<()> {
        &self.signal
    }
}

impl Default for Cancellation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{select, RecvTimeoutError};
    use std::time::Duration;

    #[test]
    fn fresh_token_is_not_cancelled() {
        let cancel = Cancellation::new();
        assert!(!cancel.is_cancelled());
        assert_eq!(
            cancel.signal().recv_timeout(Duration::from_millis(10)),
            Err(RecvTimeoutError::Timeout)
        );
    }

    /// Every clone must observe a cancel issued through any other clone.
    #[test]
    fn cancel_is_broadcast_to_clones() {
        let cancel = Cancellation::new();
        let a = cancel.clone();
        let b = cancel.clone();
        b.cancel();
        assert!(a.is_cancelled());
        assert!(a.signal().recv().is_err(), "signal must disconnect");
    }

    #[test]
    fn cancel_twice_is_harmless() {
        let cancel = Cancellation::new();
        cancel.cancel();
        cancel.cancel();
        assert!(cancel.is_cancelled());
    }

    /// A thread blocked on an empty channel must wake when cancellation fires.
    #[test]
    fn cancel_unblocks_waiting_select() {
        let cancel = Cancellation::new();
        let (_tx, rx) = bounded::<u32>(0);
        let waiter = {
            let cancel = cancel.clone();
            std::thread::spawn(move || {
                let signal = cancel.signal().clone();
                select! {
                    recv(rx) -> _ => false,
                    recv(signal) -> _ => true,
                }
            })
        };
        std::thread::sleep(Duration::from_millis(20));
        cancel.cancel();
        assert!(waiter.join().unwrap(), "select must take the cancel arm");
    }
}
