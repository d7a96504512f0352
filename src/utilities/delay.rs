/// ----- DELAY -----
/// Timed waits for the cab thread. An interruptible delay can be woken
/// early from any other thread through `cancel`, an uninterruptible one
/// always sleeps its full duration, and `Delay::Noop` completes at once.
///
/// Cancellation is recorded in an atomic status word before the wake-up
/// message is queued, so a `cancel` that lands before `wait` is never lost:
/// the message sits in the channel and `wait` returns on its first poll.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{at, bounded, never, select, Receiver, Sender};

const PENDING: u8 = 0;
const CANCELED: u8 = 1;
const COMPLETED: u8 = 2;

#[derive(Debug)]
pub struct Cancelable {
    deadline: Option<Instant>,
    status: AtomicU8,
    cancel_tx: Sender<()>,
    cancel_rx: Receiver<()>,
}

impl Cancelable {
    fn new(timeout: Option<Duration>) -> Self {
        let (cancel_tx, cancel_rx) = bounded(1);
        Cancelable {
            deadline: timeout.map(|timeout| Instant::now() + timeout),
            status: AtomicU8::new(PENDING),
            cancel_tx,
            cancel_rx,
        }
    }

    fn wait(&self) -> bool {
        match self.status.load(Ordering::Acquire) {
            CANCELED => return true,
            COMPLETED => return false,
            _ => (),
        }
        let timer = match self.deadline {
            Some(deadline) => at(deadline),
            None => never(),
        };
        select! {
            recv(self.cancel_rx) -> _ => true,
            recv(timer) -> _ => {
                // a cancel racing the deadline counts only if it got its status in first
                match self.status.compare_exchange(PENDING, COMPLETED, Ordering::AcqRel, Ordering::Acquire) {
                    Ok(_) => false,
                    Err(status) => status == CANCELED,
                }
            },
        }
    }

    fn cancel(&self) -> bool {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                let _ = self.status.compare_exchange(PENDING, COMPLETED, Ordering::AcqRel, Ordering::Acquire);
            }
        }
        if self.status
            .compare_exchange(PENDING, CANCELED, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }
        // capacity 1 and a single successful cancel, so this never blocks
        let _ = self.cancel_tx.try_send(());
        true
    }
}

#[derive(Debug, Clone, Default)]
pub enum Delay {
    /// Completes immediately and ignores cancellation.
    #[default]
    Noop,
    /// Shared between the waiting thread and whoever may cancel it.
    Interruptible(Arc<Cancelable>),
    Uninterruptible(Duration),
}

impl Delay {
    /// Interruptible wait of at most `timeout`, measured from construction.
    pub fn interruptible(timeout: Duration) -> Self {
        Delay::Interruptible(Arc::new(Cancelable::new(Some(timeout))))
    }

    /// Interruptible wait that only ends through `cancel`.
    pub fn indefinite() -> Self {
        Delay::Interruptible(Arc::new(Cancelable::new(None)))
    }

    pub fn uninterruptible(duration: Duration) -> Self {
        Delay::Uninterruptible(duration)
    }

    /// Blocks until the delay runs out or is canceled.
    /// Returns `true` if it was canceled.
    pub fn wait(&self) -> bool {
        match self {
            Delay::Noop => false,
            Delay::Interruptible(inner) => inner.wait(),
            Delay::Uninterruptible(duration) => {
                thread::sleep(*duration);
                false
            },
        }
    }

    /// Requests an early wake-up. Returns whether the cancellation took
    /// effect; a delay that already completed or was already canceled
    /// returns `false`.
    ///
    /// # Panics
    /// On an uninterruptible delay.
    pub fn cancel(&self) -> bool {
        match self {
            Delay::Noop => false,
            Delay::Interruptible(inner) => inner.cancel(),
            Delay::Uninterruptible(_) => panic!("trying to cancel an uninterruptible delay"),
        }
    }
}
