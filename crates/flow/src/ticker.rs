//! Ticker module - a periodic background callback.
//!
//! One worker thread invokes the current action, then waits for the
//! current interval; both are re-read every cycle, so updates take effect
//! on the next cycle. An atomic run flag is the cancellation token: `stop`
//! clears it, wakes a waiting worker and joins it, so at most one live
//! worker exists per ticker and `start` while running is a no-op.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, TryLockError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// The periodic callback. Cloned out of the shared slot each cycle so the
/// slot lock is not held across the invocation.
pub type TickAction = Arc<dyn Fn() + Send + Sync>;

struct Shared {
    running: AtomicBool,
    /// Bumped by every `stop`. A worker whose generation is stale exits
    /// even when a concurrent `start` has already set `running` again, so
    /// a stop/start race can never leave two loops alive.
    generation: AtomicU64,
    interval_ms: AtomicU64,
    action: Mutex<TickAction>,
    /// Gate for the inter-tick wait; `stop` signals it so the worker does
    /// not sleep out the rest of its interval.
    gate: Mutex<()>,
    wake: Condvar,
}

pub struct Ticker {
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Shared {
    fn live(&self, my_generation: u64) -> bool {
        self.running.load(Ordering::Acquire)
            && self.generation.load(Ordering::Acquire) == my_generation
    }

    fn run_loop(&self, my_generation: u64) {
        while self.live(my_generation) {
            let action = Arc::clone(&lock(&self.action));
            action();

            let interval = self.interval_ms.load(Ordering::Acquire);
            let guard = lock(&self.gate);
            // Re-check under the gate: a stop between the loop test and
            // here must not be slept away.
            if !self.live(my_generation) {
                break;
            }
            let _ = self
                .wake
                .wait_timeout(guard, Duration::from_millis(interval));
        }
    }
}

impl Ticker {
    /// Create a ticker and start it immediately.
    pub fn new(action: impl Fn() + Send + Sync + 'static, interval_ms: u64) -> Self {
        let ticker = Self {
            shared: Arc::new(Shared {
                running: AtomicBool::new(false),
                generation: AtomicU64::new(0),
                interval_ms: AtomicU64::new(interval_ms),
                action: Mutex::new(Arc::new(action)),
                gate: Mutex::new(()),
                wake: Condvar::new(),
            }),
            worker: Mutex::new(None),
        };
        ticker.start();
        ticker
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    /// Spawn the worker loop unless one is already live.
    pub fn start(&self) {
        let mut worker = lock(&self.worker);

        if self
            .shared
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        // A previous worker's generation went stale when it was stopped,
        // so it exits promptly; reap it before installing the new one.
        if let Some(old) = worker.take() {
            if old.thread().id() != thread::current().id() {
                let _ = old.join();
            }
        }

        let generation = self.shared.generation.load(Ordering::Acquire);
        let shared = Arc::clone(&self.shared);
        *worker = Some(thread::spawn(move || shared.run_loop(generation)));
    }

    /// Clear the run flag, wake the worker out of its wait and join it.
    /// An in-progress action completes first. Joining is skipped when
    /// called from the worker itself, so a tick action may stop its own
    /// ticker.
    pub fn stop(&self) {
        {
            let _gate = lock(&self.shared.gate);
            self.shared.generation.fetch_add(1, Ordering::AcqRel);
            self.shared.running.store(false, Ordering::Release);
            self.shared.wake.notify_all();
        }

        // try_lock, not lock: when another stop already holds the slot and
        // is joining the worker, a second stop arriving from the worker's
        // own action must not block on the slot or the join never returns.
        let mut worker = match self.worker.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => return,
        };
        if let Some(handle) = worker.take() {
            if handle.thread().id() == thread::current().id() {
                // Self-stop from inside the action: the loop exits at the
                // top of this cycle; park the handle for a later reap.
                *worker = Some(handle);
            } else {
                let _ = handle.join();
            }
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.shared.interval_ms.load(Ordering::Acquire)
    }

    /// Takes effect on the worker's next cycle.
    pub fn set_interval_ms(&self, interval_ms: u64) {
        self.shared.interval_ms.store(interval_ms, Ordering::Release);
    }

    /// Takes effect on the worker's next cycle.
    pub fn set_action(&self, action: impl Fn() + Send + Sync + 'static) {
        *lock(&self.shared.action) = Arc::new(action);
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
