//! Debouncing of rapidly changing input such as a search box.
//!
//! [`Debouncer`] is a pure state machine driven by the caller's clock, for
//! event loops that already poll. [`DebounceTimer`] runs the delay on a
//! short-lived background thread and fires a callback unless cancelled.

use crate::config::ViewDefaults;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Delay used when nothing else is configured.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Clock-driven debouncer.
///
/// ```
/// use cbom_explorer::view::Debouncer;
/// use std::time::{Duration, Instant};
///
/// let start = Instant::now();
/// let mut debouncer = Debouncer::new(Duration::from_millis(300));
/// debouncer.update("dig".to_string(), start);
/// debouncer.update("digi".to_string(), start + Duration::from_millis(100));
/// assert_eq!(debouncer.poll(start + Duration::from_millis(300)), None);
/// assert_eq!(
///     debouncer.poll(start + Duration::from_millis(400)),
///     Some("digi".to_string())
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer<T = String> {
    delay: Duration,
    pending: Option<T>,
    last_update: Option<Instant>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            last_update: None,
        }
    }

    /// Debouncer using the configured `view.debounce_ms`.
    #[must_use]
    pub const fn from_defaults(defaults: &ViewDefaults) -> Self {
        Self::new(Duration::from_millis(defaults.debounce_ms))
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a new value, restarting the quiet period.
    pub fn update(&mut self, value: T, now: Instant) {
        self.pending = Some(value);
        self.last_update = Some(now);
    }

    /// Emit the pending value once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let last = self.last_update?;
        if now.saturating_duration_since(last) < self.delay {
            return None;
        }
        self.last_update = None;
        self.pending.take()
    }

    /// Time left before the pending value is due, if any.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.last_update
            .map(|last| self.delay.saturating_sub(now.saturating_duration_since(last)))
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending value without emitting it.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.last_update = None;
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }
}

/// Background timer that fires a callback once after a delay.
pub struct DebounceTimer;

impl DebounceTimer {
    /// Start a timer that calls `on_fire(value)` after `delay`.
    ///
    /// The returned handle cancels the timer when [`DebounceHandle::cancel`]
    /// is called or when it is dropped.
    pub fn start<T, F>(value: T, delay: Duration, on_fire: F) -> DebounceHandle
    where
        T: Send + 'static,
        F: FnOnce(T) + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let fired = Arc::new(AtomicBool::new(false));
        let fired_flag = Arc::clone(&fired);

        let worker = std::thread::spawn(move || {
            // A message or a dropped sender both mean cancellation.
            if let Err(RecvTimeoutError::Timeout) = cancel_rx.recv_timeout(delay) {
                fired_flag.store(true, Ordering::Release);
                on_fire(value);
            }
        });

        DebounceHandle {
            cancel_tx: Some(cancel_tx),
            worker: Some(worker),
            fired,
        }
    }
}

/// Handle to a pending [`DebounceTimer`].
#[derive(Debug)]
pub struct DebounceHandle {
    cancel_tx: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
    fired: Arc<AtomicBool>,
}

impl DebounceHandle {
    /// Cancel the timer. Once this returns the callback either already ran
    /// to completion or will never run.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    /// Whether the callback has been invoked.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            // The worker may already have exited; nothing to report then.
            let _ = tx.send(());
        }
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            tracing::warn!("debounce callback panicked");
        }
    }
}

impl Drop for DebounceHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// A text input whose changes reach `on_settle` only after they settle.
///
/// Every [`DebouncedInput::update`] supersedes the previous pending value.
pub struct DebouncedInput<T = String> {
    delay: Duration,
    on_settle: Arc<dyn Fn(T) + Send + Sync>,
    pending: Option<DebounceHandle>,
}

impl<T: Send + 'static> DebouncedInput<T> {
    pub fn new<F>(delay: Duration, on_settle: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            delay,
            on_settle: Arc::new(on_settle),
            pending: None,
        }
    }

    pub fn update(&mut self, value: T) {
        if let Some(previous) = self.pending.take() {
            previous.cancel();
        }
        let on_settle = Arc::clone(&self.on_settle);
        self.pending = Some(DebounceTimer::start(value, self.delay, move |v| {
            on_settle(v);
        }));
    }

    /// Cancel the pending value, if any.
    pub fn cancel(&mut self) {
        if let Some(previous) = self.pending.take() {
            previous.cancel();
        }
    }
}

impl<T> std::fmt::Debug for DebouncedInput<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebouncedInput")
            .field("delay", &self.delay)
            .field("pending", &self.pending.is_some())
            .finish()
    }
}
