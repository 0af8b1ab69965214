use crate::prober::CapabilityProber;
use parking_lot::Mutex;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::trace;

/// Trailing-edge debouncer for resize bursts.
///
/// Each [`ResizeDebouncer::trigger`] restarts the window; only the last event in a burst
/// reaches [`CapabilityProber::handle_resize`]. Outside a Tokio runtime, or with a zero
/// window, triggers recompute immediately. Dropping the debouncer cancels a pending recompute.
#[derive(Debug)]
pub struct ResizeDebouncer {
    prober: CapabilityProber,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl ResizeDebouncer {
    #[must_use]
    pub const fn new(prober: CapabilityProber, delay: Duration) -> Self {
        Self { prober, delay, pending: Mutex::new(None) }
    }

    /// Records one resize event.
    pub fn trigger(&self) {
        let runtime = match Handle::try_current() {
            Ok(handle) if !self.delay.is_zero() => handle,
            _ => {
                self.cancel();
                self.prober.handle_resize();
                return;
            },
        };

        let prober = self.prober.clone();
        let delay = self.delay;
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            prober.handle_resize();
        });

        if let Some(previous) = self.pending.lock().replace(task) {
            previous.abort();
            trace!("Resize burst coalesced");
        }
    }

    /// Drops a pending recompute, if any.
    pub fn cancel(&self) {
        if let Some(task) = self.pending.lock().take() {
            task.abort();
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl Drop for ResizeDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
