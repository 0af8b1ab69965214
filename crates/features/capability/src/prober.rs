use crate::error::CapabilityError;
use crate::signals::EnvironmentSignals;
use folio_domain::capability::{CapabilityProfile, EnvironmentSnapshot};
use folio_domain::config::ProbeConfig;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, trace};

const DEFAULT_PIXEL_RATIO: f64 = 1.0;

type Listener = Arc<dyn Fn(&CapabilityProfile) + Send + Sync>;

/// Derives a [`CapabilityProfile`] from a snapshot. Pure; absent signals take their defaults.
#[must_use]
pub fn derive_profile(snapshot: &EnvironmentSnapshot, config: &ProbeConfig) -> CapabilityProfile {
    let is_narrow_viewport =
        snapshot.viewport_width.is_some_and(|width| width < config.narrow_breakpoint_px);

    let mobile_agent = snapshot.user_agent.as_deref().is_some_and(|agent| {
        let agent = agent.to_ascii_lowercase();
        config.mobile_user_agents.iter().any(|token| agent.contains(&token.to_ascii_lowercase()))
    });

    let pixel_ratio = snapshot
        .device_pixel_ratio
        .filter(|ratio| ratio.is_finite() && *ratio > 0.0)
        .unwrap_or(DEFAULT_PIXEL_RATIO);

    CapabilityProfile {
        is_narrow_viewport,
        is_touch_or_small_screen: is_narrow_viewport
            || mobile_agent
            || snapshot.touch_support.unwrap_or(false),
        network_is_fast: snapshot
            .effective_connection
            .is_none_or(|kind| config.fast_connections.contains(&kind)),
        pixel_density_is_modest: pixel_ratio <= config.modest_pixel_ratio,
        user_prefers_reduced_motion: snapshot.prefers_reduced_motion.unwrap_or(false),
    }
}

struct ProberInner {
    signals: Arc<dyn EnvironmentSignals>,
    config: ProbeConfig,
    current: RwLock<CapabilityProfile>,
    listeners: RwLock<FxHashMap<u64, Listener>>,
    next_id: AtomicU64,
}

/// Produces and tracks the [`CapabilityProfile`] of the running environment.
///
/// Cheap to clone; clones share the profile and the subscriber registry.
#[derive(Clone)]
pub struct CapabilityProber {
    inner: Arc<ProberInner>,
}

impl fmt::Debug for CapabilityProber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityProber")
            .field("current", &*self.inner.current.read())
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}

impl CapabilityProber {
    /// Creates a prober and takes the initial reading synchronously.
    pub fn new<S>(signals: S, config: ProbeConfig) -> Self
    where
        S: EnvironmentSignals + 'static,
    {
        Self::with_shared(Arc::new(signals), config)
    }

    /// Like [`CapabilityProber::new`] for a signal source that is already shared.
    pub fn with_shared(signals: Arc<dyn EnvironmentSignals>, config: ProbeConfig) -> Self {
        let prober = Self {
            inner: Arc::new(ProberInner {
                signals,
                config,
                current: RwLock::new(CapabilityProfile::default()),
                listeners: RwLock::new(FxHashMap::default()),
                next_id: AtomicU64::new(1),
            }),
        };
        prober.probe();
        prober
    }

    /// Reads every signal, substituting `None` for unreadable ones.
    #[must_use]
    pub fn snapshot(&self) -> EnvironmentSnapshot {
        let signals = &self.inner.signals;
        EnvironmentSnapshot {
            viewport_width: or_default("viewport_width", signals.viewport_width()),
            effective_connection: or_default(
                "effective_connection",
                signals.effective_connection(),
            ),
            device_pixel_ratio: or_default("device_pixel_ratio", signals.device_pixel_ratio()),
            touch_support: or_default("touch_support", signals.touch_support()),
            user_agent: or_default("user_agent", signals.user_agent()),
            prefers_reduced_motion: or_default(
                "prefers_reduced_motion",
                signals.prefers_reduced_motion(),
            ),
            hardware_concurrency: or_default(
                "hardware_concurrency",
                signals.hardware_concurrency(),
            ),
            heap_limit_bytes: or_default("heap_limit_bytes", signals.heap_limit_bytes()),
        }
    }

    /// Recomputes the profile from the current environment and stores it.
    pub fn probe(&self) -> CapabilityProfile {
        let profile = derive_profile(&self.snapshot(), &self.inner.config);

        let previous = std::mem::replace(&mut *self.inner.current.write(), profile);
        if previous != profile {
            debug!(flags = ?profile.flags(), "Capability profile changed");
        }

        profile
    }

    /// The last computed profile.
    #[must_use]
    pub fn current(&self) -> CapabilityProfile {
        *self.inner.current.read()
    }

    #[must_use]
    pub fn config(&self) -> &ProbeConfig {
        &self.inner.config
    }

    /// Registers `callback` for profile recomputations triggered by resize.
    ///
    /// The listener stays registered until the returned [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&CapabilityProfile) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.write().insert(id, Arc::new(callback));
        trace!(id, "Capability listener registered");

        Subscription { id, prober: Arc::downgrade(&self.inner) }
    }

    /// Viewport resize hook: re-probes and notifies every subscriber with the new profile.
    pub fn handle_resize(&self) -> CapabilityProfile {
        let profile = self.probe();

        // Snapshot the listeners so callbacks may (un)subscribe without deadlocking.
        let listeners: Vec<Listener> = self.inner.listeners.read().values().cloned().collect();
        for listener in &listeners {
            listener(&profile);
        }

        profile
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.read().len()
    }
}

/// Registration handle returned by [`CapabilityProber::subscribe`]; dropping it unsubscribes.
#[must_use = "Dropping the subscription immediately removes the listener"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    prober: Weak<ProberInner>,
}

impl Subscription {
    /// Explicit form of dropping the handle.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.prober.upgrade() {
            inner.listeners.write().remove(&self.id);
            trace!(id = self.id, "Capability listener released");
        }
    }
}

fn or_default<T>(signal: &'static str, reading: Result<Option<T>, CapabilityError>) -> Option<T> {
    reading.unwrap_or_else(|error| {
        debug!(signal, %error, "Environment signal unreadable; using default");
        None
    })
}
