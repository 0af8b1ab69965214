use crate::error::LoaderError;
use crate::manifest::Manifest;
use crate::module::{Module, ModuleSource};
use folio_domain::capability::FeatureEnablement;
use folio_domain::config::LoaderConfig;
use futures::future::{BoxFuture, FutureExt, Shared, join_all};
use fxhash::FxHashMap;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tokio::runtime::Handle;
use tracing::{debug, trace, warn};

type SharedLoad = Shared<BoxFuture<'static, Option<Module>>>;

/// Observable lifecycle of one module name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleStatus {
    NotRequested,
    Loading,
    Loaded,
    /// Terminal: the fetch (or a prerequisite) failed and is never retried.
    Failed,
}

/// Cache slot. A name without a slot has never been requested.
enum Slot {
    Loading(SharedLoad),
    Loaded(Module),
    Failed,
}

impl Slot {
    const fn status(&self) -> ModuleStatus {
        match self {
            Self::Loading(_) => ModuleStatus::Loading,
            Self::Loaded(_) => ModuleStatus::Loaded,
            Self::Failed => ModuleStatus::Failed,
        }
    }
}

struct LoaderInner {
    source: Arc<dyn ModuleSource>,
    manifest: Manifest,
    slots: Mutex<FxHashMap<String, Slot>>,
    animations_enabled: AtomicBool,
}

/// Loads heavy optional modules at most once per session.
///
/// Concurrent [`ModuleLoader::ensure_loaded`] calls for the same name share one in-flight
/// fetch, and every caller observes the same outcome. Outcomes are cached for the lifetime of
/// the loader: a loaded module is never evicted, a failed one is never retried.
///
/// Inside a Tokio runtime every load runs on its own task, so it settles even when the
/// request that started it is dropped; outside one, loads advance only while awaited.
///
/// Loading is gated on [`FeatureEnablement::animations_enabled`]; the gate starts closed, so
/// nothing is fetched until [`ModuleLoader::set_enablement`] opens it.
#[derive(Clone)]
pub struct ModuleLoader {
    inner: Arc<LoaderInner>,
}

impl fmt::Debug for ModuleLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleLoader")
            .field("enabled", &self.is_enabled())
            .field("cached", &self.inner.slots.lock().len())
            .finish_non_exhaustive()
    }
}

impl ModuleLoader {
    /// Creates a loader for the modules declared in `config`.
    ///
    /// # Errors
    /// Returns [`LoaderError::InvalidManifest`] for duplicate names, unknown prerequisites or
    /// prerequisite cycles.
    pub fn new<S>(source: S, config: &LoaderConfig) -> Result<Self, LoaderError>
    where
        S: ModuleSource + 'static,
    {
        Self::with_shared(Arc::new(source), config)
    }

    /// Like [`ModuleLoader::new`] for a source that is already shared.
    ///
    /// # Errors
    /// See [`ModuleLoader::new`].
    pub fn with_shared(
        source: Arc<dyn ModuleSource>,
        config: &LoaderConfig,
    ) -> Result<Self, LoaderError> {
        let manifest = Manifest::new(&config.modules)?;
        debug!(modules = config.modules.len(), "Module manifest validated");

        Ok(Self {
            inner: Arc::new(LoaderInner {
                source,
                manifest,
                slots: Mutex::new(FxHashMap::default()),
                animations_enabled: AtomicBool::new(false),
            }),
        })
    }

    /// Opens or closes the loading gate. Loads already in flight are not cancelled.
    pub fn set_enablement(&self, enablement: &FeatureEnablement) {
        let enabled = enablement.animations_enabled;
        if self.inner.animations_enabled.swap(enabled, Ordering::AcqRel) != enabled {
            debug!(enabled, "Module loading gate changed");
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.inner.animations_enabled.load(Ordering::Acquire)
    }

    /// Starts loading every named module that has not been requested yet and waits until all
    /// of them (including loads started by other callers) have settled.
    ///
    /// A no-op while the gate is closed. Never fails: a failed fetch is logged and leaves the
    /// module in [`ModuleStatus::Failed`].
    pub async fn ensure_loaded<I, N>(&self, names: I)
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        if !self.is_enabled() {
            trace!("Module loading disabled; request ignored");
            return;
        }

        let pending: Vec<SharedLoad> =
            names.into_iter().filter_map(|name| self.inner.start(name.as_ref())).collect();
        join_all(pending).await;
    }

    /// Starts loading every named module that has not been requested yet without waiting for
    /// the outcome. Check [`ModuleLoader::get`] later.
    ///
    /// Needs a Tokio runtime to make progress on its own; outside one the loads only advance
    /// once some [`ModuleLoader::ensure_loaded`] awaits them. A no-op while the gate is closed.
    pub fn preload<I, N>(&self, names: I)
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        if !self.is_enabled() {
            trace!("Module loading disabled; preload ignored");
            return;
        }

        for name in names {
            self.inner.start(name.as_ref());
        }
    }

    /// The module, once loaded. `None` while loading, after a failure or if never requested.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Module> {
        match self.inner.slots.lock().get(name) {
            Some(Slot::Loaded(module)) => Some(module.clone()),
            _ => None,
        }
    }

    #[must_use]
    pub fn status(&self, name: &str) -> ModuleStatus {
        self.inner.status(name)
    }

    /// Names declared in the manifest, in no particular order.
    #[must_use]
    pub fn declared(&self) -> Vec<String> {
        self.inner.manifest.names().map(str::to_owned).collect()
    }
}

impl LoaderInner {
    fn status(&self, name: &str) -> ModuleStatus {
        self.slots.lock().get(name).map_or(ModuleStatus::NotRequested, Slot::status)
    }

    /// Returns the in-flight load for `name`, creating it if the name was never requested.
    /// `None` means the outcome is already settled.
    fn start(self: &Arc<Self>, name: &str) -> Option<SharedLoad> {
        let mut slots = self.slots.lock();
        match slots.get(name) {
            Some(Slot::Loading(load)) => return Some(load.clone()),
            Some(Slot::Loaded(_) | Slot::Failed) => return None,
            None => {},
        }

        let load = Self::load(Arc::downgrade(self), Arc::clone(&self.source), name.to_owned())
            .boxed()
            .shared();
        slots.insert(name.to_owned(), Slot::Loading(load.clone()));
        drop(slots);

        // Drive the load independently of the caller so a dropped request still settles.
        if let Ok(runtime) = Handle::try_current() {
            runtime.spawn(load.clone());
        }
        debug!(module = name, "Module load started");

        Some(load)
    }

    /// The single underlying load of `name`. Holds the loader weakly so a fetch that never
    /// resolves does not keep the cache alive.
    async fn load(
        loader: Weak<Self>,
        source: Arc<dyn ModuleSource>,
        name: String,
    ) -> Option<Module> {
        let prerequisites: Vec<String> = match loader.upgrade() {
            Some(inner) => inner.manifest.requires(&name).to_vec(),
            None => return None,
        };

        if !prerequisites.is_empty() {
            let pending: Vec<SharedLoad> = {
                let inner = loader.upgrade()?;
                prerequisites.iter().filter_map(|dep| inner.start(dep)).collect()
            };
            join_all(pending).await;

            let inner = loader.upgrade()?;
            if let Some(missing) =
                prerequisites.iter().find(|dep| inner.status(dep) != ModuleStatus::Loaded)
            {
                warn!(
                    module = %name,
                    prerequisite = %missing,
                    "Prerequisite unavailable; module skipped"
                );
                inner.settle(&name, None);
                return None;
            }
        }

        let module = match source.fetch(&name).await {
            Ok(module) => {
                debug!(module = %name, "Module loaded");
                Some(module)
            },
            Err(error) => {
                warn!(module = %name, %error, "Optional module failed to load; feature degraded");
                None
            },
        };

        if let Some(inner) = loader.upgrade() {
            inner.settle(&name, module.clone());
        }
        module
    }

    fn settle(&self, name: &str, module: Option<Module>) {
        let slot = module.map_or(Slot::Failed, Slot::Loaded);
        self.slots.lock().insert(name.to_owned(), slot);
    }
}
