use crate::error::PageError;
use folio_capability::{
    CapabilityProber, EnvironmentSignals, PerformanceAssessment, ResizeDebouncer, Subscription,
    assess, preloader_delay,
};
use folio_domain::capability::{CapabilityProfile, FeatureEnablement};
use folio_domain::config::FolioConfig;
use folio_domain::constants::{ANIMATION_ENGINE, HERO_SCENE, SEQUENCER};
use folio_loader::{Module, ModuleLoader, ModuleSource};
use folio_sections::{Section, VisibilityObserver};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Modules backing the hero region. Each is `None` when unavailable; callers render the
/// static hero in that case.
#[derive(Debug, Clone, Default)]
pub struct HeroEnhancements {
    /// Decorative 3D scene, only offered when the device may show it.
    pub scene: Option<Module>,
    pub engine: Option<Module>,
    /// Scroll-driven sequencing, registered on top of the engine.
    pub scroll: Option<Module>,
}

impl HeroEnhancements {
    /// `true` when entrance animations can run.
    #[must_use]
    pub const fn can_animate(&self) -> bool {
        self.engine.is_some()
    }
}

/// Builder for [`Page`].
#[derive(Default)]
pub struct PageBuilder {
    config: Option<FolioConfig>,
    signals: Option<Arc<dyn EnvironmentSignals>>,
    source: Option<Arc<dyn ModuleSource>>,
    observer: Option<Arc<dyn VisibilityObserver>>,
}

impl std::fmt::Debug for PageBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageBuilder")
            .field("config", &self.config.is_some())
            .field("signals", &self.signals.is_some())
            .field("source", &self.source.is_some())
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl PageBuilder {
    /// Defaults to [`FolioConfig::default`].
    #[must_use = "The builder must be configured before it can be used to build the page."]
    pub fn config(mut self, config: FolioConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Live environment. Defaults to the `environment` snapshot of the config.
    #[must_use = "The builder must be configured before it can be used to build the page."]
    pub fn signals(mut self, signals: impl EnvironmentSignals + 'static) -> Self {
        self.signals = Some(Arc::new(signals));
        self
    }

    /// Where heavy modules are fetched from. Required.
    #[must_use = "The builder must be configured before it can be used to build the page."]
    pub fn module_source(mut self, source: impl ModuleSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Intersection observer used to mount sections. Without one every section mounts
    /// immediately.
    #[must_use = "The builder must be configured before it can be used to build the page."]
    pub fn observer(mut self, observer: impl VisibilityObserver + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Probes the environment, gates the loader and mounts every configured section.
    ///
    /// The profile is final before any section decides its initial state.
    ///
    /// # Errors
    /// * [`PageError::Missing`] without a module source.
    /// * [`PageError::Loader`] when the module manifest is invalid.
    pub fn build(self) -> Result<Page, PageError> {
        let config = self.config.unwrap_or_default();
        let source =
            self.source.ok_or(PageError::Missing { component: "module source", context: None })?;
        let signals = self.signals.unwrap_or_else(|| {
            debug!("No live signals; probing the configured environment snapshot");
            Arc::new(config.environment.clone()) as Arc<dyn EnvironmentSignals>
        });

        let prober = CapabilityProber::with_shared(signals, config.probe.clone());
        let profile = prober.current();
        let initial = profile.enablement();
        let enablement = Arc::new(RwLock::new(initial));

        let loader = ModuleLoader::with_shared(source, &config.loader)?;
        loader.set_enablement(&initial);

        let resize = {
            let loader = loader.clone();
            let enablement = Arc::clone(&enablement);
            prober.subscribe(move |profile| {
                let next = profile.enablement();
                let previous = std::mem::replace(&mut *enablement.write(), next);
                loader.set_enablement(&next);
                if previous != next {
                    info!(
                        scene = next.show_decorative_scene,
                        animations = next.animations_enabled,
                        "Feature enablement changed"
                    );
                }
            })
        };

        let sections: Vec<Section> = config
            .page
            .sections
            .iter()
            .map(|spec| Section::from_spec(spec, &config.sections))
            .collect();
        for section in &sections {
            section.mount(self.observer.as_deref());
        }

        let performance = assess(&prober.snapshot());
        let debouncer =
            ResizeDebouncer::new(prober.clone(), Duration::from_millis(config.resize.debounce_ms));

        info!(
            flags = ?profile.flags(),
            scene = initial.show_decorative_scene,
            animations = initial.animations_enabled,
            sections = sections.len(),
            low_performance = performance.low_performance,
            "Page composed"
        );

        Ok(Page {
            config,
            prober,
            enablement,
            loader,
            sections,
            performance,
            debouncer,
            _resize: resize,
        })
    }
}

/// Composition root of a page session.
///
/// Owns the prober, the module cache and the sections; dropping it releases the resize
/// subscription and every live observation.
#[derive(Debug)]
pub struct Page {
    config: FolioConfig,
    prober: CapabilityProber,
    enablement: Arc<RwLock<FeatureEnablement>>,
    loader: ModuleLoader,
    sections: Vec<Section>,
    performance: PerformanceAssessment,
    debouncer: ResizeDebouncer,
    _resize: Subscription,
}

impl Page {
    #[must_use = "The builder must be configured before it can be used to build the page."]
    pub fn builder() -> PageBuilder {
        PageBuilder::default()
    }

    /// Re-probes right away and propagates the new enablement.
    ///
    /// Together with [`Page::schedule_resize`] this is the only way to re-probe, so
    /// [`Page::profile`] and [`Page::enablement`] never disagree.
    pub fn handle_resize(&self) -> CapabilityProfile {
        self.prober.handle_resize()
    }

    /// Debounced variant of [`Page::handle_resize`] for raw resize event streams.
    pub fn schedule_resize(&self) {
        self.debouncer.trigger();
    }

    #[must_use]
    pub fn profile(&self) -> CapabilityProfile {
        self.prober.current()
    }

    #[must_use]
    pub fn enablement(&self) -> FeatureEnablement {
        *self.enablement.read()
    }

    #[must_use]
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id() == id)
    }

    /// Sections in document order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub const fn loader(&self) -> &ModuleLoader {
        &self.loader
    }

    #[must_use]
    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    /// How long the intro preloader should stay up for the current profile.
    #[must_use]
    pub fn preloader_delay(&self) -> Duration {
        preloader_delay(&self.profile(), &self.config.preloader)
    }

    /// Device classification taken when the page was built.
    #[must_use]
    pub const fn performance(&self) -> &PerformanceAssessment {
        &self.performance
    }

    /// Loads what the hero region may use and hands back whatever became available.
    ///
    /// Never blocks on a disabled gate and never fails; missing modules come back as `None`.
    pub async fn hero_enhancements(&self) -> HeroEnhancements {
        let enablement = self.enablement();
        if !enablement.animations_enabled {
            debug!("Animations disabled; static hero");
            return HeroEnhancements::default();
        }

        let mut wanted = vec![ANIMATION_ENGINE, SEQUENCER];
        if enablement.show_decorative_scene {
            wanted.push(HERO_SCENE);
        }
        self.loader.ensure_loaded(wanted).await;

        HeroEnhancements {
            scene: if enablement.show_decorative_scene {
                self.loader.get(HERO_SCENE)
            } else {
                None
            },
            engine: self.loader.get(ANIMATION_ENGINE),
            scroll: self.loader.get(SEQUENCER),
        }
    }
}
