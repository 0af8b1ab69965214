//! # Simulated page session
//!
//! Drives a [`Page`] the way a browser would: preloader, hero enhancements, scrolling through
//! every section, then one viewport resize.

use anyhow::Context;
use folio::domain::capability::{CapabilityProfile, FeatureEnablement};
use folio::domain::config::FolioConfig;
use folio::features::capability::ScriptedEnvironment;
use folio::features::catalog::ProjectCatalog;
use folio::features::loader::{LoaderError, Module, ModuleSource};
use folio::features::sections::{
    ErrorBoundary, Guarded, ObservationHandle, ObserveError, ObserveOptions, Rendered, Section,
    VisibilityObserver, VisibilitySink,
};
use folio::Page;
use folio::domain::constants::{ANIMATION_ENGINE, HERO_SCENE, SECTION_PROJECTS, SEQUENCER};
use futures::future::{BoxFuture, FutureExt};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Slack added to the debounce window before reading the resized profile.
const RESIZE_SETTLE: Duration = Duration::from_millis(10);

/// What the simulated network hands back for a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub name: String,
    pub size_kb: u32,
}

/// Module source backed by timers: every fetch takes `latency`, names in `failing` reject.
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    latency: Duration,
    failing: Arc<Vec<String>>,
}

impl SimulatedSource {
    #[must_use]
    pub fn new(latency: Duration, failing: Vec<String>) -> Self {
        Self { latency, failing: Arc::new(failing) }
    }
}

impl ModuleSource for SimulatedSource {
    fn fetch(&self, name: &str) -> BoxFuture<'static, Result<Module, LoaderError>> {
        let latency = self.latency;
        let fail = self.failing.iter().any(|n| n == name);
        let name = name.to_owned();

        async move {
            debug!(module = %name, ?latency, "Fetching chunk");
            tokio::time::sleep(latency).await;
            if fail {
                return Err(LoaderError::fetch(name, "simulated network error"));
            }

            let size_kb = match name.as_str() {
                HERO_SCENE => 610,
                ANIMATION_ENGINE => 72,
                SEQUENCER => 41,
                _ => 10,
            };
            Ok(Module::new(name.clone(), Chunk { name, size_kb }))
        }
        .boxed()
    }
}

/// Records observations so the session can "scroll" to them in document order.
#[derive(Debug, Clone, Default)]
pub struct ScrollObserver {
    watched: Arc<Mutex<Vec<(String, VisibilitySink)>>>,
}

impl ScrollObserver {
    /// Brings `section` into view and scrolls past it again.
    pub fn scroll_past(&self, section: &str) {
        let sinks: Vec<VisibilitySink> = self
            .watched
            .lock()
            .iter()
            .filter(|(id, sink)| id == section && sink.is_attached())
            .map(|(_, sink)| sink.clone())
            .collect();

        for sink in sinks {
            sink.notify(true);
            sink.notify(false);
        }
    }
}

impl VisibilityObserver for ScrollObserver {
    fn observe(
        &self,
        section: &str,
        options: ObserveOptions,
        sink: VisibilitySink,
    ) -> Result<ObservationHandle, ObserveError> {
        debug!(
            section,
            threshold = options.threshold,
            margin = options.root_margin_px,
            "Observing"
        );
        self.watched.lock().push((section.to_owned(), sink));

        let watched = Arc::clone(&self.watched);
        let id = section.to_owned();
        Ok(ObservationHandle::new(move || watched.lock().retain(|(s, _)| *s != id)))
    }
}

/// Outcome of [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub initial: CapabilityProfile,
    pub enablement: FeatureEnablement,
    pub scene_loaded: bool,
    pub animations_loaded: bool,
    pub sections_mounted: usize,
    pub fallbacks: usize,
    pub resized: FeatureEnablement,
}

/// Session parameters beyond the configuration.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub failing: Vec<String>,
    pub latency: Duration,
    pub resize_to: u32,
    /// Raw project catalog rendered into the projects section.
    pub projects: Option<String>,
}

/// Runs one session against `config`.
///
/// # Errors
/// Fails when the page cannot be composed (invalid module manifest).
pub async fn run(config: FolioConfig, options: SessionOptions) -> anyhow::Result<SessionReport> {
    let env = ScriptedEnvironment::new(config.environment.clone());
    let observer = ScrollObserver::default();
    let debounce = Duration::from_millis(config.resize.debounce_ms);

    let page = Page::builder()
        .config(config)
        .signals(env.clone())
        .module_source(SimulatedSource::new(options.latency, options.failing.clone()))
        .observer(observer.clone())
        .build()
        .context("Failed to compose the page")?;

    let initial = page.profile();
    let enablement = page.enablement();
    for hint in &page.performance().hints {
        info!(hint = hint.description(), "Performance hint");
    }

    let delay = page.preloader_delay();
    info!(?delay, "Preloader shown");
    tokio::time::sleep(delay).await;

    let hero = page.hero_enhancements().await;
    info!(
        scene = hero.scene.is_some(),
        engine = hero.engine.is_some(),
        scroll = hero.scroll.is_some(),
        "Hero ready"
    );

    let mut fallbacks = 0;
    for section in page.sections() {
        observer.scroll_past(section.id());
        let boundary =
            ErrorBoundary::new(section.id()).fallback("This section could not be displayed.");
        let projects = options.projects.as_deref();

        match section.render(|| boundary.render(|| render_section(section, projects))) {
            Rendered::Content(Guarded::View(summary)) => {
                info!(section = section.id(), %summary, "Rendered");
            },
            Rendered::Content(Guarded::Fallback(fallback)) => {
                fallbacks += 1;
                warn!(section = section.id(), message = %fallback.message, "Rendered fallback");
            },
            Rendered::Placeholder(placeholder) => {
                info!(
                    section = section.id(),
                    min_height = placeholder.min_height_px,
                    "Still a placeholder"
                );
            },
        }
    }

    env.resize(options.resize_to);
    page.schedule_resize();
    tokio::time::sleep(debounce + RESIZE_SETTLE).await;
    let resized = page.enablement();
    info!(width = options.resize_to, animations = resized.animations_enabled, "Viewport resized");

    Ok(SessionReport {
        initial,
        enablement,
        scene_loaded: hero.scene.is_some(),
        animations_loaded: hero.can_animate(),
        sections_mounted: page.sections().iter().filter(|s| s.is_triggered()).count(),
        fallbacks,
        resized,
    })
}

fn render_section(section: &Section, projects: Option<&str>) -> anyhow::Result<String> {
    if section.id() != SECTION_PROJECTS {
        return Ok(format!("{} content", section.id()));
    }

    let Some(json) = projects else {
        return Ok("no projects published".to_owned());
    };
    let catalog = ProjectCatalog::from_json(json)?;
    let pills: Vec<String> = catalog
        .categories()
        .iter()
        .map(|pill| format!("{} ({})", pill.label, pill.count))
        .collect();

    Ok(format!("{} projects: {}", catalog.projects().len(), pills.join(", ")))
}
