use folio::features::loader::{LoaderError, Module, ModuleSource};
use folio::features::sections::{
    ObservationHandle, ObserveError, ObserveOptions, VisibilityObserver, VisibilitySink,
};
use folio_domain::capability::{EffectiveConnectionType, EnvironmentSnapshot};
use futures::future::BoxFuture;
use parking_lot::Mutex;
use std::sync::Arc;

#[must_use]
pub fn desktop() -> EnvironmentSnapshot {
    EnvironmentSnapshot {
        viewport_width: Some(1920),
        effective_connection: Some(EffectiveConnectionType::Cellular4g),
        device_pixel_ratio: Some(1.0),
        touch_support: Some(false),
        prefers_reduced_motion: Some(false),
        ..EnvironmentSnapshot::default()
    }
}

#[must_use]
pub fn phone() -> EnvironmentSnapshot {
    EnvironmentSnapshot {
        viewport_width: Some(400),
        touch_support: Some(true),
        user_agent: Some("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)".to_owned()),
        ..desktop()
    }
}

/// Resolves every module immediately, except the `failing` ones, and logs each fetch.
#[derive(Debug, Clone, Default)]
pub struct StubSource {
    pub fetched: Arc<Mutex<Vec<String>>>,
    pub failing: Vec<String>,
}

impl StubSource {
    #[must_use]
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().clone()
    }
}

impl ModuleSource for StubSource {
    fn fetch(&self, name: &str) -> BoxFuture<'static, Result<Module, LoaderError>> {
        self.fetched.lock().push(name.to_owned());
        let result = if self.failing.iter().any(|n| n == name) {
            Err(LoaderError::fetch(name, "offline"))
        } else {
            Ok(Module::new(name.to_owned(), ()))
        };
        Box::pin(async move { result })
    }
}

/// Observer whose sinks the test drives by section id.
#[derive(Debug, Clone, Default)]
pub struct ManualObserver {
    sinks: Arc<Mutex<Vec<(String, VisibilitySink)>>>,
}

impl ManualObserver {
    pub fn scroll_to(&self, section: &str) {
        let sinks: Vec<VisibilitySink> = self
            .sinks
            .lock()
            .iter()
            .filter(|(id, _)| id == section)
            .map(|(_, sink)| sink.clone())
            .collect();
        for sink in sinks {
            sink.notify(true);
        }
    }
}

impl VisibilityObserver for ManualObserver {
    fn observe(
        &self,
        section: &str,
        _options: ObserveOptions,
        sink: VisibilitySink,
    ) -> Result<ObservationHandle, ObserveError> {
        self.sinks.lock().push((section.to_owned(), sink));
        Ok(ObservationHandle::detached())
    }
}
