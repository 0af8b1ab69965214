use folio_sections::{
    ObservationHandle, ObserveError, ObserveOptions, VisibilityObserver, VisibilitySink,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// How the observer answers `observe` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Working,
    Unsupported,
    /// Reports the section as intersecting from inside `observe`, like an in-view element.
    AlreadyVisible,
}

/// Manual stand-in for the runtime's intersection observer.
#[derive(Debug)]
pub struct ScriptedObserver {
    mode: Mode,
    sinks: Mutex<HashMap<String, VisibilitySink>>,
    options: Mutex<HashMap<String, ObserveOptions>>,
    released: Arc<AtomicUsize>,
}

impl ScriptedObserver {
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            sinks: Mutex::new(HashMap::new()),
            options: Mutex::new(HashMap::new()),
            released: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Delivers one event to `section`, if it is being watched.
    pub fn emit(&self, section: &str, is_intersecting: bool) {
        let sink = self.sinks.lock().get(section).cloned();
        if let Some(sink) = sink {
            sink.notify(is_intersecting);
        }
    }

    #[must_use]
    pub fn options_for(&self, section: &str) -> Option<ObserveOptions> {
        self.options.lock().get(section).copied()
    }

    #[must_use]
    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

impl VisibilityObserver for ScriptedObserver {
    fn observe(
        &self,
        section: &str,
        options: ObserveOptions,
        sink: VisibilitySink,
    ) -> Result<ObservationHandle, ObserveError> {
        if self.mode == Mode::Unsupported {
            let context = Some("no IntersectionObserver".into());
            return Err(ObserveError::Unsupported { context });
        }

        self.options.lock().insert(section.to_owned(), options);
        self.sinks.lock().insert(section.to_owned(), sink.clone());
        if self.mode == Mode::AlreadyVisible {
            sink.notify(true);
        }

        let released = Arc::clone(&self.released);
        Ok(ObservationHandle::new(move || {
            released.fetch_add(1, Ordering::SeqCst);
        }))
    }
}
