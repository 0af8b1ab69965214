use crate::observer::{ObservationHandle, ObserveOptions, VisibilityObserver, VisibilitySink};
use folio_domain::config::{SectionDefaults, SectionSpec};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Mount state of a section. Only [`Section::unmount`] steps back, from `Observing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionPhase {
    Unobserved,
    Observing,
    /// Terminal: real content is rendered for the rest of the session.
    Triggered,
}

/// Latest visibility facts for a section.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SectionVisibility {
    pub is_currently_intersecting: bool,
    /// One-way latch, set by the first intersecting event.
    pub has_ever_been_visible: bool,
}

/// Lightweight stand-in rendered until a section triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Reserved height, so mounting the real content does not shift the layout.
    pub min_height_px: u32,
    /// Caller-supplied fallback text; `None` renders the generic spinner.
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered<V> {
    Content(V),
    Placeholder(Placeholder),
}

impl<V> Rendered<V> {
    #[must_use]
    pub const fn is_content(&self) -> bool {
        matches!(self, Self::Content(_))
    }

    pub fn content(self) -> Option<V> {
        match self {
            Self::Content(view) => Some(view),
            Self::Placeholder(_) => None,
        }
    }
}

/// Per-section configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionOptions {
    /// Render immediately, without observing.
    pub priority: bool,
    pub observe: ObserveOptions,
    pub placeholder: Placeholder,
}

impl SectionOptions {
    /// Options for a configured section. Priority sections get the wider margin.
    #[must_use]
    pub fn from_spec(spec: &SectionSpec, defaults: &SectionDefaults) -> Self {
        Self {
            priority: spec.priority,
            observe: ObserveOptions {
                threshold: defaults.threshold,
                root_margin_px: if spec.priority {
                    defaults.priority_root_margin_px
                } else {
                    defaults.root_margin_px
                },
            },
            placeholder: Placeholder {
                min_height_px: defaults.placeholder_min_height_px,
                message: spec.placeholder.clone(),
            },
        }
    }
}

impl Default for SectionOptions {
    fn default() -> Self {
        Self::from_spec(&SectionSpec::new(String::new()), &SectionDefaults::default())
    }
}

#[derive(Debug)]
struct SectionState {
    phase: SectionPhase,
    visibility: SectionVisibility,
    observation: Option<ObservationHandle>,
}

pub(crate) struct SectionInner {
    id: String,
    options: SectionOptions,
    state: Mutex<SectionState>,
}

/// A page region whose content mounts once it nears the viewport and then stays mounted.
///
/// Cheap to clone; clones share state. The observation is released when the section
/// triggers, on [`Section::unmount`], or when the last clone is dropped.
#[derive(Clone)]
pub struct Section {
    inner: Arc<SectionInner>,
}

impl fmt::Debug for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section")
            .field("id", &self.inner.id)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

impl Section {
    /// Creates a section. Priority sections start [`SectionPhase::Triggered`].
    pub fn new(id: impl Into<String>, options: SectionOptions) -> Self {
        let (phase, visibility) = if options.priority {
            let visibility =
                SectionVisibility { is_currently_intersecting: false, has_ever_been_visible: true };
            (SectionPhase::Triggered, visibility)
        } else {
            (SectionPhase::Unobserved, SectionVisibility::default())
        };

        Self {
            inner: Arc::new(SectionInner {
                id: id.into(),
                options,
                state: Mutex::new(SectionState { phase, visibility, observation: None }),
            }),
        }
    }

    #[must_use]
    pub fn from_spec(spec: &SectionSpec, defaults: &SectionDefaults) -> Self {
        Self::new(spec.id.clone(), SectionOptions::from_spec(spec, defaults))
    }

    /// Starts observing. Without an observer, or when it refuses, the section fails open and
    /// triggers immediately. Calling it again after the first mount does nothing.
    pub fn mount(&self, observer: Option<&dyn VisibilityObserver>) {
        {
            let mut state = self.inner.state.lock();
            if state.phase != SectionPhase::Unobserved {
                return;
            }
            state.phase = SectionPhase::Observing;
        }

        let Some(observer) = observer else {
            debug!(section = %self.inner.id, "No visibility observer; mounting immediately");
            self.inner.trigger();
            return;
        };

        let sink = VisibilitySink { section: Arc::downgrade(&self.inner) };
        match observer.observe(&self.inner.id, self.inner.options.observe, sink) {
            Ok(handle) => {
                let mut state = self.inner.state.lock();
                if state.phase == SectionPhase::Observing {
                    state.observation = Some(handle);
                    debug!(
                        section = %self.inner.id,
                        margin = self.inner.options.observe.root_margin_px,
                        "Observing section"
                    );
                } else {
                    // Triggered from inside `observe`; release after unlocking.
                    drop(state);
                    drop(handle);
                }
            },
            Err(error) => {
                warn!(
                    section = %self.inner.id,
                    %error,
                    "Visibility observation failed; mounting immediately"
                );
                self.inner.trigger();
            },
        }
    }

    /// The real content once triggered, the placeholder before.
    pub fn render<V>(&self, content: impl FnOnce() -> V) -> Rendered<V> {
        if self.is_triggered() {
            Rendered::Content(content())
        } else {
            Rendered::Placeholder(self.inner.options.placeholder.clone())
        }
    }

    /// Releases the observation. A section that has not triggered yet goes back to
    /// [`SectionPhase::Unobserved`] so a later [`Section::mount`] can observe it again;
    /// a triggered section stays triggered.
    pub fn unmount(&self) {
        let released = {
            let mut state = self.inner.state.lock();
            if state.phase == SectionPhase::Observing {
                state.phase = SectionPhase::Unobserved;
                state.visibility.is_currently_intersecting = false;
            }
            state.observation.take()
        };

        if released.is_some() {
            debug!(section = %self.inner.id, "Observation released");
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    #[must_use]
    pub fn options(&self) -> &SectionOptions {
        &self.inner.options
    }

    #[must_use]
    pub fn phase(&self) -> SectionPhase {
        self.inner.state.lock().phase
    }

    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.phase() == SectionPhase::Triggered
    }

    #[must_use]
    pub fn visibility(&self) -> SectionVisibility {
        self.inner.state.lock().visibility
    }

    /// `true` while an observation handle is held.
    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.inner.state.lock().observation.is_some()
    }
}

impl SectionInner {
    pub(crate) fn on_visibility(&self, is_intersecting: bool) {
        let released = {
            let mut state = self.state.lock();
            state.visibility.is_currently_intersecting = is_intersecting;
            if !is_intersecting || state.phase != SectionPhase::Observing {
                return;
            }
            Self::latch(&mut state)
        };

        info!(section = %self.id, "Section triggered");
        drop(released);
    }

    /// Fail-open path.
    fn trigger(&self) {
        let released = Self::latch(&mut self.state.lock());
        info!(section = %self.id, "Section triggered");
        drop(released);
    }

    fn latch(state: &mut SectionState) -> Option<ObservationHandle> {
        state.phase = SectionPhase::Triggered;
        state.visibility.has_ever_been_visible = true;
        state.observation.take()
    }
}
