use crate::error::ObserveError;
use crate::section::SectionInner;
use std::fmt;
use std::sync::Weak;

/// Parameters of one intersection observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserveOptions {
    /// Visible fraction (`0.0..=1.0`) at which the section counts as intersecting.
    pub threshold: f64,
    /// Pre-fetch distance: the section counts as intersecting this far before it scrolls in.
    pub root_margin_px: u32,
}

/// Viewport intersection capability.
///
/// Implementations deliver `(is_intersecting)` events through the sink until the returned
/// handle is dropped. Delivering from inside `observe` is allowed.
pub trait VisibilityObserver: Send + Sync {
    /// # Errors
    /// [`ObserveError::Unsupported`] when the runtime cannot observe at all, or
    /// [`ObserveError::Failed`] when this particular section cannot be watched.
    fn observe(
        &self,
        section: &str,
        options: ObserveOptions,
        sink: VisibilitySink,
    ) -> Result<ObservationHandle, ObserveError>;
}

/// Receives intersection events for one section. Cheap to clone; inert once the section is gone.
#[derive(Clone)]
pub struct VisibilitySink {
    pub(crate) section: Weak<SectionInner>,
}

impl VisibilitySink {
    pub fn notify(&self, is_intersecting: bool) {
        if let Some(section) = self.section.upgrade() {
            section.on_visibility(is_intersecting);
        }
    }

    /// `false` once the section has been dropped.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.section.strong_count() > 0
    }
}

impl fmt::Debug for VisibilitySink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibilitySink").field("attached", &self.is_attached()).finish()
    }
}

/// Live observation. Dropping it stops event delivery and frees the observer's resources.
#[must_use = "Dropping the handle immediately stops the observation"]
pub struct ObservationHandle {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl ObservationHandle {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self { release: Some(Box::new(release)) }
    }

    /// A handle with nothing to release.
    pub const fn detached() -> Self {
        Self { release: None }
    }
}

impl Drop for ObservationHandle {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for ObservationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservationHandle").field("active", &self.release.is_some()).finish()
    }
}
