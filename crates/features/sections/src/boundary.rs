use crate::error::BoundaryError;
use parking_lot::Mutex;
use std::any::Any;
use std::borrow::Cow;
use std::fmt::{self, Display};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::error;

const DEFAULT_FALLBACK: &str = "Something went wrong while rendering this section.";

type ErrorHook = Arc<dyn Fn(&BoundaryError, &ErrorContext) + Send + Sync>;

/// Where a caught failure happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Name of the boundary that caught it.
    pub boundary: String,
    /// How many failures this boundary has caught, including this one.
    pub occurrence: u32,
}

/// Substitute view shown by a tripped boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallback {
    pub message: String,
    /// Error text, only when the boundary was built with `show_details`.
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<V> {
    View(V),
    Fallback(Fallback),
}

impl<V> Guarded<V> {
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    pub fn view(self) -> Option<V> {
        match self {
            Self::View(view) => Some(view),
            Self::Fallback(_) => None,
        }
    }
}

/// Supervises a region: a failing or panicking view is replaced by a fallback instead of
/// propagating to the page.
///
/// Once tripped, the boundary keeps rendering the fallback without running the view until
/// [`ErrorBoundary::retry`] is called. Panics are only caught when the binary unwinds.
pub struct ErrorBoundary {
    name: String,
    fallback: Cow<'static, str>,
    show_details: bool,
    on_error: Option<ErrorHook>,
    tripped: Mutex<Option<BoundaryError>>,
    caught: AtomicU32,
}

impl fmt::Debug for ErrorBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorBoundary")
            .field("name", &self.name)
            .field("tripped", &self.is_tripped())
            .finish_non_exhaustive()
    }
}

impl ErrorBoundary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fallback: Cow::Borrowed(DEFAULT_FALLBACK),
            show_details: false,
            on_error: None,
            tripped: Mutex::new(None),
            caught: AtomicU32::new(0),
        }
    }

    #[must_use = "The boundary must be configured before it is used"]
    pub fn fallback(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.fallback = message.into();
        self
    }

    /// Includes the error text in the fallback. Meant for development builds.
    #[must_use = "The boundary must be configured before it is used"]
    pub const fn show_details(mut self, enabled: bool) -> Self {
        self.show_details = enabled;
        self
    }

    /// Called once per caught failure, after it has been logged.
    #[must_use = "The boundary must be configured before it is used"]
    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&BoundaryError, &ErrorContext) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(hook));
        self
    }

    /// Runs `view` unless the boundary is tripped.
    pub fn render<V, E>(&self, view: impl FnOnce() -> Result<V, E>) -> Guarded<V>
    where
        E: Display,
    {
        if let Some(error) = self.tripped.lock().as_ref() {
            return Guarded::Fallback(self.fallback_for(error));
        }

        let failure = match panic::catch_unwind(AssertUnwindSafe(view)) {
            Ok(Ok(rendered)) => return Guarded::View(rendered),
            Ok(Err(err)) => BoundaryError::View { message: err.to_string().into(), context: None },
            Err(payload) => {
                BoundaryError::Panicked { message: panic_message(&*payload), context: None }
            },
        };

        self.trip(failure)
    }

    /// Clears the tripped state so the next [`ErrorBoundary::render`] runs the view again.
    pub fn retry(&self) {
        self.tripped.lock().take();
    }

    #[must_use]
    pub fn is_tripped(&self) -> bool {
        self.tripped.lock().is_some()
    }

    /// The failure currently shown, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<BoundaryError> {
        self.tripped.lock().clone()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn trip<V>(&self, failure: BoundaryError) -> Guarded<V> {
        let context = ErrorContext {
            boundary: self.name.clone(),
            occurrence: self.caught.fetch_add(1, Ordering::Relaxed) + 1,
        };
        error!(
            boundary = %context.boundary,
            occurrence = context.occurrence,
            error = %failure,
            "Error boundary caught a failure"
        );

        if let Some(hook) = &self.on_error {
            hook(&failure, &context);
        }

        let fallback = self.fallback_for(&failure);
        *self.tripped.lock() = Some(failure);
        Guarded::Fallback(fallback)
    }

    fn fallback_for(&self, error: &BoundaryError) -> Fallback {
        Fallback {
            message: self.fallback.to_string(),
            details: self.show_details.then(|| error.to_string()),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> Cow<'static, str> {
    payload
        .downcast_ref::<&'static str>()
        .map(|s| Cow::Borrowed(*s))
        .or_else(|| payload.downcast_ref::<String>().map(|s| Cow::Owned(s.clone())))
        .unwrap_or(Cow::Borrowed("non-string panic payload"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn healthy_view_passes_through() {
        let boundary = ErrorBoundary::new("projects");
        let guarded = boundary.render(|| Ok::<_, String>(42));
        assert_eq!(guarded.view(), Some(42));
        assert!(!boundary.is_tripped());
    }

    #[test]
    fn error_result_trips_and_notifies() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let boundary = ErrorBoundary::new("contact")
            .fallback("Contact form unavailable")
            .on_error(move |error, context| sink.lock().push((error.to_string(), context.clone())));

        let guarded = boundary.render(|| Err::<(), _>("relay refused"));

        assert_eq!(
            guarded,
            Guarded::Fallback(Fallback {
                message: "Contact form unavailable".to_owned(),
                details: None,
            })
        );
        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "View failed: relay refused");
        assert_eq!(seen[0].1, ErrorContext { boundary: "contact".to_owned(), occurrence: 1 });
    }

    #[test]
    fn panics_are_caught_with_their_message() {
        let boundary = ErrorBoundary::new("resume").show_details(true);
        let guarded = boundary.render(|| -> Result<(), String> { panic!("pdf worker missing") });

        let Guarded::Fallback(fallback) = guarded else { panic!("expected fallback") };
        assert_eq!(fallback.details.as_deref(), Some("View panicked: pdf worker missing"));
        assert!(matches!(boundary.last_error(), Some(BoundaryError::Panicked { .. })));
    }

    #[test]
    fn tripped_boundary_skips_the_view_until_retry() {
        let boundary = ErrorBoundary::new("about");
        let runs = AtomicUsize::new(0);

        let _ = boundary.render(|| {
            runs.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>("boom")
        });
        let again = boundary.render(|| {
            runs.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(())
        });
        assert!(again.is_fallback());
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        boundary.retry();
        let recovered = boundary.render(|| {
            runs.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>("content")
        });
        assert_eq!(recovered.view(), Some("content"));
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }
}
