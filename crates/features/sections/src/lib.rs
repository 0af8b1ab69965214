//! # Section Mounter
//!
//! Defers mounting of below-the-fold regions until they approach the viewport, then keeps
//! them mounted for the rest of the session.
//!
//! Each [`Section`] moves `Unobserved -> Observing -> Triggered`; `Triggered` is terminal.
//! Unmounting a section that is still observing puts it back to `Unobserved`. Priority
//! sections start triggered. When the runtime cannot observe visibility the section fails
//! open and triggers on mount, so content is never hidden for good.
//!
//! [`ErrorBoundary`] supervises a region's rendering and swaps in a fallback when the view
//! errors or panics.
//!
//! ## Example
//!
//! ```rust
//! use folio_sections::{ObservationHandle, ObserveError, ObserveOptions, Rendered, Section,
//!     SectionOptions, SectionPhase, VisibilityObserver, VisibilitySink};
//! use parking_lot::Mutex;
//!
//! #[derive(Default)]
//! struct Recorder(Mutex<Vec<VisibilitySink>>);
//!
//! impl VisibilityObserver for Recorder {
//!     fn observe(&self, _: &str, _: ObserveOptions, sink: VisibilitySink)
//!         -> Result<ObservationHandle, ObserveError> {
//!         self.0.lock().push(sink);
//!         Ok(ObservationHandle::detached())
//!     }
//! }
//!
//! let observer = Recorder::default();
//! let section = Section::new("projects", SectionOptions::default());
//! section.mount(Some(&observer));
//! assert!(matches!(section.render(|| "cards"), Rendered::Placeholder(_)));
//!
//! observer.0.lock()[0].notify(true);
//! assert_eq!(section.phase(), SectionPhase::Triggered);
//! assert_eq!(section.render(|| "cards").content(), Some("cards"));
//! ```

mod boundary;
mod error;
mod observer;
mod section;

pub use boundary::{ErrorBoundary, ErrorContext, Fallback, Guarded};
pub use error::{BoundaryError, BoundaryErrorExt, ObserveError, ObserveErrorExt};
pub use observer::{ObservationHandle, ObserveOptions, VisibilityObserver, VisibilitySink};
pub use section::{Placeholder, Rendered, Section, SectionOptions, SectionPhase, SectionVisibility};
