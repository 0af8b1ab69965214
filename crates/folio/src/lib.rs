//! Facade crate for Folio features and shared modules.
//! Re-exports domain/kernel primitives and composes the feature slices into a [`Page`].
//! Keep this crate thin: it wires other crates together, the behavior lives in the slices.
//!
//! ## Usage
//! - Build a [`Page`] with [`Page::builder`], giving it the environment signals, a module
//!   source and (optionally) a visibility observer.
//! - Forward viewport resizes to [`Page::handle_resize`] or [`Page::schedule_resize`].

mod error;
mod page;

pub use error::{PageError, PageErrorExt};
pub use folio_domain as domain;
pub use folio_kernel as kernel;
pub use page::{HeroEnhancements, Page, PageBuilder};

/// Feature slices, re-exported for applications.
pub mod features {
    pub use folio_capability as capability;
    pub use folio_catalog as catalog;
    pub use folio_loader as loader;
    pub use folio_sections as sections;
}
