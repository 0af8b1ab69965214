//! # Folio Shell
//!
//! Command-line harness around the [`folio::Page`] composition root. It stands in for the
//! browser: the device is described by flags, modules arrive over a simulated network and
//! scrolling is scripted.

pub mod args;
pub mod session;

pub use args::Cli;
pub use session::{SessionOptions, SessionReport, run};
