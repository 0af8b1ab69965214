//! # Progressive Module Loader
//!
//! Fetches heavy optional modules (the decorative scene, the animation engine and its
//! sequencing plugin) on demand, once per session, and only when the device can afford them.
//!
//! * **Single-flight**: concurrent requests for one name share a single fetch.
//! * **Sticky outcomes**: loaded modules are cached, failures are final and never retried.
//! * **Gated**: with animations disabled every request is a no-op.
//! * **Detached**: inside a Tokio runtime each load runs on its own task, so
//!   [`ModuleLoader::preload`] and dropped requests still settle.
//! * **Prerequisites**: a module may require others; they are loaded first, and the module is
//!   marked failed without being fetched when one of them fails.
//!
//! ## Example
//!
//! ```rust
//! use folio_domain::capability::FeatureEnablement;
//! use folio_domain::config::LoaderConfig;
//! use folio_loader::{LoaderError, Module, ModuleLoader, ModuleSource, ModuleStatus};
//! use futures::future::{BoxFuture, FutureExt};
//!
//! struct Bundled;
//!
//! impl ModuleSource for Bundled {
//!     fn fetch(&self, name: &str) -> BoxFuture<'static, Result<Module, LoaderError>> {
//!         let module = Module::new(name.to_owned(), ());
//!         async move { Ok(module) }.boxed()
//!     }
//! }
//!
//! let loader = ModuleLoader::new(Bundled, &LoaderConfig::default())?;
//! let rich = FeatureEnablement { show_decorative_scene: true, animations_enabled: true };
//! loader.set_enablement(&rich);
//!
//! futures::executor::block_on(loader.ensure_loaded(["sequencer"]));
//! assert_eq!(loader.status("animation-engine"), ModuleStatus::Loaded);
//! assert!(loader.get("sequencer").is_some());
//! # Ok::<(), LoaderError>(())
//! ```

mod error;
mod loader;
mod manifest;
mod module;

pub use error::{LoaderError, LoaderErrorExt};
pub use loader::{ModuleLoader, ModuleStatus};
pub use module::{Module, ModuleSource};
