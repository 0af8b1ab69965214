//! Kernel utilities shared across slices.
//! Keep this crate lightweight: today it owns layered configuration loading.
//!
//! ## Config loading (non-wasm)
//! ```rust,ignore
//! use folio_kernel::config::load_folio_config;
//!
//! let cfg = load_folio_config(Some("config/local.toml")).unwrap_or_default();
//! assert!(cfg.probe.narrow_breakpoint_px > 0);
//! ```
#[cfg(not(target_arch = "wasm32"))]
pub mod config;

pub use folio_domain as domain;
