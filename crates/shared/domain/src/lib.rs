//! # Domain Models
//!
//! Pure types shared by every Folio crate: the environment snapshot, the derived capability
//! profile and feature enablement, module/section identifiers and the configuration tree.
//! Keep it lean: no I/O, no async, no logging. Only data and the pure helpers that derive
//! one value from another.

pub mod capability;
pub mod config;
pub mod constants;
