//! # Capability Prober
//!
//! Reads device, viewport, network and motion-preference signals and turns them into a
//! [`CapabilityProfile`]. The profile is recomputed on viewport resize and pushed to
//! subscribers; everything downstream (feature enablement, module loading, section
//! mounting) keys off it.
//!
//! Probing never fails. Each signal has a default used when the runtime does not expose it
//! or reading it errors:
//!
//! | Signal              | Default            |
//! |---------------------|--------------------|
//! | viewport width      | wide (not narrow)  |
//! | effective network   | fast               |
//! | device pixel ratio  | `1.0`              |
//! | touch support       | `false`            |
//! | user agent          | no mobile token    |
//! | reduced motion      | `false`            |
//!
//! ## Example
//!
//! ```rust
//! use folio_capability::CapabilityProber;
//! use folio_domain::capability::EnvironmentSnapshot;
//! use folio_domain::config::ProbeConfig;
//!
//! let env = EnvironmentSnapshot {
//!     viewport_width: Some(400),
//!     touch_support: Some(true),
//!     ..Default::default()
//! };
//! let prober = CapabilityProber::new(env, ProbeConfig::default());
//!
//! let profile = prober.current();
//! assert!(profile.is_narrow_viewport);
//! assert!(!profile.enablement().animations_enabled);
//! ```

mod debounce;
mod error;
mod performance;
mod prober;
mod signals;

pub use debounce::ResizeDebouncer;
pub use error::{CapabilityError, CapabilityErrorExt};
pub use performance::{PerformanceAssessment, PerformanceHint, assess, preloader_delay};
pub use prober::{CapabilityProber, Subscription, derive_profile};
pub use signals::{EnvironmentSignals, ScriptedEnvironment};

pub use folio_domain::capability::{CapabilityProfile, EnvironmentSnapshot, FeatureEnablement};
