use folio_capability::{CapabilityError, EnvironmentSignals};
use folio_domain::capability::{EffectiveConnectionType, EnvironmentSnapshot};

/// Desktop-class environment: wide, fast, low density, no motion preference.
#[must_use]
pub fn desktop() -> EnvironmentSnapshot {
    EnvironmentSnapshot {
        viewport_width: Some(1440),
        effective_connection: Some(EffectiveConnectionType::Cellular4g),
        device_pixel_ratio: Some(1.0),
        touch_support: Some(false),
        user_agent: Some("Mozilla/5.0 (Windows NT 10.0; Win64; x64)".to_owned()),
        prefers_reduced_motion: Some(false),
        hardware_concurrency: Some(8),
        heap_limit_bytes: Some(4 << 30),
    }
}

/// Signal source where every query fails, the way a hostile or partial runtime behaves.
#[derive(Debug, Default)]
pub struct BrokenSignals;

fn unreadable<T>(signal: &'static str) -> Result<Option<T>, CapabilityError> {
    Err(CapabilityError::Unreadable { signal, message: "query threw".into(), context: None })
}

impl EnvironmentSignals for BrokenSignals {
    fn viewport_width(&self) -> Result<Option<u32>, CapabilityError> {
        unreadable("viewport width")
    }

    fn effective_connection(&self) -> Result<Option<EffectiveConnectionType>, CapabilityError> {
        unreadable("effective connection")
    }

    fn device_pixel_ratio(&self) -> Result<Option<f64>, CapabilityError> {
        unreadable("device pixel ratio")
    }

    fn touch_support(&self) -> Result<Option<bool>, CapabilityError> {
        unreadable("touch support")
    }

    fn user_agent(&self) -> Result<Option<String>, CapabilityError> {
        unreadable("user agent")
    }

    fn prefers_reduced_motion(&self) -> Result<Option<bool>, CapabilityError> {
        unreadable("reduced motion")
    }
}
