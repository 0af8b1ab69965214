use crate::error::CapabilityError;
use folio_domain::capability::{EffectiveConnectionType, EnvironmentSnapshot};
use parking_lot::RwLock;
use std::sync::Arc;

/// Source of raw environment signals.
///
/// `Ok(None)` means the runtime does not expose the signal; `Err` means it exists but could
/// not be read. Both are mapped to the documented default by the prober.
pub trait EnvironmentSignals: Send + Sync {
    fn viewport_width(&self) -> Result<Option<u32>, CapabilityError>;
    fn effective_connection(&self) -> Result<Option<EffectiveConnectionType>, CapabilityError>;
    fn device_pixel_ratio(&self) -> Result<Option<f64>, CapabilityError>;
    fn touch_support(&self) -> Result<Option<bool>, CapabilityError>;
    fn user_agent(&self) -> Result<Option<String>, CapabilityError>;
    fn prefers_reduced_motion(&self) -> Result<Option<bool>, CapabilityError>;

    fn hardware_concurrency(&self) -> Result<Option<u32>, CapabilityError> {
        Ok(None)
    }

    fn heap_limit_bytes(&self) -> Result<Option<u64>, CapabilityError> {
        Ok(None)
    }
}

/// A frozen snapshot answers every query from its own fields.
impl EnvironmentSignals for EnvironmentSnapshot {
    fn viewport_width(&self) -> Result<Option<u32>, CapabilityError> {
        Ok(self.viewport_width)
    }

    fn effective_connection(&self) -> Result<Option<EffectiveConnectionType>, CapabilityError> {
        Ok(self.effective_connection)
    }

    fn device_pixel_ratio(&self) -> Result<Option<f64>, CapabilityError> {
        Ok(self.device_pixel_ratio)
    }

    fn touch_support(&self) -> Result<Option<bool>, CapabilityError> {
        Ok(self.touch_support)
    }

    fn user_agent(&self) -> Result<Option<String>, CapabilityError> {
        Ok(self.user_agent.clone())
    }

    fn prefers_reduced_motion(&self) -> Result<Option<bool>, CapabilityError> {
        Ok(self.prefers_reduced_motion)
    }

    fn hardware_concurrency(&self) -> Result<Option<u32>, CapabilityError> {
        Ok(self.hardware_concurrency)
    }

    fn heap_limit_bytes(&self) -> Result<Option<u64>, CapabilityError> {
        Ok(self.heap_limit_bytes)
    }
}

/// Mutable environment shared between a driver (shell, test) and the prober.
///
/// Cloning shares the same snapshot, so a resize applied through one handle is visible to
/// the prober holding another.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEnvironment {
    snapshot: Arc<RwLock<EnvironmentSnapshot>>,
}

impl ScriptedEnvironment {
    #[must_use]
    pub fn new(snapshot: EnvironmentSnapshot) -> Self {
        Self { snapshot: Arc::new(RwLock::new(snapshot)) }
    }

    /// Applies `change` to the shared snapshot.
    pub fn update(&self, change: impl FnOnce(&mut EnvironmentSnapshot)) {
        change(&mut self.snapshot.write());
    }

    pub fn resize(&self, width: u32) {
        self.update(|s| s.viewport_width = Some(width));
    }

    #[must_use]
    pub fn snapshot(&self) -> EnvironmentSnapshot {
        self.snapshot.read().clone()
    }
}

impl EnvironmentSignals for ScriptedEnvironment {
    fn viewport_width(&self) -> Result<Option<u32>, CapabilityError> {
        Ok(self.snapshot.read().viewport_width)
    }

    fn effective_connection(&self) -> Result<Option<EffectiveConnectionType>, CapabilityError> {
        Ok(self.snapshot.read().effective_connection)
    }

    fn device_pixel_ratio(&self) -> Result<Option<f64>, CapabilityError> {
        Ok(self.snapshot.read().device_pixel_ratio)
    }

    fn touch_support(&self) -> Result<Option<bool>, CapabilityError> {
        Ok(self.snapshot.read().touch_support)
    }

    fn user_agent(&self) -> Result<Option<String>, CapabilityError> {
        Ok(self.snapshot.read().user_agent.clone())
    }

    fn prefers_reduced_motion(&self) -> Result<Option<bool>, CapabilityError> {
        Ok(self.snapshot.read().prefers_reduced_motion)
    }

    fn hardware_concurrency(&self) -> Result<Option<u32>, CapabilityError> {
        Ok(self.snapshot.read().hardware_concurrency)
    }

    fn heap_limit_bytes(&self) -> Result<Option<u64>, CapabilityError> {
        Ok(self.snapshot.read().heap_limit_bytes)
    }
}
