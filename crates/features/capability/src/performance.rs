use folio_domain::capability::{CapabilityProfile, EnvironmentSnapshot};
use folio_domain::config::PreloaderConfig;
use std::time::Duration;

/// Heap limit below which a device counts as memory constrained (1 GiB).
const LOW_HEAP_LIMIT_BYTES: u64 = 1 << 30;
/// Fewer logical cores than this counts as a weak CPU.
const LOW_CORE_COUNT: u32 = 4;

/// Advice emitted for a constrained device. Informational: enablement is not changed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PerformanceHint {
    SlowConnection,
    LowMemory,
    LowCoreCount,
    DisableDecorativeScene,
    ReduceParticles,
    EnablePerformanceMode,
}

impl PerformanceHint {
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::SlowConnection => "connection reported as slow-2g, 2g or 3g",
            Self::LowMemory => "heap limit below 1 GiB",
            Self::LowCoreCount => "fewer than 4 logical cores",
            Self::DisableDecorativeScene => "consider disabling 3D animations",
            Self::ReduceParticles => "reduce particle count",
            Self::EnablePerformanceMode => "enable performance mode",
        }
    }
}

/// Outcome of [`assess`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerformanceAssessment {
    pub low_performance: bool,
    pub hints: Vec<PerformanceHint>,
}

/// Classifies the device behind `snapshot`.
///
/// A device is low-performance when any reported signal is constrained; signals the runtime
/// does not expose never count against it.
#[must_use]
pub fn assess(snapshot: &EnvironmentSnapshot) -> PerformanceAssessment {
    let mut hints = Vec::new();

    if snapshot.effective_connection.is_some_and(|kind| kind.is_slow()) {
        hints.push(PerformanceHint::SlowConnection);
    }
    if snapshot.heap_limit_bytes.is_some_and(|limit| limit < LOW_HEAP_LIMIT_BYTES) {
        hints.push(PerformanceHint::LowMemory);
    }
    if snapshot.hardware_concurrency.is_some_and(|cores| cores < LOW_CORE_COUNT) {
        hints.push(PerformanceHint::LowCoreCount);
    }

    let low_performance = !hints.is_empty();
    if low_performance {
        hints.extend([
            PerformanceHint::DisableDecorativeScene,
            PerformanceHint::ReduceParticles,
            PerformanceHint::EnablePerformanceMode,
        ]);
    }

    PerformanceAssessment { low_performance, hints }
}

/// How long the intro preloader stays up: shorter on handheld devices.
#[must_use]
pub const fn preloader_delay(profile: &CapabilityProfile, config: &PreloaderConfig) -> Duration {
    if profile.is_touch_or_small_screen {
        Duration::from_millis(config.mobile_ms)
    } else {
        Duration::from_millis(config.desktop_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_domain::capability::EffectiveConnectionType;

    #[test]
    fn unknown_signals_are_not_penalized() {
        let assessment = assess(&EnvironmentSnapshot::default());
        assert!(!assessment.low_performance);
        assert!(assessment.hints.is_empty());
    }

    #[test]
    fn each_constraint_is_reported() {
        let snapshot = EnvironmentSnapshot {
            effective_connection: Some(EffectiveConnectionType::Slow2g),
            heap_limit_bytes: Some(512 * 1024 * 1024),
            hardware_concurrency: Some(2),
            ..EnvironmentSnapshot::default()
        };

        let assessment = assess(&snapshot);
        assert!(assessment.low_performance);
        assert_eq!(
            &assessment.hints[..3],
            &[
                PerformanceHint::SlowConnection,
                PerformanceHint::LowMemory,
                PerformanceHint::LowCoreCount,
            ]
        );
        assert!(assessment.hints.contains(&PerformanceHint::DisableDecorativeScene));
    }

    #[test]
    fn fast_network_with_enough_cores_is_fine() {
        let snapshot = EnvironmentSnapshot {
            effective_connection: Some(EffectiveConnectionType::Cellular4g),
            hardware_concurrency: Some(8),
            heap_limit_bytes: Some(4 << 30),
            ..EnvironmentSnapshot::default()
        };
        assert!(!assess(&snapshot).low_performance);
    }

    #[test]
    fn preloader_is_shorter_on_handhelds() {
        let config = PreloaderConfig::default();
        let handheld = CapabilityProfile { is_touch_or_small_screen: true, ..Default::default() };

        assert_eq!(preloader_delay(&handheld, &config), Duration::from_millis(150));
        assert_eq!(
            preloader_delay(&CapabilityProfile::default(), &config),
            Duration::from_millis(500)
        );
    }
}
