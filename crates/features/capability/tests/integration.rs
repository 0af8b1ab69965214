pub mod fixtures;

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use folio_capability::*;
    use folio_domain::capability::EffectiveConnectionType;
    use folio_domain::config::ProbeConfig;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn desktop_enables_everything() {
        let prober = CapabilityProber::new(desktop(), ProbeConfig::default());
        let enablement = prober.current().enablement();

        assert!(enablement.show_decorative_scene);
        assert!(enablement.animations_enabled);
    }

    #[test]
    fn narrow_touch_device_disables_everything() {
        let env = EnvironmentSnapshot {
            viewport_width: Some(375),
            touch_support: Some(true),
            ..desktop()
        };
        let prober = CapabilityProber::new(env, ProbeConfig::default());
        let profile = prober.current();

        assert!(profile.is_narrow_viewport);
        assert!(profile.is_touch_or_small_screen);
        assert_eq!(profile.enablement(), FeatureEnablement::default());
    }

    #[test]
    fn reduced_motion_wins_over_a_rich_desktop() {
        let env = EnvironmentSnapshot { prefers_reduced_motion: Some(true), ..desktop() };
        let enablement = CapabilityProber::new(env, ProbeConfig::default()).current().enablement();

        assert!(!enablement.show_decorative_scene);
        assert!(!enablement.animations_enabled);
    }

    #[test]
    fn unreadable_signals_fall_back_to_defaults() {
        let prober = CapabilityProber::new(BrokenSignals, ProbeConfig::default());
        let profile = prober.current();

        assert!(!profile.is_narrow_viewport);
        assert!(!profile.is_touch_or_small_screen);
        assert!(profile.network_is_fast);
        assert!(profile.pixel_density_is_modest);
        assert!(!profile.user_prefers_reduced_motion);
        assert_eq!(prober.snapshot(), EnvironmentSnapshot::default());
    }

    #[test]
    fn configured_fast_connections_are_honored() {
        let config = ProbeConfig {
            fast_connections: vec![
                EffectiveConnectionType::Cellular3g,
                EffectiveConnectionType::Cellular4g,
            ],
            ..ProbeConfig::default()
        };
        let env = EnvironmentSnapshot {
            effective_connection: Some(EffectiveConnectionType::Cellular3g),
            ..desktop()
        };

        assert!(CapabilityProber::new(env, config).current().network_is_fast);
    }

    #[test]
    fn resize_recomputes_and_notifies() {
        let env = ScriptedEnvironment::new(desktop());
        let prober = CapabilityProber::new(env.clone(), ProbeConfig::default());
        let seen = Arc::new(recorder::Recorder::default());

        let sink = Arc::clone(&seen);
        let _subscription = prober.subscribe(move |profile| sink.push(*profile));

        env.resize(600);
        let profile = prober.handle_resize();

        assert!(profile.is_narrow_viewport);
        assert_eq!(prober.current(), profile);
        assert_eq!(seen.take(), vec![profile]);
    }

    #[test]
    fn dropping_the_subscription_stops_notifications() {
        let prober = CapabilityProber::new(desktop(), ProbeConfig::default());
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let subscription = prober.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(prober.listener_count(), 1);

        prober.handle_resize();
        drop(subscription);
        prober.handle_resize();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(prober.listener_count(), 0);
    }

    #[test]
    fn subscription_outliving_the_prober_is_harmless() {
        let prober = CapabilityProber::new(desktop(), ProbeConfig::default());
        let subscription = prober.subscribe(|_| {});
        drop(prober);
        subscription.unsubscribe();
    }

    #[tokio::test(start_paused = true)]
    async fn resize_bursts_are_coalesced() {
        let env = ScriptedEnvironment::new(desktop());
        let prober = CapabilityProber::new(env.clone(), ProbeConfig::default());
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let _subscription = prober.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let debouncer = ResizeDebouncer::new(prober.clone(), Duration::from_millis(250));
        for width in [1200, 1000, 800, 700] {
            env.resize(width);
            debouncer.trigger();
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0, "window still open");

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(prober.current().is_narrow_viewport);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_debouncer_cancels_pending_recompute() {
        let env = ScriptedEnvironment::new(desktop());
        let prober = CapabilityProber::new(env.clone(), ProbeConfig::default());

        let debouncer = ResizeDebouncer::new(prober.clone(), Duration::from_millis(250));
        env.resize(500);
        debouncer.trigger();
        drop(debouncer);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!prober.current().is_narrow_viewport);
    }

    #[test]
    fn zero_window_recomputes_immediately() {
        let env = ScriptedEnvironment::new(desktop());
        let prober = CapabilityProber::new(env.clone(), ProbeConfig::default());
        let debouncer = ResizeDebouncer::new(prober.clone(), Duration::ZERO);

        env.resize(320);
        debouncer.trigger();
        assert!(prober.current().is_narrow_viewport);
    }

    mod recorder {
        use folio_capability::CapabilityProfile;
        use parking_lot::Mutex;

        #[derive(Default)]
        pub struct Recorder(Mutex<Vec<CapabilityProfile>>);

        impl Recorder {
            pub fn push(&self, profile: CapabilityProfile) {
                self.0.lock().push(profile);
            }

            pub fn take(&self) -> Vec<CapabilityProfile> {
                std::mem::take(&mut *self.0.lock())
            }
        }
    }
}
