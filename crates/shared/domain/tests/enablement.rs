use folio_domain::capability::{CapabilityFlags, CapabilityProfile, FeatureEnablement};
use proptest::prelude::*;

fn any_profile() -> impl Strategy<Value = CapabilityProfile> {
    (0u32..32).prop_map(|bits| CapabilityProfile::from(CapabilityFlags::from_bits_truncate(bits)))
}

proptest! {
    #[test]
    fn reduced_motion_disables_all_enhancements(mut profile in any_profile()) {
        profile.user_prefers_reduced_motion = true;
        let enablement = FeatureEnablement::from_profile(&profile);

        prop_assert!(!enablement.animations_enabled);
        prop_assert!(!enablement.show_decorative_scene);
    }

    #[test]
    fn touch_or_small_screen_never_shows_scene(mut profile in any_profile()) {
        profile.is_touch_or_small_screen = true;
        prop_assert!(!FeatureEnablement::from_profile(&profile).show_decorative_scene);
    }

    #[test]
    fn scene_implies_animations(profile in any_profile()) {
        let enablement = FeatureEnablement::from_profile(&profile);
        prop_assert!(!enablement.show_decorative_scene || enablement.animations_enabled);
    }

    #[test]
    fn flags_preserve_every_field(profile in any_profile()) {
        prop_assert_eq!(CapabilityProfile::from(profile.flags()), profile);
    }
}

#[test]
fn slow_network_keeps_animations_but_drops_scene() {
    let profile = CapabilityProfile {
        network_is_fast: false,
        pixel_density_is_modest: true,
        ..CapabilityProfile::default()
    };

    let enablement = profile.enablement();
    assert!(enablement.animations_enabled);
    assert!(!enablement.show_decorative_scene);
}
