use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

/// Effective connection type as reported by the Network Information API.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum EffectiveConnectionType {
    #[serde(rename = "slow-2g")]
    #[strum(serialize = "slow-2g")]
    Slow2g,
    #[serde(rename = "2g")]
    #[strum(serialize = "2g")]
    Cellular2g,
    #[serde(rename = "3g")]
    #[strum(serialize = "3g")]
    Cellular3g,
    #[serde(rename = "4g")]
    #[strum(serialize = "4g")]
    Cellular4g,
}

impl EffectiveConnectionType {
    /// Connection types treated as constrained by the performance assessment.
    #[must_use]
    pub const fn is_slow(self) -> bool {
        matches!(self, Self::Slow2g | Self::Cellular2g | Self::Cellular3g)
    }
}

/// Raw environment signals captured at one instant.
///
/// Every field is optional: a missing value means the runtime did not expose the signal.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentSnapshot {
    pub viewport_width: Option<u32>,
    pub effective_connection: Option<EffectiveConnectionType>,
    pub device_pixel_ratio: Option<f64>,
    pub touch_support: Option<bool>,
    pub user_agent: Option<String>,
    pub prefers_reduced_motion: Option<bool>,
    pub hardware_concurrency: Option<u32>,
    pub heap_limit_bytes: Option<u64>,
}

/// Capability flags derived from an [`EnvironmentSnapshot`].
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapabilityProfile {
    pub is_narrow_viewport: bool,
    pub is_touch_or_small_screen: bool,
    pub network_is_fast: bool,
    pub pixel_density_is_modest: bool,
    pub user_prefers_reduced_motion: bool,
}

impl CapabilityProfile {
    /// Packs the profile into a [`CapabilityFlags`] set.
    #[must_use]
    pub fn flags(&self) -> CapabilityFlags {
        let mut flags = CapabilityFlags::empty();
        flags.set(CapabilityFlags::NARROW_VIEWPORT, self.is_narrow_viewport);
        flags.set(CapabilityFlags::TOUCH_OR_SMALL_SCREEN, self.is_touch_or_small_screen);
        flags.set(CapabilityFlags::FAST_NETWORK, self.network_is_fast);
        flags.set(CapabilityFlags::MODEST_PIXEL_DENSITY, self.pixel_density_is_modest);
        flags.set(CapabilityFlags::REDUCED_MOTION, self.user_prefers_reduced_motion);
        flags
    }

    /// Derives the feature switches for this profile.
    #[must_use]
    pub const fn enablement(&self) -> FeatureEnablement {
        FeatureEnablement::from_profile(self)
    }
}

bitflags! {
    /// Compact representation of a [`CapabilityProfile`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct CapabilityFlags: u32 {
        const NARROW_VIEWPORT = 1 << 0;
        const TOUCH_OR_SMALL_SCREEN = 1 << 1;
        const FAST_NETWORK = 1 << 2;
        const MODEST_PIXEL_DENSITY = 1 << 3;
        const REDUCED_MOTION = 1 << 4;

        /// Flags of a wide, fast, low-density desktop without a motion preference.
        const RICH = Self::FAST_NETWORK.bits() | Self::MODEST_PIXEL_DENSITY.bits();
    }
}

impl From<CapabilityFlags> for CapabilityProfile {
    fn from(flags: CapabilityFlags) -> Self {
        Self {
            is_narrow_viewport: flags.contains(CapabilityFlags::NARROW_VIEWPORT),
            is_touch_or_small_screen: flags.contains(CapabilityFlags::TOUCH_OR_SMALL_SCREEN),
            network_is_fast: flags.contains(CapabilityFlags::FAST_NETWORK),
            pixel_density_is_modest: flags.contains(CapabilityFlags::MODEST_PIXEL_DENSITY),
            user_prefers_reduced_motion: flags.contains(CapabilityFlags::REDUCED_MOTION),
        }
    }
}

impl Serialize for CapabilityFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for CapabilityFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

/// Optional behavior switched on for a given [`CapabilityProfile`].
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureEnablement {
    /// Show the decorative 3D scene.
    pub show_decorative_scene: bool,
    /// Run entrance animations (and therefore fetch the animation modules).
    pub animations_enabled: bool,
}

impl FeatureEnablement {
    /// Pure mapping from capabilities to enabled features.
    #[must_use]
    pub const fn from_profile(profile: &CapabilityProfile) -> Self {
        let calm_large_screen =
            !profile.is_touch_or_small_screen && !profile.user_prefers_reduced_motion;

        Self {
            show_decorative_scene: calm_large_screen
                && profile.network_is_fast
                && profile.pixel_density_is_modest,
            animations_enabled: calm_large_screen,
        }
    }
}
