//! Identifiers shared between configuration, the loader and the page root.

/// Decorative 3D scene shown behind the hero region.
pub const HERO_SCENE: &str = "hero-scene";
/// Tweening engine used for entrance animations.
pub const ANIMATION_ENGINE: &str = "animation-engine";
/// Scroll-driven sequencing plugin; registers itself on the animation engine.
pub const SEQUENCER: &str = "sequencer";

pub const SECTION_HOME: &str = "home";
pub const SECTION_ABOUT: &str = "about";
pub const SECTION_PROJECTS: &str = "projects";
pub const SECTION_TECH_STACK: &str = "tech-stack";
pub const SECTION_RESUME: &str = "resume";
pub const SECTION_CONTACT: &str = "contact";

/// User-agent tokens that mark a handheld device (matched case-insensitively).
pub const MOBILE_USER_AGENT_TOKENS: &[&str] =
    &["android", "webos", "iphone", "ipad", "ipod", "blackberry", "iemobile", "opera mini"];
