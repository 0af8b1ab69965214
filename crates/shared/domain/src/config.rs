use crate::capability::{EffectiveConnectionType, EnvironmentSnapshot};
use crate::constants::{
    ANIMATION_ENGINE, HERO_SCENE, MOBILE_USER_AGENT_TOKENS, SECTION_ABOUT, SECTION_CONTACT,
    SECTION_HOME, SECTION_PROJECTS, SECTION_RESUME, SECTION_TECH_STACK, SEQUENCER,
};
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration of a Folio page session.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FolioConfigInner {
    pub logging: LoggingConfig,
    pub probe: ProbeConfig,
    pub resize: ResizeConfig,
    pub preloader: PreloaderConfig,
    pub loader: LoaderConfig,
    pub sections: SectionDefaults,
    pub page: PageConfig,
    /// Scripted environment used by the shell when no live runtime is attached.
    pub environment: EnvironmentSnapshot,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct FolioConfig {
    #[serde(flatten, default)]
    inner: Arc<FolioConfigInner>,
}

impl Deref for FolioConfig {
    type Target = FolioConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for FolioConfig {
    fn deref_mut(&mut self) -> &mut FolioConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Tracing subscriber settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub env_filter: Option<String>,
    pub console: bool,
    /// Rolling log files are written here when set.
    pub directory: Option<PathBuf>,
    pub json: bool,
    pub max_files: usize,
}

/// Thresholds used to turn raw signals into capability flags.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Viewports strictly narrower than this are "narrow".
    pub narrow_breakpoint_px: u32,
    /// Pixel ratios up to and including this value are "modest".
    pub modest_pixel_ratio: f64,
    /// Connection types counted as fast. An unreported connection is always fast.
    pub fast_connections: Vec<EffectiveConnectionType>,
    /// Lowercase user-agent tokens that mark a handheld device.
    pub mobile_user_agents: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Trailing-edge debounce window for resize bursts; `0` recomputes on every event.
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PreloaderConfig {
    pub mobile_ms: u64,
    pub desktop_ms: u64,
}

/// Heavy optional modules known to the loader.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub modules: Vec<ModuleSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModuleSpec {
    pub name: String,
    /// Modules that must be loaded before this one is fetched.
    #[serde(default)]
    pub requires: Vec<String>,
}

/// Observation defaults applied to every gated section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SectionDefaults {
    pub threshold: f64,
    pub root_margin_px: u32,
    pub priority_root_margin_px: u32,
    pub placeholder_min_height_px: u32,
}

/// Regions of the single-page layout, in document order.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub sections: Vec<SectionSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionSpec {
    pub id: String,
    #[serde(default)]
    pub priority: bool,
    /// Placeholder text; `None` renders the generic spinner.
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl ModuleSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), requires: Vec::new() }
    }

    #[must_use]
    pub fn requires(mut self, name: impl Into<String>) -> Self {
        self.requires.push(name.into());
        self
    }
}

impl SectionSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), priority: false, placeholder: None }
    }

    #[must_use]
    pub const fn priority(mut self) -> Self {
        self.priority = true;
        self
    }

    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }
}

// --- Default ---

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            env_filter: None,
            console: true,
            directory: None,
            json: false,
            max_files: 10,
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            narrow_breakpoint_px: 768,
            modest_pixel_ratio: 2.0,
            fast_connections: vec![EffectiveConnectionType::Cellular4g],
            mobile_user_agents: MOBILE_USER_AGENT_TOKENS.iter().map(|&t| t.to_owned()).collect(),
        }
    }
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self { debounce_ms: 250 }
    }
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self { mobile_ms: 150, desktop_ms: 500 }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            modules: vec![
                ModuleSpec::new(HERO_SCENE),
                ModuleSpec::new(ANIMATION_ENGINE),
                ModuleSpec::new(SEQUENCER).requires(ANIMATION_ENGINE),
            ],
        }
    }
}

impl Default for SectionDefaults {
    fn default() -> Self {
        Self {
            threshold: 0.05,
            root_margin_px: 100,
            priority_root_margin_px: 200,
            placeholder_min_height_px: 320,
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            sections: vec![
                SectionSpec::new(SECTION_HOME).priority(),
                SectionSpec::new(SECTION_ABOUT).placeholder("Loading about..."),
                SectionSpec::new(SECTION_PROJECTS).placeholder("Loading projects..."),
                SectionSpec::new(SECTION_TECH_STACK).placeholder("Loading tech stack..."),
                SectionSpec::new(SECTION_RESUME).placeholder("Loading resume..."),
                SectionSpec::new(SECTION_CONTACT).placeholder("Loading contact..."),
            ],
        }
    }
}
