//! # CLI Argument Definitions
//!
//! Flags describe the simulated device; anything left unset falls back to the `environment`
//! section of the configuration.

use clap::Parser;
use folio::domain::capability::{EffectiveConnectionType, EnvironmentSnapshot};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "folio")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Simulates one adaptive page session: probe, mount sections, load enhancements")]
pub struct Cli {
    /// Configuration file (TOML, JSON or YAML). Defaults to an optional ./folio.toml
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Viewport width in CSS pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Report a touch-capable device
    #[arg(long)]
    pub touch: bool,

    /// Effective connection type: slow-2g, 2g, 3g or 4g
    #[arg(long)]
    pub connection: Option<EffectiveConnectionType>,

    /// Device pixel ratio
    #[arg(long)]
    pub dpr: Option<f64>,

    /// Report the reduced-motion preference
    #[arg(long)]
    pub reduced_motion: bool,

    /// User-agent string
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Make the named module fail to load (repeatable)
    #[arg(long = "fail", value_name = "MODULE")]
    pub fail: Vec<String>,

    /// Viewport width applied by the simulated resize at the end of the session
    #[arg(long, default_value_t = 390)]
    pub resize_to: u32,

    /// Project catalog (JSON array) rendered into the projects section
    #[arg(long)]
    pub projects: Option<PathBuf>,

    /// Also write rolling log files into this directory (plain text unless --json-logs)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Use JSON for log files
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Applies the device flags on top of `base`.
    #[must_use]
    pub fn environment(&self, base: &EnvironmentSnapshot) -> EnvironmentSnapshot {
        let mut env = base.clone();
        if let Some(width) = self.width {
            env.viewport_width = Some(width);
        }
        if self.touch {
            env.touch_support = Some(true);
        }
        if let Some(connection) = self.connection {
            env.effective_connection = Some(connection);
        }
        if let Some(dpr) = self.dpr {
            env.device_pixel_ratio = Some(dpr);
        }
        if self.reduced_motion {
            env.prefers_reduced_motion = Some(true);
        }
        if let Some(agent) = &self.user_agent {
            env.user_agent = Some(agent.clone());
        }
        env
    }
}
