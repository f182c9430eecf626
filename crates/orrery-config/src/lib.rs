//! Configuration for the orrery.
//!
//! Settings persist to disk as a RON file, accept clap CLI overrides, and
//! tolerate missing or unknown fields so old config files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AnimationConfig, AssetConfig, CONFIG_FILE, CameraConfig, Config, DebugConfig, LightingConfig,
    RenderConfig, SceneConfig, WindowConfig,
};
pub use error::ConfigError;
