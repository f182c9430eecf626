//! Command-line argument parsing for the orrery.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Animated solar system orrery")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Start in fullscreen.
    #[arg(long)]
    pub fullscreen: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory containing the body textures.
    #[arg(long)]
    pub textures: Option<PathBuf>,

    /// RON body table to load instead of the built-in solar system.
    #[arg(long)]
    pub system: Option<PathBuf>,

    /// Show planet name labels.
    #[arg(long)]
    pub labels: bool,

    /// Hide the background starfield sphere.
    #[arg(long)]
    pub no_background: bool,

    /// Start with the animation paused.
    #[arg(long)]
    pub paused: bool,

    /// Advance this many frame ticks without a window and print the scene as JSON.
    #[arg(long)]
    pub headless_ticks: Option<u64>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(fs) = args.fullscreen {
            self.window.fullscreen = fs;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref dir) = args.textures {
            self.assets.texture_dir = dir.clone();
        }
        if let Some(ref system) = args.system {
            self.assets.system_file = Some(system.clone());
        }
        if args.labels {
            self.scene.show_labels = true;
        }
        if args.no_background {
            self.scene.show_background = false;
        }
        if args.paused {
            self.animation.paused = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            textures: Some(PathBuf::from("images")),
            labels: true,
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.assets.texture_dir, PathBuf::from("images"));
        assert!(config.scene.show_labels);
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 720);
        assert!(config.scene.show_background);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_flags_parse() {
        let args = CliArgs::parse_from([
            "orrery",
            "--no-background",
            "--paused",
            "--headless-ticks",
            "628",
        ]);
        assert!(args.no_background);
        assert!(args.paused);
        assert_eq!(args.headless_ticks, Some(628));

        let mut config = Config::default();
        config.apply_cli_overrides(&args);
        assert!(!config.scene.show_background);
        assert!(config.animation.paused);
    }
}
