//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level orrery configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Rendering settings.
    pub render: RenderConfig,
    /// Initial camera placement and orbit-control limits.
    pub camera: CameraConfig,
    /// Ambient and point light settings.
    pub lighting: LightingConfig,
    /// What the scene composer emits.
    pub scene: SceneConfig,
    /// Animation clock settings.
    pub animation: AnimationConfig,
    /// Texture and body-table locations.
    pub assets: AssetConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Start in borderless fullscreen.
    pub fullscreen: bool,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    /// Window title.
    pub title: String,
}

/// Rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Linear RGB clear color behind the background sphere.
    pub clear_color: [f32; 3],
    /// Horizontal and vertical sphere tessellation.
    pub sphere_segments: u32,
    /// Angular tessellation of ring annuli.
    pub ring_segments: u32,
}

/// Camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial eye position.
    pub position: [f32; 3],
    /// Point the camera orbits and looks at.
    pub target: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    /// Radians of orbit per pixel of mouse drag.
    pub rotate_sensitivity: f32,
    /// Fraction of the current distance removed per scroll line.
    pub zoom_step: f32,
    /// Closest allowed orbit distance.
    pub min_distance: f32,
    /// Farthest allowed orbit distance.
    pub max_distance: f32,
}

/// Light configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingConfig {
    /// Ambient light intensity.
    pub ambient_intensity: f32,
    /// Ambient light linear RGB color.
    pub ambient_color: [f32; 3],
    /// Point light (at the origin) intensity.
    pub point_intensity: f32,
    /// Point light linear RGB color.
    pub point_color: [f32; 3],
}

/// Scene composition configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Segments per orbit-path line loop.
    pub orbit_segments: u32,
    /// RGBA color of orbit-path lines.
    pub orbit_color: [f32; 4],
    /// Emit a name label above each planet.
    pub show_labels: bool,
    /// Emit the background starfield sphere.
    pub show_background: bool,
    /// Height of a label above its planet's surface.
    pub label_offset: f32,
}

/// Animation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Start with the animation paused.
    pub paused: bool,
    /// Wrap accumulated angles to `[0, 2π)` every tick.
    pub wrap_angles: bool,
}

/// Asset locations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory holding the body textures.
    pub texture_dir: PathBuf,
    /// Optional RON body table replacing the built-in solar system.
    pub system_file: Option<PathBuf>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log a scene summary every this many frame ticks (0 = never).
    pub summary_interval_ticks: u64,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
            title: "Orrery".to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0],
            sphere_segments: 50,
            ring_segments: 32,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [-50.0, 90.0, 150.0],
            target: [0.0, 0.0, 0.0],
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 2000.0,
            rotate_sensitivity: 0.005,
            zoom_step: 0.1,
            min_distance: 20.0,
            max_distance: 700.0,
        }
    }
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_intensity: 1.0,
            ambient_color: [1.0, 1.0, 1.0],
            point_intensity: 4.0,
            point_color: [1.0, 1.0, 1.0],
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            orbit_segments: 100,
            orbit_color: [1.0, 1.0, 1.0, 1.0],
            show_labels: false,
            show_background: true,
            label_offset: 4.0,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            paused: false,
            wrap_angles: true,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            texture_dir: PathBuf::from("assets").join("textures"),
            system_file: None,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            summary_interval_ticks: 600,
        }
    }
}

// --- Load / Save / Reload ---

/// File name of the config inside the config directory.
pub const CONFIG_FILE: &str = "config.ron";

fn read_file(config_path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
        path: config_path.to_path_buf(),
        source,
    })?;
    ron::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: config_path.to_path_buf(),
        source,
    })
}

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = read_file(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Write `config.ron` into `config_dir`, creating the directory if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        };
        std::fs::create_dir_all(config_dir).map_err(write_err)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(write_err)
    }

    /// Re-read the file; `Some` only when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = read_file(&config_dir.join(CONFIG_FILE))?;
        if &new_config == self {
            return Ok(None);
        }
        log::info!("Config reloaded with changes");
        Ok(Some(new_config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("width: 1280"));
        assert!(ron_str.contains("orbit_segments: 100"));
    }

    #[test]
    fn test_defaults_match_reference_scene() {
        let config = Config::default();
        assert_eq!(config.camera.position, [-50.0, 90.0, 150.0]);
        assert_eq!(config.camera.fov_y_degrees, 75.0);
        assert_eq!(config.lighting.ambient_intensity, 1.0);
        assert_eq!(config.lighting.point_intensity, 4.0);
        assert_eq!(config.render.sphere_segments, 50);
        assert_eq!(config.render.ring_segments, 32);
        assert!(config.animation.wrap_angles);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.assets.system_file = Some(PathBuf::from("systems").join("binary.ron"));
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(window: (), render: (), camera: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.lighting, LightingConfig::default());
        assert_eq!(config.scene, SceneConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_fields() {
        let ron_str = "(scene: (show_labels: true))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert!(config.scene.show_labels);
        assert_eq!(config.scene.orbit_segments, 100);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.window.width = 1920;
        config.lighting.point_intensity = 2.5;
        config.scene.show_labels = true;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.animation.paused = true;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.unwrap().animation.paused);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_broken_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "(window: (width: \"wide\"))").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }
}
