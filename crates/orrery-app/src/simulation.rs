//! Bodies, their angles, the animator and the composer, driven together one
//! frame tick at a time. Shared by the windowed and headless runs.

use glam::Vec3;
use orrery_bodies::{BodyState, SolarSystem, solar_system};
use orrery_config::Config;
use orrery_input::OrbitSettings;
use orrery_orbit::{AngleWrap, Animator};
use orrery_scene::{
    AmbientLight, CameraSetup, PointLight, Scene, SceneComposer, SceneConfig, SceneSnapshot,
};

use crate::error::AppError;

/// Composer settings from the loaded config.
pub fn scene_config(config: &Config) -> SceneConfig {
    SceneConfig {
        ambient: AmbientLight {
            color: config.lighting.ambient_color,
            intensity: config.lighting.ambient_intensity,
        },
        point_light: PointLight {
            position: Vec3::ZERO,
            color: config.lighting.point_color,
            intensity: config.lighting.point_intensity,
        },
        camera: CameraSetup {
            position: Vec3::from_array(config.camera.position),
            target: Vec3::from_array(config.camera.target),
            fov_y_degrees: config.camera.fov_y_degrees,
            near: config.camera.near,
            far: config.camera.far,
        },
        orbit_segments: config.scene.orbit_segments,
        orbit_color: config.scene.orbit_color,
        sphere_segments: config.render.sphere_segments,
        ring_segments: config.render.ring_segments,
        label_offset: config.scene.label_offset,
        show_labels: config.scene.show_labels,
        show_background: config.scene.show_background,
    }
}

pub fn orbit_settings(config: &Config) -> OrbitSettings {
    OrbitSettings {
        rotate_sensitivity: config.camera.rotate_sensitivity,
        zoom_step: config.camera.zoom_step,
        min_distance: config.camera.min_distance,
        max_distance: config.camera.max_distance,
    }
}

/// The configured RON body table, or the built-in solar system.
pub fn load_system(config: &Config) -> Result<SolarSystem, AppError> {
    let system = match &config.assets.system_file {
        Some(path) => SolarSystem::load(path)?,
        None => solar_system()?,
    };
    Ok(system)
}

pub struct Simulation {
    system: SolarSystem,
    states: Vec<BodyState>,
    animator: Animator,
    composer: SceneComposer,
}

impl Simulation {
    pub fn new(config: &Config, system: SolarSystem) -> Result<Self, AppError> {
        let composer = SceneComposer::new(scene_config(config), &system)?;
        let mut animator = Animator::new(AngleWrap::from_flag(config.animation.wrap_angles));
        animator.set_paused(config.animation.paused);
        tracing::info!(
            "Simulation ready: {} bodies, wrap {:?}, paused {}",
            system.body_count(),
            animator.wrap(),
            animator.is_paused()
        );
        Ok(Self {
            states: system.initial_states(),
            system,
            animator,
            composer,
        })
    }

    pub fn system(&self) -> &SolarSystem {
        &self.system
    }

    pub fn states(&self) -> &[BodyState] {
        &self.states
    }

    pub fn composer(&self) -> &SceneComposer {
        &self.composer
    }

    pub fn is_paused(&self) -> bool {
        self.animator.is_paused()
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.animator.toggle_pause()
    }

    /// Ticks actually applied; paused ticks are not counted.
    pub fn ticks(&self) -> u64 {
        self.animator.ticks()
    }

    /// Advance every body by one frame tick.
    pub fn tick(&mut self) -> Result<(), AppError> {
        self.animator.advance(&self.system, &mut self.states)?;
        Ok(())
    }

    /// Advance every body by `ticks` frame ticks at once.
    pub fn tick_n(&mut self, ticks: u64) -> Result<(), AppError> {
        let mut remaining = ticks;
        while remaining > 0 {
            let step = remaining.min(u64::from(u32::MAX)) as u32;
            self.animator
                .advance_by(&self.system, &mut self.states, step)?;
            remaining -= u64::from(step);
        }
        Ok(())
    }

    pub fn compose(&self) -> Result<Scene, AppError> {
        Ok(self.composer.compose(&self.system, &self.states)?)
    }

    pub fn snapshot(&self) -> Result<SceneSnapshot, AppError> {
        Ok(self.compose()?.snapshot())
    }
}

/// Advance `ticks` frame ticks without a window and render the resulting
/// scene snapshot as pretty JSON.
pub fn run_headless(config: &Config, system: SolarSystem, ticks: u64) -> Result<String, AppError> {
    let mut sim = Simulation::new(config, system)?;
    sim.tick_n(ticks)?;
    tracing::info!("Headless run finished after {} ticks", sim.ticks());
    Ok(serde_json::to_string_pretty(&sim.snapshot()?)?)
}
