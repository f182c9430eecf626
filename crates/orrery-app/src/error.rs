use orrery_bodies::BodyError;
use orrery_config::ConfigError;
use orrery_orbit::AnimatorError;
use orrery_render::{RenderContextError, SceneRenderError};
use orrery_scene::SceneError;
use thiserror::Error;

use crate::platform::PlatformError;

/// Anything that can stop the orrery from starting or running.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("body table: {0}")]
    Bodies(#[from] BodyError),

    #[error("scene: {0}")]
    Scene(#[from] SceneError),

    #[error("animation: {0}")]
    Animator(#[from] AnimatorError),

    #[error("failed to serialize scene snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("GPU initialization failed: {0}")]
    Gpu(#[from] RenderContextError),

    #[error("renderer: {0}")]
    Renderer(#[from] SceneRenderError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}
