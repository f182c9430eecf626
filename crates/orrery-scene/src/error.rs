use orrery_orbit::{AnimatorError, OrbitError};

/// Errors from building a composer or composing a scene.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("orbit path: {0}")]
    Orbit(#[from] OrbitError),

    #[error(transparent)]
    States(#[from] AnimatorError),

    /// The composer was built for a table with a different planet count.
    #[error("composer built for {expected} planets, system has {got}")]
    SystemMismatch { expected: usize, got: usize },

    #[error("sphere needs at least 3 width and 2 height segments, got {width}x{height}")]
    SphereSegments { width: u32, height: u32 },

    #[error("ring needs at least 3 segments, got {0}")]
    RingSegments(u32),
}
