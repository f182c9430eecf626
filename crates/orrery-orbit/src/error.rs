/// Errors from building an orbit path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrbitError {
    #[error("orbit path needs at least {min} segments, got {got}")]
    TooFewSegments { got: u32, min: u32 },

    #[error("orbit radius {0} must be finite and non-negative")]
    InvalidRadius(f32),
}

/// Errors from advancing body states.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnimatorError {
    /// The state slice does not line up with the body table.
    #[error("expected {expected} body states, got {got}")]
    StateCountMismatch { expected: usize, got: usize },
}
