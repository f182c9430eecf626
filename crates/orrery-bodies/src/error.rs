//! Body validation and catalog loading errors.

use std::path::PathBuf;

/// Errors raised while constructing bodies or loading a body table.
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    /// Mean radius must be finite and strictly positive.
    #[error("body '{name}' has invalid radius {radius}")]
    InvalidRadius { name: String, radius: f32 },

    /// Orbit radius must be finite and non-negative.
    #[error("body '{name}' has invalid orbit radius {orbit_radius}")]
    InvalidOrbitRadius { name: String, orbit_radius: f32 },

    /// Angular rates must be finite.
    #[error("body '{name}' has a non-finite angular rate")]
    InvalidRate { name: String },

    /// Ring radii must satisfy `0 <= inner < outer`.
    #[error("ring inner radius {inner} must be non-negative and below outer radius {outer}")]
    InvalidRing { inner: f32, outer: f32 },

    /// Background sphere radius must be finite and strictly positive.
    #[error("background radius {0} must be positive")]
    InvalidBackground(f32),

    /// A body table must name at least one planet.
    #[error("body table has no planets")]
    NoPlanets,

    /// Failed to read a body table from disk.
    #[error("failed to read body table {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a RON body table.
    #[error("failed to parse body table: {0}")]
    Parse(#[from] ron::error::SpannedError),
}
