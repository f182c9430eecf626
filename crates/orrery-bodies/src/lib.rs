//! Celestial body model: per-body constants, the ring variant, and the body table.
//!
//! Bodies are plain validated data. The only state that changes while the
//! orrery runs is [`BodyState`], which is owned by the caller and advanced by
//! the animator in `orrery-orbit`.

pub mod body;
pub mod catalog;
pub mod descriptor;
mod error;

pub use body::{
    Annulus, AngularRates, Background, BodyKind, BodyState, CelestialBody, Ring, SolarSystem,
    TextureKey,
};
pub use catalog::{SUN_SPIN_RATE, solar_system};
pub use descriptor::{BackgroundDescriptor, BodyDescriptor, RingDescriptor, SystemDescriptor};
pub use error::BodyError;
