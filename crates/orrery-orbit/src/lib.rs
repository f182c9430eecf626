//! Orbit-path geometry and the per-frame animator.
//!
//! Nothing here touches a graphics context. [`OrbitPath`] is derived once
//! per planet; [`Animator`] is the only writer of [`BodyState`](orrery_bodies::BodyState).

mod animator;
mod error;
mod path;

pub use animator::{AngleWrap, Animator, advance};
pub use error::{AnimatorError, OrbitError};
pub use path::{DEFAULT_ORBIT_COLOR, DEFAULT_SEGMENT_COUNT, MIN_SEGMENT_COUNT, OrbitPath};
