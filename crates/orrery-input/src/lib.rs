//! Mouse input and orbit camera controls.

mod mouse;
mod orbit_controls;

pub use mouse::MouseState;
pub use orbit_controls::{OrbitControls, OrbitSettings, PITCH_LIMIT};
