//! Orrery application: window, event loop, fixed-rate animation and the
//! headless snapshot mode.

pub mod error;
pub mod game_loop;
pub mod platform;
pub mod simulation;
pub mod window;

pub use error::AppError;
pub use game_loop::{FIXED_DT, GameLoop, MAX_FRAME_TIME};
pub use platform::{PlatformDirs, PlatformError};
pub use simulation::{Simulation, load_system, orbit_settings, run_headless, scene_config};
pub use window::{AppState, run_with_config};
