//! Orbit camera controls: drag to rotate around a target, scroll to zoom.

use glam::Vec3;
use winit::event::MouseButton;

use crate::mouse::MouseState;

/// Pitch stays this far short of straight up or down.
pub const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Tuning for [`OrbitControls`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSettings {
    /// Radians of rotation per pixel dragged.
    pub rotate_sensitivity: f32,
    /// Fraction of the distance removed per scroll line.
    pub zoom_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            rotate_sensitivity: 0.005,
            zoom_step: 0.1,
            min_distance: 20.0,
            max_distance: 700.0,
        }
    }
}

/// Spherical camera placement around a target point.
///
/// Yaw 0 and pitch 0 put the eye on the target's +Z side.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    settings: OrbitSettings,
}

impl OrbitControls {
    /// Start with the eye exactly at `eye`, looking at `target`.
    pub fn new(eye: Vec3, target: Vec3, settings: OrbitSettings) -> Self {
        let offset = eye - target;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return Self {
                target,
                yaw: 0.0,
                pitch: 0.0,
                distance: settings.min_distance,
                settings,
            };
        }
        Self {
            target,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
            settings,
        }
    }

    /// Apply this frame's drag and scroll. Returns `true` if the eye moved.
    pub fn update(&mut self, mouse: &MouseState) -> bool {
        let mut moved = false;

        if mouse.is_held(MouseButton::Left) {
            let delta = mouse.delta();
            if delta != glam::Vec2::ZERO {
                self.rotate(delta.x, delta.y);
                moved = true;
            }
        }

        let scroll = mouse.scroll();
        if scroll.abs() > 1e-6 {
            self.zoom(scroll);
            moved = true;
        }

        if moved {
            tracing::trace!(
                yaw = self.yaw,
                pitch = self.pitch,
                distance = self.distance,
                "Orbit camera moved"
            );
        }
        moved
    }

    /// Rotate by a drag of `(dx, dy)` pixels. Dragging down raises the eye.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        let s = self.settings.rotate_sensitivity;
        self.yaw -= dx * s;
        self.pitch = (self.pitch + dy * s).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Zoom by `lines` scroll lines; positive moves closer.
    pub fn zoom(&mut self, lines: f32) {
        let factor = (1.0 - self.settings.zoom_step).powf(lines);
        self.distance = (self.distance * factor)
            .clamp(self.settings.min_distance, self.settings.max_distance);
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::{ElementState, MouseScrollDelta};

    fn default_controls() -> OrbitControls {
        OrbitControls::new(
            Vec3::new(-50.0, 90.0, 150.0),
            Vec3::ZERO,
            OrbitSettings::default(),
        )
    }

    #[test]
    fn test_initial_eye_matches_configured_position() {
        let controls = default_controls();
        assert!((controls.eye() - Vec3::new(-50.0, 90.0, 150.0)).length() < 1e-3);
    }

    #[test]
    fn test_drag_changes_yaw_and_pitch() {
        let mut controls = default_controls();
        let (yaw, pitch) = (controls.yaw(), controls.pitch());

        let mut mouse = MouseState::new();
        mouse.on_cursor_moved(100.0, 100.0);
        mouse.on_button(MouseButton::Left, ElementState::Pressed);
        mouse.on_cursor_moved(140.0, 80.0);

        assert!(controls.update(&mouse));
        assert!((controls.yaw() - (yaw - 40.0 * 0.005)).abs() < 1e-6);
        assert!((controls.pitch() - (pitch - 20.0 * 0.005)).abs() < 1e-6);
    }

    #[test]
    fn test_move_without_button_does_nothing() {
        let mut controls = default_controls();
        let before = controls.clone();
        let mut mouse = MouseState::new();
        mouse.on_cursor_moved(0.0, 0.0);
        mouse.on_cursor_moved(300.0, 300.0);
        assert!(!controls.update(&mouse));
        assert_eq!(controls, before);
    }

    #[test]
    fn test_pitch_clamped_short_of_poles() {
        let mut controls = default_controls();
        controls.rotate(0.0, 10_000.0);
        assert_eq!(controls.pitch(), PITCH_LIMIT);
        controls.rotate(0.0, -20_000.0);
        assert_eq!(controls.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn test_scroll_up_zooms_in() {
        let mut controls = default_controls();
        let before = controls.distance();
        let mut mouse = MouseState::new();
        mouse.on_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        controls.update(&mouse);
        assert!((controls.distance() - before * 0.9).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut controls = default_controls();
        controls.zoom(200.0);
        assert_eq!(controls.distance(), 20.0);
        controls.zoom(-200.0);
        assert_eq!(controls.distance(), 700.0);
    }

    #[test]
    fn test_eye_keeps_distance_after_rotation() {
        let mut controls = default_controls();
        controls.rotate(123.0, -45.0);
        let d = (controls.eye() - controls.target()).length();
        assert!((d - controls.distance()).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_eye_on_target() {
        let controls = OrbitControls::new(Vec3::ONE, Vec3::ONE, OrbitSettings::default());
        assert_eq!(controls.distance(), 20.0);
        assert!((controls.eye() - Vec3::new(1.0, 1.0, 21.0)).length() < 1e-4);
    }
}
