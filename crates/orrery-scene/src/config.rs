use glam::Vec3;

/// Uniform light applied to every lit surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Omnidirectional light, placed at the star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Initial camera placement and projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSetup {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

/// Everything the composer needs besides the bodies themselves.
///
/// Built once at startup and never mutated afterwards; the composer keeps its
/// own copy.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub ambient: AmbientLight,
    pub point_light: PointLight,
    pub camera: CameraSetup,
    /// Segments per orbit-path line loop.
    pub orbit_segments: u32,
    pub orbit_color: [f32; 4],
    /// Width and height segments of every body sphere.
    pub sphere_segments: u32,
    /// Angular segments of ring annuli.
    pub ring_segments: u32,
    /// Height of a label above its planet's surface.
    pub label_offset: f32,
    pub show_labels: bool,
    pub show_background: bool,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
        }
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            color: [1.0, 1.0, 1.0],
            intensity: 4.0,
        }
    }
}

impl Default for CameraSetup {
    fn default() -> Self {
        Self {
            position: Vec3::new(-50.0, 90.0, 150.0),
            target: Vec3::ZERO,
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            ambient: AmbientLight::default(),
            point_light: PointLight::default(),
            camera: CameraSetup::default(),
            orbit_segments: orrery_orbit::DEFAULT_SEGMENT_COUNT,
            orbit_color: orrery_orbit::DEFAULT_ORBIT_COLOR,
            sphere_segments: 50,
            ring_segments: 32,
            label_offset: 4.0,
            show_labels: false,
            show_background: true,
        }
    }
}
