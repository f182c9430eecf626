//! Circular orbit paths in the XZ plane.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::error::OrbitError;

/// Segment count used when the caller has no preference.
pub const DEFAULT_SEGMENT_COUNT: u32 = 100;

/// Fewest segments that still close into a polygon.
pub const MIN_SEGMENT_COUNT: u32 = 3;

/// Opaque white.
pub const DEFAULT_ORBIT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// A closed polyline approximating a circle of `radius` around the origin.
///
/// Holds `segment_count + 1` points; the last repeats the first so the
/// path can be drawn as a plain line strip.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitPath {
    radius: f32,
    segment_count: u32,
    color: [f32; 4],
    points: Vec<Vec3>,
}

impl OrbitPath {
    /// Build the path. Point `i` is `(r cos θ, 0, r sin θ)` with `θ = 2πi/n`.
    pub fn new(radius: f32, segment_count: u32, color: [f32; 4]) -> Result<Self, OrbitError> {
        if segment_count < MIN_SEGMENT_COUNT {
            return Err(OrbitError::TooFewSegments {
                got: segment_count,
                min: MIN_SEGMENT_COUNT,
            });
        }
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(OrbitError::InvalidRadius(radius));
        }

        let n = segment_count as f32;
        let mut points: Vec<Vec3> = (0..segment_count)
            .map(|i| {
                let theta = TAU * i as f32 / n;
                Vec3::new(radius * theta.cos(), 0.0, radius * theta.sin())
            })
            .collect();
        // Close exactly rather than trusting cos(2π) == 1.
        points.push(points[0]);

        Ok(Self {
            radius,
            segment_count,
            color,
            points,
        })
    }

    /// White path with [`DEFAULT_SEGMENT_COUNT`] segments.
    pub fn with_defaults(radius: f32) -> Result<Self, OrbitError> {
        Self::new(radius, DEFAULT_SEGMENT_COUNT, DEFAULT_ORBIT_COLOR)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn segment_count(&self) -> u32 {
        self.segment_count
    }

    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_point_count_is_segments_plus_one() {
        let path = OrbitPath::new(28.0, 100, DEFAULT_ORBIT_COLOR).unwrap();
        assert_eq!(path.points().len(), 101);
    }

    #[test]
    fn test_first_point_on_positive_x() {
        let path = OrbitPath::new(28.0, 100, DEFAULT_ORBIT_COLOR).unwrap();
        assert_eq!(path.points()[0], Vec3::new(28.0, 0.0, 0.0));
    }

    #[test]
    fn test_halfway_point_on_negative_x() {
        let path = OrbitPath::new(28.0, 100, DEFAULT_ORBIT_COLOR).unwrap();
        assert!(approx(path.points()[50], Vec3::new(-28.0, 0.0, 0.0)));
    }

    #[test]
    fn test_path_is_closed() {
        let path = OrbitPath::new(62.0, 7, DEFAULT_ORBIT_COLOR).unwrap();
        let points = path.points();
        assert_eq!(points.first(), points.last());
    }

    #[test]
    fn test_points_lie_on_circle_in_xz_plane() {
        let path = OrbitPath::new(138.0, 64, [0.5, 0.5, 0.5, 1.0]).unwrap();
        for p in path.points() {
            assert_eq!(p.y, 0.0);
            assert!((p.length() - 138.0).abs() < 1e-3, "off circle: {p}");
        }
    }

    #[test]
    fn test_minimum_segments() {
        assert!(OrbitPath::new(10.0, 3, DEFAULT_ORBIT_COLOR).is_ok());
        assert_eq!(
            OrbitPath::new(10.0, 2, DEFAULT_ORBIT_COLOR),
            Err(OrbitError::TooFewSegments { got: 2, min: 3 })
        );
    }

    #[test]
    fn test_rejects_bad_radius() {
        assert!(OrbitPath::new(-1.0, 10, DEFAULT_ORBIT_COLOR).is_err());
        assert!(OrbitPath::new(f32::NAN, 10, DEFAULT_ORBIT_COLOR).is_err());
    }

    #[test]
    fn test_zero_radius_collapses_to_origin() {
        let path = OrbitPath::new(0.0, 4, DEFAULT_ORBIT_COLOR).unwrap();
        assert!(path.points().iter().all(|p| *p == Vec3::ZERO));
    }

    #[test]
    fn test_defaults() {
        let path = OrbitPath::with_defaults(44.0).unwrap();
        assert_eq!(path.segment_count(), DEFAULT_SEGMENT_COUNT);
        assert_eq!(path.color(), DEFAULT_ORBIT_COLOR);
        assert_eq!(path.radius(), 44.0);
    }
}
