//! CPU tessellation of scene geometry.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::buffer::{VertexPositionColor, VertexPositionNormalUv};

/// Vertices plus a u32 index list.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData<V> {
    pub vertices: Vec<V>,
    pub indices: Vec<u32>,
}

impl<V> MeshData<V> {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// UV sphere with `(width + 1) * (height + 1)` vertices.
///
/// Rows run from the north pole (`v = 0`) to the south pole (`v = 1`); the
/// seam column is duplicated so `u` spans `[0, 1]`. The pole rows emit one
/// triangle per quad instead of two.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData<VertexPositionNormalUv> {
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    let stride = w + 1;

    let mut vertices = Vec::with_capacity(((w + 1) * (h + 1)) as usize);
    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        let (sin_theta, cos_theta) = (v * PI).sin_cos();
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let (sin_phi, cos_phi) = (u * TAU).sin_cos();
            let normal = Vec3::new(-cos_phi * sin_theta, cos_theta, sin_phi * sin_theta);
            vertices.push(VertexPositionNormalUv {
                position: (normal * radius).to_array(),
                normal: normal.to_array(),
                uv: [u, v],
            });
        }
    }

    let mut indices = Vec::with_capacity((w * h * 6) as usize);
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * stride + ix + 1;
            let b = iy * stride + ix;
            let c = (iy + 1) * stride + ix;
            let d = (iy + 1) * stride + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    MeshData { vertices, indices }
}

/// Sphere meant to be seen from inside: normals point inward, winding is
/// reversed, and `u` is mirrored so the panorama reads left to right.
pub fn inverted_sphere(
    radius: f32,
    width_segments: u32,
    height_segments: u32,
) -> MeshData<VertexPositionNormalUv> {
    let mut mesh = sphere(radius, width_segments, height_segments);
    for vertex in &mut mesh.vertices {
        vertex.normal = (-Vec3::from_array(vertex.normal)).to_array();
        vertex.uv[0] = 1.0 - vertex.uv[0];
    }
    for tri in mesh.indices.chunks_exact_mut(3) {
        tri.swap(1, 2);
    }
    mesh
}

/// Flat annulus in the XY plane facing +Z.
///
/// Texture coordinates are planar: the outer radius maps to the unit
/// square's edges.
pub fn ring(inner_radius: f32, outer_radius: f32, theta_segments: u32) -> MeshData<VertexPositionNormalUv> {
    let segments = theta_segments.max(3);
    let stride = segments + 1;

    let mut vertices = Vec::with_capacity((stride * 2) as usize);
    for radius in [inner_radius, outer_radius] {
        for i in 0..=segments {
            let (sin, cos) = (TAU * i as f32 / segments as f32).sin_cos();
            let (x, y) = (radius * cos, radius * sin);
            vertices.push(VertexPositionNormalUv {
                position: [x, y, 0.0],
                normal: [0.0, 0.0, 1.0],
                uv: [
                    (x / outer_radius + 1.0) * 0.5,
                    (y / outer_radius + 1.0) * 0.5,
                ],
            });
        }
    }

    let mut indices = Vec::with_capacity((segments * 6) as usize);
    for i in 0..segments {
        let a = i;
        let b = i + stride;
        let c = i + stride + 1;
        let d = i + 1;
        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    MeshData { vertices, indices }
}

/// Line-strip vertices for a polyline, indexed `0..n`.
pub fn line_strip(points: &[Vec3], color: [f32; 4]) -> MeshData<VertexPositionColor> {
    MeshData {
        vertices: points
            .iter()
            .map(|p| VertexPositionColor {
                position: p.to_array(),
                color,
            })
            .collect(),
        indices: (0..points.len() as u32).collect(),
    }
}
