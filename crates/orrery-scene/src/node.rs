//! Render-tree node types.

use std::sync::Arc;

use glam::{Mat4, Vec3};
use orrery_bodies::{BodyKind, BodyState, TextureKey};
use orrery_orbit::OrbitPath;

/// A light in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient {
        color: [f32; 3],
        intensity: f32,
    },
    Point {
        position: Vec3,
        color: [f32; 3],
        intensity: f32,
    },
}

/// Shape of a mesh node. Geometry never changes between frames; only the
/// node's transform does.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// UV sphere centred on the origin.
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// UV sphere with inward-facing triangles, seen from inside.
    InvertedSphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Flat annulus in the local XY plane, facing +Z.
    Ring {
        inner_radius: f32,
        outer_radius: f32,
        theta_segments: u32,
    },
    /// Closed polyline.
    Line(Arc<OrbitPath>),
}

/// How a surface responds to light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Texture or color as-is, no lighting.
    Basic,
    /// Diffuse lighting from the ambient and point lights.
    Standard,
}

/// Which triangle faces are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    Double,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub shading: Shading,
    pub texture: Option<TextureKey>,
    /// Multiplied with the texture sample.
    pub color: [f32; 4],
    /// Alpha-blended and drawn after opaque geometry.
    pub transparent: bool,
    pub side: Side,
}

impl Material {
    /// Unlit, textured, opaque.
    pub fn basic(texture: TextureKey) -> Self {
        Self {
            shading: Shading::Basic,
            texture: Some(texture),
            color: [1.0; 4],
            transparent: false,
            side: Side::Front,
        }
    }

    /// Lit, textured, opaque.
    pub fn standard(texture: TextureKey) -> Self {
        Self {
            shading: Shading::Standard,
            ..Self::basic(texture)
        }
    }

    /// Unlit, textured, alpha-blended, visible from both sides.
    pub fn ring(texture: TextureKey) -> Self {
        Self {
            transparent: true,
            side: Side::Double,
            ..Self::basic(texture)
        }
    }

    /// Flat-colored line.
    pub fn line(color: [f32; 4]) -> Self {
        Self {
            shading: Shading::Basic,
            texture: None,
            color,
            transparent: false,
            side: Side::Front,
        }
    }
}

/// What a node stands for. Renderers use this to sort draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Sun,
    Planet,
    Ring,
    OrbitPath,
    Background,
}

/// A drawable node with its world transform for this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshNode {
    pub name: String,
    pub role: NodeRole,
    /// Index into `SolarSystem::bodies()`, if the node belongs to a body.
    pub body: Option<usize>,
    pub geometry: Geometry,
    pub material: Material,
    pub transform: Mat4,
}

/// Text anchored at a world position.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelNode {
    pub text: String,
    pub body: usize,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Mesh(MeshNode),
    Label(LabelNode),
}

impl SceneNode {
    pub fn as_mesh(&self) -> Option<&MeshNode> {
        match self {
            SceneNode::Mesh(mesh) => Some(mesh),
            SceneNode::Label(_) => None,
        }
    }

    pub fn as_label(&self) -> Option<&LabelNode> {
        match self {
            SceneNode::Label(label) => Some(label),
            SceneNode::Mesh(_) => None,
        }
    }
}

/// Where a body ended up this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyPose {
    pub name: String,
    pub kind: BodyKind,
    pub position: Vec3,
    pub state: BodyState,
}

/// One frame's render tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub lights: Vec<Light>,
    pub nodes: Vec<SceneNode>,
    pub poses: Vec<BodyPose>,
}

impl Scene {
    pub fn meshes(&self) -> impl Iterator<Item = &MeshNode> {
        self.nodes.iter().filter_map(SceneNode::as_mesh)
    }

    pub fn labels(&self) -> impl Iterator<Item = &LabelNode> {
        self.nodes.iter().filter_map(SceneNode::as_label)
    }

    /// Mesh nodes with the given role, in scene order.
    pub fn meshes_with_role(&self, role: NodeRole) -> impl Iterator<Item = &MeshNode> {
        self.meshes().filter(move |m| m.role == role)
    }
}
