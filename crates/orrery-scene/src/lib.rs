//! Scene composition: bodies plus their current angles become a render tree.
//!
//! [`SceneComposer`] is built once per body table and then composes a fresh
//! [`Scene`] every frame. Composition is a pure function of the config, the
//! table and the angles, so the same inputs always yield the same nodes in the
//! same order.

mod composer;
mod config;
mod error;
mod node;
mod snapshot;

pub use composer::SceneComposer;
pub use config::{AmbientLight, CameraSetup, PointLight, SceneConfig};
pub use error::SceneError;
pub use node::{
    BodyPose, Geometry, LabelNode, Light, Material, MeshNode, NodeRole, Scene, SceneNode, Shading,
    Side,
};
pub use snapshot::{BodySnapshot, SceneSnapshot};
