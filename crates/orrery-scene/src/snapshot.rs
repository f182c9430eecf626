//! Serializable summary of a composed scene.

use orrery_bodies::BodyKind;
use serde::Serialize;

use crate::node::{NodeRole, Scene};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodySnapshot {
    pub name: String,
    pub kind: BodyKind,
    pub position: [f32; 3],
    pub orbit_angle: f32,
    pub self_angle: f32,
}

/// Body positions and node tallies for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSnapshot {
    pub bodies: Vec<BodySnapshot>,
    pub lights: usize,
    pub meshes: usize,
    pub rings: usize,
    pub orbit_paths: usize,
    pub labels: usize,
    pub background: bool,
}

impl Scene {
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            bodies: self
                .poses
                .iter()
                .map(|pose| BodySnapshot {
                    name: pose.name.clone(),
                    kind: pose.kind,
                    position: pose.position.to_array(),
                    orbit_angle: pose.state.orbit_angle,
                    self_angle: pose.state.self_angle,
                })
                .collect(),
            lights: self.lights.len(),
            meshes: self.meshes().count(),
            rings: self.meshes_with_role(NodeRole::Ring).count(),
            orbit_paths: self.meshes_with_role(NodeRole::OrbitPath).count(),
            labels: self.labels().count(),
            background: self.meshes_with_role(NodeRole::Background).next().is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{SceneComposer, SceneConfig};
    use orrery_bodies::solar_system;

    #[test]
    fn test_snapshot_serializes_to_json() {
        let system = solar_system().unwrap();
        let composer = SceneComposer::new(SceneConfig::default(), &system).unwrap();
        let scene = composer.compose(&system, &system.initial_states()).unwrap();

        let snapshot = scene.snapshot();
        assert_eq!(snapshot.bodies.len(), 10);
        assert_eq!(snapshot.rings, 2);
        assert_eq!(snapshot.orbit_paths, 9);
        assert!(snapshot.background);
        assert_eq!(snapshot.bodies[0].position, [0.0, 0.0, 0.0]);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["bodies"][3]["name"], "Earth");
        assert_eq!(json["bodies"][0]["kind"], "Star");
        assert_eq!(json["meshes"], 22);
    }
}
