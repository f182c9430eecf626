//! Builds a [`Scene`] from the body table and the current angles.

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use glam::{Mat4, Vec3};
use orrery_bodies::{BodyKind, BodyState, CelestialBody, SolarSystem};
use orrery_orbit::{AnimatorError, OrbitPath};

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::node::{
    BodyPose, Geometry, LabelNode, Light, Material, MeshNode, NodeRole, Scene, SceneNode,
};

/// Composes scenes for one body table.
///
/// Orbit paths are generated once here; every composed scene shares them.
#[derive(Debug, Clone)]
pub struct SceneComposer {
    config: SceneConfig,
    orbit_paths: Vec<Arc<OrbitPath>>,
}

impl SceneComposer {
    pub fn new(config: SceneConfig, system: &SolarSystem) -> Result<Self, SceneError> {
        if config.sphere_segments < 3 {
            return Err(SceneError::SphereSegments {
                width: config.sphere_segments,
                height: config.sphere_segments,
            });
        }
        if config.ring_segments < 3 {
            return Err(SceneError::RingSegments(config.ring_segments));
        }

        let orbit_paths = system
            .planets()
            .iter()
            .map(|planet| {
                OrbitPath::new(
                    planet.orbit_radius(),
                    config.orbit_segments,
                    config.orbit_color,
                )
                .map(Arc::new)
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            "Scene composer ready: {} orbit paths, {} segments each",
            orbit_paths.len(),
            config.orbit_segments
        );

        Ok(Self {
            config,
            orbit_paths,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn orbit_paths(&self) -> &[Arc<OrbitPath>] {
        &self.orbit_paths
    }

    /// Compose this frame's scene.
    ///
    /// `states` follows [`SolarSystem::bodies`] order: the star, then planets.
    pub fn compose(
        &self,
        system: &SolarSystem,
        states: &[BodyState],
    ) -> Result<Scene, SceneError> {
        if system.planets().len() != self.orbit_paths.len() {
            return Err(SceneError::SystemMismatch {
                expected: self.orbit_paths.len(),
                got: system.planets().len(),
            });
        }
        if states.len() != system.body_count() {
            return Err(AnimatorError::StateCountMismatch {
                expected: system.body_count(),
                got: states.len(),
            }
            .into());
        }

        let config = &self.config;
        let mut scene = Scene {
            lights: vec![
                Light::Ambient {
                    color: config.ambient.color,
                    intensity: config.ambient.intensity,
                },
                Light::Point {
                    position: config.point_light.position,
                    color: config.point_light.color,
                    intensity: config.point_light.intensity,
                },
            ],
            nodes: Vec::with_capacity(1 + system.planets().len() * 4 + 1),
            poses: Vec::with_capacity(system.body_count()),
        };

        let sun = system.sun();
        let sun_state = states[0];
        scene.nodes.push(SceneNode::Mesh(MeshNode {
            name: sun.name().to_string(),
            role: NodeRole::Sun,
            body: Some(0),
            geometry: self.sphere(sun.mean_radius()),
            material: Material::basic(sun.texture().clone()),
            transform: Mat4::from_rotation_y(sun_state.self_angle),
        }));
        scene.poses.push(BodyPose {
            name: sun.name().to_string(),
            kind: BodyKind::Star,
            position: Vec3::ZERO,
            state: sun_state,
        });

        for (i, (planet, path)) in system.planets().iter().zip(&self.orbit_paths).enumerate() {
            let body = i + 1;
            self.compose_planet(&mut scene, planet, body, states[body], path);
        }

        if config.show_background
            && let Some(background) = system.background()
        {
            scene.nodes.push(SceneNode::Mesh(MeshNode {
                name: "background".to_string(),
                role: NodeRole::Background,
                body: None,
                geometry: Geometry::InvertedSphere {
                    radius: background.radius(),
                    width_segments: config.sphere_segments,
                    height_segments: config.sphere_segments,
                },
                material: Material::basic(background.texture().clone()),
                transform: Mat4::IDENTITY,
            }));
        }

        Ok(scene)
    }

    fn compose_planet(
        &self,
        scene: &mut Scene,
        planet: &CelestialBody,
        body: usize,
        state: BodyState,
        path: &Arc<OrbitPath>,
    ) {
        // Orbit group: rotate about Y, then push out along +X.
        let orbit_group = Mat4::from_rotation_y(state.orbit_angle)
            * Mat4::from_translation(Vec3::new(planet.orbit_radius(), 0.0, 0.0));

        let transform = orbit_group * Mat4::from_rotation_y(state.self_angle);
        scene.nodes.push(SceneNode::Mesh(MeshNode {
            name: planet.name().to_string(),
            role: NodeRole::Planet,
            body: Some(body),
            geometry: self.sphere(planet.mean_radius()),
            material: Material::standard(planet.texture().clone()),
            transform,
        }));

        if let Some(annulus) = planet.ring().as_annulus() {
            scene.nodes.push(SceneNode::Mesh(MeshNode {
                name: format!("{} ring", planet.name()),
                role: NodeRole::Ring,
                body: Some(body),
                geometry: Geometry::Ring {
                    inner_radius: annulus.inner_radius(),
                    outer_radius: annulus.outer_radius(),
                    theta_segments: self.config.ring_segments,
                },
                material: Material::ring(annulus.texture().clone()),
                // Follows the orbit, not the spin.
                transform: orbit_group * Mat4::from_rotation_x(FRAC_PI_2),
            }));
        }

        scene.nodes.push(SceneNode::Mesh(MeshNode {
            name: format!("{} orbit", planet.name()),
            role: NodeRole::OrbitPath,
            body: Some(body),
            geometry: Geometry::Line(Arc::clone(path)),
            material: Material::line(path.color()),
            transform: Mat4::IDENTITY,
        }));

        let position = orbit_group.transform_point3(Vec3::ZERO);
        if self.config.show_labels {
            let lift = planet.mean_radius() + self.config.label_offset;
            scene.nodes.push(SceneNode::Label(LabelNode {
                text: planet.name().to_string(),
                body,
                position: orbit_group.transform_point3(Vec3::new(0.0, lift, 0.0)),
            }));
        }

        scene.poses.push(BodyPose {
            name: planet.name().to_string(),
            kind: BodyKind::Planet,
            position,
            state,
        });
    }

    fn sphere(&self, radius: f32) -> Geometry {
        Geometry::Sphere {
            radius,
            width_segments: self.config.sphere_segments,
            height_segments: self.config.sphere_segments,
        }
    }
}
