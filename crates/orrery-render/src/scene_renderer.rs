//! Draws a composed [`Scene`] with the material and line pipelines.
//!
//! GPU resources are built once from the first scene. Later frames only
//! rewrite uniforms: node geometry never changes, so every subsequent scene
//! must carry the same mesh nodes in the same order.

use std::sync::Arc;

use bytemuck::Zeroable;
use glam::Vec3;
use orrery_scene::{Geometry, Light, MeshNode, NodeRole, Scene, Shading, Side};
use thiserror::Error;

use crate::assets::{TextureSource, load_or_white};
use crate::buffer::{BufferAllocator, MeshBuffer};
use crate::camera::Camera;
use crate::depth::DepthBuffer;
use crate::geometry;
use crate::gpu::{RenderContext, SurfaceError};
use crate::pass::RenderPassBuilder;
use crate::pipeline::{
    FrameUniform, LinePipeline, MaterialPipeline, ModelUniform, SurfaceMode, UniformLayouts,
};
use crate::texture::{ManagedTexture, TextureError, TextureManager};

#[derive(Debug, Error)]
pub enum SceneRenderError {
    #[error("scene has {got} mesh nodes, renderer was built for {expected}")]
    NodeCountMismatch { expected: usize, got: usize },

    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Which batch a mesh node is drawn in. Batches run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DrawBatch {
    Background,
    Opaque,
    Lines,
    Translucent,
}

impl DrawBatch {
    pub const ORDER: [DrawBatch; 4] = [
        DrawBatch::Background,
        DrawBatch::Opaque,
        DrawBatch::Lines,
        DrawBatch::Translucent,
    ];

    pub fn of(node: &MeshNode) -> Self {
        if node.role == NodeRole::Background {
            DrawBatch::Background
        } else if matches!(node.geometry, Geometry::Line(_)) {
            DrawBatch::Lines
        } else if node.material.transparent || node.material.side == Side::Double {
            DrawBatch::Translucent
        } else {
            DrawBatch::Opaque
        }
    }
}

/// Counters for one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draw_calls: u32,
    /// Labels present in the scene but not rasterised.
    pub skipped_labels: u32,
}

struct GpuNode {
    batch: DrawBatch,
    mesh: MeshBuffer,
    uniform: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    texture: Option<Arc<ManagedTexture>>,
}

pub struct SceneRenderer {
    material: MaterialPipeline,
    lines: LinePipeline,
    textures: TextureManager,
    frame_uniform: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    nodes: Vec<GpuNode>,
    label_count: usize,
}

fn mesh_for(alloc: &BufferAllocator<'_>, node: &MeshNode) -> MeshBuffer {
    let label = format!("{}-mesh", node.name);
    match &node.geometry {
        Geometry::Sphere {
            radius,
            width_segments,
            height_segments,
        } => {
            let data = geometry::sphere(*radius, *width_segments, *height_segments);
            alloc.create_mesh(&label, &data.vertices, &data.indices)
        }
        Geometry::InvertedSphere {
            radius,
            width_segments,
            height_segments,
        } => {
            let data = geometry::inverted_sphere(*radius, *width_segments, *height_segments);
            alloc.create_mesh(&label, &data.vertices, &data.indices)
        }
        Geometry::Ring {
            inner_radius,
            outer_radius,
            theta_segments,
        } => {
            let data = geometry::ring(*inner_radius, *outer_radius, *theta_segments);
            alloc.create_mesh(&label, &data.vertices, &data.indices)
        }
        Geometry::Line(path) => {
            // Color comes from the material tint.
            let data = geometry::line_strip(path.points(), [1.0; 4]);
            alloc.create_mesh(&label, &data.vertices, &data.indices)
        }
    }
}

fn model_uniform(node: &MeshNode) -> ModelUniform {
    ModelUniform::new(
        node.transform,
        node.material.color,
        node.material.shading == Shading::Standard,
    )
}

fn frame_uniform(scene: &Scene, camera: &Camera) -> FrameUniform {
    let mut ambient = ([0.0; 3], 0.0);
    let mut point = (Vec3::ZERO, [0.0; 3], 0.0);
    for light in &scene.lights {
        match *light {
            Light::Ambient { color, intensity } => ambient = (color, intensity),
            Light::Point {
                position,
                color,
                intensity,
            } => point = (position, color, intensity),
        }
    }
    FrameUniform::new(camera.view_projection_matrix(), camera.position, ambient, point)
}

impl SceneRenderer {
    /// Upload geometry and textures for every mesh node in `scene`.
    ///
    /// Textures the source cannot supply render white.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        scene: &Scene,
        source: &dyn TextureSource,
    ) -> Result<Self, SceneRenderError> {
        let layouts = UniformLayouts::new(device);
        let mut textures = TextureManager::new(device);
        let material =
            MaterialPipeline::new(device, surface_format, &layouts, textures.bind_group_layout());
        let lines = LinePipeline::new(device, surface_format, &layouts);
        let alloc = BufferAllocator::new(device);

        let frame_uniform = alloc.create_uniform("frame-uniform", &FrameUniform::zeroed());
        let frame_bind_group =
            UniformLayouts::bind_group(device, "frame-bind-group", &layouts.frame, &frame_uniform);

        let mut nodes = Vec::new();
        for node in scene.meshes() {
            let batch = DrawBatch::of(node);
            let mesh = mesh_for(&alloc, node);
            let uniform = alloc.create_uniform(&format!("{}-uniform", node.name), &model_uniform(node));
            let bind_group = UniformLayouts::bind_group(
                device,
                &format!("{}-bind-group", node.name),
                &layouts.model,
                &uniform,
            );
            let texture = match (batch, &node.material.texture) {
                (DrawBatch::Lines, _) => None,
                (_, Some(key)) => Some(load_or_white(&mut textures, source, device, queue, key)?),
                (_, None) => Some(textures.white(device, queue)?),
            };
            nodes.push(GpuNode {
                batch,
                mesh,
                uniform,
                bind_group,
                texture,
            });
        }

        let label_count = scene.labels().count();
        log::info!(
            "Scene renderer ready: {} meshes, {} textures, {} labels",
            nodes.len(),
            textures.len(),
            label_count
        );

        Ok(Self {
            material,
            lines,
            textures,
            frame_uniform,
            frame_bind_group,
            nodes,
            label_count,
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Number of nodes drawn in `batch`.
    pub fn batch_len(&self, batch: DrawBatch) -> usize {
        self.nodes.iter().filter(|n| n.batch == batch).count()
    }

    /// Write this frame's camera, lights and node transforms.
    pub fn update(
        &mut self,
        queue: &wgpu::Queue,
        scene: &Scene,
        camera: &Camera,
    ) -> Result<(), SceneRenderError> {
        let got = scene.meshes().count();
        if got != self.nodes.len() {
            return Err(SceneRenderError::NodeCountMismatch {
                expected: self.nodes.len(),
                got,
            });
        }
        queue.write_buffer(
            &self.frame_uniform,
            0,
            bytemuck::bytes_of(&frame_uniform(scene, camera)),
        );
        for (gpu, node) in self.nodes.iter().zip(scene.meshes()) {
            queue.write_buffer(&gpu.uniform, 0, bytemuck::bytes_of(&model_uniform(node)));
        }
        self.label_count = scene.labels().count();
        Ok(())
    }

    /// Record and submit every batch into `view`.
    pub fn render_to_view(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        depth: &DepthBuffer,
        clear_color: wgpu::Color,
    ) -> FrameStats {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene-encoder"),
        });
        let mut stats = FrameStats {
            draw_calls: 0,
            skipped_labels: self.label_count as u32,
        };
        {
            let mut pass = RenderPassBuilder::new()
                .clear_color(clear_color)
                .depth(&depth.view, DepthBuffer::CLEAR_VALUE)
                .label("scene-pass")
                .begin(&mut encoder, view);
            pass.set_bind_group(0, &self.frame_bind_group, &[]);

            for batch in DrawBatch::ORDER {
                let pipeline = match batch {
                    DrawBatch::Background | DrawBatch::Opaque => {
                        self.material.get(SurfaceMode::Opaque)
                    }
                    DrawBatch::Translucent => self.material.get(SurfaceMode::Translucent),
                    DrawBatch::Lines => &self.lines.pipeline,
                };
                let mut bound = false;
                for node in self.nodes.iter().filter(|n| n.batch == batch) {
                    if !bound {
                        pass.set_pipeline(pipeline);
                        bound = true;
                    }
                    pass.set_bind_group(1, &node.bind_group, &[]);
                    if let Some(texture) = &node.texture {
                        pass.set_bind_group(2, &texture.bind_group, &[]);
                    }
                    node.mesh.draw(&mut pass);
                    stats.draw_calls += 1;
                }
            }
        }
        queue.submit(std::iter::once(encoder.finish()));
        stats
    }

    /// Render into the window surface and present it.
    pub fn render(
        &self,
        ctx: &RenderContext,
        depth: &DepthBuffer,
        clear_color: wgpu::Color,
    ) -> Result<FrameStats, SceneRenderError> {
        let output = ctx.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let stats = self.render_to_view(&ctx.device, &ctx.queue, &view, depth, clear_color);
        output.present();
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetError, DecodedImage};
    use crate::test_support::create_test_device;
    use orrery_bodies::{TextureKey, solar_system};
    use orrery_orbit::{Animator, AngleWrap};
    use orrery_scene::{SceneComposer, SceneConfig};

    struct Checkerboard;

    impl TextureSource for Checkerboard {
        fn load(&self, key: &TextureKey) -> Result<DecodedImage, AssetError> {
            if key.as_str().contains("ring") {
                return Err(AssetError::NotFound {
                    key: key.to_string(),
                    path: key.as_str().into(),
                });
            }
            let rgba = [255u8, 255, 255, 255, 0, 0, 0, 255]
                .iter()
                .copied()
                .cycle()
                .take(4 * 4 * 4)
                .collect();
            Ok(DecodedImage {
                width: 4,
                height: 4,
                rgba,
            })
        }
    }

    fn composed() -> (orrery_bodies::SolarSystem, SceneComposer, Scene) {
        let system = solar_system().unwrap();
        let composer = SceneComposer::new(SceneConfig::default(), &system).unwrap();
        let scene = composer.compose(&system, &system.initial_states()).unwrap();
        (system, composer, scene)
    }

    #[test]
    fn test_batches_by_role_and_material() {
        let (_, _, scene) = composed();
        let batches: Vec<_> = scene
            .meshes()
            .map(|m| (m.role, DrawBatch::of(m)))
            .collect();
        for (role, batch) in batches {
            let expected = match role {
                NodeRole::Background => DrawBatch::Background,
                NodeRole::OrbitPath => DrawBatch::Lines,
                NodeRole::Ring => DrawBatch::Translucent,
                NodeRole::Sun | NodeRole::Planet => DrawBatch::Opaque,
            };
            assert_eq!(batch, expected, "{role:?}");
        }
    }

    #[test]
    fn test_batch_order_draws_translucent_last() {
        assert_eq!(DrawBatch::ORDER.last(), Some(&DrawBatch::Translucent));
        assert!(DrawBatch::Background < DrawBatch::Opaque);
        assert!(DrawBatch::Opaque < DrawBatch::Lines);
    }

    #[test]
    fn test_frame_uniform_reads_scene_lights() {
        let (_, _, scene) = composed();
        let mut camera = Camera::perspective(75.0, 1.0, 0.1, 2000.0);
        camera.look_at(Vec3::new(-90.0, 140.0, 140.0), Vec3::ZERO);
        let uniform = frame_uniform(&scene, &camera);
        assert_eq!(uniform.light_position, [0.0, 0.0, 0.0, 1.0]);
        assert!(uniform.ambient[0] > 0.0);
        assert!(uniform.light_color[0] > uniform.ambient[0]);
        assert_eq!(uniform.camera_pos, [-90.0, 140.0, 140.0, 1.0]);
    }

    #[test]
    fn test_model_uniform_lights_planets_only() {
        let (_, _, scene) = composed();
        for node in scene.meshes() {
            let lit = model_uniform(node).params[0] > 0.5;
            assert_eq!(lit, node.role == NodeRole::Planet, "{}", node.name);
        }
    }

    #[test]
    fn test_renders_offscreen_frame() {
        let Some((device, queue)) = create_test_device() else {
            return;
        };
        let (system, composer, scene) = composed();
        let format = wgpu::TextureFormat::Rgba8UnormSrgb;
        let mut renderer = SceneRenderer::new(&device, &queue, format, &scene, &Checkerboard).unwrap();
        assert_eq!(renderer.node_count(), scene.meshes().count());
        assert_eq!(renderer.batch_len(DrawBatch::Background), 1);
        assert_eq!(renderer.batch_len(DrawBatch::Translucent), 2);

        let mut states = system.initial_states();
        Animator::new(AngleWrap::Tau)
            .advance_by(&system, &mut states, 30)
            .unwrap();
        let next = composer.compose(&system, &states).unwrap();
        let camera = Camera::default();
        renderer.update(&queue, &next, &camera).unwrap();

        let target = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("offscreen"),
            size: wgpu::Extent3d {
                width: 64,
                height: 64,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = target.create_view(&wgpu::TextureViewDescriptor::default());
        let depth = DepthBuffer::new(&device, 64, 64);
        let stats = renderer.render_to_view(&device, &queue, &view, &depth, wgpu::Color::BLACK);
        assert_eq!(stats.draw_calls as usize, renderer.node_count());
    }

    #[test]
    fn test_update_rejects_different_scene_shape() {
        let Some((device, queue)) = create_test_device() else {
            return;
        };
        let (_, _, scene) = composed();
        let mut renderer = SceneRenderer::new(
            &device,
            &queue,
            wgpu::TextureFormat::Rgba8UnormSrgb,
            &scene,
            &Checkerboard,
        )
        .unwrap();
        let mut smaller = scene.clone();
        smaller.nodes.pop();
        let err = renderer
            .update(&queue, &smaller, &Camera::default())
            .unwrap_err();
        assert!(matches!(err, SceneRenderError::NodeCountMismatch { .. }));
    }
}
