//! Material and line pipelines plus their uniform layouts.
//!
//! Bind groups: 0 = per-frame camera and lights, 1 = per-node model
//! transform and material parameters, 2 = texture and sampler (surfaces only).

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::buffer::{VertexPositionColor, VertexPositionNormalUv};
use crate::depth::DepthBuffer;

/// Converts configured light intensities into shader radiance. An ambient
/// intensity of 1 lights unlit sides at a quarter of full albedo.
pub const LIGHT_UNIT_SCALE: f32 = 0.25;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    /// Pre-scaled ambient radiance in `rgb`.
    pub ambient: [f32; 4],
    pub light_position: [f32; 4],
    /// Pre-scaled point light radiance in `rgb`.
    pub light_color: [f32; 4],
}

impl FrameUniform {
    pub fn new(
        view_proj: Mat4,
        camera_pos: Vec3,
        ambient: ([f32; 3], f32),
        point: (Vec3, [f32; 3], f32),
    ) -> Self {
        let scale = |rgb: [f32; 3], intensity: f32| {
            let k = intensity * LIGHT_UNIT_SCALE;
            [rgb[0] * k, rgb[1] * k, rgb[2] * k, 1.0]
        };
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: camera_pos.extend(1.0).to_array(),
            ambient: scale(ambient.0, ambient.1),
            light_position: point.0.extend(1.0).to_array(),
            light_color: scale(point.1, point.2),
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
    pub tint: [f32; 4],
    /// `x`: 1.0 for lit shading, 0.0 for unlit.
    pub params: [f32; 4],
}

impl ModelUniform {
    pub fn new(model: Mat4, tint: [f32; 4], lit: bool) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            tint,
            params: [if lit { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

fn uniform_layout(
    device: &wgpu::Device,
    label: &str,
    visibility: wgpu::ShaderStages,
    size: usize,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: NonZeroU64::new(size as u64),
            },
            count: None,
        }],
    })
}

/// Layouts for the frame (group 0) and model (group 1) uniforms.
pub struct UniformLayouts {
    pub frame: wgpu::BindGroupLayout,
    pub model: wgpu::BindGroupLayout,
}

impl UniformLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let stages = wgpu::ShaderStages::VERTEX_FRAGMENT;
        Self {
            frame: uniform_layout(
                device,
                "frame-bind-group-layout",
                stages,
                std::mem::size_of::<FrameUniform>(),
            ),
            model: uniform_layout(
                device,
                "model-bind-group-layout",
                stages,
                std::mem::size_of::<ModelUniform>(),
            ),
        }
    }

    pub fn bind_group(
        device: &wgpu::Device,
        label: &str,
        layout: &wgpu::BindGroupLayout,
        buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        })
    }
}

/// How a surface is blended and culled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceMode {
    /// Back-face culled, depth written.
    Opaque,
    /// Alpha-blended, both faces, depth tested but not written.
    Translucent,
}

/// Textured triangle pipelines, one per [`SurfaceMode`].
pub struct MaterialPipeline {
    pub opaque: wgpu::RenderPipeline,
    pub translucent: wgpu::RenderPipeline,
}

impl MaterialPipeline {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        layouts: &UniformLayouts,
        texture_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("material-shader"),
            source: wgpu::ShaderSource::Wgsl(MATERIAL_SHADER_SOURCE.into()),
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("material-pipeline-layout"),
            bind_group_layouts: &[&layouts.frame, &layouts.model, texture_layout],
            immediate_size: 0,
        });

        let build = |mode: SurfaceMode| {
            let (label, cull_mode, blend, depth_write) = match mode {
                SurfaceMode::Opaque => ("material-opaque", Some(wgpu::Face::Back), None, true),
                SurfaceMode::Translucent => (
                    "material-translucent",
                    None,
                    Some(wgpu::BlendState::ALPHA_BLENDING),
                    false,
                ),
            };
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[VertexPositionNormalUv::layout()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode,
                    unclipped_depth: false,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    conservative: false,
                },
                depth_stencil: Some(DepthBuffer::depth_stencil_state(depth_write)),
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                multiview_mask: None,
                cache: None,
            })
        };

        Self {
            opaque: build(SurfaceMode::Opaque),
            translucent: build(SurfaceMode::Translucent),
        }
    }

    pub fn get(&self, mode: SurfaceMode) -> &wgpu::RenderPipeline {
        match mode {
            SurfaceMode::Opaque => &self.opaque,
            SurfaceMode::Translucent => &self.translucent,
        }
    }
}

/// Colored line-strip pipeline for orbit paths.
pub struct LinePipeline {
    pub pipeline: wgpu::RenderPipeline,
}

impl LinePipeline {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        layouts: &UniformLayouts,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("line-shader"),
            source: wgpu::ShaderSource::Wgsl(LINE_SHADER_SOURCE.into()),
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("line-pipeline-layout"),
            bind_group_layouts: &[&layouts.frame, &layouts.model],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line-pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[VertexPositionColor::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineStrip,
                strip_index_format: Some(wgpu::IndexFormat::Uint32),
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(DepthBuffer::depth_stencil_state(true)),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self { pipeline }
    }
}

macro_rules! shared_uniforms {
    () => {
r#"
struct FrameUniform {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    ambient: vec4<f32>,
    light_position: vec4<f32>,
    light_color: vec4<f32>,
};

struct ModelUniform {
    model: mat4x4<f32>,
    tint: vec4<f32>,
    params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> frame: FrameUniform;
@group(1) @binding(0)
var<uniform> node: ModelUniform;
"#
    };
}

/// WGSL for textured surfaces. `node.params.x` switches diffuse lighting on.
pub const MATERIAL_SHADER_SOURCE: &str = concat!(
    shared_uniforms!(),
    r#"
@group(2) @binding(0)
var t_diffuse: texture_2d<f32>;
@group(2) @binding(1)
var s_diffuse: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    let world = node.model * vec4<f32>(in.position, 1.0);
    var out: VertexOutput;
    out.clip_position = frame.view_proj * world;
    out.world_position = world.xyz;
    // Body transforms are rotations and translations only.
    out.world_normal = (node.model * vec4<f32>(in.normal, 0.0)).xyz;
    out.uv = in.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let albedo = textureSample(t_diffuse, s_diffuse, in.uv) * node.tint;
    var rgb = albedo.rgb;
    if (node.params.x > 0.5) {
        let n = normalize(in.world_normal);
        let l = normalize(frame.light_position.xyz - in.world_position);
        let diffuse = max(dot(n, l), 0.0);
        rgb = albedo.rgb * (frame.ambient.rgb + frame.light_color.rgb * diffuse);
    }
    return vec4<f32>(rgb, albedo.a);
}
"#
);

/// WGSL for per-vertex colored lines.
pub const LINE_SHADER_SOURCE: &str = concat!(
    shared_uniforms!(),
    r#"
struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = frame.view_proj * node.model * vec4<f32>(in.position, 1.0);
    out.color = in.color * node.tint;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#
);
