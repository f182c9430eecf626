//! wgpu rendering for orrery scenes: surface management, geometry upload,
//! textures, pipelines and per-frame drawing.

pub mod assets;
pub mod buffer;
pub mod camera;
pub mod depth;
pub mod geometry;
pub mod gpu;
pub mod pass;
pub mod pipeline;
pub mod scene_renderer;
pub mod texture;

pub use assets::{AssetError, DecodedImage, DirectoryTextureSource, TextureSource, load_or_white};
pub use buffer::{BufferAllocator, MeshBuffer, VertexPositionColor, VertexPositionNormalUv};
pub use camera::Camera;
pub use depth::DepthBuffer;
pub use geometry::MeshData;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use pass::{RenderPassBuilder, clear_color_from_rgb};
pub use pipeline::{FrameUniform, LIGHT_UNIT_SCALE, LinePipeline, MaterialPipeline, ModelUniform};
pub use scene_renderer::{DrawBatch, FrameStats, SceneRenderError, SceneRenderer};
pub use texture::{ManagedTexture, TextureError, TextureManager};

#[cfg(test)]
pub(crate) mod test_support {
    /// Headless device for GPU tests. `None` on machines without an adapter.
    pub(crate) fn create_test_device() -> Option<(wgpu::Device, wgpu::Queue)> {
        pollster::block_on(async {
            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::all(),
                ..Default::default()
            });

            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::default(),
                    compatible_surface: None,
                    force_fallback_adapter: false,
                })
                .await
                .ok()?;

            adapter
                .request_device(&wgpu::DeviceDescriptor::default())
                .await
                .ok()
        })
    }
}
