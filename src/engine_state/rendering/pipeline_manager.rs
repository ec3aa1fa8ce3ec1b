//! Manages the WebGPU render pipeline and associated rendering resources.
//!
//! This module is responsible for coordinating the rendering process by managing
//! the meshing renderer, shared resources, and the render pass configuration.
//!
//! # Architecture
//!
//! - `PipelineManager`: Coordinates the overall rendering process
//! - `MeshingRenderer`: Handles chunk and seam mesh rendering with its own pipeline
//!
//! # Resource Management
//!
//! The pipeline manager initializes and maintains shared resources:
//!
//! - Bind groups for the camera uniform and the block texture
//! - The depth texture, recreated on resize

use image::RgbaImage;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration, TextureFormat};

use crate::{
    core::StSystem,
    engine_state::{
        buffer_state::BufferState,
        rendering::meshing::{GpuMeshResource, MeshingRenderer},
    },
    error::EngineError,
};

use super::{bind_group_state::BindGroupState, texture};

/// Manages the WebGPU rendering process and associated rendering resources.
///
/// This struct is responsible for:
/// 1. Owning the meshing renderer
/// 2. Maintaining shared resources (bind groups, depth texture)
/// 3. Configuring and executing the frame's render pass
pub struct PipelineManager {
    /// Manages all bind groups used in the pipeline
    pub bind_group_state: StSystem<BindGroupState>,
    /// Shared state for buffer management
    pub buffer_state: StSystem<BufferState>,
    /// Depth texture used for depth testing
    pub depth_texture: texture::Texture,
    /// Meshing renderer for voxel meshes
    pub meshing_renderer: MeshingRenderer,
    /// Colour the frame is cleared to before drawing
    clear_color: wgpu::Color,
}

impl PipelineManager {
    /// Creates a new `PipelineManager` instance.
    ///
    /// # Arguments
    /// * `device` - The WebGPU device
    /// * `queue` - The WebGPU queue for uploads
    /// * `config` - Surface configuration containing size and format
    /// * `texture_format` - The texture format to use for rendering
    /// * `buffer_state` - Shared state for buffer management; must hold the camera buffer
    /// * `shader_string` - The WGSL shader source code for mesh rendering
    /// * `texture_image` - The decoded block texture
    /// * `clear_color` - Background colour
    ///
    /// # Errors
    /// Returns an error if a bind group cannot be built.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        device: StSystem<Device>,
        queue: StSystem<Queue>,
        config: &SurfaceConfiguration,
        texture_format: TextureFormat,
        buffer_state: StSystem<BufferState>,
        shader_string: &str,
        texture_image: &RgbaImage,
        clear_color: wgpu::Color,
    ) -> Result<Self, EngineError> {
        let bind_group_state = StSystem::new(BindGroupState::new(
            device.clone(),
            buffer_state.clone(),
            queue,
            texture_image,
        )?);

        let depth_texture =
            texture::Texture::create_depth_texture(&device.get(), config, "DEPTH TEXTURE");

        let depth_stencil = Some(wgpu::DepthStencilState {
            format: texture::Texture::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let meshing_renderer = MeshingRenderer::new(
            device,
            buffer_state.clone(),
            shader_string,
            texture_format,
            bind_group_state.clone(),
            depth_stencil,
        )?;

        Ok(Self {
            bind_group_state,
            buffer_state,
            depth_texture,
            meshing_renderer,
            clear_color,
        })
    }

    /// Renders a frame to the given surface.
    ///
    /// 1. Acquires the next frame from the surface
    /// 2. Clears colour and depth
    /// 3. Draws every mesh resource
    /// 4. Submits commands to the GPU and presents the frame
    ///
    /// # Arguments
    /// * `surface` - The target surface to render to
    /// * `device` - The WebGPU device for creating the command encoder
    /// * `queue` - The WebGPU queue for command submission
    /// * `resources` - Chunk and seam mesh resources to draw
    ///
    /// # Errors
    /// Returns the surface error if no frame could be acquired. Nothing is
    /// drawn in that case.
    pub fn render(
        &mut self,
        surface: &Surface,
        device: StSystem<Device>,
        queue: StSystem<Queue>,
        resources: &mut [GpuMeshResource],
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = surface.get_current_texture()?;

        let view = frame.texture.create_view(&Default::default());
        let mut encoder = device.get().create_command_encoder(&Default::default());
        {
            let depth_stencil_attachment = Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            });
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Voxel Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment,
                ..Default::default()
            });

            self.meshing_renderer.render(&mut rpass, resources);
        }

        queue.get().submit([encoder.finish()]);
        frame.present();
        Ok(())
    }

    /// Handles window resize events by recreating the depth texture.
    ///
    /// # Arguments
    /// * `device` - The WebGPU device
    /// * `config` - The new surface configuration containing the updated size
    pub fn resize(&mut self, device: StSystem<Device>, config: &SurfaceConfiguration) {
        self.depth_texture =
            texture::Texture::create_depth_texture(&device.get(), config, "DEPTH TEXTURE");
    }
}
