//! Meshing renderer module for the voxel engine.
//!
//! This module owns the render pipeline for chunk and seam meshes and drives
//! each [`ChunkMeshResource`] through its bind, draw and unbind steps.
//!
//! # Architecture
//!
//! The meshing renderer is responsible for:
//! 1. Creating and managing its own render pipeline
//! 2. Setting up the camera and texture bind groups
//! 3. Issuing one indexed draw per populated mesh resource

use wgpu::{Device, RenderPass, RenderPipeline, TextureFormat};

use crate::{
    core::StSystem,
    engine_state::{
        buffer_state::BufferState,
        rendering::{
            bind_group_state::{
                BindGroupState, CAMERA_BIND_GROUP, CAMERA_BIND_GROUP_LAYOUT, TEXTURE_BIND_GROUP,
                TEXTURE_BIND_GROUP_LAYOUT,
            },
            Vertex,
        },
    },
    error::{BufferError, EngineError},
};

use super::{ChunkMeshResource, MeshDrawTarget};

/// A mesh resource whose buffers live in the shared [`BufferState`].
pub type GpuMeshResource = ChunkMeshResource<StSystem<BufferState>>;

/// Adapts a live render pass to the [`MeshDrawTarget`] interface.
///
/// Buffer names are resolved through the buffer registry.
pub struct RenderPassTarget<'a, 'pass> {
    pass: &'a mut RenderPass<'pass>,
    buffers: &'a BufferState,
}

impl<'a, 'pass> RenderPassTarget<'a, 'pass> {
    /// Wraps a render pass.
    pub fn new(pass: &'a mut RenderPass<'pass>, buffers: &'a BufferState) -> Self {
        Self { pass, buffers }
    }
}

impl MeshDrawTarget for RenderPassTarget<'_, '_> {
    fn set_vertex_buffer(&mut self, name: &str) -> Result<(), BufferError> {
        let buffer = self
            .buffers
            .get_buffer(name)
            .ok_or_else(|| BufferError::Missing(name.to_string()))?;
        self.pass.set_vertex_buffer(0, buffer.slice(..));
        Ok(())
    }

    fn set_index_buffer(&mut self, name: &str) -> Result<(), BufferError> {
        let buffer = self
            .buffers
            .get_buffer(name)
            .ok_or_else(|| BufferError::Missing(name.to_string()))?;
        self.pass
            .set_index_buffer(buffer.slice(..), wgpu::IndexFormat::Uint32);
        Ok(())
    }

    fn draw_indexed(&mut self, index_count: u32) {
        self.pass.draw_indexed(0..index_count, 0, 0..1);
    }
}

/// Manages mesh rendering in the voxel engine.
///
/// It encapsulates the render pipeline for voxel meshes, including pipeline
/// creation, bind group setup and draw commands.
pub struct MeshingRenderer {
    /// The WebGPU render pipeline for mesh rendering
    render_pipeline: RenderPipeline,
    /// Shared state for buffer management
    buffer_state: StSystem<BufferState>,
    /// Shared state for bind group management
    bind_group_state: StSystem<BindGroupState>,
}

impl MeshingRenderer {
    /// Creates a new `MeshingRenderer` instance.
    ///
    /// # Arguments
    /// * `device` - The WebGPU device
    /// * `buffer_state` - Shared state for buffer management
    /// * `shader_string` - The WGSL shader source code
    /// * `texture_format` - The texture format to use for rendering
    /// * `bind_group_state` - State for managing bind groups
    /// * `depth_stencil` - Optional depth stencil state
    ///
    /// # Errors
    /// Returns [`EngineError::MissingBindGroup`] if the camera or texture
    /// layout has not been created.
    pub fn new(
        device: StSystem<Device>,
        buffer_state: StSystem<BufferState>,
        shader_string: &str,
        texture_format: TextureFormat,
        bind_group_state: StSystem<BindGroupState>,
        depth_stencil: Option<wgpu::DepthStencilState>,
    ) -> Result<Self, EngineError> {
        let device_ref = device.get();
        let bind_groups = bind_group_state.get();

        let camera_layout = bind_groups
            .get_bind_group_layout(CAMERA_BIND_GROUP_LAYOUT)
            .ok_or(EngineError::MissingBindGroup(CAMERA_BIND_GROUP_LAYOUT))?;
        let texture_layout = bind_groups
            .get_bind_group_layout(TEXTURE_BIND_GROUP_LAYOUT)
            .ok_or(EngineError::MissingBindGroup(TEXTURE_BIND_GROUP_LAYOUT))?;

        let pipeline_layout = device_ref.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Render Pipeline Layout"),
            bind_group_layouts: &[camera_layout, texture_layout],
            push_constant_ranges: &[],
        });

        let shader = device_ref.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_string.into()),
        });

        let render_pipeline = device_ref.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Mesh Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: texture_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            // Faces are wound per side, not consistently outward, so both are drawn.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        drop(bind_groups);
        Ok(Self {
            render_pipeline,
            buffer_state,
            bind_group_state,
        })
    }

    /// Draws every mesh resource.
    ///
    /// Each resource is bound, drawn and unbound in turn. A resource that
    /// fails any step is logged and skipped so one bad chunk does not blank
    /// the frame.
    ///
    /// # Arguments
    /// * `render_pass` - The render pass to use for rendering
    /// * `resources` - Chunk and seam mesh resources to draw
    pub fn render(&self, render_pass: &mut RenderPass<'_>, resources: &mut [GpuMeshResource]) {
        render_pass.set_pipeline(&self.render_pipeline);

        {
            let bind_groups = self.bind_group_state.get();
            match (
                bind_groups.get_bind_group(CAMERA_BIND_GROUP),
                bind_groups.get_bind_group(TEXTURE_BIND_GROUP),
            ) {
                (Some(camera), Some(texture)) => {
                    render_pass.set_bind_group(0, camera, &[]);
                    render_pass.set_bind_group(1, texture, &[]);
                }
                _ => {
                    log::error!("Camera or texture bind group missing, skipping mesh pass");
                    return;
                }
            }
        }

        let buffers = self.buffer_state.get();
        let mut target = RenderPassTarget::new(render_pass, &buffers);

        for resource in resources.iter_mut() {
            let drawn = resource
                .bind(&mut target)
                .and_then(|_| resource.draw(&mut target))
                .and_then(|_| resource.unbind());
            if let Err(error) = drawn {
                log::error!(
                    "Failed to draw '{}': {}",
                    resource.vertex_buffer_name(),
                    error
                );
            }
        }
    }
}
