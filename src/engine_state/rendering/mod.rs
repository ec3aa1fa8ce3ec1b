//! Rendering system for the voxel engine.
//!
//! This module contains the core rendering functionality, including mesh
//! generation, pipeline setup, and the per-frame render call. It provides a
//! high-level interface for rendering voxel chunks using WebGPU.

use image::RgbaImage;
use pipeline_manager::PipelineManager;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};

use crate::{core::StSystem, error::EngineError};

use super::{buffer_state::BufferState, camera_state::camera};

mod bind_group_state;
pub mod meshing;
mod pipeline_manager;
mod texture;
mod vertex;

// Re-export commonly used types
pub use meshing::GpuMeshResource;
pub use vertex::Vertex;

/// Manages the entire rendering pipeline for the voxel engine.
///
/// This struct is the main entry point for all rendering operations.
/// It manages the WebGPU surface, device, queue, and rendering pipeline.
pub struct MeshRendererManager {
    /// The WebGPU surface being rendered to
    pub surface: Surface<'static>,
    /// Configuration for the surface (size, format, etc.)
    pub surface_config: SurfaceConfiguration,
    /// The WebGPU device used for creating GPU resources
    pub device: StSystem<Device>,
    /// The WebGPU queue for submitting command buffers
    pub queue: StSystem<Queue>,
    /// Manages the rendering pipeline and shaders
    pub pipeline_manager: PipelineManager,
    /// Camera projection settings
    pub camera_projection: camera::Projection,
}

impl MeshRendererManager {
    /// Creates a new `MeshRendererManager` instance.
    ///
    /// This initializes the graphics pipeline, the block texture and the
    /// depth buffer.
    ///
    /// # Arguments
    /// * `surface` - The WebGPU surface to render to
    /// * `surface_config` - Configuration for the surface
    /// * `device` - The shared WebGPU device
    /// * `queue` - The shared WebGPU queue
    /// * `buffer_state` - Shared buffer registry; must already hold the camera buffer
    /// * `shader_string` - WGSL source code for the shaders
    /// * `texture_image` - Decoded block texture
    /// * `camera_projection` - Initial camera projection settings
    /// * `clear_color` - Background colour
    ///
    /// # Errors
    /// Returns an error if the pipeline's bind groups cannot be built.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        surface: Surface<'static>,
        surface_config: SurfaceConfiguration,
        device: StSystem<Device>,
        queue: StSystem<Queue>,
        buffer_state: StSystem<BufferState>,
        shader_string: &str,
        texture_image: &RgbaImage,
        camera_projection: camera::Projection,
        clear_color: wgpu::Color,
    ) -> Result<Self, EngineError> {
        let pipeline_manager = PipelineManager::new(
            device.clone(),
            queue.clone(),
            &surface_config,
            surface_config.format,
            buffer_state,
            shader_string,
            texture_image,
            clear_color,
        )?;

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            pipeline_manager,
            camera_projection,
        })
    }

    /// Handles window resize events.
    ///
    /// Updates the surface configuration, camera projection, and pipeline
    /// to match the new window size. A zero-sized window is ignored.
    ///
    /// # Arguments
    /// * `size` - The new window size in physical pixels
    pub fn resize_surface(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }

        self.surface_config.width = size.width;
        self.surface_config.height = size.height;

        self.surface.configure(&self.device.get(), &self.surface_config);

        self.camera_projection.resize(size.width, size.height);
        self.pipeline_manager
            .resize(self.device.clone(), &self.surface_config);
    }

    /// Renders a new frame.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped. Other
    /// surface errors are logged and the frame skipped.
    ///
    /// # Arguments
    /// * `resources` - Chunk and seam mesh resources to draw
    pub fn render(&mut self, resources: &mut [GpuMeshResource]) {
        let result = self.pipeline_manager.render(
            &self.surface,
            self.device.clone(),
            self.queue.clone(),
            resources,
        );

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device.get(), &self.surface_config);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timed out acquiring the next frame");
            }
            Err(error) => {
                log::error!("Error getting current frame: {:?}", error);
            }
        }
    }
}
