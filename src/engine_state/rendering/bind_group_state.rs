//! Manages WebGPU bind groups and their layouts.
//!
//! This module handles the creation and management of WebGPU bind groups and
//! their corresponding layouts. It provides a centralized way to manage GPU resources
//! that need to be accessed by shaders: the camera uniform buffer and the
//! block texture with its sampler.

use std::collections::HashMap;

use image::RgbaImage;
use wgpu::{BindGroup, BindGroupLayout, Device, Queue};

use crate::{
    core::StSystem,
    engine_state::{buffer_state::BufferState, camera_state::CAMERA_BUFFER_NAME},
    error::{BufferError, EngineError},
};

use super::texture::Texture;

/// Manages WebGPU bind groups and their layouts.
///
/// Bind groups and layouts are stored under the name constants at the bottom
/// of this module.
pub struct BindGroupState {
    /// Map of bind group names to their WebGPU bind group objects
    bind_groups: HashMap<&'static str, wgpu::BindGroup>,
    /// Map of bind group layout names to their WebGPU bind group layout objects
    bind_group_layouts: HashMap<&'static str, wgpu::BindGroupLayout>,
    /// Keeps the block texture alive for as long as its bind group
    #[allow(dead_code)]
    block_texture: Texture,
}

impl BindGroupState {
    /// Creates a new `BindGroupState` with the camera and texture bind groups.
    ///
    /// # Arguments
    /// * `device` - The WebGPU device
    /// * `buffer_state` - Shared state for buffer management; must already hold the camera buffer
    /// * `queue` - The WebGPU queue for the texture upload
    /// * `texture_image` - Decoded block texture
    ///
    /// # Errors
    /// Returns an error if the camera buffer does not exist yet.
    pub fn new(
        device: StSystem<Device>,
        buffer_state: StSystem<BufferState>,
        queue: StSystem<Queue>,
        texture_image: &RgbaImage,
    ) -> Result<Self, EngineError> {
        let mut bind_groups = HashMap::new();
        let mut bind_group_layouts = HashMap::new();

        let device = device.get();

        let (camera_bind_group, camera_bind_group_layout) =
            Self::generate_camera_bindgroups(&device, &buffer_state.get())?;

        bind_groups.insert(CAMERA_BIND_GROUP, camera_bind_group);
        bind_group_layouts.insert(CAMERA_BIND_GROUP_LAYOUT, camera_bind_group_layout);

        let block_texture = Texture::from_image(&device, &queue.get(), texture_image, "Block Texture");
        let (texture_bind_group, texture_bind_group_layout) =
            Self::generate_texture_bindgroups(&device, &block_texture);

        bind_groups.insert(TEXTURE_BIND_GROUP, texture_bind_group);
        bind_group_layouts.insert(TEXTURE_BIND_GROUP_LAYOUT, texture_bind_group_layout);

        Ok(Self {
            bind_groups,
            bind_group_layouts,
            block_texture,
        })
    }

    /// Retrieves a bind group by name.
    ///
    /// # Arguments
    /// * `name` - The name of the bind group to retrieve
    ///
    /// # Returns
    /// The requested bind group, or `None` if it was never created
    pub fn get_bind_group(&self, name: &'static str) -> Option<&wgpu::BindGroup> {
        self.bind_groups.get(name)
    }

    /// Retrieves a bind group layout by name.
    ///
    /// # Arguments
    /// * `name` - The name of the bind group layout to retrieve
    ///
    /// # Returns
    /// The requested layout, or `None` if it was never created
    pub fn get_bind_group_layout(&self, name: &'static str) -> Option<&wgpu::BindGroupLayout> {
        self.bind_group_layouts.get(name)
    }

    /// Creates bind groups for camera uniforms.
    ///
    /// The uniform is visible to the vertex stage, which applies the model,
    /// view and projection matrices.
    ///
    /// # Arguments
    /// * `device` - The WebGPU device
    /// * `buffer_state` - Shared state for buffer management
    ///
    /// # Returns
    /// A tuple containing the bind group and its layout
    fn generate_camera_bindgroups(
        device: &Device,
        buffer_state: &BufferState,
    ) -> Result<(BindGroup, BindGroupLayout), BufferError> {
        let camera_binding = buffer_state
            .get_entire_binding(CAMERA_BUFFER_NAME)
            .ok_or_else(|| BufferError::Missing(CAMERA_BUFFER_NAME.to_string()))?;

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some(CAMERA_BIND_GROUP_LAYOUT),
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_binding,
            }],
            label: Some(CAMERA_BIND_GROUP),
        });

        Ok((camera_bind_group, camera_bind_group_layout))
    }

    /// Creates the bind group for the block texture and its sampler.
    ///
    /// # Arguments
    /// * `device` - The WebGPU device
    /// * `texture` - The uploaded block texture
    ///
    /// # Returns
    /// A tuple containing the bind group and its layout
    fn generate_texture_bindgroups(device: &Device, texture: &Texture) -> (BindGroup, BindGroupLayout) {
        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        // This should match the filterable field of the corresponding Texture entry above.
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
                label: Some(TEXTURE_BIND_GROUP_LAYOUT),
            });

        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
            label: Some(TEXTURE_BIND_GROUP),
        });

        (texture_bind_group, texture_bind_group_layout)
    }
}

/// Name of the camera bind group
pub const CAMERA_BIND_GROUP: &str = "camera_bind_group";
/// Name of the camera bind group layout
pub const CAMERA_BIND_GROUP_LAYOUT: &str = "camera_bind_group_layout";
/// Name of the texture bind group
pub const TEXTURE_BIND_GROUP: &str = "texture_bind_group";
/// Name of the texture bind group layout
pub const TEXTURE_BIND_GROUP_LAYOUT: &str = "texture_bind_group_layout";
