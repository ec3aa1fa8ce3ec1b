//! Vertex data structures and layouts for voxel rendering.
//!
//! This module defines the vertex format used for rendering voxels and the
//! matching attribute layout for the render pipeline.

use cgmath::Point3;

/// A vertex in the voxel rendering pipeline.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 20 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in world space
    position: [f32; 3],
    /// UV texture coordinates (0.0-1.0, origin at the bottom-left)
    tex_coords: [f32; 2],
}

impl Vertex {
    /// Number of `f32` components in a vertex.
    pub const FLOATS: usize = 5;

    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `position` - The 3D position of the vertex in world space
    /// * `tex_coords` - The UV texture coordinates
    pub fn new(position: Point3<f32>, tex_coords: [f32; 2]) -> Self {
        Vertex {
            position: position.into(),
            tex_coords,
        }
    }

    /// Position of the vertex in world space.
    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    /// Texture coordinates of the vertex.
    pub fn tex_coords(&self) -> [f32; 2] {
        self.tex_coords
    }

    /// Returns the vertex buffer layout description for the shader pipeline.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (vec3<f32>) at offset 0
    /// - `location = 1`: tex_coords (vec2<f32>) at offset 12
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}
