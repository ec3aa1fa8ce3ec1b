//! # Errors
//!
//! Error types for each layer of the renderer. Grid and mesh errors come from
//! the voxel data, resource errors from the GPU buffer lifecycle, and engine
//! errors from the window, device and asset collaborators.

use std::path::PathBuf;

use thiserror::Error;

use crate::engine_state::rendering::meshing::ResourceState;

/// Errors raised when addressing cells of a block grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("block coordinate ({x}, {y}, {z}) is outside the chunk")]
    OutOfBounds { x: usize, y: usize, z: usize },
}

/// Errors raised while preparing a mesh for upload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("mesh needs {required} vertices but the buffer holds {capacity}")]
    CapacityExceeded { required: usize, capacity: usize },
}

/// Errors raised by the named GPU buffer registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("no GPU buffer named '{0}'")]
    Missing(String),

    #[error("write of {len} bytes at offset {offset} overflows buffer '{name}' ({size} bytes)")]
    OutOfBounds {
        name: String,
        offset: u64,
        len: u64,
        size: u64,
    },
}

/// Errors raised by a chunk mesh resource.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceError {
    #[error("cannot {operation} a mesh resource in the {state:?} state")]
    InvalidState {
        operation: &'static str,
        state: ResourceState,
    },

    #[error("mesh resource has already been released")]
    Released,

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Errors raised while bringing up the window, the GPU and the assets.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("WebGPU adapter not found: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to request GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    SurfaceFormat,

    #[error("failed to read shader '{path}': {source}")]
    Shader {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to load texture '{path}': {source}")]
    Texture {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to read config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("bind group '{0}' was never created")]
    MissingBindGroup(&'static str),

    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error(transparent)]
    Resource(#[from] ResourceError),
}
