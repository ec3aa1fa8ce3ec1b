#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxelize
//!
//! A minimal voxel terrain renderer built with Rust and WGPU.
//!
//! The world is a square lattice of `8 x 8 x 8` chunks. Each chunk is filled
//! by a terrain generator, turned into a triangle mesh of its visible faces,
//! and uploaded once into its own GPU vertex and index buffers. Seam meshes
//! cover the faces between adjacent chunks.
//!
//! ## Key Modules
//!
//! * `application_state` - Window creation, the event loop handler and input
//! * `config` - Runtime settings read from `voxelize.json`
//! * `core` - Single-threaded shared-ownership containers
//! * `engine_state` - Voxel data, meshing, GPU resources and rendering
//! * `error` - Error types for every layer
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     if let Err(error) = voxelize::run() {
//!         eprintln!("{error}");
//!     }
//! }
//! ```
//!
//! The meshing layer does not need a GPU:
//!
//! ```
//! use voxelize::{BlockGrid, BoundaryFaces, Mesh, STONE};
//! use cgmath::Point3;
//!
//! let mut grid = BlockGrid::empty();
//! grid.set_block_at(0, 0, 0, STONE).unwrap();
//! let mesh = Mesh::build(&grid, Point3::new(0.0, 0.0, 0.0), &BoundaryFaces::VISIBLE);
//! assert_eq!(mesh.face_count(), 6);
//! ```

use application_state::{graphics_resources_builder::GraphicsEvent, ApplicationState};
use winit::event_loop::EventLoop;

pub mod application_state;
pub mod config;
pub mod core;
pub mod engine_state;
pub mod error;

pub use config::{BoundaryMode, EngineConfig, TerrainKind};
pub use engine_state::{
    rendering::{
        meshing::{
            is_face_visible, mesh_seam, visible_faces, BoundaryFaces, BoundaryPolicy,
            ChunkMeshResource, Face, Mesh, MeshBufferDevice, MeshBufferUsage, MeshDrawTarget,
            ResourceState, BLOCK_SCALE, INDEX_BUFFER_SIZE, MAX_MESH_VERTICES, MAX_SEAM_VERTICES,
            VERTEX_BUFFER_SIZE, VERTICES_PER_FACE, index_buffer_size, vertex_buffer_size,
        },
        Vertex,
    },
    voxels::{
        block::{block_side::BlockSide, is_solid, BlockId, AIR, STONE},
        chunk::{BlockGrid, Chunk, CHUNK_DIMENSION, CHUNK_PLANE_SIZE, CHUNK_SIZE},
        terrain::{
            PerlinHeightField, RandomFill, SineHeightField, TerrainGenerator, UniformFill,
        },
        world::{ChunkIndex, World},
    },
};
pub use error::{BufferError, EngineError, GridError, MeshError, ResourceError};

/// Loads the configuration, opens the window and runs until it is closed.
///
/// The logger reads its filter from `RUST_LOG`.
///
/// # Errors
///
/// Returns the first fatal error: a bad configuration file, a missing asset,
/// or a window, adapter or device that could not be created.
pub fn run() -> Result<(), EngineError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    log::info!("Logger initialized");

    let config = EngineConfig::load()?;
    let event_loop = EventLoop::<GraphicsEvent>::with_user_event().build()?;

    let mut state = ApplicationState::new(event_loop.create_proxy(), config);

    event_loop.run_app(&mut state)?;

    match state.error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
