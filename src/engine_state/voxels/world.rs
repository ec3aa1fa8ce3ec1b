//! # World Module
//!
//! This module provides the `World` struct which holds every chunk of the
//! voxel world and answers which chunks are adjacent.
//!
//! ## Architecture
//!
//! The world is a square lattice of `width x width` chunks stored in a flat
//! arena. Chunks are addressed by [`ChunkIndex`]; lattice coordinate `(i, j)`
//! lives at index `i + j * width`. The lattice runs along world X and Y and
//! every chunk sits at Z = 0, so terrain height grows along Z.
//!
//! ## Chunk Generation
//!
//! Block data comes from a [`TerrainGenerator`]. The boundary face policy of
//! each chunk is chosen from [`BoundaryMode`]: in `auto` mode a boundary face
//! is hidden only where a neighbouring chunk exists and seam meshes are built,
//! so the outer walls of the world are still drawn.
//!
//! A seam is only built between two chunks that both hide their shared side.
//! With visible boundaries the chunk meshes already cover that plane.

use cgmath::Point3;

use crate::{
    config::{BoundaryMode, EngineConfig},
    engine_state::{
        rendering::meshing::{
            self, BoundaryFaces, BoundaryPolicy, ChunkMeshResource, Mesh, MeshBufferDevice,
            MAX_SEAM_VERTICES,
        },
        voxels::{block::block_side::BlockSide, chunk::Chunk, terrain::TerrainGenerator},
    },
    error::ResourceError,
};

/// Position of a chunk in the world arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkIndex(usize);

impl ChunkIndex {
    /// Offset of the chunk in [`World::chunks`].
    pub fn get(self) -> usize {
        self.0
    }
}

/// A square lattice of chunks.
///
/// # Examples
///
/// ```no_run
/// use voxelize::{EngineConfig, SineHeightField, World};
///
/// let config = EngineConfig {
///     world_width: 2,
///     ..EngineConfig::default()
/// };
/// let world = World::generate(&config, &SineHeightField::default());
/// assert_eq!(world.len(), 4);
/// assert_eq!(world.adjacent_pairs().len(), 4);
/// assert_eq!(world.seam_pairs().len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct World {
    /// Chunks along each side of the lattice
    width: usize,
    /// All chunks, row by row along X
    chunks: Vec<Chunk>,
    /// Whether seam meshes are built between hidden boundaries
    seams: bool,
}

impl World {
    /// Generates every chunk of the lattice.
    ///
    /// # Arguments
    /// * `config` - Supplies the lattice width, boundary mode and seam flag
    /// * `generator` - Fills each chunk's block grid
    pub fn generate(config: &EngineConfig, generator: &dyn TerrainGenerator) -> Self {
        let width = config.world_width;
        let mut chunks = Vec::with_capacity(width * width);

        for j in 0..width {
            for i in 0..width {
                let position = Point3::new(i as i32, j as i32, 0);
                let boundary =
                    Self::boundary_for(width, i, j, config.boundary_faces, config.seams);
                let chunk = Chunk::new(
                    position,
                    Self::chunk_origin(width, i, j),
                    generator.generate(position),
                )
                .with_boundary(boundary);
                chunks.push(chunk);
            }
        }

        log::info!(
            "Generated {} chunks ({} x {})",
            chunks.len(),
            width,
            width
        );
        Self {
            width,
            chunks,
            seams: config.seams,
        }
    }

    /// World-space minimum corner of lattice cell `(i, j)`.
    ///
    /// The lattice is centred on the origin, so cell `(i, j)` starts at
    /// `(i - width / 2, j - width / 2, 0)`.
    pub fn chunk_origin(width: usize, i: usize, j: usize) -> Point3<f32> {
        let half = (width / 2) as i32;
        Point3::new((i as i32 - half) as f32, (j as i32 - half) as f32, 0.0)
    }

    fn boundary_for(
        width: usize,
        i: usize,
        j: usize,
        mode: BoundaryMode,
        seams: bool,
    ) -> BoundaryFaces {
        match mode {
            BoundaryMode::Hidden => BoundaryFaces::HIDDEN,
            BoundaryMode::Visible => BoundaryFaces::VISIBLE,
            BoundaryMode::Auto => {
                let mut boundary = BoundaryFaces::VISIBLE;
                if seams {
                    for side in BlockSide::all() {
                        if Self::lattice_step(width, i, j, side).is_some() {
                            boundary.set(side, BoundaryPolicy::Hidden);
                        }
                    }
                }
                boundary
            }
        }
    }

    /// The lattice cell next to `(i, j)` across `side`, if it exists.
    fn lattice_step(width: usize, i: usize, j: usize, side: BlockSide) -> Option<(usize, usize)> {
        let (i, j) = match side {
            BlockSide::RIGHT => (i.checked_add(1)?, j),
            BlockSide::LEFT => (i.checked_sub(1)?, j),
            BlockSide::TOP => (i, j.checked_add(1)?),
            BlockSide::BOTTOM => (i, j.checked_sub(1)?),
            // The lattice is one chunk deep.
            BlockSide::FRONT | BlockSide::BACK => return None,
        };
        (i < width && j < width).then_some((i, j))
    }

    /// Number of chunks along each side of the lattice.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns `true` if the world holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// All chunks in arena order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// The chunk at `index`.
    pub fn chunk(&self, index: ChunkIndex) -> Option<&Chunk> {
        self.chunks.get(index.0)
    }

    /// Arena index of lattice cell `(i, j)`.
    pub fn index_of(&self, i: usize, j: usize) -> Option<ChunkIndex> {
        (i < self.width && j < self.width).then_some(ChunkIndex(i + j * self.width))
    }

    /// Every chunk index in arena order.
    pub fn indices(&self) -> impl Iterator<Item = ChunkIndex> {
        (0..self.chunks.len()).map(ChunkIndex)
    }

    /// The chunk adjacent to `index` across `side`.
    ///
    /// # Returns
    /// `None` on the edge of the lattice, for `FRONT` and `BACK`, and for an
    /// index outside the world
    pub fn neighbour(&self, index: ChunkIndex, side: BlockSide) -> Option<ChunkIndex> {
        if index.0 >= self.chunks.len() {
            return None;
        }
        let (i, j) = (index.0 % self.width, index.0 / self.width);
        let (ni, nj) = Self::lattice_step(self.width, i, j, side)?;
        self.index_of(ni, nj)
    }

    /// Every pair of adjacent chunks, each pair once.
    ///
    /// # Returns
    /// `(a, b, side)` triples where `b` is the neighbour of `a` across `side`.
    /// `side` is always `RIGHT` or `TOP`.
    pub fn adjacent_pairs(&self) -> Vec<(ChunkIndex, ChunkIndex, BlockSide)> {
        let mut pairs = Vec::new();
        for index in self.indices() {
            for side in [BlockSide::RIGHT, BlockSide::TOP] {
                if let Some(neighbour) = self.neighbour(index, side) {
                    pairs.push((index, neighbour, side));
                }
            }
        }
        pairs
    }

    /// The adjacent pairs that get a seam mesh.
    ///
    /// A pair qualifies when seams are enabled and both chunks hide the
    /// side they share. Otherwise at least one chunk draws that plane itself
    /// and a seam would duplicate its faces.
    pub fn seam_pairs(&self) -> Vec<(ChunkIndex, ChunkIndex, BlockSide)> {
        if !self.seams {
            return Vec::new();
        }
        self.adjacent_pairs()
            .into_iter()
            .filter(|&(a, b, side)| {
                let hidden = |index: ChunkIndex, side: BlockSide| {
                    self.chunk(index)
                        .is_some_and(|chunk| chunk.boundary.get(side) == BoundaryPolicy::Hidden)
                };
                hidden(a, side) && hidden(b, side.opposite())
            })
            .collect()
    }

    /// Uploads every chunk mesh and every non-empty seam mesh.
    ///
    /// Chunks come first in arena order, then seams in [`World::seam_pairs`]
    /// order. Seam resources are sized for one plane of faces.
    ///
    /// # Errors
    /// The first resource that fails to initialize or upload.
    pub fn upload_meshes<D: MeshBufferDevice + Clone>(
        &self,
        device: &D,
    ) -> Result<Vec<ChunkMeshResource<D>>, ResourceError> {
        let mut resources = Vec::with_capacity(self.len() * 3);

        for (index, chunk) in self.chunks.iter().enumerate() {
            let mut resource = ChunkMeshResource::new(device.clone(), &format!("Chunk {index}"));
            resource.initialize()?;
            resource.upload_chunk(chunk)?;
            resources.push(resource);
        }

        let mut empty_seams = 0;
        for (a, b, side) in self.seam_pairs() {
            let Some(mesh) = self.mesh_seam(a, side) else {
                continue;
            };
            if mesh.is_empty() {
                empty_seams += 1;
                continue;
            }
            let mut resource = ChunkMeshResource::with_capacity(
                device.clone(),
                &format!("Seam {}-{}", a.get(), b.get()),
                MAX_SEAM_VERTICES,
            );
            resource.initialize()?;
            resource.upload(mesh)?;
            resources.push(resource);
        }

        log::debug!("Skipped {} empty seams", empty_seams);
        Ok(resources)
    }

    /// Builds the mesh of one chunk.
    pub fn mesh_chunk(&self, index: ChunkIndex) -> Option<Mesh> {
        self.chunk(index).map(Chunk::build_mesh)
    }

    /// Builds the seam mesh between `index` and its neighbour across `side`.
    ///
    /// # Returns
    /// `None` if there is no neighbour on that side
    pub fn mesh_seam(&self, index: ChunkIndex, side: BlockSide) -> Option<Mesh> {
        let neighbour = self.neighbour(index, side)?;
        Some(meshing::mesh_seam(
            self.chunk(index)?,
            self.chunk(neighbour)?,
            side,
        ))
    }
}
