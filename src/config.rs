//! # Engine Configuration
//!
//! Runtime settings for the renderer, read from a JSON file. Every key is
//! optional; anything left out falls back to the values in
//! [`EngineConfig::default`].
//!
//! The file path comes from the `VOXELIZE_CONFIG` environment variable and
//! defaults to `voxelize.json` in the working directory. A missing file is not
//! an error.
//!
//! ```json
//! {
//!     "world_width": 4,
//!     "terrain": "perlin",
//!     "boundary_faces": "visible"
//! }
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::EngineError;

/// Environment variable naming the configuration file
pub const CONFIG_PATH_VARIABLE: &str = "VOXELIZE_CONFIG";
/// Configuration file used when the environment variable is unset
pub const DEFAULT_CONFIG_PATH: &str = "voxelize.json";

/// Which terrain generator fills new chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainKind {
    /// Sine-wave height field over the local x column
    #[default]
    Sine,
    /// 2D Perlin noise height field in world space
    Perlin,
    /// Every cell independently solid or air
    Random,
    /// Every cell solid
    Solid,
    /// Every cell air
    Empty,
}

/// How faces on the outer layer of a chunk are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryMode {
    /// Never draw faces on the chunk boundary
    Hidden,
    /// Always draw faces on the chunk boundary
    Visible,
    /// Hide boundary faces where a neighbouring chunk's seam mesh covers them,
    /// draw them on the edge of the world
    #[default]
    Auto,
}

/// All tunable settings of the renderer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of chunks along each side of the square world lattice
    pub world_width: usize,
    /// Terrain generator used for every chunk
    pub terrain: TerrainKind,
    /// Seed for the Perlin and random generators
    pub terrain_seed: u32,
    /// Fraction of solid cells for the random generator
    pub random_density: f64,
    /// Boundary face handling
    pub boundary_faces: BoundaryMode,
    /// Whether seam meshes are built between adjacent chunks
    pub seams: bool,
    /// WGSL shader source file
    pub shader_path: PathBuf,
    /// PNG texture sampled by every face
    pub texture_path: PathBuf,
    /// Window title
    pub window_title: String,
    /// Initial window width in pixels
    pub window_width: u32,
    /// Initial window height in pixels
    pub window_height: u32,
    /// Background colour as RGBA
    pub clear_color: [f64; 4],
    /// Camera movement speed in world units per second
    pub camera_speed: f32,
    /// Mouse look sensitivity
    pub camera_sensitivity: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane
    pub z_near: f32,
    /// Far clipping plane
    pub z_far: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            world_width: 8,
            terrain: TerrainKind::Sine,
            terrain_seed: 0,
            random_density: 0.5,
            boundary_faces: BoundaryMode::Auto,
            seams: true,
            shader_path: PathBuf::from("assets/shaders/voxel.wgsl"),
            texture_path: PathBuf::from("assets/textures/test.png"),
            window_title: String::from("Voxelize"),
            window_width: 720,
            window_height: 480,
            clear_color: [0.0, 0.0, 1.0, 1.0],
            camera_speed: 2.0,
            camera_sensitivity: 2.0,
            fov_degrees: 45.0,
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from a JSON string.
    ///
    /// # Arguments
    /// * `json` - The JSON document
    /// * `origin` - Path reported in errors
    pub fn from_json(json: &str, origin: &Path) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|source| EngineError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Loads the configuration from a file, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Arguments
    /// * `path` - Path of the JSON configuration file
    ///
    /// # Returns
    /// The parsed configuration, or an error if the file exists but cannot be
    /// read or parsed
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| EngineError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content, path)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads the configuration from the path named by `VOXELIZE_CONFIG`, or
    /// from `voxelize.json` if the variable is unset.
    pub fn load() -> Result<Self, EngineError> {
        let path = std::env::var_os(CONFIG_PATH_VARIABLE)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from_file(path)
    }
}
