//! # Engine State Module
//!
//! The core engine module that manages the state and functionality of the voxel renderer.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `buffer_state` - Manages GPU buffers for rendering
//! * `camera_state` - Handles camera positioning and movement
//! * `rendering` - Meshing, mesh resources and the render pipeline
//! * `voxels` - Block grids, terrain generation and the world lattice
//!
//! ## Architecture
//!
//! Everything is built once at startup: the world is generated, every chunk
//! and every non-empty seam between hidden boundaries is meshed, and each
//! mesh is uploaded into its own [`ChunkMeshResource`]. After that a frame only
//! updates the camera uniform and binds, draws and unbinds each resource.
//!
//! [`ChunkMeshResource`]: rendering::meshing::ChunkMeshResource

use camera_state::{camera, CameraState};
use image::RgbaImage;
use rendering::{GpuMeshResource, MeshRendererManager};
use voxels::{terrain, world::World};
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};
use winit::keyboard::KeyCode;

use crate::{
    application_state::{input_manager::LOOK_BUTTON, input_state::InputSnapshot},
    config::EngineConfig,
    core::StSystem,
    error::EngineError,
};

pub mod buffer_state;
pub mod camera_state;
pub mod rendering;
pub mod voxels;

/// The main state container for the voxel renderer
///
/// This struct maintains references to all major subsystems and coordinates
/// their interactions. It handles input processing, rendering and the
/// lifetime of every mesh resource.
///
/// # Examples
///
/// ```ignore
/// let mut engine_state = EngineState::new(
///     surface,
///     surface_config,
///     device,
///     queue,
///     &shader_string,
///     &texture_image,
///     &config,
/// )?;
///
/// // Main loop
/// loop {
///     engine_state.process_input(delta_time);
///     engine_state.render();
/// }
/// ```
pub struct EngineState {
    /// Camera state managing position, orientation and movement
    pub camera_state: CameraState,
    /// Current player actions derived from input
    pub player_actions: PlayerAction,
    /// Buffer state for managing GPU buffers
    pub buffer_state: StSystem<buffer_state::BufferState>,
    /// Manager for mesh rendering operations
    pub render_manager: MeshRendererManager,
    /// The voxel world containing all chunk data
    pub world: World,
    /// One resource per chunk followed by one per seam
    pub mesh_resources: Vec<GpuMeshResource>,
    /// Reference to the GPU device
    pub device: StSystem<Device>,
    /// Reference to the GPU queue
    pub queue: StSystem<Queue>,
}

impl EngineState {
    /// Creates a new engine state with all subsystems initialized
    ///
    /// # Arguments
    ///
    /// * `surface` - The rendering surface
    /// * `surface_config` - Configuration for the rendering surface
    /// * `device` - The GPU device
    /// * `queue` - The GPU command queue
    /// * `shader_string` - WGSL shader code for the voxel renderer
    /// * `texture_image` - Decoded block texture
    /// * `config` - Engine configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the pipeline cannot be built or if a mesh cannot be
    /// uploaded into its resource.
    pub fn new(
        surface: Surface<'static>,
        surface_config: SurfaceConfiguration,
        device: Device,
        queue: Queue,
        shader_string: &str,
        texture_image: &RgbaImage,
        config: &EngineConfig,
    ) -> Result<Self, EngineError> {
        let queue = StSystem::new(queue);
        let device = StSystem::new(device);

        let buffer_state = StSystem::new(buffer_state::BufferState::new(
            device.clone(),
            queue.clone(),
        ));

        let camera_projection = camera::Projection::new(
            surface_config.width,
            surface_config.height,
            cgmath::Deg(config.fov_degrees),
            config.z_near,
            config.z_far,
        );

        let camera_state = CameraState::new(buffer_state.clone(), &camera_projection, config);

        let [r, g, b, a] = config.clear_color;
        let render_manager = MeshRendererManager::new(
            surface,
            surface_config,
            device.clone(),
            queue.clone(),
            buffer_state.clone(),
            shader_string,
            texture_image,
            camera_projection,
            wgpu::Color { r, g, b, a },
        )?;

        let generator = terrain::from_config(config);
        let world = World::generate(config, generator.as_ref());
        let mesh_resources = world.upload_meshes(&buffer_state)?;

        {
            let buffers = buffer_state.get();
            log::info!(
                "Uploaded {} mesh resources: {} buffers, {} bytes allocated, {} bytes used in {} writes",
                mesh_resources.len(),
                buffers.buffer_count(),
                buffers.get_total_allocated_memory(),
                buffers.get_total_used_memory(),
                buffers.get_total_writes()
            );
        }

        Ok(Self {
            camera_state,
            player_actions: PlayerAction::default(),
            buffer_state,
            render_manager,
            world,
            mesh_resources,
            device,
            queue,
        })
    }

    /// Resizes the rendering surface when the window size changes
    ///
    /// # Arguments
    ///
    /// * `size` - The new physical size of the window
    pub fn resize_surface(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        self.render_manager.resize_surface(size);
        self.camera_state
            .refresh(&self.render_manager.camera_projection);
    }

    /// Renders the current frame
    pub fn render(&mut self) {
        self.render_manager.render(&mut self.mesh_resources);
    }

    /// Processes input and updates the camera
    ///
    /// # Arguments
    ///
    /// * `wait_duration` - The time elapsed since the last frame
    pub fn process_input(&mut self, wait_duration: web_time::Duration) {
        self.camera_state.intake_actions(&self.player_actions);
        self.camera_state
            .update(wait_duration, &self.render_manager.camera_projection);
    }

    /// Replaces the player actions with those of this frame's input.
    pub fn set_input_commands(&mut self, input: &InputSnapshot) {
        self.player_actions = PlayerAction::from_input(input);
    }

    /// Releases every mesh resource.
    ///
    /// Dropping the engine state does the same; this makes the point explicit
    /// when the event loop exits.
    pub fn release(&mut self) {
        for resource in self.mesh_resources.iter_mut() {
            resource.release();
        }
        log::info!(
            "Released mesh resources, {} buffers left",
            self.buffer_state.get().buffer_count()
        );
    }
}

/// What the player asked for this frame.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct PlayerAction {
    move_forward: bool,
    move_backward: bool,
    move_left: bool,
    move_right: bool,
    move_up: bool,
    move_down: bool,

    /// Mouse motion while the look button is down
    rotate_view: Option<(f64, f64)>,
}

impl PlayerAction {
    /// Maps the movement keys and the look drag of a snapshot onto actions.
    pub fn from_input(input: &InputSnapshot) -> Self {
        let down = |key| input.key(key).is_down();
        let looking = input.button(LOOK_BUTTON).is_down();

        PlayerAction {
            move_forward: down(KeyCode::KeyW),
            move_backward: down(KeyCode::KeyS),
            move_left: down(KeyCode::KeyA),
            move_right: down(KeyCode::KeyD),
            move_up: down(KeyCode::Space),
            move_down: down(KeyCode::ShiftLeft),
            rotate_view: input.mouse_delta().filter(|_| looking),
        }
    }
}
