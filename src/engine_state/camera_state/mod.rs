//! # Camera State Management
//!
//! This module handles all camera-related functionality including:
//! - Camera position and orientation tracking
//! - View and projection matrix calculations
//! - Player input processing for camera control
//!
//! ## Core Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `CameraController`: Handles player input and updates camera state
//! - `Projection`: Manages the camera's projection matrix
//! - `CameraUniform`: GPU representation of the model, view and projection matrices

use camera::CameraController;
use cgmath::{Deg, Point3};

use crate::{config::EngineConfig, core::StSystem};

use super::{buffer_state::BufferState, PlayerAction};

pub mod camera;

/// Where the camera starts: above the front edge of the world, looking back over it.
const INITIAL_CAMERA_POSITION: Point3<f32> = Point3 {
    x: 0.0,
    y: 2.5,
    z: 6.0,
};
/// Initial yaw, facing down the negative Z axis
const INITIAL_CAMERA_YAW: Deg<f32> = Deg(-90.0);
/// Initial pitch, tilted down toward the terrain
const INITIAL_CAMERA_PITCH: Deg<f32> = Deg(-20.0);

/// Manages the complete camera system including state, controls, and GPU resources.
///
/// This is the main interface for interacting with the camera system. It handles:
/// - Camera positioning and orientation
/// - Input processing
/// - GPU buffer updates
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: camera::Camera,
    /// GPU-optimized camera data for shaders
    pub camera_uniform: camera::CameraUniform,
    /// Handles player input and camera movement
    pub camera_controller: camera::CameraController,
    /// Manages GPU buffer state for camera data
    pub buffer_state: StSystem<BufferState>,
}

/// Name of the GPU buffer used for camera uniform data
pub const CAMERA_BUFFER_NAME: &str = "camera_buffer";

impl CameraState {
    /// Creates the camera and its uniform buffer.
    ///
    /// # Arguments
    /// * `buffer_state` - The buffer state system for GPU resource management
    /// * `projection` - The initial camera projection settings
    /// * `config` - Supplies the movement speed and look sensitivity
    pub fn new(
        buffer_state: StSystem<BufferState>,
        projection: &camera::Projection,
        config: &EngineConfig,
    ) -> Self {
        let camera = camera::Camera::new(
            INITIAL_CAMERA_POSITION,
            INITIAL_CAMERA_YAW,
            INITIAL_CAMERA_PITCH,
        );
        let camera_controller =
            CameraController::new(config.camera_speed, config.camera_sensitivity);

        let mut camera_uniform = camera::CameraUniform::new();
        camera_uniform.update_matrices(&camera, projection);

        buffer_state.get_mut().create_buffer_init(
            CAMERA_BUFFER_NAME,
            wgpu::util::BufferInitDescriptor {
                label: Some(CAMERA_BUFFER_NAME),
                contents: bytemuck::cast_slice(&[camera_uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        CameraState {
            camera,
            camera_uniform,
            camera_controller,
            buffer_state,
        }
    }

    /// Processes player input actions and updates the camera controller state.
    ///
    /// # Arguments
    /// * `actions` - The player's input actions to process
    pub fn intake_actions(&mut self, actions: &PlayerAction) {
        self.camera_controller.intake_actions(actions);
    }

    /// Applies pending movement and rewrites the camera uniform.
    ///
    /// # Arguments
    /// * `dt` - Time elapsed since the last update
    /// * `projection` - Current camera projection settings
    ///
    /// # Returns
    /// `true` if the camera moved or turned
    pub fn update(&mut self, dt: web_time::Duration, projection: &camera::Projection) -> bool {
        if !self.camera_controller.has_updates() {
            return false;
        }

        self.camera
            .apply_controller(&mut self.camera_controller, dt);
        self.refresh(projection);
        true
    }

    /// Recomputes the matrices and uploads them, e.g. after a resize.
    pub fn refresh(&mut self, projection: &camera::Projection) {
        self.camera_uniform.update_matrices(&self.camera, projection);
        if let Err(error) = self.buffer_state.get_mut().write_buffer(
            CAMERA_BUFFER_NAME,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        ) {
            log::error!("Failed to update camera uniform: {}", error);
        }
    }
}
