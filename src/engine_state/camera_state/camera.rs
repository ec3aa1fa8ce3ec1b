//! First-person camera, its perspective projection and the shader uniform.
//!
//! The camera itself lives in a Y-up frame. Terrain height runs along Z, so
//! the uniform carries a model matrix that stands the world up.

use cgmath::{
    perspective, Deg, InnerSpace, Matrix4, Point3, Rad, SquareMatrix, Vector2, Vector3, Zero,
};
use web_time::Duration;

use crate::engine_state::PlayerAction;

/// Remaps clip-space depth from OpenGL's `-1..1` to the `0..1` wgpu expects.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Pitch stops just short of straight up or down, where the view basis degenerates.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.0001;

/// Mouse deltas this small are treated as jitter.
const LOOK_DEAD_ZONE: f64 = 0.5;

/// Position and heading of the viewer.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Point3<f32>,
    /// Heading around Y; zero looks along +X
    pub yaw: Rad<f32>,
    /// Elevation; positive looks up
    pub pitch: Rad<f32>,
}

impl Camera {
    pub fn new(
        position: Point3<f32>,
        yaw: impl Into<Rad<f32>>,
        pitch: impl Into<Rad<f32>>,
    ) -> Self {
        Self {
            position,
            yaw: yaw.into(),
            pitch: pitch.into(),
        }
    }

    /// Unit vector the camera looks along.
    pub fn get_view_vec(&self) -> Vector3<f32> {
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize()
    }

    /// World to view space.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.get_view_vec(), Vector3::unit_y())
    }

    /// Moves and turns by the controller's pending input over `dt`, then
    /// clears the controller.
    ///
    /// Movement stays level: forward and strafe ignore pitch, and vertical
    /// motion is straight along Y.
    pub fn apply_controller(&mut self, controller: &mut CameraController, dt: Duration) {
        let dt = dt.as_secs_f32();
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let forward = Vector3::new(yaw_cos, 0.0, yaw_sin);
        let right = Vector3::new(-yaw_sin, 0.0, yaw_cos);

        let step = controller.velocity * dt;
        self.position += right * step.x + Vector3::unit_y() * step.y + forward * step.z;

        self.yaw += Rad(controller.look.x * dt);
        let pitch = self.pitch.0 - controller.look.y * dt;
        self.pitch = Rad(pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT));

        controller.reset();
    }
}

/// Perspective projection that follows the window's aspect ratio.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    z_near: f32,
    z_far: f32,
}

/// Width over height, with a zero height (minimised window) treated as one pixel.
fn aspect_ratio(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}

impl Projection {
    pub fn new(
        width: u32,
        height: u32,
        fovy: impl Into<Rad<f32>>,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        Self {
            aspect: aspect_ratio(width, height),
            fovy: fovy.into(),
            z_near,
            z_far,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    /// View to clip space, in wgpu's depth convention.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.z_near, self.z_far)
    }
}

/// Turns player actions into a pending camera motion.
///
/// `velocity` is in camera-relative units per second: X strafes right, Y
/// rises and Z moves forward. `look` is in radians per second.
#[derive(Debug)]
pub struct CameraController {
    velocity: Vector3<f32>,
    look: Vector2<f32>,
    speed: f32,
    sensitivity: f32,
}

impl CameraController {
    /// # Arguments
    /// * `speed` - Movement speed in world units per second
    /// * `sensitivity` - Radians per second for each pixel of mouse motion
    pub fn new(speed: f32, sensitivity: f32) -> Self {
        Self {
            velocity: Vector3::zero(),
            look: Vector2::zero(),
            speed,
            sensitivity,
        }
    }

    /// Sets the pending motion from this frame's actions.
    ///
    /// Opposite keys held together cancel out.
    pub fn intake_actions(&mut self, actions: &PlayerAction) {
        let axis = |positive: bool, negative: bool| {
            f32::from(u8::from(positive)) - f32::from(u8::from(negative))
        };
        self.velocity = Vector3::new(
            axis(actions.move_right, actions.move_left),
            axis(actions.move_up, actions.move_down),
            axis(actions.move_forward, actions.move_backward),
        ) * self.speed;

        if let Some((delta_x, delta_y)) = actions.rotate_view {
            if delta_x.abs() > LOOK_DEAD_ZONE {
                self.look.x = delta_x as f32 * self.sensitivity;
            }
            if delta_y.abs() > LOOK_DEAD_ZONE {
                self.look.y = delta_y as f32 * self.sensitivity;
            }
        }
    }

    /// `true` if applying the controller would move or turn the camera.
    pub fn has_updates(&self) -> bool {
        !self.velocity.is_zero() || !self.look.is_zero()
    }

    fn reset(&mut self) {
        self.velocity = Vector3::zero();
        self.look = Vector2::zero();
    }
}

/// The shader's `Uniforms` block: model, view and projection, applied in that order.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    u_model: [[f32; 4]; 4],
    u_view: [[f32; 4]; 4],
    u_projection: [[f32; 4]; 4],
}

impl CameraUniform {
    /// All three matrices set to identity.
    pub fn new() -> Self {
        let identity: [[f32; 4]; 4] = Matrix4::identity().into();
        Self {
            u_model: identity,
            u_view: identity,
            u_projection: identity,
        }
    }

    pub fn update_matrices(&mut self, camera: &Camera, projection: &Projection) {
        self.u_model = world_model_matrix().into();
        self.u_view = camera.calc_matrix().into();
        self.u_projection = projection.calc_matrix().into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Rotates world space so that the block grid's Z axis points up the screen.
pub fn world_model_matrix() -> Matrix4<f32> {
    Matrix4::from_angle_x(Deg(-90.0))
}
