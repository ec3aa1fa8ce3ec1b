//! # Application State Management
//!
//! This module handles the application's state management, including:
//! - Window and graphics initialization
//! - Input handling
//! - Application lifecycle events
//! - Reporting fatal startup errors back to [`crate::run`]

pub mod graphics_resources_builder;
pub mod input_manager;
pub mod input_state;

use std::sync::Arc;

use graphics_resources_builder::{Graphics, GraphicsBuilder, GraphicsEvent, MaybeGraphics};
use input_manager::InputManager;

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoopProxy},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{config::EngineConfig, engine_state::EngineState, error::EngineError};

/// The main application state container that manages the application's lifecycle.
///
/// This struct holds the current state of the application, including graphics resources,
/// input handling, and window management. It implements `ApplicationHandler` to handle
/// window and device events.
pub struct ApplicationState {
    /// The current graphics state, which may be uninitialized, initializing, or ready
    pub graphics: MaybeGraphics,

    /// The initialized application state, if the application has started
    pub state: Option<InitializedApplicationState>,

    /// Settings shared by the window, the camera and the world
    pub config: EngineConfig,

    /// The error that stopped the event loop, if any
    pub error: Option<EngineError>,
}

/// Represents the fully initialized and running state of the application.
///
/// This struct contains all the necessary components for the running application,
/// including the engine state, window handle, and input management.
pub struct InitializedApplicationState {
    /// The core engine state and logic
    pub engine_state: EngineState,

    /// Handle to the application window
    pub window: Arc<Window>,

    /// Manages input state and event processing
    pub input_manager: InputManager,

    /// Timestamp of the last frame for delta time calculations
    pub last_wait_time: web_time::Instant,
}

/// Returns `true` for the events that close the application.
fn is_exit_request(event: &WindowEvent) -> bool {
    matches!(
        event,
        WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event: KeyEvent {
                    state: ElementState::Pressed,
                    physical_key: PhysicalKey::Code(KeyCode::Escape),
                    ..
                },
                ..
            }
    )
}

impl ApplicationState {
    /// Creates the application in its pre-window state.
    ///
    /// # Arguments
    /// * `event_loop_proxy` - Receives the graphics once they are built
    /// * `config` - Engine configuration
    pub fn new(event_loop_proxy: EventLoopProxy<GraphicsEvent>, config: EngineConfig) -> Self {
        Self {
            graphics: MaybeGraphics::Builder(GraphicsBuilder::new(
                event_loop_proxy,
                config.clone(),
            )),
            state: None,
            config,
            error: None,
        }
    }

    /// Logs a fatal error, keeps it for the caller of the event loop and exits.
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: EngineError) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    /// Initializes the application state with the required graphics resources.
    ///
    /// This method transitions the application from the initialization phase to the running state
    /// by setting up the engine state with the provided graphics resources.
    fn initialize_application_state(&mut self) -> Result<(), EngineError> {
        let MaybeGraphics::Graphics(gfx) =
            std::mem::replace(&mut self.graphics, MaybeGraphics::Moved)
        else {
            return Ok(());
        };

        let Graphics {
            window,
            surface,
            surface_config,
            device,
            queue,
            shader_source,
            texture_image,
        } = gfx;

        let engine_state = EngineState::new(
            surface,
            surface_config,
            device,
            queue,
            &shader_source,
            &texture_image,
            &self.config,
        )?;

        self.state = Some(InitializedApplicationState {
            engine_state,
            window,
            input_manager: InputManager::new(),
            last_wait_time: web_time::Instant::now(),
        });
        Ok(())
    }
}

impl ApplicationHandler<GraphicsEvent> for ApplicationState {
    /// Handles window-related events such as resize, focus changes, and input events.
    ///
    /// # Arguments
    /// * `event_loop` - Reference to the active event loop
    /// * `_window_id` - ID of the window that generated the event
    /// * `event` - The window event to process
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if is_exit_request(&event) {
            event_loop.exit();
            return;
        }

        let Some(state) = &mut self.state else {
            return;
        };
        let input_manager = &mut state.input_manager;
        let engine_state = &mut state.engine_state;

        input_manager.intake_input(&event);

        match event {
            WindowEvent::Resized(size) => {
                engine_state.resize_surface(size);
            }
            WindowEvent::Focused(is_focused) => {
                if !is_focused {
                    input_manager.clear();
                }
            }
            WindowEvent::RedrawRequested => {
                engine_state.render();
            }
            _ => (),
        }
    }

    /// Handles device-level input events such as mouse motion.
    ///
    /// # Arguments
    /// * `_event_loop` - Reference to the active event loop
    /// * `_device_id` - ID of the device that generated the event
    /// * `event` - The device event to process
    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(state) = &mut self.state {
            if let DeviceEvent::MouseMotion { delta } = event {
                state.input_manager.intake_mouse_motion(delta);
            }
        }
    }

    /// Called when the application is resumed after being suspended.
    ///
    /// This method triggers graphics initialization the first time it runs.
    ///
    /// # Arguments
    /// * `event_loop` - Reference to the active event loop
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let MaybeGraphics::Builder(builder) = &mut self.graphics {
            builder.build_and_send(event_loop);
        }
    }

    /// Receives the result of graphics initialization.
    ///
    /// On success the engine is built and the application starts running. Any
    /// error stops the event loop and is returned from [`crate::run`].
    ///
    /// # Arguments
    /// * `event_loop` - Reference to the active event loop
    /// * `graphics` - The initialized graphics resources, or the reason they could not be built
    fn user_event(&mut self, event_loop: &ActiveEventLoop, graphics: GraphicsEvent) {
        let result = graphics.and_then(|graphics| {
            self.graphics = MaybeGraphics::Graphics(graphics);
            self.initialize_application_state()
        });

        if let Err(error) = result {
            self.fail(event_loop, error);
        }
    }

    /// Called before the event loop goes to sleep.
    ///
    /// This method handles frame timing and input processing, and requests
    /// the next frame.
    ///
    /// # Arguments
    /// * `_event_loop` - Reference to the active event loop
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            let now = web_time::Instant::now();
            let wait_dt = now - state.last_wait_time;

            let snapshot = state.input_manager.take_snapshot();
            state.engine_state.set_input_commands(&snapshot);
            state.engine_state.process_input(wait_dt);

            state.last_wait_time = now;

            state.window.request_redraw();
        }
    }

    /// Frees every GPU mesh buffer before the window goes away.
    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            state.engine_state.release();
        }
    }
}
