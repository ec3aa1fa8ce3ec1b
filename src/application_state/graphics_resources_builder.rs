//! # Graphics Resources Builder
//!
//! This module handles the creation of the graphics resources required by the
//! application: the window, the WebGPU surface, adapter, device and queue, and
//! the shader and texture assets.
//!
//! The main components are:
//! - `Graphics`: Holds all graphics-related resources
//! - `GraphicsBuilder`: Helper for graphics initialization
//! - `MaybeGraphics`: Represents the various states of graphics initialization

use std::{future::Future, path::Path, sync::Arc};

use image::RgbaImage;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};
use winit::{
    dpi::LogicalSize,
    event_loop::{ActiveEventLoop, EventLoopProxy},
    window::Window,
};

use crate::{config::EngineConfig, error::EngineError};

/// Contains all graphics-related resources required by the application.
///
/// This struct holds handles to WebGPU resources and the loaded assets. It is
/// created once during application initialization and handed to the engine.
pub struct Graphics {
    /// The application window
    pub window: Arc<Window>,
    /// Surface presenting to the window
    pub surface: Surface<'static>,
    /// Configuration the surface was configured with
    pub surface_config: SurfaceConfiguration,
    /// The logical GPU device
    pub device: Device,
    /// The device's command queue
    pub queue: Queue,
    /// WGSL source of the voxel shader
    pub shader_source: String,
    /// Decoded block texture
    pub texture_image: RgbaImage,
}

/// The event sent back to the event loop once initialization finishes.
pub type GraphicsEvent = Result<Graphics, EngineError>;

/// Reads the shader source and decodes the block texture.
///
/// # Arguments
/// * `config` - Supplies the asset paths
///
/// # Errors
/// [`EngineError::Shader`] or [`EngineError::Texture`] naming the file that failed.
pub fn load_assets(config: &EngineConfig) -> Result<(String, RgbaImage), EngineError> {
    let shader_source = read_shader(&config.shader_path)?;
    let texture_image = read_texture(&config.texture_path)?;
    log::info!(
        "Loaded shader {} and {}x{} texture {}",
        config.shader_path.display(),
        texture_image.width(),
        texture_image.height(),
        config.texture_path.display()
    );
    Ok((shader_source, texture_image))
}

fn read_shader(path: &Path) -> Result<String, EngineError> {
    std::fs::read_to_string(path).map_err(|source| EngineError::Shader {
        path: path.to_path_buf(),
        source,
    })
}

fn read_texture(path: &Path) -> Result<RgbaImage, EngineError> {
    image::open(path)
        .map(|image| image.to_rgba8())
        .map_err(|source| EngineError::Texture {
            path: path.to_path_buf(),
            source,
        })
}

/// Creates the window and surface, then returns a future that finishes the
/// GPU setup.
///
/// Window and surface creation need the active event loop, so they happen
/// before the future is returned.
///
/// # Arguments
/// * `event_loop` - The active event loop used to create the window and surface
/// * `config` - Window size and title, and the asset paths
///
/// # Returns
/// A `Future` that resolves to the initialized `Graphics` when complete
fn create_graphics(
    event_loop: &ActiveEventLoop,
    config: &EngineConfig,
) -> Result<impl Future<Output = GraphicsEvent> + 'static, EngineError> {
    let (shader_source, texture_image) = load_assets(config)?;

    let window_attrs = Window::default_attributes()
        .with_title(config.window_title.clone())
        .with_inner_size(LogicalSize::new(config.window_width, config.window_height));

    let window = Arc::new(event_loop.create_window(window_attrs)?);

    // The instance is a handle to our GPU
    // Backends::PRIMARY => Vulkan + Metal + DX12 + Browser WebGPU
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        flags: wgpu::InstanceFlags::empty(),
        backend_options: wgpu::BackendOptions::from_env_or_default(),
    });

    let surface = instance.create_surface(window.clone())?;

    Ok(async move {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let adapter_info = adapter.get_info();
        log::info!(
            "Using adapter {} ({:?})",
            adapter_info.name,
            adapter_info.backend
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                label: None,
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await?;

        let size = window.inner_size();

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(EngineError::SurfaceFormat)?;
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &surface_config);

        Ok::<_, EngineError>(Graphics {
            window,
            surface,
            surface_config,
            device,
            queue,
            shader_source,
            texture_image,
        })
    })
}

/// Helper struct for managing the initialization of graphics resources.
pub struct GraphicsBuilder {
    event_loop_proxy: Option<EventLoopProxy<GraphicsEvent>>,
    config: EngineConfig,
}

/// Represents the possible states of the graphics initialization process.
///
/// This enum is used to track the current state of graphics resources
/// throughout the application's lifecycle.
pub enum MaybeGraphics {
    /// State before the window has been created
    Builder(GraphicsBuilder),

    /// State when graphics resources are fully initialized and ready for use
    Graphics(Graphics),

    /// State after graphics resources have been moved to another owner
    Moved,
}

impl GraphicsBuilder {
    /// Creates a new GraphicsBuilder with the specified event loop proxy.
    ///
    /// # Arguments
    /// * `event_loop_proxy` - Used to send the initialized graphics resources back to the main thread
    /// * `config` - Engine configuration
    pub fn new(event_loop_proxy: EventLoopProxy<GraphicsEvent>, config: EngineConfig) -> Self {
        Self {
            event_loop_proxy: Some(event_loop_proxy),
            config,
        }
    }

    /// Creates the graphics resources and sends the result to the event loop.
    ///
    /// Any failure is sent as the `Err` side of the event. Calling this a
    /// second time does nothing.
    ///
    /// # Arguments
    /// * `event_loop` - The active event loop used to create the graphics context
    pub fn build_and_send(&mut self, event_loop: &ActiveEventLoop) {
        let Some(event_loop_proxy) = self.event_loop_proxy.take() else {
            // event_loop_proxy is already spent - we already constructed Graphics
            return;
        };

        let gfx = create_graphics(event_loop, &self.config).and_then(pollster::block_on);
        if event_loop_proxy.send_event(gfx).is_err() {
            log::error!("Event loop closed before graphics initialization finished");
        }
    }
}
