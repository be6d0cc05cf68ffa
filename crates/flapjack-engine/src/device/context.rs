use std::num::NonZeroU32;

use anyhow::{Context, Result, anyhow};
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use super::{GlInit, GlowDevice, GpuApi};

/// A window together with its current OpenGL context.
///
/// This type is the low-level rendering context:
/// - creates the window through the GL display so both agree on a config
/// - creates and makes current a core-profile context
/// - loads GL entry points into a [`GlowDevice`]
///
/// Field order matters: the device and surface are dropped before the context,
/// and the window last.
pub struct GlContext {
    device: GlowDevice,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,
}

impl GlContext {
    /// Creates a window and a current GL context bound to it.
    pub fn new(
        event_loop: &ActiveEventLoop,
        attributes: WindowAttributes,
        init: GlInit,
    ) -> Result<Self> {
        let template = ConfigTemplateBuilder::new().with_alpha_size(if init.alpha { 8 } else { 0 });

        let (window, config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, template, pick_config)
            .map_err(|e| anyhow!("failed to create GL display: {e}"))?;
        let window = window.context("GL display did not create a window")?;

        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let raw_handle = window
            .window_handle()
            .context("window has no native handle")?
            .as_raw();

        let display = config.display();
        let (major, minor) = init.version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(Some(raw_handle));

        let not_current = unsafe { display.create_context(&config, &context_attributes) }
            .with_context(|| format!("failed to create OpenGL {major}.{minor} core context"))?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .context("failed to build window surface attributes")?;
        let surface = unsafe { display.create_window_surface(&config, &surface_attributes) }
            .context("failed to create window surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;

        if init.vsync {
            if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
                log::warn!("vsync unavailable: {e}");
            }
        }

        // SAFETY: the context was made current on this thread above and is owned
        // by `Self`, which also owns the device.
        let device = unsafe {
            let gl = glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name));
            GlowDevice::new(gl)
        };

        device.init_state();
        device.set_viewport(size.width as i32, size.height as i32);
        log::debug!("GL context ready ({}x{})", size.width, size.height);

        Ok(Self {
            device,
            surface,
            context,
            window,
            size,
        })
    }

    pub fn device(&self) -> &GlowDevice {
        &self.device
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Resizes the surface and the viewport. Zero-sized requests only update
    /// the stored size.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        let (Some(w), Some(h)) = (
            NonZeroU32::new(new_size.width),
            NonZeroU32::new(new_size.height),
        ) else {
            return;
        };
        self.surface.resize(&self.context, w, h);
        self.device
            .set_viewport(new_size.width as i32, new_size.height as i32);
    }

    /// Presents the back buffer.
    pub fn swap_buffers(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .context("failed to swap buffers")
    }
}

/// Prefers the config with the most samples; any config works for sprites.
///
/// glutin-winit only calls the picker with a non-empty iterator.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .max_by_key(|c| c.num_samples())
        .expect("GL display offered no framebuffer configs")
}
