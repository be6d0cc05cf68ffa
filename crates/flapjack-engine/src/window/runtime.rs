use std::time::Instant;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::core::{App, AppControl, FrameCtx};
use crate::device::{ClearColor, GlContext, GlInit, GpuApi, report_limits};
use crate::input::{InputEvent, InputState, Key, platform::translate_window_event};
use crate::time::{FixedStep, FrameClock};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,

    /// Logical screen size; the window is this times `zoom` physical pixels.
    pub logical_size: Viewport,
    pub zoom: u32,

    /// Fixed update rate.
    pub fps: u32,

    pub clear_color: ClearColor,
    pub gl: GlInit,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "flapjack".to_string(),
            logical_size: Viewport::default(),
            zoom: 2,
            fps: 60,
            clear_color: ClearColor::white(),
            gl: GlInit::default(),
        }
    }
}

impl RuntimeConfig {
    /// Physical window size.
    pub fn window_size(&self) -> PhysicalSize<u32> {
        let (w, h) = self.logical_size.window_size(self.zoom.max(1));
        PhysicalSize::new(w, h)
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until it exits.
    ///
    /// Returns the first error raised by the app or the GL layer.
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    app: A,

    gl: Option<GlContext>,
    input: InputState,
    clock: FrameClock,
    step: FixedStep,
    last_wake: Instant,

    shut_down: bool,
    error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, app: A) -> Self {
        let step = FixedStep::new(config.fps);
        Self {
            config,
            app,
            gl: None,
            input: InputState::default(),
            clock: FrameClock::default(),
            step,
            last_wake: Instant::now(),
            shut_down: false,
            error: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.window_size())
            .with_resizable(false);

        let gl = GlContext::new(event_loop, attrs, self.config.gl.clone())
            .context("failed to create GL window")?;
        report_limits(gl.device());

        let gl = self.gl.insert(gl);
        self.app
            .init(gl.device())
            .context("application failed to initialize")?;

        self.clock.reset();
        self.last_wake = Instant::now();
        gl.window().request_redraw();
        Ok(())
    }

    /// Frees app resources, then drops the context. Runs at most once.
    fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        if let Some(gl) = &self.gl {
            self.app.shutdown(gl.device());
        }
        self.gl = None;
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error.get_or_insert(error);
        self.exit(event_loop);
    }

    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        self.shutdown();
        event_loop.exit();
    }

    fn handle_input(&mut self, event_loop: &ActiveEventLoop, ev: InputEvent) {
        if !self.input.apply_event(&ev) {
            return;
        }
        if ev.is_press() && matches!(ev, InputEvent::Key { key: Key::Escape, .. }) {
            self.exit(event_loop);
            return;
        }
        if self.app.on_input(&ev) == AppControl::Exit {
            self.exit(event_loop);
        }
    }

    fn redraw(&mut self) -> Result<()> {
        let Some(gl) = &self.gl else {
            return Ok(());
        };
        let time = self.clock.tick();

        gl.device().clear(self.config.clear_color);
        let mut ctx = FrameCtx {
            gl: gl.device(),
            time,
            input: &self.input,
            viewport: self.config.logical_size,
            window_size: gl.size(),
        };
        self.app.draw(&mut ctx)?;

        gl.window().pre_present_notify();
        gl.swap_buffers()
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gl.is_some() || self.shut_down {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gl) = &mut self.gl else {
            return;
        };
        if gl.window().id() != window_id {
            return;
        }

        if let Some(ev) =
            translate_window_event(self.config.logical_size, gl.size(), &self.input, &event)
        {
            self.handle_input(event_loop, ev);
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.exit(event_loop),

            WindowEvent::Resized(new_size) => {
                gl.resize(new_size);
                gl.window().request_redraw();
            }

            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    self.fail(event_loop, e.context("frame failed"));
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.gl.is_none() {
            return;
        }

        let now = Instant::now();
        let ticks = self.step.advance(now.saturating_duration_since(self.last_wake));
        self.last_wake = now;

        let dt = self.step.dt();
        for _ in 0..ticks {
            if self.app.update(dt) == AppControl::Exit {
                self.exit(event_loop);
                return;
            }
        }

        if let Some(gl) = self.gl.as_ref().filter(|_| ticks > 0) {
            gl.window().request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.step.next_deadline(now)));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}
