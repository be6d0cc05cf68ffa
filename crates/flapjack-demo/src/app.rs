use anyhow::{Context, Result};
use flapjack_engine::core::{App, AppControl, FrameCtx};
use flapjack_engine::device::GlowDevice;
use flapjack_engine::input::InputEvent;
use flapjack_engine::render::SpriteRenderer;

use crate::scene::Scene;

pub struct DemoApp {
    renderer: SpriteRenderer<GlowDevice>,
    scene: Scene,
}

impl DemoApp {
    pub fn new(renderer: SpriteRenderer<GlowDevice>) -> Self {
        let scene = Scene::new(renderer.config().logical_size);
        Self { renderer, scene }
    }
}

impl App for DemoApp {
    fn init(&mut self, gl: &GlowDevice) -> Result<()> {
        self.renderer
            .prepare(gl)
            .context("failed to prepare sprite renderer")?;
        log::info!(
            "sprite renderer ready with {} atlas boxes",
            self.renderer.box_table().len()
        );
        Ok(())
    }

    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        if event.is_press() && !self.scene.started() {
            self.scene.press();
        }
        AppControl::Continue
    }

    fn update(&mut self, dt: f32) -> AppControl {
        self.scene.update(dt);
        AppControl::Continue
    }

    fn draw(&mut self, ctx: &mut FrameCtx<'_>) -> Result<()> {
        let drawn = self.renderer.draw_sprites(ctx.gl, self.scene.sprites())?;
        log::trace!("frame {}: {drawn} sprites", ctx.time.frame_index);
        Ok(())
    }

    fn shutdown(&mut self, gl: &GlowDevice) {
        self.renderer.free(gl);
    }
}
