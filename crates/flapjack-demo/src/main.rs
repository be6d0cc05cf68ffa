mod app;
mod atlas;
mod scene;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use flapjack_engine::assets::{load_image, load_shader};
use flapjack_engine::device::ShaderStage;
use flapjack_engine::logging::{LoggingConfig, init_logging};
use flapjack_engine::render::{RendererConfig, SpriteRenderer};
use flapjack_engine::resource::ShaderSource;
use flapjack_engine::window::{Runtime, RuntimeConfig};
use image::DynamicImage;

use crate::app::DemoApp;

/// Scrolling sprite demo for the flapjack renderer.
#[derive(Parser, Debug)]
#[command(name = "flapjack-demo")]
#[command(about = "Draws a scrolling scene through the batched sprite renderer")]
struct Args {
    /// Atlas PNG; requires --mask. A generated atlas is used when omitted.
    #[arg(long, requires = "mask")]
    atlas: Option<PathBuf>,

    /// Mask PNG with one key color per sprite; requires --atlas.
    #[arg(long, requires = "atlas")]
    mask: Option<PathBuf>,

    /// Directory holding sprite.vert.glsl, sprite.geom.glsl and sprite.frag.glsl
    #[arg(long)]
    shaders: Option<PathBuf>,

    /// Window pixels per logical unit
    #[arg(long, default_value_t = 2)]
    zoom: u32,

    /// Fixed update rate
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Log filter, e.g. "debug" or "flapjack_engine=trace"
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(match &args.log {
        Some(filter) => LoggingConfig::with_filter(filter.as_str()),
        None => LoggingConfig::default(),
    });

    if args.fps == 0 {
        bail!("--fps must be at least 1");
    }

    let (atlas, mask) = match (&args.atlas, &args.mask) {
        (Some(atlas), Some(mask)) => (load_image(atlas)?, load_image(mask)?),
        _ => {
            log::info!("no atlas given, using the generated one");
            (
                DynamicImage::ImageRgba8(atlas::atlas()),
                DynamicImage::ImageRgba8(atlas::mask()),
            )
        }
    };

    let shaders = match &args.shaders {
        Some(dir) => load_shaders(dir)?,
        None => ShaderSource::sprite_set(),
    };

    let renderer_config = RendererConfig::default();
    let runtime_config = RuntimeConfig {
        logical_size: renderer_config.logical_size,
        zoom: args.zoom,
        fps: args.fps,
        ..RuntimeConfig::default()
    };

    let renderer = SpriteRenderer::new(shaders, atlas, &mask, renderer_config)
        .context("failed to set up sprite renderer")?;

    Runtime::run(runtime_config, DemoApp::new(renderer))
}

fn load_shaders(dir: &Path) -> Result<Vec<ShaderSource>> {
    [
        ("sprite.vert.glsl", ShaderStage::Vertex),
        ("sprite.geom.glsl", ShaderStage::Geometry),
        ("sprite.frag.glsl", ShaderStage::Fragment),
    ]
    .into_iter()
    .map(|(file, stage)| load_shader(dir.join(file), stage).map_err(Into::into))
    .collect()
}
