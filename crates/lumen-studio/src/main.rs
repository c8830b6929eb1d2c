//! lumen-studio: renders the shading programs to PNG.
//!
//! ```bash
//! lumen-studio                                  # every mode, 640x480, into ./out
//! lumen-studio --mode bindless-instanced --instances 4
//! lumen-studio --shape sphere --cull back --log lumen_shading=debug
//! lumen-studio --gpu-check                      # also draw each mode through wgpu
//! ```

mod gpu_check;
mod scene;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use lumen_shading::logging::{LoggingConfig, init_logging};
use lumen_shading::math::Viewport;
use lumen_shading::mesh::Mesh;
use lumen_shading::program::ShadingMode;
use lumen_shading::raster::{CullMode, RasterState};

use scene::Scene;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Shape {
    Cube,
    Sphere,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Cull {
    None,
    Front,
    Back,
}

impl From<Cull> for CullMode {
    fn from(cull: Cull) -> Self {
        match cull {
            Cull::None => CullMode::None,
            Cull::Front => CullMode::Front,
            Cull::Back => CullMode::Back,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "lumen-studio")]
#[command(version, about = "Render the lumen shading programs through the software rasterizer")]
struct Args {
    /// Mode to render (flat, lambert-vertex, lambert-pixel, textured-lambert,
    /// bindless-instanced). Every mode when omitted.
    #[arg(long, short = 'm')]
    mode: Option<ShadingMode>,

    #[arg(long, default_value = "640")]
    width: u32,

    #[arg(long, default_value = "480")]
    height: u32,

    /// Instance count for the bindless instanced mode
    #[arg(long, default_value = "3")]
    instances: u32,

    #[arg(long, value_enum, default_value = "cube")]
    shape: Shape,

    #[arg(long, value_enum, default_value = "none")]
    cull: Cull,

    /// Output directory; each mode writes `<mode>.png`
    #[arg(long, short = 'o', default_value = "out")]
    out: PathBuf,

    /// Log filter (env_logger syntax). Falls back to RUST_LOG, then info.
    #[arg(long)]
    log: Option<String>,

    /// Also draw each mode through its wgpu pipeline on a headless device
    #[arg(long)]
    gpu_check: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        ..LoggingConfig::default()
    });

    anyhow::ensure!(args.width > 0 && args.height > 0, "image size must be non-zero");

    let modes: Vec<ShadingMode> = match args.mode {
        Some(mode) => vec![mode],
        None => ShadingMode::ALL.to_vec(),
    };

    let mesh = match args.shape {
        Shape::Cube => Mesh::cube(1.0),
        Shape::Sphere => Mesh::uv_sphere(24, 48, 0.6),
    };
    let aspect_ratio = Viewport::new(args.width as f32, args.height as f32).aspect_ratio();
    let scene = Scene::new(mesh, aspect_ratio, args.instances);
    let state = RasterState {
        cull_mode: args.cull.into(),
        ..RasterState::default()
    };

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create output directory {}", args.out.display()))?;

    for &mode in &modes {
        let (target, stats) = scene.render(mode, state, args.width, args.height)?;

        let path = args.out.join(format!("{}.png", mode.name()));
        let image = image::RgbaImage::from_raw(target.width(), target.height(), target.to_rgba8())
            .context("render target size does not match its pixel buffer")?;
        image
            .save(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;

        log::info!(
            "{mode}: {} px shaded, {} triangles ({} clipped, {} culled) -> {}",
            stats.pixels_shaded,
            stats.triangles,
            stats.clipped,
            stats.culled,
            path.display()
        );
    }

    if args.gpu_check {
        let built = pollster::block_on(gpu_check::check_pipelines(&scene, &modes, args.width, args.height))?;
        log::info!("gpu check: {}/{} modes drawn", built.len(), modes.len());
    }

    Ok(())
}
