//! PC host for bumplight.
//!
//! Single-threaded: loads the surface and bump textures, builds the tile
//! layer and runs the frame loop against a simulated GPU consumer. Input
//! comes from a script and is applied between frames.

mod input;
mod sim_gpu;
mod vram;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use bumplight_core::config::{
    BumpMode, Frustum, LightingSpace, Projection, RenderConfig, LIST_BUFFER_RECORDS, MAX_LIGHTS,
    STATS_INTERVAL, TILE_SIZE,
};
use bumplight_core::gpu::{GpuDriver, TextureInfo};
use bumplight_core::render::grid::TileGrid;
use bumplight_core::scene::{presets, Scene, SceneControl};
use bumplight_core::{FrameOrchestrator, FrameStats};
use bumplight_hal::{InputSource, Record};
use clap::{Parser, ValueEnum};
use dtex::PaletteBanks;
use glam::Vec3;

use input::ScriptedInput;
use sim_gpu::SimGpu;
use vram::{Vram, VRAM_BYTES};

const VSYNC_INTERVAL: Duration = Duration::from_micros(16_667);

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BumpModeArg {
    /// Direction to the first active light
    Single,
    /// Direction to the centroid of the active lights
    Centroid,
}

impl From<BumpModeArg> for BumpMode {
    fn from(arg: BumpModeArg) -> Self {
        match arg {
            BumpModeArg::Single => BumpMode::SingleLight,
            BumpModeArg::Centroid => BumpMode::Centroid,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LightingSpaceArg {
    /// Untransformed tile corners
    Model,
    /// Corners after the projection
    Transformed,
}

impl From<LightingSpaceArg> for LightingSpace {
    fn from(arg: LightingSpaceArg) -> Self {
        match arg {
            LightingSpaceArg::Model => LightingSpace::Model,
            LightingSpaceArg::Transformed => LightingSpace::Transformed,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "bumplight-pc")]
#[command(about = "Lit, bump-mapped tile layer rendered into simulated GPU command lists", long_about = None)]
#[command(version)]
struct Args {
    /// Frames to render (0 runs until the input script quits)
    #[arg(long, default_value = "600")]
    frames: u64,

    /// Number of active lights at startup
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=MAX_LIGHTS as i64))]
    lights: Option<u8>,

    /// Aggregate light position used by the bump pass
    #[arg(long, value_enum, default_value_t = BumpModeArg::Centroid)]
    bump_mode: BumpModeArg,

    /// Start with the bump pass disabled
    #[arg(long)]
    no_bump: bool,

    /// Apply the fixed frustum transform instead of identity
    #[arg(long)]
    frustum: bool,

    /// Vertex positions the lighting is evaluated at
    #[arg(long, value_enum, default_value_t = LightingSpaceArg::Model)]
    lighting_space: LightingSpaceArg,

    /// Global ambient level applied to all color channels
    #[arg(long, default_value = "0.0")]
    ambient: f32,

    /// DTEX texture for the opaque surface (untextured if omitted)
    #[arg(long)]
    surface: Option<PathBuf>,

    /// DTEX bump map (a flat bump map is generated if omitted)
    #[arg(long)]
    bumpmap: Option<PathBuf>,

    /// Log frame statistics every few seconds
    #[arg(long)]
    stats: bool,

    /// Pace frames to 60 Hz
    #[arg(long)]
    vsync: bool,

    /// Input steps replayed one per frame, e.g. "right*8 next red quit"
    #[arg(long, default_value = "")]
    script: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("bumplight-pc starting");

    let mut vram = Vram::new(VRAM_BYTES);
    let mut banks = PaletteBanks::new();
    let surface = args
        .surface
        .as_deref()
        .map(|path| load_texture(&mut vram, &mut banks, path))
        .transpose()?;
    let bump_map = match args.bumpmap.as_deref() {
        Some(path) => load_texture(&mut vram, &mut banks, path)?,
        None => vram.flat_bump_map(TILE_SIZE as u16)?,
    };
    log::info!(
        "{} bytes of texture memory free, {} palette entries in use",
        vram.free_bytes(),
        vram.palette_entries_used()
    );

    let config = RenderConfig {
        global_ambient: Vec3::splat(args.ambient),
        projection: if args.frustum {
            Projection::Frustum(Frustum::default())
        } else {
            Projection::Identity
        },
        lighting_space: args.lighting_space.into(),
        bump_mode: args.bump_mode.into(),
        ..RenderConfig::default()
    };
    log::info!("{config:?}");

    let mut scene = Scene::default();
    if let Some(lights) = args.lights {
        scene.set_active_count(lights as usize);
    }
    scene.bump_enabled = !args.no_bump;
    scene.stats_enabled = args.stats;

    let mut grid = TileGrid::layer(&presets::surface_material(Some(bump_map)));
    let mut input = ScriptedInput::parse(&args.script).context("parsing --script")?;
    input.init();

    let mut opaque_mem = vec![Record::default(); LIST_BUFFER_RECORDS];
    let mut translucent_mem = vec![Record::default(); LIST_BUFFER_RECORDS];
    let queue = if args.vsync {
        SimGpu::with_frame_interval(VSYNC_INTERVAL)
    } else {
        SimGpu::new()
    };
    let mut gpu = GpuDriver::new(queue, &mut opaque_mem, &mut translucent_mem);
    let mut frames = FrameOrchestrator::new(config, surface);

    log::info!(
        "Rendering {} tiles with {} active lights",
        grid.len(),
        scene.active_count()
    );

    let started = Instant::now();
    let mut interval_start = started;
    loop {
        if args.frames != 0 && frames.frames_rendered() >= args.frames {
            break;
        }

        let frame = frames.frames_rendered();
        let stats = frames
            .render_frame(&mut gpu, &scene, &mut grid)
            .map_err(|e| anyhow!("frame {frame} aborted: {e}"))?;

        if (stats.frame + 1) % STATS_INTERVAL == 0 {
            if scene.stats_enabled {
                log_stats(&stats, interval_start.elapsed());
            }
            interval_start = Instant::now();
        }

        if let Some(event) = input.poll() {
            if scene.apply(event) == SceneControl::Quit {
                log::info!("Quit requested");
                break;
            }
        }
    }

    let elapsed = started.elapsed();
    let rendered = frames.frames_rendered();
    let last = gpu.queue().last_scene();
    log::info!(
        "{} frames in {:.2?} ({:.1} fps), {} scenes consumed",
        rendered,
        elapsed,
        rendered as f64 / elapsed.as_secs_f64().max(f64::EPSILON),
        gpu.queue().scenes_finished()
    );
    log::info!(
        "Last scene: opaque {} headers / {} strips / {} vertices, translucent {} headers / {} strips / {} vertices",
        last.opaque.headers,
        last.opaque.strips,
        last.opaque.vertices,
        last.translucent.headers,
        last.translucent.strips,
        last.translucent.vertices
    );
    log::debug!(
        "Regions published: opaque {}, translucent {}",
        last.opaque.regions,
        last.translucent.regions
    );
    if input.remaining() > 0 {
        log::info!("{} input steps not replayed", input.remaining());
    }
    Ok(())
}

/// Load a DTEX file (and its palette) and place it in texture memory.
fn load_texture(vram: &mut Vram, banks: &mut PaletteBanks, path: &Path) -> Result<TextureInfo> {
    let loaded = dtex::load_texture(path, banks)
        .with_context(|| format!("loading texture {}", path.display()))?;
    vram.upload(&loaded)
        .with_context(|| format!("uploading texture {}", path.display()))
}

fn log_stats(stats: &FrameStats, interval: Duration) {
    let fps = STATS_INTERVAL as f64 / interval.as_secs_f64().max(f64::EPSILON);
    log::info!(
        "frame {}: {:.1} fps, {} tiles lit, {} light applications, {} bump tiles",
        stats.frame,
        fps,
        stats.tiles_lit,
        stats.light_applications,
        stats.bump_tiles
    );
    log::info!(
        "  opaque: {} records, {} bytes; translucent: {} records, {} bytes; {} prefetch hints",
        stats.opaque.records,
        stats.opaque.published_bytes,
        stats.translucent.records,
        stats.translucent.published_bytes,
        stats.opaque.prefetch_hints + stats.translucent.prefetch_hints
    );
}
