//! Frame orchestration: one pass over the tile grid per frame.
//!
//! Phases run in a fixed order:
//!
//! ```text
//! WaitGpuReady -> BeginFrame -> TransformAllTiles -> LightTiles
//!     -> OpaqueList -> BumpList -> FinishFrame -> WaitGpuReady
//! ```
//!
//! Waiting for the GPU is the only point where the frame can block.

use bumplight_hal::{GpuQueue, ListKind};

use crate::config::RenderConfig;
use crate::gpu::header::PolyContext;
use crate::gpu::list::ListStats;
use crate::gpu::texture::TextureInfo;
use crate::gpu::vertex::VertexRecord;
use crate::gpu::{GpuDriver, GpuError};
use crate::render::bump::{aggregate_light_position, apply_bump, encode_tile};
use crate::render::grid::TileGrid;
use crate::render::lighting::{light_tile_all, LightingEnv};
use crate::render::transform::TransformStage;
use crate::render::Tile;
use crate::scene::Scene;

/// Where the orchestrator is within a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FramePhase {
    #[default]
    WaitGpuReady,
    BeginFrame,
    TransformAllTiles,
    LightTiles,
    OpaqueList,
    BumpList,
    FinishFrame,
}

/// Counters for one rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Number of the frame, starting at 0.
    pub frame: u64,
    pub tiles_lit: usize,
    /// Sum over tiles of the enabled lights applied to each.
    pub light_applications: usize,
    pub bump_tiles: usize,
    pub opaque: ListStats,
    pub translucent: ListStats,
}

/// Drives the per-frame pipeline over a [`TileGrid`].
pub struct FrameOrchestrator {
    config: RenderConfig,
    env: LightingEnv,
    transform: TransformStage,
    surface: Option<TextureInfo>,
    phase: FramePhase,
    frame: u64,
}

impl FrameOrchestrator {
    /// `surface` is the texture of the opaque pass; `None` draws untextured.
    pub fn new(config: RenderConfig, surface: Option<TextureInfo>) -> Self {
        Self {
            env: LightingEnv::from_config(&config),
            transform: TransformStage::from_projection(&config.projection),
            config,
            surface,
            phase: FramePhase::WaitGpuReady,
            frame: 0,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    /// Frames completed so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frame
    }

    /// Render one frame.
    ///
    /// On error the open list is abandoned, nothing more is published and the
    /// orchestrator is back at `WaitGpuReady`. The error is returned as is.
    pub fn render_frame<Q: GpuQueue>(
        &mut self,
        gpu: &mut GpuDriver<'_, Q>,
        scene: &Scene,
        grid: &mut TileGrid,
    ) -> Result<FrameStats, GpuError<Q::Error>> {
        match self.run(gpu, scene, grid) {
            Ok(stats) => Ok(stats),
            Err(e) => {
                log::error!("frame {} failed in {:?}: {}", self.frame, self.phase, e);
                gpu.abort_scene();
                self.enter(FramePhase::WaitGpuReady);
                Err(e)
            }
        }
    }

    fn run<Q: GpuQueue>(
        &mut self,
        gpu: &mut GpuDriver<'_, Q>,
        scene: &Scene,
        grid: &mut TileGrid,
    ) -> Result<FrameStats, GpuError<Q::Error>> {
        let mut stats = FrameStats {
            frame: self.frame,
            ..FrameStats::default()
        };

        self.enter(FramePhase::WaitGpuReady);
        gpu.wait_ready()?;

        self.enter(FramePhase::BeginFrame);
        gpu.begin_scene()?;

        self.enter(FramePhase::TransformAllTiles);
        for tile in grid.tiles_mut() {
            self.transform.transform_tile(tile);
        }

        self.enter(FramePhase::LightTiles);
        for tile in grid.tiles_mut() {
            stats.light_applications += light_tile_all(
                tile,
                scene.lights(),
                &self.env,
                self.config.lighting_space,
            );
            stats.tiles_lit += 1;
        }

        self.enter(FramePhase::OpaqueList);
        let header = PolyContext::opaque_surface(self.surface).compile();
        gpu.begin_list(ListKind::Opaque)?;
        for tile in grid.tiles_mut() {
            gpu.write_header(&header)?;
            write_tile(gpu, tile)?;
            tile.reset_colors();
        }
        gpu.end_list()?;

        self.enter(FramePhase::BumpList);
        if scene.bump_enabled {
            stats.bump_tiles = self.emit_bump(gpu, scene, grid)?;
        }

        self.enter(FramePhase::FinishFrame);
        gpu.finish_scene()?;

        stats.opaque = gpu.stats(ListKind::Opaque);
        stats.translucent = gpu.stats(ListKind::Translucent);
        self.frame += 1;
        self.enter(FramePhase::WaitGpuReady);
        Ok(stats)
    }

    /// Bump overlay for every tile with an active bump map. Returns the
    /// number of tiles drawn.
    fn emit_bump<Q: GpuQueue>(
        &self,
        gpu: &mut GpuDriver<'_, Q>,
        scene: &Scene,
        grid: &mut TileGrid,
    ) -> Result<usize, GpuError<Q::Error>> {
        let Some(light_position) = aggregate_light_position(scene.lights(), self.config.bump_mode)
        else {
            log::trace!("no active lights, bump pass skipped");
            return Ok(0);
        };

        let mut drawn = 0;
        gpu.begin_list(ListKind::Translucent)?;
        for tile in grid.tiles_mut() {
            let Some(bump_map) = tile.material.active_bump_map().copied() else {
                continue;
            };
            let word = encode_tile(tile, light_position, self.config.bumpiness);
            apply_bump(tile, word);
            gpu.write_header(&PolyContext::bump_overlay(bump_map).compile())?;
            write_tile(gpu, tile)?;
            drawn += 1;
        }
        gpu.end_list()?;
        Ok(drawn)
    }

    fn enter(&mut self, phase: FramePhase) {
        log::trace!("frame {}: {:?} -> {:?}", self.frame, self.phase, phase);
        self.phase = phase;
    }
}

fn write_tile<Q: GpuQueue>(
    gpu: &mut GpuDriver<'_, Q>,
    tile: &Tile,
) -> Result<(), GpuError<Q::Error>> {
    for vertex in &tile.vertices {
        gpu.write_vertex(&VertexRecord::from_vertex(vertex))?;
    }
    Ok(())
}
