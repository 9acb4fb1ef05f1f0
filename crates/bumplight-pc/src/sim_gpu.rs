//! Simulated GPU list consumer.
//!
//! Stands in for the hardware list parser. Every published region must be a
//! run of strips, each under a poly header of the list it was published to,
//! and each closed by an end-of-strip vertex. With a frame interval set,
//! `wait_ready` paces frames like a vsync-locked display.

use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use bumplight_core::gpu::registers::{
    CMD_EOL_BIT, CMD_TYPE_MASK, CMD_TYPE_POLYHDR, CMD_VERTEX, TA_CMD_TYPE_MASK, TA_CMD_TYPE_SHIFT,
};
use bumplight_hal::{GpuQueue, ListKind, Record};

/// Protocol violations detected by [`SimGpu`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimGpuError {
    SceneAlreadyOpen,
    SceneNotOpen,
    /// The frame barrier was reached with a scene still open.
    SceneStillOpen,
    VertexBeforeHeader { list: ListKind, index: usize },
    ListTypeMismatch { list: ListKind, header_type: u32 },
    UnknownCommand { list: ListKind, index: usize, word: u32 },
    UnterminatedStrip { list: ListKind },
}

impl fmt::Display for SimGpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimGpuError::SceneAlreadyOpen => write!(f, "scene begun twice"),
            SimGpuError::SceneNotOpen => write!(f, "no scene open"),
            SimGpuError::SceneStillOpen => write!(f, "waited for ready with a scene open"),
            SimGpuError::VertexBeforeHeader { list, index } => {
                write!(f, "{list:?} list: vertex at record {index} before any poly header")
            }
            SimGpuError::ListTypeMismatch { list, header_type } => {
                write!(f, "{list:?} list: poly header for list type {header_type}")
            }
            SimGpuError::UnknownCommand { list, index, word } => {
                write!(f, "{list:?} list: unknown command {word:#010x} at record {index}")
            }
            SimGpuError::UnterminatedStrip { list } => {
                write!(f, "{list:?} list: strip not terminated")
            }
        }
    }
}

impl std::error::Error for SimGpuError {}

/// What one list received during a scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListTally {
    pub regions: usize,
    pub headers: usize,
    pub vertices: usize,
    pub strips: usize,
}

impl ListTally {
    fn absorb(&mut self, other: ListTally) {
        self.regions += other.regions;
        self.headers += other.headers;
        self.vertices += other.vertices;
        self.strips += other.strips;
    }
}

/// Per-list tallies of one scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneTally {
    pub opaque: ListTally,
    pub translucent: ListTally,
}

impl SceneTally {
    fn list_mut(&mut self, list: ListKind) -> &mut ListTally {
        match list {
            ListKind::Opaque => &mut self.opaque,
            ListKind::Translucent => &mut self.translucent,
        }
    }
}

/// In-process [`GpuQueue`] that validates and counts list traffic.
#[derive(Debug, Default)]
pub struct SimGpu {
    frame_interval: Option<Duration>,
    last_finish: Option<Instant>,
    scene_open: bool,
    current: SceneTally,
    last_scene: SceneTally,
    scenes_finished: u64,
}

impl SimGpu {
    /// Consumer that never blocks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumer whose ready barrier holds each frame to at least `interval`.
    pub fn with_frame_interval(interval: Duration) -> Self {
        Self {
            frame_interval: Some(interval),
            ..Self::default()
        }
    }

    pub fn scenes_finished(&self) -> u64 {
        self.scenes_finished
    }

    /// Tallies of the most recently finished scene.
    pub fn last_scene(&self) -> SceneTally {
        self.last_scene
    }
}

/// Walk one published region and count its records.
fn parse_region(list: ListKind, records: &[Record]) -> Result<ListTally, SimGpuError> {
    let mut tally = ListTally {
        regions: 1,
        ..ListTally::default()
    };
    let mut have_header = false;
    let mut in_strip = false;

    for (index, record) in records.iter().enumerate() {
        let word = record.0[0];
        match word & CMD_TYPE_MASK {
            CMD_TYPE_POLYHDR => {
                if in_strip {
                    return Err(SimGpuError::UnterminatedStrip { list });
                }
                let header_type = (word & TA_CMD_TYPE_MASK) >> TA_CMD_TYPE_SHIFT;
                if header_type != list.type_code() {
                    return Err(SimGpuError::ListTypeMismatch { list, header_type });
                }
                have_header = true;
                tally.headers += 1;
            }
            CMD_VERTEX => {
                if !have_header {
                    return Err(SimGpuError::VertexBeforeHeader { list, index });
                }
                tally.vertices += 1;
                in_strip = word & CMD_EOL_BIT == 0;
                if !in_strip {
                    tally.strips += 1;
                }
            }
            _ => return Err(SimGpuError::UnknownCommand { list, index, word }),
        }
    }

    if in_strip {
        return Err(SimGpuError::UnterminatedStrip { list });
    }
    Ok(tally)
}

impl GpuQueue for SimGpu {
    type Error = SimGpuError;

    fn wait_ready(&mut self) -> Result<(), Self::Error> {
        if self.scene_open {
            return Err(SimGpuError::SceneStillOpen);
        }
        if let (Some(interval), Some(last)) = (self.frame_interval, self.last_finish) {
            let due = last + interval;
            let now = Instant::now();
            if due > now {
                thread::sleep(due - now);
            }
        }
        Ok(())
    }

    fn scene_begin(&mut self) -> Result<(), Self::Error> {
        if self.scene_open {
            return Err(SimGpuError::SceneAlreadyOpen);
        }
        self.scene_open = true;
        self.current = SceneTally::default();
        Ok(())
    }

    fn list_written(&mut self, list: ListKind, records: &[Record]) -> Result<(), Self::Error> {
        if !self.scene_open {
            return Err(SimGpuError::SceneNotOpen);
        }
        let tally = parse_region(list, records)?;
        log::trace!(
            "{list:?} region: {} headers, {} vertices",
            tally.headers,
            tally.vertices
        );
        self.current.list_mut(list).absorb(tally);
        Ok(())
    }

    fn scene_finish(&mut self) -> Result<(), Self::Error> {
        if !self.scene_open {
            return Err(SimGpuError::SceneNotOpen);
        }
        self.scene_open = false;
        self.last_scene = std::mem::take(&mut self.current);
        self.scenes_finished += 1;
        self.last_finish = Some(Instant::now());
        Ok(())
    }

    fn scene_abort(&mut self) {
        if self.scene_open {
            log::warn!("scene dropped before finish");
        }
        self.scene_open = false;
        self.current = SceneTally::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumplight_core::config::RenderConfig;
    use bumplight_core::gpu::header::PolyContext;
    use bumplight_core::gpu::registers::{CMD_VERTEX_EOL, TXRFMT_PIXEL_SHIFT};
    use bumplight_core::gpu::{GpuDriver, TextureHandle, TextureInfo};
    use bumplight_core::render::grid::TileGrid;
    use bumplight_core::render::Tile;
    use bumplight_core::scene::{presets, Scene};
    use bumplight_core::FrameOrchestrator;

    fn header(list: ListKind) -> Record {
        PolyContext::colored(list).compile().to_record()
    }

    fn vertex(flags: u32) -> Record {
        Record([flags, 0, 0, 0, 0, 0, 0, 0])
    }

    fn strip(list: ListKind) -> Vec<Record> {
        vec![
            header(list),
            vertex(CMD_VERTEX),
            vertex(CMD_VERTEX),
            vertex(CMD_VERTEX),
            vertex(CMD_VERTEX_EOL),
        ]
    }

    fn open_gpu() -> SimGpu {
        let mut gpu = SimGpu::new();
        gpu.wait_ready().unwrap();
        gpu.scene_begin().unwrap();
        gpu
    }

    #[test]
    fn test_accepts_well_formed_strips() {
        let mut gpu = open_gpu();
        let mut records = strip(ListKind::Opaque);
        records.extend(strip(ListKind::Opaque));
        gpu.list_written(ListKind::Opaque, &records).unwrap();
        gpu.scene_finish().unwrap();

        let tally = gpu.last_scene().opaque;
        assert_eq!(tally.regions, 1);
        assert_eq!(tally.headers, 2);
        assert_eq!(tally.vertices, 8);
        assert_eq!(tally.strips, 2);
        assert_eq!(gpu.last_scene().translucent, ListTally::default());
        assert_eq!(gpu.scenes_finished(), 1);
    }

    #[test]
    fn test_vertex_before_header() {
        let mut gpu = open_gpu();
        assert_eq!(
            gpu.list_written(ListKind::Opaque, &[vertex(CMD_VERTEX_EOL)]),
            Err(SimGpuError::VertexBeforeHeader {
                list: ListKind::Opaque,
                index: 0
            })
        );
    }

    #[test]
    fn test_unterminated_strip() {
        let mut gpu = open_gpu();
        let mut records = strip(ListKind::Opaque);
        records.pop();
        assert_eq!(
            gpu.list_written(ListKind::Opaque, &records),
            Err(SimGpuError::UnterminatedStrip {
                list: ListKind::Opaque
            })
        );

        let mut interleaved = strip(ListKind::Opaque);
        interleaved.insert(2, header(ListKind::Opaque));
        assert!(gpu.list_written(ListKind::Opaque, &interleaved).is_err());
    }

    #[test]
    fn test_header_for_wrong_list() {
        let mut gpu = open_gpu();
        assert_eq!(
            gpu.list_written(ListKind::Opaque, &strip(ListKind::Translucent)),
            Err(SimGpuError::ListTypeMismatch {
                list: ListKind::Opaque,
                header_type: 2
            })
        );
    }

    #[test]
    fn test_unknown_command() {
        let mut gpu = open_gpu();
        assert_eq!(
            gpu.list_written(ListKind::Translucent, &[vertex(0x2000_0000)]),
            Err(SimGpuError::UnknownCommand {
                list: ListKind::Translucent,
                index: 0,
                word: 0x2000_0000
            })
        );
    }

    #[test]
    fn test_scene_bracketing() {
        let mut gpu = SimGpu::new();
        assert_eq!(
            gpu.list_written(ListKind::Opaque, &strip(ListKind::Opaque)),
            Err(SimGpuError::SceneNotOpen)
        );
        assert_eq!(gpu.scene_finish(), Err(SimGpuError::SceneNotOpen));
        gpu.scene_begin().unwrap();
        assert_eq!(gpu.scene_begin(), Err(SimGpuError::SceneAlreadyOpen));
        assert_eq!(gpu.wait_ready(), Err(SimGpuError::SceneStillOpen));
        gpu.scene_abort();
        assert_eq!(gpu.wait_ready(), Ok(()));
        assert_eq!(gpu.scenes_finished(), 0);
    }

    #[test]
    fn test_frame_pacing() {
        let interval = Duration::from_millis(20);
        let mut gpu = SimGpu::with_frame_interval(interval);
        gpu.scene_begin().unwrap();
        gpu.scene_finish().unwrap();
        let start = Instant::now();
        gpu.wait_ready().unwrap();
        assert!(start.elapsed() >= interval / 2);
    }

    #[test]
    fn test_consumes_rendered_frame() {
        let bump_map = TextureInfo {
            width: 32,
            height: 32,
            format: 4 << TXRFMT_PIXEL_SHIFT,
            handle: TextureHandle(0x1000),
        };
        let material = presets::surface_material(Some(bump_map));
        let mut grid = TileGrid::new();
        grid.push(Tile::new(0.0, 0.0, 1.0, 32.0, 32.0, material)).unwrap();
        grid.push(Tile::new(32.0, 0.0, 1.0, 32.0, 32.0, material)).unwrap();

        let mut opaque = vec![Record::default(); 64];
        let mut translucent = vec![Record::default(); 64];
        let mut gpu = GpuDriver::new(SimGpu::new(), &mut opaque, &mut translucent);
        let mut frames = FrameOrchestrator::new(RenderConfig::default(), None);
        let scene = Scene::default();

        frames.render_frame(&mut gpu, &scene, &mut grid).unwrap();

        let tally = gpu.queue().last_scene();
        assert_eq!(tally.opaque.headers, 2);
        assert_eq!(tally.opaque.vertices, 8);
        assert_eq!(tally.opaque.strips, 2);
        assert_eq!(tally.translucent.headers, 2);
        assert_eq!(tally.translucent.strips, 2);
        assert_eq!(gpu.queue().scenes_finished(), 1);
    }

    #[test]
    fn test_frame_after_overflow() {
        let material = presets::surface_material(None);
        let tile = |x| Tile::new(x, 0.0, 1.0, 32.0, 32.0, material);
        let mut wide = TileGrid::new();
        for x in [0.0, 32.0, 64.0] {
            wide.push(tile(x)).unwrap();
        }
        let mut narrow = TileGrid::new();
        narrow.push(tile(0.0)).unwrap();

        let mut opaque = vec![Record::default(); 10];
        let mut translucent = vec![Record::default(); 10];
        let mut gpu = GpuDriver::new(SimGpu::new(), &mut opaque, &mut translucent);
        let mut frames = FrameOrchestrator::new(RenderConfig::default(), None);
        let scene = Scene::default();

        assert!(frames.render_frame(&mut gpu, &scene, &mut wide).is_err());
        frames.render_frame(&mut gpu, &scene, &mut narrow).unwrap();

        assert_eq!(gpu.queue().scenes_finished(), 1);
        assert_eq!(gpu.queue().last_scene().opaque.headers, 1);
    }
}
