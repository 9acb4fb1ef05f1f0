#![no_std]

/// Size in bytes of one command-list record (poly header or vertex).
pub const RECORD_BYTES: usize = 32;

/// One 32-byte command-list record.
///
/// The alignment matches the store-queue burst size of the target, so any
/// slice of records is a valid list region without further checks.
#[repr(C, align(32))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Record(pub [u32; 8]);

/// The GPU command lists written by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// Opaque polygons (lit surface pass).
    Opaque,
    /// Translucent polygons (bump overlay pass).
    Translucent,
}

impl ListKind {
    /// Hardware list type number used in poly header command words.
    pub const fn type_code(self) -> u32 {
        match self {
            ListKind::Opaque => 0,
            ListKind::Translucent => 2,
        }
    }
}

/// Abstracts the command-list interface of a tile-based GPU.
///
/// The host owns the list memory. Implementations only see the region
/// published by `list_written` and the frame bracketing calls.
pub trait GpuQueue {
    type Error: core::fmt::Debug;

    /// Block until the GPU has finished consuming the previous frame's lists.
    /// This is the only suspension point of a frame.
    fn wait_ready(&mut self) -> Result<(), Self::Error>;

    /// Open a new scene. List memory may be reused from this point on.
    fn scene_begin(&mut self) -> Result<(), Self::Error>;

    /// Hand a completed region of a list to the GPU.
    fn list_written(&mut self, list: ListKind, records: &[Record]) -> Result<(), Self::Error>;

    /// Close the scene and start rendering it.
    fn scene_finish(&mut self) -> Result<(), Self::Error>;

    /// Drop the open scene without rendering it. Regions already published
    /// for it are discarded; the next frame starts at `wait_ready`.
    fn scene_abort(&mut self);
}

/// Abstracts user input across platforms.
pub trait InputSource {
    /// Initialize the input subsystem.
    fn init(&mut self);

    /// Poll for input events. Non-blocking.
    fn poll(&mut self) -> Option<InputEvent>;
}

/// Color channel selector for light color editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChannel {
    Red,
    Green,
    Blue,
}

/// Platform-agnostic input events, consumed between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Move the selected light in the surface plane by `dx`, `dy` steps.
    MoveLight { dx: f32, dy: f32 },
    /// Select the next active light.
    SelectNextLight,
    /// Reduce the number of active lights by one, wrapping to all lights.
    CycleLightCount,
    /// Step one color channel of the selected light.
    CycleColor(ColorChannel),
    /// Enable or disable the bump overlay pass.
    ToggleBump,
    /// Enable or disable statistics output.
    ToggleStats,
    /// Leave the frame loop.
    Quit,
}
