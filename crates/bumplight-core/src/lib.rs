//! Per-vertex lighting, bump-parameter encoding and direct command-list
//! submission for a tiled surface on a tile-based GPU.
//!
//! Platform-agnostic: the GPU is reached through [`bumplight_hal::GpuQueue`],
//! list memory is provided by the host, and nothing here allocates.

#![no_std]

pub mod config;
pub mod frame;
pub mod gpu;
pub mod math;
pub mod render;
pub mod scene;

pub use config::RenderConfig;
pub use frame::{FrameOrchestrator, FramePhase, FrameStats};
