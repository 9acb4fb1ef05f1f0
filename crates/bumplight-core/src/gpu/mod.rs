//! Command-list submission: record packing, list buffers and the driver.

pub mod driver;
pub mod header;
pub mod list;
pub mod registers;
pub mod texture;
pub mod vertex;

pub use driver::{GpuDriver, GpuError};
pub use header::{PolyContext, PolyHeader};
pub use list::{ListBuffer, ListError, ListStats};
pub use texture::{TextureHandle, TextureInfo};
pub use vertex::VertexRecord;
