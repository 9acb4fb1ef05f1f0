//! Platform-agnostic GPU driver, generic over GpuQueue.
//!
//! `GpuDriver` owns both list buffers and the queue. It enforces the
//! bracketing rules: lists open only inside a scene, one list at a time,
//! and records only go into the open list.

use core::fmt;

use bumplight_hal::{GpuQueue, ListKind, Record};

use super::header::PolyHeader;
use super::list::{ListBuffer, ListError, ListStats};
use super::vertex::VertexRecord;

/// Error type for GPU driver operations, generic over queue errors.
#[derive(Debug)]
pub enum GpuError<E: fmt::Debug> {
    /// A list buffer rejected a record.
    List(ListError),
    /// A record or `end_list` arrived with no list open.
    NoListOpen,
    /// `begin_list` or `finish_scene` while this list is still open.
    ListAlreadyOpen(ListKind),
    /// `begin_list` outside `begin_scene` / `finish_scene`.
    SceneNotOpen,
    /// Queue transport error.
    Transport(E),
}

impl<E: fmt::Debug> From<E> for GpuError<E> {
    fn from(e: E) -> Self {
        GpuError::Transport(e)
    }
}

impl<E: fmt::Debug> fmt::Display for GpuError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::List(e) => write!(f, "{e}"),
            GpuError::NoListOpen => write!(f, "no list is open"),
            GpuError::ListAlreadyOpen(list) => write!(f, "{list:?} list is still open"),
            GpuError::SceneNotOpen => write!(f, "no scene is open"),
            GpuError::Transport(e) => write!(f, "transport error: {e:?}"),
        }
    }
}

/// Command-list writer for one GPU.
pub struct GpuDriver<'a, Q: GpuQueue> {
    queue: Q,
    opaque: ListBuffer<'a>,
    translucent: ListBuffer<'a>,
    open_list: Option<ListKind>,
    scene_open: bool,
}

impl<'a, Q: GpuQueue> GpuDriver<'a, Q> {
    /// Wrap a queue and the host-allocated memory of both lists.
    pub fn new(queue: Q, opaque_mem: &'a mut [Record], translucent_mem: &'a mut [Record]) -> Self {
        Self {
            queue,
            opaque: ListBuffer::new(ListKind::Opaque, opaque_mem),
            translucent: ListBuffer::new(ListKind::Translucent, translucent_mem),
            open_list: None,
            scene_open: false,
        }
    }

    /// Block until the GPU can accept a new scene.
    pub fn wait_ready(&mut self) -> Result<(), GpuError<Q::Error>> {
        self.queue.wait_ready()?;
        Ok(())
    }

    /// Open a scene and rewind both list buffers.
    pub fn begin_scene(&mut self) -> Result<(), GpuError<Q::Error>> {
        self.opaque.reset();
        self.translucent.reset();
        self.open_list = None;
        self.queue.scene_begin()?;
        self.scene_open = true;
        Ok(())
    }

    pub fn begin_list(&mut self, list: ListKind) -> Result<(), GpuError<Q::Error>> {
        if !self.scene_open {
            return Err(GpuError::SceneNotOpen);
        }
        if let Some(open) = self.open_list {
            return Err(GpuError::ListAlreadyOpen(open));
        }
        self.buffer_mut(list).begin();
        self.open_list = Some(list);
        Ok(())
    }

    pub fn write_header(&mut self, header: &PolyHeader) -> Result<(), GpuError<Q::Error>> {
        self.write_record(header.to_record())
    }

    pub fn write_vertex(&mut self, vertex: &VertexRecord) -> Result<(), GpuError<Q::Error>> {
        self.write_record(vertex.to_record())
    }

    /// Append a raw record to the open list.
    pub fn write_record(&mut self, record: Record) -> Result<(), GpuError<Q::Error>> {
        let list = self.open_list.ok_or(GpuError::NoListOpen)?;
        self.buffer_mut(list).push(record).map_err(GpuError::List)
    }

    /// Close the open list and publish what was written since `begin_list`.
    ///
    /// Returns the number of bytes published. An empty list is closed
    /// without calling the queue.
    pub fn end_list(&mut self) -> Result<usize, GpuError<Q::Error>> {
        let list = self.open_list.take().ok_or(GpuError::NoListOpen)?;
        let buffer = match list {
            ListKind::Opaque => &mut self.opaque,
            ListKind::Translucent => &mut self.translucent,
        };
        let bytes = buffer.pending_bytes();
        if bytes == 0 {
            buffer.abandon();
            return Ok(0);
        }
        let records = buffer.commit();
        self.queue.list_written(list, records)?;
        Ok(bytes)
    }

    /// Close the open list, if any, without publishing it.
    pub fn abandon_list(&mut self) {
        if let Some(list) = self.open_list.take() {
            self.buffer_mut(list).abandon();
        }
    }

    /// Close the scene and hand it to the GPU.
    pub fn finish_scene(&mut self) -> Result<(), GpuError<Q::Error>> {
        if !self.scene_open {
            return Err(GpuError::SceneNotOpen);
        }
        if let Some(open) = self.open_list {
            return Err(GpuError::ListAlreadyOpen(open));
        }
        self.scene_open = false;
        self.queue.scene_finish()?;
        Ok(())
    }

    /// Close whatever is open after a failed frame. Nothing more is
    /// published and the queue drops the scene, so the next frame can begin.
    pub fn abort_scene(&mut self) {
        self.abandon_list();
        if self.scene_open {
            self.scene_open = false;
            self.queue.scene_abort();
        }
    }

    pub fn stats(&self, list: ListKind) -> ListStats {
        self.buffer(list).stats()
    }

    pub fn open_list(&self) -> Option<ListKind> {
        self.open_list
    }

    pub fn scene_open(&self) -> bool {
        self.scene_open
    }

    pub fn queue(&self) -> &Q {
        &self.queue
    }

    fn buffer(&self, list: ListKind) -> &ListBuffer<'a> {
        match list {
            ListKind::Opaque => &self.opaque,
            ListKind::Translucent => &self.translucent,
        }
    }

    fn buffer_mut(&mut self, list: ListKind) -> &mut ListBuffer<'a> {
        match list {
            ListKind::Opaque => &mut self.opaque,
            ListKind::Translucent => &mut self.translucent,
        }
    }
}
