//! Append-only command-list buffers.
//!
//! Each GPU list gets one host-allocated region of [`Record`]s. The tail
//! marks what has been handed to the GPU this scene; the cursor marks what
//! has been written since the list was opened. Only the region between them
//! is ever published.

use core::fmt;

use bumplight_hal::{ListKind, Record, RECORD_BYTES};

/// Errors raised by a list buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListError {
    /// Writing one more record would exceed the buffer.
    Overflow {
        list: ListKind,
        capacity_bytes: usize,
        requested_bytes: usize,
    },
    /// A record was written while the list was closed.
    NotOpen(ListKind),
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::Overflow {
                list,
                capacity_bytes,
                requested_bytes,
            } => write!(
                f,
                "{list:?} list overflow: {requested_bytes} bytes requested, capacity {capacity_bytes}"
            ),
            ListError::NotOpen(list) => write!(f, "{list:?} list is not open"),
        }
    }
}

/// Counters for one list, reset at scene begin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListStats {
    /// Records written, published or not.
    pub records: usize,
    /// Bytes handed to the GPU.
    pub published_bytes: usize,
    /// Prefetch hints issued for upcoming write slots.
    pub prefetch_hints: usize,
}

/// Single-writer buffer for one GPU list.
pub struct ListBuffer<'a> {
    kind: ListKind,
    mem: &'a mut [Record],
    tail: usize,
    cursor: usize,
    open: bool,
    stats: ListStats,
}

impl<'a> ListBuffer<'a> {
    pub fn new(kind: ListKind, mem: &'a mut [Record]) -> Self {
        Self {
            kind,
            mem,
            tail: 0,
            cursor: 0,
            open: false,
            stats: ListStats::default(),
        }
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn capacity_bytes(&self) -> usize {
        self.mem.len() * RECORD_BYTES
    }

    /// Records that still fit before the buffer overflows.
    pub fn remaining(&self) -> usize {
        self.mem.len() - self.cursor
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn stats(&self) -> ListStats {
        self.stats
    }

    /// Start a new scene: the whole buffer is free again.
    pub fn reset(&mut self) {
        self.tail = 0;
        self.cursor = 0;
        self.open = false;
        self.stats = ListStats::default();
    }

    /// Open the list; writing resumes at the tail.
    pub fn begin(&mut self) {
        self.cursor = self.tail;
        self.open = true;
    }

    /// Append one record.
    ///
    /// On overflow nothing is written and the cursor stays put.
    pub fn push(&mut self, record: Record) -> Result<(), ListError> {
        if !self.open {
            return Err(ListError::NotOpen(self.kind));
        }
        if self.remaining() == 0 {
            return Err(ListError::Overflow {
                list: self.kind,
                capacity_bytes: self.capacity_bytes(),
                requested_bytes: (self.cursor + 1) * RECORD_BYTES,
            });
        }
        self.mem[self.cursor] = record;
        self.cursor += 1;
        self.stats.records += 1;

        if let Some(next) = self.mem.get(self.cursor) {
            prefetch(next);
            self.stats.prefetch_hints += 1;
        }
        Ok(())
    }

    /// Records written since `begin`.
    pub fn pending(&self) -> &[Record] {
        &self.mem[self.tail..self.cursor]
    }

    pub fn pending_bytes(&self) -> usize {
        (self.cursor - self.tail) * RECORD_BYTES
    }

    /// Close the list and advance the tail past the pending records.
    /// Returns the published region.
    pub fn commit(&mut self) -> &[Record] {
        let start = self.tail;
        self.tail = self.cursor;
        self.open = false;
        self.stats.published_bytes += (self.tail - start) * RECORD_BYTES;
        &self.mem[start..self.tail]
    }

    /// Close the list without publishing. The tail does not move.
    pub fn abandon(&mut self) {
        self.cursor = self.tail;
        self.open = false;
    }
}

/// Hint the cache that `slot` is about to be written.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
fn prefetch(slot: &Record) {
    use core::arch::x86_64::{_mm_prefetch, _MM_HINT_T0};
    // SAFETY: prefetch never faults and `slot` is a live reference.
    unsafe { _mm_prefetch::<_MM_HINT_T0>(slot as *const Record as *const i8) }
}

#[cfg(not(target_arch = "x86_64"))]
#[inline(always)]
fn prefetch(_slot: &Record) {}
