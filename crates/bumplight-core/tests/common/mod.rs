//! Mock GPU queue shared by the driver and frame tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use bumplight_hal::{GpuQueue, ListKind, Record};

/// One call observed by the mock queue.
#[derive(Clone, Debug, PartialEq)]
pub enum QueueEvent {
    WaitReady,
    SceneBegin,
    ListWritten(ListKind, Vec<Record>),
    SceneFinish,
    SceneAbort,
}

#[derive(Debug)]
pub struct MockError;

/// Records every queue call. Clones share the same log.
#[derive(Clone, Default)]
pub struct MockQueue {
    events: Rc<RefCell<Vec<QueueEvent>>>,
    fail_finish: bool,
}

impl MockQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue whose `scene_finish` always fails.
    pub fn failing_finish() -> Self {
        Self {
            fail_finish: true,
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<QueueEvent> {
        self.events.borrow().clone()
    }

    /// Records published to `list`, in order.
    pub fn published(&self, list: ListKind) -> Vec<Record> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                QueueEvent::ListWritten(kind, records) if *kind == list => Some(records.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl GpuQueue for MockQueue {
    type Error = MockError;

    fn wait_ready(&mut self) -> Result<(), Self::Error> {
        self.events.borrow_mut().push(QueueEvent::WaitReady);
        Ok(())
    }

    fn scene_begin(&mut self) -> Result<(), Self::Error> {
        self.events.borrow_mut().push(QueueEvent::SceneBegin);
        Ok(())
    }

    fn list_written(&mut self, list: ListKind, records: &[Record]) -> Result<(), Self::Error> {
        self.events
            .borrow_mut()
            .push(QueueEvent::ListWritten(list, records.to_vec()));
        Ok(())
    }

    fn scene_finish(&mut self) -> Result<(), Self::Error> {
        if self.fail_finish {
            return Err(MockError);
        }
        self.events.borrow_mut().push(QueueEvent::SceneFinish);
        Ok(())
    }

    fn scene_abort(&mut self) {
        self.events.borrow_mut().push(QueueEvent::SceneAbort);
    }
}

/// Zeroed list memory of `records` records.
pub fn list_memory(records: usize) -> Vec<Record> {
    vec![Record::default(); records]
}
