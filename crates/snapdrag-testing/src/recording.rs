//! Recorders for listener callbacks and fling requests.

use snapdrag_animation::{FlingAnimator, FlingEndCallback, FlingRequest, FlingUpdateCallback};
use snapdrag_foundation::DragListener;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// One listener callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragRecord {
    Start { position: f32 },
    Drag { position: f32, friction: f32 },
    End { position: f32, friction: f32 },
}

/// Listener that keeps every callback in order. Clones share the log.
#[derive(Clone, Default, Debug)]
pub struct RecordingListener {
    records: Rc<RefCell<Vec<DragRecord>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<DragRecord> {
        self.records.borrow().clone()
    }

    /// Returns and forgets everything recorded so far.
    pub fn take(&self) -> Vec<DragRecord> {
        std::mem::take(&mut *self.records.borrow_mut())
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    pub fn start_count(&self) -> usize {
        self.records
            .borrow()
            .iter()
            .filter(|record| matches!(record, DragRecord::Start { .. }))
            .count()
    }

    /// Positions of every `on_drag` call.
    pub fn drag_positions(&self) -> Vec<f32> {
        self.records
            .borrow()
            .iter()
            .filter_map(|record| match record {
                DragRecord::Drag { position, .. } => Some(*position),
                _ => None,
            })
            .collect()
    }

    /// Positions of every `on_drag_end` call.
    pub fn end_positions(&self) -> Vec<f32> {
        self.records
            .borrow()
            .iter()
            .filter_map(|record| match record {
                DragRecord::End { position, .. } => Some(*position),
                _ => None,
            })
            .collect()
    }

    pub fn last_end(&self) -> Option<f32> {
        self.end_positions().last().copied()
    }
}

impl DragListener for RecordingListener {
    fn on_drag_start(&self, position: f32) {
        log::trace!("recorded start at {position}");
        self.records
            .borrow_mut()
            .push(DragRecord::Start { position });
    }

    fn on_drag(&self, position: f32, friction: f32) {
        self.records
            .borrow_mut()
            .push(DragRecord::Drag { position, friction });
    }

    fn on_drag_end(&self, position: f32, friction: f32) {
        log::trace!("recorded end at {position}");
        self.records
            .borrow_mut()
            .push(DragRecord::End { position, friction });
    }
}

/// Wraps a [`FlingAnimator`] and records what it is asked to do.
#[derive(Clone)]
pub struct RecordingAnimator {
    inner: Rc<dyn FlingAnimator>,
    requests: Rc<RefCell<Vec<FlingRequest>>>,
    cancels: Rc<Cell<usize>>,
}

impl RecordingAnimator {
    pub fn new(inner: impl FlingAnimator + 'static) -> Self {
        Self {
            inner: Rc::new(inner),
            requests: Rc::default(),
            cancels: Rc::default(),
        }
    }

    pub fn requests(&self) -> Vec<FlingRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<FlingRequest> {
        self.requests.borrow().last().copied()
    }

    pub fn cancel_count(&self) -> usize {
        self.cancels.get()
    }
}

impl FlingAnimator for RecordingAnimator {
    fn start(&self, request: FlingRequest, on_update: FlingUpdateCallback, on_end: FlingEndCallback) {
        self.requests.borrow_mut().push(request);
        self.inner.start(request, on_update, on_end);
    }

    fn cancel(&self) {
        self.cancels.set(self.cancels.get() + 1);
        self.inner.cancel();
    }

    fn is_running(&self) -> bool {
        self.inner.is_running()
    }
}
