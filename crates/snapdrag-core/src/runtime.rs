use crate::frame_clock::FrameClock;
use crate::platform::{NoopScheduler, RuntimeScheduler};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::thread::ThreadId;

pub type FrameCallbackId = u64;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct RuntimeInner {
    scheduler: Rc<dyn RuntimeScheduler>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
    ui_thread_id: ThreadId,
}

impl RuntimeInner {
    fn new(scheduler: Rc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            ui_thread_id: std::thread::current().id(),
        }
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks.borrow_mut().push_back(FrameCallbackEntry {
            id,
            callback: Some(callback),
        });
        self.scheduler.schedule_frame();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    /// Runs every callback registered before this call. Callbacks registered
    /// while draining wait for the next frame.
    fn drain_frame_callbacks(&self, frame_time_nanos: u64) -> usize {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = Vec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        let count = pending.len();
        for callback in pending {
            callback(frame_time_nanos);
        }
        log::trace!("drained {count} frame callbacks at {frame_time_nanos}ns");
        count
    }
}

/// Owner of the frame callback queue.
///
/// Dropping the runtime invalidates every [`RuntimeHandle`] and
/// [`FrameClock`] created from it; registrations made through a dead handle
/// are silently inactive.
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_scheduler(Rc::new(NoopScheduler))
    }

    pub fn with_scheduler(scheduler: Rc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.handle().frame_clock()
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) -> usize {
        self.handle().drain_frame_callbacks(frame_time_nanos)
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner.has_frame_callbacks()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

/// Weak, cloneable access to a [`Runtime`].
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    /// Returns the number of callbacks that ran.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) -> usize {
        self.assert_ui_thread();
        self.inner
            .upgrade()
            .map(|inner| inner.drain_frame_callbacks(frame_time_nanos))
            .unwrap_or(0)
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    pub fn assert_ui_thread(&self) {
        if let Some(inner) = self.inner.upgrade() {
            debug_assert_eq!(
                std::thread::current().id(),
                inner.ui_thread_id,
                "frame callbacks drained off the runtime's UI thread"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingScheduler {
        requests: Cell<usize>,
    }

    impl RuntimeScheduler for CountingScheduler {
        fn schedule_frame(&self) {
            self.requests.set(self.requests.get() + 1);
        }
    }

    #[test]
    fn registration_requests_a_frame() {
        let scheduler = Rc::new(CountingScheduler::default());
        let runtime = Runtime::with_scheduler(scheduler.clone());
        let handle = runtime.handle();

        handle.register_frame_callback(|_| {});
        handle.register_frame_callback(|_| {});

        assert_eq!(scheduler.requests.get(), 2);
        assert!(runtime.has_frame_callbacks());
    }

    #[test]
    fn drain_runs_callbacks_in_registration_order() {
        let runtime = Runtime::new();
        let handle = runtime.handle();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for tag in 0..3 {
            let seen = Rc::clone(&seen);
            handle.register_frame_callback(move |time| seen.borrow_mut().push((tag, time)));
        }

        assert_eq!(runtime.drain_frame_callbacks(42), 3);
        assert_eq!(*seen.borrow(), vec![(0, 42), (1, 42), (2, 42)]);
        assert!(!runtime.has_frame_callbacks());
    }

    #[test]
    fn callbacks_registered_during_drain_wait_for_next_frame() {
        let runtime = Runtime::new();
        let handle = runtime.handle();
        let frames = Rc::new(RefCell::new(Vec::new()));

        {
            let frames = Rc::clone(&frames);
            let nested = handle.clone();
            handle.register_frame_callback(move |time| {
                frames.borrow_mut().push(time);
                let frames = Rc::clone(&frames);
                nested.register_frame_callback(move |time| frames.borrow_mut().push(time));
            });
        }

        runtime.drain_frame_callbacks(1);
        assert_eq!(*frames.borrow(), vec![1]);
        assert!(runtime.has_frame_callbacks());

        runtime.drain_frame_callbacks(2);
        assert_eq!(*frames.borrow(), vec![1, 2]);
    }

    #[test]
    fn cancelled_callback_never_runs() {
        let runtime = Runtime::new();
        let handle = runtime.handle();
        let ran = Rc::new(Cell::new(false));

        let id = {
            let ran = Rc::clone(&ran);
            handle
                .register_frame_callback(move |_| ran.set(true))
                .expect("runtime alive")
        };
        handle.cancel_frame_callback(id);

        assert_eq!(runtime.drain_frame_callbacks(0), 0);
        assert!(!ran.get());
    }

    #[test]
    fn dead_runtime_handle_is_inert() {
        let handle = Runtime::new().handle();
        assert!(!handle.is_alive());
        assert!(handle.register_frame_callback(|_| {}).is_none());
        assert_eq!(handle.drain_frame_callbacks(0), 0);
    }
}
