//! Host hooks for the runtime.

/// Lets the host know that the runtime wants another frame.
///
/// Called every time a frame callback is registered. Desktop hosts usually
/// forward this to a window redraw request; headless hosts can ignore it.
pub trait RuntimeScheduler {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Scheduler that never asks for anything; frames are drained manually.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopScheduler;

impl RuntimeScheduler for NoopScheduler {
    fn schedule_frame(&self) {}
}
