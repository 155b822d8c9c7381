use crate::runtime::{FrameCallbackId, RuntimeHandle};

#[derive(Clone)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.clone()
    }

    /// Schedules `callback` for the next drained frame. The callback receives
    /// the frame time in nanoseconds.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let mut callback_opt = Some(callback);
        let runtime = self.runtime.clone();
        match runtime.register_frame_callback(move |time| {
            if let Some(callback) = callback_opt.take() {
                callback(time);
            }
        }) {
            Some(id) => FrameCallbackRegistration::new(runtime, id),
            None => FrameCallbackRegistration::inactive(runtime),
        }
    }
}

/// Keeps a frame callback scheduled. Dropping or cancelling it removes the
/// callback if it has not run yet.
pub struct FrameCallbackRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    fn new(runtime: RuntimeHandle, id: FrameCallbackId) -> Self {
        Self {
            runtime,
            id: Some(id),
        }
    }

    fn inactive(runtime: RuntimeHandle) -> Self {
        Self { runtime, id: None }
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Runtime;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn dropping_registration_cancels_callback() {
        let runtime = Runtime::new();
        let clock = runtime.frame_clock();
        let ran = Rc::new(Cell::new(false));

        let registration = {
            let ran = Rc::clone(&ran);
            clock.with_frame_nanos(move |_| ran.set(true))
        };
        assert!(registration.is_active());
        drop(registration);

        runtime.drain_frame_callbacks(16_666_667);
        assert!(!ran.get());
    }

    #[test]
    fn kept_registration_receives_frame_time() {
        let runtime = Runtime::new();
        let clock = runtime.frame_clock();
        let seen = Rc::new(Cell::new(0u64));

        let _registration = {
            let seen = Rc::clone(&seen);
            clock.with_frame_nanos(move |time| seen.set(time))
        };

        runtime.drain_frame_callbacks(33_333_334);
        assert_eq!(seen.get(), 33_333_334);
    }
}
