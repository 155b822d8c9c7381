use crate::gesture::GestureScript;
use crate::recording::{RecordingAnimator, RecordingListener};
use crate::surface::TestSurface;
use snapdrag_animation::FlingAnimation;
use snapdrag_core::Runtime;
use snapdrag_foundation::input::PointerEvent;
use snapdrag_foundation::{DragAction, DragConfig, GestureRouter, InvalidConfiguration};
use std::rc::Rc;

/// One display frame at 60Hz.
pub const FRAME_NANOS: u64 = 16_666_667;

/// Frames after which [`DragTestRule::pump_until_idle`] gives up.
const MAX_IDLE_FRAMES: usize = 1_000;

/// An action built by a [`DragTestRule`], with its recorders.
#[derive(Clone)]
pub struct RecordedAction {
    pub action: DragAction,
    pub listener: RecordingListener,
    pub animator: RecordingAnimator,
}

/// Headless harness for exercising drag actions in tests.
///
/// Owns a frame runtime, a [`TestSurface`] and a [`GestureRouter`]
/// attached to it. Actions created through the rule animate with a real
/// [`FlingAnimation`] on the rule's frame clock, so settles only progress
/// when frames are advanced.
pub struct DragTestRule {
    runtime: Runtime,
    surface: TestSurface,
    router: GestureRouter,
    frame_time_nanos: u64,
}

impl DragTestRule {
    pub fn new() -> Self {
        let surface = TestSurface::new();
        let router = GestureRouter::new();
        router.attach(&surface);
        Self {
            runtime: Runtime::new(),
            surface,
            router,
            frame_time_nanos: 0,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn surface(&self) -> &TestSurface {
        &self.surface
    }

    pub fn router(&self) -> &GestureRouter {
        &self.router
    }

    /// A recording fling animator ticking on this rule's frame clock.
    pub fn animator(&self) -> RecordingAnimator {
        RecordingAnimator::new(FlingAnimation::new(self.runtime.frame_clock()))
    }

    /// Builds an action with a recording listener and animator without
    /// registering it on the router.
    pub fn detached_action(&self, config: DragConfig) -> Result<RecordedAction, InvalidConfiguration> {
        let animator = self.animator();
        let listener = RecordingListener::new();
        let action = DragAction::new(config, Rc::new(animator.clone()))?
            .with_listener(listener.clone());
        Ok(RecordedAction {
            action,
            listener,
            animator,
        })
    }

    /// Builds an action and registers it on the router.
    pub fn add_action(&self, config: DragConfig) -> Result<RecordedAction, InvalidConfiguration> {
        let recorded = self.detached_action(config)?;
        self.router.add_action(recorded.action.clone());
        Ok(recorded)
    }

    /// Delivers one event through the surface.
    pub fn dispatch(&self, event: PointerEvent) -> bool {
        self.surface.dispatch(event)
    }

    /// Delivers every event of `script` in order. Returns whether all were
    /// handled.
    pub fn perform(&self, script: &GestureScript) -> bool {
        script
            .events()
            .iter()
            .fold(true, |handled, event| self.dispatch(*event) && handled)
    }

    /// Runs one frame. Returns the number of callbacks executed.
    pub fn advance_frame(&mut self) -> usize {
        self.frame_time_nanos += FRAME_NANOS;
        self.runtime.drain_frame_callbacks(self.frame_time_nanos)
    }

    pub fn advance_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.advance_frame();
        }
    }

    /// Runs frames until no callback is pending. Returns the frame count.
    pub fn pump_until_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.has_frame_callbacks() {
            frames += 1;
            if frames > MAX_IDLE_FRAMES {
                panic!("pump_until_idle: still animating after {MAX_IDLE_FRAMES} frames");
            }
            self.advance_frame();
        }
        log::trace!("idle after {frames} frames");
        frames
    }

    /// Performs `script`, then lets every settle finish.
    pub fn perform_and_settle(&mut self, script: &GestureScript) -> bool {
        let handled = self.perform(script);
        self.pump_until_idle();
        handled
    }

    /// Timestamp of the last frame run.
    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos
    }
}

impl Default for DragTestRule {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/rule_tests.rs"]
mod tests;
