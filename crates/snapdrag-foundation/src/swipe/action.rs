//! The draggable unit: steps, session, resolver and listener in one handle.

use super::config::{validate_threshold, DragConfig};
use super::error::InvalidConfiguration;
use super::listener::DragListener;
use super::resolver::{FlingResolver, SettlePlan};
use super::session::{DragPhase, DragSession};
use super::steps::{DragDirection, StepSequence};
use crate::gesture_constants::SETTLED_FRICTION;
use crate::input::{PointerEvent, PointerEventKind};
use smallvec::SmallVec;
use snapdrag_animation::FlingAnimator;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Listener calls collected while state is borrowed, delivered after.
enum DragCallback {
    Start(f32),
    Drag(f32, f32),
    End(f32, f32),
}

type PendingCallbacks = SmallVec<[DragCallback; 2]>;

struct DragState {
    steps: StepSequence,
    drag_threshold: f32,
    session: DragSession,
}

impl DragState {
    fn resolver(&self) -> FlingResolver<'_> {
        FlingResolver::new(
            &self.steps,
            self.session.current_step_index(),
            self.drag_threshold,
        )
    }
}

struct DragActionInner {
    state: RefCell<DragState>,
    blocked: Cell<bool>,
    listener: RefCell<Option<Rc<dyn DragListener>>>,
    animator: Rc<dyn FlingAnimator>,
}

/// A panel that snaps between steps along one axis.
///
/// Cloning yields another handle to the same action. Feed it pointer events
/// directly with [`on_pointer_event`](Self::on_pointer_event) or register it
/// with a [`GestureRouter`](super::GestureRouter). Positions start at the
/// first step.
///
/// The animator must not be shared with another action: starting a fling
/// on it cancels whatever it was running.
#[derive(Clone)]
pub struct DragAction {
    inner: Rc<DragActionInner>,
}

impl DragAction {
    pub fn new(
        config: DragConfig,
        animator: Rc<dyn FlingAnimator>,
    ) -> Result<Self, InvalidConfiguration> {
        validate_threshold(config.drag_threshold)?;
        let steps = StepSequence::new(config.steps, config.direction)?;
        let session = DragSession::new(steps.first());
        Ok(Self {
            inner: Rc::new(DragActionInner {
                state: RefCell::new(DragState {
                    steps,
                    drag_threshold: config.drag_threshold,
                    session,
                }),
                blocked: Cell::new(false),
                listener: RefCell::new(None),
                animator,
            }),
        })
    }

    pub fn with_listener(self, listener: impl DragListener + 'static) -> Self {
        self.set_listener(listener);
        self
    }

    pub fn set_listener(&self, listener: impl DragListener + 'static) {
        *self.inner.listener.borrow_mut() = Some(Rc::new(listener));
    }

    pub fn clear_listener(&self) {
        self.inner.listener.borrow_mut().take();
    }

    /// Blocked actions are skipped by the router. Programmatic
    /// [`push_to_step`](Self::push_to_step) is refused while blocked.
    pub fn set_blocked(&self, blocked: bool) {
        self.inner.blocked.set(blocked);
    }

    pub fn is_blocked(&self) -> bool {
        self.inner.blocked.get()
    }

    /// Index of the committed step.
    pub fn step(&self) -> usize {
        self.inner.state.borrow().session.current_step_index()
    }

    /// Whether the action rests beyond its first step.
    pub fn is_extended(&self) -> bool {
        self.step() > 0
    }

    pub fn is_dragging(&self) -> bool {
        self.phase() != DragPhase::Idle
    }

    pub fn phase(&self) -> DragPhase {
        self.inner.state.borrow().session.phase()
    }

    /// Last position reported to the listener.
    pub fn position(&self) -> f32 {
        self.inner.state.borrow().session.last_position()
    }

    pub fn direction(&self) -> DragDirection {
        self.inner.state.borrow().steps.direction()
    }

    pub fn steps(&self) -> Vec<f32> {
        self.inner.state.borrow().steps.values().to_vec()
    }

    pub fn drag_threshold(&self) -> f32 {
        self.inner.state.borrow().drag_threshold
    }

    /// Changes the drag direction. The current steps must be ordered for
    /// it. A gesture or settle in flight is abandoned and the action comes
    /// to rest on its committed step.
    pub fn set_direction(&self, direction: DragDirection) -> Result<(), InvalidConfiguration> {
        StepSequence::validate(&self.steps(), direction)?;
        self.cancel_if_running();

        let mut state = self.inner.state.borrow_mut();
        let state = &mut *state;
        state.steps.set_direction(direction)?;
        let index = state.session.current_step_index();
        let value = state.steps.value(index);
        state.session.rest_at(index, value);
        log::debug!("direction set to {direction:?}, resting on step {index} at {value}");
        Ok(())
    }

    /// Replaces the steps. A running settle is cancelled and the action
    /// comes to rest on the committed index, clamped to the new range.
    pub fn set_steps(&self, values: impl Into<Vec<f32>>) -> Result<(), InvalidConfiguration> {
        let values = values.into();
        let direction = self.direction();
        StepSequence::validate(&values, direction)?;
        self.cancel_if_running();

        let mut state = self.inner.state.borrow_mut();
        let state = &mut *state;
        state.steps.set_values(values)?;
        let index = state
            .session
            .current_step_index()
            .min(state.steps.last_index());
        let value = state.steps.value(index);
        state.session.rest_at(index, value);
        log::debug!("steps replaced, resting on step {index} at {value}");
        Ok(())
    }

    pub fn set_drag_threshold(&self, drag_threshold: f32) -> Result<(), InvalidConfiguration> {
        validate_threshold(drag_threshold)?;
        self.inner.state.borrow_mut().drag_threshold = drag_threshold;
        Ok(())
    }

    /// Feeds one pointer event through the drag state machine. Always
    /// reports the event as handled.
    pub fn on_pointer_event(&self, event: &PointerEvent) -> bool {
        let axis = self.inner.state.borrow().steps.axis();
        let axis_position = event.position.along(axis);
        let time_ms = event.uptime_millis as i64;
        match event.kind {
            PointerEventKind::Down => self.press(axis_position, time_ms),
            PointerEventKind::Move => self.drag_to(axis_position, time_ms),
            PointerEventKind::Up | PointerEventKind::Cancel => self.release(axis_position, time_ms),
        }
        true
    }

    /// Animates to step `index` as if released there with just enough
    /// momentum. Returns `false`, without side effects, when the action is
    /// blocked or `index` is out of range.
    pub fn push_to_step(&self, index: usize) -> bool {
        if self.is_blocked() {
            log::warn!("push to step {index} refused: action is blocked");
            return false;
        }
        let len = self.inner.state.borrow().steps.len();
        if index >= len {
            log::warn!("push to step {index} refused: only {len} steps");
            return false;
        }
        self.cancel_if_running();
        let plan = {
            let state = self.inner.state.borrow();
            state
                .resolver()
                .plan_push(state.session.last_position(), index)
        };
        self.start_settle(plan);
        true
    }

    /// Pushes to the last step.
    pub fn expand(&self) -> bool {
        let last = self.inner.state.borrow().steps.last_index();
        self.push_to_step(last)
    }

    /// Pushes to the first step.
    pub fn collapse(&self) -> bool {
        self.push_to_step(0)
    }

    /// Stops the settle animation this action owns, if any. The position
    /// stays where the animation was; no step is committed.
    pub fn cancel_if_running(&self) {
        let active = self.inner.state.borrow().session.has_active_settle();
        if !active {
            return;
        }
        if self.inner.animator.is_running() {
            self.inner.animator.cancel();
        }
        // The animator reports the cancellation through the end callback;
        // anything still pending here was lost by the animator.
        self.inner.state.borrow_mut().session.abandon_settle();
    }

    pub fn ptr_eq(&self, other: &DragAction) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// A handle that does not keep the action alive, for listeners that
    /// need to reach a sibling action.
    pub fn downgrade(&self) -> WeakDragAction {
        WeakDragAction {
            inner: Rc::downgrade(&self.inner),
        }
    }

    fn press(&self, axis_position: f32, time_ms: i64) {
        self.cancel_if_running();
        let mut callbacks = PendingCallbacks::new();
        {
            let mut state = self.inner.state.borrow_mut();
            let state = &mut *state;
            if state.session.begin_press(axis_position, time_ms) {
                let value = state.steps.value(state.session.current_step_index());
                callbacks.push(DragCallback::Start(value));
            }
            log::trace!(
                "press at {axis_position}, resuming from {}",
                state.session.start_position()
            );
        }
        self.dispatch(callbacks);
    }

    fn drag_to(&self, axis_position: f32, time_ms: i64) {
        let mut callbacks = PendingCallbacks::new();
        {
            let mut state = self.inner.state.borrow_mut();
            let state = &mut *state;
            if state.session.phase() != DragPhase::Dragging {
                return;
            }
            state.session.track(axis_position, time_ms);
            let position = state.session.candidate_position(axis_position);
            let window = state
                .steps
                .neighbor_bounds(state.session.current_step_index());
            if !window.contains(position) {
                log::trace!("move to {position} outside {window:?} dropped");
                return;
            }
            state.session.accept_position(position);
            callbacks.push(DragCallback::Drag(position, state.steps.progress(position)));
        }
        self.dispatch(callbacks);
    }

    fn release(&self, axis_position: f32, time_ms: i64) {
        let plan = {
            let mut state = self.inner.state.borrow_mut();
            if state.session.phase() != DragPhase::Dragging {
                return;
            }
            state.session.track(axis_position, time_ms);
            let velocity = state.session.release_velocity();
            state
                .resolver()
                .plan_release(state.session.last_position(), velocity)
        };
        self.start_settle(plan);
    }

    fn start_settle(&self, plan: SettlePlan) {
        let generation = self
            .inner
            .state
            .borrow_mut()
            .session
            .begin_settle(plan.target);
        log::debug!(
            "settling from {} to step {} ({}) at {}/s",
            plan.start_value,
            plan.target.index,
            plan.target.value,
            plan.velocity
        );

        let weak = self.downgrade();
        let on_update = {
            let weak = weak.clone();
            Box::new(move |value: f32| {
                if let Some(action) = weak.upgrade() {
                    action.on_settle_update(generation, value);
                }
            })
        };
        let on_end = Box::new(move |value: f32, canceled: bool| {
            if let Some(action) = weak.upgrade() {
                action.on_settle_end(generation, value, canceled);
            }
        });
        self.inner
            .animator
            .start(plan.fling_request(), on_update, on_end);
    }

    fn on_settle_update(&self, generation: u64, value: f32) {
        let mut callbacks = PendingCallbacks::new();
        {
            let mut state = self.inner.state.borrow_mut();
            let state = &mut *state;
            if state.session.settle_progress(generation, value) {
                callbacks.push(DragCallback::Drag(value, state.steps.progress(value)));
            }
        }
        self.dispatch(callbacks);
    }

    fn on_settle_end(&self, generation: u64, value: f32, canceled: bool) {
        let mut callbacks = PendingCallbacks::new();
        {
            let mut state = self.inner.state.borrow_mut();
            let state = &mut *state;
            if canceled {
                if state.session.cancel_settle(generation, value) {
                    log::debug!("settle interrupted at {value}");
                    callbacks.push(DragCallback::Drag(value, state.steps.progress(value)));
                }
            } else if let Some(target) = state.session.complete_settle(generation) {
                log::debug!("settled on step {} at {}", target.index, target.value);
                let friction = state.steps.progress(target.value);
                callbacks.push(DragCallback::Drag(target.value, friction));
                callbacks.push(DragCallback::End(target.value, SETTLED_FRICTION));
            }
        }
        self.dispatch(callbacks);
    }

    fn dispatch(&self, callbacks: PendingCallbacks) {
        if callbacks.is_empty() {
            return;
        }
        let Some(listener) = self.inner.listener.borrow().clone() else {
            return;
        };
        for callback in callbacks {
            match callback {
                DragCallback::Start(position) => listener.on_drag_start(position),
                DragCallback::Drag(position, friction) => listener.on_drag(position, friction),
                DragCallback::End(position, friction) => listener.on_drag_end(position, friction),
            }
        }
    }
}

impl std::fmt::Debug for DragAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("DragAction")
            .field("steps", &state.steps)
            .field("drag_threshold", &state.drag_threshold)
            .field("session", &state.session)
            .field("blocked", &self.inner.blocked.get())
            .finish()
    }
}

/// Non-owning [`DragAction`] handle.
#[derive(Clone)]
pub struct WeakDragAction {
    inner: Weak<DragActionInner>,
}

impl WeakDragAction {
    pub fn upgrade(&self) -> Option<DragAction> {
        self.inner.upgrade().map(|inner| DragAction { inner })
    }
}

#[cfg(test)]
#[path = "../tests/action_tests.rs"]
mod tests;
