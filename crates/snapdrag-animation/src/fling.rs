//! Bounded fling animation driven by a [`FrameClock`].

use crate::decay_spec::{ExponentialDecaySpec, FloatDecayAnimationSpec};
use snapdrag_core::{FrameCallbackRegistration, FrameClock};
use std::cell::RefCell;
use std::rc::Rc;

/// Receives every intermediate value of a running fling.
pub type FlingUpdateCallback = Box<dyn FnMut(f32)>;

/// Receives the final value, and `true` when the fling was cancelled.
pub type FlingEndCallback = Box<dyn FnOnce(f32, bool)>;

/// Parameters of one fling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingRequest {
    pub start_value: f32,
    /// Units per second.
    pub start_velocity: f32,
    pub min_value: f32,
    pub max_value: f32,
}

impl FlingRequest {
    /// An unbounded fling.
    pub fn new(start_value: f32, start_velocity: f32) -> Self {
        Self {
            start_value,
            start_velocity,
            min_value: f32::NEG_INFINITY,
            max_value: f32::INFINITY,
        }
    }

    pub fn with_bounds(mut self, min_value: f32, max_value: f32) -> Self {
        let (min_value, max_value) = if min_value <= max_value {
            (min_value, max_value)
        } else {
            (max_value, min_value)
        };
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.min_value).min(self.max_value)
    }

    /// Whether `value` sits on the bound the fling is heading toward.
    pub fn reached_bound(&self, value: f32) -> bool {
        (self.start_velocity < 0.0 && value <= self.min_value)
            || (self.start_velocity > 0.0 && value >= self.max_value)
    }
}

/// Physics integrator consumed by the drag engine.
///
/// Implementations call `on_update` for every intermediate value and
/// `on_end` exactly once per started fling: with `canceled = false` when the
/// fling comes to rest or reaches its bound, with `canceled = true` when
/// [`cancel`](FlingAnimator::cancel) (or a new [`start`](FlingAnimator::start))
/// interrupts it. Callbacks must not be invoked while the implementation
/// holds internal borrows, since they are free to call back into it.
pub trait FlingAnimator {
    fn start(&self, request: FlingRequest, on_update: FlingUpdateCallback, on_end: FlingEndCallback);

    fn cancel(&self);

    fn is_running(&self) -> bool;
}

/// Frame-clock driven [`FlingAnimator`].
///
/// The first frame after [`start`](FlingAnimator::start) only records the
/// start time; values are reported from the second frame on. The fling ends
/// when the decay spec's duration elapses or the value is clamped against the
/// bound it is moving toward.
#[derive(Clone)]
pub struct FlingAnimation {
    inner: Rc<RefCell<FlingInner>>,
}

struct FlingInner {
    clock: FrameClock,
    spec: Box<dyn FloatDecayAnimationSpec>,
    run: Option<FlingRun>,
    next_run_id: u64,
}

struct FlingRun {
    id: u64,
    request: FlingRequest,
    duration_nanos: i64,
    start_time_nanos: Option<u64>,
    value: f32,
    on_update: Option<FlingUpdateCallback>,
    on_end: Option<FlingEndCallback>,
    registration: Option<FrameCallbackRegistration>,
}

enum FrameOutcome {
    Wait,
    Update {
        run_id: u64,
        value: f32,
        callback: Option<FlingUpdateCallback>,
    },
    Finish {
        value: f32,
        callback: Option<FlingEndCallback>,
    },
}

impl FlingAnimation {
    pub fn new(clock: FrameClock) -> Self {
        Self::with_spec(clock, ExponentialDecaySpec::default())
    }

    pub fn with_spec(clock: FrameClock, spec: impl FloatDecayAnimationSpec + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(FlingInner {
                clock,
                spec: Box::new(spec),
                run: None,
                next_run_id: 1,
            })),
        }
    }

    fn schedule_frame(this: &Rc<RefCell<FlingInner>>) {
        let clock = {
            let inner = this.borrow();
            match &inner.run {
                Some(run) if run.registration.is_none() => inner.clock.clone(),
                _ => return,
            }
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        if !registration.is_active() {
            log::warn!("fling scheduled on a runtime that is gone; it will never advance");
        }
        if let Some(run) = this.borrow_mut().run.as_mut() {
            run.registration = Some(registration);
        }
    }

    fn on_frame(this: &Rc<RefCell<FlingInner>>, frame_time_nanos: u64) {
        let outcome = {
            let mut guard = this.borrow_mut();
            let inner = &mut *guard;
            let Some(run) = inner.run.as_mut() else {
                return;
            };
            run.registration = None;

            let start_time = *run.start_time_nanos.get_or_insert(frame_time_nanos);
            let elapsed = frame_time_nanos.saturating_sub(start_time).min(i64::MAX as u64) as i64;
            let raw = inner.spec.get_value_from_nanos(
                elapsed,
                run.request.start_value,
                run.request.start_velocity,
            );
            let value = run.request.clamp(raw);
            run.value = value;

            if elapsed >= run.duration_nanos || run.request.reached_bound(value) {
                let callback = inner.run.take().and_then(|mut run| run.on_end.take());
                FrameOutcome::Finish { value, callback }
            } else if elapsed == 0 {
                FrameOutcome::Wait
            } else {
                FrameOutcome::Update {
                    run_id: run.id,
                    value,
                    callback: run.on_update.take(),
                }
            }
        };

        match outcome {
            FrameOutcome::Wait => Self::schedule_frame(this),
            FrameOutcome::Update {
                run_id,
                value,
                callback,
            } => {
                let Some(mut callback) = callback else {
                    Self::schedule_frame(this);
                    return;
                };
                callback(value);
                let still_running = {
                    let mut inner = this.borrow_mut();
                    match inner.run.as_mut() {
                        Some(run) if run.id == run_id => {
                            run.on_update = Some(callback);
                            true
                        }
                        _ => false,
                    }
                };
                if still_running {
                    Self::schedule_frame(this);
                }
            }
            FrameOutcome::Finish { value, callback } => {
                log::debug!("fling settled at {value}");
                if let Some(callback) = callback {
                    callback(value, false);
                }
            }
        }
    }
}

impl FlingAnimator for FlingAnimation {
    fn start(&self, request: FlingRequest, on_update: FlingUpdateCallback, on_end: FlingEndCallback) {
        if self.is_running() {
            self.cancel();
        }
        {
            let mut inner = self.inner.borrow_mut();
            let duration_nanos = inner
                .spec
                .get_duration_nanos(request.start_value, request.start_velocity);
            let id = inner.next_run_id;
            inner.next_run_id += 1;
            inner.run = Some(FlingRun {
                id,
                request,
                duration_nanos,
                start_time_nanos: None,
                value: request.clamp(request.start_value),
                on_update: Some(on_update),
                on_end: Some(on_end),
                registration: None,
            });
        }
        log::debug!(
            "fling from {} at {}/s within [{}, {}]",
            request.start_value,
            request.start_velocity,
            request.min_value,
            request.max_value
        );
        Self::schedule_frame(&self.inner);
    }

    fn cancel(&self) {
        let run = self.inner.borrow_mut().run.take();
        if let Some(mut run) = run {
            if let Some(registration) = run.registration.take() {
                registration.cancel();
            }
            log::debug!("fling cancelled at {}", run.value);
            if let Some(callback) = run.on_end.take() {
                callback(run.value, true);
            }
        }
    }

    fn is_running(&self) -> bool {
        self.inner.borrow().run.is_some()
    }
}

#[cfg(test)]
#[path = "tests/fling_tests.rs"]
mod tests;
