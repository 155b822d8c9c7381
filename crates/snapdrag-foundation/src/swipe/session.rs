//! Per-gesture state of one drag action.

use crate::velocity_tracker::VelocityTracker1D;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// No pointer down and no settle running.
    #[default]
    Idle,
    /// Pointer down, positions follow the pointer.
    Dragging,
    /// Pointer lifted, a settle animation carries the position to a step.
    Settling,
}

/// A resolved step: its index and value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepTarget {
    pub index: usize,
    pub value: f32,
}

#[derive(Debug, Clone, Copy)]
struct ActiveSettle {
    generation: u64,
    target: StepTarget,
}

/// Position, phase and velocity samples of a drag action.
///
/// The session never talks to listeners or animators itself; the owning
/// action reads the transitions it reports and emits callbacks accordingly.
/// Every settle gets a generation number so that animation callbacks from a
/// superseded settle can be told apart from the live one.
#[derive(Debug, Clone)]
pub struct DragSession {
    current_step_index: usize,
    last_position: f32,
    start_position: f32,
    press_origin: f32,
    phase: DragPhase,
    velocity_tracker: VelocityTracker1D,
    settle_generation: u64,
    active_settle: Option<ActiveSettle>,
}

impl DragSession {
    pub fn new(initial_position: f32) -> Self {
        Self {
            current_step_index: 0,
            last_position: initial_position,
            start_position: initial_position,
            press_origin: 0.0,
            phase: DragPhase::Idle,
            velocity_tracker: VelocityTracker1D::new(),
            settle_generation: 0,
            active_settle: None,
        }
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    pub fn last_position(&self) -> f32 {
        self.last_position
    }

    pub fn start_position(&self) -> f32 {
        self.start_position
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Starts tracking a press at `axis_position`. Returns whether the
    /// session was idle, i.e. whether this press opens a new interaction.
    pub fn begin_press(&mut self, axis_position: f32, time_ms: i64) -> bool {
        let was_idle = self.phase == DragPhase::Idle;
        self.phase = DragPhase::Dragging;
        self.start_position = self.last_position;
        self.press_origin = axis_position;
        self.velocity_tracker.reset();
        self.velocity_tracker.add_sample(time_ms, axis_position);
        was_idle
    }

    pub fn track(&mut self, axis_position: f32, time_ms: i64) {
        self.velocity_tracker.add_sample(time_ms, axis_position);
    }

    /// Position the pointer at `axis_position` would put the panel at.
    pub fn candidate_position(&self, axis_position: f32) -> f32 {
        axis_position - self.press_origin + self.start_position
    }

    pub fn accept_position(&mut self, position: f32) {
        self.last_position = position;
    }

    /// Release velocity along the drag axis, in units per second.
    pub fn release_velocity(&self) -> f32 {
        self.velocity_tracker.velocity()
    }

    /// Enters [`DragPhase::Settling`] toward `target` and returns the
    /// generation identifying this settle.
    pub fn begin_settle(&mut self, target: StepTarget) -> u64 {
        self.settle_generation += 1;
        self.active_settle = Some(ActiveSettle {
            generation: self.settle_generation,
            target,
        });
        self.phase = DragPhase::Settling;
        self.settle_generation
    }

    pub fn has_active_settle(&self) -> bool {
        self.active_settle.is_some()
    }

    pub fn settle_target(&self) -> Option<StepTarget> {
        self.active_settle.map(|settle| settle.target)
    }

    pub fn is_current_settle(&self, generation: u64) -> bool {
        matches!(self.active_settle, Some(settle) if settle.generation == generation)
    }

    /// Records an animated position. Ignored for stale generations.
    pub fn settle_progress(&mut self, generation: u64, value: f32) -> bool {
        if !self.is_current_settle(generation) {
            return false;
        }
        self.last_position = value;
        true
    }

    /// Drops the settle at the live `value` without committing a step. The
    /// phase is left to the caller that interrupted the settle.
    pub fn cancel_settle(&mut self, generation: u64, value: f32) -> bool {
        if !self.is_current_settle(generation) {
            return false;
        }
        self.active_settle = None;
        self.last_position = value;
        true
    }

    /// Commits the settle's target step and returns to idle.
    pub fn complete_settle(&mut self, generation: u64) -> Option<StepTarget> {
        if !self.is_current_settle(generation) {
            return None;
        }
        let target = self.active_settle.take()?.target;
        self.current_step_index = target.index;
        self.last_position = target.value;
        self.phase = DragPhase::Idle;
        Some(target)
    }

    /// Forgets any settle without touching the position.
    pub fn abandon_settle(&mut self) {
        self.active_settle = None;
    }

    /// Puts the session at rest on a step, e.g. after the steps changed.
    pub fn rest_at(&mut self, index: usize, value: f32) {
        self.active_settle = None;
        self.current_step_index = index;
        self.last_position = value;
        self.start_position = value;
        self.phase = DragPhase::Idle;
        self.velocity_tracker.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_from_idle_opens_interaction() {
        let mut session = DragSession::new(0.0);
        assert!(session.begin_press(200.0, 0));
        assert_eq!(session.phase(), DragPhase::Dragging);
        assert!(!session.begin_press(200.0, 10));
    }

    #[test]
    fn candidate_is_relative_to_press_and_start() {
        let mut session = DragSession::new(30.0);
        session.begin_press(500.0, 0);
        assert_eq!(session.candidate_position(520.0), 50.0);
        assert_eq!(session.candidate_position(470.0), 0.0);
    }

    #[test]
    fn stale_generations_are_ignored() {
        let mut session = DragSession::new(0.0);
        let first = session.begin_settle(StepTarget { index: 1, value: 100.0 });
        let second = session.begin_settle(StepTarget { index: 0, value: 0.0 });

        assert!(!session.settle_progress(first, 42.0));
        assert!(!session.cancel_settle(first, 42.0));
        assert_eq!(session.complete_settle(first), None);
        assert_eq!(session.last_position(), 0.0);

        assert!(session.settle_progress(second, 12.0));
        assert_eq!(session.last_position(), 12.0);
    }

    #[test]
    fn completing_commits_target() {
        let mut session = DragSession::new(0.0);
        let generation = session.begin_settle(StepTarget { index: 1, value: 100.0 });
        assert_eq!(session.phase(), DragPhase::Settling);
        session.settle_progress(generation, 98.5);

        let target = session.complete_settle(generation);
        assert_eq!(target, Some(StepTarget { index: 1, value: 100.0 }));
        assert_eq!(session.current_step_index(), 1);
        assert_eq!(session.last_position(), 100.0);
        assert_eq!(session.phase(), DragPhase::Idle);
        assert!(!session.has_active_settle());
    }

    #[test]
    fn cancelling_keeps_live_position_and_index() {
        let mut session = DragSession::new(0.0);
        let generation = session.begin_settle(StepTarget { index: 1, value: 100.0 });
        assert!(session.cancel_settle(generation, 37.0));
        assert_eq!(session.current_step_index(), 0);
        assert_eq!(session.last_position(), 37.0);
        assert_eq!(session.settle_target(), None);
    }
}
