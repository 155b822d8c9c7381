//! Release velocity and target step selection.

use super::session::StepTarget;
use super::steps::StepSequence;
use crate::gesture_constants::SLOW_FACTOR;
use snapdrag_animation::FlingRequest;

/// A settle ready to hand to the fling animator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettlePlan {
    pub target: StepTarget,
    pub start_value: f32,
    /// Units per second.
    pub velocity: f32,
    pub min_value: f32,
    pub max_value: f32,
}

impl SettlePlan {
    pub fn fling_request(&self) -> FlingRequest {
        FlingRequest::new(self.start_value, self.velocity)
            .with_bounds(self.min_value, self.max_value)
    }
}

/// Picks the step a release settles on, relative to the committed step.
pub struct FlingResolver<'a> {
    steps: &'a StepSequence,
    current_index: usize,
    drag_threshold: f32,
}

impl<'a> FlingResolver<'a> {
    pub fn new(steps: &'a StepSequence, current_index: usize, drag_threshold: f32) -> Self {
        Self {
            steps,
            current_index: current_index.min(steps.last_index()),
            drag_threshold,
        }
    }

    fn current(&self) -> StepTarget {
        self.at(self.current_index)
    }

    fn at(&self, index: usize) -> StepTarget {
        StepTarget {
            index,
            value: self.steps.value(index),
        }
    }

    /// Adjacent step on the side of `position`, or the current step when
    /// `check_threshold` is set and `position` has not covered
    /// `drag_threshold` of the way there.
    pub fn resolve_next_step(&self, position: f32, check_threshold: bool) -> StepTarget {
        let current = self.current();
        let index = current.index;
        let target = if index == self.steps.last_index() {
            if self.steps.precedes(current.value, position) {
                current
            } else {
                self.at(index - 1)
            }
        } else if self.steps.precedes(position, current.value) {
            self.at(index.saturating_sub(1))
        } else {
            self.at(index + 1)
        };

        if check_threshold
            && target.index != index
            && (current.value - position).abs()
                < self.drag_threshold * (target.value - current.value).abs()
        {
            return current;
        }
        target
    }

    /// Settle for a release at `last_position` with the tracked velocity.
    ///
    /// A flick too weak to glide to the adjacent step on its own is re-armed
    /// with exactly the velocity needed to get there, unless the threshold
    /// check sends it back to the current step, in which case it is armed
    /// to return there.
    pub fn plan_release(&self, last_position: f32, tracked_velocity: f32) -> SettlePlan {
        let projected = last_position + tracked_velocity / SLOW_FACTOR;
        let candidate = self.resolve_next_step(projected, false);

        let mut velocity = tracked_velocity;
        if velocity.abs() < (candidate.value - last_position).abs() * SLOW_FACTOR {
            let checked = self.resolve_next_step(projected, true);
            velocity = (checked.value - last_position) * SLOW_FACTOR;
        }

        let target = self.resolve_next_step(last_position + velocity / SLOW_FACTOR, true);
        self.plan(last_position, velocity, target)
    }

    /// Settle straight to step `index` from `last_position`.
    pub fn plan_push(&self, last_position: f32, index: usize) -> SettlePlan {
        let target = self.at(index.min(self.steps.last_index()));
        let velocity = (target.value - last_position) * SLOW_FACTOR;
        self.plan(last_position, velocity, target)
    }

    fn plan(&self, last_position: f32, velocity: f32, target: StepTarget) -> SettlePlan {
        let current = self.current().value;
        SettlePlan {
            target,
            start_value: last_position,
            velocity,
            min_value: current.min(target.value).min(last_position),
            max_value: current.max(target.value).max(last_position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swipe::steps::DragDirection;

    fn down(values: &[f32]) -> StepSequence {
        StepSequence::new(values.to_vec(), DragDirection::Down).unwrap()
    }

    #[test]
    fn next_step_follows_side_of_current() {
        let steps = down(&[0.0, 30.0, 100.0]);
        let resolver = FlingResolver::new(&steps, 1, 0.5);
        assert_eq!(resolver.resolve_next_step(50.0, false).index, 2);
        assert_eq!(resolver.resolve_next_step(10.0, false).index, 0);
    }

    #[test]
    fn last_step_only_looks_back() {
        let steps = down(&[0.0, 30.0, 100.0]);
        let resolver = FlingResolver::new(&steps, 2, 0.5);
        assert_eq!(resolver.resolve_next_step(120.0, false).index, 2);
        assert_eq!(resolver.resolve_next_step(90.0, false).index, 1);
    }

    #[test]
    fn threshold_snaps_back_short_drags() {
        let steps = down(&[0.0, 100.0]);
        let resolver = FlingResolver::new(&steps, 0, 0.5);
        assert_eq!(resolver.resolve_next_step(40.0, true).index, 0);
        assert_eq!(resolver.resolve_next_step(60.0, true).index, 1);
        assert_eq!(resolver.resolve_next_step(40.0, false).index, 1);
    }

    #[test]
    fn descending_steps_resolve_by_sequence_order() {
        let steps = StepSequence::new(vec![800.0, 240.0, 0.0], DragDirection::Up).unwrap();
        let resolver = FlingResolver::new(&steps, 0, 0.2);
        assert_eq!(resolver.resolve_next_step(650.0, true).index, 1);
        assert_eq!(resolver.resolve_next_step(750.0, true).index, 0);
    }

    #[test]
    fn still_release_is_armed_toward_the_checked_step() {
        let steps = down(&[0.0, 100.0]);
        let resolver = FlingResolver::new(&steps, 0, 0.5);

        let back = resolver.plan_release(40.0, 0.0);
        assert_eq!(back.target.index, 0);
        assert_eq!(back.velocity, -40.0 * SLOW_FACTOR);
        assert_eq!((back.min_value, back.max_value), (0.0, 40.0));

        let forward = resolver.plan_release(60.0, 0.0);
        assert_eq!(forward.target.index, 1);
        assert_eq!(forward.velocity, 40.0 * SLOW_FACTOR);
        assert_eq!((forward.min_value, forward.max_value), (0.0, 100.0));
    }

    #[test]
    fn strong_flick_keeps_its_velocity() {
        let steps = down(&[0.0, 100.0]);
        let resolver = FlingResolver::new(&steps, 0, 0.5);
        let plan = resolver.plan_release(20.0, 3000.0);
        assert_eq!(plan.velocity, 3000.0);
        assert_eq!(plan.target.index, 1);
    }

    #[test]
    fn push_plan_targets_requested_step() {
        let steps = down(&[0.0, 30.0, 100.0]);
        let resolver = FlingResolver::new(&steps, 0, 0.5);
        let plan = resolver.plan_push(0.0, 2);
        assert_eq!(plan.target, StepTarget { index: 2, value: 100.0 });
        assert_eq!(plan.velocity, 100.0 * SLOW_FACTOR);
        assert_eq!(plan.fling_request().max_value, 100.0);

        let stay = resolver.plan_push(0.0, 0);
        assert_eq!(stay.velocity, 0.0);
    }
}
