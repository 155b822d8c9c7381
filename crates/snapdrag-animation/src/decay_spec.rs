//! Decay animation specifications for fling animations.
//!
//! A decay has no fixed target: it starts with a velocity and slows down
//! until the velocity drops under a visibility threshold.

/// Base friction of a drag force, in 1/s. With a multiplier of `1.0` a fling
/// at velocity `v` travels `v / 4.2` units before coming to rest.
const BASE_FRICTION: f32 = 4.2;

/// Converts a minimum visible change (units per frame at 16ms) into a
/// velocity threshold (units per second).
const VELOCITY_THRESHOLD_MULTIPLIER: f32 = 1000.0 / 16.0;

/// Friction multipliers below this are raised to it.
const MIN_FRICTION_MULTIPLIER: f32 = 0.01;

/// Trait for decay animation specifications.
pub trait FloatDecayAnimationSpec {
    /// Velocity threshold below which animation is considered finished.
    fn abs_velocity_threshold(&self) -> f32;

    /// Get position at a given time.
    fn get_value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32;

    /// Get velocity at a given time.
    fn get_velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32;

    /// Get total animation duration in nanoseconds.
    fn get_duration_nanos(&self, initial_value: f32, initial_velocity: f32) -> i64;

    /// Get the target value (final position) of the animation.
    fn get_target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        let duration = self.get_duration_nanos(initial_value, initial_velocity);
        self.get_value_from_nanos(duration, initial_value, initial_velocity)
    }
}

/// Velocity decaying as `v(t) = v0 * e^(-k t)`, the drag force used by
/// platform fling animations.
///
/// Position follows `x(t) = x0 + v0 / k * (1 - e^(-k t))`, so velocity falls
/// linearly with distance travelled: `v = v0 - k * (x - x0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialDecaySpec {
    friction_multiplier: f32,
    min_visible_change: f32,
}

impl ExponentialDecaySpec {
    /// `friction_multiplier` scales the base friction; `min_visible_change`
    /// is the smallest per-frame movement worth animating (1.0 for pixels).
    pub fn new(friction_multiplier: f32, min_visible_change: f32) -> Self {
        Self {
            friction_multiplier: friction_multiplier.max(MIN_FRICTION_MULTIPLIER),
            min_visible_change: min_visible_change.abs(),
        }
    }

    pub fn with_friction(mut self, friction_multiplier: f32) -> Self {
        self.friction_multiplier = friction_multiplier.max(MIN_FRICTION_MULTIPLIER);
        self
    }

    pub fn friction_multiplier(&self) -> f32 {
        self.friction_multiplier
    }

    /// Decay rate `k` in 1/s.
    pub fn decay_rate(&self) -> f32 {
        BASE_FRICTION * self.friction_multiplier
    }
}

impl Default for ExponentialDecaySpec {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

fn nanos_to_secs(nanos: i64) -> f64 {
    nanos.max(0) as f64 / 1_000_000_000.0
}

impl FloatDecayAnimationSpec for ExponentialDecaySpec {
    fn abs_velocity_threshold(&self) -> f32 {
        self.min_visible_change * VELOCITY_THRESHOLD_MULTIPLIER
    }

    fn get_value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let k = self.decay_rate() as f64;
        let t = nanos_to_secs(play_time_nanos);
        let travelled = initial_velocity as f64 / k * (1.0 - (-k * t).exp());
        initial_value + travelled as f32
    }

    fn get_velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        _initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let k = self.decay_rate() as f64;
        let t = nanos_to_secs(play_time_nanos);
        (initial_velocity as f64 * (-k * t).exp()) as f32
    }

    fn get_duration_nanos(&self, _initial_value: f32, initial_velocity: f32) -> i64 {
        let threshold = self.abs_velocity_threshold();
        let speed = initial_velocity.abs();
        if speed <= threshold {
            return 0;
        }
        let threshold = threshold.max(f32::MIN_POSITIVE) as f64;
        let secs = (speed as f64 / threshold).ln() / self.decay_rate() as f64;
        (secs * 1_000_000_000.0) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_starts_at_initial_value() {
        let spec = ExponentialDecaySpec::default();
        assert_eq!(spec.get_value_from_nanos(0, 40.0, -180.0), 40.0);
        assert_eq!(spec.get_velocity_from_nanos(0, 40.0, -180.0), -180.0);
    }

    #[test]
    fn velocity_falls_linearly_with_distance() {
        let spec = ExponentialDecaySpec::default();
        let t = 120_000_000;
        let x = spec.get_value_from_nanos(t, 0.0, 900.0);
        let v = spec.get_velocity_from_nanos(t, 0.0, 900.0);
        assert!((v - (900.0 - spec.decay_rate() * x)).abs() < 0.5);
    }

    #[test]
    fn slow_velocity_has_no_duration() {
        let spec = ExponentialDecaySpec::default();
        assert_eq!(spec.get_duration_nanos(0.0, 0.0), 0);
        assert_eq!(spec.get_duration_nanos(0.0, 50.0), 0);
        assert!(spec.get_duration_nanos(0.0, 500.0) > 0);
    }

    #[test]
    fn target_moves_with_velocity_sign() {
        let spec = ExponentialDecaySpec::default();
        let forward = spec.get_target_value(100.0, 1000.0);
        let backward = spec.get_target_value(100.0, -1000.0);
        assert!(forward > 100.0);
        assert!(backward < 100.0);
        assert!((forward - 100.0 - (100.0 - backward)).abs() < 0.01);
        // never further than the unbounded decay distance
        assert!(forward - 100.0 < 1000.0 / spec.decay_rate());
    }

    #[test]
    fn higher_friction_stops_sooner() {
        let loose = ExponentialDecaySpec::default();
        let tight = loose.with_friction(3.0);
        assert!(tight.get_duration_nanos(0.0, 2000.0) < loose.get_duration_nanos(0.0, 2000.0));
        assert!(tight.get_target_value(0.0, 2000.0) < loose.get_target_value(0.0, 2000.0));
    }

    #[test]
    fn position_is_monotonic() {
        let spec = ExponentialDecaySpec::default();
        let mut prev = 0.0;
        for frame in 0..60 {
            let value = spec.get_value_from_nanos(frame * 16_666_667, 0.0, 1500.0);
            assert!(value >= prev, "decay should never reverse");
            prev = value;
        }
    }
}
