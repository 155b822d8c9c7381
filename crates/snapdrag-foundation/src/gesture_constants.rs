//! Shared constants for snap-to-step drags.
//!
//! Values are in the same units as the step positions (logical pixels for
//! on-screen panels) and seconds.

/// Damping between a release velocity (units/s) and position space.
///
/// A release at velocity `v` is projected to `position + v / SLOW_FACTOR`
/// when picking the target step, and a settle toward a step `d` units away
/// is armed with `d * SLOW_FACTOR`.
pub const SLOW_FACTOR: f32 = 4.5;

/// Fraction of the distance to the next step a drag has to cover before a
/// release commits to that step instead of snapping back.
pub const DEFAULT_DRAG_THRESHOLD: f32 = 0.5;

/// Value reported as the friction of `on_drag_end`.
pub const SETTLED_FRICTION: f32 = 1.0;
