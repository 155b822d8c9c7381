//! Fling animations for snapdrag.
//!
//! [`FlingAnimator`] is the service the drag engine consumes: start a decay
//! from a value and velocity, keep it inside `[min, max]`, report every tick
//! and the final value. [`FlingAnimation`] is the frame-clock driven
//! implementation, integrating an [`ExponentialDecaySpec`] by default.

mod decay_spec;
mod fling;

pub use decay_spec::{ExponentialDecaySpec, FloatDecayAnimationSpec};
pub use fling::{FlingAnimation, FlingAnimator, FlingEndCallback, FlingRequest, FlingUpdateCallback};

pub mod prelude {
    pub use crate::decay_spec::{ExponentialDecaySpec, FloatDecayAnimationSpec};
    pub use crate::fling::{FlingAnimation, FlingAnimator, FlingRequest};
}
