//! Snap-to-step drag actions for snapdrag.
//!
//! Pointer input types, velocity tracking and the [`swipe`] engine that
//! turns pointer movement into animated transitions between steps.

pub mod axis;
pub mod geometry;
pub mod gesture_constants;
pub mod input;
pub mod swipe;
pub mod velocity_tracker;

pub use axis::Axis;
pub use geometry::Point;
pub use swipe::{
    DragAction, DragCallbacks, DragConfig, DragDirection, DragListener, DragPhase,
    GestureRouter, InvalidConfiguration, StepSequence, WeakDragAction,
};
pub use velocity_tracker::VelocityTracker1D;

pub mod prelude {
    pub use crate::axis::Axis;
    pub use crate::geometry::Point;
    pub use crate::input::prelude::*;
    pub use crate::swipe::{
        DragAction, DragCallbacks, DragConfig, DragDirection, DragListener, DragPhase,
        GestureRouter, InvalidConfiguration,
    };
    pub use snapdrag_animation::{FlingAnimation, FlingAnimator};
}
