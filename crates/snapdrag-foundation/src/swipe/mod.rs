//! Snap-to-step dragging.
//!
//! A [`DragAction`] moves a value along one axis between a fixed set of
//! steps, following the pointer while pressed and settling on a step with a
//! fling when released. A [`GestureRouter`] feeds one surface's events to
//! several actions.

mod action;
mod config;
mod error;
mod listener;
mod resolver;
mod router;
mod session;
mod steps;

pub use action::{DragAction, WeakDragAction};
pub use config::DragConfig;
pub use error::InvalidConfiguration;
pub use listener::{DragCallbacks, DragListener};
pub use resolver::{FlingResolver, SettlePlan};
pub use router::GestureRouter;
pub use session::{DragPhase, DragSession, StepTarget};
pub use steps::{DragDirection, StepSequence, StepWindow};
