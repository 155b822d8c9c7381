//! Frame runtime for snapdrag.
//!
//! Everything in snapdrag runs on one UI thread. The host owns a [`Runtime`],
//! drains its frame callbacks once per display frame, and hands out
//! [`FrameClock`]s to the animations that need ticks.

mod frame_clock;
mod platform;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{NoopScheduler, RuntimeScheduler};
pub use runtime::{FrameCallbackId, Runtime, RuntimeHandle};

pub mod prelude {
    pub use crate::frame_clock::FrameClock;
    pub use crate::runtime::{Runtime, RuntimeHandle};
}
