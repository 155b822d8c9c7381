//! Testing utilities and harness for snapdrag

pub mod assertions;
pub mod gesture;
pub mod recording;
pub mod rule;
pub mod surface;

pub use assertions::assert_approx_eq;
pub use gesture::GestureScript;
pub use recording::{DragRecord, RecordingAnimator, RecordingListener};
pub use rule::{DragTestRule, RecordedAction, FRAME_NANOS};
pub use surface::TestSurface;

pub mod prelude {
    pub use crate::assertions::{assert_approx_eq, assert_monotonic};
    pub use crate::gesture::GestureScript;
    pub use crate::recording::{DragRecord, RecordingAnimator, RecordingListener};
    pub use crate::rule::{DragTestRule, RecordedAction};
    pub use crate::surface::TestSurface;
}
