pub mod surface;
pub mod types;

pub use surface::{PointerInputHandler, PointerInputSurface};
pub use types::{PointerEvent, PointerEventKind};

pub mod prelude {
    pub use super::surface::{PointerInputHandler, PointerInputSurface};
    pub use super::types::{PointerEvent, PointerEventKind};
}
