//! The host view a gesture router attaches to.

use super::types::PointerEvent;
use std::rc::Rc;

/// Consumes a pointer event and reports whether it was handled.
pub type PointerInputHandler = Rc<dyn Fn(&PointerEvent) -> bool>;

/// A view that delivers raw pointer events to a single handler.
///
/// Installing a handler replaces the previous one.
pub trait PointerInputSurface {
    fn set_pointer_input_handler(&self, handler: PointerInputHandler);
}
