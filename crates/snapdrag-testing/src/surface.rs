use snapdrag_foundation::input::{PointerEvent, PointerInputHandler, PointerInputSurface};
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory stand-in for a host view.
///
/// Holds whatever handler was installed last and lets tests push events
/// through it.
#[derive(Clone, Default)]
pub struct TestSurface {
    handler: Rc<RefCell<Option<PointerInputHandler>>>,
}

impl TestSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_handler(&self) -> bool {
        self.handler.borrow().is_some()
    }

    /// Returns `false` when no handler is installed or the handler declined
    /// the event.
    pub fn dispatch(&self, event: PointerEvent) -> bool {
        // Clone out so the handler may replace itself.
        let handler = self.handler.borrow().clone();
        match handler {
            Some(handler) => handler(&event),
            None => false,
        }
    }
}

impl PointerInputSurface for TestSurface {
    fn set_pointer_input_handler(&self, handler: PointerInputHandler) {
        *self.handler.borrow_mut() = Some(handler);
    }
}
