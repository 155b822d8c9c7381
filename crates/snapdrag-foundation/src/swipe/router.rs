//! Fan-out of one surface's pointer events to its drag actions.

use super::action::DragAction;
use crate::input::{PointerEvent, PointerInputHandler, PointerInputSurface};
use std::cell::RefCell;
use std::rc::Rc;

/// Delivers pointer events to every registered, non-blocked action in
/// registration order.
///
/// The router does not arbitrate between actions: all of them see the same
/// events, and exclusivity is up to listeners toggling
/// [`DragAction::set_blocked`] on each other.
#[derive(Clone, Default)]
pub struct GestureRouter {
    actions: Rc<RefCell<Vec<DragAction>>>,
}

impl GestureRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_action(&self, action: DragAction) {
        self.actions.borrow_mut().push(action);
    }

    /// Returns whether `action` was registered.
    pub fn remove_action(&self, action: &DragAction) -> bool {
        let mut actions = self.actions.borrow_mut();
        let before = actions.len();
        actions.retain(|registered| !registered.ptr_eq(action));
        actions.len() != before
    }

    pub fn len(&self) -> usize {
        self.actions.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.borrow().is_empty()
    }

    pub fn actions(&self) -> Vec<DragAction> {
        self.actions.borrow().clone()
    }

    /// Returns `false` only when no action is registered.
    ///
    /// Blocked state is read per action right before delivery, so a
    /// listener unblocking a later action takes effect for this event.
    pub fn on_event(&self, event: &PointerEvent) -> bool {
        // Listeners may register or remove actions while we iterate.
        let actions = self.actions();
        if actions.is_empty() {
            return false;
        }
        for action in &actions {
            if action.is_blocked() {
                log::trace!("{:?} skipped for blocked action", event.kind);
                continue;
            }
            action.on_pointer_event(event);
        }
        true
    }

    /// Installs this router as the surface's pointer handler, replacing
    /// any previous one. The surface keeps only a weak reference.
    pub fn attach(&self, surface: &dyn PointerInputSurface) {
        let weak = Rc::downgrade(&self.actions);
        let handler: PointerInputHandler = Rc::new(move |event: &PointerEvent| {
            match weak.upgrade() {
                Some(actions) => GestureRouter { actions }.on_event(event),
                None => false,
            }
        });
        surface.set_pointer_input_handler(handler);
    }
}

impl std::fmt::Debug for GestureRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureRouter")
            .field("actions", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swipe::DragConfig;
    use snapdrag_animation::{FlingAnimator, FlingEndCallback, FlingRequest, FlingUpdateCallback};
    use std::cell::Cell;

    /// Animator that never ticks.
    struct IdleAnimator;

    impl FlingAnimator for IdleAnimator {
        fn start(&self, _: FlingRequest, _: FlingUpdateCallback, _: FlingEndCallback) {}

        fn cancel(&self) {}

        fn is_running(&self) -> bool {
            false
        }
    }

    fn action() -> DragAction {
        DragAction::new(DragConfig::new(vec![0.0, 100.0]), Rc::new(IdleAnimator)).unwrap()
    }

    struct HandlerSlot(RefCell<Option<PointerInputHandler>>);

    impl PointerInputSurface for HandlerSlot {
        fn set_pointer_input_handler(&self, handler: PointerInputHandler) {
            *self.0.borrow_mut() = Some(handler);
        }
    }

    #[test]
    fn empty_router_does_not_handle_events() {
        let router = GestureRouter::new();
        assert!(!router.on_event(&PointerEvent::down(0.0, 0.0, 0)));
    }

    #[test]
    fn blocked_actions_see_nothing() {
        let router = GestureRouter::new();
        let open = action();
        let blocked = action();
        blocked.set_blocked(true);
        router.add_action(open.clone());
        router.add_action(blocked.clone());

        assert!(router.on_event(&PointerEvent::down(0.0, 0.0, 0)));
        router.on_event(&PointerEvent::moved(0.0, 30.0, 10));

        assert_eq!(open.position(), 30.0);
        assert!(open.is_dragging());
        assert_eq!(blocked.position(), 0.0);
        assert!(!blocked.is_dragging());
    }

    #[test]
    fn all_blocked_still_counts_as_handled() {
        let router = GestureRouter::new();
        let blocked = action();
        blocked.set_blocked(true);
        router.add_action(blocked);
        assert!(router.on_event(&PointerEvent::down(0.0, 0.0, 0)));
    }

    #[test]
    fn remove_matches_by_identity() {
        let router = GestureRouter::new();
        let first = action();
        let second = action();
        router.add_action(first.clone());
        router.add_action(second.clone());

        assert!(router.remove_action(&first));
        assert!(!router.remove_action(&first));
        assert_eq!(router.len(), 1);
        assert!(router.actions()[0].ptr_eq(&second));
    }

    #[test]
    fn attached_handler_does_not_keep_router_alive() {
        let surface = HandlerSlot(RefCell::new(None));
        let delivered = Rc::new(Cell::new(false));
        {
            let router = GestureRouter::new();
            router.add_action(action());
            router.attach(&surface);
            let handler = surface.0.borrow().clone().unwrap();
            delivered.set(handler(&PointerEvent::down(0.0, 0.0, 0)));
        }
        assert!(delivered.get());
        let handler = surface.0.borrow().clone().unwrap();
        assert!(!handler(&PointerEvent::down(0.0, 0.0, 0)));
    }
}
