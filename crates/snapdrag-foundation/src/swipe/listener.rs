use std::rc::Rc;

/// Receives the progress of a drag action.
///
/// `friction` is the normalized distance from the first step (0.0) toward
/// the last (1.0), handy for cosmetic effects like color interpolation.
/// Callbacks run with no internal state borrowed, so implementations may
/// query or reconfigure any action, including the one reporting.
pub trait DragListener {
    fn on_drag_start(&self, _position: f32) {}

    fn on_drag(&self, _position: f32, _friction: f32) {}

    fn on_drag_end(&self, _position: f32, _friction: f32) {}
}

impl<L: DragListener + ?Sized> DragListener for Rc<L> {
    fn on_drag_start(&self, position: f32) {
        (**self).on_drag_start(position)
    }

    fn on_drag(&self, position: f32, friction: f32) {
        (**self).on_drag(position, friction)
    }

    fn on_drag_end(&self, position: f32, friction: f32) {
        (**self).on_drag_end(position, friction)
    }
}

/// A [`DragListener`] assembled from closures. Unset callbacks do nothing.
#[derive(Default)]
pub struct DragCallbacks {
    drag_start: Option<Box<dyn Fn(f32)>>,
    drag: Option<Box<dyn Fn(f32, f32)>>,
    drag_end: Option<Box<dyn Fn(f32, f32)>>,
}

impl DragCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drag_start(mut self, callback: impl Fn(f32) + 'static) -> Self {
        self.drag_start = Some(Box::new(callback));
        self
    }

    pub fn with_drag(mut self, callback: impl Fn(f32, f32) + 'static) -> Self {
        self.drag = Some(Box::new(callback));
        self
    }

    pub fn with_drag_end(mut self, callback: impl Fn(f32, f32) + 'static) -> Self {
        self.drag_end = Some(Box::new(callback));
        self
    }
}

impl DragListener for DragCallbacks {
    fn on_drag_start(&self, position: f32) {
        if let Some(callback) = &self.drag_start {
            callback(position);
        }
    }

    fn on_drag(&self, position: f32, friction: f32) {
        if let Some(callback) = &self.drag {
            callback(position, friction);
        }
    }

    fn on_drag_end(&self, position: f32, friction: f32) {
        if let Some(callback) = &self.drag_end {
            callback(position, friction);
        }
    }
}

impl std::fmt::Debug for DragCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragCallbacks")
            .field("drag_start", &self.drag_start.is_some())
            .field("drag", &self.drag.is_some())
            .field("drag_end", &self.drag_end.is_some())
            .finish()
    }
}
