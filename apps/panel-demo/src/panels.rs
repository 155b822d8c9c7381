//! The two bars of the demo screen and the listeners that move them.

use snapdrag_foundation::input::{PointerEvent, PointerInputHandler, PointerInputSurface};
use snapdrag_foundation::{DragListener, WeakDragAction};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const LIGHT_BLUE: Rgb = Rgb(0x81, 0xd4, 0xfa);
pub const DARK_BLUE: Rgb = Rgb(0x01, 0x57, 0x9b);

impl Rgb {
    pub fn lerp(self, other: Rgb, fraction: f32) -> Rgb {
        let fraction = fraction.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * fraction).round() as u8;
        Rgb(
            mix(self.0, other.0),
            mix(self.1, other.1),
            mix(self.2, other.2),
        )
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// The root view: hands pointer events to whatever handler was installed.
#[derive(Default)]
pub struct Screen {
    handler: RefCell<Option<PointerInputHandler>>,
}

impl Screen {
    pub fn send(&self, event: PointerEvent) -> bool {
        let handler = self.handler.borrow().clone();
        handler.map_or(false, |handler| handler(&event))
    }
}

impl PointerInputSurface for Screen {
    fn set_pointer_input_handler(&self, handler: PointerInputHandler) {
        *self.handler.borrow_mut() = Some(handler);
    }
}

/// Top bar: grows downward, darkening as it opens.
#[derive(Debug)]
pub struct TopBar {
    pub height: Cell<f32>,
    pub color: Cell<Rgb>,
    screen_height: f32,
}

impl TopBar {
    pub fn new(screen_height: f32) -> Self {
        Self {
            height: Cell::new(0.0),
            color: Cell::new(LIGHT_BLUE),
            screen_height,
        }
    }
}

/// Bottom bar: its top edge slides up from the bottom of the screen.
#[derive(Debug)]
pub struct BottomBar {
    pub y: Cell<f32>,
}

impl BottomBar {
    pub fn new(screen_height: f32) -> Self {
        Self {
            y: Cell::new(screen_height),
        }
    }
}

/// Moves the top bar and locks the bottom bar while the top one is open.
pub struct TopBarListener {
    pub bar: Rc<TopBar>,
    pub this: WeakDragAction,
    pub other: WeakDragAction,
}

impl DragListener for TopBarListener {
    fn on_drag(&self, position: f32, _friction: f32) {
        self.bar.height.set(position);
        self.bar
            .color
            .set(LIGHT_BLUE.lerp(DARK_BLUE, position / self.bar.screen_height));
    }

    fn on_drag_end(&self, position: f32, _friction: f32) {
        lock_other_while_extended(&self.this, &self.other);
        log::info!("top bar rests at {position}");
    }
}

/// Moves the bottom bar and locks the top bar while the bottom one is open.
pub struct BottomBarListener {
    pub bar: Rc<BottomBar>,
    pub this: WeakDragAction,
    pub other: WeakDragAction,
}

impl DragListener for BottomBarListener {
    fn on_drag(&self, position: f32, _friction: f32) {
        self.bar.y.set(position);
    }

    fn on_drag_end(&self, position: f32, _friction: f32) {
        lock_other_while_extended(&self.this, &self.other);
        log::info!("bottom bar rests at {position}");
    }
}

fn lock_other_while_extended(this: &WeakDragAction, other: &WeakDragAction) {
    if let (Some(this), Some(other)) = (this.upgrade(), other.upgrade()) {
        other.set_blocked(this.is_extended());
    }
}
