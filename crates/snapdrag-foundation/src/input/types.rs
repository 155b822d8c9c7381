use crate::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// One raw pointer sample as delivered by the host surface.
///
/// `position` is in surface coordinates; only differences between samples of
/// the same gesture are used, so any fixed origin works. `uptime_millis` is a
/// monotonic timestamp used for velocity tracking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Point,
    pub uptime_millis: u64,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, uptime_millis: u64) -> Self {
        Self {
            kind,
            position,
            uptime_millis,
        }
    }

    pub fn down(x: f32, y: f32, uptime_millis: u64) -> Self {
        Self::new(PointerEventKind::Down, Point::new(x, y), uptime_millis)
    }

    pub fn moved(x: f32, y: f32, uptime_millis: u64) -> Self {
        Self::new(PointerEventKind::Move, Point::new(x, y), uptime_millis)
    }

    pub fn up(x: f32, y: f32, uptime_millis: u64) -> Self {
        Self::new(PointerEventKind::Up, Point::new(x, y), uptime_millis)
    }

    pub fn cancel(x: f32, y: f32, uptime_millis: u64) -> Self {
        Self::new(PointerEventKind::Cancel, Point::new(x, y), uptime_millis)
    }
}
