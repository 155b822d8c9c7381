//! Scripted pointer gestures.

use snapdrag_foundation::input::PointerEvent;
use snapdrag_foundation::velocity_tracker::ASSUME_STOPPED_MS;
use snapdrag_foundation::Point;

/// Milliseconds between generated move samples.
const SAMPLE_INTERVAL_MS: u64 = 8;

/// Builds a press-move-release sequence with timestamps.
///
/// ```
/// use snapdrag_testing::GestureScript;
///
/// let events = GestureScript::press(0.0, 0.0)
///     .glide_to(0.0, 60.0, 120)
///     .rest()
///     .release()
///     .into_events();
/// assert_eq!(events.len(), 17);
/// ```
#[derive(Debug, Clone)]
pub struct GestureScript {
    events: Vec<PointerEvent>,
    cursor: Point,
    time_ms: u64,
}

impl GestureScript {
    pub fn press(x: f32, y: f32) -> Self {
        Self::press_at(x, y, 0)
    }

    pub fn press_at(x: f32, y: f32, time_ms: u64) -> Self {
        Self {
            events: vec![PointerEvent::down(x, y, time_ms)],
            cursor: Point::new(x, y),
            time_ms,
        }
    }

    /// A single move `after_ms` after the previous event.
    pub fn move_to(mut self, x: f32, y: f32, after_ms: u64) -> Self {
        self.time_ms += after_ms;
        self.cursor = Point::new(x, y);
        self.events
            .push(PointerEvent::moved(x, y, self.time_ms));
        self
    }

    /// Evenly spaced moves reaching `(x, y)` after `duration_ms`.
    pub fn glide_to(mut self, x: f32, y: f32, duration_ms: u64) -> Self {
        let samples = (duration_ms / SAMPLE_INTERVAL_MS).max(1);
        let from = self.cursor;
        let start = self.time_ms;
        for sample in 1..=samples {
            let fraction = sample as f32 / samples as f32;
            let at = start + duration_ms * sample / samples;
            let point = Point::new(from.x + (x - from.x) * fraction, from.y + (y - from.y) * fraction);
            self.events.push(PointerEvent::moved(point.x, point.y, at));
        }
        self.cursor = Point::new(x, y);
        self.time_ms = start + duration_ms;
        self
    }

    /// Holds still long enough for the release to carry no velocity.
    pub fn rest(mut self) -> Self {
        self.time_ms += ASSUME_STOPPED_MS as u64 + 10;
        self
    }

    pub fn wait(mut self, ms: u64) -> Self {
        self.time_ms += ms;
        self
    }

    /// Lifts the pointer where it is.
    pub fn release(mut self) -> Self {
        self.time_ms += 1;
        self.events
            .push(PointerEvent::up(self.cursor.x, self.cursor.y, self.time_ms));
        self
    }

    /// Ends the gesture with a platform cancel.
    pub fn cancel(mut self) -> Self {
        self.time_ms += 1;
        self.events
            .push(PointerEvent::cancel(self.cursor.x, self.cursor.y, self.time_ms));
        self
    }

    pub fn events(&self) -> &[PointerEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<PointerEvent> {
        self.events
    }
}
