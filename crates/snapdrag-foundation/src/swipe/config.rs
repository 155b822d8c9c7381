use super::error::InvalidConfiguration;
use super::steps::{DragDirection, StepSequence};
use crate::gesture_constants::DEFAULT_DRAG_THRESHOLD;

/// Construction parameters of a [`DragAction`](super::DragAction).
#[derive(Debug, Clone, PartialEq)]
pub struct DragConfig {
    pub direction: DragDirection,
    pub steps: Vec<f32>,
    pub drag_threshold: f32,
}

impl DragConfig {
    /// Steps opening downward with the default threshold.
    pub fn new(steps: impl Into<Vec<f32>>) -> Self {
        Self {
            direction: DragDirection::default(),
            steps: steps.into(),
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
        }
    }

    pub fn with_direction(mut self, direction: DragDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_drag_threshold(mut self, drag_threshold: f32) -> Self {
        self.drag_threshold = drag_threshold;
        self
    }

    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        StepSequence::validate(&self.steps, self.direction)?;
        validate_threshold(self.drag_threshold)
    }
}

pub(crate) fn validate_threshold(drag_threshold: f32) -> Result<(), InvalidConfiguration> {
    if (0.0..=1.0).contains(&drag_threshold) {
        Ok(())
    } else {
        Err(InvalidConfiguration::ThresholdOutOfRange {
            threshold: drag_threshold,
        })
    }
}
