use super::steps::DragDirection;

/// Rejected drag configuration. Raised when steps, direction or threshold
/// are set, never during a gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidConfiguration {
    TooFewSteps { count: usize },
    SameFirstAndLast { value: f32 },
    /// `values[index]` breaks the ordering `direction` requires.
    OrderMismatch { direction: DragDirection, index: usize },
    NonFiniteStep { index: usize },
    ThresholdOutOfRange { threshold: f32 },
}

impl std::fmt::Display for InvalidConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidConfiguration::TooFewSteps { count } => {
                write!(f, "at least two steps are required, got {count}")
            }
            InvalidConfiguration::SameFirstAndLast { value } => {
                write!(f, "first and last step are both {value}")
            }
            InvalidConfiguration::OrderMismatch { direction, index } => {
                let order = if direction.is_ascending() {
                    "ascending"
                } else {
                    "descending"
                };
                write!(
                    f,
                    "steps must be {order} for direction {direction:?}; step {index} is out of order"
                )
            }
            InvalidConfiguration::NonFiniteStep { index } => {
                write!(f, "step {index} is not a finite number")
            }
            InvalidConfiguration::ThresholdOutOfRange { threshold } => {
                write!(f, "drag threshold {threshold} is outside [0, 1]")
            }
        }
    }
}

impl std::error::Error for InvalidConfiguration {}
