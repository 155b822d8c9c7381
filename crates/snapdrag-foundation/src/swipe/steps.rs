//! Snap positions along one axis.

use super::error::InvalidConfiguration;
use crate::axis::Axis;

/// Which way a panel opens.
///
/// Down and Right require ascending step values, Up and Left descending
/// ones; `[0, -300, -600]` is a valid sequence for Left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragDirection {
    Right,
    Up,
    Left,
    #[default]
    Down,
}

impl DragDirection {
    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            DragDirection::Up | DragDirection::Down => Axis::Vertical,
            DragDirection::Left | DragDirection::Right => Axis::Horizontal,
        }
    }

    /// Whether step values must ascend for this direction.
    #[inline]
    pub fn is_ascending(self) -> bool {
        matches!(self, DragDirection::Down | DragDirection::Right)
    }
}

/// Inclusive range of positions a drag may reach from the committed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepWindow {
    /// Bound on the side of the earlier step in sequence order.
    pub start: f32,
    /// Bound on the side of the later step in sequence order.
    pub end: f32,
}

impl StepWindow {
    pub fn lower(&self) -> f32 {
        self.start.min(self.end)
    }

    pub fn upper(&self) -> f32 {
        self.start.max(self.end)
    }

    pub fn contains(&self, position: f32) -> bool {
        self.lower() <= position && position <= self.upper()
    }
}

/// Validated, ordered step values plus the direction that orders them.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSequence {
    values: Vec<f32>,
    direction: DragDirection,
}

impl StepSequence {
    pub fn new(
        values: impl Into<Vec<f32>>,
        direction: DragDirection,
    ) -> Result<Self, InvalidConfiguration> {
        let values = values.into();
        Self::validate(&values, direction)?;
        Ok(Self { values, direction })
    }

    /// Checks that `values` can serve as steps for `direction`.
    pub fn validate(values: &[f32], direction: DragDirection) -> Result<(), InvalidConfiguration> {
        if values.len() < 2 {
            return Err(InvalidConfiguration::TooFewSteps {
                count: values.len(),
            });
        }
        if let Some(index) = values.iter().position(|value| !value.is_finite()) {
            return Err(InvalidConfiguration::NonFiniteStep { index });
        }
        let first = values[0];
        if first == values[values.len() - 1] {
            return Err(InvalidConfiguration::SameFirstAndLast { value: first });
        }
        let ascending = direction.is_ascending();
        let out_of_order = values.windows(2).position(|pair| {
            if ascending {
                pair[0] > pair[1]
            } else {
                pair[0] < pair[1]
            }
        });
        match out_of_order {
            Some(index) => Err(InvalidConfiguration::OrderMismatch {
                direction,
                index: index + 1,
            }),
            None => Ok(()),
        }
    }

    /// Validates before mutating; on error the sequence is unchanged.
    pub fn set_direction(&mut self, direction: DragDirection) -> Result<(), InvalidConfiguration> {
        Self::validate(&self.values, direction)?;
        self.direction = direction;
        Ok(())
    }

    /// Validates before mutating; on error the sequence is unchanged.
    pub fn set_values(&mut self, values: impl Into<Vec<f32>>) -> Result<(), InvalidConfiguration> {
        let values = values.into();
        Self::validate(&values, self.direction)?;
        self.values = values;
        Ok(())
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn direction(&self) -> DragDirection {
        self.direction
    }

    pub fn axis(&self) -> Axis {
        self.direction.axis()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: a valid sequence has at least two steps.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.values.len() - 1
    }

    pub fn first(&self) -> f32 {
        self.values[0]
    }

    pub fn last(&self) -> f32 {
        self.values[self.last_index()]
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    /// Value of step `index`, clamped to the last step.
    pub fn value(&self, index: usize) -> f32 {
        self.values[index.min(self.last_index())]
    }

    /// Positions a drag may reach while `index` is the committed step: the
    /// span between its two neighbours, or between the two outermost steps
    /// at either end. A gesture never skips past an adjacent step.
    pub fn neighbor_bounds(&self, index: usize) -> StepWindow {
        let last = self.last_index();
        let index = index.min(last);
        let (start, end) = if index == 0 {
            (0, 1)
        } else if index == last {
            (last - 1, last)
        } else {
            (index - 1, index + 1)
        };
        StepWindow {
            start: self.values[start],
            end: self.values[end],
        }
    }

    /// Normalized distance of `position` from the first step, where the last
    /// step is 1.0. Reported to listeners as the drag friction.
    pub fn progress(&self, position: f32) -> f32 {
        ((position - self.first()) / (self.last() - self.first())).abs()
    }

    /// Whether `a` comes before `b` in sequence order.
    pub fn precedes(&self, a: f32, b: f32) -> bool {
        if self.direction.is_ascending() {
            a < b
        } else {
            a > b
        }
    }
}
