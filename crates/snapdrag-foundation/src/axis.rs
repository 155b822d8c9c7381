/// The single axis a drag action moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left/right movement, measured on `x`.
    Horizontal,

    /// Up/down movement, measured on `y`.
    Vertical,
}
