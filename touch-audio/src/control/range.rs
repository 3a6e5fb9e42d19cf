use crate::error::Error;

/// Immutable `{ min, max }` pair describing the domain or codomain of a mapping.
///
/// `min` may be greater than `max`; the range is then inverted and a mapping
/// onto it runs backwards. Both bounds must be finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlRange {
    min: f32,
    max: f32,
}

impl ControlRange {
    /// The normalised range `[0, 1]`.
    pub const UNIT: ControlRange = ControlRange { min: 0.0, max: 1.0 };

    /// Create a range, rejecting non-finite bounds with [`Error::InvalidRange`].
    pub fn new(min: f32, max: f32) -> Result<Self, Error> {
        if !min.is_finite() || !max.is_finite() {
            return Err(Error::InvalidRange);
        }
        Ok(ControlRange { min, max })
    }

    /// Build from a `(min, max)` tuple, as stored in [`constants`](crate::constants).
    pub fn from_pair((min, max): (f32, f32)) -> Result<Self, Error> {
        Self::new(min, max)
    }

    pub const fn min(&self) -> f32 {
        self.min
    }

    pub const fn max(&self) -> f32 {
        self.max
    }

    /// Smaller of the two bounds.
    pub fn lo(&self) -> f32 {
        if self.min <= self.max { self.min } else { self.max }
    }

    /// Larger of the two bounds.
    pub fn hi(&self) -> f32 {
        if self.min <= self.max { self.max } else { self.min }
    }

    /// Signed width `max - min`.
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// `true` when both bounds coincide; such a range cannot be mapped *from*.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Whether `value` lies inside `[lo, hi]`. NaN is never contained.
    pub fn contains(&self, value: f32) -> bool {
        value >= self.lo() && value <= self.hi()
    }
}
