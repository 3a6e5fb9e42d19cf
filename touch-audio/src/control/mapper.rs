use super::range::ControlRange;
use crate::error::Error;

/// Linear interpolation of `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Values outside the input range extrapolate. Fails with
/// [`Error::DegenerateRange`] when `in_min == in_max`.
pub fn map(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> Result<f32, Error> {
    if in_min == in_max {
        return Err(Error::DegenerateRange);
    }
    Ok(out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min))
}

/// Bound `value` to `[lo, hi]`.
///
/// Fails with [`Error::InvalidRange`] when `lo > hi` or either bound is NaN.
/// A NaN `value` is replaced by `lo`.
pub fn clamp(value: f32, lo: f32, hi: f32) -> Result<f32, Error> {
    if !(lo <= hi) {
        return Err(Error::InvalidRange);
    }
    Ok(constrain(value, lo, hi))
}

/// Unchecked clamp for pre-validated bounds. NaN maps to `lo`.
#[inline(always)]
pub(crate) fn constrain(value: f32, lo: f32, hi: f32) -> f32 {
    if value > hi {
        hi
    } else if value >= lo {
        value
    } else {
        lo
    }
}

/// Affine remap with clamping, validated once at setup.
///
/// [`apply()`](Self::apply) is infallible and always returns a value inside
/// the output range, including for NaN or infinite inputs.
///
/// # Example
/// ```
/// use touch_audio::control::{ControlMapper, ControlRange};
///
/// let to_freq = ControlMapper::new(
///     ControlRange::UNIT,
///     ControlRange::new(200.0, 1500.0).unwrap(),
/// ).unwrap();
/// assert_eq!(to_freq.apply(0.5), 850.0);
/// assert_eq!(to_freq.apply(7.0), 1500.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlMapper {
    input: ControlRange,
    output: ControlRange,
    lo: f32,
    hi: f32,
}

impl ControlMapper {
    /// Create a mapper. Fails with [`Error::DegenerateRange`] if `input` has zero width.
    pub fn new(input: ControlRange, output: ControlRange) -> Result<Self, Error> {
        if input.is_degenerate() {
            return Err(Error::DegenerateRange);
        }
        Ok(ControlMapper {
            input,
            output,
            lo: output.lo(),
            hi: output.hi(),
        })
    }

    pub fn input(&self) -> ControlRange {
        self.input
    }

    pub fn output(&self) -> ControlRange {
        self.output
    }

    /// Remap without clamping (may extrapolate or yield NaN).
    #[inline]
    pub fn map_unclamped(&self, value: f32) -> f32 {
        self.output.min() + (value - self.input.min()) * self.output.span() / self.input.span()
    }

    /// Remap and clamp to the output range.
    #[inline]
    pub fn apply(&self, value: f32) -> f32 {
        constrain(self.map_unclamped(value), self.lo, self.hi)
    }
}
