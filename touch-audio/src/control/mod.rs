//! Control-rate value mapping.
//!
//! Translates sensor-domain values into synthesis-domain ranges (frequency,
//! amplitude, pan). Everything destined for an audio-rate smoother passes
//! through [`ControlMapper::apply`], which always clamps to the output range,
//! so one bad upstream reading cannot lodge itself in a filter's state.
//!
//! ## Components
//!
//! | Item | Description |
//! |------|-------------|
//! | [`ControlRange`] | Validated `{ min, max }` pair, possibly inverted |
//! | [`ControlMapper`] | Pre-validated affine remap with clamping |
//! | [`map`] / [`clamp`] | Free-standing checked primitives |

mod mapper;
mod range;

pub use mapper::{clamp, map, ControlMapper};
pub use range::ControlRange;

pub(crate) use mapper::constrain;
