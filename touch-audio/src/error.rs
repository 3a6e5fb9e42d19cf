//! Setup-time error type.
//!
//! Every fallible operation in this crate runs while the pipeline is being
//! configured. Once a [`TouchSynth`](crate::render::TouchSynth) or
//! [`TouchSampler`](crate::sensor::TouchSampler) exists, the per-sample and
//! per-cycle paths no longer return errors.

use core::fmt;

/// Errors raised while configuring the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A filter or generator parameter is out of its legal domain
    /// (non-positive rate, cutoff at or above Nyquist, non-finite value).
    InvalidParameter,
    /// A mapping input range has `min == max`, so no slope exists.
    DegenerateRange,
    /// A clamp range has `lo > hi` or a non-finite bound.
    InvalidRange,
    /// The attached sensor is not the two-dimensional (square) device.
    UnsupportedDevice,
    /// The sensor collaborator reported a failure during setup.
    Sensor,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::InvalidParameter => "invalid parameter",
            Error::DegenerateRange => "degenerate range: input min equals max",
            Error::InvalidRange => "invalid range: lower bound above upper bound",
            Error::UnsupportedDevice => "unsupported sensor: a square (2D) device is required",
            Error::Sensor => "unable to initialise touch sensor",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for Error {}
