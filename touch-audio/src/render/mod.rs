//! Audio-rate rendering.
//!
//! Renderers fill an interleaved `f32` output buffer once per audio callback.
//! Everything reachable from [`AudioRender::render`] is allocation-free,
//! lock-free and performs no I/O.
//!
//! ## Components
//!
//! | Renderer | Source | Output |
//! |----------|--------|--------|
//! | [`TouchSynth`] | latest [`SensorReading`](crate::sensor::SensorReading) | oscillator, panned L/R |
//! | [`SamplePlayer`] | borrowed mono sample buffer | same sample on every channel |
//!
//! ## Buffer layout
//!
//! `output[frame * channels + channel]`. Channel 0 is left, channel 1 is
//! right; further channels are written as silence by the stereo renderer.

pub mod interleave;
mod sample_player;
mod touch_synth;

pub use sample_player::SamplePlayer;
pub use touch_synth::{StereoFrame, SynthConfig, TouchSynth};

#[cfg(all(test, feature = "sampler"))]
mod integration_tests;

/// Core trait for everything the host audio callback drives.
pub trait AudioRender {
    /// Render `output.len() / channels` interleaved frames.
    ///
    /// Must complete in bounded time: no allocation, no blocking, no I/O.
    /// A `channels` of 0 renders nothing; a trailing partial frame is left
    /// untouched.
    fn render(&mut self, output: &mut [f32], channels: usize);
}
