//! # touch-audio
//!
//! A `no_std`, zero-allocation pipeline that turns a slowly polled touch
//! sensor into smooth, real-time-safe synthesis parameters: acquire a
//! reading on a low-priority task, remap it into a control range, low-pass
//! it to remove steps, and drive a signal generator inside the fixed-rate
//! audio callback.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Mapping | [`control`] | Validated ranges, affine remap with clamping |
//! | DSP | [`dsp`] | One-pole smoother, phase-accumulator oscillator |
//! | Acquisition | [`sensor`] | Sensor trait, polling task, lock-free reading cell |
//! | Rendering | [`render`] | `AudioRender` trait, touch voice, sample player |
//!
//! ```text
//!   TouchSampler ──publish──► ReadingCell ──load──► TouchSynth
//!   (low priority, 5 ms)                            (audio callback)
//!                                                    ControlMapper → OnePole → Oscillator
//! ```
//!
//! ## Quick start
//!
//! ```ignore
//! use touch_audio::render::{AudioRender, SynthConfig, TouchSynth};
//! use touch_audio::sensor::{ReadingCell, SamplerConfig, StopFlag, TouchSampler};
//!
//! static READING: ReadingCell = ReadingCell::new();
//! static SHOULD_STOP: StopFlag = StopFlag::new();
//!
//! // Setup: both constructors validate and fail before audio starts.
//! let mut sampler = TouchSampler::new(sensor, delay, &SamplerConfig::default())?;
//! let mut synth = TouchSynth::new(&READING, &SynthConfig::default())?;
//!
//! // Low-priority task:
//! sampler.run(&READING, &SHOULD_STOP);
//!
//! // Audio callback:
//! synth.render(output, channels);
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `sampler` | yes | [`sensor::TouchSampler`] (requires `embedded-hal` for its delay) |

#![cfg_attr(not(test), no_std)]

pub mod constants;
pub mod control;
pub mod dsp;
pub mod error;
pub mod render;
pub mod sensor;

pub use error::Error;

#[cfg(all(test, feature = "sampler"))]
mod test_support;
