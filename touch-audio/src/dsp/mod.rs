//! Real-time DSP building blocks.
//!
//! - [`OnePole`]: exponential smoother for control values
//! - [`Oscillator`]: phase-accumulator signal generator implementing [`SignalGenerator`]
//!
//! Everything here is allocation-free and O(1) per sample, safe to call from
//! the audio callback.

mod one_pole;
mod oscillator;

pub use one_pole::OnePole;
pub use oscillator::{Oscillator, SignalGenerator, Waveform};
