//! Phase-accumulator oscillator.
//!
//! Float counterpart of a table-less wavetable oscillator: a normalised phase
//! in `[0, 1)` advances by `frequency / sample_rate` per sample and is shaped
//! into one of a few classic waveforms, all with a peak amplitude of 1.0.

use crate::control::constrain;
use crate::error::Error;

/// Periodic signal source driven one sample at a time from the render loop.
pub trait SignalGenerator {
    /// Set the oscillation frequency in Hz.
    fn set_frequency(&mut self, hz: f32);

    /// Produce the next sample and advance the phase.
    fn next_sample(&mut self) -> f32;
}

/// Oscillator waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    /// Rises from −1 at phase 0 to +1 at half period.
    Triangle,
    Square,
    /// Rising ramp from −1 to +1.
    Sawtooth,
}

/// Naive (non band-limited) oscillator.
///
/// # Example
/// ```
/// use touch_audio::dsp::{Oscillator, SignalGenerator, Waveform};
///
/// let mut osc = Oscillator::new(44_100.0, Waveform::Triangle).unwrap();
/// osc.set_frequency(200.0);
/// let s = osc.next_sample();
/// assert!((-1.0..=1.0).contains(&s));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Oscillator {
    waveform: Waveform,
    /// Normalised phase in `[0, 1)`.
    phase: f32,
    /// Phase increment per sample, limited to `[0, 0.5]`.
    increment: f32,
    inv_sample_rate: f32,
}

impl Oscillator {
    /// Create a silent-frequency (0 Hz) oscillator. Fails with
    /// [`Error::InvalidParameter`] for a non-positive or non-finite sample rate.
    pub fn new(sample_rate_hz: f32, waveform: Waveform) -> Result<Self, Error> {
        if !(sample_rate_hz > 0.0 && sample_rate_hz.is_finite()) {
            return Err(Error::InvalidParameter);
        }
        Ok(Oscillator {
            waveform,
            phase: 0.0,
            increment: 0.0,
            inv_sample_rate: 1.0 / sample_rate_hz,
        })
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    /// Current frequency in Hz, after limiting.
    pub fn frequency(&self) -> f32 {
        self.increment / self.inv_sample_rate
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Set the phase as a fraction of a period; wrapped into `[0, 1)`.
    pub fn set_phase(&mut self, phase: f32) {
        let wrapped = phase - libm::floorf(phase);
        self.phase = if wrapped < 1.0 { wrapped } else { 0.0 };
    }

    #[inline]
    fn shape(&self, phase: f32) -> f32 {
        match self.waveform {
            Waveform::Sine => libm::sinf(2.0 * core::f32::consts::PI * phase),
            Waveform::Triangle => 1.0 - 4.0 * libm::fabsf(phase - 0.5),
            Waveform::Square => {
                if phase < 0.5 { 1.0 } else { -1.0 }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
        }
    }
}

impl SignalGenerator for Oscillator {
    /// Negative and NaN frequencies are treated as 0 Hz; anything above
    /// Nyquist is limited to Nyquist.
    #[inline]
    fn set_frequency(&mut self, hz: f32) {
        self.increment = constrain(hz * self.inv_sample_rate, 0.0, 0.5);
    }

    #[inline]
    fn next_sample(&mut self) -> f32 {
        let out = self.shape(self.phase);
        self.phase += self.increment;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        out
    }
}
