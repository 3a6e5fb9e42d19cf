//! Single-pole low-pass smoother for control values.
//!
//! `y[n] = y[n-1] + k * (x[n] - y[n-1])` with `k = 1 - e^(-2π·fc/fs)`.
//! Used to turn the stepwise updates of a slow sensor into glitch-free
//! audio-rate parameter trajectories.

use crate::error::Error;

/// One-pole low-pass filter.
///
/// # Reset policy
///
/// A freshly created or [`reset()`](Self::reset) filter is *unprimed*: the
/// first subsequent [`process()`](Self::process) call adopts its input as the
/// filter state and returns it unchanged. Smoothing applies from the second
/// sample on. This avoids an audible glide from a stale or zero state when a
/// stream (re)starts. [`reset_to()`](Self::reset_to) sets an explicit state
/// instead.
///
/// # Example
/// ```
/// use touch_audio::dsp::OnePole;
///
/// let mut lp = OnePole::new();
/// lp.configure(1.0, 44_100.0).unwrap();
/// assert_eq!(lp.process(0.8), 0.8); // primed by the first input
/// assert!(lp.process(0.0) < 0.8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OnePole {
    /// Fraction of the remaining distance covered per sample, in `(0, 1]`.
    coefficient: f32,
    last_output: f32,
    primed: bool,
}

impl OnePole {
    /// Create an unconfigured filter. Until [`configure()`](Self::configure)
    /// succeeds it passes its input straight through (`k = 1`).
    pub const fn new() -> Self {
        OnePole {
            coefficient: 1.0,
            last_output: 0.0,
            primed: false,
        }
    }

    /// Create and configure in one step.
    pub fn with_cutoff(cutoff_hz: f32, sample_rate_hz: f32) -> Result<Self, Error> {
        let mut filter = Self::new();
        filter.configure(cutoff_hz, sample_rate_hz)?;
        Ok(filter)
    }

    /// Compute the smoothing coefficient for `cutoff_hz` at `sample_rate_hz`.
    ///
    /// Fails with [`Error::InvalidParameter`] if either value is non-finite or
    /// not positive, or if the cutoff is at or above Nyquist. The filter state
    /// is left untouched, so a running filter can be retuned.
    pub fn configure(&mut self, cutoff_hz: f32, sample_rate_hz: f32) -> Result<(), Error> {
        if !(cutoff_hz > 0.0 && cutoff_hz.is_finite()) {
            return Err(Error::InvalidParameter);
        }
        if !(sample_rate_hz > 0.0 && sample_rate_hz.is_finite()) {
            return Err(Error::InvalidParameter);
        }
        if cutoff_hz >= sample_rate_hz * 0.5 {
            return Err(Error::InvalidParameter);
        }
        // expm1 keeps precision when fc/fs is tiny.
        let coefficient = -libm::expm1f(-2.0 * core::f32::consts::PI * cutoff_hz / sample_rate_hz);
        if !(coefficient > 0.0) {
            return Err(Error::InvalidParameter);
        }
        self.coefficient = coefficient;
        Ok(())
    }

    /// Smooth one input sample. O(1), no allocation, no branching on
    /// anything but the primed flag.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        if !self.primed {
            self.primed = true;
            self.last_output = input;
            return input;
        }
        self.last_output += self.coefficient * (input - self.last_output);
        self.last_output
    }

    /// Forget the state; the next input primes the filter.
    pub fn reset(&mut self) {
        self.last_output = 0.0;
        self.primed = false;
    }

    /// Force the state to `value`; smoothing continues from there.
    pub fn reset_to(&mut self, value: f32) {
        self.last_output = value;
        self.primed = true;
    }

    pub fn coefficient(&self) -> f32 {
        self.coefficient
    }

    /// Most recent output (0.0 while unprimed).
    pub fn last_output(&self) -> f32 {
        self.last_output
    }

    pub fn is_primed(&self) -> bool {
        self.primed
    }
}

impl Default for OnePole {
    fn default() -> Self {
        Self::new()
    }
}
