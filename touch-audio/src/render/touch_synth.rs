//! Touch-driven oscillator voice.
//!
//! Per frame: load the latest [`SensorReading`], map the vertical position
//! onto the frequency range, smooth frequency, pan (horizontal position) and
//! amplitude (touch size) with one-pole filters, then write
//!
//! ```text
//!   sample = amplitude * generator
//!   left   = (1 - pan) * sample
//!   right  = pan * sample
//! ```

use super::interleave::write_stereo;
use super::AudioRender;
use crate::constants::{DEFAULT_SAMPLE_RATE, FREQUENCY_RANGE, SMOOTHING_CUTOFF_HZ};
use crate::control::{ControlMapper, ControlRange};
use crate::dsp::{OnePole, Oscillator, SignalGenerator, Waveform};
use crate::error::Error;
use crate::sensor::{ReadingCell, SensorReading};

/// Render-loop configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthConfig {
    pub sample_rate: f32,
    /// Frequency at vertical position 0 and 1, in Hz.
    pub frequency_range: (f32, f32),
    /// Cutoff of the frequency, pan and amplitude smoothers, in Hz.
    pub smoothing_cutoff: f32,
    /// Waveform of the built-in [`Oscillator`].
    pub waveform: Waveform,
}

impl Default for SynthConfig {
    fn default() -> Self {
        SynthConfig {
            sample_rate: DEFAULT_SAMPLE_RATE,
            frequency_range: FREQUENCY_RANGE,
            smoothing_cutoff: SMOOTHING_CUTOFF_HZ,
            waveform: Waveform::Triangle,
        }
    }
}

/// One rendered stereo frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StereoFrame {
    pub left: f32,
    pub right: f32,
}

/// Real-time voice driven by a [`ReadingCell`].
///
/// # Example
/// ```
/// use touch_audio::render::{AudioRender, SynthConfig, TouchSynth};
/// use touch_audio::sensor::{ReadingCell, SensorReading};
///
/// let cell = ReadingCell::new();
/// cell.publish(SensorReading::new(0.5, 0.5, 1.0));
///
/// let mut synth = TouchSynth::new(&cell, &SynthConfig::default()).unwrap();
/// let mut block = [0.0f32; 2 * 64];
/// synth.render(&mut block, 2);
/// assert_eq!(synth.frequency(), 850.0);
/// ```
pub struct TouchSynth<'a, G = Oscillator> {
    cell: &'a ReadingCell,
    generator: G,
    frequency_map: ControlMapper,
    frequency_filter: OnePole,
    pan_filter: OnePole,
    amplitude_filter: OnePole,
    frequency: f32,
    pan: f32,
    amplitude: f32,
}

impl<'a> TouchSynth<'a, Oscillator> {
    /// Create a voice with the built-in oscillator.
    pub fn new(cell: &'a ReadingCell, config: &SynthConfig) -> Result<Self, Error> {
        let oscillator = Oscillator::new(config.sample_rate, config.waveform)?;
        Self::with_generator(cell, oscillator, config)
    }
}

impl<'a, G: SignalGenerator> TouchSynth<'a, G> {
    /// Create a voice around any [`SignalGenerator`].
    ///
    /// Fails with [`Error::InvalidParameter`] for a bad sample rate or cutoff
    /// or a negative frequency bound, and with [`Error::InvalidRange`] for a
    /// non-finite frequency range.
    pub fn with_generator(cell: &'a ReadingCell, mut generator: G, config: &SynthConfig) -> Result<Self, Error> {
        let range = ControlRange::from_pair(config.frequency_range)?;
        if range.lo() < 0.0 {
            return Err(Error::InvalidParameter);
        }
        let frequency_map = ControlMapper::new(ControlRange::UNIT, range)?;
        let filter = OnePole::with_cutoff(config.smoothing_cutoff, config.sample_rate)?;
        generator.set_frequency(range.min());

        log::debug!(
            "touch synth: {} Hz, {}..{} Hz, smoothing at {} Hz",
            config.sample_rate,
            range.min(),
            range.max(),
            config.smoothing_cutoff,
        );

        Ok(TouchSynth {
            cell,
            generator,
            frequency_map,
            frequency_filter: filter,
            pan_filter: filter,
            amplitude_filter: filter,
            frequency: range.min(),
            pan: 0.0,
            amplitude: 0.0,
        })
    }

    /// Compute one frame from an explicit reading.
    #[inline]
    pub fn process_frame(&mut self, reading: SensorReading) -> StereoFrame {
        // Mapped values are clamped before they reach the smoothers.
        self.frequency = self
            .frequency_filter
            .process(self.frequency_map.apply(reading.vertical_position()));
        self.generator.set_frequency(self.frequency);

        self.pan = self.pan_filter.process(reading.horizontal_position());
        self.amplitude = self.amplitude_filter.process(reading.size());

        let sample = self.amplitude * self.generator.next_sample();
        StereoFrame {
            left: (1.0 - self.pan) * sample,
            right: self.pan * sample,
        }
    }

    /// Reset the smoothers at stream (re)start; the next reading is adopted
    /// without a glide.
    pub fn reset(&mut self) {
        self.frequency_filter.reset();
        self.pan_filter.reset();
        self.amplitude_filter.reset();
    }

    /// Smoothed frequency applied to the generator, in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Smoothed pan position: 0 = left, 1 = right.
    pub fn pan(&self) -> f32 {
        self.pan
    }

    /// Left and right channel gains, `(1 - pan, pan)`.
    pub fn channel_gains(&self) -> (f32, f32) {
        (1.0 - self.pan, self.pan)
    }

    /// Smoothed amplitude.
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }
}

impl<G: SignalGenerator> AudioRender for TouchSynth<'_, G> {
    fn render(&mut self, output: &mut [f32], channels: usize) {
        if channels == 0 {
            return;
        }
        for frame in output.chunks_exact_mut(channels) {
            let reading = self.cell.load();
            let StereoFrame { left, right } = self.process_frame(reading);
            write_stereo(frame, left, right);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::interleave::deinterleave;

    const SR: f32 = 44_100.0;

    /// Constant +1 source that remembers the last frequency it was given.
    struct DcGenerator {
        frequency: f32,
    }

    impl SignalGenerator for DcGenerator {
        fn set_frequency(&mut self, hz: f32) {
            self.frequency = hz;
        }

        fn next_sample(&mut self) -> f32 {
            1.0
        }
    }

    fn dc_synth(cell: &ReadingCell) -> TouchSynth<'_, DcGenerator> {
        TouchSynth::with_generator(cell, DcGenerator { frequency: 0.0 }, &SynthConfig::default()).unwrap()
    }

    fn peak(buf: &[f32]) -> f32 {
        buf.iter().fold(0.0f32, |m, s| m.max(s.abs()))
    }

    #[test]
    fn rejects_invalid_configuration() {
        let cell = ReadingCell::new();
        let bad_rate = SynthConfig { sample_rate: 0.0, ..SynthConfig::default() };
        assert_eq!(TouchSynth::new(&cell, &bad_rate).err(), Some(Error::InvalidParameter));

        let bad_cutoff = SynthConfig { smoothing_cutoff: SR, ..SynthConfig::default() };
        assert_eq!(TouchSynth::new(&cell, &bad_cutoff).err(), Some(Error::InvalidParameter));

        let negative = SynthConfig { frequency_range: (-10.0, 100.0), ..SynthConfig::default() };
        assert_eq!(TouchSynth::new(&cell, &negative).err(), Some(Error::InvalidParameter));

        let infinite = SynthConfig { frequency_range: (0.0, f32::INFINITY), ..SynthConfig::default() };
        assert_eq!(TouchSynth::new(&cell, &infinite).err(), Some(Error::InvalidRange));
    }

    #[test]
    fn centred_touch_reaches_steady_state() {
        let cell = ReadingCell::new();
        cell.publish(SensorReading::new(0.5, 0.5, 1.0));
        let mut synth = dc_synth(&cell);

        let mut buf = [0.0f32; 2 * 256];
        synth.render(&mut buf, 2);

        assert_eq!(synth.frequency(), 850.0);
        assert_eq!(synth.generator().frequency, 850.0);
        assert_eq!(synth.channel_gains(), (0.5, 0.5));
        assert_eq!(synth.amplitude(), 1.0);
        assert!(buf.iter().all(|&s| s == 0.5));
    }

    #[test]
    fn oscillator_output_reaches_peak_amplitude() {
        let cell = ReadingCell::new();
        cell.publish(SensorReading::new(0.5, 0.5, 1.0));
        let mut synth = TouchSynth::new(&cell, &SynthConfig::default()).unwrap();

        // A little over one 850 Hz period.
        let mut buf = [0.0f32; 2 * 64];
        synth.render(&mut buf, 2);

        let mut left = [0.0f32; 64];
        let mut right = [0.0f32; 64];
        deinterleave(&buf, 2, 0, &mut left);
        deinterleave(&buf, 2, 1, &mut right);
        assert!(peak(&left) > 0.49 && peak(&left) <= 0.5);
        assert_eq!(left, right);
    }

    #[test]
    fn frequency_glides_towards_new_position() {
        let cell = ReadingCell::new();
        cell.publish(SensorReading::new(0.5, 0.0, 1.0));
        let mut synth = dc_synth(&cell);

        let mut buf = [0.0f32; 2 * 128];
        synth.render(&mut buf, 2);
        assert_eq!(synth.frequency(), 200.0);

        cell.publish(SensorReading::new(0.5, 1.0, 1.0));
        synth.render(&mut buf, 2);
        let after_block = synth.frequency();
        // 1 Hz smoothing: one block barely moves.
        assert!(after_block > 200.0 && after_block < 250.0, "{after_block}");

        let mut prev = after_block;
        for _ in 0..(3 * SR as usize / 128) {
            synth.render(&mut buf, 2);
            assert!(synth.frequency() >= prev && synth.frequency() <= 1500.0);
            prev = synth.frequency();
        }
        assert!((1500.0 - prev) < 1.0, "{prev}");
    }

    #[test]
    fn sustained_zero_size_fades_to_silence() {
        let cell = ReadingCell::new();
        cell.publish(SensorReading::new(0.3, 0.8, 1.0));
        let mut synth = TouchSynth::new(&cell, &SynthConfig::default()).unwrap();

        let mut buf = [0.0f32; 2 * 128];
        synth.render(&mut buf, 2);
        assert!(peak(&buf) > 0.1);

        cell.publish(SensorReading::new(0.3, 0.8, 0.0));
        for _ in 0..(3 * SR as usize / 128) {
            synth.render(&mut buf, 2);
        }
        assert!(synth.amplitude() < 1e-4, "{}", synth.amplitude());
        assert!(peak(&buf) < 1e-4);
    }

    #[test]
    fn pan_extremes_route_to_one_side() {
        let cell = ReadingCell::new();
        cell.publish(SensorReading::new(0.0, 0.5, 1.0));
        let mut synth = dc_synth(&cell);
        assert_eq!(synth.process_frame(cell.load()), StereoFrame { left: 1.0, right: 0.0 });

        synth.reset();
        cell.publish(SensorReading::new(1.0, 0.5, 1.0));
        assert_eq!(synth.process_frame(cell.load()), StereoFrame { left: 0.0, right: 1.0 });
    }

    #[test]
    fn extra_channels_are_silent_and_mono_gets_left() {
        let cell = ReadingCell::new();
        cell.publish(SensorReading::new(0.25, 0.5, 1.0));
        let mut synth = dc_synth(&cell);

        let mut quad = [9.0f32; 4 * 8];
        synth.render(&mut quad, 4);
        for frame in quad.chunks_exact(4) {
            assert_eq!(frame, &[0.75, 0.25, 0.0, 0.0]);
        }

        let mut mono = [9.0f32; 8];
        synth.render(&mut mono, 1);
        assert!(mono.iter().all(|&s| s == 0.75));
    }

    #[test]
    fn zero_channels_and_partial_frames_are_untouched() {
        let cell = ReadingCell::new();
        cell.publish(SensorReading::new(0.5, 0.5, 1.0));
        let mut synth = dc_synth(&cell);

        let mut buf = [9.0f32; 5];
        synth.render(&mut buf, 0);
        assert!(buf.iter().all(|&s| s == 9.0));

        synth.render(&mut buf, 2);
        assert_eq!(buf, [0.5, 0.5, 0.5, 0.5, 9.0]);
    }

    #[test]
    fn reset_adopts_next_reading_without_glide() {
        let cell = ReadingCell::new();
        cell.publish(SensorReading::new(0.5, 0.0, 1.0));
        let mut synth = dc_synth(&cell);
        synth.process_frame(cell.load());

        synth.reset();
        synth.process_frame(SensorReading::new(0.5, 1.0, 0.5));
        assert_eq!(synth.frequency(), 1500.0);
        assert_eq!(synth.amplitude(), 0.5);
    }

    #[test]
    fn output_stays_finite_for_any_reading() {
        let cell = ReadingCell::new();
        let mut synth = TouchSynth::new(&cell, &SynthConfig::default()).unwrap();
        let mut buf = [0.0f32; 2 * 32];
        for &(h, v, s) in [
            (f32::NAN, f32::NAN, f32::NAN),
            (f32::INFINITY, -1.0, 2.0),
            (0.5, f32::NEG_INFINITY, 0.5),
        ]
        .iter()
        {
            cell.publish(SensorReading::new(h, v, s));
            synth.render(&mut buf, 2);
            assert!(buf.iter().all(|s| s.is_finite()));
            assert!((200.0..=1500.0).contains(&synth.frequency()));
        }
    }
}
