//! Mono sample playback.
//!
//! Plays a pre-loaded sample buffer, one sample per frame, copied to every
//! output channel. The buffer is borrowed: loading and decoding happen
//! before the audio stream starts.

use super::interleave::write_all;
use super::AudioRender;

/// Looping (by default) player over a borrowed mono buffer.
///
/// # Example
/// ```
/// use touch_audio::render::{AudioRender, SamplePlayer};
///
/// let samples = [0.1, 0.2, 0.3];
/// let mut player = SamplePlayer::new(&samples);
/// let mut out = [0.0f32; 8];
/// player.render(&mut out, 2);
/// assert_eq!(out, [0.1, 0.1, 0.2, 0.2, 0.3, 0.3, 0.1, 0.1]);
/// ```
#[derive(Debug, Clone)]
pub struct SamplePlayer<'a> {
    samples: &'a [f32],
    position: usize,
    looping: bool,
    gain: f32,
}

impl<'a> SamplePlayer<'a> {
    pub fn new(samples: &'a [f32]) -> Self {
        SamplePlayer {
            samples,
            position: 0,
            looping: true,
            gain: 1.0,
        }
    }

    /// When off, playback stops at the end of the buffer and renders silence.
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
    }

    /// Index of the next sample to play.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// `true` once a non-looping player has played the whole buffer.
    pub fn is_finished(&self) -> bool {
        !self.looping && self.position >= self.samples.len()
    }

    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Next sample, advancing the read position.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        if self.position >= self.samples.len() {
            if !self.looping || self.samples.is_empty() {
                return 0.0;
            }
            self.position = 0;
        }
        let sample = self.samples[self.position] * self.gain;
        self.position += 1;
        sample
    }
}

impl AudioRender for SamplePlayer<'_> {
    fn render(&mut self, output: &mut [f32], channels: usize) {
        if channels == 0 {
            return;
        }
        for frame in output.chunks_exact_mut(channels) {
            let sample = self.next_sample();
            write_all(frame, sample);
        }
    }
}
