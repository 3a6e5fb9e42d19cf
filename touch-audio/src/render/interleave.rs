//! Interleaved frame helpers.
//!
//! Output buffers hold one frame per `channels` consecutive samples:
//! `[L0, R0, (C2_0 ..), L1, R1, ...]`.

/// Number of complete frames in an interleaved buffer of `len` samples.
#[inline]
pub fn frame_count(len: usize, channels: usize) -> usize {
    if channels == 0 { 0 } else { len / channels }
}

/// Write a stereo pair into one frame.
///
/// Channel 0 gets `left`, channel 1 gets `right`, any further channels are
/// zeroed. A mono frame receives only `left`.
#[inline]
pub fn write_stereo(frame: &mut [f32], left: f32, right: f32) {
    for (channel, sample) in frame.iter_mut().enumerate() {
        *sample = match channel {
            0 => left,
            1 => right,
            _ => 0.0,
        };
    }
}

/// Write the same sample to every channel of one frame.
#[inline]
pub fn write_all(frame: &mut [f32], sample: f32) {
    frame.fill(sample);
}

/// Copy one channel out of an interleaved buffer into `dest`.
///
/// Returns the number of samples written (the smaller of `dest.len()` and
/// the frame count). Out-of-range `channel` writes nothing.
pub fn deinterleave(src: &[f32], channels: usize, channel: usize, dest: &mut [f32]) -> usize {
    if channel >= channels {
        return 0;
    }
    let mut written = 0;
    for (d, frame) in dest.iter_mut().zip(src.chunks_exact(channels)) {
        *d = frame[channel];
        written += 1;
    }
    written
}

/// Fill a buffer with silence.
pub fn silence(dest: &mut [f32]) {
    dest.fill(0.0);
}
