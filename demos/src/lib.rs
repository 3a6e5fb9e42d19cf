//! Host-side support for the touch-audio demo programs.
//!
//! The programs stand in for the board: the audio device becomes an
//! offline, block-by-block render into a WAV file and the I²C touch sensor
//! becomes [`SimulatedPad`](sim::SimulatedPad), a finger tracing a fixed
//! gesture.
//!
//! | Module | Provides |
//! |--------|----------|
//! | [`args`] | `--file`, `--output`, `--duration`, `--verbose`, `--help` |
//! | [`delay`] | `ThreadSleep`, an `embedded_hal` delay over `std::thread::sleep` |
//! | [`sim`] | `SimulatedPad`, a `TouchSensor` driven by a clock |
//! | [`wav`] | mono sample loading and interleaved output via `hound` |

use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use simple_logger::SimpleLogger;
use touch_audio::render::interleave::{frame_count, silence};
use touch_audio::render::{AudioRender, SamplePlayer};
use touch_audio::sensor::StopFlag;
use wav::MonoSample;

pub mod args;
pub mod delay;
pub mod sim;
pub mod wav;

/// Output channels of every demo (stereo).
pub const CHANNELS: usize = 2;

/// Frames per rendered block, the size of a typical audio callback.
pub const BLOCK_FRAMES: usize = 128;

/// Longest render accepted on the command line, in seconds.
pub const MAX_DURATION_SECONDS: f32 = 3600.0;

/// Highest sample rate a render is sized for, in Hz.
pub const MAX_SAMPLE_RATE: f32 = 192_000.0;

/// Installs the logger: `Info`, or `Debug` with `--verbose`.
pub fn init_logger(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    SimpleLogger::new().with_level(level).init()?;
    Ok(())
}

/// Raises `stop` on Ctrl-C or SIGTERM so the render ends early and the
/// program still joins its sensor task and writes what it rendered.
pub fn install_stop_handler(stop: &'static StopFlag) -> anyhow::Result<()> {
    ctrlc::set_handler(move || stop.request_stop()).context("unable to install signal handler")?;
    Ok(())
}

/// Number of frames in `duration` seconds at `sample_rate`.
///
/// Fails for non-finite or negative inputs, a rate above
/// [`MAX_SAMPLE_RATE`] or a duration above [`MAX_DURATION_SECONDS`].
pub fn frames_for(duration: f32, sample_rate: f32) -> anyhow::Result<usize> {
    if !duration.is_finite() || duration < 0.0 || duration > MAX_DURATION_SECONDS {
        bail!("duration must be between 0 and {MAX_DURATION_SECONDS} seconds, got {duration}");
    }
    if !sample_rate.is_finite() || sample_rate <= 0.0 || sample_rate > MAX_SAMPLE_RATE {
        bail!("sample rate must be between 0 and {MAX_SAMPLE_RATE} Hz, got {sample_rate}");
    }
    let frames = (f64::from(duration) * f64::from(sample_rate)).round();
    usize::try_from(frames as u64).context("render too long for this platform")
}

/// Renders up to `frames` interleaved stereo frames from `source`, one block
/// at a time, calling `on_block` after each block with the frames done so
/// far. Returns early, with whatever was rendered, once `stop` is raised.
///
/// With `pace` set to a sample rate, each block waits until its wall-clock
/// deadline, so a sensor task running alongside sees the same timing as it
/// would next to a real audio callback.
pub fn render_offline<R, F>(
    source: &mut R,
    frames: usize,
    pace: Option<f32>,
    stop: &StopFlag,
    mut on_block: F,
) -> Vec<f32>
where
    R: AudioRender,
    F: FnMut(&R, usize),
{
    let max_frames = (MAX_DURATION_SECONDS * MAX_SAMPLE_RATE) as usize;
    let mut rendered = Vec::with_capacity(frames.min(max_frames).saturating_mul(CHANNELS));
    let mut block = [0.0f32; BLOCK_FRAMES * CHANNELS];
    let block_frames = frame_count(block.len(), CHANNELS);
    let block_period = pace
        .filter(|sr| sr.is_finite() && *sr > 0.0)
        .map(|sr| Duration::from_secs_f64(block_frames as f64 / sr as f64));
    let start = Instant::now();
    let mut done = 0;
    let mut blocks = 0u32;

    while done < frames && !stop.should_stop() {
        silence(&mut block);
        source.render(&mut block, CHANNELS);
        let n = (frames - done).min(block_frames);
        rendered.extend_from_slice(&block[..n * CHANNELS]);
        done += n;
        blocks = blocks.saturating_add(1);
        on_block(source, done);

        if let Some(period) = block_period {
            let due = start + period * blocks;
            if let Some(wait) = due.checked_duration_since(Instant::now()) {
                std::thread::sleep(wait);
            }
        }
    }
    if done < frames {
        log::info!("stopped early after {done} of {frames} frames");
    }
    rendered
}

/// Loops `sample` for `duration` seconds at its own sample rate and
/// returns the interleaved stereo render.
pub fn render_sample(sample: &MonoSample, duration: f32, stop: &StopFlag) -> anyhow::Result<Vec<f32>> {
    let frames = frames_for(duration, sample.sample_rate as f32)?;
    let mut player = SamplePlayer::new(&sample.samples);
    Ok(render_offline(&mut player, frames, None, stop, |_, _| {}))
}
