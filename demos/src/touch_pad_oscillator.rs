//! Touch pad oscillator: a two-dimensional touch pad plays a triangle
//! oscillator.
//!
//! The vertical finger position sets the pitch (200 Hz at the bottom,
//! 1500 Hz at the top), the horizontal position pans left to right, and
//! touch size sets the level.
//!
//! ```text
//!   SimulatedPad ──► TouchSampler (thread, 5 ms) ──► ReadingCell
//!                                                        │
//!   WAV file ◄── render_offline (128-frame blocks) ◄── TouchSynth
//! ```
//!
//! The sensor task runs on its own thread against a wall-clock gesture
//! while the render loop keeps audio-callback pace. When the finger lifts,
//! the voice fades out and keeps its last pitch and pan. Ctrl-C ends the
//! render early; the sensor task is still joined and the audio rendered so
//! far is written.

use std::process::ExitCode;

use anyhow::{anyhow, Context};
use touch_audio::render::{SynthConfig, TouchSynth};
use touch_audio::sensor::{ReadingCell, ReleasePolicy, SamplerConfig, StopFlag, TouchSampler};
use touch_audio_demos::args::{self, Command, Options};
use touch_audio_demos::delay::ThreadSleep;
use touch_audio_demos::sim::SimulatedPad;
use touch_audio_demos::{frames_for, init_logger, install_stop_handler, render_offline, wav, CHANNELS};

static READING: ReadingCell = ReadingCell::new();
static SHOULD_STOP: StopFlag = StopFlag::new();

fn main() -> ExitCode {
    let mut argv = std::env::args();
    let program = args::program_name(argv.next().as_deref(), "touch_pad_oscillator");
    let defaults = Options {
        output: "out/touch_pad_oscillator.wav".into(),
        duration: 8.0,
        ..Options::default()
    };

    match args::parse(argv, defaults) {
        Ok(Command::Help) => {
            eprint!("{}", args::usage(&program, false));
            ExitCode::SUCCESS
        }
        Ok(Command::Run(options)) => match run(&options) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("{e:#}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("{e}");
            eprint!("{}", args::usage(&program, false));
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options) -> anyhow::Result<()> {
    init_logger(options.verbose)?;
    install_stop_handler(&SHOULD_STOP)?;

    let synth_config = SynthConfig::default();
    let sampler_config = SamplerConfig {
        release: ReleasePolicy::Silence,
        ..SamplerConfig::default()
    };

    let mut sampler = TouchSampler::new(SimulatedPad::wall_clock(), ThreadSleep, &sampler_config)
        .context("unable to initialise touch sensor")?;
    let mut synth = TouchSynth::new(&READING, &synth_config).context("unable to initialise audio")?;
    synth.reset();

    let sample_rate = synth_config.sample_rate;
    let frames = frames_for(options.duration, sample_rate)?;
    let log_every = sample_rate as usize;
    log::info!(
        "rendering {:.1} s at {} Hz to {}",
        options.duration,
        sample_rate,
        options.output.display()
    );

    let (rendered, stats) = std::thread::scope(|s| {
        let sensor_task = s.spawn(|| {
            sampler.run(&READING, &SHOULD_STOP);
            sampler.stats()
        });

        let mut next_log = 0;
        let rendered = render_offline(&mut synth, frames, Some(sample_rate), &SHOULD_STOP, |synth, done| {
            if done >= next_log {
                log::debug!(
                    "t={:.2}s freq {:.1} Hz pan {:.2} amp {:.2}",
                    done as f32 / sample_rate,
                    synth.frequency(),
                    synth.pan(),
                    synth.amplitude()
                );
                next_log += log_every;
            }
        });

        // Stop the sensor task before its reading cell goes away.
        SHOULD_STOP.request_stop();
        let stats = sensor_task.join().map_err(|_| anyhow!("sensor task panicked"));
        (rendered, stats)
    });
    let stats = stats?;

    log::info!(
        "sensor: {} cycles, {} published, {} held, {} read errors",
        stats.cycles,
        stats.published,
        stats.held,
        stats.read_errors
    );

    wav::write_interleaved(&options.output, &rendered, CHANNELS as u16, sample_rate as u32)?;
    log::info!(
        "wrote {} frames to {}",
        rendered.len() / CHANNELS,
        options.output.display()
    );
    Ok(())
}
