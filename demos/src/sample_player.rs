//! Sample player: loads a mono WAV file and loops it on every output
//! channel at the file's own sample rate. Ctrl-C ends the render early and
//! writes what was rendered.
//!
//! ```text
//!   --file (mono WAV) ──► wav::load_mono ──► SamplePlayer ──► WAV file
//! ```

use std::process::ExitCode;

use anyhow::Context;
use touch_audio::sensor::StopFlag;
use touch_audio_demos::args::{self, Command, Options};
use touch_audio_demos::{init_logger, install_stop_handler, render_sample, wav, CHANNELS};

static SHOULD_STOP: StopFlag = StopFlag::new();

fn main() -> ExitCode {
    let mut argv = std::env::args();
    let program = args::program_name(argv.next().as_deref(), "sample_player");
    let defaults = Options {
        output: "out/sample_player.wav".into(),
        ..Options::default()
    };

    match args::parse(argv, defaults) {
        Ok(Command::Help) => {
            eprint!("{}", args::usage(&program, true));
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
            eprint!("{}", args::usage(&program, true));
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options) -> anyhow::Result<()> {
    init_logger(options.verbose)?;
    install_stop_handler(&SHOULD_STOP)?;

    log::info!("loading file {}", options.file.display());
    log::info!("you can load a custom file with `--file [-f] filename`");
    let sample = wav::load_mono(&options.file).context("unable to load samples")?;
    log::debug!(
        "file contains {} samples at {} Hz",
        sample.samples.len(),
        sample.sample_rate
    );

    let rendered = render_sample(&sample, options.duration, &SHOULD_STOP)?;

    wav::write_interleaved(&options.output, &rendered, CHANNELS as u16, sample.sample_rate)?;
    log::info!(
        "wrote {} frames to {}",
        rendered.len() / CHANNELS,
        options.output.display()
    );
    Ok(())
}
