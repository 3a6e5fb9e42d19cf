//! Command-line options shared by the demo programs.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};

use crate::MAX_DURATION_SECONDS;

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Input sample file (`--file`, `-f`).
    pub file: PathBuf,
    /// Rendered WAV file (`--output`, `-o`).
    pub output: PathBuf,
    /// Seconds of audio to render (`--duration`, `-d`).
    pub duration: f32,
    /// Debug-level logging (`--verbose`, `-v`).
    pub verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            file: PathBuf::from("sample.wav"),
            output: PathBuf::from("out/output.wav"),
            duration: 5.0,
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Options),
    /// `--help` was given; print usage and exit successfully.
    Help,
}

/// Parses the arguments after the program name, starting from `defaults`.
///
/// Accepts `--name value`, `--name=value` and `-n value`. Parsing stops at
/// the first `--help`.
pub fn parse<I>(args: I, defaults: Options) -> anyhow::Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut options = defaults;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let (name, inline) = match arg.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |flag: &str| -> anyhow::Result<String> {
            match inline.clone() {
                Some(v) => Ok(v),
                None => args.next().ok_or_else(|| anyhow!("option `{flag}` requires a value")),
            }
        };

        match name.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-v" | "--verbose" => options.verbose = true,
            "-f" | "--file" => options.file = PathBuf::from(value(&name)?),
            "-o" | "--output" => options.output = PathBuf::from(value(&name)?),
            "-d" | "--duration" => {
                let raw = value(&name)?;
                let seconds: f32 = raw
                    .parse()
                    .with_context(|| format!("invalid duration `{raw}`"))?;
                if !seconds.is_finite() || seconds <= 0.0 || seconds > MAX_DURATION_SECONDS {
                    bail!("duration must be between 0 and {MAX_DURATION_SECONDS} seconds, got `{raw}`");
                }
                options.duration = seconds;
            }
            _ => bail!("unknown option `{arg}`"),
        }
    }
    Ok(Command::Run(options))
}

/// Usage text. `with_file` adds the `--file` line for programs that load a
/// sample.
pub fn usage(program: &str, with_file: bool) -> String {
    let mut text = format!("Usage: {program} [options]\n");
    if with_file {
        text.push_str("   --file [-f] filename:    Name of the file to load (default is \"sample.wav\")\n");
    }
    text.push_str("   --output [-o] filename:  WAV file to write the rendered audio to\n");
    text.push_str("   --duration [-d] seconds: Length of audio to render (at most one hour)\n");
    text.push_str("   --verbose [-v]:          Debug logging\n");
    text.push_str("   --help [-h]:             Print this menu\n");
    text
}

/// Final path component of `argv[0]`, for usage output.
pub fn program_name(argv0: Option<&str>, fallback: &str) -> String {
    argv0
        .and_then(|p| std::path::Path::new(p).file_name())
        .and_then(|n| n.to_str())
        .unwrap_or(fallback)
        .to_string()
}
