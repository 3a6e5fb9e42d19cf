//! WAV input and output via `hound`.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

/// Float files whose peak is below this are left unscaled.
const SILENCE_PEAK: f32 = 1e-10;

/// Decoded mono sample data and the rate it was recorded at.
#[derive(Debug, Clone, PartialEq)]
pub struct MonoSample {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

/// Loads a mono WAV file as `f32` samples.
///
/// Integer formats are scaled to `[-1, 1]` by their bit depth. Float
/// formats are peak-normalised unless the file is silent. A file that ends
/// early is padded with zeros up to its declared length.
pub fn load_mono(path: &Path) -> anyhow::Result<MonoSample> {
    let mut reader =
        WavReader::open(path).with_context(|| format!("couldn't open file {}", path.display()))?;
    let spec = reader.spec();
    if spec.channels != 1 {
        bail!("{} is not a mono file", path.display());
    }

    let declared = reader.len() as usize;
    let mut samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Int => {
            let scale = 1.0 / (1u64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .samples::<i32>()
                .map_while(Result::ok)
                .map(|s| s as f32 * scale)
                .collect()
        }
        SampleFormat::Float => reader.samples::<f32>().map_while(Result::ok).collect(),
    };

    if samples.len() < declared {
        log::warn!(
            "{}: read {} of {} samples, padding with silence",
            path.display(),
            samples.len(),
            declared
        );
        samples.resize(declared, 0.0);
    }

    if spec.sample_format == SampleFormat::Float {
        let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        if peak >= SILENCE_PEAK {
            let scale = 1.0 / peak;
            log::debug!("file samples scale = {scale}");
            for s in &mut samples {
                *s *= scale;
            }
        }
    }
    Ok(MonoSample {
        samples,
        sample_rate: spec.sample_rate,
    })
}

/// Writes interleaved samples as a 32-bit float WAV file, creating parent
/// directories as needed.
pub fn write_interleaved(path: &Path, samples: &[f32], channels: u16, sample_rate: u32) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("couldn't create {}", parent.display()))?;
    }

    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer =
        WavWriter::create(path, spec).with_context(|| format!("couldn't create {}", path.display()))?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("touch-audio-demos-{}", std::process::id()))
            .join(name)
    }

    fn write_with(path: &Path, spec: WavSpec, f: impl FnOnce(&mut WavWriter<std::io::BufWriter<fs::File>>)) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut writer = WavWriter::create(path, spec).unwrap();
        f(&mut writer);
        writer.finalize().unwrap();
    }

    #[test]
    fn int16_is_scaled_by_bit_depth() {
        let path = temp_path("int16.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 44_100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        write_with(&path, spec, |w| {
            for s in [0i16, 16_384, -32_768] {
                w.write_sample(s).unwrap();
            }
        });

        let loaded = load_mono(&path).unwrap();
        assert_eq!(loaded.samples, [0.0, 0.5, -1.0]);
        assert_eq!(loaded.sample_rate, 44_100);
    }

    #[test]
    fn float_is_peak_normalised() {
        let path = temp_path("float.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48_000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        write_with(&path, spec, |w| {
            for s in [0.25f32, -0.5, 0.125] {
                w.write_sample(s).unwrap();
            }
        });

        let loaded = load_mono(&path).unwrap();
        assert_eq!(loaded.samples, [0.5, -1.0, 0.25]);
        assert_eq!(loaded.sample_rate, 48_000);
    }

    #[test]
    fn silent_float_is_left_alone() {
        let path = temp_path("quiet.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48_000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        write_with(&path, spec, |w| {
            for s in [0.0f32, 1e-12, -1e-12] {
                w.write_sample(s).unwrap();
            }
        });

        assert_eq!(load_mono(&path).unwrap().samples, [0.0, 1e-12, -1e-12]);
    }

    #[test]
    fn stereo_is_rejected() {
        let path = temp_path("stereo.wav");
        write_interleaved(&path, &[0.1, 0.2, 0.3, 0.4], 2, 44_100).unwrap();

        let err = load_mono(&path).unwrap_err();
        assert!(err.to_string().contains("not a mono file"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_mono(Path::new("does/not/exist.wav")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.wav"));
    }

    #[test]
    fn written_file_has_requested_layout() {
        let path = temp_path("nested/dir/out.wav");
        let samples = [0.5f32, -0.5, 0.25, -0.25, 0.0, 1.0];
        write_interleaved(&path, &samples, 2, 44_100).unwrap();

        let mut reader = WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 44_100);
        assert_eq!(spec.sample_format, SampleFormat::Float);
        let read: Vec<f32> = reader.samples::<f32>().map(Result::unwrap).collect();
        assert_eq!(read, samples);
    }
}
