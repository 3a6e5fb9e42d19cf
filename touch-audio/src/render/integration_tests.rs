//! End-to-end tests: sensor script → sampler → reading cell → render loop.
//!
//! ```text
//! ScriptedSensor → TouchSampler.poll_once()/run() → ReadingCell
//!     → TouchSynth.render() → interleaved output
//! ```

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::render::interleave::deinterleave;
    use crate::render::{AudioRender, SynthConfig, TouchSynth};
    use crate::sensor::{ReadingCell, SamplerConfig, StopFlag, TouchSampler};
    use crate::test_support::{CountingDelay, Frame, ScriptedSensor, ThreadDelay};

    const SR: f32 = 44_100.0;
    const BLOCK: usize = 128;

    fn peak(buf: &[f32]) -> f32 {
        buf.iter().fold(0.0f32, |m, s| m.max(s.abs()))
    }

    // ---------------------------------------------------------------
    // Interleaved polling and rendering on one thread
    // ---------------------------------------------------------------
    #[test]
    fn touch_then_release_keeps_voice_stable() {
        let cell = ReadingCell::new();
        let sensor = ScriptedSensor::frames(vec![
            // Centre of the pad, full pressure.
            Frame::new(&[(896, 6000)], &[896]),
            // Finger lifted: zero touches for the rest of the script.
            Frame::empty(),
        ]);
        let mut sampler = TouchSampler::new(sensor, CountingDelay::new(), &SamplerConfig::default()).unwrap();
        let mut synth = TouchSynth::new(&cell, &SynthConfig::default()).unwrap();
        let mut buf = [0.0f32; 2 * BLOCK];

        sampler.poll_once(&cell);
        synth.render(&mut buf, 2);
        assert_eq!(synth.frequency(), 850.0);
        assert_eq!(synth.channel_gains(), (0.5, 0.5));

        // Many zero-touch cycles: the voice must keep its last parameters
        // and never produce NaN.
        for _ in 0..200 {
            sampler.poll_once(&cell);
            synth.render(&mut buf, 2);
            assert!(buf.iter().all(|s| s.is_finite()));
        }
        assert_eq!(synth.frequency(), 850.0);
        assert_eq!(synth.amplitude(), 1.0);
        assert!(peak(&buf) > 0.4);
    }

    #[test]
    fn moving_touch_sweeps_pitch_and_pan() {
        let cell = ReadingCell::new();
        let sensor = ScriptedSensor::frames(vec![
            Frame::new(&[(1, 6000)], &[1]),
            Frame::new(&[(1792, 6000)], &[1792]),
        ]);
        let mut sampler = TouchSampler::new(sensor, CountingDelay::new(), &SamplerConfig::default()).unwrap();
        let mut synth = TouchSynth::new(&cell, &SynthConfig::default()).unwrap();
        let mut buf = [0.0f32; 2 * BLOCK];

        sampler.poll_once(&cell);
        synth.render(&mut buf, 2);
        let start_freq = synth.frequency();
        assert!(start_freq < 201.0);
        assert!(synth.pan() < 0.001);

        // Roughly 3 s of audio with the sampler polling once per block.
        for _ in 0..(3 * SR as usize / BLOCK) {
            sampler.poll_once(&cell);
            synth.render(&mut buf, 2);
        }
        assert!(synth.frequency() > 1499.0, "{}", synth.frequency());
        assert!(synth.pan() > 0.999);

        // Hard right: the left channel is (close to) silent.
        let mut left = [0.0f32; BLOCK];
        let mut right = [0.0f32; BLOCK];
        deinterleave(&buf, 2, 0, &mut left);
        deinterleave(&buf, 2, 1, &mut right);
        assert!(peak(&left) < 0.01);
        assert!(peak(&right) > 0.9);
    }

    // ---------------------------------------------------------------
    // Sampler on its own thread, render loop on this one
    // ---------------------------------------------------------------
    #[test]
    fn threaded_sampler_feeds_render_loop() {
        let cell = ReadingCell::new();
        let stop = StopFlag::new();
        let config = SamplerConfig {
            interval_us: 200,
            ..SamplerConfig::default()
        };
        let sensor = ScriptedSensor::frames(vec![Frame::new(&[(896, 6000)], &[448])]);
        let mut sampler = TouchSampler::new(sensor, ThreadDelay, &config).unwrap();
        let mut synth = TouchSynth::new(&cell, &SynthConfig::default()).unwrap();

        std::thread::scope(|s| {
            let worker = s.spawn(|| {
                sampler.run(&cell, &stop);
                sampler.stats()
            });

            let deadline = Instant::now() + Duration::from_secs(5);
            while cell.version() < 3 && Instant::now() < deadline {
                std::thread::sleep(Duration::from_millis(1));
            }

            let mut buf = [0.0f32; 2 * BLOCK];
            for _ in 0..64 {
                synth.render(&mut buf, 2);
                assert!(buf.iter().all(|s| s.is_finite()));
            }

            stop.request_stop();
            let stats = worker.join().unwrap();
            assert!(stats.published >= 3);
            assert_eq!(stats.read_errors, 0);
        });

        assert_eq!(synth.frequency(), 850.0);
        assert_eq!(synth.channel_gains(), (0.75, 0.25));
        assert_eq!(synth.amplitude(), 1.0);
    }
}
