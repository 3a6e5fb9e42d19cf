//! Hand-written collaborator doubles shared by unit and integration tests.

use crate::sensor::{DeviceType, SensorSetup, StopFlag, TouchSensor};

/// One sensor report: `(location, size)` pairs for the vertical axis and
/// plain locations for the horizontal axis. A location of 0 is an empty slot.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub touches: Vec<(u16, u16)>,
    pub horizontal: Vec<u16>,
}

impl Frame {
    pub fn new(touches: &[(u16, u16)], horizontal: &[u16]) -> Self {
        Frame {
            touches: touches.to_vec(),
            horizontal: horizontal.to_vec(),
        }
    }

    pub fn empty() -> Self {
        Frame::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusError;

/// Replays a script of reports (or read failures); repeats the last entry
/// once the script is exhausted.
pub struct ScriptedSensor {
    pub device: DeviceType,
    pub fail_setup: bool,
    pub applied_setup: Option<SensorSetup>,
    script: Vec<Option<Frame>>,
    cursor: usize,
    current: Frame,
    pub reads: usize,
}

impl ScriptedSensor {
    /// `None` entries make `read_locations` fail for that cycle.
    pub fn new(script: Vec<Option<Frame>>) -> Self {
        ScriptedSensor {
            device: DeviceType::Square,
            fail_setup: false,
            applied_setup: None,
            script,
            cursor: 0,
            current: Frame::empty(),
            reads: 0,
        }
    }

    pub fn frames(frames: Vec<Frame>) -> Self {
        Self::new(frames.into_iter().map(Some).collect())
    }
}

impl TouchSensor for ScriptedSensor {
    type Error = BusError;

    fn setup(&mut self, setup: &SensorSetup) -> Result<(), BusError> {
        if self.fail_setup {
            return Err(BusError);
        }
        self.applied_setup = Some(*setup);
        Ok(())
    }

    fn device_type(&self) -> DeviceType {
        self.device
    }

    fn read_locations(&mut self) -> Result<(), BusError> {
        self.reads += 1;
        let entry = if self.script.is_empty() {
            Some(Frame::empty())
        } else {
            let idx = self.cursor.min(self.script.len() - 1);
            self.cursor += 1;
            self.script[idx].clone()
        };
        match entry {
            Some(frame) => {
                self.current = frame;
                Ok(())
            }
            None => Err(BusError),
        }
    }

    fn number_of_touches(&self) -> usize {
        self.current.touches.len()
    }

    fn touch_location(&self, index: usize) -> u16 {
        self.current.touches[index].0
    }

    fn touch_size(&self, index: usize) -> u16 {
        self.current.touches[index].1
    }

    fn number_of_horizontal_touches(&self) -> usize {
        self.current.horizontal.len()
    }

    fn touch_horizontal_location(&self, index: usize) -> u16 {
        self.current.horizontal[index]
    }
}

/// Delay that never sleeps; records what was requested and raises a stop
/// flag after a fixed number of calls.
pub struct CountingDelay<'a> {
    pub calls: usize,
    pub total_ns: u64,
    stop_after: Option<(usize, &'a StopFlag)>,
}

impl<'a> CountingDelay<'a> {
    pub fn new() -> Self {
        CountingDelay {
            calls: 0,
            total_ns: 0,
            stop_after: None,
        }
    }

    pub fn stopping_after(calls: usize, stop: &'a StopFlag) -> Self {
        CountingDelay {
            calls: 0,
            total_ns: 0,
            stop_after: Some((calls, stop)),
        }
    }
}

impl embedded_hal::delay::DelayNs for CountingDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ns += ns as u64;
        if let Some((limit, stop)) = self.stop_after {
            if self.calls >= limit {
                stop.request_stop();
            }
        }
    }

    fn delay_us(&mut self, us: u32) {
        self.delay_ns(us.saturating_mul(1_000));
    }
}

/// Real sleep, for tests that run the sampler on its own thread.
pub struct ThreadDelay;

impl embedded_hal::delay::DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(ns as u64));
    }
}
