//! Periodic sensor polling task.
//!
//! [`TouchSampler`] owns the sensor driver and an injected
//! [`DelayNs`] provider. Each cycle it reads a report, averages the valid
//! touches, maps them onto `[0, 1]` and publishes the result to a
//! [`ReadingCell`]. It runs at a far lower rate than audio (every 5 ms by
//! default) on a low-priority context, and only ever blocks on its own delay
//! and on the sensor bus.
//!
//! ```text
//!   Idle ──► Sampling ──► Publishing ──► Idle ──► (delay) ──► ...
//!              │  no touch / read error        ▲
//!              └───────────────────────────────┘  (reading held)
//! ```

use embedded_hal::delay::DelayNs;

use super::reading::{ReadingCell, SensorReading};
use super::stop::StopFlag;
use super::{DeviceType, SensorSetup, TouchSensor};
use crate::constants::{SAMPLER_INTERVAL_US, SENSOR_COORDINATE_EXTENT, TOUCH_SIZE_RANGE};
use crate::control::{ControlMapper, ControlRange};
use crate::error::Error;

/// Where the sampler is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerState {
    Idle,
    Sampling,
    Publishing,
    /// [`run()`](TouchSampler::run) observed the stop flag and returned.
    Stopped,
}

/// What to do on a cycle that reports no valid vertical touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleasePolicy {
    /// Keep the previous reading unchanged (nothing is published).
    #[default]
    Hold,
    /// Publish the previous positions with size 0, silencing the voice
    /// while leaving pitch and pan where the finger left them.
    Silence,
}

/// Sampler configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerConfig {
    pub setup: SensorSetup,
    /// Largest device coordinate on either axis.
    pub coordinate_extent: u16,
    /// Raw touch-size range mapped onto `[0, 1]`.
    pub size_range: (f32, f32),
    /// Pause between cycles, in microseconds. Bounds bus load only.
    pub interval_us: u32,
    pub release: ReleasePolicy,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        SamplerConfig {
            setup: SensorSetup::default(),
            coordinate_extent: SENSOR_COORDINATE_EXTENT,
            size_range: TOUCH_SIZE_RANGE,
            interval_us: SAMPLER_INTERVAL_US,
            release: ReleasePolicy::Hold,
        }
    }
}

/// Result of a single [`poll_once()`](TouchSampler::poll_once) cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleOutcome {
    /// A new reading was written to the cell.
    Published(SensorReading),
    /// No valid touch; the previous reading stays in place.
    Held,
    /// The driver failed; the previous reading stays in place.
    ReadFailed,
}

/// Running counters, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamplerStats {
    pub cycles: u32,
    pub published: u32,
    pub held: u32,
    pub read_errors: u32,
}

/// Sum of the non-empty slots and how many there were.
#[derive(Default)]
struct Accumulator {
    location: u32,
    size: u32,
    count: u32,
}

impl Accumulator {
    fn add(&mut self, location: u16, size: u16) {
        if location != 0 {
            self.location += location as u32;
            self.size += size as u32;
            self.count += 1;
        }
    }

    /// Floored averages of location and size, or `None` without touches.
    fn average(&self) -> Option<(f32, f32)> {
        if self.count == 0 {
            return None;
        }
        Some(((self.location / self.count) as f32, (self.size / self.count) as f32))
    }
}

/// Touch sensor polling task.
///
/// # Example
/// ```ignore
/// static READING: ReadingCell = ReadingCell::new();
/// static SHOULD_STOP: StopFlag = StopFlag::new();
///
/// let mut sampler = TouchSampler::new(trill, delay, &SamplerConfig::default())?;
/// // On the low-priority task:
/// sampler.run(&READING, &SHOULD_STOP);
/// ```
pub struct TouchSampler<S, D> {
    sensor: S,
    delay: D,
    position_map: ControlMapper,
    size_map: ControlMapper,
    interval_us: u32,
    release: ReleasePolicy,
    state: SamplerState,
    last: SensorReading,
    stats: SamplerStats,
    /// Consecutive failed reads, to log only the first of a streak.
    failure_streak: u32,
}

impl<S, D> TouchSampler<S, D>
where
    S: TouchSensor,
    D: DelayNs,
{
    /// Bring the sensor up and validate the configuration.
    ///
    /// Fails with [`Error::Sensor`] if the driver rejects the setup,
    /// [`Error::UnsupportedDevice`] if it is not a square pad, and
    /// [`Error::DegenerateRange`] / [`Error::InvalidRange`] for bad ranges.
    pub fn new(mut sensor: S, delay: D, config: &SamplerConfig) -> Result<Self, Error> {
        let position_map = ControlMapper::new(
            ControlRange::new(0.0, config.coordinate_extent as f32)?,
            ControlRange::UNIT,
        )?;
        let size_map = ControlMapper::new(ControlRange::from_pair(config.size_range)?, ControlRange::UNIT)?;

        let setup = &config.setup;
        if let Err(e) = sensor.setup(setup) {
            log::error!("unable to initialise touch sensor at {:#04x}: {:?}", setup.address, e);
            return Err(Error::Sensor);
        }

        let device = sensor.device_type();
        log::info!(
            "touch sensor {:?} at {:#04x}: mode {:?}, threshold {}, prescaler {}",
            device,
            setup.address,
            setup.mode,
            setup.threshold.value(),
            setup.prescaler.value(),
        );
        if device != DeviceType::Square {
            log::error!("expected a square touch sensor, found {:?}", device);
            return Err(Error::UnsupportedDevice);
        }

        Ok(TouchSampler {
            sensor,
            delay,
            position_map,
            size_map,
            interval_us: config.interval_us,
            release: config.release,
            state: SamplerState::Idle,
            last: SensorReading::REST,
            stats: SamplerStats::default(),
            failure_streak: 0,
        })
    }

    /// Run one `Sampling → Publishing → Idle` cycle without sleeping.
    pub fn poll_once(&mut self, cell: &ReadingCell) -> CycleOutcome {
        self.state = SamplerState::Sampling;
        self.stats.cycles = self.stats.cycles.wrapping_add(1);

        if let Err(e) = self.sensor.read_locations() {
            self.failure_streak = self.failure_streak.saturating_add(1);
            self.stats.read_errors = self.stats.read_errors.wrapping_add(1);
            if self.failure_streak == 1 {
                log::warn!("touch sensor read failed, holding last reading: {:?}", e);
            }
            self.state = SamplerState::Idle;
            return CycleOutcome::ReadFailed;
        }
        if self.failure_streak > 0 {
            log::info!("touch sensor recovered after {} failed reads", self.failure_streak);
            self.failure_streak = 0;
        }

        // The sensor cannot separate simultaneous touches reliably, so
        // several touches collapse into their average.
        let mut vertical = Accumulator::default();
        for i in 0..self.sensor.number_of_touches() {
            vertical.add(self.sensor.touch_location(i), self.sensor.touch_size(i));
        }
        let mut horizontal = Accumulator::default();
        for i in 0..self.sensor.number_of_horizontal_touches() {
            horizontal.add(self.sensor.touch_horizontal_location(i), 0);
        }

        let mut next = self.last;
        match vertical.average() {
            Some((location, size)) => {
                next = next.with_vertical(self.position_map.apply(location), self.size_map.apply(size));
            }
            None if self.release == ReleasePolicy::Silence && self.last.size() > 0.0 => {
                next = next.with_size(0.0);
            }
            None => {}
        }
        if let Some((location, _)) = horizontal.average() {
            next = next.with_horizontal_position(self.position_map.apply(location));
        }

        if vertical.count == 0 && next == self.last {
            log::trace!("no touch, holding {:?}", self.last);
            self.stats.held = self.stats.held.wrapping_add(1);
            self.state = SamplerState::Idle;
            return CycleOutcome::Held;
        }

        self.state = SamplerState::Publishing;
        cell.publish(next);
        self.last = next;
        self.stats.published = self.stats.published.wrapping_add(1);
        self.state = SamplerState::Idle;
        CycleOutcome::Published(next)
    }

    /// Poll until `stop` is raised, sleeping `interval_us` between cycles.
    ///
    /// The flag is checked before every cycle and after every sleep, so the
    /// loop exits within one interval of the request. The caller joins the
    /// task before tearing down the sensor.
    pub fn run(&mut self, cell: &ReadingCell, stop: &StopFlag) {
        log::info!("touch sampler started ({} us interval)", self.interval_us);
        while !stop.should_stop() {
            self.poll_once(cell);
            if stop.should_stop() {
                break;
            }
            self.delay.delay_us(self.interval_us);
        }
        self.state = SamplerState::Stopped;
        log::info!(
            "touch sampler stopped after {} cycles ({} published, {} held, {} read errors)",
            self.stats.cycles,
            self.stats.published,
            self.stats.held,
            self.stats.read_errors,
        );
    }

    pub fn state(&self) -> SamplerState {
        self.state
    }

    /// Most recently published reading.
    pub fn last_reading(&self) -> SensorReading {
        self.last
    }

    pub fn stats(&self) -> SamplerStats {
        self.stats
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Give back the driver and delay provider.
    pub fn release(self) -> (S, D) {
        (self.sensor, self.delay)
    }
}
