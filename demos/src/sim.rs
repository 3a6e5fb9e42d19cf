//! Simulated two-dimensional touch pad.
//!
//! A single finger repeats a four-second gesture: it lands at the bottom of
//! the pad, slides to the top and back down while swaying left and right,
//! pressing hardest in the middle, then lifts for one second.

use core::convert::Infallible;
use core::f32::consts::PI;
use std::time::Instant;

use touch_audio::constants::SENSOR_COORDINATE_EXTENT;
use touch_audio::sensor::{DeviceType, SensorSetup, TouchSensor};

/// Length of one full gesture, in seconds.
pub const GESTURE_PERIOD: f32 = 4.0;
/// Part of each gesture during which the finger is down.
pub const TOUCH_DURATION: f32 = 3.0;
/// Period of the left/right sway, in seconds.
const SWAY_PERIOD: f32 = 1.5;
const SIZE_RANGE: (f32, f32) = (500.0, 6000.0);

/// One finger, in device units. Locations start at 1; 0 marks an empty slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub location: u16,
    pub size: u16,
    pub horizontal: u16,
}

/// Where the finger is `t` seconds into the gesture loop, or `None` while
/// it is lifted.
pub fn gesture(t: f32, extent: u16) -> Option<Contact> {
    let t = t.rem_euclid(GESTURE_PERIOD);
    if !(0.0..TOUCH_DURATION).contains(&t) {
        return None;
    }
    let progress = t / TOUCH_DURATION;
    let rise_and_fall = 1.0 - (2.0 * progress - 1.0).abs();
    let sway = 0.5 + 0.5 * (2.0 * PI * t / SWAY_PERIOD).sin();
    let press = (PI * progress).sin().max(0.0);

    let span = f32::from(extent.saturating_sub(1));
    let to_units = |x: f32| 1 + (span * x).round() as u16;
    Some(Contact {
        location: to_units(rise_and_fall),
        size: (SIZE_RANGE.0 + (SIZE_RANGE.1 - SIZE_RANGE.0) * press).round() as u16,
        horizontal: to_units(sway),
    })
}

#[derive(Debug, Clone, Copy)]
pub enum Clock {
    /// Real time since the pad was created.
    Wall(Instant),
    /// Advances by a fixed step on every read, for reproducible runs.
    Stepped { now: f32, step: f32 },
}

impl Clock {
    fn tick(&mut self) -> f32 {
        match self {
            Clock::Wall(start) => start.elapsed().as_secs_f32(),
            Clock::Stepped { now, step } => {
                let t = *now;
                *now += *step;
                t
            }
        }
    }
}

/// [`TouchSensor`] that reports [`gesture`] positions instead of talking
/// to hardware. Never fails.
#[derive(Debug, Clone)]
pub struct SimulatedPad {
    extent: u16,
    clock: Clock,
    contact: Option<Contact>,
    setup: Option<SensorSetup>,
    reads: u64,
}

impl SimulatedPad {
    pub fn new(clock: Clock) -> Self {
        SimulatedPad {
            extent: SENSOR_COORDINATE_EXTENT,
            clock,
            contact: None,
            setup: None,
            reads: 0,
        }
    }

    pub fn wall_clock() -> Self {
        Self::new(Clock::Wall(Instant::now()))
    }

    pub fn stepped(step: f32) -> Self {
        Self::new(Clock::Stepped { now: 0.0, step })
    }

    /// Configuration received through [`TouchSensor::setup`].
    pub fn applied_setup(&self) -> Option<&SensorSetup> {
        self.setup.as_ref()
    }

    pub fn reads(&self) -> u64 {
        self.reads
    }
}

impl TouchSensor for SimulatedPad {
    type Error = Infallible;

    fn setup(&mut self, setup: &SensorSetup) -> Result<(), Infallible> {
        log::debug!(
            "simulated pad at {:#04x}: {:?}, threshold {}, prescaler {}",
            setup.address,
            setup.mode,
            setup.threshold.value(),
            setup.prescaler.value()
        );
        self.setup = Some(*setup);
        Ok(())
    }

    fn device_type(&self) -> DeviceType {
        DeviceType::Square
    }

    fn read_locations(&mut self) -> Result<(), Infallible> {
        self.reads += 1;
        self.contact = gesture(self.clock.tick(), self.extent);
        Ok(())
    }

    fn number_of_touches(&self) -> usize {
        usize::from(self.contact.is_some())
    }

    fn touch_location(&self, index: usize) -> u16 {
        match self.contact {
            Some(c) if index == 0 => c.location,
            _ => 0,
        }
    }

    fn touch_size(&self, index: usize) -> u16 {
        match self.contact {
            Some(c) if index == 0 => c.size,
            _ => 0,
        }
    }

    fn number_of_horizontal_touches(&self) -> usize {
        usize::from(self.contact.is_some())
    }

    fn touch_horizontal_location(&self, index: usize) -> u16 {
        match self.contact {
            Some(c) if index == 0 => c.horizontal,
            _ => 0,
        }
    }
}
