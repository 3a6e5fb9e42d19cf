//! Touch sensor acquisition.
//!
//! The sensor driver itself is an external collaborator described by the
//! [`TouchSensor`] trait. This module turns its raw, integer, multi-touch
//! report into a single normalised [`SensorReading`] and hands it to the
//! audio path through a [`ReadingCell`].
//!
//! ## Components
//!
//! | Item | Context | Description |
//! |------|---------|-------------|
//! | [`TouchSensor`] | sampler | Polling API of the sensor driver |
//! | [`SensorSetup`] | setup | Address, scan mode, threshold and prescaler |
//! | [`TouchSampler`] | sampler | Periodic poll → average → map → publish loop |
//! | [`ReadingCell`] | both | Lock-free single-writer/single-reader snapshot |
//! | [`StopFlag`] | both | Cooperative cancellation for the sampler loop |
//!
//! [`TouchSampler`] needs the `sampler` feature (on by default), which pulls
//! in `embedded-hal` for its injected [`DelayNs`](embedded_hal::delay::DelayNs).

mod reading;
mod stop;

#[cfg(feature = "sampler")]
mod sampler;

pub use reading::{ReadingCell, SensorReading};
pub use stop::StopFlag;

#[cfg(feature = "sampler")]
pub use sampler::{CycleOutcome, ReleasePolicy, SamplerConfig, SamplerState, SamplerStats, TouchSampler};

use crate::constants::SENSOR_DEFAULT_ADDRESS;

/// Device family reported by the sensor after setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Unknown,
    Bar,
    /// Two-dimensional square pad; the only device [`TouchSampler`] accepts.
    Square,
    Craft,
    Ring,
    Hex,
    Flex,
}

/// Scan mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorMode {
    /// Centroid detection: the device reports touch locations and sizes.
    #[default]
    Normal,
    Raw,
    Baseline,
    Differential,
}

/// Noise threshold below which a channel reading is ignored by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Threshold {
    Off,
    T10,
    T20,
    T30,
    T40,
    T50,
    #[default]
    T60,
}

impl Threshold {
    /// Register value sent to the device.
    pub const fn value(self) -> u8 {
        match self {
            Threshold::Off => 0,
            Threshold::T10 => 10,
            Threshold::T20 => 20,
            Threshold::T30 => 30,
            Threshold::T40 => 40,
            Threshold::T50 => 50,
            Threshold::T60 => 60,
        }
    }
}

/// Capacitive scan prescaler; higher values suit larger electrodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Prescaler {
    #[default]
    P1,
    P2,
    P4,
    P8,
    P16,
    P32,
}

impl Prescaler {
    pub const fn value(self) -> u8 {
        match self {
            Prescaler::P1 => 1,
            Prescaler::P2 => 2,
            Prescaler::P4 => 4,
            Prescaler::P8 => 8,
            Prescaler::P16 => 16,
            Prescaler::P32 => 32,
        }
    }
}

/// Sensor bring-up parameters, resolved once at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorSetup {
    /// 7-bit bus address.
    pub address: u8,
    pub mode: SensorMode,
    pub threshold: Threshold,
    pub prescaler: Prescaler,
}

impl Default for SensorSetup {
    fn default() -> Self {
        SensorSetup {
            address: SENSOR_DEFAULT_ADDRESS,
            mode: SensorMode::Normal,
            threshold: Threshold::T60,
            prescaler: Prescaler::P1,
        }
    }
}

/// Polling API of a multi-touch capacitive sensor driver.
///
/// Locations are integers in the device coordinate space
/// (`0..=`[`SENSOR_COORDINATE_EXTENT`](crate::constants::SENSOR_COORDINATE_EXTENT));
/// a location of `0` marks an empty slot, not a touch at the edge.
/// Accessors read the report cached by the last successful
/// [`read_locations()`](Self::read_locations).
pub trait TouchSensor {
    /// Driver error type (bus failures and the like).
    type Error: core::fmt::Debug;

    /// Configure the device. Called once, before any polling.
    fn setup(&mut self, setup: &SensorSetup) -> Result<(), Self::Error>;

    /// Device family detected during setup.
    fn device_type(&self) -> DeviceType;

    /// Fetch a fresh report from the device.
    fn read_locations(&mut self) -> Result<(), Self::Error>;

    /// Number of vertical touch slots in the last report.
    fn number_of_touches(&self) -> usize;

    fn touch_location(&self, index: usize) -> u16;

    fn touch_size(&self, index: usize) -> u16;

    /// Number of horizontal touch slots in the last report.
    fn number_of_horizontal_touches(&self) -> usize;

    fn touch_horizontal_location(&self, index: usize) -> u16;
}
