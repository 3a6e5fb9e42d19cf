//! Normalised sensor reading and the lock-free cell that carries it from the
//! sampler task to the audio callback.
//!
//! # Contract
//!
//! - Only ONE context may call [`ReadingCell::publish()`] (the sampler).
//! - Only ONE context may call [`ReadingCell::load()`] (the render loop).
//!
//! Each field is an independent atomic, so a load racing a publish can see
//! a mix of old and new fields (a torn read). Every field is individually
//! valid and independently smoothed downstream, and the next load corrects
//! the mix, so no multi-field atomicity is provided. Neither side ever
//! blocks.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::control::constrain;

/// Touch position and size, each normalised to `[0, 1]`.
///
/// The constructor clamps (NaN becomes 0), so a `SensorReading` can never
/// carry an out-of-range value into the render loop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorReading {
    horizontal_position: f32,
    vertical_position: f32,
    size: f32,
}

impl SensorReading {
    /// All-zero reading: bottom-left, no pressure.
    pub const REST: SensorReading = SensorReading {
        horizontal_position: 0.0,
        vertical_position: 0.0,
        size: 0.0,
    };

    pub fn new(horizontal_position: f32, vertical_position: f32, size: f32) -> Self {
        SensorReading {
            horizontal_position: constrain(horizontal_position, 0.0, 1.0),
            vertical_position: constrain(vertical_position, 0.0, 1.0),
            size: constrain(size, 0.0, 1.0),
        }
    }

    pub fn horizontal_position(&self) -> f32 {
        self.horizontal_position
    }

    pub fn vertical_position(&self) -> f32 {
        self.vertical_position
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Copy with a new horizontal position.
    pub fn with_horizontal_position(self, value: f32) -> Self {
        Self::new(value, self.vertical_position, self.size)
    }

    /// Copy with new vertical position and size.
    pub fn with_vertical(self, position: f32, size: f32) -> Self {
        Self::new(self.horizontal_position, position, size)
    }

    /// Copy with a new size.
    pub fn with_size(self, size: f32) -> Self {
        Self::new(self.horizontal_position, self.vertical_position, size)
    }
}

/// Single-producer single-consumer snapshot of the latest [`SensorReading`].
///
/// Fields are stored as `f32` bit patterns in `AtomicU32`s. A publish counter
/// lets observers tell fresh data from a held value.
pub struct ReadingCell {
    horizontal: AtomicU32,
    vertical: AtomicU32,
    size: AtomicU32,
    /// Number of completed publishes (wraps).
    version: AtomicU32,
}

impl ReadingCell {
    /// Create a cell holding [`SensorReading::REST`].
    pub const fn new() -> Self {
        // 0u32 is the bit pattern of 0.0f32.
        ReadingCell {
            horizontal: AtomicU32::new(0),
            vertical: AtomicU32::new(0),
            size: AtomicU32::new(0),
            version: AtomicU32::new(0),
        }
    }

    /// Create a cell pre-loaded with `reading` (version stays 0).
    pub fn with_reading(reading: SensorReading) -> Self {
        let cell = Self::new();
        cell.store_fields(reading);
        cell
    }

    fn store_fields(&self, reading: SensorReading) {
        self.horizontal.store(reading.horizontal_position.to_bits(), Ordering::Relaxed);
        self.vertical.store(reading.vertical_position.to_bits(), Ordering::Relaxed);
        self.size.store(reading.size.to_bits(), Ordering::Relaxed);
    }

    /// Publish a new reading (producer side). Never blocks.
    pub fn publish(&self, reading: SensorReading) {
        self.store_fields(reading);
        // Release: field stores become visible no later than the new version.
        self.version.fetch_add(1, Ordering::Release);
    }

    /// Load the most recent reading (consumer side). Never blocks; may be torn.
    #[inline]
    pub fn load(&self) -> SensorReading {
        self.snapshot().1
    }

    /// Load the reading together with the publish counter observed before it.
    #[inline]
    pub fn snapshot(&self) -> (u32, SensorReading) {
        let version = self.version.load(Ordering::Acquire);
        // Fields were clamped before being stored; no need to clamp again.
        let reading = SensorReading {
            horizontal_position: f32::from_bits(self.horizontal.load(Ordering::Relaxed)),
            vertical_position: f32::from_bits(self.vertical.load(Ordering::Relaxed)),
            size: f32::from_bits(self.size.load(Ordering::Relaxed)),
        };
        (version, reading)
    }

    /// Number of publishes so far.
    pub fn version(&self) -> u32 {
        self.version.load(Ordering::Acquire)
    }
}

impl Default for ReadingCell {
    fn default() -> Self {
        Self::new()
    }
}
