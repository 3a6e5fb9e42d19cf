/// Default audio sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;

/// Native coordinate extent of the square touch sensor (both axes).
pub const SENSOR_COORDINATE_EXTENT: u16 = 1792;

/// Raw touch-size range remapped onto `[0, 1]`.
pub const TOUCH_SIZE_RANGE: (f32, f32) = (500.0, 6000.0);

/// Oscillator frequency range driven by the vertical position, in Hz.
pub const FREQUENCY_RANGE: (f32, f32) = (200.0, 1500.0);

/// Cutoff of the parameter smoothing filters, in Hz.
pub const SMOOTHING_CUTOFF_HZ: f32 = 1.0;

/// Pause between two sensor polling cycles, in microseconds.
pub const SAMPLER_INTERVAL_US: u32 = 5_000;

/// Default I2C address of the square touch sensor.
pub const SENSOR_DEFAULT_ADDRESS: u8 = 0x18;
