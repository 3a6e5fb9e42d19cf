use std::time::Duration;

/// Delay for the sensor task on a host thread. The sampler only needs
/// `embedded_hal::delay::DelayNs`; on the board this is a timer or spin loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleep;

impl embedded_hal::delay::DelayNs for ThreadSleep {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(u64::from(us)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
