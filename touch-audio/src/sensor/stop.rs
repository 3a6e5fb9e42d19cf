use core::sync::atomic::{AtomicBool, Ordering};

/// Process-wide cooperative stop request.
///
/// Polled (never awaited) by the sampler loop between cycles. Typically a
/// `static`, set from a signal handler or the host's shutdown path.
///
/// ```
/// use touch_audio::sensor::StopFlag;
///
/// static SHOULD_STOP: StopFlag = StopFlag::new();
/// assert!(!SHOULD_STOP.should_stop());
/// SHOULD_STOP.request_stop();
/// assert!(SHOULD_STOP.should_stop());
/// ```
#[derive(Debug, Default)]
pub struct StopFlag(AtomicBool);

impl StopFlag {
    pub const fn new() -> Self {
        StopFlag(AtomicBool::new(false))
    }

    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn should_stop(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Re-arm for another run.
    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }
}
