use std::sync::atomic::{AtomicBool, Ordering};

/// One-shot cooperative stop flag shared by all workers.
#[derive(Debug, Default)]
pub struct StopController {
    stopped: AtomicBool,
}

impl StopController {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stopped: AtomicBool::new(false),
        }
    }

    /// Signals every worker to skip its next request. Returns `true` only for
    /// the call that actually flipped the flag.
    pub fn stop(&self) -> bool {
        self.stopped
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}
