/// Source of simulated time, in nanoseconds.
pub trait Clock {
    fn now(&self) -> u64;
    fn advance(&mut self, ns: u64);
}

/// Monotonic clock advanced only by the simulated hardware.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    now_ns: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.now_ns = 0;
    }
}

impl Clock for SimClock {
    #[inline(always)]
    fn now(&self) -> u64 {
        self.now_ns
    }

    #[inline(always)]
    fn advance(&mut self, ns: u64) {
        self.now_ns += ns;
    }
}
