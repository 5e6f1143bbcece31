// Time source for the automatic-focus debounce, injectable for tests

use std::time::Instant;

/// Monotonic time source consulted by the classifier.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Clock backed by [`Instant::now`], used outside of tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Clock;
    use std::cell::Cell;
    use std::time::{Duration, Instant};

    /// Clock that only moves when told to.
    pub(crate) struct ManualClock {
        now: Cell<Instant>,
    }

    impl ManualClock {
        pub(crate) fn new(start: Instant) -> Self {
            Self {
                now: Cell::new(start),
            }
        }

        pub(crate) fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.now.get()
        }
    }
}
