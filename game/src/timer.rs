use std::time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Accumulates elapsed time while running. Stopping pauses it, starting again resumes.
#[derive(Debug)]
pub struct Stopwatch<C> {
    clock: C,
    elapsed: Duration,
    started_at: Option<Instant>,
}

impl<C: Clock> Stopwatch<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            elapsed: Duration::ZERO,
            started_at: None,
        }
    }

    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(self.clock.now());
        }
    }

    pub fn stop(&mut self) {
        if let Some(started_at) = self.started_at.take() {
            self.elapsed += self.clock.now().saturating_duration_since(started_at);
        }
    }

    pub fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
        self.started_at = Some(self.clock.now());
    }

    pub fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(started_at) => {
                self.elapsed + self.clock.now().saturating_duration_since(started_at)
            }
            None => self.elapsed,
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{
        cell::Cell,
        rc::Rc,
        time::{Duration, Instant},
    };

    use super::Clock;

    /// Clock that only moves when told to. Clones share the same time.
    #[derive(Clone, Debug)]
    pub struct ManualClock {
        now: Rc<Cell<Instant>>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self {
                now: Rc::new(Cell::new(Instant::now())),
            }
        }

        pub fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.now.get()
        }
    }
}
