//! Wall-clock sources for the playback controller.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic host time in seconds.
///
/// The controller reads this at most once per operation.
pub trait MediaClock {
    /// Current host time in seconds.
    fn now(&self) -> f64;
}

impl<C: MediaClock + ?Sized> MediaClock for &C {
    fn now(&self) -> f64 {
        (**self).now()
    }
}

impl<C: MediaClock + ?Sized> MediaClock for Rc<C> {
    fn now(&self) -> f64 {
        (**self).now()
    }
}

/// Host media time measured from the moment the clock was created.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start a clock at zero.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaClock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// A clock that only moves when told to.
///
/// Interior mutability lets a test keep a handle (`&ManualClock` or `Rc<ManualClock>`) while the
/// controller owns another.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    /// Create a clock reading `start` seconds.
    pub fn new(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Jump to an absolute time.
    pub fn set(&self, secs: f64) {
        self.now.set(secs);
    }

    /// Move forward by `secs`.
    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }
}

impl MediaClock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}
