//! Frame scheduling.
//!
//! Each animation layer owns a [`Ticker`] that tells it how many frames are
//! due. Layers never wait on each other: a slow scene frame does not hold the
//! stars back, and neither loop has a defined order relative to the other.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use ringlet_core::Viewport;

/// Source of monotonic time.
pub trait Clock {
    /// Time elapsed since an arbitrary, fixed epoch.
    fn now(&self) -> Duration;
}

/// Wall clock measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Something updated once per frame.
pub trait Animate {
    /// Advance by exactly one frame.
    fn frame(&mut self, viewport: Viewport);

    /// React to a new viewport size.
    fn resize(&mut self, viewport: Viewport);
}

/// Fixed-step frame scheduler.
#[derive(Debug, Clone)]
pub struct Ticker<C> {
    clock: C,
    interval: Duration,
    max_catch_up: u32,
    next_due: Duration,
}

impl<C: Clock> Ticker<C> {
    /// The first frame is due immediately.
    pub fn new(clock: C, interval: Duration, max_catch_up: u32) -> Self {
        let next_due = clock.now();
        Self {
            clock,
            interval,
            max_catch_up: max_catch_up.max(1),
            next_due,
        }
    }

    /// Ticker running at `fps` frames per second.
    pub fn from_fps(clock: C, fps: u32, max_catch_up: u32) -> Self {
        let interval = if fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(1) / fps
        };
        Self::new(clock, interval, max_catch_up)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of frames that became due since the last call.
    ///
    /// After a stall at most `max_catch_up` frames are reported and the rest
    /// are dropped, with the schedule restarting from now.
    pub fn due_frames(&mut self) -> u32 {
        if self.interval.is_zero() {
            return 1;
        }
        let now = self.clock.now();
        if now < self.next_due {
            return 0;
        }

        let elapsed = (now - self.next_due).as_nanos() / self.interval.as_nanos();
        let behind = u32::try_from(elapsed.saturating_add(1)).unwrap_or(u32::MAX);
        if behind > self.max_catch_up {
            self.next_due = now + self.interval;
            self.max_catch_up
        } else {
            self.next_due += self.interval * behind;
            behind
        }
    }

    /// Time left until the next frame is due.
    pub fn until_next(&self) -> Duration {
        self.next_due.saturating_sub(self.clock.now())
    }

    /// Run every due frame on `target`. Returns how many ran.
    pub fn run<A: Animate + ?Sized>(&mut self, target: &mut A, viewport: Viewport) -> u32 {
        let frames = self.due_frames();
        for _ in 0..frames {
            target.frame(viewport);
        }
        frames
    }
}
