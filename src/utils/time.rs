use std::time::{Duration, Instant};

/// Time values handed to the controller for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTick {
    /// Seconds since the clock started.
    pub time: f32,
    /// Seconds since the previous tick.
    pub delta: f32,
    /// 1-based frame number.
    pub frame: u64,
}

/// Frame clock for hosts that do not already track animation time.
///
/// A wall-clock instance reads `Instant::now()` on every [`tick`]; a manual
/// instance only moves when [`advance`] is called, which keeps tests and
/// offline rendering deterministic.
///
/// [`tick`]: FrameClock::tick
/// [`advance`]: FrameClock::advance
#[derive(Debug, Clone)]
pub struct FrameClock {
    start_time: Option<Instant>,
    last_update: Option<Instant>,
    /// Time since last tick
    pub delta: Duration,
    /// Total elapsed time since creation
    pub elapsed: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Creates a wall-clock timer starting from now.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: Some(now),
            last_update: Some(now),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Creates a clock that only advances through [`FrameClock::advance`].
    #[must_use]
    pub fn manual() -> Self {
        Self {
            start_time: None,
            last_update: None,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Samples the wall clock. On a manual clock this is a zero-length frame.
    pub fn tick(&mut self) -> FrameTick {
        match (self.start_time, self.last_update) {
            (Some(start), Some(last)) => {
                let now = Instant::now();
                self.delta = now - last;
                self.elapsed = now - start;
                self.last_update = Some(now);
                self.frame_count += 1;
                self.current()
            }
            _ => self.advance(0.0),
        }
    }

    /// Moves the clock forward by `seconds`. Negative, non-finite and
    /// unrepresentably large values produce a zero-length frame.
    pub fn advance(&mut self, seconds: f32) -> FrameTick {
        self.delta = Duration::try_from_secs_f32(seconds).unwrap_or(Duration::ZERO);
        self.elapsed = self.elapsed.saturating_add(self.delta);
        self.frame_count += 1;
        self.current()
    }

    /// The most recent tick, without advancing.
    #[must_use]
    pub fn current(&self) -> FrameTick {
        FrameTick {
            time: self.elapsed.as_secs_f32(),
            delta: self.delta.as_secs_f32(),
            frame: self.frame_count,
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}
