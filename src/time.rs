//! Fixed-rate refresh clock using an accumulator pattern.
//!
//! `draw_web()` calls at roughly the display refresh rate with variable
//! delta. RefreshClock turns that into a fixed number of ticks per second so
//! presenters run at a steady rate regardless of the monitor.

pub struct RefreshClock {
    /// Milliseconds per tick (e.g. 16.67ms = 60 ticks/sec)
    ms_per_tick: f64,
    /// Accumulated milliseconds not yet consumed as ticks
    accumulator: f64,
    /// Total elapsed ticks since creation
    pub total_ticks: u64,
    /// Timestamp of the last update (ms), None if first frame
    last_timestamp: Option<f64>,
}

impl RefreshClock {
    /// `ticks_per_sec`: refresh passes per real-time second (e.g. 60).
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed a wall-clock timestamp (from `performance.now()`).
    /// Returns the number of ticks elapsed since the previous call.
    ///
    /// The first frame always yields one tick so the screen is filled
    /// before any time has passed.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => {
                let d = now_ms - prev;
                // Clamp so a backgrounded tab doesn't return thousands of ticks
                d.clamp(0.0, 500.0)
            }
            None => self.ms_per_tick,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}
