//! Fixed-cadence timer for passive energy generation.
//!
//! `draw_web()` calls at ~60fps with variable delta. `AutoGenTimer` turns
//! wall-clock timestamps into whole elapsed intervals using an accumulator,
//! so the generation rule itself stays deterministic and testable.
//!
//! The timer is owned by the engine's lifecycle: it does nothing until
//! [`start`](AutoGenTimer::start) and nothing after [`stop`](AutoGenTimer::stop).
//! Each frame's delta is clamped to one interval, so a backgrounded tab
//! never comes back to a backlog of ticks.

pub struct AutoGenTimer {
    /// Milliseconds per interval (1000 = once a second)
    interval_ms: f64,
    /// Accumulated milliseconds not yet consumed as intervals
    accumulator: f64,
    /// Total intervals fired since the last start
    pub total_ticks: u64,
    /// Timestamp of the last update (ms), None until the first frame after start
    last_timestamp: Option<f64>,
    running: bool,
}

impl AutoGenTimer {
    /// Create a stopped timer firing every `interval_ms` once started.
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
            running: false,
        }
    }

    pub fn start(&mut self, now_ms: f64) {
        self.accumulator = 0.0;
        self.total_ticks = 0;
        self.last_timestamp = Some(now_ms);
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
        self.last_timestamp = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feed wall-clock timestamp (from `performance.now()` or similar).
    /// Returns the number of intervals that elapsed since the previous call.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        if !self.running {
            return 0;
        }
        let delta = match self.last_timestamp {
            // Clamp so a stalled host fires at most one catch-up interval
            Some(prev) => (now_ms - prev).clamp(0.0, self.interval_ms),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.interval_ms) as u32;
        self.accumulator -= ticks as f64 * self.interval_ms;
        self.total_ticks += ticks as u64;
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_timer_never_fires() {
        let mut timer = AutoGenTimer::new(1000.0);
        assert!(!timer.is_running());
        assert_eq!(timer.update(0.0), 0);
        assert_eq!(timer.update(5000.0), 0);
        assert_eq!(timer.total_ticks, 0);
    }

    #[test]
    fn one_tick_per_second() {
        let mut timer = AutoGenTimer::new(1000.0);
        timer.start(0.0);
        assert_eq!(timer.update(999.0), 0);
        assert_eq!(timer.update(1000.0), 1);
        assert_eq!(timer.total_ticks, 1);
    }

    #[test]
    fn remainder_carried_over() {
        let mut timer = AutoGenTimer::new(1000.0);
        timer.start(0.0);
        assert_eq!(timer.update(600.0), 0);
        assert_eq!(timer.update(1200.0), 1); // 600 + 600 = 1200 → 1 tick, 200 left
        assert_eq!(timer.update(2000.0), 1); // 200 + 800
        assert_eq!(timer.total_ticks, 2);
    }

    #[test]
    fn stall_does_not_build_backlog() {
        let mut timer = AutoGenTimer::new(1000.0);
        timer.start(0.0);
        // Tab backgrounded for a minute → a single interval
        assert_eq!(timer.update(60_000.0), 1);
        assert_eq!(timer.update(60_016.0), 0);
    }

    #[test]
    fn steady_60fps_for_three_seconds() {
        let mut timer = AutoGenTimer::new(1000.0);
        timer.start(0.0);
        let mut total = 0u32;
        for i in 1..=180 {
            total += timer.update(i as f64 * 16.667);
        }
        assert!((2..=3).contains(&total), "expected ~3 ticks, got {}", total);
    }

    #[test]
    fn stop_then_restart_discards_partial_interval() {
        let mut timer = AutoGenTimer::new(1000.0);
        timer.start(0.0);
        timer.update(900.0);
        timer.stop();
        assert_eq!(timer.update(1500.0), 0);

        timer.start(2000.0);
        assert_eq!(timer.update(2500.0), 0);
        assert_eq!(timer.update(3000.0), 1);
    }

    #[test]
    fn clock_going_backwards_is_ignored() {
        let mut timer = AutoGenTimer::new(1000.0);
        timer.start(5000.0);
        assert_eq!(timer.update(4000.0), 0);
        assert_eq!(timer.update(5000.0), 1);
    }
}
