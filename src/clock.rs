use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

const IDLE: u64 = u64::MAX;

/// Whether the clock is currently measuring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Idle,
    Running,
}

/// Start/stop stopwatch over the monotonic clock.
///
/// Instants are stored as nanosecond offsets from a per-clock origin so that
/// `elapsed_seconds` is a pair of atomic loads: a polling thread can read the
/// clock through an `Arc` while another thread drives start/stop.
#[derive(Debug)]
pub struct TimingClock {
    origin: Instant,
    /// offset of the running measurement's start, or `IDLE`
    started_at: AtomicU64,
    /// last stopped elapsed value, in nanoseconds
    last_elapsed: AtomicU64,
}

impl TimingClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            started_at: AtomicU64::new(IDLE),
            last_elapsed: AtomicU64::new(0),
        }
    }

    fn now_offset(&self) -> u64 {
        // u64 nanoseconds covers centuries of uptime
        (self.origin.elapsed().as_nanos() as u64).min(IDLE - 1)
    }

    pub fn state(&self) -> ClockState {
        if self.started_at.load(Ordering::Acquire) == IDLE {
            ClockState::Idle
        } else {
            ClockState::Running
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == ClockState::Running
    }

    /// Begin measuring. A second start while running keeps the first instant.
    pub fn start(&self) {
        let now = self.now_offset();
        let _ = self
            .started_at
            .compare_exchange(IDLE, now, Ordering::AcqRel, Ordering::Acquire);
    }

    /// Finish measuring and return the elapsed seconds, or 0 when idle.
    pub fn stop(&self) -> f64 {
        self.finish().unwrap_or(0.0)
    }

    /// Stop in one atomic step; `None` when nothing was running.
    pub(crate) fn finish(&self) -> Option<f64> {
        let now = self.now_offset();
        let started = self.started_at.swap(IDLE, Ordering::AcqRel);
        if started == IDLE {
            return None;
        }

        let elapsed = now.saturating_sub(started);
        self.last_elapsed.store(elapsed, Ordering::Release);
        Some(nanos_to_secs(elapsed))
    }

    /// Force idle and forget any measurement, running or finished.
    pub fn reset(&self) {
        self.started_at.store(IDLE, Ordering::Release);
        self.last_elapsed.store(0, Ordering::Release);
    }

    /// Live reading while running, otherwise the last stopped value.
    pub fn elapsed_seconds(&self) -> f64 {
        match self.started_at.load(Ordering::Acquire) {
            IDLE => nanos_to_secs(self.last_elapsed.load(Ordering::Acquire)),
            started => nanos_to_secs(self.now_offset().saturating_sub(started)),
        }
    }
}

impl Default for TimingClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of a clock owned elsewhere.
///
/// Display threads poll through this while the owner keeps start/stop behind
/// its own lock.
#[derive(Debug, Clone)]
pub struct ClockProbe(Arc<TimingClock>);

impl ClockProbe {
    pub(crate) fn new(clock: Arc<TimingClock>) -> Self {
        Self(clock)
    }

    pub fn state(&self) -> ClockState {
        self.0.state()
    }

    pub fn is_running(&self) -> bool {
        self.0.is_running()
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.0.elapsed_seconds()
    }
}

fn nanos_to_secs(nanos: u64) -> f64 {
    nanos as f64 / 1_000_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn starts_idle_at_zero() {
        let clock = TimingClock::new();
        assert_eq!(clock.state(), ClockState::Idle);
        assert_eq!(clock.elapsed_seconds(), 0.0);
    }

    #[test]
    fn stop_when_idle_is_noop() {
        let clock = TimingClock::new();
        assert_eq!(clock.stop(), 0.0);
        assert_eq!(clock.state(), ClockState::Idle);
    }

    #[test]
    fn measures_elapsed_time() {
        let clock = TimingClock::new();
        clock.start();
        assert!(clock.is_running());
        thread::sleep(Duration::from_millis(50));

        let elapsed = clock.stop();
        assert!(elapsed >= 0.05, "elapsed was {elapsed}");
        assert!(!clock.is_running());
        assert_eq!(clock.elapsed_seconds(), elapsed);
    }

    #[test]
    fn double_start_keeps_first_instant() {
        let clock = TimingClock::new();
        clock.start();
        thread::sleep(Duration::from_millis(60));
        clock.start();
        thread::sleep(Duration::from_millis(10));

        let elapsed = clock.stop();
        assert!(elapsed >= 0.07, "elapsed was {elapsed}");
    }

    #[test]
    fn polling_has_no_side_effects() {
        let clock = TimingClock::new();
        clock.start();
        let a = clock.elapsed_seconds();
        thread::sleep(Duration::from_millis(5));
        let b = clock.elapsed_seconds();
        assert!(b >= a);
        assert!(clock.is_running());
    }

    #[test]
    fn finish_reports_idle_as_none() {
        let clock = TimingClock::new();
        assert_eq!(clock.finish(), None);
        clock.start();
        assert!(clock.finish().is_some());
        assert_eq!(clock.finish(), None);
    }

    #[test]
    fn probe_follows_owner() {
        let clock = Arc::new(TimingClock::new());
        let probe = ClockProbe::new(Arc::clone(&clock));
        assert_eq!(probe.state(), ClockState::Idle);

        clock.start();
        thread::sleep(Duration::from_millis(5));
        assert!(probe.is_running());
        assert!(probe.elapsed_seconds() > 0.0);

        let elapsed = clock.stop();
        assert_eq!(probe.state(), ClockState::Idle);
        assert_eq!(probe.elapsed_seconds(), elapsed);
    }

    #[test]
    fn reset_discards_measurement() {
        let clock = TimingClock::new();
        clock.start();
        thread::sleep(Duration::from_millis(5));
        clock.stop();
        assert!(clock.elapsed_seconds() > 0.0);

        clock.reset();
        assert_eq!(clock.elapsed_seconds(), 0.0);

        clock.start();
        clock.reset();
        assert_eq!(clock.state(), ClockState::Idle);
        assert_eq!(clock.elapsed_seconds(), 0.0);
        assert_eq!(clock.stop(), 0.0);
    }
}
