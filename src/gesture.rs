use std::time::{Duration, Instant};

pub const DEFAULT_HOLD_MS: u64 = 500;

/// What a space-bar press or release should do to the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Start,
    Stop,
    /// Released before the hold threshold; carries how long it was held
    TooShort(Duration),
    /// Key is down and being held
    Holding,
    Ignored,
}

/// Hold-to-start gesture: while idle the key must be held for `hold` and
/// then released; while running any press stops.
///
/// Terminals that do not report key releases get `release_events = false`,
/// in which case a press while idle starts straight away.
#[derive(Debug, Clone)]
pub struct HoldGesture {
    hold: Duration,
    release_events: bool,
    pressed_at: Option<Instant>,
}

impl HoldGesture {
    pub fn new(hold: Duration, release_events: bool) -> Self {
        Self {
            hold,
            release_events,
            pressed_at: None,
        }
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// `true` once the key has been held long enough to start on release
    pub fn is_armed(&self, now: Instant) -> bool {
        self.pressed_at
            .is_some_and(|at| now.saturating_duration_since(at) >= self.hold)
    }

    pub fn on_press(&mut self, now: Instant, running: bool) -> GestureOutcome {
        if running {
            self.pressed_at = None;
            return GestureOutcome::Stop;
        }
        if !self.release_events {
            return GestureOutcome::Start;
        }
        // key repeat keeps the original press instant
        if self.pressed_at.is_none() {
            self.pressed_at = Some(now);
        }
        GestureOutcome::Holding
    }

    pub fn on_release(&mut self, now: Instant, running: bool) -> GestureOutcome {
        let Some(pressed_at) = self.pressed_at.take() else {
            return GestureOutcome::Ignored;
        };
        if running {
            return GestureOutcome::Ignored;
        }

        let held = now.saturating_duration_since(pressed_at);
        if held >= self.hold {
            GestureOutcome::Start
        } else {
            GestureOutcome::TooShort(held)
        }
    }
}

impl Default for HoldGesture {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_HOLD_MS), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_hold_starts_on_release() {
        let t0 = Instant::now();
        let mut gesture = HoldGesture::default();

        assert_eq!(gesture.on_press(t0, false), GestureOutcome::Holding);
        assert!(!gesture.is_armed(t0 + Duration::from_millis(100)));
        assert!(gesture.is_armed(t0 + Duration::from_millis(500)));
        assert_eq!(
            gesture.on_release(t0 + Duration::from_millis(600), false),
            GestureOutcome::Start
        );
        assert!(!gesture.is_pressed());
    }

    #[test]
    fn short_hold_reports_duration() {
        let t0 = Instant::now();
        let mut gesture = HoldGesture::default();
        gesture.on_press(t0, false);

        assert_eq!(
            gesture.on_release(t0 + Duration::from_millis(200), false),
            GestureOutcome::TooShort(Duration::from_millis(200))
        );
    }

    #[test]
    fn repeats_do_not_restart_the_hold() {
        let t0 = Instant::now();
        let mut gesture = HoldGesture::default();
        gesture.on_press(t0, false);
        gesture.on_press(t0 + Duration::from_millis(300), false);

        assert_eq!(
            gesture.on_release(t0 + Duration::from_millis(550), false),
            GestureOutcome::Start
        );
    }

    #[test]
    fn press_while_running_stops() {
        let t0 = Instant::now();
        let mut gesture = HoldGesture::default();
        assert_eq!(gesture.on_press(t0, true), GestureOutcome::Stop);
        // the matching release must not immediately re-arm
        assert_eq!(gesture.on_release(t0, false), GestureOutcome::Ignored);
    }

    #[test]
    fn without_release_events_press_starts() {
        let mut gesture = HoldGesture::new(Duration::from_millis(500), false);
        assert_eq!(gesture.on_press(Instant::now(), false), GestureOutcome::Start);
        assert_eq!(gesture.on_press(Instant::now(), true), GestureOutcome::Stop);
    }
}
