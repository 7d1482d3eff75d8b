use std::time::{Duration, Instant};

pub const DEFAULT_INSPECTION_SECS: u64 = 15;
const WARNING_SECS: u64 = 8;

/// What the inspection readout should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectionState {
    Inactive,
    Counting { remaining_secs: u64, warning: bool },
    Ready,
}

/// Pre-solve inspection countdown. Purely a host concern: it never touches
/// the engine, and starting the timer simply cancels it.
#[derive(Debug, Clone)]
pub struct Inspection {
    duration: Duration,
    started_at: Option<Instant>,
}

impl Inspection {
    pub fn new(secs: u64) -> Self {
        Self {
            duration: Duration::from_secs(secs),
            started_at: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
    }

    pub fn cancel(&mut self) {
        self.started_at = None;
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn state(&self, now: Instant) -> InspectionState {
        let Some(started_at) = self.started_at else {
            return InspectionState::Inactive;
        };

        let elapsed = now.saturating_duration_since(started_at);
        if elapsed >= self.duration {
            return InspectionState::Ready;
        }

        // whole seconds left, counting down from the full duration
        let remaining_secs = self.duration.as_secs() - elapsed.as_secs();
        InspectionState::Counting {
            remaining_secs,
            warning: remaining_secs <= WARNING_SECS,
        }
    }

    pub fn label(&self, now: Instant) -> String {
        match self.state(now) {
            InspectionState::Inactive => String::new(),
            InspectionState::Counting { remaining_secs, .. } => {
                format!("Inspection: {remaining_secs}s")
            }
            InspectionState::Ready => "Ready!".to_string(),
        }
    }
}

impl Default for Inspection {
    fn default() -> Self {
        Self::new(DEFAULT_INSPECTION_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_until_started() {
        let inspection = Inspection::default();
        assert_eq!(inspection.state(Instant::now()), InspectionState::Inactive);
        assert_eq!(inspection.label(Instant::now()), "");
    }

    #[test]
    fn counts_down_and_warns() {
        let t0 = Instant::now();
        let mut inspection = Inspection::default();
        inspection.start(t0);

        assert_eq!(
            inspection.state(t0),
            InspectionState::Counting {
                remaining_secs: 15,
                warning: false
            }
        );
        assert_eq!(inspection.label(t0 + Duration::from_millis(1500)), "Inspection: 14s");
        assert_eq!(
            inspection.state(t0 + Duration::from_secs(7)),
            InspectionState::Counting {
                remaining_secs: 8,
                warning: true
            }
        );
    }

    #[test]
    fn ready_at_zero_and_cancellable() {
        let t0 = Instant::now();
        let mut inspection = Inspection::new(2);
        inspection.start(t0);

        assert_eq!(inspection.state(t0 + Duration::from_secs(2)), InspectionState::Ready);
        assert_eq!(inspection.label(t0 + Duration::from_secs(3)), "Ready!");

        inspection.cancel();
        assert!(!inspection.is_active());
        assert_eq!(inspection.state(t0), InspectionState::Inactive);
    }
}
