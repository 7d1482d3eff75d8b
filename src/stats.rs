use crate::format;
use crate::session::SolveSession;
use crate::util::{finite, mean, std_dev};

/// Session aggregates, recomputed from scratch after every mutation.
///
/// `worst` is `Some(f64::INFINITY)` as soon as any solve is a DNF; `best`,
/// `average` and `std_dev` only ever look at finite effective times.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AggregateSnapshot {
    pub best: Option<f64>,
    pub worst: Option<f64>,
    pub average: Option<f64>,
    pub std_dev: Option<f64>,
    pub count: usize,
    pub dnf_count: usize,
}

impl AggregateSnapshot {
    pub fn compute(session: &SolveSession) -> Self {
        let effective: Vec<f64> = session.effective_times().collect();
        let valid = finite(effective.iter().copied());

        let best = valid.iter().copied().reduce(f64::min);
        let worst = effective.iter().copied().reduce(f64::max);

        Self {
            best,
            worst,
            average: mean(&valid),
            std_dev: std_dev(&valid),
            count: effective.len(),
            dnf_count: effective.len() - valid.len(),
        }
    }

    pub fn worst_is_dnf(&self) -> bool {
        self.worst.is_some_and(f64::is_infinite)
    }

    pub fn best_display(&self) -> String {
        format::stat(self.best)
    }

    pub fn worst_display(&self) -> String {
        format::stat(self.worst)
    }

    pub fn average_display(&self) -> String {
        format::stat(self.average)
    }
}
