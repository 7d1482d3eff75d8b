use chrono::{DateTime, Local};

use crate::error::{EngineError, Result};
use crate::format;

/// Penalty attached to a solve after the fact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum Penalty {
    #[default]
    #[strum(serialize = "none")]
    None,
    #[strum(serialize = "+2")]
    PlusTwo,
    #[strum(serialize = "DNF")]
    DidNotFinish,
}

/// One timed attempt. The raw elapsed time never changes; only the penalty
/// can be edited.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveRecord {
    elapsed_seconds: f64,
    penalty: Penalty,
    recorded_at: DateTime<Local>,
}

impl SolveRecord {
    fn new(elapsed_seconds: f64) -> Self {
        Self {
            elapsed_seconds,
            penalty: Penalty::None,
            recorded_at: Local::now(),
        }
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    pub fn penalty(&self) -> Penalty {
        self.penalty
    }

    pub fn recorded_at(&self) -> DateTime<Local> {
        self.recorded_at
    }

    /// Time used for ranking
    pub fn effective_time(&self) -> f64 {
        match self.penalty {
            Penalty::None => self.elapsed_seconds,
            Penalty::PlusTwo => self.elapsed_seconds + 2.0,
            Penalty::DidNotFinish => f64::INFINITY,
        }
    }

    /// Raw time plus penalty annotation, e.g. `0:12.34 +2`
    pub fn display_time(&self) -> String {
        match self.penalty {
            Penalty::None => format::solve_time(self.elapsed_seconds),
            Penalty::PlusTwo => format!("{} +2", format::solve_time(self.elapsed_seconds)),
            Penalty::DidNotFinish => format::DNF.to_string(),
        }
    }
}

/// Ordered list of solves, oldest first
#[derive(Debug, Default, Clone)]
pub struct SolveSession {
    records: Vec<SolveRecord>,
}

impl SolveSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_solve(&mut self, elapsed_seconds: f64) -> Result<SolveRecord> {
        if !elapsed_seconds.is_finite() || elapsed_seconds < 0.0 {
            return Err(EngineError::InvalidArgument(format!(
                "elapsed time must be non-negative, got {elapsed_seconds}"
            )));
        }

        let record = SolveRecord::new(elapsed_seconds);
        self.records.push(record.clone());
        Ok(record)
    }

    /// Replace the penalty on the most recent solve
    pub fn set_penalty_on_last(&mut self, penalty: Penalty) -> Result<SolveRecord> {
        let last = self.records.last_mut().ok_or(EngineError::EmptySession)?;
        last.penalty = penalty;
        Ok(last.clone())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<SolveRecord> {
        if index >= self.records.len() {
            return Err(EngineError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        Ok(self.records.remove(index))
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[SolveRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&SolveRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn effective_times(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(SolveRecord::effective_time)
    }
}
