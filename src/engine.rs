use std::sync::Arc;

use parking_lot::Mutex;
use rand::{
    rngs::{StdRng, ThreadRng},
    Rng,
};

use crate::clock::{ClockProbe, TimingClock};
use crate::error::{EngineError, Result};
use crate::puzzle::PuzzleSpec;
use crate::scramble::ScrambleGenerator;
use crate::session::{Penalty, SolveRecord, SolveSession};
use crate::stats::AggregateSnapshot;

/// Engine shared between threads; every command goes through the lock.
pub type SharedEngine<R = StdRng> = Arc<Mutex<Engine<R>>>;

/// Session engine driven by the host: one clock, one session, one puzzle.
#[derive(Debug)]
pub struct Engine<R: Rng = ThreadRng> {
    clock: Arc<TimingClock>,
    session: SolveSession,
    generator: ScrambleGenerator<R>,
    puzzle: PuzzleSpec,
    scramble: String,
    snapshot: AggregateSnapshot,
}

impl Engine<ThreadRng> {
    pub fn new(puzzle: PuzzleSpec) -> Self {
        Self::with_generator(puzzle, ScrambleGenerator::new())
    }
}

impl Engine<StdRng> {
    pub fn new_shared(puzzle: PuzzleSpec) -> SharedEngine {
        Self::with_generator(puzzle, ScrambleGenerator::from_entropy()).into_shared()
    }
}

impl<R: Rng> Engine<R> {
    pub fn with_generator(puzzle: PuzzleSpec, mut generator: ScrambleGenerator<R>) -> Self {
        let scramble = generator.generate(&puzzle);
        Self {
            clock: Arc::new(TimingClock::new()),
            session: SolveSession::new(),
            generator,
            puzzle,
            scramble,
            snapshot: AggregateSnapshot::default(),
        }
    }

    pub fn into_shared(self) -> SharedEngine<R> {
        Arc::new(Mutex::new(self))
    }

    /// Read-only handle for lock-free elapsed reads from another thread.
    /// Start and stop stay with the engine.
    pub fn clock_probe(&self) -> ClockProbe {
        ClockProbe::new(Arc::clone(&self.clock))
    }

    pub fn start(&mut self) {
        if !self.clock.is_running() {
            tracing::debug!(puzzle = self.puzzle.short_name(), "timer started");
        }
        self.clock.start();
    }

    /// Stop the clock and record the solve. Idle clocks record nothing.
    pub fn stop(&mut self) -> Option<SolveRecord> {
        let elapsed = self.clock.finish()?;
        let record = match self.session.record_solve(elapsed) {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(%err, "discarding solve");
                return None;
            }
        };

        self.clock.reset();
        self.refresh();
        self.scramble = self.generator.generate(&self.puzzle);

        tracing::debug!(
            solve = self.session.len(),
            time = %record.display_time(),
            "solve recorded"
        );
        Some(record)
    }

    /// Stop without recording and drop every solve
    pub fn reset(&mut self) {
        self.clock.reset();
        self.session.clear();
        self.refresh();
        tracing::info!("session reset");
    }

    pub fn delete_at(&mut self, index: usize) -> Result<SolveRecord> {
        let removed = self.session.remove_at(index)?;
        self.refresh();
        tracing::debug!(index, time = %removed.display_time(), "solve deleted");
        Ok(removed)
    }

    pub fn apply_penalty(&mut self, penalty: Penalty) -> Result<SolveRecord> {
        if self.clock.is_running() {
            return Err(EngineError::TimerRunning);
        }

        let record = self.session.set_penalty_on_last(penalty)?;
        self.refresh();
        tracing::debug!(%penalty, time = %record.display_time(), "penalty applied");
        Ok(record)
    }

    pub fn change_puzzle(&mut self, puzzle: PuzzleSpec) -> String {
        tracing::info!(puzzle = puzzle.name(), "puzzle changed");
        self.puzzle = puzzle;
        self.new_scramble()
    }

    /// Replace the current scramble for the current puzzle
    pub fn new_scramble(&mut self) -> String {
        self.scramble = self.generator.generate(&self.puzzle);
        self.scramble.clone()
    }

    /// Scramble for any puzzle; leaves the session and current scramble alone
    pub fn generate_scramble(&mut self, puzzle: &PuzzleSpec) -> String {
        self.generator.generate(puzzle)
    }

    pub fn tick(&self) -> f64 {
        self.clock.elapsed_seconds()
    }

    pub fn statistics(&self) -> AggregateSnapshot {
        self.snapshot
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn puzzle(&self) -> &PuzzleSpec {
        &self.puzzle
    }

    pub fn scramble(&self) -> &str {
        &self.scramble
    }

    pub fn records(&self) -> &[SolveRecord] {
        self.session.records()
    }

    pub fn session(&self) -> &SolveSession {
        &self.session
    }

    fn refresh(&mut self) {
        self.snapshot = AggregateSnapshot::compute(&self.session);
    }
}
