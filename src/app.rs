use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Config;
use crate::engine::Engine;
use crate::error::EngineError;
use crate::gesture::{GestureOutcome, HoldGesture};
use crate::inspection::{Inspection, InspectionState};
use crate::puzzle::PuzzleSpec;
use crate::runtime::Cadence;
use crate::session::Penalty;

/// What the event loop should do after handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

/// Host state around the engine: key mapping, inspection, history selection
/// and the status line. The engine never sees any of this.
#[derive(Debug)]
pub struct App {
    pub engine: Engine,
    pub config: Config,
    pub inspection: Inspection,
    pub gesture: HoldGesture,
    pub selected: Option<usize>,
    pub status: String,
    puzzles: Vec<PuzzleSpec>,
    inspection_reported: bool,
}

impl App {
    pub fn new(config: Config, release_events: bool) -> Self {
        let engine = Engine::new(config.puzzle_spec());
        Self {
            inspection: Inspection::new(config.inspection_secs),
            gesture: HoldGesture::new(
                Duration::from_millis(config.hold_to_start_ms),
                release_events,
            ),
            engine,
            config,
            selected: None,
            status: "Press SPACE to start".to_string(),
            puzzles: PuzzleSpec::standard(),
            inspection_reported: false,
        }
    }

    /// Poll-driven refresh; returns `true` when the screen should be redrawn
    pub fn on_tick(&mut self, now: Instant) -> bool {
        let just_ready =
            self.inspection.state(now) == InspectionState::Ready && !self.inspection_reported;
        if just_ready {
            self.inspection_reported = true;
            self.status = "Inspection time finished".to_string();
        }

        just_ready || self.cadence(now) == Cadence::Live
    }

    /// `Live` while something on screen changes by itself
    pub fn cadence(&self, now: Instant) -> Cadence {
        let counting = matches!(
            self.inspection.state(now),
            InspectionState::Counting { .. }
        );
        if self.engine.is_running() || counting || self.gesture.is_pressed() {
            Cadence::Live
        } else {
            Cadence::Idle
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> AppAction {
        if key.code == KeyCode::Char(' ') {
            self.on_space(key.kind, now);
            return AppAction::Continue;
        }
        if key.kind == KeyEventKind::Release {
            return AppAction::Continue;
        }

        match key.code {
            KeyCode::Esc => return AppAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return AppAction::Quit
            }
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char('i') => self.start_inspection(now),
            KeyCode::Char('2') => self.apply_penalty(Penalty::PlusTwo),
            KeyCode::Char('d') => self.apply_penalty(Penalty::DidNotFinish),
            KeyCode::Char('o') => self.apply_penalty(Penalty::None),
            KeyCode::Char('x') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('n') if !self.engine.is_running() => {
                self.engine.new_scramble();
                self.status = "New scramble".to_string();
            }
            KeyCode::Tab | KeyCode::Char('p') => self.cycle_puzzle(1),
            KeyCode::BackTab => self.cycle_puzzle(-1),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            _ => {}
        }
        AppAction::Continue
    }

    fn on_space(&mut self, kind: KeyEventKind, now: Instant) {
        let running = self.engine.is_running();
        let outcome = match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.gesture.on_press(now, running),
            KeyEventKind::Release => self.gesture.on_release(now, running),
        };

        match outcome {
            GestureOutcome::Start => {
                self.inspection.cancel();
                self.engine.start();
                self.status = "Timer running...".to_string();
            }
            GestureOutcome::Stop => {
                if let Some(record) = self.engine.stop() {
                    let n = self.engine.records().len();
                    self.selected = Some(n - 1);
                    self.status = format!(
                        "Solve #{n}: {} - 2 = +2, d = DNF, o = clear",
                        record.display_time()
                    );
                }
            }
            GestureOutcome::TooShort(held) => {
                self.status = format!("Hold longer... ({}ms)", held.as_millis());
            }
            GestureOutcome::Holding => {
                let secs = self.gesture.hold().as_secs_f64();
                self.status = format!("Hold for {secs:.1} seconds...");
            }
            GestureOutcome::Ignored => {}
        }
    }

    fn reset(&mut self) {
        self.engine.reset();
        self.inspection.cancel();
        self.selected = None;
        self.status = "Press SPACE to start".to_string();
    }

    fn start_inspection(&mut self, now: Instant) {
        if self.engine.is_running() {
            return;
        }
        self.inspection.start(now);
        self.inspection_reported = false;
        self.status = "Inspection time started".to_string();
    }

    fn apply_penalty(&mut self, penalty: Penalty) {
        self.status = match self.engine.apply_penalty(penalty) {
            Ok(record) => match penalty {
                Penalty::None => format!("✓ Penalty cleared: {}", record.display_time()),
                Penalty::PlusTwo => format!("✓ +2 penalty applied: {}", record.display_time()),
                Penalty::DidNotFinish => {
                    format!("✓ DNF penalty applied: {}", record.display_time())
                }
            },
            Err(EngineError::EmptySession) => "No solves to apply penalty to".to_string(),
            Err(err) => err.to_string(),
        };
    }

    fn delete_selected(&mut self) {
        let Some(index) = self.selected else {
            self.status = "Select a solve to delete".to_string();
            return;
        };

        match self.engine.delete_at(index) {
            Ok(_) => {
                let len = self.engine.records().len();
                self.selected = if len == 0 {
                    None
                } else {
                    Some(index.min(len - 1))
                };
                self.status = "Time deleted!".to_string();
            }
            Err(err) => {
                self.selected = None;
                self.status = err.to_string();
            }
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.engine.records().len();
        if len == 0 {
            self.selected = None;
            return;
        }

        let next = match self.selected {
            None if delta < 0 => len - 1,
            None => 0,
            Some(i) => i.saturating_add_signed(delta).min(len - 1),
        };
        self.selected = Some(next);
    }

    fn cycle_puzzle(&mut self, step: isize) {
        if self.engine.is_running() {
            return;
        }

        let current = self
            .puzzles
            .iter()
            .position(|p| p == self.engine.puzzle())
            .unwrap_or(0);
        let len = self.puzzles.len() as isize;
        let next = (current as isize + step).rem_euclid(len) as usize;

        let puzzle = self.puzzles[next].clone();
        self.config.puzzle = puzzle.short_name().to_string();
        self.status = format!("Puzzle changed to {}", puzzle.name());
        self.engine.change_puzzle(puzzle);
    }
}
