// Library surface for the binary, headless tests and embedding hosts.
// The engine modules (clock, scramble, session, stats, engine) know nothing
// about terminals; app/ui/runtime are the TUI host around them.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod gesture;
pub mod inspection;
pub mod logging;
pub mod puzzle;
pub mod runtime;
pub mod scramble;
pub mod session;
pub mod stats;
pub mod time_series;
pub mod ui;
pub mod util;

pub use clock::ClockProbe;
pub use engine::{Engine, SharedEngine};
pub use error::{EngineError, Result};
pub use puzzle::PuzzleSpec;
pub use session::{Penalty, SolveRecord, SolveSession};
pub use stats::AggregateSnapshot;
