use clap::{Parser, ValueEnum};
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use cubik::{
    app::{App, AppAction},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{spawn_terminal_reader, EventPump, EventSource, TickPolicy, TimerEvent},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

/// sleek speedcubing timer tui with scrambles, penalties and session statistics
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A speedcubing timer for the terminal: hold space to start, tap to stop, with random-move scrambles for 2x2 through 7x7, +2/DNF penalties and live session statistics."
)]
pub struct Cli {
    /// puzzle to scramble for (defaults to the last one used)
    #[clap(short = 'p', long, value_enum)]
    puzzle: Option<SupportedPuzzle>,

    /// how long space must be held before the timer arms, in milliseconds
    #[clap(long = "hold-ms")]
    hold_ms: Option<u64>,

    /// length of the inspection countdown, in seconds
    #[clap(short = 'i', long = "inspection-secs")]
    inspection_secs: Option<u64>,

    /// clock readout refresh interval, in milliseconds
    #[clap(long = "tick-ms")]
    tick_ms: Option<u64>,
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
pub enum SupportedPuzzle {
    #[value(name = "2x2")]
    #[strum(serialize = "2x2")]
    Cube2,
    #[value(name = "3x3")]
    #[strum(serialize = "3x3")]
    Cube3,
    #[value(name = "4x4")]
    #[strum(serialize = "4x4")]
    Cube4,
    #[value(name = "5x5")]
    #[strum(serialize = "5x5")]
    Cube5,
    #[value(name = "6x6")]
    #[strum(serialize = "6x6")]
    Cube6,
    #[value(name = "7x7")]
    #[strum(serialize = "7x7")]
    Cube7,
}

impl Cli {
    /// Layer command line overrides on top of the stored config
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(puzzle) = self.puzzle {
            config.puzzle = puzzle.to_string();
        }
        if let Some(hold_ms) = self.hold_ms {
            config.hold_to_start_ms = hold_ms;
        }
        if let Some(secs) = self.inspection_secs {
            config.inspection_secs = secs;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_rate_ms = tick_ms;
        }
        config.sanitized()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(log_path) = AppDirs::log_path() {
        if let Err(err) = logging::init(&log_path) {
            eprintln!("logging disabled: {err}");
        }
    }

    let store = FileConfigStore::new();
    let config = cli.apply_to(store.load());
    tracing::info!(puzzle = %config.puzzle, "starting cubik");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // key release events make hold-to-start possible
    let release_events = supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, release_events);
    let result = start_tui(&mut terminal, &mut app);

    if release_events {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = store.save(&app.config) {
        tracing::warn!(%err, "could not save config");
    }

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let policy = TickPolicy::new(Duration::from_millis(app.config.tick_rate_ms));
    tracing::debug!(?policy, "event loop running");
    let pump = EventPump::new(spawn_terminal_reader(), policy);

    run_loop(terminal, app, &pump)
}

fn run_loop<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    pump: &EventPump<E>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        match pump.next(app.cadence(Instant::now())) {
            TimerEvent::Tick(now) => {
                if app.on_tick(now) {
                    terminal.draw(|f| f.render_widget(&*app, f.area()))?;
                }
            }
            TimerEvent::Resize => {
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
            TimerEvent::Key(key, at) => {
                if app.handle_key(key, at) == AppAction::Quit {
                    break;
                }
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
        }
    }

    Ok(())
}
