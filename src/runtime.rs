use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind};

/// Fastest the clock readout is ever polled
pub const MIN_TICK: Duration = Duration::from_millis(1);
/// Wake-up interval while nothing on screen moves
pub const IDLE_TICK: Duration = Duration::from_millis(250);

/// Everything the app loop reacts to. Keys carry the instant they were read
/// off the terminal so hold durations do not include queueing delay.
#[derive(Clone, Debug)]
pub enum TimerEvent {
    Key(KeyEvent, Instant),
    Resize,
    Tick(Instant),
}

/// Whether the screen is currently animating
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cadence {
    /// clock running, space held or inspection counting down
    Live,
    Idle,
}

/// Poll interval per cadence: the configured refresh rate while live, a slow
/// wake-up otherwise.
#[derive(Clone, Copy, Debug)]
pub struct TickPolicy {
    live: Duration,
    idle: Duration,
}

impl TickPolicy {
    pub fn new(live: Duration) -> Self {
        let live = live.max(MIN_TICK);
        Self {
            live,
            idle: IDLE_TICK.max(live),
        }
    }

    pub fn interval(&self, cadence: Cadence) -> Duration {
        match cadence {
            Cadence::Live => self.live,
            Cadence::Idle => self.idle,
        }
    }
}

pub trait EventSource {
    /// Wait up to `timeout` for the next event.
    fn recv_timeout(&self, timeout: Duration) -> Result<TimerEvent, RecvTimeoutError>;
}

/// Events fed through a channel, by the terminal reader or by a test.
pub struct ChannelEventSource {
    rx: Receiver<TimerEvent>,
}

impl ChannelEventSource {
    pub fn new(rx: Receiver<TimerEvent>) -> Self {
        Self { rx }
    }

    pub fn pair() -> (Sender<TimerEvent>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self::new(rx))
    }
}

impl EventSource for ChannelEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TimerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Read crossterm events on a background thread until the terminal closes
/// or the receiving side is dropped.
pub fn spawn_terminal_reader() -> ChannelEventSource {
    let (tx, source) = ChannelEventSource::pair();

    std::thread::spawn(move || loop {
        let ev = match event::read() {
            Ok(ev) => ev,
            Err(err) => {
                tracing::warn!(%err, "terminal event stream closed");
                break;
            }
        };

        if let Some(ev) = translate(ev, Instant::now()) {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    source
}

/// Map a terminal event to a timer event. Auto-repeat is only kept for space
/// (the hold gesture) and the history arrows; a held `x` or `d` must not
/// delete or penalize a run of solves.
pub fn translate(ev: CtEvent, at: Instant) -> Option<TimerEvent> {
    match ev {
        CtEvent::Key(key) if key.kind == KeyEventKind::Repeat && !repeats(key.code) => None,
        CtEvent::Key(key) => Some(TimerEvent::Key(key, at)),
        CtEvent::Resize(_, _) => Some(TimerEvent::Resize),
        _ => None,
    }
}

fn repeats(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char(' ') | KeyCode::Up | KeyCode::Down)
}

/// Pulls the next event, producing a `Tick` when the interval for the
/// current cadence passes quietly.
pub struct EventPump<E: EventSource> {
    source: E,
    policy: TickPolicy,
}

impl<E: EventSource> EventPump<E> {
    pub fn new(source: E, policy: TickPolicy) -> Self {
        Self { source, policy }
    }

    pub fn next(&self, cadence: Cadence) -> TimerEvent {
        let interval = self.policy.interval(cadence);
        match self.source.recv_timeout(interval) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => TimerEvent::Tick(Instant::now()),
            // no reader left; keep the readout alive without spinning
            Err(RecvTimeoutError::Disconnected) => {
                std::thread::sleep(interval);
                TimerEvent::Tick(Instant::now())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn key_kind(code: KeyCode, kind: KeyEventKind) -> CtEvent {
        CtEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn idle_polls_slower_than_live() {
        let policy = TickPolicy::new(Duration::from_millis(10));
        assert_eq!(policy.interval(Cadence::Live), Duration::from_millis(10));
        assert_eq!(policy.interval(Cadence::Idle), IDLE_TICK);

        let slow = TickPolicy::new(Duration::from_millis(500));
        assert_eq!(slow.interval(Cadence::Idle), Duration::from_millis(500));
    }

    #[test]
    fn zero_tick_is_clamped() {
        let policy = TickPolicy::new(Duration::ZERO);
        assert_eq!(policy.interval(Cadence::Live), MIN_TICK);
    }

    #[test]
    fn repeats_only_for_space_and_arrows() {
        let at = Instant::now();
        for code in [KeyCode::Char(' '), KeyCode::Up, KeyCode::Down] {
            assert!(translate(key_kind(code, KeyEventKind::Repeat), at).is_some());
        }
        for code in [KeyCode::Char('x'), KeyCode::Char('d'), KeyCode::Delete] {
            assert!(translate(key_kind(code, KeyEventKind::Repeat), at).is_none());
            assert!(translate(key_kind(code, KeyEventKind::Press), at).is_some());
        }
        assert!(matches!(
            translate(CtEvent::Resize(80, 24), at),
            Some(TimerEvent::Resize)
        ));
        assert!(translate(CtEvent::FocusGained, at).is_none());
    }

    #[test]
    fn keys_keep_read_instant() {
        let at = Instant::now();
        match translate(key_kind(KeyCode::Char(' '), KeyEventKind::Press), at) {
            Some(TimerEvent::Key(key, stamped)) => {
                assert_eq!(key.code, KeyCode::Char(' '));
                assert_eq!(stamped, at);
            }
            other => panic!("expected key event, got {other:?}"),
        }
    }

    #[test]
    fn quiet_source_ticks_at_cadence() {
        let (_tx, source) = ChannelEventSource::pair();
        let pump = EventPump::new(source, TickPolicy::new(Duration::from_millis(1)));

        let before = Instant::now();
        assert!(matches!(pump.next(Cadence::Live), TimerEvent::Tick(_)));
        assert!(before.elapsed() < IDLE_TICK);
    }

    #[test]
    fn disconnected_source_keeps_ticking() {
        let (tx, source) = ChannelEventSource::pair();
        drop(tx);
        let pump = EventPump::new(source, TickPolicy::new(Duration::from_millis(1)));
        assert!(matches!(pump.next(Cadence::Live), TimerEvent::Tick(_)));
    }
}
