use std::thread;
use std::time::Duration;

use assert_matches::assert_matches;
use rand::rngs::StdRng;
use rand::SeedableRng;

use cubik::scramble::{move_count, ScrambleGenerator};
use cubik::{AggregateSnapshot, Engine, EngineError, Penalty, PuzzleSpec, SolveSession};

fn seeded_engine(puzzle: PuzzleSpec) -> Engine<StdRng> {
    Engine::with_generator(
        puzzle,
        ScrambleGenerator::with_rng(StdRng::seed_from_u64(2024)),
    )
}

#[test]
fn thousand_three_by_three_scrambles_have_25_moves() {
    let mut engine = seeded_engine(PuzzleSpec::default());
    let puzzle = PuzzleSpec::cube(3).unwrap();
    for _ in 0..1000 {
        assert_eq!(engine.generate_scramble(&puzzle).split(' ').count(), 25);
    }
}

#[test]
fn change_puzzle_uses_table_for_every_size() {
    let mut engine = seeded_engine(PuzzleSpec::default());
    for puzzle in PuzzleSpec::standard() {
        let layers = puzzle.layer_count();
        let scramble = engine.change_puzzle(puzzle);
        assert_eq!(scramble.split(' ').count(), move_count(layers));
    }
}

#[test]
fn plus_two_on_last_solve() {
    let mut session = SolveSession::new();
    session.record_solve(12.34).unwrap();
    let record = session.set_penalty_on_last(Penalty::PlusTwo).unwrap();

    assert!((record.effective_time() - 14.34).abs() < 1e-9);
    assert_eq!(record.display_time(), "0:12.34 +2");
}

#[test]
fn dnf_session_statistics() {
    let mut session = SolveSession::new();
    session.record_solve(10.0).unwrap();
    session.record_solve(9.0).unwrap();
    session.record_solve(11.0).unwrap();
    session.set_penalty_on_last(Penalty::DidNotFinish).unwrap();

    let stats = AggregateSnapshot::compute(&session);
    assert_eq!(stats.worst_display(), "DNF");
    assert_eq!(stats.best, Some(9.0));
    assert_eq!(stats.average, Some(9.5));
}

#[test]
fn timed_solve_lands_in_tolerance_band() {
    let mut engine = seeded_engine(PuzzleSpec::default());
    engine.start();
    thread::sleep(Duration::from_millis(150));
    let record = engine.stop().expect("running clock records a solve");

    let elapsed = record.elapsed_seconds();
    assert!((0.14..=0.20).contains(&elapsed), "elapsed was {elapsed}");
    assert_eq!(engine.records().len(), 1);
}

#[test]
fn remove_middle_of_three() {
    let mut engine = seeded_engine(PuzzleSpec::default());
    for ms in [10, 30, 20] {
        engine.start();
        thread::sleep(Duration::from_millis(ms));
        engine.stop().unwrap();
    }
    let before: Vec<f64> = engine.records().iter().map(|r| r.elapsed_seconds()).collect();

    let removed = engine.delete_at(1).unwrap();
    assert_eq!(removed.elapsed_seconds(), before[1]);

    let after: Vec<f64> = engine.records().iter().map(|r| r.elapsed_seconds()).collect();
    assert_eq!(after, vec![before[0], before[2]]);
}

#[test]
fn double_start_measures_from_first_start() {
    let mut engine = seeded_engine(PuzzleSpec::default());
    engine.start();
    thread::sleep(Duration::from_millis(80));
    engine.start();
    thread::sleep(Duration::from_millis(20));

    let record = engine.stop().unwrap();
    assert!(record.elapsed_seconds() >= 0.1);
}

#[test]
fn idle_stop_and_reset() {
    let mut engine = seeded_engine(PuzzleSpec::default());
    assert!(engine.stop().is_none());
    assert!(engine.records().is_empty());

    engine.start();
    engine.stop();
    engine.start();
    engine.reset();

    assert!(engine.records().is_empty());
    assert!(!engine.is_running());
    assert_eq!(engine.tick(), 0.0);
}

#[test]
fn failed_commands_leave_state_untouched() {
    let mut engine = seeded_engine(PuzzleSpec::default());
    assert_matches!(
        engine.apply_penalty(Penalty::PlusTwo),
        Err(EngineError::EmptySession)
    );
    assert_matches!(
        engine.delete_at(0),
        Err(EngineError::IndexOutOfRange { index: 0, len: 0 })
    );

    engine.start();
    engine.stop();
    let before = engine.statistics();
    let scramble = engine.scramble().to_string();

    assert_matches!(
        engine.delete_at(5),
        Err(EngineError::IndexOutOfRange { index: 5, len: 1 })
    );
    assert_eq!(engine.statistics(), before);
    assert_eq!(engine.scramble(), scramble);
    assert_eq!(engine.records().len(), 1);
}
