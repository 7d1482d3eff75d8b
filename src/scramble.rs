use itertools::Itertools;
use rand::{
    rngs::{StdRng, ThreadRng},
    seq::SliceRandom,
    Rng, SeedableRng,
};

use crate::puzzle::PuzzleSpec;

const BASE_FACES: [&str; 6] = ["U", "D", "L", "R", "F", "B"];
const SLICE_AND_WIDE: [&str; 9] = ["M", "E", "S", "Uw", "Dw", "Lw", "Rw", "Fw", "Bw"];
const DOUBLE_LAYER: [&str; 6] = ["2U", "2D", "2L", "2R", "2F", "2B"];
const MODIFIERS: [&str; 3] = ["", "'", "2"];

/// Draws per position before falling back to filtering the vocabulary
const MAX_DRAWS: usize = 64;

/// Number of moves in a scramble for a cube of `layers` layers
pub fn move_count(layers: usize) -> usize {
    match layers {
        2 => 9,
        3 => 25,
        4 => 40,
        5 => 60,
        6 => 80,
        7 => 100,
        _ => 25,
    }
}

/// Face tokens usable on a cube of `layers` layers
pub fn vocabulary(layers: usize) -> Vec<&'static str> {
    let mut faces = BASE_FACES.to_vec();
    if layers >= 4 {
        faces.extend_from_slice(&SLICE_AND_WIDE);
    }
    if layers >= 5 {
        faces.extend_from_slice(&DOUBLE_LAYER);
    }
    faces
}

fn leading_char(token: &str) -> Option<char> {
    token.chars().next()
}

/// Random-move scramble generator.
///
/// Consecutive moves never share a leading character. Note that double-layer
/// moves all lead with `2`, so `2U 2R` cannot occur while `2U U` can.
#[derive(Debug)]
pub struct ScrambleGenerator<R: Rng = ThreadRng> {
    rng: R,
}

impl ScrambleGenerator<ThreadRng> {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for ScrambleGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrambleGenerator<StdRng> {
    /// Owned, `Send` generator for engines shared across threads
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: Rng> ScrambleGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a space separated scramble for `puzzle`
    pub fn generate(&mut self, puzzle: &PuzzleSpec) -> String {
        let faces = vocabulary(puzzle.layer_count());
        let count = move_count(puzzle.layer_count());

        let mut previous: Option<char> = None;
        let mut moves = Vec::with_capacity(count);

        for _ in 0..count {
            let face = self.next_face(&faces, previous);
            previous = leading_char(face);

            let modifier = MODIFIERS.choose(&mut self.rng).copied().unwrap_or("");
            moves.push(format!("{face}{modifier}"));
        }

        moves.iter().join(" ")
    }

    fn next_face(&mut self, faces: &[&'static str], previous: Option<char>) -> &'static str {
        for _ in 0..MAX_DRAWS {
            let face = faces[self.rng.gen_range(0..faces.len())];
            if previous.is_none() || leading_char(face) != previous {
                return face;
            }
        }

        let allowed: Vec<&'static str> = faces
            .iter()
            .copied()
            .filter(|f| leading_char(f) != previous)
            .collect();
        tracing::warn!(
            candidates = allowed.len(),
            "rejection sampling exhausted its draw budget"
        );

        allowed
            .choose(&mut self.rng)
            .or_else(|| faces.first())
            .copied()
            .unwrap_or("U")
    }
}
