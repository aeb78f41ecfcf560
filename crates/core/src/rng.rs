//! RNG module - uniform random piece generation
//!
//! Every piece kind is drawn independently with probability 1/7. There is no
//! bag: the same kind can repeat any number of times in a row.
//!
//! The randomizer is seeded and owned by the game state, so a state plus an
//! input always produces the same successor.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Pick a piece kind uniformly at random.
pub fn random_kind<R: Rng + ?Sized>(rng: &mut R) -> PieceKind {
    PieceKind::ALL[rng.gen_range(0..PieceKind::ALL.len())]
}

/// Seeded uniform piece generator
#[derive(Debug, Clone)]
pub struct PieceRandomizer {
    seed: u64,
    /// Number of values drawn since seeding
    draws: u64,
    rng: StdRng,
}

impl PieceRandomizer {
    /// Create a new randomizer with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            draws: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a randomizer seeded from the thread-local entropy source
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        self.draws += 1;
        random_kind(&mut self.rng)
    }

    /// Draw a seed for a follow-up game (used on restart).
    pub fn next_seed(&mut self) -> u64 {
        self.draws += 1;
        self.rng.gen()
    }

    /// The seed this randomizer started from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }
}

/// Two randomizers are equal when they will produce the same future sequence.
impl PartialEq for PieceRandomizer {
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed && self.draws == other.draws
    }
}

impl Eq for PieceRandomizer {}

impl Default for PieceRandomizer {
    fn default() -> Self {
        Self::new(1)
    }
}
