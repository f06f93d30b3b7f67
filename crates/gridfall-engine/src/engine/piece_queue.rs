use std::collections::VecDeque;

use rand::{SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64Mcg;

use crate::core::piece::PieceKind;

/// Manages the order and random generation of upcoming pieces.
///
/// Supplies pieces using the 7-bag system: each consecutive group of seven
/// contains every kind exactly once, in shuffled order.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    rng: Pcg64Mcg,
    bag: VecDeque<PieceKind>,
}

impl PieceQueue {
    /// Creates a queue seeded from the OS's random data source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(Pcg64Mcg::from_os_rng())
    }

    /// Creates a queue with a fixed seed, for deterministic runs.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(Pcg64Mcg::seed_from_u64(seed))
    }

    fn with_rng(rng: Pcg64Mcg) -> Self {
        let mut queue = Self {
            rng,
            bag: VecDeque::with_capacity(PieceKind::LEN * 2),
        };
        queue.fill_bag();
        queue
    }

    /// Tops the bag up with shuffled sets of 7 pieces when needed.
    ///
    /// After filling, the bag always holds more than one full bag, so a
    /// lookahead window of 7 survives a `pop_next`.
    fn fill_bag(&mut self) {
        while self.bag.len() <= PieceKind::LEN {
            let mut new_bag = PieceKind::ALL;
            new_bag.shuffle(&mut self.rng);
            self.bag.extend(new_bag);
        }
    }

    /// Pops the next piece from the bag.
    ///
    /// # Panics
    ///
    /// Panics if the bag is empty (should never happen).
    pub fn pop_next(&mut self) -> PieceKind {
        self.fill_bag();
        self.bag
            .pop_front()
            .expect("piece bag should never be empty")
    }

    /// Returns an iterator of upcoming pieces, soonest first.
    ///
    /// The iterator always yields at least 8 elements.
    pub fn next_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.bag.iter().copied()
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new()
    }
}
