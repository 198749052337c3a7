use crate::*;
pub use random::*;

mod random;

/// Board creation goes through a generator so games can be reproduced from a
/// seed and tests can inject fixed layouts.
pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Board;
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StartBoard {
    /// Every cell independently lit with the configured chance.
    Sampled,
    /// Random presses applied to a dark board; always solvable and never
    /// pre-won.
    Scrambled,
}
