use super::*;
use ndarray::Array2;
use rand::RngExt;

/// Seeded generation, either by independent per-cell sampling or by
/// scrambling a dark board with random presses.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
    start_board: StartBoard,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64, start_board: StartBoard) -> Self {
        Self { seed, start_board }
    }

    fn sample(config: GameConfig, rng: &mut impl rand::Rng) -> Board {
        let mut lit_chance = config.lit_chance;
        if !(0.0..=1.0).contains(&lit_chance) {
            log::warn!("Lit chance {} out of range, clamped", lit_chance);
            lit_chance = lit_chance.clamp(0.0, 1.0);
        }

        // degenerate chances need no sampling
        if lit_chance <= 0.0 {
            return Board::dark(config.size);
        }
        if lit_chance >= 1.0 {
            return Board::from_cells(Array2::from_elem(config.size.to_nd_index(), Cell::Lit));
        }

        let cells = Array2::from_shape_simple_fn(config.size.to_nd_index(), || {
            if rng.random_bool(lit_chance.into()) {
                Cell::Lit
            } else {
                Cell::Dark
            }
        });
        Board::from_cells(cells)
    }

    /// Ignores `lit_chance`: the position is reached from the cleared board
    /// by pressing, so pressing can always clear it again. Keeps pressing
    /// past the budget while the board happens to be dark, so a fresh game
    /// never starts pre-won.
    fn scramble(config: GameConfig, rng: &mut impl rand::Rng) -> Board {
        let presses = u32::from(config.total_cells()).max(4);
        let (size_x, size_y) = config.size;

        let mut board = Board::dark(config.size);
        let mut pressed = 0;
        while pressed < presses || board.all_dark() {
            let coords = (rng.random_range(0..size_x), rng.random_range(0..size_y));
            board = board.flip(coords);
            pressed += 1;
        }
        board
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Board {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        match self.start_board {
            StartBoard::Sampled => Self::sample(config, &mut rng),
            StartBoard::Scrambled => Self::scramble(config, &mut rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(seed: u64, start_board: StartBoard, config: GameConfig) -> Board {
        RandomBoardGenerator::new(seed, start_board).generate(config)
    }

    #[test]
    fn sampled_board_has_the_configured_dimensions() {
        let board = generate(7, StartBoard::Sampled, GameConfig::new((6, 4), 0.5));

        assert_eq!(board.size(), (6, 4));
        assert_eq!(board.total_cells(), 24);
    }

    #[test]
    fn zero_chance_samples_an_all_dark_board() {
        let board = generate(7, StartBoard::Sampled, GameConfig::new((5, 5), 0.0));

        assert!(board.all_dark());
    }

    #[test]
    fn full_chance_samples_an_all_lit_board() {
        let board = generate(7, StartBoard::Sampled, GameConfig::new((5, 5), 1.0));

        assert_eq!(board.lit_count(), board.total_cells());
    }

    #[test]
    fn equal_seeds_generate_equal_boards() {
        let config = GameConfig::new((8, 8), 0.3);

        assert_eq!(
            generate(42, StartBoard::Sampled, config),
            generate(42, StartBoard::Sampled, config)
        );
        assert_eq!(
            generate(42, StartBoard::Scrambled, config),
            generate(42, StartBoard::Scrambled, config)
        );
    }

    #[test]
    fn scrambled_boards_never_start_cleared() {
        for seed in 0..32 {
            let board = generate(seed, StartBoard::Scrambled, GameConfig::new((1, 1), 0.2));
            assert!(!board.all_dark());
        }

        for seed in 0..32 {
            let board = generate(seed, StartBoard::Scrambled, GameConfig::new((3, 3), 0.2));
            assert!(!board.all_dark());
        }
    }
}
