//! Fifteen puzzle board model
//!
//! 4x4 sliding tiles with one blank. New games are shuffled into a
//! solvable arrangement with the blank in the bottom-right corner.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Board edge length
pub const SIZE: usize = 4;

/// Tile number, or None for the blank
pub type Tile = Option<u8>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub cells: [[Tile; SIZE]; SIZE],
}

impl Board {
    /// 1..=15 in reading order, blank last
    pub fn solved() -> Self {
        let mut cells = [[None; SIZE]; SIZE];
        for (i, cell) in cells.iter_mut().flatten().enumerate() {
            if i + 1 < SIZE * SIZE {
                *cell = Some(i as u8 + 1);
            }
        }
        Self { cells }
    }

    /// Random solvable board, blank in the bottom-right corner
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut tiles: Vec<u8> = (1..(SIZE * SIZE) as u8).collect();
        tiles.shuffle(rng);
        // With the blank fixed in the corner, solvable iff inversions are even
        if inversions(&tiles) % 2 != 0 {
            tiles.swap(0, 1);
        }

        let mut cells = [[None; SIZE]; SIZE];
        for (cell, tile) in cells.iter_mut().flatten().zip(tiles) {
            *cell = Some(tile);
        }
        Self { cells }
    }

    pub fn blank(&self) -> (usize, usize) {
        for (row, line) in self.cells.iter().enumerate() {
            if let Some(col) = line.iter().position(|t| t.is_none()) {
                return (row, col);
            }
        }
        (SIZE - 1, SIZE - 1)
    }

    /// A tile can slide if it is orthogonally next to the blank
    pub fn can_move(&self, row: usize, col: usize) -> bool {
        if row >= SIZE || col >= SIZE {
            return false;
        }
        let (br, bc) = self.blank();
        row.abs_diff(br) + col.abs_diff(bc) == 1
    }

    /// Slide the tile into the blank. Returns false if the move is illegal.
    pub fn slide(&mut self, row: usize, col: usize) -> bool {
        if !self.can_move(row, col) {
            return false;
        }
        let (br, bc) = self.blank();
        self.cells[br][bc] = self.cells[row][col].take();
        true
    }

    pub fn is_solved(&self) -> bool {
        *self == Self::solved()
    }

    /// Tiles in reading order, blank skipped
    pub fn tiles(&self) -> Vec<u8> {
        self.cells.iter().flatten().filter_map(|t| *t).collect()
    }
}

fn inversions(tiles: &[u8]) -> usize {
    tiles
        .iter()
        .enumerate()
        .map(|(i, &a)| tiles[i + 1..].iter().filter(|&&b| a > b).count())
        .sum()
}

/// Game session around a board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FifteenPuzzle {
    pub board: Board,
    pub moves: u32,
    pub won: bool,
    pub started: bool,
}

impl Default for FifteenPuzzle {
    fn default() -> Self {
        Self {
            board: Board::solved(),
            moves: 0,
            won: false,
            started: false,
        }
    }
}

impl FifteenPuzzle {
    pub fn new_game<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self {
            board: Board::shuffled(rng),
            started: true,
            ..Self::default()
        };
        log::info!("Fifteen puzzle shuffled");
    }

    /// Handle a tap on a tile. Returns true if a tile moved.
    pub fn click(&mut self, row: usize, col: usize) -> bool {
        if self.won || !self.started {
            return false;
        }
        if !self.board.slide(row, col) {
            return false;
        }
        self.moves += 1;
        if self.board.is_solved() {
            self.won = true;
            self.started = false;
            log::info!("Fifteen puzzle solved in {} moves", self.moves);
        }
        true
    }

    pub fn is_movable(&self, row: usize, col: usize) -> bool {
        self.board.can_move(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_solved_layout() {
        let board = Board::solved();
        assert_eq!(board.blank(), (3, 3));
        assert_eq!(board.tiles(), (1..=15).collect::<Vec<u8>>());
        assert!(board.is_solved());
    }

    #[test]
    fn test_only_neighbours_move() {
        let board = Board::solved();
        assert!(board.can_move(2, 3));
        assert!(board.can_move(3, 2));
        assert!(!board.can_move(2, 2));
        assert!(!board.can_move(3, 3));
        assert!(!board.can_move(0, 0));
        assert!(!board.can_move(4, 3));
    }

    #[test]
    fn test_slide_moves_blank() {
        let mut board = Board::solved();
        assert!(board.slide(3, 2));
        assert_eq!(board.blank(), (3, 2));
        assert_eq!(board.cells[3][3], Some(15));
        assert!(!board.slide(0, 0));
    }

    #[test]
    fn test_clicks_ignored_before_start() {
        let mut game = FifteenPuzzle::default();
        assert!(!game.click(3, 2));
        assert_eq!(game.moves, 0);
    }

    #[test]
    fn test_win_detection_freezes_input() {
        let mut game = FifteenPuzzle {
            started: true,
            ..Default::default()
        };
        // One move away from solved
        game.board.slide(3, 2);
        assert!(!game.click(0, 0));
        assert_eq!(game.moves, 0);

        assert!(game.click(3, 3));
        assert_eq!(game.moves, 1);
        assert!(game.won);
        assert!(!game.started);
        assert!(!game.click(3, 2));
        assert_eq!(game.moves, 1);
    }

    #[test]
    fn test_new_game_resets() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut game = FifteenPuzzle {
            moves: 12,
            won: true,
            ..Default::default()
        };
        game.new_game(&mut rng);
        assert_eq!(game.moves, 0);
        assert!(!game.won);
        assert!(game.started);
        assert_eq!(game.board.blank(), (3, 3));
    }

    proptest! {
        #[test]
        fn prop_shuffled_is_solvable(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let board = Board::shuffled(&mut rng);
            let tiles = board.tiles();
            prop_assert_eq!(board.blank(), (SIZE - 1, SIZE - 1));
            prop_assert_eq!(inversions(&tiles) % 2, 0);
            let mut sorted = tiles.clone();
            sorted.sort_unstable();
            prop_assert_eq!(sorted, (1..=15).collect::<Vec<u8>>());
        }
    }
}
