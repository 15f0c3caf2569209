//! Applies letter/word multipliers to the words a placement forms, each
//! premium square spent at most once across the whole move.
use crate::board::{Board, Premium};
use crate::error::Error;
use crate::moves::{Direction, FormedWord};
use std::collections::HashSet;

pub const BINGO_BONUS: i32 = 50;

/// Stateless; every call threads its own `used_premium` set across the
/// move's formed words so a square shared by two words (main word and a
/// cross word crossing through the same new tile) multiplies only once.
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Total score for one move: every formed word's score plus the bingo
    /// bonus if all `tile_count` tiles were used. `new_positions` are the
    /// `(row, col)` of tiles newly placed this move (not already on
    /// `board`), used to decide which squares may still apply a multiplier.
    pub fn score_move(
        board: &Board,
        words: &[FormedWord],
        new_positions: &[(usize, usize)],
        tile_count: usize,
    ) -> Result<i32, Error> {
        let new_set: HashSet<(usize, usize)> = new_positions.iter().copied().collect();
        let mut used_premium: HashSet<(usize, usize)> = HashSet::new();
        let mut total = 0i32;
        for word in words {
            total += Self::word_score(board, word, &new_set, &mut used_premium)?;
        }
        if tile_count == 7 {
            total += BINGO_BONUS;
        }
        Ok(total)
    }

    fn word_score(
        board: &Board,
        word: &FormedWord,
        new_positions: &HashSet<(usize, usize)>,
        used_premium: &mut HashSet<(usize, usize)>,
    ) -> Result<i32, Error> {
        let (dr, dc): (i32, i32) = match word.direction {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
        };
        let mut letters_total = 0i32;
        let mut word_multiplier = 1i32;
        let mut pos = (word.start_row as i32, word.start_col as i32);
        for _ in word.word.chars() {
            let (r, c) = (pos.0 as usize, pos.1 as usize);
            let square = board.get(r, c)?;
            let tile = square.tile.ok_or(Error::OutOfBounds {
                row: pos.0,
                col: pos.1,
            })?;
            let base_value = tile.value as i32;
            let is_new = new_positions.contains(&(r, c));
            if is_new && !square.premium_consumed {
                match square.premium {
                    Premium::DoubleLetter => letters_total += base_value * 2,
                    Premium::TripleLetter => letters_total += base_value * 3,
                    Premium::DoubleWord | Premium::Center => {
                        letters_total += base_value;
                        if used_premium.insert((r, c)) {
                            word_multiplier *= 2;
                        }
                    }
                    Premium::TripleWord => {
                        letters_total += base_value;
                        if used_premium.insert((r, c)) {
                            word_multiplier *= 3;
                        }
                    }
                    Premium::None => letters_total += base_value,
                }
            } else {
                letters_total += base_value;
            }
            pos = (pos.0 + dr, pos.1 + dc);
        }
        Ok(letters_total * word_multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::Tile;

    #[test]
    fn opening_cat_doubles_through_center() {
        let mut board = Board::new();
        board.place(7, 6, Tile::letter(b'C')).unwrap();
        board.place(7, 7, Tile::letter(b'A')).unwrap();
        board.place(7, 8, Tile::letter(b'T')).unwrap();
        let words = vec![FormedWord {
            word: "CAT".to_string(),
            start_row: 7,
            start_col: 6,
            direction: Direction::Horizontal,
        }];
        let new_positions = vec![(7, 6), (7, 7), (7, 8)];
        let score = ScoreCalculator::score_move(&board, &words, &new_positions, 3).unwrap();
        assert_eq!(score, 2 * (3 + 1 + 1));
    }

    #[test]
    fn bingo_adds_fifty() {
        let mut board = Board::new();
        for (i, c) in "RETAINS".chars().enumerate() {
            board.place(7, 4 + i, Tile::letter(c as u8)).unwrap();
        }
        let words = vec![FormedWord {
            word: "RETAINS".to_string(),
            start_row: 7,
            start_col: 4,
            direction: Direction::Horizontal,
        }];
        let new_positions: Vec<(usize, usize)> = (0..7).map(|i| (7, 4 + i)).collect();
        let score = ScoreCalculator::score_move(&board, &words, &new_positions, 7).unwrap();
        let letters_total: i32 = "RETAINS"
            .chars()
            .map(|c| crate::tiles::letter_value(c as u8) as i32)
            .sum();
        assert_eq!(score, letters_total * 2 + BINGO_BONUS);
    }

    #[test]
    fn premium_applies_once_per_move_even_when_shared() {
        let mut board = Board::new();
        board.place(7, 6, Tile::letter(b'A')).unwrap();
        board.place(7, 7, Tile::letter(b'A')).unwrap();
        let words = vec![FormedWord {
            word: "AA".to_string(),
            start_row: 7,
            start_col: 6,
            direction: Direction::Horizontal,
        }];
        let new_positions = vec![(7, 6), (7, 7)];
        let score = ScoreCalculator::score_move(&board, &words, &new_positions, 2).unwrap();
        assert_eq!(score, 4);
    }

    #[test]
    fn consumed_premium_does_not_multiply_again() {
        let mut board = Board::new();
        board.place(7, 6, Tile::letter(b'C')).unwrap();
        board.place(7, 7, Tile::letter(b'A')).unwrap();
        board.consume_premium(7, 7).unwrap();
        let words = vec![FormedWord {
            word: "CA".to_string(),
            start_row: 7,
            start_col: 6,
            direction: Direction::Horizontal,
        }];
        let new_positions = vec![(7, 6), (7, 7)];
        let score = ScoreCalculator::score_move(&board, &words, &new_positions, 2).unwrap();
        assert_eq!(score, 3 + 1);
    }
}
