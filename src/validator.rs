//! Recomputes every word a tentative placement would form and checks each
//! one, without mutating live state.
use crate::board::{Board, Direction};
use crate::error::Error;
use crate::gaddag::Dictionary;
use crate::moves::FormedWord;
use std::collections::HashSet;

/// Stateless — every call takes the board and dictionary it needs.
pub struct MoveValidator;

impl MoveValidator {
    /// Validates a PLACE move's tiles against `board`, returning the words
    /// it would form (main word first, then cross-words, deduplicated) or
    /// the first rule it violates. Never mutates `board`.
    #[allow(clippy::too_many_arguments)]
    pub fn validate_place(
        board: &Board,
        dictionary: &Dictionary,
        start_row: usize,
        start_col: usize,
        direction: Direction,
        tiles: &[crate::tiles::Tile],
    ) -> Result<Vec<FormedWord>, Error> {
        if tiles.is_empty() {
            return Err(Error::NoTiles);
        }
        board.get(start_row, start_col)?;

        let first_move = board.is_empty();
        let mut overlay = board.clone();
        let mut new_positions = Vec::with_capacity(tiles.len());

        let (dr, dc): (i32, i32) = match direction {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
        };
        let mut pos = (start_row as i32, start_col as i32);
        for &tile in tiles {
            loop {
                let square = in_bounds_square(&overlay, pos)?;
                if square.tile.is_none() {
                    break;
                }
                pos = (pos.0 + dr, pos.1 + dc);
            }
            let (r, c) = (pos.0 as usize, pos.1 as usize);
            overlay.place(r, c, tile)?;
            new_positions.push((r, c));
            pos = (pos.0 + dr, pos.1 + dc);
        }

        if !first_move {
            let rows: HashSet<usize> = new_positions.iter().map(|(r, _)| *r).collect();
            let cols: HashSet<usize> = new_positions.iter().map(|(_, c)| *c).collect();
            if rows.len() > 1 && cols.len() > 1 {
                return Err(Error::NotInLine);
            }
        } else {
            let covers_center = match direction {
                Direction::Horizontal => {
                    start_row == crate::board::CENTER
                        && (start_col..start_col + tiles.len()).contains(&crate::board::CENTER)
                }
                Direction::Vertical => {
                    start_col == crate::board::CENTER
                        && (start_row..start_row + tiles.len()).contains(&crate::board::CENTER)
                }
            };
            if !covers_center {
                return Err(Error::FirstMoveMissesCenter);
            }
        }

        let (main_start_row, main_start_col, main_len) =
            overlay.run_through(start_row, start_col, direction)?;
        let main_word = read_word(&overlay, main_start_row, main_start_col, direction, main_len)?;
        let mut formed = vec![FormedWord {
            word: main_word.clone(),
            start_row: main_start_row,
            start_col: main_start_col,
            direction,
        }];

        let cross_direction = match direction {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        };
        for &(r, c) in &new_positions {
            let (cross_start_row, cross_start_col, cross_len) =
                overlay.run_through(r, c, cross_direction)?;
            if cross_len < 2 {
                continue;
            }
            let word = read_word(&overlay, cross_start_row, cross_start_col, cross_direction, cross_len)?;
            formed.push(FormedWord {
                word,
                start_row: cross_start_row,
                start_col: cross_start_col,
                direction: cross_direction,
            });
        }

        for fw in &formed {
            if !dictionary.is_valid_word(&fw.word) {
                return Err(Error::NotInDictionary(fw.word.clone()));
            }
        }

        if !first_move {
            let new_position_set: HashSet<(usize, usize)> = new_positions.iter().copied().collect();
            let threads_existing = formed.iter().any(|fw| {
                word_positions(fw.start_row, fw.start_col, fw.direction, fw.word.len())
                    .any(|pos| !new_position_set.contains(&pos))
            });
            let adjacent_existing = new_positions.iter().any(|&(r, c)| {
                board
                    .adjacent_occupied(r, c)
                    .map(|v| !v.is_empty())
                    .unwrap_or(false)
            });
            if !threads_existing && !adjacent_existing {
                return Err(Error::Disconnected);
            }
        }

        let mut seen = HashSet::new();
        let deduped: Vec<FormedWord> = formed
            .into_iter()
            .filter(|fw| seen.insert((fw.word.clone(), fw.start_row, fw.start_col, fw.direction)))
            .collect();
        Ok(deduped)
    }
}

fn in_bounds_square(board: &Board, pos: (i32, i32)) -> Result<&crate::board::Square, Error> {
    if pos.0 < 0 || pos.1 < 0 {
        return Err(Error::OutOfBounds {
            row: pos.0,
            col: pos.1,
        });
    }
    board.get(pos.0 as usize, pos.1 as usize)
}

/// Every `(row, col)` a word of `len` tiles starting at `(start_row,
/// start_col)` and running in `direction` covers.
fn word_positions(
    start_row: usize,
    start_col: usize,
    direction: Direction,
    len: usize,
) -> impl Iterator<Item = (usize, usize)> {
    let (dr, dc): (i32, i32) = match direction {
        Direction::Horizontal => (0, 1),
        Direction::Vertical => (1, 0),
    };
    (0..len as i32).map(move |i| {
        (
            (start_row as i32 + dr * i) as usize,
            (start_col as i32 + dc * i) as usize,
        )
    })
}

fn read_word(
    board: &Board,
    start_row: usize,
    start_col: usize,
    direction: Direction,
    len: usize,
) -> Result<String, Error> {
    let (dr, dc): (i32, i32) = match direction {
        Direction::Horizontal => (0, 1),
        Direction::Vertical => (1, 0),
    };
    let mut word = String::with_capacity(len);
    let mut pos = (start_row as i32, start_col as i32);
    for _ in 0..len {
        let square = board.get(pos.0 as usize, pos.1 as usize)?;
        let tile = square.tile.ok_or(Error::OutOfBounds {
            row: pos.0,
            col: pos.1,
        })?;
        word.push(tile.letter as char);
        pos = (pos.0 + dr, pos.1 + dc);
    }
    Ok(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::Tile;

    fn dict() -> Dictionary {
        Dictionary::from_words(&["CAT", "CATS", "TS", "OT", "DOG", "AA"])
    }

    #[test]
    fn opening_move_must_cover_center() {
        let board = Board::new();
        let tiles = vec![Tile::letter(b'C'), Tile::letter(b'A'), Tile::letter(b'T')];
        let err = MoveValidator::validate_place(
            &board,
            &dict(),
            0,
            0,
            Direction::Horizontal,
            &tiles,
        )
        .unwrap_err();
        assert!(matches!(err, Error::FirstMoveMissesCenter));
    }

    #[test]
    fn opening_move_scores_cat_through_center() {
        let board = Board::new();
        let tiles = vec![Tile::letter(b'C'), Tile::letter(b'A'), Tile::letter(b'T')];
        let words =
            MoveValidator::validate_place(&board, &dict(), 7, 6, Direction::Horizontal, &tiles)
                .unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "CAT");
    }

    #[test]
    fn cross_word_must_be_valid() {
        let mut board = Board::new();
        board.place(7, 6, Tile::letter(b'C')).unwrap();
        board.place(7, 7, Tile::letter(b'A')).unwrap();
        board.place(7, 8, Tile::letter(b'T')).unwrap();
        // Place S at (7,9), forming "CATS" horizontally and no cross word.
        let tiles = vec![Tile::letter(b'S')];
        let words =
            MoveValidator::validate_place(&board, &dict(), 7, 9, Direction::Horizontal, &tiles)
                .unwrap();
        assert_eq!(words[0].word, "CATS");
    }

    #[test]
    fn disconnected_placement_is_rejected() {
        let mut board = Board::new();
        board.place(7, 6, Tile::letter(b'C')).unwrap();
        board.place(7, 7, Tile::letter(b'A')).unwrap();
        board.place(7, 8, Tile::letter(b'T')).unwrap();
        let tiles = vec![Tile::letter(b'D'), Tile::letter(b'O'), Tile::letter(b'G')];
        let err = MoveValidator::validate_place(&board, &dict(), 0, 0, Direction::Horizontal, &tiles)
            .unwrap_err();
        assert!(matches!(err, Error::Disconnected));
    }

    #[test]
    fn cross_word_rejected_when_not_in_dictionary() {
        let mut board = Board::new();
        board.place(7, 6, Tile::letter(b'C')).unwrap();
        board.place(7, 7, Tile::letter(b'A')).unwrap();
        board.place(7, 8, Tile::letter(b'T')).unwrap();
        // A vertical "S" at (8,8) extends the existing "T" at (7,8) into
        // "TS" read top-to-bottom; a dictionary missing "TS" must reject it.
        let limited = Dictionary::from_words(&["CAT", "CATS"]);
        let tiles = vec![Tile::letter(b'S')];
        let err =
            MoveValidator::validate_place(&board, &limited, 8, 8, Direction::Vertical, &tiles)
                .unwrap_err();
        assert!(matches!(err, Error::NotInDictionary(ref w) if w == "TS"));
    }

    #[test]
    fn word_positions_covers_the_full_run_in_direction() {
        let positions: Vec<_> = word_positions(7, 6, Direction::Horizontal, 3).collect();
        assert_eq!(positions, vec![(7, 6), (7, 7), (7, 8)]);

        let positions: Vec<_> = word_positions(5, 7, Direction::Vertical, 3).collect();
        assert_eq!(positions, vec![(5, 7), (6, 7), (7, 7)]);
    }

    #[test]
    fn threading_through_old_tiles_extends_the_main_word() {
        // "CAT" is already down; a single new "S" extends it to "CATS" by
        // running through the three pre-existing tiles. `threads_existing`
        // is what correctly recognizes this formed word reaches beyond the
        // newly placed tile into (7,6)-(7,8).
        let mut board = Board::new();
        board.place(7, 6, Tile::letter(b'C')).unwrap();
        board.place(7, 7, Tile::letter(b'A')).unwrap();
        board.place(7, 8, Tile::letter(b'T')).unwrap();
        let tiles = vec![Tile::letter(b'S')];
        let words =
            MoveValidator::validate_place(&board, &dict(), 7, 9, Direction::Horizontal, &tiles)
                .unwrap();
        assert_eq!(words[0].word, "CATS");
    }
}
