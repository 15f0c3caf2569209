//! The fixed A-Z tile alphabet: point values, counts, and the `Tile` a
//! player actually holds or places.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A letter of the alphabet, stored as its `A..=Z` ASCII byte.
pub type Letter = u8;

/// `(count_in_full_set, point_value)` for one letter, indexed `A..=Z`.
const LETTER_TABLE: [(u8, u8); 26] = [
    (9, 1),  // A
    (2, 3),  // B
    (2, 3),  // C
    (4, 2),  // D
    (12, 1), // E
    (2, 4),  // F
    (3, 2),  // G
    (2, 4),  // H
    (9, 1),  // I
    (1, 8),  // J
    (1, 5),  // K
    (4, 1),  // L
    (2, 3),  // M
    (6, 1),  // N
    (8, 1),  // O
    (2, 3),  // P
    (1, 10), // Q
    (6, 1),  // R
    (4, 1),  // S
    (6, 1),  // T
    (4, 1),  // U
    (2, 4),  // V
    (2, 4),  // W
    (1, 8),  // X
    (2, 4),  // Y
    (1, 10), // Z
];

/// Count and point value of the blank tile.
pub const BLANK_COUNT: u8 = 2;
pub const BLANK_VALUE: u8 = 0;

/// Total tiles in a standard set: the 26-letter table plus two blanks.
pub fn total_tile_count() -> u32 {
    LETTER_TABLE.iter().map(|(count, _)| *count as u32).sum::<u32>() + BLANK_COUNT as u32
}

/// Standard count of `letter` in a full 100-tile set.
pub fn letter_count(letter: Letter) -> u8 {
    LETTER_TABLE[letter_index(letter)].0
}

/// Standard point value of `letter`.
pub fn letter_value(letter: Letter) -> u8 {
    LETTER_TABLE[letter_index(letter)].1
}

fn letter_index(letter: Letter) -> usize {
    assert!((b'A'..=b'Z').contains(&letter), "letter out of A-Z range");
    (letter - b'A') as usize
}

/// A single physical tile: the letter it displays, its scoring value, and
/// whether it is a blank standing in for `letter`. Two tiles are equal iff
/// all three fields match — a blank displaying 'A' is not the same tile as
/// a drawn 'A'.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tile {
    pub letter: Letter,
    pub value: u8,
    pub is_blank: bool,
}

impl Tile {
    /// A regular tile drawn from the bag, valued per the standard table.
    pub fn letter(letter: Letter) -> Tile {
        Tile {
            letter,
            value: letter_value(letter),
            is_blank: false,
        }
    }

    /// A blank tile, displaying `letter` but worth zero points permanently.
    pub fn blank(letter: Letter) -> Tile {
        Tile {
            letter,
            value: BLANK_VALUE,
            is_blank: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_sums_to_one_hundred_tiles() {
        assert_eq!(total_tile_count(), 100);
    }

    #[test]
    fn q_is_worth_ten_and_rare() {
        assert_eq!(letter_value(b'Q'), 10);
        assert_eq!(letter_count(b'Q'), 1);
    }

    #[test]
    fn blank_tiles_are_worth_nothing() {
        let t = Tile::blank(b'E');
        assert_eq!(t.value, 0);
        assert!(t.is_blank);
    }

    #[test]
    fn equality_considers_all_three_fields() {
        let drawn = Tile::letter(b'A');
        let blank_as_a = Tile::blank(b'A');
        assert_ne!(drawn, blank_as_a);
        assert_eq!(drawn, Tile::letter(b'A'));
    }
}
