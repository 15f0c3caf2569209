//! The pool of undrawn tiles. `draw` and `return_tiles` are mutations
//! executed only during commit; randomness is always supplied by the
//! caller, never owned here.
use crate::tiles::{letter_count, Tile, BLANK_COUNT};
use multiset::HashMultiSet;
use rand::Rng;

/// Tile identity inside the bag: `0` is the blank sentinel, otherwise the
/// tile's ASCII `A..=Z` byte.
pub type Code = u8;

pub const BLANK_CODE: Code = 0;

/// Mutable pool of undrawn tiles.
#[derive(Debug, Clone)]
pub struct TileBag {
    // index 0 = blanks remaining, 1..=26 = A..=Z remaining
    counts: [u32; 27],
}

impl TileBag {
    /// The standard 100-tile Scrabble distribution.
    pub fn standard() -> TileBag {
        let mut counts = [0u32; 27];
        counts[0] = BLANK_COUNT as u32;
        for letter in b'A'..=b'Z' {
            counts[(letter - b'A' + 1) as usize] = letter_count(letter) as u32;
        }
        TileBag { counts }
    }

    pub fn empty() -> TileBag {
        TileBag { counts: [0u32; 27] }
    }

    /// Total tiles remaining.
    pub fn len(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maps a tile to its `counts` index: `0` for a blank, `1..=26` for
    /// `A..=Z`.
    fn code_of(tile: Tile) -> Code {
        if tile.is_blank {
            BLANK_CODE
        } else {
            tile.letter - b'A' + 1
        }
    }

    fn tile_of(code: Code) -> Tile {
        if code == BLANK_CODE {
            // The displayed letter is assigned by the caller at placement
            // time; 'A' is only a placeholder until then.
            Tile::blank(b'A')
        } else {
            Tile::letter(b'A' + code - 1)
        }
    }

    /// Draws one tile uniformly at random from the remaining pool.
    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> Option<Tile> {
        let total = self.len();
        if total == 0 {
            return None;
        }
        let mut index = rng.gen_range(0..total);
        for (i, count) in self.counts.iter_mut().enumerate() {
            let c = *count as usize;
            if index < c {
                *count -= 1;
                return Some(Self::tile_of(i as Code));
            }
            index -= c;
        }
        unreachable!("index within total but no bucket matched")
    }

    /// Draws up to `n` tiles, fewer if the bag runs out first.
    pub fn draw_up_to<R: Rng>(&mut self, n: usize, rng: &mut R) -> Vec<Tile> {
        (0..n).filter_map(|_| self.draw(rng)).collect()
    }

    /// Returns tiles to the bag, e.g. after an exchange. A blank is returned
    /// blank regardless of the letter it was displaying.
    pub fn return_tiles(&mut self, tiles: &[Tile]) {
        for &tile in tiles {
            self.counts[Self::code_of(tile) as usize] += 1;
        }
    }

    /// A snapshot of the remaining tiles as a multiset keyed by letter code
    /// (0 = blank), for callers that want multiset set algebra against a
    /// rack or another snapshot rather than raw counts.
    pub fn as_multiset(&self) -> HashMultiSet<Code> {
        let mut m = HashMultiSet::new();
        for (i, &count) in self.counts.iter().enumerate() {
            if count > 0 {
                m.insert_times(i as Code, count as usize);
            }
        }
        m
    }
}

impl Default for TileBag {
    fn default() -> Self {
        TileBag::standard()
    }
}
