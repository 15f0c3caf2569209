//! A player's hand: up to seven tiles, the unit the move validator and the
//! AI both draw candidate tiles from.
use crate::tiles::Tile;
use rand::Rng;
use tinyvec::ArrayVec;

/// Maximum tiles a rack can hold at once.
pub const RACK_CAPACITY: usize = 7;

/// Ordered collection of up to [`RACK_CAPACITY`] tiles owned by one player.
#[derive(Debug, Clone, Default)]
pub struct Rack {
    tiles: ArrayVec<[Tile; RACK_CAPACITY]>,
}

impl Rack {
    pub fn new() -> Rack {
        Rack {
            tiles: ArrayVec::new(),
        }
    }

    /// Appends `tile`. Panics if the rack is already full — callers must
    /// check [`Rack::is_full`] before drawing, since a full rack refusing a
    /// tile silently would lose it.
    pub fn add(&mut self, tile: Tile) {
        assert!(!self.is_full(), "cannot add a tile to a full rack");
        self.tiles.push(tile);
    }

    /// Removes one occurrence of `tile` by exact identity (letter, value,
    /// blank flag). Returns `true` if a tile was removed.
    pub fn remove(&mut self, tile: Tile) -> bool {
        if let Some(pos) = self.tiles.iter().position(|t| *t == tile) {
            self.tiles.remove(pos);
            return true;
        }
        false
    }

    /// Removes every tile in `wanted`, restoring nothing on partial failure.
    /// Returns `false` without mutating the rack if any tile is missing.
    pub fn remove_all(&mut self, wanted: &[Tile]) -> bool {
        let mut scratch = self.clone();
        for tile in wanted {
            if !scratch.remove(*tile) {
                return false;
            }
        }
        *self = scratch;
        true
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tiles.len() >= RACK_CAPACITY
    }

    /// Letters currently held, uppercase, blanks represented as `*`.
    pub fn letters(&self) -> String {
        self.tiles
            .iter()
            .map(|t| if t.is_blank { '*' } else { t.letter as char })
            .collect()
    }

    /// Shuffles tile order in place using the caller-supplied generator; the
    /// rack owns no RNG of its own.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        let n = self.tiles.len();
        for i in (1..n).rev() {
            let j = rng.gen_range(0..=i);
            self.tiles.swap(i, j);
        }
    }
}
