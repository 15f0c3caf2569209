//! Generates a move for an AI-controlled player: enumerate candidates by
//! walking anchor squares, score each through the validator/calculator,
//! then rank with a strategic heuristic and pick among the top few.
use crate::board::{Board, Direction, BOARD_SIZE, CENTER};
use crate::gaddag::Dictionary;
use crate::moves::Move;
use crate::rack::Rack;
use crate::score::ScoreCalculator;
use crate::tilebag::TileBag;
use crate::tiles::Tile;
use crate::validator::MoveValidator;
use rand::Rng;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cooperative cancel signal for an in-flight [`generate_move`] search.
/// Checked at anchor-square and candidate-evaluation boundaries; setting it
/// makes the search return [`Move::Pass`] at the next checkpoint rather than
/// completing.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

const RACK_LEAVE_WEIGHT: f64 = 0.15;
const PREMIUM_SQUARE_WEIGHT: f64 = 0.15;
const BONUS_ALL_TILES: f64 = 10.0;
const BONUS_MULTI_WORD: f64 = 5.0;

struct Candidate {
    start_row: usize,
    start_col: usize,
    direction: Direction,
    tiles: Vec<Tile>,
    score: i32,
    word_count: usize,
}

impl Candidate {
    fn composite(&self, rack_after: &[Tile], board: &Board) -> f64 {
        let leave = rack_leave_value(rack_after);
        let premium =
            premium_usage_value(board, self.start_row, self.start_col, self.direction, &self.tiles);
        let mut strategic = RACK_LEAVE_WEIGHT * leave + PREMIUM_SQUARE_WEIGHT * premium;
        if self.tiles.len() == 7 {
            strategic += BONUS_ALL_TILES;
        }
        if self.word_count > 1 {
            strategic += BONUS_MULTI_WORD;
        }
        self.score as f64 + strategic
    }
}

/// Vowel ratio, blanks, duplicates, and hard letters in the tiles a move
/// would leave behind on the rack.
fn rack_leave_value(leave: &[Tile]) -> f64 {
    if leave.is_empty() {
        return 0.0;
    }
    let vowels: HashSet<u8> = [b'A', b'E', b'I', b'O', b'U'].iter().copied().collect();
    let vowel_count = leave.iter().filter(|t| vowels.contains(&t.letter)).count();
    let ratio = vowel_count as f64 / leave.len() as f64;
    let mut value = if (0.3..=0.6).contains(&ratio) {
        5.0
    } else {
        -10.0 * (ratio - 0.4).abs()
    };
    value += 8.0 * leave.iter().filter(|t| t.is_blank).count() as f64;
    value += 3.0 * leave.iter().filter(|t| t.letter == b'S').count() as f64;

    let mut counts = [0u32; 26];
    for t in leave {
        counts[(t.letter - b'A') as usize] += 1;
    }
    for &c in &counts {
        if c > 2 {
            value -= 3.0 * (c - 2) as f64;
        }
    }
    let hard: HashSet<u8> = [b'J', b'Q', b'X', b'Z'].iter().copied().collect();
    let hard_count = leave.iter().filter(|t| hard.contains(&t.letter)).count();
    if hard_count > 1 {
        value -= 5.0 * (hard_count - 1) as f64;
    }
    value
}

fn premium_usage_value(
    board: &Board,
    start_row: usize,
    start_col: usize,
    direction: Direction,
    tiles: &[Tile],
) -> f64 {
    let (dr, dc): (i32, i32) = match direction {
        Direction::Horizontal => (0, 1),
        Direction::Vertical => (1, 0),
    };
    let mut total = 0.0;
    let mut pos = (start_row as i32, start_col as i32);
    for tile in tiles {
        loop {
            match board.get(pos.0 as usize, pos.1 as usize) {
                Ok(square) if square.tile.is_some() => pos = (pos.0 + dr, pos.1 + dc),
                _ => break,
            }
        }
        if let Ok(square) = board.get(pos.0 as usize, pos.1 as usize) {
            if !square.premium_consumed {
                use crate::board::Premium::*;
                total += match square.premium {
                    TripleWord => 15.0,
                    DoubleWord | Center => 8.0,
                    TripleLetter => 3.0 * (tile.value as f64).min(8.0),
                    DoubleLetter => 1.5 * (tile.value as f64).min(8.0),
                    None => 0.0,
                };
            }
        }
        pos = (pos.0 + dr, pos.1 + dc);
    }
    total
}

/// Penalizes 'Q' without 'U'; blanks are the most valuable tile to keep
/// unless forced. Used only to rank exchange fallback candidates.
fn exchange_value(tile: Tile, has_u: bool) -> f64 {
    if tile.is_blank {
        return 20.0;
    }
    let mut value = tile.value as f64;
    if tile.letter == b'Q' && !has_u {
        value -= 10.0;
    }
    value
}

fn without(rack: &[Tile], used: &[Tile]) -> Vec<Tile> {
    let mut remaining = rack.to_vec();
    for &tile in used {
        if let Some(pos) = remaining.iter().position(|t| *t == tile) {
            remaining.remove(pos);
        }
    }
    remaining
}

fn anchor_squares(board: &Board) -> Vec<(usize, usize)> {
    let mut anchors = Vec::new();
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            if let Ok(square) = board.get(r, c) {
                if square.tile.is_none() {
                    if let Ok(neighbors) = board.adjacent_occupied(r, c) {
                        if !neighbors.is_empty() {
                            anchors.push((r, c));
                        }
                    }
                }
            }
        }
    }
    anchors
}

/// Builds the tile sequence needed to spell `word` from the rack,
/// substituting a blank for any letter the rack doesn't hold directly.
fn tiles_for_word(rack: &[Tile], word: &str) -> Option<Vec<Tile>> {
    let mut remaining = rack.to_vec();
    let mut out = Vec::with_capacity(word.len());
    for ch in word.chars() {
        let letter = ch as u8;
        if let Some(pos) = remaining.iter().position(|t| !t.is_blank && t.letter == letter) {
            out.push(remaining.remove(pos));
        } else if let Some(pos) = remaining.iter().position(|t| t.is_blank) {
            remaining.remove(pos);
            out.push(Tile::blank(letter));
        } else {
            return None;
        }
    }
    Some(out)
}

fn try_candidate(
    board: &Board,
    dictionary: &Dictionary,
    start_row: usize,
    start_col: usize,
    direction: Direction,
    new_tiles: Vec<Tile>,
) -> Option<Candidate> {
    let words =
        MoveValidator::validate_place(board, dictionary, start_row, start_col, direction, &new_tiles)
            .ok()?;
    let new_positions = new_tile_positions(board, start_row, start_col, direction, &new_tiles)?;
    let score = ScoreCalculator::score_move(board, &words, &new_positions, new_tiles.len()).ok()?;
    if score == 0 {
        return None;
    }
    Some(Candidate {
        start_row,
        start_col,
        direction,
        tiles: new_tiles,
        score,
        word_count: words.len(),
    })
}

fn new_tile_positions(
    board: &Board,
    start_row: usize,
    start_col: usize,
    direction: Direction,
    tiles: &[Tile],
) -> Option<Vec<(usize, usize)>> {
    let (dr, dc): (i32, i32) = match direction {
        Direction::Horizontal => (0, 1),
        Direction::Vertical => (1, 0),
    };
    let mut pos = (start_row as i32, start_col as i32);
    let mut out = Vec::with_capacity(tiles.len());
    for _ in tiles {
        loop {
            let square = board.get(pos.0 as usize, pos.1 as usize).ok()?;
            if square.tile.is_none() {
                break;
            }
            pos = (pos.0 + dr, pos.1 + dc);
        }
        out.push((pos.0 as usize, pos.1 as usize));
        pos = (pos.0 + dr, pos.1 + dc);
    }
    Some(out)
}

/// Generates a move for `rack` against `board`. Never fails outright: a
/// candidate-less board degrades to exchange or pass.
pub fn generate_move<R: Rng>(
    board: &Board,
    dictionary: &Dictionary,
    bag: &TileBag,
    rack: &Rack,
    player: usize,
    rng: &mut R,
    cancel: &CancelToken,
) -> Move {
    if rack.is_empty() {
        return Move::Pass { player };
    }

    let candidates = if board.is_empty() {
        opening_candidates(board, dictionary, rack)
    } else {
        anchor_candidates(board, dictionary, rack, cancel)
    };
    if cancel.is_cancelled() {
        return Move::Pass { player };
    }

    let mut dedup_seen: HashSet<(usize, usize, Direction, Vec<Tile>)> = HashSet::new();
    let unique: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| dedup_seen.insert((c.start_row, c.start_col, c.direction, c.tiles.clone())))
        .collect();

    if unique.is_empty() {
        return exchange_or_pass(bag, rack, player);
    }

    #[cfg(feature = "rayon")]
    let mut ranked: Vec<(f64, Candidate)> = unique
        .into_par_iter()
        .filter_map(|c| {
            if cancel.is_cancelled() {
                return None;
            }
            let leave = without(rack.tiles(), &c.tiles);
            let composite = c.composite(&leave, board);
            Some((composite, c))
        })
        .collect();
    #[cfg(not(feature = "rayon"))]
    let mut ranked: Vec<(f64, Candidate)> = Vec::new();
    #[cfg(not(feature = "rayon"))]
    for c in unique {
        if cancel.is_cancelled() {
            break;
        }
        let leave = without(rack.tiles(), &c.tiles);
        let composite = c.composite(&leave, board);
        ranked.push((composite, c));
    }

    if ranked.is_empty() {
        return Move::Pass { player };
    }
    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    let k = ranked.len().min(3);
    let chosen_index = rng.gen_range(0..k);
    let chosen = ranked.into_iter().nth(chosen_index).unwrap().1;
    Move::place(
        player,
        chosen.start_row,
        chosen.start_col,
        chosen.direction,
        chosen.tiles,
    )
}

fn opening_candidates(board: &Board, dictionary: &Dictionary, rack: &Rack) -> Vec<Candidate> {
    let rack_letters = rack.letters();
    let mut words: HashSet<String> = HashSet::new();
    for letter in rack_letters.chars().filter(|c| *c != '*') {
        words.extend(dictionary.words_from(&rack_letters, letter, true, true));
    }
    let mut out = Vec::new();
    for word in words {
        for offset in 0..word.len() {
            if offset > CENTER {
                continue;
            }
            if let Some(new_tiles) = tiles_for_word(rack.tiles(), &word) {
                if let Some(c) = try_candidate(
                    board,
                    dictionary,
                    CENTER,
                    CENTER - offset,
                    Direction::Horizontal,
                    new_tiles.clone(),
                ) {
                    out.push(c);
                }
                if let Some(c) = try_candidate(
                    board,
                    dictionary,
                    CENTER - offset,
                    CENTER,
                    Direction::Vertical,
                    new_tiles,
                ) {
                    out.push(c);
                }
            }
        }
    }
    out
}

fn anchor_candidates(
    board: &Board,
    dictionary: &Dictionary,
    rack: &Rack,
    cancel: &CancelToken,
) -> Vec<Candidate> {
    let rack_letters = rack.letters();
    let mut out = Vec::new();
    for (ar, ac) in anchor_squares(board) {
        if cancel.is_cancelled() {
            break;
        }
        for direction in [Direction::Horizontal, Direction::Vertical] {
            for letter in rack_letters.chars().filter(|c| *c != '*') {
                let words = dictionary.words_from(&rack_letters, letter, true, true);
                for word in words {
                    for (i, wc) in word.chars().enumerate() {
                        if wc != letter {
                            continue;
                        }
                        let (start_row, start_col) = match direction {
                            Direction::Horizontal => {
                                if ac < i {
                                    continue;
                                }
                                (ar, ac - i)
                            }
                            Direction::Vertical => {
                                if ar < i {
                                    continue;
                                }
                                (ar - i, ac)
                            }
                        };
                        if let Some(new_tiles) = tiles_for_word(rack.tiles(), &word) {
                            if let Some(c) = try_candidate(
                                board,
                                dictionary,
                                start_row,
                                start_col,
                                direction,
                                new_tiles,
                            ) {
                                out.push(c);
                            }
                        }
                    }
                }
            }
        }
    }
    out
}

fn exchange_or_pass(bag: &TileBag, rack: &Rack, player: usize) -> Move {
    if bag.len() < 7 {
        return Move::Pass { player };
    }
    let has_u = rack.tiles().iter().any(|t| t.letter == b'U');
    let mut by_value: Vec<Tile> = rack.tiles().to_vec();
    by_value.sort_by(|a, b| {
        exchange_value(*a, has_u)
            .partial_cmp(&exchange_value(*b, has_u))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let to_exchange: Vec<Tile> = by_value.into_iter().take(2).collect();
    Move::Exchange {
        player,
        tiles: to_exchange,
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;
    use crate::rack::Rack;
    use rand::SeedableRng;

    fn dict() -> Dictionary {
        Dictionary::from_words(&["CAT", "CATS", "AT", "TA", "ACT"])
    }

    #[test]
    fn empty_rack_passes() {
        let board = Board::new();
        let bag = TileBag::standard();
        let rack = Rack::new();
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let mv = generate_move(&board, &dict(), &bag, &rack, 0, &mut rng, &CancelToken::new());
        assert!(matches!(mv, Move::Pass { .. }));
    }

    #[test]
    fn opening_move_plays_a_word_through_center() -> Result<()> {
        let board = Board::new();
        let bag = TileBag::standard();
        let mut rack = Rack::new();
        for c in [b'C', b'A', b'T', b'X', b'Y', b'Z', b'Q'] {
            rack.add(Tile::letter(c));
        }
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let mv = generate_move(&board, &dict(), &bag, &rack, 0, &mut rng, &CancelToken::new());
        match mv {
            Move::Place { score, .. } => assert!(score > 0),
            other => panic!("expected a placement, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn no_candidates_falls_back_to_exchange_or_pass() {
        let board = Board::new();
        let bag = TileBag::standard();
        let mut rack = Rack::new();
        for c in [b'Q', b'X', b'Z', b'J', b'V', b'W', b'K'] {
            rack.add(Tile::letter(c));
        }
        let empty_dict: Dictionary = Dictionary::from_words::<&str>(&[]);
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let mv = generate_move(
            &board,
            &empty_dict,
            &bag,
            &rack,
            0,
            &mut rng,
            &CancelToken::new(),
        );
        assert!(matches!(mv, Move::Exchange { .. } | Move::Pass { .. }));
    }

    #[test]
    fn a_pre_cancelled_token_passes_immediately() {
        let board = Board::new();
        let bag = TileBag::standard();
        let mut rack = Rack::new();
        for c in [b'C', b'A', b'T', b'X', b'Y', b'Z', b'Q'] {
            rack.add(Tile::letter(c));
        }
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let cancel = CancelToken::new();
        cancel.cancel();
        let mv = generate_move(&board, &dict(), &bag, &rack, 0, &mut rng, &cancel);
        assert!(matches!(mv, Move::Pass { .. }));
    }
}
