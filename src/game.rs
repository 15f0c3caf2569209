//! Game state machine: owns the board, the players' racks, and the tile
//! bag, and walks every move through `Proposed → Validated → Scored →
//! Committed` before it touches live state.
//!
//! Splits a placement into a pure check (`validate`/`score`) and a separate
//! apply step (`commit`): neither `validate` nor `score` mutate `Game`, and
//! `commit` re-derives both before applying anything, so a failure midway
//! through never leaves the board half-updated.
use crate::ai;
use crate::ai::CancelToken;
use crate::board::{Board, Direction};
use crate::error::Error;
use crate::gaddag::Dictionary;
use crate::moves::{FormedWord, Move};
use crate::rack::Rack;
use crate::score::ScoreCalculator;
use crate::tilebag::TileBag;
use crate::tiles::Tile;
use crate::validator::MoveValidator;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const EMPTY_RACK_BONUS: i32 = 50;

/// One seat at the table.
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub is_ai: bool,
    pub rack: Rack,
    pub score: i32,
}

/// Inputs fixed for the lifetime of a game.
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub seed: u64,
}

/// The outcome of a successful commit.
#[derive(Debug, Clone, Copy)]
pub struct Committed {
    pub score: i32,
    pub empty_rack_bonus: i32,
}

/// A running game: board, bag, players, turn order, and move history.
pub struct Game {
    board: Board,
    dictionary: Dictionary,
    bag: TileBag,
    players: Vec<Player>,
    current_player: usize,
    consecutive_passes: u32,
    history: Vec<Move>,
    started: bool,
    rng: StdRng,
    cancel: CancelToken,
}

impl Game {
    pub fn new_game(config: GameConfig, dictionary: Dictionary) -> Game {
        Game {
            board: Board::new(),
            dictionary,
            bag: TileBag::standard(),
            players: Vec::new(),
            current_player: 0,
            consecutive_passes: 0,
            history: Vec::new(),
            started: false,
            rng: StdRng::seed_from_u64(config.seed),
            cancel: CancelToken::new(),
        }
    }

    /// A clone of this game's cancel signal. Setting it from another
    /// thread makes any in-flight [`Game::generate_ai_move`] return
    /// [`Move::Pass`] at its next checkpoint; the client is responsible
    /// for timeout polling.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn add_player(&mut self, name: &str, is_ai: bool) -> usize {
        self.players.push(Player {
            name: name.to_string(),
            is_ai,
            rack: Rack::new(),
            score: 0,
        });
        self.players.len() - 1
    }

    /// Deals every player's opening rack from the bag. No-op if already
    /// started.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        for player in &mut self.players {
            for tile in self.bag.draw_up_to(crate::rack::RACK_CAPACITY, &mut self.rng) {
                player.add_tile(tile);
            }
        }
        self.started = true;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    /// Checks a PLACE move against live state without mutating it.
    pub fn validate(&self, mv: &Move) -> Result<Vec<FormedWord>, Error> {
        match mv {
            Move::Place {
                start_row,
                start_col,
                direction,
                tiles,
                ..
            } => MoveValidator::validate_place(
                &self.board,
                &self.dictionary,
                *start_row,
                *start_col,
                *direction,
                tiles,
            ),
            Move::Exchange { player, tiles } => {
                self.check_exchange(*player, tiles)?;
                Ok(Vec::new())
            }
            Move::Pass { .. } => Ok(Vec::new()),
        }
    }

    /// Scores a PLACE move as `validate` would leave the board, without
    /// mutating it. Zero for EXCHANGE/PASS.
    pub fn score(&self, mv: &Move) -> Result<i32, Error> {
        match mv {
            Move::Place {
                start_row,
                start_col,
                direction,
                tiles,
                ..
            } => {
                let words = MoveValidator::validate_place(
                    &self.board,
                    &self.dictionary,
                    *start_row,
                    *start_col,
                    *direction,
                    tiles,
                )?;
                let new_positions =
                    self.new_tile_positions(*start_row, *start_col, *direction, tiles)?;
                ScoreCalculator::score_move(&self.board, &words, &new_positions, tiles.len())
            }
            _ => Ok(0),
        }
    }

    fn new_tile_positions(
        &self,
        start_row: usize,
        start_col: usize,
        direction: Direction,
        tiles: &[Tile],
    ) -> Result<Vec<(usize, usize)>, Error> {
        let (dr, dc): (i32, i32) = match direction {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
        };
        let mut pos = (start_row as i32, start_col as i32);
        let mut out = Vec::with_capacity(tiles.len());
        for _ in tiles {
            loop {
                let square = self.board.get(pos.0 as usize, pos.1 as usize)?;
                if square.tile.is_none() {
                    break;
                }
                pos = (pos.0 + dr, pos.1 + dc);
            }
            out.push((pos.0 as usize, pos.1 as usize));
            pos = (pos.0 + dr, pos.1 + dc);
        }
        Ok(out)
    }

    /// Re-validates and re-scores `mv`, then applies it: removes the
    /// tiles from the rack, places them, marks premium squares consumed,
    /// credits the score, refills the rack, and advances the turn. On any
    /// error, `self` is untouched.
    pub fn commit(&mut self, mv: Move) -> Result<Committed, Error> {
        match mv {
            Move::Place {
                player,
                start_row,
                start_col,
                direction,
                tiles,
                ..
            } => self.commit_place(player, start_row, start_col, direction, tiles),
            Move::Exchange { player, tiles } => self.commit_exchange(player, tiles),
            Move::Pass { player } => self.commit_pass(player),
        }
    }

    fn commit_place(
        &mut self,
        player: usize,
        start_row: usize,
        start_col: usize,
        direction: Direction,
        tiles: Vec<Tile>,
    ) -> Result<Committed, Error> {
        let words = MoveValidator::validate_place(
            &self.board,
            &self.dictionary,
            start_row,
            start_col,
            direction,
            &tiles,
        )?;
        let new_positions = self.new_tile_positions(start_row, start_col, direction, &tiles)?;
        let score = ScoreCalculator::score_move(&self.board, &words, &new_positions, tiles.len())?;

        if !self.players[player].rack.remove_all(&tiles) {
            return Err(Error::TilesNotInRack);
        }

        for (&(r, c), &tile) in new_positions.iter().zip(tiles.iter()) {
            self.board.place(r, c, tile)?;
            self.board.consume_premium(r, c)?;
        }

        let drawn = self
            .bag
            .draw_up_to(crate::rack::RACK_CAPACITY - self.players[player].rack.size(), &mut self.rng);
        for tile in drawn {
            self.players[player].add_tile(tile);
        }

        self.players[player].score += score;
        let mut empty_rack_bonus = 0;
        if self.players[player].rack.is_empty() && self.bag.is_empty() {
            self.players[player].score += EMPTY_RACK_BONUS;
            empty_rack_bonus = EMPTY_RACK_BONUS;
        }

        self.consecutive_passes = 0;
        self.history.push(Move::Place {
            player,
            start_row,
            start_col,
            direction,
            tiles,
            formed_words: words,
            score,
        });
        self.advance_turn();
        Ok(Committed {
            score,
            empty_rack_bonus,
        })
    }

    fn check_exchange(&self, player: usize, tiles: &[Tile]) -> Result<(), Error> {
        if self.bag.len() < crate::rack::RACK_CAPACITY {
            return Err(Error::BagUnderflow);
        }
        let mut scratch = self
            .players
            .get(player)
            .ok_or(Error::TilesNotInRack)?
            .rack
            .clone();
        if !scratch.remove_all(tiles) {
            return Err(Error::TilesNotInRack);
        }
        Ok(())
    }

    fn commit_exchange(&mut self, player: usize, tiles: Vec<Tile>) -> Result<Committed, Error> {
        self.check_exchange(player, &tiles)?;
        self.players[player].rack.remove_all(&tiles);
        self.bag.return_tiles(&tiles);
        let drawn = self.bag.draw_up_to(tiles.len(), &mut self.rng);
        for tile in drawn {
            self.players[player].add_tile(tile);
        }
        self.consecutive_passes = 0;
        self.history.push(Move::Exchange { player, tiles });
        self.advance_turn();
        Ok(Committed {
            score: 0,
            empty_rack_bonus: 0,
        })
    }

    fn commit_pass(&mut self, player: usize) -> Result<Committed, Error> {
        self.consecutive_passes += 1;
        self.history.push(Move::Pass { player });
        self.advance_turn();
        Ok(Committed {
            score: 0,
            empty_rack_bonus: 0,
        })
    }

    /// Generates a move for `player` via the AI heuristics. Never fails.
    pub fn generate_ai_move(&mut self, player: usize) -> Move {
        ai::generate_move(
            &self.board,
            &self.dictionary,
            &self.bag,
            &self.players[player].rack,
            player,
            &mut self.rng,
            &self.cancel,
        )
    }

    pub fn exchange(&mut self, player: usize, tiles: Vec<Tile>) -> Result<Committed, Error> {
        self.commit(Move::Exchange { player, tiles })
    }

    pub fn pass(&mut self, player: usize) -> Result<Committed, Error> {
        self.commit(Move::Pass { player })
    }

    /// `true` once two full rounds of passes have elapsed with no
    /// intervening play.
    pub fn is_over(&self) -> bool {
        !self.players.is_empty()
            && self.consecutive_passes >= 2 * self.players.len() as u32
    }

    fn advance_turn(&mut self) {
        if !self.players.is_empty() {
            self.current_player = (self.current_player + 1) % self.players.len();
        }
    }
}

impl Player {
    fn add_tile(&mut self, tile: Tile) {
        if !self.rack.is_full() {
            self.rack.add(tile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> Dictionary {
        Dictionary::from_words(&["CAT", "CATS", "TS", "OT", "DOG"])
    }

    fn fresh_game() -> Game {
        let mut game = Game::new_game(GameConfig { seed: 7 }, dict());
        game.add_player("Ada", false);
        game.add_player("Bot", true);
        game.start();
        game
    }

    #[test]
    fn start_deals_full_racks() {
        let game = fresh_game();
        for player in game.players() {
            assert_eq!(player.rack.size(), crate::rack::RACK_CAPACITY);
        }
    }

    #[test]
    fn commit_place_scores_and_advances_turn() {
        let mut game = fresh_game();
        let rack_letters: Vec<Tile> = game.players()[0].rack.tiles().to_vec();
        // Force a known rack so the opening move is deterministic.
        game.players[0].rack = Rack::new();
        for c in [b'C', b'A', b'T', b'X', b'Y', b'Z', b'Q'] {
            game.players[0].rack.add(Tile::letter(c));
        }
        let _ = rack_letters;

        let tiles = vec![Tile::letter(b'C'), Tile::letter(b'A'), Tile::letter(b'T')];
        let mv = Move::place(0, 7, 6, Direction::Horizontal, tiles);
        let committed = game.commit(mv).unwrap();
        assert_eq!(committed.score, 2 * (3 + 1 + 1));
        assert_eq!(game.players()[0].score, committed.score);
        assert_eq!(game.current_player(), 1);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn failed_commit_leaves_state_untouched() {
        let mut game = fresh_game();
        let before_score = game.players()[0].score;
        let tiles = vec![Tile::letter(b'D'), Tile::letter(b'O'), Tile::letter(b'G')];
        // Off-center opening move must fail validation before any mutation.
        let mv = Move::place(0, 0, 0, Direction::Horizontal, tiles);
        let err = game.commit(mv).unwrap_err();
        assert!(matches!(err, Error::FirstMoveMissesCenter));
        assert_eq!(game.players()[0].score, before_score);
        assert_eq!(game.players()[0].rack.size(), crate::rack::RACK_CAPACITY);
        assert!(game.history().is_empty());
    }

    #[test]
    fn two_rounds_of_passes_end_the_game() {
        let mut game = fresh_game();
        assert!(!game.is_over());
        game.pass(0).unwrap();
        game.pass(1).unwrap();
        assert!(!game.is_over());
        game.pass(0).unwrap();
        game.pass(1).unwrap();
        assert!(game.is_over());
    }

    #[test]
    fn exchange_requires_a_full_bag() {
        let mut game = fresh_game();
        // Drain the bag below the exchange threshold.
        while game.bag.len() >= crate::rack::RACK_CAPACITY {
            game.bag.draw(&mut game.rng);
        }
        let tiles = vec![game.players()[0].rack.tiles()[0]];
        let err = game.exchange(0, tiles).unwrap_err();
        assert!(matches!(err, Error::BagUnderflow));
    }

    #[test]
    fn cancel_token_stops_ai_move_generation() {
        let mut game = fresh_game();
        game.cancel_token().cancel();
        let mv = game.generate_ai_move(1);
        assert!(matches!(mv, Move::Pass { .. }));
    }
}
