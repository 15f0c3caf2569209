#![deny(clippy::wrong_pub_self_convention, clippy::used_underscore_binding,
   clippy::map_unwrap_or,
   clippy::int_plus_one, clippy::string_add_assign, clippy::if_not_else,
   clippy::invalid_upcast_comparisons,
   clippy::mutex_integer, clippy::mut_mut, clippy::items_after_statements,
   clippy::print_stdout, clippy::mem_forget, clippy::maybe_infinite_iter)]

//! A Scrabble-style word-game engine for Rust.
//! <br>
//! This crate validates and scores tile placements on a standard 15x15
//! board, enumerates every word a rack can form through a fixed anchor
//! letter via a GADDAG-backed dictionary, and drives a full game's state
//! machine from opening rack to commit. It can use the `rayon` crate to
//! evaluate AI move candidates in parallel.
//!
//! # How to use this crate
//! Build a [`gaddag::Dictionary`] from a word list, create a [`game::Game`]
//! with it, add players, and `start` the game to deal opening racks.
//! Proposed moves walk `validate` → `score` → `commit`; AI players instead
//! call `generate_ai_move`, which never fails and falls back to an
//! exchange or a pass.
//!
//! # Basic usage
//!  ```
//! # use scrabble_engine::{Direction, GameConfig, Game, Dictionary, Move};
//! let dictionary = Dictionary::from_words(&["CAT", "CATS"]);
//! let mut game = Game::new_game(GameConfig { seed: 1 }, dictionary);
//! game.add_player("Ada", false);
//! game.add_player("Bot", true);
//! game.start();
//! # Ok::<(), scrabble_engine::Error>(())
//! ```
mod ai;
mod board;
mod error;
mod gaddag;
mod game;
mod labelset;
mod moves;
mod rack;
mod score;
mod tilebag;
mod tiles;
mod validator;

pub use crate::ai::CancelToken;
pub use crate::board::{Board, Direction, Premium, Square, BOARD_SIZE, CENTER};
pub use crate::error::Error;
pub use crate::gaddag::Dictionary;
pub use crate::game::{Committed, Game, GameConfig, Player, EMPTY_RACK_BONUS};
pub use crate::moves::{FormedWord, Move};
pub use crate::rack::{Rack, RACK_CAPACITY};
pub use crate::score::{ScoreCalculator, BINGO_BONUS};
pub use crate::tilebag::TileBag;
pub use crate::tiles::{Letter, Tile};
pub use crate::validator::MoveValidator;
