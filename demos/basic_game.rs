use anyhow::Result;
use scrabble_engine::{Dictionary, Direction, Game, GameConfig, Move, Tile};

const WORDS: &[&str] = &[
    "CAT", "CATS", "CARE", "CARES", "CARD", "CARDS", "BAT", "BATS", "RATE", "RATES", "TAR",
    "TARS", "STAR", "STARE", "START", "ARTS", "ACT", "ACTS",
];

fn render(game: &Game) -> String {
    let board = game.board();
    (0..scrabble_engine::BOARD_SIZE)
        .map(|r| {
            (0..scrabble_engine::BOARD_SIZE)
                .map(|c| match board.get(r, c).unwrap().tile {
                    Some(tile) => tile.letter as char,
                    None => '.',
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn run() -> Result<()> {
    let dictionary = Dictionary::from_words(WORDS);
    let mut game = Game::new_game(GameConfig { seed: 42 }, dictionary);
    game.add_player("Ada", false);
    game.add_player("Bot", true);
    game.start();

    let tiles = vec![Tile::letter(b'C'), Tile::letter(b'A'), Tile::letter(b'T')];
    let mv = Move::place(0, scrabble_engine::CENTER, scrabble_engine::CENTER - 1, Direction::Horizontal, tiles);
    let committed = game.commit(mv)?;
    println!("Ada scored {}", committed.score);

    let ai_move = game.generate_ai_move(1);
    println!("Bot proposes: {:?}", ai_move);
    if let Move::Place { .. } = ai_move {
        let committed = game.commit(ai_move)?;
        println!("Bot scored {}", committed.score);
    }

    println!("{}", render(&game));
    for player in game.players() {
        println!("{}: {} points", player.name, player.score);
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:?}", err);
    }
}
