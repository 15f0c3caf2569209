use anyhow::Result;
use scrabble_engine::{Dictionary, Game, GameConfig, Move};
use std::time::Instant;

const WORDS: &[&str] = &[
    "CAT", "CATS", "CARE", "CARES", "CARD", "CARDS", "BAT", "BATS", "RATE", "RATES", "TAR",
    "TARS", "STAR", "STARE", "START", "ARTS", "ACT", "ACTS", "TACT", "REST", "RESTS",
];

fn run() -> Result<()> {
    let dictionary = Dictionary::from_words(WORDS);
    let mut game = Game::new_game(GameConfig { seed: 7 }, dictionary);
    game.add_player("Bot", true);
    game.start();

    let now = Instant::now();
    let candidates: Vec<Move> = (0..10).map(|_| game.generate_ai_move(0)).collect();
    let dt = now.elapsed().as_secs_f32();
    println!("generated 10 candidate moves in {:.4}s", dt);

    for mv in candidates {
        match mv {
            Move::Place {
                start_row,
                start_col,
                direction,
                score,
                ..
            } => println!("place ({start_row},{start_col}) {direction:?} for {score}"),
            other => println!("{:?}", other),
        }
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:?}", err);
    }
}
