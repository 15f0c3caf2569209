use thiserror::Error;

#[derive(Error, Debug)]
/// Errors surfaced at the engine's client boundary.
pub enum Error {
    /// Error reading the dictionary word file.
    #[error("dictionary file \"{path}\" could not be read")]
    DictionaryLoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A square outside `[0, 15)` was addressed, or a placement runs off the board.
    #[error("position ({row}, {col}) is out of bounds")]
    OutOfBounds { row: i32, col: i32 },

    /// A `Place` move carried zero tiles.
    #[error("move has no tiles")]
    NoTiles,

    /// Newly placed tiles are not all on the same row or column.
    #[error("tiles are not collinear")]
    NotInLine,

    /// The opening move does not cover the center square.
    #[error("first move must cover the center square")]
    FirstMoveMissesCenter,

    /// One of the words formed by a placement is not in the dictionary.
    #[error("\"{0}\" is not in the dictionary")]
    NotInDictionary(String),

    /// The placement does not touch any existing tile, and it is not the first move.
    #[error("placement is not connected to existing tiles")]
    Disconnected,

    /// An exchange referenced tiles the rack does not hold.
    #[error("rack does not hold the requested tiles")]
    TilesNotInRack,

    /// A placement tile conflicts with a different tile already on the board.
    #[error("tile at ({row}, {col}) does not match the board")]
    TileMismatch { row: usize, col: usize },

    /// An exchange was requested with fewer than 7 tiles left in the bag.
    #[error("bag holds fewer than 7 tiles")]
    BagUnderflow,
}
