use thiserror::Error;

use crate::TermInt;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("no free cell left to place food on")]
    GridFull,
    #[error("terminal is {width}x{height}, the game needs at least {min_width}x{min_height}")]
    TerminalTooSmall {
        width: TermInt,
        height: TermInt,
        min_width: TermInt,
        min_height: TermInt,
    },
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
