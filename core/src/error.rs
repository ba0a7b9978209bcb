use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("Invalid cell index")]
    InvalidCell,
    #[error("Invalid color id {0}, expected 0 to 26")]
    InvalidColorId(u8),
    #[error("Cells can only be toggled while answering a stage")]
    NotAcceptingInput,
    #[error("Module already solved, no new interactions are accepted")]
    AlreadySolved,
    #[error("Stage zero pure color counts are not pairwise distinct")]
    IndistinctPrimaryCounts,
    #[error("Stage match channels do not rotate from the starting channel")]
    ChannelRotationMismatch,
}

pub type Result<T> = core::result::Result<T, QuizError>;

/// Rejections raised by the textual command adapter. Messages are meant to be
/// shown back to whoever issued the command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
    #[error("'go' does not take any arguments")]
    UnexpectedArguments,
    #[error("Invalid cell coordinate '{0}'")]
    InvalidCoordinate(String),
    #[error("You have duplicate inputs!")]
    DuplicateCells,
    #[error("You cannot submit a group of cells in this phase!")]
    SubmitOutsideInput,
    #[error("You must use 'submit' to submit a group of cells to press!")]
    GoDuringInput,
}
