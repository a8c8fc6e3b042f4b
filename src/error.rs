use thiserror::Error;

use crate::action::PlayerId;
use crate::card::{Card, Color};

/// Errors that can occur when manipulating the game state.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("deck is empty")]
    EmptyDeck,
    #[error("game has not been started")]
    NotStarted,
    #[error("game has already been started")]
    AlreadyStarted,
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("player {0} still holds cards")]
    NotRoundWinner(PlayerId),
    #[error("round has already been awarded")]
    RoundAlreadyAwarded,
    #[error("card {0} not in hand")]
    CardNotInHand(Card),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(&'static str),
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("failed to decode snapshot: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

/// Details of invalid player decisions. None of these mutate the game.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("invalid card index: {0}")]
    CardIndex(usize),
    #[error("card {card} does not match top of discard pile {top}")]
    IllegalMove { card: Card, top: Card },
    #[error("must choose a color when playing a wild card")]
    MissingColorChoice,
    #[error("invalid color choice: {0}")]
    InvalidColorChoice(Color),
}
