//! Uno game engine: card matching, draw and discard piles, turn order and
//! special-card effects for a table of local players.

pub mod action;
pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod player;
pub mod score;
pub mod snapshot;
pub mod state;
pub mod visualize;

pub use crate::action::{Action, Direction, Effect, PlayOutcome, PlayerId, TurnOutcome};
pub use crate::card::{Card, Color, Rank, full_deck};
pub use crate::deck::Deck;
pub use crate::error::{GameError, InvalidAction};
pub use crate::game::{Game, GameBuilder, GameConfig};
pub use crate::player::Player;
pub use crate::score::{calculate_score, standings};
pub use crate::snapshot::GameSnapshot;
pub use crate::state::{GameSettings, GameStateView, GameStatus, PlayerPublicState};
pub use crate::visualize::{
    VisualOptions, describe_outcome, render_state, render_state_with_options,
};
