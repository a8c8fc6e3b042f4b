use serde::{Deserialize, Serialize};

use crate::action::{Direction, PlayerId};
use crate::card::{Card, MAX_PLAYERS, MIN_PLAYERS, TOTAL_CARDS};
use crate::error::GameError;

/// Global constants for a running game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    pub num_players: usize,
    pub starting_cards: usize,
    pub score_limit: Option<u32>,
}

impl GameSettings {
    pub fn new(
        num_players: usize,
        starting_cards: usize,
        score_limit: Option<u32>,
    ) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(GameError::InvalidConfiguration(
                "players must be between 2 and 10",
            ));
        }
        if starting_cards == 0 {
            return Err(GameError::InvalidConfiguration(
                "starting cards must be positive",
            ));
        }
        // One card has to remain for the opening discard.
        if num_players
            .checked_mul(starting_cards)
            .is_none_or(|dealt| dealt >= TOTAL_CARDS)
        {
            return Err(GameError::InvalidConfiguration(
                "not enough cards to deal starting hands",
            ));
        }
        Ok(Self {
            num_players,
            starting_cards,
            score_limit,
        })
    }
}

/// Status of the entire game, derived from the piles and hands.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Setup,
    InProgress,
    Finished { winner: PlayerId },
}

/// Public portion of a player's state that all opponents may observe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublicState {
    pub id: PlayerId,
    pub name: String,
    pub hand_size: usize,
    pub score: u32,
    pub is_current: bool,
}

/// Render-ready snapshot of the table from the current player's seat.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub settings: GameSettings,
    pub status: GameStatus,
    pub current_player: PlayerId,
    pub direction: Direction,
    pub top_card: Option<Card>,
    pub draw_pile_count: usize,
    pub discard_pile_count: usize,
    pub players: Vec<PlayerPublicState>,
    pub hand: Vec<Card>,
}
