use serde::{Deserialize, Serialize};

use crate::card::{Card, Color};
use crate::error::GameError;

/// A seat at the table: a name, a hand and the score carried between rounds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub hand: Vec<Card>,
    pub score: u32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: Vec::new(),
            score: 0,
        }
    }

    /// Removes the first card equal to `card` from the hand.
    pub fn play(&mut self, card: Card) -> Result<Card, GameError> {
        let index = self
            .hand
            .iter()
            .position(|held| *held == card)
            .ok_or(GameError::CardNotInHand(card))?;
        Ok(self.hand.remove(index))
    }

    pub fn draw(&mut self, card: Card) {
        self.hand.push(card);
    }

    pub fn has_won(&self) -> bool {
        self.hand.is_empty()
    }

    pub fn holds_color(&self, color: Color) -> bool {
        self.hand.iter().any(|card| card.color == color)
    }
}
