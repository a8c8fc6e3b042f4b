use serde::{Deserialize, Serialize};

use crate::card::{Card, Color};

/// Zero-based index of a player within the game.
pub type PlayerId = usize;

/// Direction the turn pointer travels around the table.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// +1 for clockwise, -1 for counter-clockwise.
    pub fn sign(&self) -> i8 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    pub fn flip(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Index reached from `from` after one turn step at a table of `players` seats.
    pub fn step(&self, from: PlayerId, players: usize) -> PlayerId {
        match self {
            Direction::Clockwise => (from + 1) % players,
            Direction::CounterClockwise => (from + players - 1) % players,
        }
    }
}

/// Decision supplied by the caller for the current player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Play the card at `card_index` (zero-based) from the current hand.
    ///
    /// `color` is required for wild cards; `challenge` is the answer of the
    /// targeted player when the card is a Wild Draw Four.
    Play {
        card_index: usize,
        color: Option<Color>,
        challenge: bool,
    },
    /// Draw a single card.
    Draw,
}

impl Action {
    pub fn play(card_index: usize) -> Self {
        Action::Play {
            card_index,
            color: None,
            challenge: false,
        }
    }

    pub fn play_wild(card_index: usize, color: Color) -> Self {
        Action::Play {
            card_index,
            color: Some(color),
            challenge: false,
        }
    }
}

/// Side effect triggered by the rank of a played card.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    None,
    Reversed,
    Skipped {
        player: PlayerId,
    },
    DrewTwo {
        player: PlayerId,
    },
    DrawFour {
        player: PlayerId,
        challenged: bool,
        challenge_succeeded: bool,
        drawn: usize,
    },
}

/// Result of a successful play, for the caller to render.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayOutcome {
    pub player: PlayerId,
    /// The card as it now sits on the discard pile.
    pub card: Card,
    /// Color picked for a wild card still in its wild state when played.
    pub chosen_color: Option<Color>,
    pub effect: Effect,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TurnOutcome {
    Played(PlayOutcome),
    Drew { player: PlayerId, card: Card },
}
