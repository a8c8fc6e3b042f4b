use serde::{Deserialize, Serialize};

use crate::action::{Direction, PlayerId};
use crate::card::{Card, MAX_PLAYERS, MIN_PLAYERS, is_standard_set};
use crate::error::GameError;
use crate::player::Player;

/// Complete, self-describing game state.
///
/// The byte form produced by [`GameSnapshot::to_bytes`] is opaque; callers
/// only rely on it restoring an identical game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub players: Vec<Player>,
    /// Draw pile, top card last.
    pub deck: Vec<Card>,
    /// Discard pile, top card last.
    pub discard_pile: Vec<Card>,
    pub current_player_index: PlayerId,
    pub direction: Direction,
    pub starting_cards: usize,
    pub score_limit: Option<u32>,
    /// Set once the current round's points have been credited.
    pub round_awarded: bool,
}

impl GameSnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>, GameError> {
        Ok(bincode::serde::encode_to_vec(
            self,
            bincode::config::standard(),
        )?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GameError> {
        let (snapshot, _) =
            bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(snapshot)
    }

    /// Checks the structural invariants a restored game depends on.
    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players.len()) {
            return Err(GameError::InvalidSnapshot("players must be between 2 and 10"));
        }
        if self.current_player_index >= self.players.len() {
            return Err(GameError::InvalidSnapshot("current player index out of range"));
        }
        if self.starting_cards == 0 {
            return Err(GameError::InvalidSnapshot("starting cards must be positive"));
        }
        let cards = self
            .deck
            .iter()
            .chain(self.discard_pile.iter())
            .chain(self.players.iter().flat_map(|player| player.hand.iter()));
        if !is_standard_set(cards) {
            return Err(GameError::InvalidSnapshot(
                "cards do not form a standard 108-card deck",
            ));
        }
        let dealt = self.players.iter().any(|player| !player.hand.is_empty());
        if self.discard_pile.is_empty() && dealt {
            return Err(GameError::InvalidSnapshot("dealt game without a discard pile"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Color, full_deck};

    fn dealt_snapshot() -> GameSnapshot {
        let mut deck = full_deck();
        let mut alice = Player::new("Alice");
        let mut bob = Player::new("Bob");
        alice.hand = deck.split_off(deck.len() - 3);
        bob.hand = deck.split_off(deck.len() - 3);
        bob.score = 40;
        let discard_pile = vec![deck.remove(0)];
        GameSnapshot {
            players: vec![alice, bob],
            deck,
            discard_pile,
            current_player_index: 1,
            direction: Direction::CounterClockwise,
            starting_cards: 3,
            score_limit: Some(500),
            round_awarded: false,
        }
    }

    #[test]
    fn bytes_restore_identical_snapshot() -> Result<(), GameError> {
        let snapshot = dealt_snapshot();
        let bytes = snapshot.to_bytes()?;
        assert_eq!(GameSnapshot::from_bytes(&bytes)?, snapshot);
        Ok(())
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let result = GameSnapshot::from_bytes(&[0xFF, 0xFF, 0xFF]);
        assert!(matches!(result, Err(GameError::Decode(_))));
    }

    #[test]
    fn validate_rejects_lost_cards() {
        let mut snapshot = dealt_snapshot();
        assert!(snapshot.validate().is_ok());
        snapshot.deck.pop();
        assert!(matches!(snapshot.validate(), Err(GameError::InvalidSnapshot(_))));
    }

    #[test]
    fn validate_accepts_committed_wilds() {
        let mut snapshot = dealt_snapshot();
        let wild = snapshot
            .deck
            .iter()
            .position(|card| card.is_wild())
            .expect("deck holds wilds");
        snapshot.deck[wild] = snapshot.deck[wild].committed_to(Color::Yellow);
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_index() {
        let mut snapshot = dealt_snapshot();
        snapshot.current_player_index = 2;
        assert!(matches!(snapshot.validate(), Err(GameError::InvalidSnapshot(_))));
    }
}
