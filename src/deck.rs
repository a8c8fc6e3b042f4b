use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::card::{Card, full_deck};
use crate::error::GameError;

/// Draw pile. The top of the pile is the end of the vector.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Standard 108-card deck in construction order.
    pub fn new() -> Self {
        Self { cards: full_deck() }
    }

    /// Wraps an already ordered pile; the last card is drawn first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Deals `num_cards` to each of `num_players`, one card per player per round.
    ///
    /// Fails before drawing anything when the pile cannot cover the whole deal.
    pub fn deal(&mut self, num_players: usize, num_cards: usize) -> Result<Vec<Vec<Card>>, GameError> {
        let needed = num_players
            .checked_mul(num_cards)
            .ok_or(GameError::EmptyDeck)?;
        if needed > self.cards.len() {
            return Err(GameError::EmptyDeck);
        }
        let mut hands = vec![Vec::with_capacity(num_cards); num_players];
        for _ in 0..num_cards {
            for hand in hands.iter_mut() {
                hand.push(self.draw()?);
            }
        }
        Ok(hands)
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::EmptyDeck)
    }

    /// Returns a card to the top of the pile.
    pub fn put_back(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub(crate) fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    pub(crate) fn contains_numeral(&self) -> bool {
        self.cards.iter().any(|card| card.rank.is_numeral())
    }

    pub(crate) fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::card::{Color, TOTAL_CARDS, is_standard_set};

    #[test]
    fn draw_pops_from_top() -> Result<(), GameError> {
        let mut deck = Deck::from_cards(vec![Card::number(Color::Red, 1), Card::number(Color::Blue, 2)]);
        assert_eq!(deck.draw()?, Card::number(Color::Blue, 2));
        assert_eq!(deck.draw()?, Card::number(Color::Red, 1));
        assert!(matches!(deck.draw(), Err(GameError::EmptyDeck)));
        Ok(())
    }

    #[test]
    fn deal_is_round_robin() -> Result<(), GameError> {
        let cards = (0..6).map(|v| Card::number(Color::Green, v)).collect();
        let mut deck = Deck::from_cards(cards);
        let hands = deck.deal(3, 2)?;
        assert_eq!(hands[0], vec![Card::number(Color::Green, 5), Card::number(Color::Green, 2)]);
        assert_eq!(hands[1], vec![Card::number(Color::Green, 4), Card::number(Color::Green, 1)]);
        assert_eq!(hands[2], vec![Card::number(Color::Green, 3), Card::number(Color::Green, 0)]);
        assert!(deck.is_empty());
        Ok(())
    }

    #[test]
    fn deal_fails_without_touching_pile() {
        let mut deck = Deck::from_cards(vec![Card::wild(); 5]);
        assert!(matches!(deck.deal(2, 3), Err(GameError::EmptyDeck)));
        assert_eq!(deck.len(), 5);
    }

    #[test]
    fn shuffle_permutes_full_deck() {
        let mut deck = Deck::new();
        let mut rng = StdRng::seed_from_u64(7);
        deck.shuffle(&mut rng);
        assert_eq!(deck.len(), TOTAL_CARDS);
        assert!(is_standard_set(deck.cards()));
        assert_ne!(deck.cards(), Deck::new().cards());
    }
}
