//! Scoring utilities.
//!
//! Cards left in a hand are worth their face value for numerals, 20 for
//! Skip / Reverse / Draw Two and 50 for Wild / Wild Draw Four. The winner of a
//! round collects the points left in every opponent's hand.

use crate::action::PlayerId;
use crate::card::Card;
use crate::player::Player;

/// Points held in a hand.
pub fn calculate_score(hand: &[Card]) -> u32 {
    hand.iter().map(|card| card.rank.points()).sum()
}

/// Points the round winner collects from everyone else.
pub fn round_award(players: &[Player], winner: PlayerId) -> u32 {
    players
        .iter()
        .enumerate()
        .filter(|(id, _)| *id != winner)
        .map(|(_, player)| calculate_score(&player.hand))
        .sum()
}

/// Names with their current hand points, lowest first. Ties keep seat order.
pub fn standings(players: &[Player]) -> Vec<(String, u32)> {
    let mut scores: Vec<(String, u32)> = players
        .iter()
        .map(|player| (player.name.clone(), calculate_score(&player.hand)))
        .collect();
    scores.sort_by_key(|(_, score)| *score);
    scores
}
