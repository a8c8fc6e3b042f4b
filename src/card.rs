use std::fmt;

use serde::{Deserialize, Serialize};

/// Card color. `Wild` marks an uncommitted wild card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
    Wild,
}

impl Color {
    /// The four colors a wild card may commit to.
    pub const PLAYABLE: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];

    #[inline]
    pub fn is_wild(&self) -> bool {
        matches!(self, Color::Wild)
    }
}

/// Symbolic face value of a card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Numeral between 0 and 9.
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    DrawFour,
}

impl Rank {
    #[inline]
    pub fn is_numeral(&self) -> bool {
        matches!(self, Rank::Number(_))
    }

    /// True for ranks only ever printed on wild cards.
    #[inline]
    pub fn is_wild(&self) -> bool {
        matches!(self, Rank::Wild | Rank::DrawFour)
    }

    /// Points the rank is worth when left in a hand at scoring time.
    pub fn points(&self) -> u32 {
        match self {
            Rank::Number(v) => u32::from(*v),
            Rank::Skip | Rank::Reverse | Rank::DrawTwo => ACTION_POINTS,
            Rank::Wild | Rank::DrawFour => WILD_POINTS,
        }
    }
}

pub const TOTAL_CARDS: usize = 108;
pub const MAX_NUMERAL: u8 = 9;
pub const WILD_COPIES: usize = 4;
pub const ACTION_POINTS: u32 = 20;
pub const WILD_POINTS: u32 = 50;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;
pub const DEFAULT_STARTING_CARDS: usize = 7;

/// A single Uno card.
///
/// Cards are plain values. Playing a wild produces a new card committed to the
/// chosen color (see [`Card::committed_to`]); nothing else holds a reference to
/// the original.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    pub color: Color,
    pub rank: Rank,
}

impl Card {
    pub const fn new(color: Color, rank: Rank) -> Self {
        Self { color, rank }
    }

    pub const fn number(color: Color, value: u8) -> Self {
        Self::new(color, Rank::Number(value))
    }

    pub const fn wild() -> Self {
        Self::new(Color::Wild, Rank::Wild)
    }

    pub const fn wild_draw_four() -> Self {
        Self::new(Color::Wild, Rank::DrawFour)
    }

    /// Returns true while the card still carries the wild color.
    #[inline]
    pub fn is_wild(&self) -> bool {
        self.color.is_wild()
    }

    /// Checks whether this card may be played on top of `other`.
    ///
    /// Only the candidate's wildness grants universal legality: a colored card
    /// does not match an uncommitted wild unless the ranks agree.
    #[inline]
    pub fn matches(&self, other: &Card) -> bool {
        self.color == other.color || self.rank == other.rank || self.is_wild()
    }

    /// The card as it lands on the discard pile after a color was chosen.
    #[inline]
    pub fn committed_to(self, color: Color) -> Card {
        Card { color, ..self }
    }

    /// Card identity ignoring the color a wild was committed to.
    pub(crate) fn printed(self) -> Card {
        if self.rank.is_wild() {
            self.committed_to(Color::Wild)
        } else {
            self
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Red => "Red",
            Color::Yellow => "Yellow",
            Color::Green => "Green",
            Color::Blue => "Blue",
            Color::Wild => "Wild",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Number(v) => write!(f, "{v}"),
            Rank::Skip => f.write_str("Skip"),
            Rank::Reverse => f.write_str("Reverse"),
            Rank::DrawTwo => f.write_str("Draw Two"),
            Rank::Wild => f.write_str("Wild"),
            Rank::DrawFour => f.write_str("Draw Four"),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.rank)
    }
}

/// Builds the full 108-card deck in deterministic order (unshuffled).
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(TOTAL_CARDS);
    let ranks: Vec<Rank> = (0..=MAX_NUMERAL)
        .map(Rank::Number)
        .chain([Rank::Skip, Rank::Reverse, Rank::DrawTwo])
        .collect();
    for color in Color::PLAYABLE {
        deck.extend(ranks.iter().map(|&rank| Card::new(color, rank)));
    }
    // Second copy of everything except the zeros.
    for color in Color::PLAYABLE {
        deck.extend(ranks[1..].iter().map(|&rank| Card::new(color, rank)));
    }
    deck.extend(std::iter::repeat(Card::wild()).take(WILD_COPIES));
    deck.extend(std::iter::repeat(Card::wild_draw_four()).take(WILD_COPIES));
    deck
}

/// Checks that `cards` is exactly the standard deck, counting committed wilds as wilds.
pub fn is_standard_set<'a>(cards: impl IntoIterator<Item = &'a Card>) -> bool {
    let mut printed: Vec<Card> = cards.into_iter().map(|card| card.printed()).collect();
    let mut expected = full_deck();
    printed.sort_unstable();
    expected.sort_unstable();
    printed == expected
}
