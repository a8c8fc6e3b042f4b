use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::action::{Action, Direction, Effect, PlayOutcome, PlayerId, TurnOutcome};
use crate::card::{Card, Color, DEFAULT_STARTING_CARDS, Rank, is_standard_set};
use crate::deck::Deck;
use crate::error::{GameError, InvalidAction};
use crate::player::Player;
use crate::score;
use crate::snapshot::GameSnapshot;
use crate::state::{GameSettings, GameStateView, GameStatus, PlayerPublicState};

const DEFAULT_SEED: u64 = 0x0A0B_5EED_0A0B_5EED;

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub names: Vec<String>,
    pub seed: u64,
    pub starting_cards: usize,
    pub score_limit: Option<u32>,
}

impl GameConfig {
    pub fn new(names: Vec<String>, seed: u64) -> Result<Self, GameError> {
        GameSettings::new(names.len(), DEFAULT_STARTING_CARDS, None)?;
        Ok(Self {
            names,
            seed,
            starting_cards: DEFAULT_STARTING_CARDS,
            score_limit: None,
        })
    }
}

/// Builder that enables deterministic deck injection for testing.
pub struct GameBuilder {
    config: GameConfig,
    deck: Option<Vec<Card>>,
}

impl GameBuilder {
    pub fn new<I, S>(names: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into).collect();
        Ok(Self {
            config: GameConfig::new(names, DEFAULT_SEED)?,
            deck: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Use `deck` as the draw pile as-is (last card on top, no shuffle).
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn with_starting_cards(mut self, starting_cards: usize) -> Self {
        self.config.starting_cards = starting_cards;
        self
    }

    pub fn with_score_limit(mut self, score_limit: Option<u32>) -> Self {
        self.config.score_limit = score_limit;
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

/// Core Uno game engine.
///
/// Every public operation either applies its whole effect or returns an error
/// without touching the state, so `deck + hands + discard pile` always holds
/// the 108 cards of the standard deck.
#[derive(Debug)]
pub struct Game {
    settings: GameSettings,
    players: Vec<Player>,
    current_player: PlayerId,
    direction: Direction,
    deck: Deck,
    discard_pile: Vec<Card>,
    round_awarded: bool,
    rng: StdRng,
}

impl Game {
    pub fn builder<I, S>(names: I) -> Result<GameBuilder, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GameBuilder::new(names)
    }

    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder { config, deck: None }.build()
    }

    /// Rebuilds a game from a snapshot. The seed drives future shuffles only.
    pub fn restore(snapshot: GameSnapshot, seed: u64) -> Result<Self, GameError> {
        snapshot.validate()?;
        let settings = GameSettings::new(
            snapshot.players.len(),
            snapshot.starting_cards,
            snapshot.score_limit,
        )?;
        Ok(Self {
            settings,
            players: snapshot.players,
            current_player: snapshot.current_player_index,
            direction: snapshot.direction,
            deck: Deck::from_cards(snapshot.deck),
            discard_pile: snapshot.discard_pile,
            round_awarded: snapshot.round_awarded,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.players.clone(),
            deck: self.deck.cards().to_vec(),
            discard_pile: self.discard_pile.clone(),
            current_player_index: self.current_player,
            direction: self.direction,
            starting_cards: self.settings.starting_cards,
            score_limit: self.settings.score_limit,
            round_awarded: self.round_awarded,
        }
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players.get(id).ok_or(GameError::InvalidPlayer(id))
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    pub fn top_card(&self) -> Option<Card> {
        self.discard_pile.last().copied()
    }

    /// Cards across the deck, every hand and the discard pile.
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.discard_pile.len()
            + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
    }

    pub fn status(&self) -> GameStatus {
        if self.discard_pile.is_empty() {
            return GameStatus::Setup;
        }
        match self.winner_index() {
            Some(winner) => GameStatus::Finished { winner },
            None => GameStatus::InProgress,
        }
    }

    /// Deals the starting hands and turns over the opening discard.
    ///
    /// Action and wild cards are returned to the deck and the deck reshuffled
    /// until a numeral comes up.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        if !self.discard_pile.is_empty() || self.players.iter().any(|p| !p.hand.is_empty()) {
            return Err(GameError::AlreadyStarted);
        }
        let mut deck = self.deck.clone();
        let hands = deck.deal(self.players.len(), self.settings.starting_cards)?;
        if !deck.contains_numeral() {
            return Err(GameError::InvalidConfiguration(
                "no numeral card left for the opening discard",
            ));
        }
        let mut first = deck.draw()?;
        while !first.rank.is_numeral() {
            debug!(card = %first, "returning opening card to the deck");
            deck.put_back(first);
            deck.shuffle(&mut self.rng);
            first = deck.draw()?;
        }

        self.deck = deck;
        for (player, hand) in self.players.iter_mut().zip(hands) {
            player.hand = hand;
        }
        self.discard_pile.push(first);
        self.round_awarded = false;
        info!(
            players = self.players.len(),
            starting_cards = self.settings.starting_cards,
            top = %first,
            "game started"
        );
        Ok(())
    }

    /// Collects every card, reshuffles a fresh 108-card deck and deals a new
    /// round. Accumulated scores are kept; committed wilds go back to wild.
    pub fn start_next_round(&mut self) -> Result<(), GameError> {
        let mut cards: Vec<Card> = std::mem::take(&mut self.deck).into_cards();
        cards.append(&mut self.discard_pile);
        for player in self.players.iter_mut() {
            cards.append(&mut player.hand);
        }
        let mut deck = Deck::from_cards(cards.into_iter().map(Card::printed).collect());
        deck.shuffle(&mut self.rng);
        self.deck = deck;
        self.direction = Direction::default();
        self.current_player = 0;
        info!("starting next round");
        self.start_game()
    }

    /// Seat that the next turn step lands on.
    pub fn next_player_index(&self) -> PlayerId {
        self.direction.step(self.current_player, self.players.len())
    }

    /// Moves the turn pointer one step in the current direction.
    pub fn advance_turn(&mut self) {
        self.current_player = self.next_player_index();
    }

    pub fn apply_action(&mut self, action: Action) -> Result<TurnOutcome, GameError> {
        match action {
            Action::Play {
                card_index,
                color,
                challenge,
            } => self
                .play_card(card_index, color, challenge)
                .map(TurnOutcome::Played),
            Action::Draw => {
                let player = self.current_player;
                let card = self.draw_card()?;
                Ok(TurnOutcome::Drew { player, card })
            }
        }
    }

    /// Plays the current player's card at `card_index`.
    ///
    /// `chosen_color` is required for wild cards. `challenge` is the targeted
    /// player's answer to a Wild Draw Four and is ignored for other ranks.
    /// After the rank effect resolves the turn pointer advances one more
    /// step, so Skip, Draw Two and Wild Draw Four move it twice.
    pub fn play_card(
        &mut self,
        card_index: usize,
        chosen_color: Option<Color>,
        challenge: bool,
    ) -> Result<PlayOutcome, GameError> {
        let top = self.top_card().ok_or(GameError::NotStarted)?;
        let actor = self.current_player;
        let card = *self.players[actor]
            .hand
            .get(card_index)
            .ok_or(InvalidAction::CardIndex(card_index))?;
        if !card.matches(&top) {
            return Err(InvalidAction::IllegalMove { card, top }.into());
        }
        let committed = if card.is_wild() {
            let color = chosen_color.ok_or(InvalidAction::MissingColorChoice)?;
            if color.is_wild() {
                return Err(InvalidAction::InvalidColorChoice(color).into());
            }
            Some(color)
        } else {
            None
        };
        let placed = committed.map_or(card, |color| card.committed_to(color));

        // Penalty draws are checked up front so a short supply fails cleanly.
        let target = self.next_player_index();
        let challenge_succeeded = card.rank == Rank::DrawFour
            && challenge
            && self.players[target].holds_color(top.color);
        let penalty = match card.rank {
            Rank::DrawTwo => 2,
            Rank::DrawFour if challenge && !challenge_succeeded => 6,
            Rank::DrawFour => 4,
            _ => 0,
        };
        if penalty > self.deck.len() + self.discard_pile.len() {
            warn!(penalty, "not enough cards left to resolve the penalty");
            return Err(GameError::EmptyDeck);
        }

        self.players[actor].play(card)?;
        self.discard_pile.push(placed);
        debug!(player = %self.players[actor].name, card = %placed, "played card");

        let effect = match card.rank {
            Rank::Reverse => {
                self.direction = self.direction.flip();
                Effect::Reversed
            }
            Rank::Skip => {
                self.advance_turn();
                Effect::Skipped {
                    player: self.current_player,
                }
            }
            Rank::DrawTwo => {
                self.advance_turn();
                let player = self.current_player;
                self.force_draw(player, penalty)?;
                Effect::DrewTwo { player }
            }
            Rank::DrawFour => {
                self.advance_turn();
                let player = self.current_player;
                if challenge {
                    info!(
                        player = %self.players[player].name,
                        succeeded = challenge_succeeded,
                        "wild draw four challenged"
                    );
                }
                self.force_draw(player, penalty)?;
                Effect::DrawFour {
                    player,
                    challenged: challenge,
                    challenge_succeeded,
                    drawn: penalty,
                }
            }
            Rank::Number(_) | Rank::Wild => Effect::None,
        };
        self.advance_turn();

        Ok(PlayOutcome {
            player: actor,
            card: placed,
            chosen_color: committed,
            effect,
        })
    }

    /// The current player draws one card, reshuffling the discard pile into
    /// the deck when the deck is empty. The turn pointer does not move.
    pub fn draw_card(&mut self) -> Result<Card, GameError> {
        if self.discard_pile.is_empty() {
            return Err(GameError::NotStarted);
        }
        let card = self.draw_from_supply()?;
        let player = &mut self.players[self.current_player];
        player.draw(card);
        debug!(player = %player.name, card = %card, "drew card");
        Ok(card)
    }

    /// First player, in seat order, holding no cards.
    pub fn check_winner(&self) -> Option<&Player> {
        self.players.iter().find(|player| player.has_won())
    }

    pub fn winner_index(&self) -> Option<PlayerId> {
        self.players.iter().position(|player| player.has_won())
    }

    /// Points left in a player's hand.
    pub fn calculate_score(&self, player: PlayerId) -> Result<u32, GameError> {
        Ok(score::calculate_score(&self.player(player)?.hand))
    }

    /// Credits `winner` with the points left in every other hand.
    ///
    /// Only a player with an empty hand can collect, and only once per round.
    pub fn award_round(&mut self, winner: PlayerId) -> Result<u32, GameError> {
        if !self.player(winner)?.has_won() {
            return Err(GameError::NotRoundWinner(winner));
        }
        if self.round_awarded {
            return Err(GameError::RoundAlreadyAwarded);
        }
        self.round_awarded = true;
        let points = score::round_award(&self.players, winner);
        let player = &mut self.players[winner];
        player.score += points;
        info!(player = %player.name, points, total = player.score, "round awarded");
        Ok(points)
    }

    /// First player whose accumulated score meets the configured limit.
    pub fn score_limit_reached(&self) -> Option<&Player> {
        let limit = self.settings.score_limit?;
        self.players.iter().find(|player| player.score >= limit)
    }

    pub fn standings(&self) -> Vec<(String, u32)> {
        score::standings(&self.players)
    }

    /// Whether enough of the other players agreed to end the session.
    pub fn quit_vote_passes(&self, yes_votes: usize) -> bool {
        yes_votes >= self.players.len() / 2
    }

    pub fn state_view(&self) -> GameStateView {
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(idx, player)| PlayerPublicState {
                id: idx,
                name: player.name.clone(),
                hand_size: player.hand.len(),
                score: player.score,
                is_current: idx == self.current_player,
            })
            .collect();

        GameStateView {
            settings: self.settings,
            status: self.status(),
            current_player: self.current_player,
            direction: self.direction,
            top_card: self.top_card(),
            draw_pile_count: self.deck.len(),
            discard_pile_count: self.discard_pile.len(),
            players,
            hand: self.players[self.current_player].hand.clone(),
        }
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder { config, deck } = builder;
        let settings = GameSettings::new(
            config.names.len(),
            config.starting_cards,
            config.score_limit,
        )?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let deck = if let Some(cards) = deck {
            if !is_standard_set(&cards) {
                return Err(GameError::InvalidConfiguration(
                    "deck must contain the standard 108 cards",
                ));
            }
            Deck::from_cards(cards)
        } else {
            let mut deck = Deck::new();
            deck.shuffle(&mut rng);
            deck
        };

        Ok(Game {
            settings,
            players: config.names.into_iter().map(Player::new).collect(),
            current_player: 0,
            direction: Direction::default(),
            deck,
            discard_pile: Vec::new(),
            round_awarded: false,
            rng,
        })
    }

    fn force_draw(&mut self, player: PlayerId, count: usize) -> Result<(), GameError> {
        for _ in 0..count {
            let card = self.draw_from_supply()?;
            self.players[player].draw(card);
        }
        debug!(player = %self.players[player].name, count, "forced draw");
        Ok(())
    }

    fn draw_from_supply(&mut self) -> Result<Card, GameError> {
        if self.deck.is_empty() {
            self.reshuffle_discard()?;
        }
        self.deck.draw()
    }

    /// Moves everything under the discard top back into the deck and shuffles.
    fn reshuffle_discard(&mut self) -> Result<(), GameError> {
        if self.discard_pile.len() <= 1 {
            warn!("deck and discard pile exhausted");
            return Err(GameError::EmptyDeck);
        }
        let Some(top) = self.discard_pile.pop() else {
            return Err(GameError::EmptyDeck);
        };
        info!(cards = self.discard_pile.len(), "reshuffling discard pile into deck");
        self.deck.extend(self.discard_pile.drain(..));
        self.deck.shuffle(&mut self.rng);
        self.discard_pile.push(top);
        Ok(())
    }
}
