use std::fmt::Write;

use crate::action::{Direction, Effect, PlayOutcome, TurnOutcome};
use crate::state::{GameStateView, GameStatus};

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    pub show_pile_sizes: bool,
    pub show_scores: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_pile_sizes: true,
            show_scores: true,
        }
    }
}

pub fn render_state(state: &GameStateView) -> String {
    render_state_with_options(state, VisualOptions::default())
}

pub fn render_state_with_options(state: &GameStateView, options: VisualOptions) -> String {
    let mut out = String::new();
    let rule = "=================================================";
    let top = state
        .top_card
        .map(|card| card.to_string())
        .unwrap_or_else(|| String::from("--"));
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Top of discard pile: {top}");
    if let GameStatus::Finished { winner } = state.status {
        if let Some(player) = state.players.get(winner) {
            let _ = writeln!(out, "Finished (winner: {})", player.name);
        }
    }
    let direction = match state.direction {
        Direction::Clockwise => "clockwise",
        Direction::CounterClockwise => "counter-clockwise",
    };
    let _ = writeln!(out, "Direction: {direction}");
    if options.show_pile_sizes {
        let _ = writeln!(
            out,
            "Draw pile: {}  |  Discard pile: {}",
            state.draw_pile_count, state.discard_pile_count
        );
    }
    let _ = writeln!(out, "{rule}");
    for player in &state.players {
        if player.is_current {
            let _ = writeln!(out, "\n{}'s turn:\n", player.name);
            for (idx, card) in state.hand.iter().enumerate() {
                let _ = writeln!(out, "{}. {card}", idx + 1);
            }
            let _ = writeln!(out);
        } else {
            let _ = writeln!(out, "Name: {}", player.name);
            let _ = writeln!(out, "No of Cards in hand: {}", player.hand_size);
            if options.show_scores && player.score > 0 {
                let _ = writeln!(out, "Score: {}", player.score);
            }
        }
        let _ = writeln!(out, "------------------------");
    }
    out
}

/// One or two lines describing what a turn did, using seat names from `state`.
pub fn describe_outcome(state: &GameStateView, outcome: &TurnOutcome) -> String {
    let name = |id: usize| {
        state
            .players
            .get(id)
            .map(|player| player.name.clone())
            .unwrap_or_else(|| format!("Player {id}"))
    };
    match outcome {
        TurnOutcome::Drew { player, .. } => format!("{} drew a card", name(*player)),
        TurnOutcome::Played(PlayOutcome {
            player,
            card,
            chosen_color,
            effect,
        }) => {
            let mut out = format!("{} played {card}", name(*player));
            if let Some(color) = chosen_color {
                let _ = write!(out, "\n{} chose {color}", name(*player));
            }
            match effect {
                Effect::None => {}
                Effect::Reversed => out.push_str("\nDirection reversed"),
                Effect::Skipped { player } => {
                    let _ = write!(out, "\n{} is skipped", name(*player));
                }
                Effect::DrewTwo { player } => {
                    let _ = write!(out, "\n{} draws two", name(*player));
                }
                Effect::DrawFour {
                    player,
                    challenged,
                    challenge_succeeded,
                    drawn,
                } => {
                    if *challenged {
                        let verdict = if *challenge_succeeded {
                            "Challenge successful"
                        } else {
                            "Challenge unsuccessful"
                        };
                        let _ = write!(out, "\n{verdict}");
                    }
                    let _ = write!(out, "\n{} draws {drawn}", name(*player));
                }
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, Color};
    use crate::game::GameBuilder;

    #[test]
    fn render_includes_table_talk() {
        let mut game = GameBuilder::new(["Ada", "Bea"])
            .expect("builder")
            .build()
            .expect("game");
        game.start_game().expect("start");
        let view = game.state_view();
        let text = render_state(&view);
        assert!(text.contains("Top of discard pile:"));
        assert!(text.contains("Ada's turn:"));
        assert!(text.contains("1. "));
        assert!(text.contains("Name: Bea"));
        assert!(text.contains("No of Cards in hand: 7"));
    }

    #[test]
    fn render_options_hide_piles_and_scores() {
        let mut game = GameBuilder::new(["Ada", "Bea"])
            .expect("builder")
            .build()
            .expect("game");
        game.start_game().expect("start");
        let mut view = game.state_view();
        view.players[1].score = 30;

        let full = render_state(&view);
        assert!(full.contains("Draw pile: 93  |  Discard pile: 1"));
        assert!(full.contains("Score: 30"));

        let quiet = render_state_with_options(
            &view,
            VisualOptions {
                show_pile_sizes: false,
                show_scores: false,
            },
        );
        assert!(!quiet.contains("Draw pile:"));
        assert!(!quiet.contains("Score:"));
        assert!(quiet.contains("No of Cards in hand: 7"));
    }

    #[test]
    fn describe_wild_draw_four_challenge() {
        let game = GameBuilder::new(["Ada", "Bea"])
            .expect("builder")
            .build()
            .expect("game");
        let view = game.state_view();
        let outcome = TurnOutcome::Played(PlayOutcome {
            player: 0,
            card: Card::wild_draw_four().committed_to(Color::Blue),
            chosen_color: Some(Color::Blue),
            effect: Effect::DrawFour {
                player: 1,
                challenged: true,
                challenge_succeeded: false,
                drawn: 6,
            },
        });
        let text = describe_outcome(&view, &outcome);
        assert!(text.contains("Ada played Blue Draw Four"));
        assert!(text.contains("Ada chose Blue"));
        assert!(text.contains("Challenge unsuccessful"));
        assert!(text.contains("Bea draws 6"));
    }

    #[test]
    fn describe_reshuffled_wild_without_new_choice() {
        let game = GameBuilder::new(["Ada", "Bea"])
            .expect("builder")
            .build()
            .expect("game");
        let view = game.state_view();
        let outcome = TurnOutcome::Played(PlayOutcome {
            player: 0,
            card: Card::wild().committed_to(Color::Green),
            chosen_color: None,
            effect: Effect::None,
        });
        let text = describe_outcome(&view, &outcome);
        assert_eq!(text, "Ada played Green Wild");
    }
}
