use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use uno::{
    Color, Game, GameError, GameSnapshot, Rank, TurnOutcome, VisualOptions, describe_outcome,
    render_state_with_options,
};

const SAVE_EXTENSION: &str = "uno";

#[derive(Parser, Debug)]
#[command(name = "uno", about = "Play Uno at the terminal with local players.")]
struct Args {
    /// Player names (2-10). When omitted, a menu offers a new or saved game.
    players: Vec<String>,

    /// Cards dealt to each player
    #[arg(short = 'c', long = "starting-cards", default_value_t = 7)]
    starting_cards: usize,

    /// Accumulated score that ends the match (single round when omitted)
    #[arg(long = "score-limit")]
    score_limit: Option<u32>,

    /// Seed for shuffling (random when omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Resume a saved game
    #[arg(short = 'l', long = "load")]
    load: Option<PathBuf>,

    /// Directory holding save files
    #[arg(long = "save-dir", default_value = ".")]
    save_dir: PathBuf,

    /// Leave the draw and discard pile sizes off the table view
    #[arg(long = "hide-pile-sizes", action = ArgAction::SetTrue)]
    hide_pile_sizes: bool,

    /// Leave opponents' scores off the table view
    #[arg(long = "hide-scores", action = ArgAction::SetTrue)]
    hide_scores: bool,

    /// Log engine events
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut console = Console;

    let mut game = if let Some(path) = &args.load {
        load_game(path, seed)?
    } else if !args.players.is_empty() {
        new_game(&args, args.players.clone(), seed)?
    } else {
        match console.choose("Choose an action: ", &["New game", "Load game"])? {
            0 => {
                let names = ask_names(&mut console)?;
                new_game(&args, names, seed)?
            }
            _ => {
                let saves = list_saves(&args.save_dir)?;
                if saves.is_empty() {
                    return Err("no saved games found".into());
                }
                let labels: Vec<String> = saves.iter().map(|p| display_path(p)).collect();
                let index = console.choose("Enter the index of the saved game to load: ", &labels)?;
                load_game(&saves[index], seed)?
            }
        }
    };
    info!(seed, "session started");

    let view = VisualOptions {
        show_pile_sizes: !args.hide_pile_sizes,
        show_scores: !args.hide_scores,
    };
    loop {
        println!("{}", render_state_with_options(&game.state_view(), view));
        match console.choose("Choose an action: ", &["Play card", "Draw card", "Quit game"])? {
            0 => {
                if !play_turn(&mut game, &mut console)? {
                    continue;
                }
                if let Some(winner) = game.winner_index() {
                    if finish_round(&mut game, winner)? {
                        break;
                    }
                } else {
                    game.advance_turn();
                }
            }
            1 => {
                let before = game.state_view();
                match game.draw_card() {
                    Ok(card) => {
                        let outcome = TurnOutcome::Drew {
                            player: before.current_player,
                            card,
                        };
                        println!("{}", describe_outcome(&before, &outcome));
                    }
                    Err(GameError::EmptyDeck) => println!("No cards left to draw"),
                    Err(err) => return Err(err.into()),
                }
                game.advance_turn();
            }
            _ => {
                if quit_game(&game, &mut console, &args.save_dir)? {
                    break;
                }
            }
        }
    }
    Ok(())
}

fn new_game(args: &Args, names: Vec<String>, seed: u64) -> Result<Game, GameError> {
    let mut game = Game::builder(names)?
        .with_seed(seed)
        .with_starting_cards(args.starting_cards)
        .with_score_limit(args.score_limit)
        .build()?;
    game.start_game()?;
    Ok(game)
}

fn ask_names(console: &mut Console) -> io::Result<Vec<String>> {
    let count = loop {
        let input = console.prompt("Enter number of players: ")?;
        match input.parse::<usize>() {
            Ok(count) if (2..=10).contains(&count) => break count,
            _ => println!("Please enter a number between 2 and 10"),
        }
    };
    (1..=count)
        .map(|i| console.prompt(&format!("Enter name of player {i}: ")))
        .collect()
}

/// Returns true when a card was played.
fn play_turn(game: &mut Game, console: &mut Console) -> Result<bool, Box<dyn Error>> {
    let hand = game.state_view().hand;
    let index = loop {
        let input = console.prompt("Enter index of card to play (or '0' to cancel): ")?;
        match input.parse::<usize>() {
            Ok(0) => return Ok(false),
            Ok(n) if n <= hand.len() => break n - 1,
            _ => println!("Invalid choice"),
        }
    };
    let card = hand[index];

    let color = if card.is_wild() {
        let labels: Vec<String> = Color::PLAYABLE.iter().map(|c| c.to_string()).collect();
        Some(Color::PLAYABLE[console.choose("Choose a color: ", &labels)?])
    } else {
        None
    };
    let legal = game.top_card().is_some_and(|top| card.matches(&top));
    let challenge = if card.rank == Rank::DrawFour && legal {
        let target = &game.players()[game.next_player_index()].name;
        console.yes_no(&format!(
            "{target}, do you want to challenge the Wild Draw 4? (y/n): "
        ))?
    } else {
        false
    };

    let before = game.state_view();
    match game.play_card(index, color, challenge) {
        Ok(outcome) => {
            println!("{}", describe_outcome(&before, &TurnOutcome::Played(outcome)));
            Ok(true)
        }
        Err(GameError::InvalidAction(err)) => {
            println!("{err}");
            Ok(false)
        }
        Err(GameError::EmptyDeck) => {
            println!("Not enough cards left to resolve that card");
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}

/// Scores the round. Returns true when the session is over.
fn finish_round(game: &mut Game, winner: usize) -> Result<bool, GameError> {
    let name = game.player(winner)?.name.clone();
    let points = game.award_round(winner)?;
    println!("\n{name} wins the round and scores {points}!");
    if game.settings().score_limit.is_none() {
        println!("\n{name} wins!");
        return Ok(true);
    }
    if let Some(champion) = game.score_limit_reached() {
        println!("\n{} reaches {} points and wins!", champion.name, champion.score);
        return Ok(true);
    }
    for player in game.players() {
        println!("{}: {}", player.name, player.score);
    }
    game.start_next_round()?;
    Ok(false)
}

/// Returns true when the session should end.
fn quit_game(game: &Game, console: &mut Console, save_dir: &Path) -> Result<bool, Box<dyn Error>> {
    let current = game.current_player();
    let voters: Vec<String> = game
        .players()
        .iter()
        .enumerate()
        .filter(|(id, _)| *id != current)
        .map(|(_, player)| player.name.clone())
        .collect();
    let mut votes = 0;
    for name in voters {
        if console.yes_no(&format!("{name}, do you agree to quit the game? (y/n): "))? {
            votes += 1;
        }
    }
    if !game.quit_vote_passes(votes) {
        println!("Not enough votes to quit the game");
        return Ok(false);
    }
    if console.yes_no("Do you want to save the game? (y/n): ")? {
        save_game(game, console, save_dir)?;
        return Ok(true);
    }
    println!("Game ended");
    let standings = game.standings();
    println!("Final scores:");
    for (name, score) in &standings {
        println!("{name}: {score}");
    }
    if let Some((name, _)) = standings.first() {
        println!("\n{name} wins!");
    }
    Ok(true)
}

fn save_game(game: &Game, console: &mut Console, save_dir: &Path) -> Result<(), Box<dyn Error>> {
    let path = match console.choose(
        "Enter your choice: ",
        &["Save to new file", "Overwrite existing save"],
    )? {
        0 => {
            let name = console.prompt("Enter filename for new save: ")?;
            let mut path = save_dir.join(name);
            if path.extension().and_then(|ext| ext.to_str()) != Some(SAVE_EXTENSION) {
                path.as_mut_os_string().push(format!(".{SAVE_EXTENSION}"));
            }
            path
        }
        _ => {
            let saves = list_saves(save_dir)?;
            if saves.is_empty() {
                println!("No saved games found");
                return Ok(());
            }
            let labels: Vec<String> = saves.iter().map(|p| display_path(p)).collect();
            let index = console.choose("Enter the index of the saved game to overwrite: ", &labels)?;
            saves[index].clone()
        }
    };
    fs::write(&path, game.snapshot().to_bytes()?)?;
    println!("Game saved to {}", display_path(&path));
    Ok(())
}

fn load_game(path: &Path, seed: u64) -> Result<Game, Box<dyn Error>> {
    let bytes = fs::read(path)?;
    let snapshot = GameSnapshot::from_bytes(&bytes)?;
    let game = Game::restore(snapshot, seed)?;
    info!(path = %display_path(path), "game loaded");
    Ok(game)
}

fn list_saves(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut saves: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some(SAVE_EXTENSION))
        .collect();
    saves.sort();
    Ok(saves)
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Line-based prompts on stdin. Invalid answers are asked again.
struct Console;

impl Console {
    fn prompt(&mut self, message: &str) -> io::Result<String> {
        print!("{message}");
        if io::stdout().flush().is_err() {
            warn!("failed to flush stdout");
        }
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(input.trim().to_string())
    }

    /// Lists `options` numbered from 1 and returns the zero-based choice.
    fn choose<S: AsRef<str>>(&mut self, message: &str, options: &[S]) -> io::Result<usize> {
        loop {
            for (i, option) in options.iter().enumerate() {
                println!("{}. {}", i + 1, option.as_ref());
            }
            let input = self.prompt(message)?;
            match input.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
                _ => println!("Invalid choice"),
            }
        }
    }

    fn yes_no(&mut self, message: &str) -> io::Result<bool> {
        loop {
            let input = self.prompt(message)?;
            match input.to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => println!("Please answer y or n"),
            }
        }
    }
}
