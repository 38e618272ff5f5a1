use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::error;

use std::io::{stdin, stdout, Write};
use std::path::PathBuf;

use drop4_ai::*;

mod display;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// A human against the engine
    Play,
    /// Two engines against each other
    Match,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file, defaults are used when it is missing
    #[arg(long, default_value = "drop4.toml")]
    config: PathBuf,
    #[arg(long, value_enum, default_value_t = Mode::Play)]
    mode: Mode,
    #[arg(long, default_value = "warn")]
    log_level: log::Level,
    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    simple_logger::init_with_level(args.log_level)?;

    if args.print_config {
        println!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    let config = AppConfig::load_or_default(&args.config)?;
    let board = config.board.empty_board()?;

    println!("Welcome to Drop 4\n");

    match args.mode {
        Mode::Play => play(&config, board),
        Mode::Match => watch(&config, board),
    }
}

/// Human against engine, the engine plays A
fn play(config: &AppConfig, board: Board) -> Result<()> {
    let first = if ask("Should the engine move first?")? {
        Player::A
    } else {
        Player::B
    };

    let referee = Referee::new(
        board,
        first,
        Box::new(Thinking::new("Engine", config, Player::A)),
        Box::new(Human { player: Player::B }),
    );
    display::draw(referee.board())?;

    let report = referee.play(show)?;
    match report.outcome.winner() {
        Some(Player::A) => println!("The engine wins!"),
        Some(Player::B) => println!("You win!"),
        None => println!("Draw!"),
    }
    Ok(())
}

/// Engine against engine
fn watch(config: &AppConfig, board: Board) -> Result<()> {
    println!("=== Engine A vs Engine B ===");
    let referee = Referee::new(
        board,
        config.referee.first,
        Box::new(Thinking::new("Engine A", config, Player::A)),
        Box::new(Thinking::new("Engine B", config, Player::B)),
    )
    .with_turn_delay(config.referee.turn_delay());
    display::draw(referee.board())?;

    let report = referee.play(show)?;
    match report.outcome.winner() {
        Some(player) => println!("{} wins after {} turns!", player, report.turns),
        None => println!("Draw!"),
    }
    Ok(())
}

fn show(board: &Board, turn: &Turn) {
    println!("\nTurn {}", turn.number);
    if let Err(err) = display::draw(board) {
        error!("failed to draw board: {}", err);
    }
}

fn ask(question: &str) -> Result<bool> {
    let stdin = stdin();
    loop {
        let mut buffer = String::new();
        print!("{} y/n: ", question);
        stdout().flush()?;
        if stdin.read_line(&mut buffer)? == 0 {
            return Err(anyhow!("input closed"));
        }
        match buffer.trim().to_lowercase().chars().next() {
            Some(_letter @ 'y') => return Ok(true),
            Some(_letter @ 'n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

/// An engine seat that shows a spinner while it searches
struct Thinking {
    label: String,
    engine: Engine,
}

impl Thinking {
    fn new(label: &str, config: &AppConfig, player: Player) -> Self {
        Self {
            label: label.to_string(),
            engine: Engine::new(config.engine.clone(), player),
        }
    }
}

impl Strategy for Thinking {
    fn name(&self) -> &str {
        &self.label
    }

    fn decide(&mut self, board: &Board) -> Result<usize> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}"));
        spinner.set_message(&format!("{} is thinking...", self.label));
        spinner.enable_steady_tick(100);

        let report = self.engine.search(board);
        spinner.finish_and_clear();

        println!(
            "{} plays column {} (depth {}, {} positions, {:.2}s)",
            self.label,
            report.column,
            report.depth,
            report.nodes,
            report.elapsed.as_secs_f64()
        );
        Ok(report.column)
    }
}

/// Reads moves from stdin, asking again until a playable column is given
struct Human {
    player: Player,
}

impl Strategy for Human {
    fn name(&self) -> &str {
        "Human"
    }

    fn decide(&mut self, board: &Board) -> Result<usize> {
        let stdin = stdin();
        loop {
            print!("Move input (0-{}) > ", board.columns() - 1);
            stdout().flush()?;
            let mut input_str = String::new();
            if stdin.read_line(&mut input_str)? == 0 {
                return Err(anyhow!("input closed"));
            }

            let column = match input_str.trim().parse::<usize>() {
                Err(_) => {
                    println!("Invalid number: {}", input_str.trim());
                    continue;
                }
                Ok(column) => column,
            };
            match board.apply_move(column, self.player) {
                Ok(_) => return Ok(column),
                Err(err) => println!("Invalid move, {}", err),
            }
        }
    }
}
