#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for playing Letter Hunt in a terminal.

mod config;
mod render;
mod share_code;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use letter_hunt_core::{broadcast, Command, Event, GameConfig, GameMode, GameStatus, Level};
use letter_hunt_session::{self as session, query, Session};
use letter_hunt_system_stats::Stats;
use letter_hunt_system_validation::parse_count;
use log::info;

use crate::{config::Overrides, share_code::ShareCode};

const DEFAULT_HINTS: usize = 3;

#[derive(Debug, Parser)]
#[command(
    name = "letter-hunt",
    about = "Find or count the target characters hidden in a grid"
)]
struct Cli {
    /// TOML file with game settings.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Level to start at.
    #[arg(short, long)]
    level: Option<u32>,
    /// Answer mode for the first round.
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,
    /// Seed for reproducible boards.
    #[arg(long)]
    seed: Option<u64>,
    /// Rows and columns of the square board.
    #[arg(long, value_name = "CELLS")]
    board_size: Option<usize>,
    /// Share code printed by another player's `code` command.
    #[arg(long, value_name = "CODE", conflicts_with_all = ["level", "mode", "seed", "board_size"])]
    import: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Selection,
    Count,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Selection => GameMode::Selection,
            ModeArg::Count => GameMode::Count,
        }
    }
}

/// Entry point for the Letter Hunt command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let cli = Cli::parse();
    let (config, share) = resolve_settings(&cli)?;
    info!(
        "starting level {} {} session with seed {}",
        share.level, share.mode, share.seed
    );

    let session = Session::new(config).context("failed to create game session")?;
    let mut game = Game {
        session,
        stats: Stats::new(),
        share,
        last_input: Instant::now(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render::help(&mut out)?;
    game.run(
        Command::GenerateNewGame {
            level: None,
            target_count: None,
            mode: None,
        },
        &mut out,
    )?;
    out.flush()?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read player input")?;
        if game.handle_line(&line, &mut out)? == Flow::Quit {
            break;
        }
        out.flush()?;
    }

    render::stats(&mut out, &game.stats)?;
    Ok(())
}

fn resolve_settings(cli: &Cli) -> Result<(GameConfig, ShareCode)> {
    let mut config = config::load(cli.config.as_deref())?;

    if let Some(code) = &cli.import {
        let share = ShareCode::decode(code).context("failed to import share code")?;
        share.apply_to(&mut config);
        config
            .validate()
            .context("imported share code cannot produce boards")?;
        return Ok((config, share));
    }

    config::apply_overrides(
        &mut config,
        Overrides {
            level: cli.level,
            mode: cli.mode.map(GameMode::from),
            seed: cli.seed,
            board_size: cli.board_size,
        },
    )?;
    let seed = config.seed.unwrap_or_else(rand::random);
    config.seed = Some(seed);
    let share = ShareCode::from_config(&config, seed);
    Ok((config, share))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Input {
    Select { row: usize, column: usize },
    Deselect { row: usize, column: usize },
    Count(String),
    Check,
    Hint(usize),
    Pause,
    Resume,
    Next,
    New {
        level: Option<Level>,
        mode: Option<GameMode>,
    },
    Reset,
    Board,
    Code,
    Help,
    Quit,
}

impl Input {
    fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Self::Board);
        };
        let rest: Vec<&str> = words.collect();

        let input = match (verb.to_ascii_lowercase().as_str(), rest.as_slice()) {
            ("s" | "select", [row, column]) => Self::Select {
                row: parse_coordinate(row)?,
                column: parse_coordinate(column)?,
            },
            ("d" | "deselect", [row, column]) => Self::Deselect {
                row: parse_coordinate(row)?,
                column: parse_coordinate(column)?,
            },
            ("count", [count]) => Self::Count((*count).to_owned()),
            ("check", []) => Self::Check,
            ("hint", []) => Self::Hint(DEFAULT_HINTS),
            ("hint", [count]) => Self::Hint(
                count
                    .parse()
                    .map_err(|_| format!("{count:?} is not a hint count"))?,
            ),
            ("pause", []) => Self::Pause,
            ("resume", []) => Self::Resume,
            ("next", []) => Self::Next,
            ("new", args) if args.len() <= 2 => {
                let mut level = None;
                let mut mode = None;
                for arg in args {
                    match *arg {
                        "selection" => mode = Some(GameMode::Selection),
                        "count" => mode = Some(GameMode::Count),
                        other => {
                            let value = other
                                .parse::<u32>()
                                .map_err(|_| format!("{other:?} is not a level or mode"))?;
                            level = Some(Level::new(value));
                        }
                    }
                }
                Self::New { level, mode }
            }
            ("reset", []) => Self::Reset,
            ("board", []) => Self::Board,
            ("code", []) => Self::Code,
            ("help" | "?", []) => Self::Help,
            ("quit" | "exit" | "q", []) => Self::Quit,
            _ => return Err(format!("unrecognised command {line:?}; type `help`")),
        };
        Ok(input)
    }
}

fn parse_coordinate(value: &str) -> Result<usize, String> {
    value
        .parse()
        .map_err(|_| format!("{value:?} is not a row or column number"))
}

fn no_such_cell(row: usize, column: usize, out: &mut impl Write) -> Result<Flow> {
    writeln!(out, "There is no cell at row {row}, column {column}.")?;
    Ok(Flow::Continue)
}

struct Game {
    session: Session,
    stats: Stats,
    share: ShareCode,
    last_input: Instant,
}

impl Game {
    fn handle_line(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        let input = match Input::parse(line) {
            Ok(input) => input,
            Err(message) => {
                writeln!(out, "{message}")?;
                return Ok(Flow::Continue);
            }
        };

        let now = Instant::now();
        let dt = now.duration_since(self.last_input);
        self.last_input = now;
        self.run(Command::Tick { dt }, out)?;

        let command = match input {
            Input::Quit => return Ok(Flow::Quit),
            Input::Help => {
                render::help(out)?;
                return Ok(Flow::Continue);
            }
            Input::Board => {
                render::round(out, &self.session)?;
                return Ok(Flow::Continue);
            }
            Input::Code => {
                writeln!(out, "{}", self.share.encode()?)?;
                return Ok(Flow::Continue);
            }
            Input::Select { row, column } => match self.cell_at(row, column) {
                Some(index) => Command::SelectTile { index },
                None => return no_such_cell(row, column, out),
            },
            Input::Deselect { row, column } => match self.cell_at(row, column) {
                Some(index) => Command::DeselectTile { index },
                None => return no_such_cell(row, column, out),
            },
            Input::Count(text) => {
                let Some(max) = query::board(&self.session).map(|board| board.len()) else {
                    render::round(out, &self.session)?;
                    return Ok(Flow::Continue);
                };
                match parse_count(&text, max) {
                    Ok(count) => Command::SetUserCount {
                        count: i64::try_from(count).unwrap_or(i64::MAX),
                    },
                    Err(error) => {
                        writeln!(out, "{error}")?;
                        return Ok(Flow::Continue);
                    }
                }
            }
            Input::Check => Command::CheckAnswer,
            Input::Hint(count) => Command::RequestHints { count },
            Input::Pause => Command::PauseGame,
            Input::Resume => Command::ResumeGame,
            Input::Next => Command::NextLevel,
            Input::New { level, mode } => {
                let level = level.unwrap_or_else(|| query::level(&self.session));
                let mode = mode.unwrap_or_else(|| query::mode(&self.session));
                if matches!(
                    query::status(&self.session),
                    GameStatus::Playing | GameStatus::Paused | GameStatus::Checking
                ) {
                    self.run(Command::ResetGame, out)?;
                }
                Command::GenerateNewGame {
                    level: Some(level),
                    target_count: None,
                    mode: Some(mode),
                }
            }
            Input::Reset => Command::ResetGame,
        };

        self.run(command, out)?;
        Ok(Flow::Continue)
    }

    fn cell_at(&self, row: usize, column: usize) -> Option<usize> {
        query::board(&self.session).and_then(|board| board.index_of(row, column))
    }

    /// Applies a command, feeds the statistics and reports the result.
    ///
    /// Rejected commands are shown to the player rather than ending the game.
    fn run(&mut self, command: Command, out: &mut impl Write) -> Result<()> {
        let mut events = Vec::new();
        if let Err(error) = session::apply(&mut self.session, command, &mut events) {
            writeln!(out, "{error}")?;
            return Ok(());
        }
        broadcast(&events, &mut [&mut self.stats]);

        let mut reveal_started = false;
        for event in &events {
            match event {
                Event::GameStarted { .. } => render::round(out, &self.session)?,
                Event::TileSelected { .. }
                | Event::TileDeselected { .. }
                | Event::HintsRevealed { .. } => render::board(out, &self.session)?,
                Event::CheckStarted { .. } => reveal_started = true,
                Event::AnswerChecked { .. } => render::outcome(out, &self.session)?,
                Event::GamePaused => writeln!(out, "Paused. Type `resume` to continue.")?,
                Event::GameResumed => writeln!(out, "Resumed.")?,
                Event::GameReset => writeln!(out, "Round abandoned.")?,
                Event::GameCompleted { .. } | Event::TimeAdvanced { .. } => {}
            }
        }

        // A terminal has no reveal animation to wait for.
        if reveal_started && query::status(&self.session) == GameStatus::Checking {
            self.run(Command::FinishReveal, out)?;
        }
        Ok(())
    }
}
