use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use minegrid_core::{Game, GameConfig, GameError, GameState};
use rand::RngExt;

use crate::command::{Command, parse_command};

mod command;
mod render;

const FIELD_SIZE: u8 = 9;

#[derive(Parser, Debug)]
#[command(name = "minegrid", about = "Text-mode minesweeper on a 9x9 field")]
struct Options {
    /// Number of mines, skips the interactive prompt
    #[arg(long)]
    mines: Option<u16>,
    /// Seed for mine placement, drawn from entropy when absent
    #[arg(long)]
    seed: Option<u64>,
    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

fn main() -> anyhow::Result<()> {
    let options = Options::parse();
    env_logger::Builder::new()
        .filter_level(options.verbosity.log_level_filter())
        .init();

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let config = match options.mines {
        Some(mines) => GameConfig::new(FIELD_SIZE, mines).context("invalid mine count")?,
        None => prompt_mine_count(&mut input)?,
    };
    let seed = options.seed.unwrap_or_else(|| rand::rng().random());
    log::debug!("starting with {} mines, seed {seed}", config.mines);

    let mut game = Game::new(config, seed);
    run(&mut game, &mut input)
}

fn prompt_mine_count(input: &mut impl BufRead) -> anyhow::Result<GameConfig> {
    loop {
        print!("How many mines do you want on the field? ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("no mine count given");
        }
        let Ok(mines) = line.trim().parse() else {
            continue;
        };
        match GameConfig::new(FIELD_SIZE, mines) {
            Ok(config) => return Ok(config),
            Err(error) => println!("{error}"),
        }
    }
}

fn run(game: &mut Game, input: &mut impl BufRead) -> anyhow::Result<()> {
    print!("\n{}", render::render_board(game));

    loop {
        print!("Set/unset mines marks or claim a cell as free: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        let command = match parse_command(&line, game.grid().size()) {
            Ok(command) => command,
            Err(GameError::OutOfBounds) => {
                println!("Wrong coordinates");
                continue;
            }
            Err(_) => continue,
        };

        let accepted = match command {
            Command::Free(coords) => game.reveal(coords).map(|_| ()),
            Command::Mine(coords) => game.toggle_flag(coords).map(|_| ()),
        };
        if let Err(error) = accepted {
            log::warn!("command rejected: {error}");
            continue;
        }

        match game.state() {
            GameState::Playing => print!("\n{}", render::render_board(game)),
            GameState::Lost => {
                print!("\n{}", render::render_board(game));
                println!("You stepped on a mine and failed!");
                return Ok(());
            }
            GameState::Won => {
                println!("Congratulations! You found all the mines!");
                return Ok(());
            }
        }
    }
}
