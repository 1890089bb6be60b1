use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{bail, ensure};
use sweeper_core::{Coord, Engine, GameState, Position};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Position),
    Flag(Position),
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let mut words = s.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("Empty command");
        };

        let action: fn(Position) -> Command = match verb {
            "q" | "quit" => return Ok(Command::Quit),
            "r" | "reveal" => Command::Reveal,
            "f" | "flag" => Command::Flag,
            _ => bail!("Unknown command {verb:?}, expected r ROW COL, f ROW COL or q"),
        };

        let coords = words
            .map(|word| word.parse::<Coord>())
            .collect::<Result<Vec<_>, _>>()?;
        ensure!(coords.len() == 2, "Expected a row and a column");

        Ok(action(Position::new(coords[0], coords[1])))
    }
}

fn write_status<W: Write>(engine: &Engine, out: &mut W) -> anyhow::Result<()> {
    let stats = engine.stats();
    writeln!(out, "{engine}")?;
    writeln!(
        out,
        "Mines left: {} | Revealed: {}/{}",
        stats.remaining_mines,
        stats.revealed_cells,
        engine.config().safe_cells()
    )?;
    Ok(())
}

/// Runs commands from `input` against `engine` until the game ends, the player quits or input
/// runs out. Returns the state the game was left in.
pub fn play<R, W>(engine: &mut Engine, input: R, out: &mut W) -> anyhow::Result<GameState>
where
    R: BufRead,
    W: Write,
{
    write_status(engine, out)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        log::debug!("Command: {:?}", command);

        let outcome = match command {
            Command::Quit => break,
            Command::Reveal(pos) => engine.left_click(pos).map(|changed| changed.len()),
            Command::Flag(pos) => engine.right_click(pos).map(usize::from),
        };
        match outcome {
            Ok(changed) => log::debug!("{} cells changed", changed),
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        }

        if engine.is_lost() {
            let mines = engine.reveal_all_mines();
            log::info!("Lost with {} mines on the board", mines.len());
        }
        write_status(engine, out)?;

        match engine.state() {
            GameState::Playing => {}
            GameState::Won => {
                writeln!(out, "You won!")?;
                break;
            }
            GameState::Lost => {
                writeln!(out, "Boom! Game over.")?;
                break;
            }
        }
    }

    Ok(engine.state())
}
