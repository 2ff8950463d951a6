use minegrid_core::{Coord, Coord2, GameError, Result};

/// A parsed player command with 0-based coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Free(Coord2),
    Mine(Coord2),
}

/// Parses a `<column> <row> <keyword>` line. Coordinates are 1-based on
/// the wire; anything outside `1..=size` is `OutOfBounds`, unparsable
/// tokens or unknown keywords are `MalformedCommand`. Trailing tokens are
/// ignored.
pub fn parse_command(line: &str, size: Coord) -> Result<Command> {
    let mut tokens = line.split_whitespace();
    let column = parse_axis(tokens.next())?;
    let row = parse_axis(tokens.next())?;
    let keyword = tokens.next().ok_or(GameError::MalformedCommand)?;

    let coords = to_zero_based(row, column, size)?;
    match keyword {
        "free" => Ok(Command::Free(coords)),
        "mine" => Ok(Command::Mine(coords)),
        _ => Err(GameError::MalformedCommand),
    }
}

fn parse_axis(token: Option<&str>) -> Result<i32> {
    token
        .ok_or(GameError::MalformedCommand)?
        .parse()
        .map_err(|_| GameError::MalformedCommand)
}

fn to_zero_based(row: i32, column: i32, size: Coord) -> Result<Coord2> {
    let size = i32::from(size);
    if (1..=size).contains(&row) && (1..=size).contains(&column) {
        Ok(((row - 1) as Coord, (column - 1) as Coord))
    } else {
        Err(GameError::OutOfBounds)
    }
}
