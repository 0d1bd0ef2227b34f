use tictactoe_common::games::tictactoe::{BOARD_SIZE, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanCommand {
    Move(Position),
    Quit,
}

/// Parses "row col" with 1-based coordinates; commas are accepted as
/// separators. "q" or "quit" ends the session.
pub fn parse_command(line: &str) -> Result<HumanCommand, String> {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
        return Ok(HumanCommand::Quit);
    }

    let parts: Vec<&str> = trimmed
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();

    let [row, col] = parts.as_slice() else {
        return Err(format!("Expected \"row col\", got \"{}\"", trimmed));
    };

    Ok(HumanCommand::Move(Position::new(
        parse_coordinate(row)?,
        parse_coordinate(col)?,
    )))
}

fn parse_coordinate(value: &str) -> Result<usize, String> {
    let number: usize = value
        .parse()
        .map_err(|_| format!("\"{}\" is not a number", value))?;
    if number == 0 || number > BOARD_SIZE {
        return Err(format!("Coordinates must be between 1 and {}", BOARD_SIZE));
    }
    Ok(number - 1)
}
