use std::io::{BufRead, Write};

use tictactoe_common::games::SessionRng;
use tictactoe_common::games::tictactoe::{
    BotInput, BotType, CandidateValue, Outcome, TicTacToeGameState, calculate_move, detect,
    evaluate_candidates,
};
use tictactoe_common::log;

use crate::input::{HumanCommand, parse_command};

pub struct GameOptions {
    pub bot_type: BotType,
    pub explain: bool,
}

pub enum GameEnd {
    Finished(Outcome),
    Quit,
}

fn io_error(e: std::io::Error) -> String {
    format!("Console I/O failed: {}", e)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>, String> {
    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(io_error)?;
    Ok((read > 0).then_some(line))
}

/// Plays one game to completion on `state`. Closing the input counts as quitting.
pub fn run_game<R: BufRead, W: Write>(
    state: &mut TicTacToeGameState,
    options: &GameOptions,
    rng: &mut SessionRng,
    input: &mut R,
    output: &mut W,
) -> Result<GameEnd, String> {
    loop {
        writeln!(output, "\n{}\n", state.board).map_err(io_error)?;

        let outcome = detect(&state.board);
        if outcome.is_over() {
            writeln!(output, "{}", outcome).map_err(io_error)?;
            log!("Game over: {}", outcome);
            return Ok(GameEnd::Finished(outcome));
        }

        if state.is_computer_turn() {
            play_computer_turn(state, options, rng)?;
            continue;
        }

        write!(output, "{} to move (row col, q to quit): ", state.human_mark()).map_err(io_error)?;
        output.flush().map_err(io_error)?;

        let Some(line) = read_line(input)? else {
            return Ok(GameEnd::Quit);
        };

        let result = parse_command(&line).and_then(|command| match command {
            HumanCommand::Quit => Ok(Some(GameEnd::Quit)),
            HumanCommand::Move(pos) => state.place_mark(state.human_mark(), pos).map(|_| None),
        });

        match result {
            Ok(Some(end)) => return Ok(end),
            Ok(None) => {}
            Err(message) => writeln!(output, "{}", message).map_err(io_error)?,
        }
    }
}

fn play_computer_turn(
    state: &mut TicTacToeGameState,
    options: &GameOptions,
    rng: &mut SessionRng,
) -> Result<(), String> {
    if options.explain && options.bot_type == BotType::Heuristic {
        for candidate in evaluate_candidates(&state.board, state.computer_mark) {
            let value = match candidate.value {
                CandidateValue::Win => "win".to_string(),
                CandidateValue::Forced => "forced".to_string(),
                CandidateValue::WorstReply(score) => score.to_string(),
            };
            log!("Candidate {}: {}", candidate.position, value);
        }
    }

    let pos = calculate_move(options.bot_type, BotInput::from_game_state(state), rng)
        .ok_or_else(|| "Computer has no move on a full board".to_string())?;

    log!("Computer plays {} at {}", state.computer_mark, pos);
    state.place_mark(state.computer_mark, pos)
}

/// Asks whether to start another game. Anything but "y"/"yes" declines.
pub fn ask_play_again<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<bool, String> {
    write!(output, "Play again? [y/N]: ").map_err(io_error)?;
    output.flush().map_err(io_error)?;
    let answer = read_line(input)?.unwrap_or_default();
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tictactoe_common::games::tictactoe::{Mark, Position};

    fn options() -> GameOptions {
        GameOptions {
            bot_type: BotType::Heuristic,
            explain: false,
        }
    }

    fn play(state: &mut TicTacToeGameState, script: &str) -> (GameEnd, String) {
        let mut rng = SessionRng::new(5);
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let end = run_game(state, &options(), &mut rng, &mut input, &mut output).unwrap();
        (end, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_computer_opens_in_center() {
        let mut state = TicTacToeGameState::new(Mark::X);
        let (end, _) = play(&mut state, "");
        assert!(matches!(end, GameEnd::Quit));
        assert_eq!(state.board.get(Position::new(1, 1)), Mark::X);
        assert_eq!(state.current_mark, Mark::O);
    }

    #[test]
    fn test_human_errors_are_reported_and_retried() {
        let mut state = TicTacToeGameState::new(Mark::O);
        let (end, output) = play(&mut state, "9 9\n1 1\n1 1\nq\n");
        assert!(matches!(end, GameEnd::Quit));
        assert!(output.contains("Coordinates must be between 1 and 3"), "{}", output);
        assert!(output.contains("already marked"), "{}", output);
        assert_eq!(state.board.get(Position::new(0, 0)), Mark::X);
        assert_eq!(state.board.get(Position::new(1, 1)), Mark::O);
    }

    #[test]
    fn test_human_loses_when_ignoring_threat() {
        // Computer X: center, then corner (0, 0) after human plays (0, 1),
        // and the human never blocks the main diagonal.
        let mut state = TicTacToeGameState::new(Mark::X);
        let (end, output) = play(&mut state, "1 2\n2 1\n");
        match end {
            GameEnd::Finished(outcome) => assert_eq!(outcome.winner(), Some(Mark::X)),
            GameEnd::Quit => panic!("game did not finish:\n{}", output),
        }
        assert!(output.contains("X wins!"));
    }

    #[test]
    fn test_play_again_answers() {
        let mut output = Vec::new();
        assert!(ask_play_again(&mut Cursor::new(b"y\n".to_vec()), &mut output).unwrap());
        assert!(ask_play_again(&mut Cursor::new(b"YES\n".to_vec()), &mut output).unwrap());
        assert!(!ask_play_again(&mut Cursor::new(b"n\n".to_vec()), &mut output).unwrap());
        assert!(!ask_play_again(&mut Cursor::new(Vec::new()), &mut output).unwrap());
    }
}
