use crate::games::SessionRng;
use super::board::Board;
use super::game_state::TicTacToeGameState;
use super::heuristic::score;
use super::types::{BotType, Mark, Position};
use super::win_detector::check_win;

pub struct BotInput {
    pub board: Board,
    pub computer_mark: Mark,
}

impl BotInput {
    pub fn from_game_state(state: &TicTacToeGameState) -> Self {
        Self {
            board: state.board,
            computer_mark: state.computer_mark,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateValue {
    /// Playing here completes a line.
    Win,
    /// Playing here fills the board, so no reply exists.
    Forced,
    /// Lowest heuristic score over every opponent reply.
    WorstReply(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateScore {
    pub position: Position,
    pub value: CandidateValue,
}

pub fn calculate_move(bot_type: BotType, input: BotInput, rng: &mut SessionRng) -> Option<Position> {
    match bot_type {
        BotType::Random => calculate_random_move(&input, rng),
        BotType::Heuristic => select_move(&input.board, input.computer_mark),
    }
}

fn calculate_random_move(input: &BotInput, rng: &mut SessionRng) -> Option<Position> {
    let available_moves = input.board.available_moves();
    if available_moves.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..available_moves.len());
    Some(available_moves[idx])
}

/// Two-ply search: every computer move is answered by every opponent reply
/// and the resulting position is scored statically. The move whose worst
/// reply scores highest is chosen; earlier row-major candidates win ties.
///
/// The first move that wins outright is returned without looking further,
/// as is a move that leaves the opponent no reply.
///
/// Returns `None` when the board is full or `computer` is [`Mark::Empty`].
pub fn select_move(board: &Board, computer: Mark) -> Option<Position> {
    let opponent = computer.opponent()?;
    let mut scratch = *board;
    let mut best: Option<(Position, i32)> = None;

    for candidate in board.available_moves() {
        match evaluate_candidate(&mut scratch, candidate, computer, opponent) {
            CandidateValue::Win | CandidateValue::Forced => return Some(candidate),
            CandidateValue::WorstReply(value) => {
                if best.is_none_or(|(_, best_value)| value > best_value) {
                    best = Some((candidate, value));
                }
            }
        }
    }

    best.map(|(position, _)| position)
}

/// Values every empty cell the way [`select_move`] would, without the
/// early exits.
pub fn evaluate_candidates(board: &Board, computer: Mark) -> Vec<CandidateScore> {
    let Some(opponent) = computer.opponent() else {
        return Vec::new();
    };
    let mut scratch = *board;

    board
        .available_moves()
        .into_iter()
        .map(|position| CandidateScore {
            position,
            value: evaluate_candidate(&mut scratch, position, computer, opponent),
        })
        .collect()
}

fn evaluate_candidate(
    scratch: &mut Board,
    candidate: Position,
    computer: Mark,
    opponent: Mark,
) -> CandidateValue {
    scratch.set(candidate, computer);

    let value = if check_win(scratch) == Some(computer) {
        CandidateValue::Win
    } else {
        match worst_reply_score(scratch, opponent) {
            Some(worst) => CandidateValue::WorstReply(worst),
            None => CandidateValue::Forced,
        }
    };

    scratch.set(candidate, Mark::Empty);
    value
}

fn worst_reply_score(scratch: &mut Board, opponent: Mark) -> Option<i32> {
    let mut worst: Option<i32> = None;

    for reply in scratch.available_moves() {
        scratch.set(reply, opponent);
        let reply_score = score(scratch, opponent);
        scratch.set(reply, Mark::Empty);

        worst = Some(worst.map_or(reply_score, |w| w.min(reply_score)));
    }

    worst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::heuristic::COMPLETED_LINE_SCORE;
    use crate::games::tictactoe::win_detector::detect;
    use crate::games::tictactoe::types::Outcome;

    const E: Mark = Mark::Empty;
    const X: Mark = Mark::X;
    const O: Mark = Mark::O;

    #[test]
    fn test_empty_board_takes_center() {
        let board = Board::new();
        assert_eq!(select_move(&board, X), Some(Position::new(1, 1)));
        assert_eq!(select_move(&board, O), Some(Position::new(1, 1)));
    }

    #[test]
    fn test_empty_board_candidate_values() {
        let values: Vec<CandidateValue> = evaluate_candidates(&Board::new(), X)
            .into_iter()
            .map(|c| c.value)
            .collect();
        let expected = [-1, -2, -1, -2, 1, -2, -1, -2, -1].map(CandidateValue::WorstReply);
        assert_eq!(values, expected);
    }

    #[test]
    fn test_blocks_open_row() {
        let board = Board::from_rows([[X, X, E], [E, E, E], [E, E, E]]);
        assert_eq!(select_move(&board, O), Some(Position::new(0, 2)));

        let candidates = evaluate_candidates(&board, O);
        assert_eq!(candidates[0].value, CandidateValue::WorstReply(-3));
        assert!(
            candidates[1..]
                .iter()
                .all(|c| c.value == CandidateValue::WorstReply(COMPLETED_LINE_SCORE))
        );
    }

    #[test]
    fn test_answers_center_with_corner() {
        let board = Board::from_rows([[E, E, E], [E, X, E], [E, E, E]]);
        assert_eq!(select_move(&board, O), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_answers_corner_with_center() {
        let board = Board::from_rows([[X, E, E], [E, E, E], [E, E, E]]);
        assert_eq!(select_move(&board, O), Some(Position::new(1, 1)));
    }

    #[test]
    fn test_prefers_win_over_block() {
        let board = Board::from_rows([[O, O, E], [X, X, E], [E, E, E]]);
        assert_eq!(select_move(&board, X), Some(Position::new(1, 2)));
    }

    #[test]
    fn test_first_winning_move_in_row_major_order() {
        // Both (2, 0) and (2, 2) win for X; (2, 0) comes first.
        let board = Board::from_rows([[X, O, X], [X, O, X], [E, E, E]]);
        assert_eq!(select_move(&board, X), Some(Position::new(2, 0)));
    }

    #[test]
    fn test_last_cell_is_forced() {
        let board = Board::from_rows([[X, O, X], [X, O, O], [O, X, E]]);
        assert_eq!(select_move(&board, X), Some(Position::new(2, 2)));
        assert_eq!(
            evaluate_candidates(&board, X),
            vec![CandidateScore {
                position: Position::new(2, 2),
                value: CandidateValue::Forced,
            }]
        );
    }

    #[test]
    fn test_last_cell_that_wins_is_reported_as_win() {
        let board = Board::from_rows([[X, O, X], [O, O, X], [X, X, E]]);
        assert_eq!(
            evaluate_candidates(&board, O)[0].value,
            CandidateValue::Forced
        );
        assert_eq!(evaluate_candidates(&board, X)[0].value, CandidateValue::Win);
    }

    #[test]
    fn test_full_board_has_no_move() {
        let board = Board::from_rows([[X, O, X], [X, O, O], [O, X, X]]);
        assert_eq!(select_move(&board, X), None);
        assert!(evaluate_candidates(&board, X).is_empty());
    }

    #[test]
    fn test_empty_mark_has_no_move() {
        assert_eq!(select_move(&Board::new(), E), None);
    }

    #[test]
    fn test_caller_board_is_untouched() {
        let board = Board::from_rows([[X, E, E], [E, O, E], [E, E, X]]);
        let snapshot = board;
        let first = select_move(&board, O);
        assert_eq!(board, snapshot);
        assert_eq!(select_move(&board, O), first);
    }

    #[test]
    fn test_selected_cell_is_always_empty() {
        let boards = [
            Board::new(),
            Board::from_rows([[X, E, O], [E, X, E], [O, E, E]]),
            Board::from_rows([[X, O, X], [E, O, E], [E, X, E]]),
            Board::from_rows([[O, X, E], [E, X, E], [E, E, E]]),
        ];
        for board in boards {
            for mark in [X, O] {
                let pos = select_move(&board, mark).unwrap();
                assert!(board.is_valid_move(pos), "{} played occupied {}", mark, pos);
            }
        }
    }

    #[test]
    fn test_self_play_ends_in_tie() {
        let mut board = Board::new();
        let mut mark = X;
        let mut played = Vec::new();

        while detect(&board) == Outcome::Ongoing {
            let pos = select_move(&board, mark).unwrap();
            board.set(pos, mark);
            played.push(pos);
            mark = mark.opponent().unwrap();
        }

        assert_eq!(detect(&board), Outcome::Tied);
        assert_eq!(
            played,
            [(1, 1), (0, 0), (0, 2), (2, 0), (1, 0), (1, 2), (2, 1), (0, 1), (2, 2)]
                .map(|(row, col)| Position::new(row, col))
        );
    }

    #[test]
    fn test_random_bot_plays_empty_cell() {
        let board = Board::from_rows([[X, O, X], [E, O, E], [O, X, X]]);
        let mut rng = SessionRng::new(7);
        for _ in 0..20 {
            let input = BotInput { board, computer_mark: X };
            let pos = calculate_move(BotType::Random, input, &mut rng).unwrap();
            assert!(board.is_valid_move(pos));
        }
    }

    #[test]
    fn test_heuristic_bot_matches_select_move() {
        let board = Board::from_rows([[X, X, E], [E, E, E], [E, E, E]]);
        let mut rng = SessionRng::new(1);
        let input = BotInput { board, computer_mark: O };
        assert_eq!(
            calculate_move(BotType::Heuristic, input, &mut rng),
            Some(Position::new(0, 2))
        );
    }
}
