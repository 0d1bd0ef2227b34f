use super::board::Board;
use super::types::{LINES, Line, Mark, Outcome, WinningLine};

/// Classifies a board. Lines are scanned in [`LINES`] order, so when
/// several lines are complete the first one is reported.
pub fn detect(board: &Board) -> Outcome {
    if let Some(winning_line) = check_win_with_line(board) {
        return Outcome::Won(winning_line);
    }

    if board.is_full() {
        Outcome::Tied
    } else {
        Outcome::Ongoing
    }
}

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    LINES
        .iter()
        .find_map(|line| completed_by(board, line).map(|mark| WinningLine::new(mark, *line)))
}

fn completed_by(board: &Board, line: &Line) -> Option<Mark> {
    let [a, b, c] = board.line_cells(line);
    if a != Mark::Empty && a == b && b == c {
        Some(a)
    } else {
        None
    }
}
