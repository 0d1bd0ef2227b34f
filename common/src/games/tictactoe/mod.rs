mod board;
mod bot_controller;
mod game_state;
mod heuristic;
mod types;
mod win_detector;

pub use board::Board;
pub use bot_controller::{
    BotInput, CandidateScore, CandidateValue, calculate_move, evaluate_candidates, select_move,
};
pub use game_state::TicTacToeGameState;
pub use heuristic::{COMPLETED_LINE_SCORE, score};
pub use types::{
    BOARD_SIZE, BotType, FirstPlayerMode, LINES, Line, Mark, Outcome, Position, WinningLine,
};
pub use win_detector::{check_win, check_win_with_line, detect};
