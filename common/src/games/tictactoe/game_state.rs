use crate::games::SessionRng;
use super::board::Board;
use super::types::{FirstPlayerMode, Mark, Outcome, Position};
use super::win_detector::detect;

/// A human-vs-computer game. X always moves first.
#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    pub board: Board,
    pub current_mark: Mark,
    pub computer_mark: Mark,
    pub outcome: Outcome,
    pub last_move: Option<Position>,
}

impl TicTacToeGameState {
    pub fn new(computer_mark: Mark) -> Self {
        Self {
            board: Board::new(),
            current_mark: Mark::X,
            computer_mark,
            outcome: Outcome::Ongoing,
            last_move: None,
        }
    }

    pub fn with_first_player(first_player_mode: FirstPlayerMode, rng: &mut SessionRng) -> Self {
        let computer_mark = match first_player_mode {
            FirstPlayerMode::Computer => Mark::X,
            FirstPlayerMode::Human => Mark::O,
            FirstPlayerMode::Random => {
                if rng.random_bool() {
                    Mark::X
                } else {
                    Mark::O
                }
            }
        };
        Self::new(computer_mark)
    }

    pub fn reset(&mut self) {
        self.board.clear();
        self.current_mark = Mark::X;
        self.outcome = Outcome::Ongoing;
        self.last_move = None;
    }

    pub fn human_mark(&self) -> Mark {
        self.computer_mark.opponent().unwrap_or(Mark::Empty)
    }

    pub fn is_computer_turn(&self) -> bool {
        !self.outcome.is_over() && self.current_mark == self.computer_mark
    }

    pub fn place_mark(&mut self, mark: Mark, pos: Position) -> Result<(), String> {
        if self.outcome.is_over() {
            return Err("Game is already over".to_string());
        }

        if mark != self.current_mark {
            return Err(format!("Not {}'s turn", mark));
        }

        if !pos.is_on_board() {
            return Err(format!("Position {} out of bounds", pos));
        }

        if !self.board.get(pos).is_empty() {
            return Err(format!("Cell {} is already marked", pos));
        }

        self.board.set(pos, mark);
        self.last_move = Some(pos);
        self.outcome = detect(&self.board);

        if !self.outcome.is_over() {
            self.switch_turn();
        }

        Ok(())
    }

    fn switch_turn(&mut self) {
        if let Some(next) = self.current_mark.opponent() {
            self.current_mark = next;
        }
    }
}
