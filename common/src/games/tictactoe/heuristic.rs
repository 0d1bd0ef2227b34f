use super::board::Board;
use super::types::{LINES, Mark};

/// Returned when `reference` already owns a complete line. Ordinary
/// scores stay within -8..=8, so this is always the worst value.
pub const COMPLETED_LINE_SCORE: i32 = -100;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct LiveLines {
    x: i32,
    o: i32,
}

impl LiveLines {
    fn get(&self, mark: Mark) -> i32 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
            Mark::Empty => 0,
        }
    }
}

/// Scores a position right after `reference` moved, from the point of view
/// of `reference`'s opponent: lines the opponent can still complete minus
/// lines `reference` can still complete.
pub fn score(board: &Board, reference: Mark) -> i32 {
    let Some(opponent) = reference.opponent() else {
        return 0;
    };

    let mut live = LiveLines::default();

    for line in &LINES {
        let cells = board.line_cells(line);
        let has_x = cells.contains(&Mark::X);
        let has_o = cells.contains(&Mark::O);
        let has_empty = cells.contains(&Mark::Empty);

        match (has_x, has_o) {
            (false, false) => {
                live.x += 1;
                live.o += 1;
            }
            (true, false) if has_empty => live.x += 1,
            (false, true) if has_empty => live.o += 1,
            _ => {}
        }

        if cells.iter().all(|&cell| cell == reference) {
            return COMPLETED_LINE_SCORE;
        }
    }

    live.get(opponent) - live.get(reference)
}
