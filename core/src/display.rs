use core::fmt;

use crate::*;

/// Plain-text rendering of a board, one line per row.
///
/// | Cell            | Text  |
/// | --------------- | ----- |
/// | mine            | ` * ` |
/// | revealed zero   | ` . ` |
/// | revealed number | ` N ` |
/// | flagged         | ` F ` |
/// | hidden          | ` ? ` |
#[derive(Copy, Clone, Debug)]
pub struct BoardView<'a> {
    engine: &'a Engine,
    reveal_all: bool,
}

impl Engine {
    /// Text view of the board; `reveal_all` shows every cell as if it were revealed.
    pub fn view(&self, reveal_all: bool) -> BoardView<'_> {
        BoardView {
            engine: self,
            reveal_all,
        }
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.engine.size();
        for row in 0..rows {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..cols {
                let cell = self
                    .engine
                    .cell(Position::new(row, col))
                    .map_err(|_| fmt::Error)?;
                write_cell(f, cell, self.reveal_all)?;
            }
        }
        Ok(())
    }
}

fn write_cell(f: &mut fmt::Formatter<'_>, cell: Cell, reveal_all: bool) -> fmt::Result {
    if reveal_all || cell.is_revealed() {
        match cell.adjacent_mines() {
            None => f.write_str(" * "),
            Some(0) => f.write_str(" . "),
            Some(count) => write!(f, " {} ", count),
        }
    } else if cell.is_flagged() {
        f.write_str(" F ")
    } else {
        f.write_str(" ? ")
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.view(false), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn engine() -> Engine {
        let layout = MineLayout::from_mine_positions(2, 3, [Position::new(0, 0)]).unwrap();
        Engine::from_layout(layout)
    }

    #[test]
    fn hidden_board_shows_question_marks() {
        assert_eq!(engine().to_string(), " ?  ?  ? \n ?  ?  ? ");
    }

    #[test]
    fn revealed_and_flagged_cells_are_shown() {
        let mut engine = engine();
        engine.right_click(Position::new(0, 0)).unwrap();
        engine.left_click(Position::new(1, 2)).unwrap();

        assert_eq!(engine.to_string(), " F  1  . \n ?  1  . ");
    }

    #[test]
    fn reveal_all_shows_mines_and_counts() {
        let engine = engine();

        assert_eq!(engine.view(true).to_string(), " *  1  . \n 1  1  . ");
    }
}
