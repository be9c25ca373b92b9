use std::fmt;

use crate::{Action, Board, Direction, State};

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.tiles().len() - 1).to_string().len();
        for (pos, tile) in self.cells() {
            if pos.1 != 0 {
                " ".fmt(f)?;
            }
            if tile == 0 {
                write!(f, "{:>width$}", ".")?;
            } else {
                write!(f, "{tile:>width$}")?;
            }
            if pos.1 as usize + 1 == self.dim() {
                "\n".fmt(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Right => "Right".fmt(f),
            Direction::Left => "Left".fmt(f),
            Direction::Up => "Up".fmt(f),
            Direction::Down => "Down".fmt(f),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Start => "Start".fmt(f),
            Action::Slide(dir) => dir.fmt(f),
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.action())?;
        self.board().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use crate::Board;

    #[test]
    fn render_3x3() {
        let board = Board::new([1, 0, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(board.to_string(), "1 . 2\n3 4 5\n6 7 8\n");
    }

    #[test]
    fn render_4x4_aligned() {
        let board = Board::goal(4).unwrap();
        assert_eq!(
            board.to_string(),
            " .  1  2  3\n 4  5  6  7\n 8  9 10 11\n12 13 14 15\n"
        );
    }

    #[test]
    fn render_path() {
        let result = crate::solve(Board::new([1, 0, 2, 3]).unwrap());
        let rendered = result.path.iter().map(ToString::to_string).collect::<String>();
        assert_eq!(rendered, "Start\n1 .\n2 3\nRight\n. 1\n2 3\n");
    }
}
