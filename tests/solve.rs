use anyhow::{bail, ensure, Context};
use npuzzle_solver::{solve, Action, Board, Outcome};

use crate::common::*;

mod common;

fn main() {
    run_tests("solve", |content| {
        let input = input_of(content);
        let initial = input.parse::<Board>().context("Invalid board")?;

        let result = solve(initial.clone());
        let summary = match result.outcome {
            Outcome::Found => {
                // Validate.
                let mut board = initial;
                let mut steps = String::new();
                for state in &result.path[1..] {
                    let Action::Slide(dir) = state.action() else {
                        bail!("Start inside the path");
                    };
                    board = board.slide(dir).context("Invalid move")?;
                    ensure!(board == *state.board(), "Move does not match its label");
                    steps.push_str(fmt_direction(dir));
                }
                ensure!(board.is_goal(), "Invalid solution");
                ensure!(steps.len() + 1 == result.path.len(), "Path length mismatch");
                format!("{} moves", steps.len())
            }
            Outcome::Exhausted => {
                ensure!(result.path.is_empty(), "Path for an unsolvable board");
                "no solution".to_owned()
            }
            Outcome::Aborted => bail!("Aborted without a node limit"),
        };

        Ok(format!("{input}\n\n{SEPARATOR}{summary}\n"))
    });
}
