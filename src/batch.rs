//! Solving many independent puzzles, one search per puzzle.

use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::{Board, SolveResult, Solver};

#[derive(Debug, Clone)]
pub struct Report {
    pub result: SolveResult,
    pub elapsed: Duration,
}

fn timed(solver: &Solver, board: Board, on_expand: impl FnMut()) -> Report {
    let start = Instant::now();
    let result = solver.solve_with(board, on_expand);
    Report {
        result,
        elapsed: start.elapsed(),
    }
}

/// Solve every board in order on the current thread.
pub fn solve_seq(
    solver: &Solver,
    boards: Vec<Board>,
    mut on_expand: impl FnMut(),
) -> Vec<Report> {
    boards
        .into_iter()
        .map(|board| timed(solver, board, &mut on_expand))
        .collect()
}

/// Solve every board on the rayon pool. Reports come back in input order.
pub fn solve_par(
    solver: &Solver,
    boards: Vec<Board>,
    on_done: impl Fn(&Report) + Sync,
) -> Vec<Report> {
    boards
        .into_par_iter()
        .map(|board| {
            let report = timed(solver, board, || {});
            on_done(&report);
            report
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::Outcome;

    fn boards() -> Vec<Board> {
        [
            "1 2 3 4 0 6 7 5 8",
            "0 2 1 3",
            "1 0 2 3",
            "8 7 6 5 4 3 2 1 0",
            "0 1 2 3 4 5 6 7 8",
            "4 1 2 3 0 5 6 7 8 9 10 11 12 13 14 15",
        ]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect()
    }

    #[test]
    fn parallel_matches_sequential() {
        let solver = Solver::new();
        let mut expanded = 0;
        let seq = solve_seq(&solver, boards(), || expanded += 1);
        let done = AtomicUsize::new(0);
        let par = solve_par(&solver, boards(), |_| {
            done.fetch_add(1, Ordering::Relaxed);
        });

        assert_eq!(done.into_inner(), 6);
        assert_eq!(
            expanded,
            seq.iter().map(|r| r.result.nodes_expanded).sum::<usize>()
        );
        assert_eq!(seq.len(), par.len());
        for (a, b) in seq.iter().zip(&par) {
            assert_eq!(a.result.outcome, b.result.outcome);
            assert_eq!(a.result.nodes_expanded, b.result.nodes_expanded);
            assert_eq!(a.result.path, b.result.path);
        }

        let outcomes = par.iter().map(|r| r.result.outcome).collect::<Vec<_>>();
        assert_eq!(
            outcomes,
            [
                Outcome::Found,
                Outcome::Exhausted,
                Outcome::Found,
                Outcome::Found,
                Outcome::Found,
                Outcome::Found,
            ]
        );
        assert_eq!(par[2].result.moves(), Some(1));
        assert_eq!(par[4].result.moves(), Some(0));
        assert_eq!(par[5].result.moves(), Some(1));
    }
}
