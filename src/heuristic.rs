use crate::Board;

/// Sum of Manhattan distances of every non-blank tile to its solved cell.
///
/// Admissible and consistent: one move changes the estimate by exactly one.
pub fn heuristic(board: &Board) -> u32 {
    board
        .cells()
        .filter(|&(_, tile)| tile != 0)
        .map(|(pos, tile)| {
            let target = board.pos_of(tile as usize);
            (pos.0.abs_diff(target.0) + pos.1.abs_diff(target.1)) as u32
        })
        .sum()
}
