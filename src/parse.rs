use std::str::FromStr;

use anyhow::{ensure, Context, Result};

use crate::Board;

fn parse_tiles<'a>(line: &'a str) -> impl Iterator<Item = Result<u32>> + 'a {
    line.split_whitespace().map(|token| {
        token
            .parse::<u32>()
            .with_context(|| format!("Invalid tile: {token:?}"))
    })
}

/// A single puzzle. Line breaks are not significant.
impl FromStr for Board {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tiles = parse_tiles(s).collect::<Result<Vec<_>>>()?;
        ensure!(!tiles.is_empty(), "Missing tiles");
        Ok(Board::new(tiles)?)
    }
}

/// Parse a batch of puzzles separated by blank lines.
pub fn parse_batch(s: &str) -> Result<Vec<Board>> {
    let mut boards = Vec::new();
    let mut tiles = Vec::new();
    let mut start_line = 0;

    for (line, line_no) in s.lines().chain([""]).zip(1..) {
        if line.trim().is_empty() {
            if !tiles.is_empty() {
                let board = Board::new(tiles.drain(..)).with_context(|| {
                    format!(
                        "Invalid puzzle {} starting at line {start_line}",
                        boards.len() + 1,
                    )
                })?;
                boards.push(board);
            }
            continue;
        }

        if tiles.is_empty() {
            start_line = line_no;
        }
        for tile in parse_tiles(line) {
            tiles.push(tile.with_context(|| format!("At line {line_no}"))?);
        }
    }

    Ok(boards)
}
