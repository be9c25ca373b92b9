use std::ops::{Index, IndexMut};

use arrayvec::ArrayVec;
use thiserror::Error;

pub mod batch;
mod fmt;
pub mod heuristic;
mod parse;
pub mod solve;

pub use heuristic::heuristic;
pub use parse::parse_batch;
pub use solve::{solve, Outcome, SolveResult, Solver, State};

pub type Tile = u8;

/// Largest supported side length. Every tile value must fit in a [`Tile`].
pub const MAX_DIM: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("Empty board")]
    Empty,
    #[error("Tile count {0} is not a perfect square")]
    NotSquare(usize),
    #[error("Board side {0} exceeds the maximum of 16")]
    TooLarge(usize),
    #[error("Tile {tile} out of range 0..{len}")]
    OutOfRange { tile: u32, len: usize },
    #[error("Missing blank tile 0")]
    NoBlank,
    #[error("Duplicate tile {0}")]
    Duplicate(Tile),
}

/// One arrangement of tiles on a square grid, row-major, `0` being the blank.
///
/// Only constructible through validating constructors, so every `Board` holds
/// each value of `0..dim²` exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    dim: u8,
    blank: u8,
    tiles: Box<[Tile]>,
}

/// Row and column of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos(pub u8, pub u8);

impl Index<Pos> for Board {
    type Output = Tile;
    fn index(&self, pos: Pos) -> &Self::Output {
        &self.tiles[self.index_of(pos)]
    }
}
impl IndexMut<Pos> for Board {
    fn index_mut(&mut self, pos: Pos) -> &mut Self::Output {
        let idx = self.index_of(pos);
        &mut self.tiles[idx]
    }
}

/// The direction a tile travels when it slides into the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    /// Neighbor generation order. The blank moves left, right, down, up in turn.
    pub const EXPANSION_ORDER: [Self; 4] = [Self::Right, Self::Left, Self::Up, Self::Down];

    /// Unit `(row, col)` step of the moving tile.
    pub fn offset(self) -> (i8, i8) {
        match self {
            Direction::Right => (0, 1),
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// The move that produced a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Start,
    Slide(Direction),
}

/// Injective visited-set key for boards of one size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Packed(u128),
    Wide(Box<[Tile]>),
}

impl Board {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Result<Self, BoardError> {
        let values = values.into_iter().collect::<Vec<_>>();
        let len = values.len();
        if len == 0 {
            return Err(BoardError::Empty);
        }
        let dim = isqrt(len);
        if dim * dim != len {
            return Err(BoardError::NotSquare(len));
        }
        if dim > MAX_DIM {
            return Err(BoardError::TooLarge(dim));
        }

        let mut seen = vec![false; len];
        let mut blank = None;
        let mut tiles = Vec::with_capacity(len);
        for (idx, &tile) in values.iter().enumerate() {
            if tile as usize >= len {
                return Err(BoardError::OutOfRange { tile, len });
            }
            if tile == 0 {
                blank = Some(idx);
            }
            tiles.push(tile as Tile);
        }
        let blank = blank.ok_or(BoardError::NoBlank)?;
        for &tile in &tiles {
            if std::mem::replace(&mut seen[tile as usize], true) {
                return Err(BoardError::Duplicate(tile));
            }
        }

        Ok(Self {
            dim: dim as u8,
            blank: blank as u8,
            tiles: tiles.into(),
        })
    }

    /// The solved board `0, 1, .., dim² - 1` of side `dim`.
    pub fn goal(dim: usize) -> Result<Self, BoardError> {
        Self::new(0..(dim * dim) as u32)
    }

    /// The solved board of the same size as `self`.
    pub fn solved(&self) -> Self {
        let tiles = (0..self.tiles.len()).map(|t| t as Tile).collect();
        Self {
            dim: self.dim,
            blank: 0,
            tiles,
        }
    }

    pub fn dim(&self) -> usize {
        self.dim as usize
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn blank(&self) -> Pos {
        self.pos_of(self.blank as usize)
    }

    pub fn is_goal(&self) -> bool {
        self.tiles.iter().zip(0..).all(|(&tile, i)| tile as usize == i)
    }

    pub fn pos_of(&self, idx: usize) -> Pos {
        Pos((idx / self.dim()) as u8, (idx % self.dim()) as u8)
    }

    pub fn index_of(&self, pos: Pos) -> usize {
        pos.0 as usize * self.dim() + pos.1 as usize
    }

    pub fn cells(&self) -> impl Iterator<Item = (Pos, Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(idx, &tile)| (self.pos_of(idx), tile))
    }

    fn sibling_pos(&self, pos: Pos, (dx, dy): (i8, i8)) -> Option<Pos> {
        let x = pos.0.checked_add_signed(dx)?;
        let y = pos.1.checked_add_signed(dy)?;
        if self.dim <= x || self.dim <= y {
            return None;
        }
        Some(Pos(x, y))
    }

    /// Slide the tile that can travel in `dir` into the blank.
    ///
    /// Returns `None` if no such tile exists. `self` is left untouched.
    pub fn slide(&self, dir: Direction) -> Option<Self> {
        let blank = self.blank();
        let src = self.sibling_pos(blank, dir.reversed().offset())?;
        let mut next = self.clone();
        next[blank] = self[src];
        next[src] = 0;
        next.blank = next.index_of(src) as u8;
        Some(next)
    }

    /// All boards one move away, in [`Direction::EXPANSION_ORDER`].
    pub fn neighbors(&self) -> ArrayVec<(Direction, Self), 4> {
        Direction::EXPANSION_ORDER
            .into_iter()
            .filter_map(|dir| Some((dir, self.slide(dir)?)))
            .collect()
    }

    pub fn key(&self) -> Key {
        let len = self.tiles.len();
        let bits = usize::BITS - (len - 1).leading_zeros();
        if bits as usize * len > u128::BITS as usize {
            return Key::Wide(self.tiles.clone());
        }
        let packed = self
            .tiles
            .iter()
            .fold(0u128, |acc, &tile| (acc << bits) | tile as u128);
        Key::Packed(packed)
    }
}

fn isqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}
