use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::{Hash, Hasher};

use fxhash::FxHashSet;

use crate::{heuristic, Action, Board, Key};

/// A board reached during search, with its path cost, priority and the move
/// that produced it.
///
/// States compare equal when their boards do, however they were reached.
#[derive(Debug, Clone)]
pub struct State {
    board: Board,
    g: u32,
    f: u32,
    action: Action,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
    }
}
impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.board.hash(state)
    }
}

impl State {
    fn root(board: Board) -> Self {
        let f = heuristic(&board);
        Self {
            board,
            g: 0,
            f,
            action: Action::Start,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn g(&self) -> u32 {
        self.g
    }

    pub fn f(&self) -> u32 {
        self.f
    }

    pub fn action(&self) -> Action {
        self.action
    }
}

/// A state together with the arena handle of its predecessor.
#[derive(Debug)]
struct Node {
    state: State,
    parent: Option<usize>,
}

#[derive(Debug, PartialEq, Eq)]
struct Entry {
    f: u32,
    seq: u64,
    node: usize,
}

// `BinaryHeap` is a max-heap: lower `f` wins, then the later push.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f).then(self.seq.cmp(&other.seq))
    }
}
impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of arena handles ordered by `f`.
///
/// Ties go to the most recently pushed entry. Duplicate boards are allowed.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl Frontier {
    pub fn push(&mut self, f: u32, node: usize) {
        self.seq += 1;
        self.heap.push(Entry {
            f,
            seq: self.seq,
            node,
        });
    }

    pub fn pop_min(&mut self) -> Option<usize> {
        self.heap.pop().map(|entry| entry.node)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Boards already expanded.
#[derive(Debug, Default)]
pub struct Visited(FxHashSet<Key>);

impl Visited {
    pub fn contains(&self, board: &Board) -> bool {
        self.0.contains(&board.key())
    }

    /// Returns `false` if the board was already present.
    pub fn insert(&mut self, board: &Board) -> bool {
        self.0.insert(board.key())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The goal was dequeued.
    Found,
    /// The frontier ran dry. The puzzle is unsolvable.
    Exhausted,
    /// The node limit was hit first.
    Aborted,
}

#[derive(Debug, Clone)]
pub struct SolveResult {
    pub outcome: Outcome,
    /// Start-to-goal states, empty unless `outcome` is [`Outcome::Found`].
    pub path: Vec<State>,
    pub nodes_expanded: usize,
}

impl SolveResult {
    /// Number of moves in the solution, if any.
    pub fn moves(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Solver {
    node_limit: Option<usize>,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give up with [`Outcome::Aborted`] after `limit` expansions.
    pub fn node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    pub fn solve(&self, initial: Board) -> SolveResult {
        self.solve_with(initial, || {})
    }

    /// Like [`Solver::solve`], calling `on_expand` once per expanded node.
    pub fn solve_with(&self, initial: Board, on_expand: impl FnMut()) -> SolveResult {
        Search::new(initial).run(self.node_limit, on_expand)
    }
}

/// Solve with no node limit.
pub fn solve(initial: Board) -> SolveResult {
    Solver::new().solve(initial)
}

/// Everything owned by one A* run.
struct Search {
    goal: Board,
    nodes: Vec<Node>,
    frontier: Frontier,
    visited: Visited,
    nodes_expanded: usize,
}

impl Search {
    fn new(initial: Board) -> Self {
        let goal = initial.solved();
        let root = State::root(initial);
        let mut frontier = Frontier::default();
        frontier.push(root.f, 0);
        Self {
            goal,
            nodes: vec![Node {
                state: root,
                parent: None,
            }],
            frontier,
            visited: Visited::default(),
            nodes_expanded: 0,
        }
    }

    fn run(mut self, node_limit: Option<usize>, mut on_expand: impl FnMut()) -> SolveResult {
        log::debug!(
            "Searching {}x{} board, h = {}",
            self.goal.dim(),
            self.goal.dim(),
            self.nodes[0].state.f,
        );

        while let Some(id) = self.frontier.pop_min() {
            #[cfg(feature = "coz")]
            coz::scope!("Expand");

            let state = &self.nodes[id].state;
            // Stale duplicate of a board expanded through a cheaper path.
            if self.visited.contains(&state.board) {
                continue;
            }
            if node_limit.map_or(false, |limit| self.nodes_expanded >= limit) {
                log::debug!("Aborted after {} expansions", self.nodes_expanded);
                return self.finish(Outcome::Aborted, Vec::new());
            }

            self.nodes_expanded += 1;
            on_expand();

            #[cfg(feature = "coz")]
            coz::progress!("Expand");

            if state.board == self.goal {
                let path = reconstruct_path(&self.nodes, id);
                log::debug!(
                    "Found {} moves after {} expansions, {} nodes generated",
                    path.len() - 1,
                    self.nodes_expanded,
                    self.nodes.len(),
                );
                return self.finish(Outcome::Found, path);
            }

            self.visited.insert(&state.board);

            let g = state.g + 1;
            for (dir, board) in state.board.neighbors() {
                if self.visited.contains(&board) {
                    continue;
                }
                let f = g + heuristic(&board);
                self.frontier.push(f, self.nodes.len());
                self.nodes.push(Node {
                    state: State {
                        board,
                        g,
                        f,
                        action: Action::Slide(dir),
                    },
                    parent: Some(id),
                });
            }
        }

        log::debug!("Exhausted after {} expansions", self.nodes_expanded);
        self.finish(Outcome::Exhausted, Vec::new())
    }

    fn finish(self, outcome: Outcome, path: Vec<State>) -> SolveResult {
        SolveResult {
            outcome,
            path,
            nodes_expanded: self.nodes_expanded,
        }
    }
}

/// Follow predecessor handles from `last` back to the root.
fn reconstruct_path(nodes: &[Node], last: usize) -> Vec<State> {
    let mut path = std::iter::successors(Some(&nodes[last]), |node| {
        node.parent.map(|parent| &nodes[parent])
    })
    .map(|node| node.state.clone())
    .collect::<Vec<_>>();
    path.reverse();
    path
}
