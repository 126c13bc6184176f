use crate::engine::{Board, Cell};
use crate::error::GridError;
use crate::node::{Node, NodeArena};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use tracing::{debug, trace};

/// Which endpoint the search starts from.
///
/// Adjacency is symmetric, so both directions find a path of the same length.
/// A backward search still reports its path from start to goal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchDirection {
    #[default]
    Forward,
    Backward,
}

/// An ordered sequence of cells, each orthogonally adjacent to the next.
///
/// A path always holds at least one cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Cell>,
}

impl Path {
    fn new(cells: Vec<Cell>) -> Self {
        debug_assert!(!cells.is_empty());
        Path { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells on the path, endpoints included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves along the path (`len() - 1`).
    pub fn edge_count(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn start(&self) -> Cell {
        self.cells[0]
    }

    pub fn end(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    fn reversed(mut self) -> Self {
        self.cells.reverse();
        self
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", cell)?;
        }
        Ok(())
    }
}

/// Result of a search: a path to the goal, or proof that none exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Path),
    NotFound,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::NotFound => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::NotFound => None,
        }
    }
}

/// Counters collected while a search runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes taken off the frontier, including the goal node if one was found.
    pub expanded: usize,
    /// Distinct cells that entered the visited set, the root included.
    pub discovered: usize,
    /// Largest frontier size observed.
    pub peak_frontier: usize,
}

/// The outcome of a search together with its counters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

/// Breadth-first search over a board's adjacency graph.
///
/// # Examples
/// ```
/// use gridpath_solver::solver::{Bfs, SearchOutcome};
/// use gridpath_solver::node::Node;
/// use gridpath_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["s . .", "w w .", "g . ."]).unwrap();
/// let (start, goal) = board.endpoints().unwrap();
/// let report = Bfs::new(&board).search(Node::root(start, goal));
/// match report.outcome {
///     SearchOutcome::Found(path) => assert_eq!(path.edge_count(), 6),
///     SearchOutcome::NotFound => panic!("goal should be reachable"),
/// }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Bfs<'b> {
    board: &'b Board,
}

impl<'b> Bfs<'b> {
    pub fn new(board: &'b Board) -> Self {
        Bfs { board }
    }

    pub fn board(&self) -> &'b Board {
        self.board
    }

    /// Explores the board level by level from `root` until a goal node is dequeued
    /// or the frontier runs dry.
    ///
    /// Cells are marked visited when they are enqueued, so each cell is enqueued at
    /// most once and the search performs at most `rows * cols` expansions. The first
    /// goal node dequeued carries a path with the fewest possible moves. Neighbors
    /// are visited in [`crate::engine::NEIGHBOR_OFFSETS`] order, which makes the
    /// returned path reproducible.
    pub fn search(&self, root: Node) -> SearchReport {
        let capacity = self.board.cell_count();
        let mut arena = NodeArena::with_capacity(capacity);
        let mut visited: HashSet<Cell> = HashSet::with_capacity(capacity);
        let mut frontier = VecDeque::new();

        debug!(
            start = %root.cell(),
            goal = %root.goal(),
            rows = self.board.rows(),
            cols = self.board.cols(),
            "starting BFS"
        );

        visited.insert(root.cell());
        frontier.push_back(arena.push(root));

        let mut stats = SearchStats {
            peak_frontier: frontier.len(),
            ..SearchStats::default()
        };

        while let Some(id) = frontier.pop_front() {
            let node = *arena.get(id);
            stats.expanded += 1;

            if node.is_goal() {
                stats.discovered = visited.len();
                let path = Path::new(arena.reconstruct_path(id));
                debug!(
                    moves = path.edge_count(),
                    expanded = stats.expanded,
                    discovered = stats.discovered,
                    "goal reached"
                );
                return SearchReport {
                    outcome: SearchOutcome::Found(path),
                    stats,
                };
            }

            trace!(cell = %node.cell(), depth = node.depth(), "expanding");

            for neighbor in self.board.neighbors(&node.cell()) {
                if visited.insert(neighbor) {
                    let child = Node::child(neighbor, id, &node);
                    frontier.push_back(arena.push(child));
                }
            }
            stats.peak_frontier = stats.peak_frontier.max(frontier.len());
        }

        stats.discovered = visited.len();
        debug!(
            expanded = stats.expanded,
            discovered = stats.discovered,
            "frontier exhausted, goal unreachable"
        );
        SearchReport {
            outcome: SearchOutcome::NotFound,
            stats,
        }
    }

    /// Searches from `start` to `goal`, both given by position.
    ///
    /// The cells are looked up on the board, so callers may pass any cell with the
    /// right coordinates.
    ///
    /// # Errors
    /// `GridError::OutOfBounds` if either endpoint lies outside the board.
    pub fn search_between(&self, start: Cell, goal: Cell) -> Result<SearchReport, GridError> {
        let start = self.lookup(start)?;
        let goal = self.lookup(goal)?;
        Ok(self.search(Node::root(start, goal)))
    }

    /// Like [`Bfs::search_between`], but lets the search run from either end.
    ///
    /// A backward search explores from `goal` towards `start` and reverses the
    /// path it finds, so the reported path always begins at `start`.
    pub fn search_directed(
        &self,
        start: Cell,
        goal: Cell,
        direction: SearchDirection,
    ) -> Result<SearchReport, GridError> {
        match direction {
            SearchDirection::Forward => self.search_between(start, goal),
            SearchDirection::Backward => {
                let report = self.search_between(goal, start)?;
                let outcome = match report.outcome {
                    SearchOutcome::Found(path) => SearchOutcome::Found(path.reversed()),
                    SearchOutcome::NotFound => SearchOutcome::NotFound,
                };
                Ok(SearchReport {
                    outcome,
                    stats: report.stats,
                })
            }
        }
    }

    fn lookup(&self, cell: Cell) -> Result<Cell, GridError> {
        self.board
            .get_cell(cell.row(), cell.col())
            .ok_or(GridError::OutOfBounds {
                row: cell.row(),
                col: cell.col(),
            })
    }
}

/// Finds a path between the board's start and goal sentinels.
///
/// Setup problems (a missing or duplicated sentinel) are returned as errors before
/// any search runs. An unreachable goal is a normal `SearchOutcome::NotFound`.
pub fn solve_bfs(board: &Board, direction: SearchDirection) -> Result<SearchReport, GridError> {
    let (start, goal) = board.endpoints()?;
    Bfs::new(board).search_directed(start, goal, direction)
}
