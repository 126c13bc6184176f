//! Grid data model for the path finder.
//!
//! This module defines:
//! - `CellKind`: what occupies a grid position (free space, wall, or one of the endpoints).
//! - `Cell`: an immutable grid position together with its kind.
//! - `Board`: the full rectangular grid, answering bounds and adjacency queries.
use crate::error::{GridError, Sentinel};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Represents what occupies a single grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Open floor that the search may walk through.
    Free,
    /// An impassable obstacle.
    Wall,
    /// The start sentinel.
    Start,
    /// The goal sentinel.
    Goal,
}

impl CellKind {
    /// Converts the kind to its character representation used when rendering boards.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridpath_solver::engine::CellKind;
    /// assert_eq!(CellKind::Wall.to_char(), '#');
    /// assert_eq!(CellKind::Free.to_char(), '.');
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            CellKind::Free => '.',
            CellKind::Wall => '#',
            CellKind::Start => 'S',
            CellKind::Goal => 'G',
        }
    }

    /// Returns the token written for this kind in the textual input format.
    pub fn to_token(&self) -> &'static str {
        match self {
            CellKind::Free => ".",
            CellKind::Wall => "w",
            CellKind::Start => "s",
            CellKind::Goal => "g",
        }
    }

    /// Returns `true` unless the kind blocks movement.
    pub fn is_passable(&self) -> bool {
        !matches!(self, CellKind::Wall)
    }

    /// Returns the sentinel this kind stands for, if any.
    pub fn sentinel(&self) -> Option<Sentinel> {
        match self {
            CellKind::Start => Some(Sentinel::Start),
            CellKind::Goal => Some(Sentinel::Goal),
            CellKind::Free | CellKind::Wall => None,
        }
    }
}

/// Row and column deltas for the four orthogonal neighbors, in the order they are
/// explored: north, south, west, east.
///
/// The order is fixed so that the search always returns the same path when several
/// shortest paths exist.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// One addressable grid position.
///
/// Two cells are equal when their row and column match; the kind is descriptive only.
#[derive(Clone, Copy, Debug)]
pub struct Cell {
    row: usize,
    col: usize,
    kind: CellKind,
}

impl Cell {
    /// Creates a cell at the given 0-based position.
    pub fn new(row: usize, col: usize, kind: CellKind) -> Self {
        Cell { row, col, kind }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    /// Returns the `(row, col)` pair of this cell.
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Number of orthogonal steps between two cells, ignoring obstacles.
    ///
    /// # Examples
    /// ```
    /// use gridpath_solver::engine::{Cell, CellKind};
    /// let a = Cell::new(0, 0, CellKind::Start);
    /// let b = Cell::new(2, 3, CellKind::Goal);
    /// assert_eq!(a.manhattan_distance(&b), 5);
    /// ```
    pub fn manhattan_distance(&self, other: &Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row && self.col == other.col
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.row.hash(state);
        self.col.hash(state);
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A rectangular grid of cells.
///
/// Cells are stored row-major and every cell's `(row, col)` matches its slot.
/// The board is read-only once built.
#[derive(Clone, Debug)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

// Cell equality only looks at positions, so boards compare kinds explicitly.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| a.kind == b.kind)
    }
}

impl Eq for Board {}

impl Board {
    /// Builds a board from a grid of kinds, one inner vector per row.
    ///
    /// # Errors
    /// * `GridError::InvalidDimensions` if there are no rows or the first row is empty.
    /// * `GridError::MalformedGrid` if any row's length differs from the first row's.
    ///
    /// # Examples
    /// ```
    /// use gridpath_solver::engine::{Board, CellKind};
    /// let board = Board::from_kinds(vec![
    ///     vec![CellKind::Start, CellKind::Free],
    ///     vec![CellKind::Wall, CellKind::Goal],
    /// ]).unwrap();
    /// assert_eq!((board.rows(), board.cols()), (2, 2));
    /// assert_eq!(board.get_cell(1, 0).unwrap().kind(), CellKind::Wall);
    /// ```
    pub fn from_kinds(grid: Vec<Vec<CellKind>>) -> Result<Self, GridError> {
        let rows = grid.len();
        let cols = grid.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for (r, row) in grid.into_iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::MalformedGrid(format!(
                    "row {} has {} cells, expected {}",
                    r,
                    row.len(),
                    cols
                )));
            }
            cells.extend(
                row.into_iter()
                    .enumerate()
                    .map(|(c, kind)| Cell::new(r, c, kind)),
            );
        }

        Ok(Board { rows, cols, cells })
    }

    /// Creates a board of the given size where every cell is free space.
    ///
    /// Useful for placing endpoints by hand with [`crate::solver::Bfs::search_between`].
    pub fn new_open(rows: usize, cols: usize) -> Result<Self, GridError> {
        Board::from_kinds(vec![vec![CellKind::Free; cols]; rows])
    }

    /// Creates a random board from a seed.
    ///
    /// Each cell becomes a wall with probability `wall_density` (clamped to `[0, 1]`),
    /// then the start and goal sentinels are placed on two distinct random cells,
    /// overwriting whatever was there. The same arguments always produce the same board.
    ///
    /// # Errors
    /// `GridError::InvalidDimensions` if the board would have fewer than two cells,
    /// or if `rows * cols` overflows `usize`.
    pub fn new_random_with_seed(
        rows: usize,
        cols: usize,
        wall_density: f64,
        seed: u64,
    ) -> Result<Self, GridError> {
        let total = match rows.checked_mul(cols) {
            Some(total) if total >= 2 => total,
            _ => return Err(GridError::InvalidDimensions { rows, cols }),
        };
        let density = if wall_density.is_nan() {
            0.0
        } else {
            wall_density.clamp(0.0, 1.0)
        };

        let mut rng = SmallRng::seed_from_u64(seed);
        let mut grid: Vec<Vec<CellKind>> = (0..rows)
            .map(|_| {
                (0..cols)
                    .map(|_| {
                        if rng.gen_bool(density) {
                            CellKind::Wall
                        } else {
                            CellKind::Free
                        }
                    })
                    .collect()
            })
            .collect();

        let start_idx = rng.gen_range(0..total);
        let mut goal_idx = rng.gen_range(0..total - 1);
        if goal_idx >= start_idx {
            goal_idx += 1; // Skip over the start slot so the two never coincide
        }
        grid[start_idx / cols][start_idx % cols] = CellKind::Start;
        grid[goal_idx / cols][goal_idx % cols] = CellKind::Goal;

        Board::from_kinds(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells on the board (`rows * cols`).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns the cell at `(row, col)`, or `None` when out of bounds.
    pub fn get_cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Iterates over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Returns `true` if `(row, col)` is on the board.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Returns the in-bounds, passable orthogonal neighbors of `cell`.
    ///
    /// Neighbors are listed in [`NEIGHBOR_OFFSETS`] order (north, south, west, east),
    /// so repeated calls always return the same sequence. A cell outside the board
    /// has no neighbors.
    ///
    /// # Examples
    /// ```
    /// use gridpath_solver::engine::Board;
    /// let board = Board::new_open(3, 3).unwrap();
    /// let center = board.get_cell(1, 1).unwrap();
    /// let positions: Vec<_> = board.neighbors(&center).iter().map(|c| c.position()).collect();
    /// assert_eq!(positions, vec![(0, 1), (2, 1), (1, 0), (1, 2)]);
    /// ```
    pub fn neighbors(&self, cell: &Cell) -> Vec<Cell> {
        let mut result = Vec::with_capacity(NEIGHBOR_OFFSETS.len());
        if !self.contains(cell.row, cell.col) {
            return result;
        }

        for (dr, dc) in NEIGHBOR_OFFSETS {
            let (Some(nr), Some(nc)) = (
                cell.row.checked_add_signed(dr),
                cell.col.checked_add_signed(dc),
            ) else {
                continue;
            };
            if let Some(neighbor) = self.get_cell(nr, nc) {
                if neighbor.kind.is_passable() {
                    result.push(neighbor);
                }
            }
        }
        result
    }

    /// Finds the unique cell carrying the given sentinel marker.
    ///
    /// # Errors
    /// * `GridError::MissingSentinel` if no cell carries the marker.
    /// * `GridError::DuplicateSentinel` if more than one cell does.
    pub fn find_sentinel(&self, sentinel: Sentinel) -> Result<Cell, GridError> {
        let mut matches = self
            .cells
            .iter()
            .filter(|cell| cell.kind.sentinel() == Some(sentinel));

        let found = *matches.next().ok_or(GridError::MissingSentinel(sentinel))?;
        let extra = matches.count();
        if extra > 0 {
            return Err(GridError::DuplicateSentinel {
                sentinel,
                count: extra + 1,
            });
        }
        Ok(found)
    }

    /// The unique start cell.
    pub fn start(&self) -> Result<Cell, GridError> {
        self.find_sentinel(Sentinel::Start)
    }

    /// The unique goal cell.
    pub fn goal(&self) -> Result<Cell, GridError> {
        self.find_sentinel(Sentinel::Goal)
    }

    /// Returns `(start, goal)`, failing on the first missing or duplicated marker.
    pub fn endpoints(&self) -> Result<(Cell, Cell), GridError> {
        Ok((self.start()?, self.goal()?))
    }

    /// Renders the board with the cells of `path` marked.
    ///
    /// The first line lists column indices and every following line starts with its
    /// row index. Path cells that are not sentinels are drawn as `*`; all other cells
    /// use [`CellKind::to_char`]. Columns are padded to the widest index plus one
    /// space, so multi-digit indices stay separated.
    pub fn to_string_with_path(&self, path: &[Cell]) -> String {
        let on_path: HashSet<(usize, usize)> = path.iter().map(Cell::position).collect();
        let row_width = (self.rows - 1).to_string().len() + 1;
        let col_width = (self.cols - 1).to_string().len() + 1;
        let mut output = String::new();

        output.push_str(&" ".repeat(row_width));
        for c_idx in 0..self.cols {
            output.push_str(&format!("{:<width$}", c_idx, width = col_width));
        }
        output.push('\n');

        for r_idx in 0..self.rows {
            output.push_str(&format!("{:<width$}", r_idx, width = row_width));
            for c_idx in 0..self.cols {
                let kind = self.cells[r_idx * self.cols + c_idx].kind;
                let symbol = if kind == CellKind::Free && on_path.contains(&(r_idx, c_idx)) {
                    '*'
                } else {
                    kind.to_char()
                };
                output.push_str(&format!("{:<width$}", symbol, width = col_width));
            }
            if r_idx < self.rows - 1 {
                output.push('\n');
            }
        }

        output
    }

    /// Serializes the board in the textual input format: a `rows cols` header
    /// followed by one line of whitespace-separated tokens per row.
    pub fn to_input_string(&self) -> String {
        let mut output = format!("{} {}\n", self.rows, self.cols);
        for row in self.cells.chunks(self.cols) {
            let tokens: Vec<&str> = row.iter().map(|cell| cell.kind.to_token()).collect();
            output.push_str(&tokens.join(" "));
            output.push('\n');
        }
        output
    }
}

impl fmt::Display for Board {
    /// Formats the board using `to_string_with_path(&[])`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_path(&[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{board_from_str, board_from_str_array};

    #[test]
    fn test_cell_equality_ignores_kind() {
        let a = Cell::new(1, 2, CellKind::Free);
        let b = Cell::new(1, 2, CellKind::Goal);
        let c = Cell::new(2, 1, CellKind::Free);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }

    #[test]
    fn test_from_kinds_positions_match_slots() {
        let board = board_from_str_array(&["s . w", ". . g"]).unwrap();
        for cell in board.cells() {
            let looked_up = board.get_cell(cell.row(), cell.col()).unwrap();
            assert_eq!(looked_up.kind(), cell.kind());
        }
        assert_eq!(board.cell_count(), 6);
        assert!(board.get_cell(2, 0).is_none());
        assert!(board.get_cell(0, 3).is_none());
    }

    #[test]
    fn test_from_kinds_ragged_rows() {
        let result = Board::from_kinds(vec![
            vec![CellKind::Free, CellKind::Free],
            vec![CellKind::Free],
        ]);
        match result {
            Err(GridError::MalformedGrid(msg)) => assert!(msg.contains("row 1 has 1 cells")),
            other => panic!("expected MalformedGrid, got {:?}", other),
        }
    }

    #[test]
    fn test_from_kinds_empty() {
        assert!(matches!(
            Board::from_kinds(Vec::new()),
            Err(GridError::InvalidDimensions { rows: 0, cols: 0 })
        ));
        assert!(matches!(
            Board::from_kinds(vec![Vec::new()]),
            Err(GridError::InvalidDimensions { rows: 1, cols: 0 })
        ));
    }

    #[test]
    fn test_neighbors_corner_order() {
        let board = Board::new_open(3, 3).unwrap();
        let corner = board.get_cell(0, 0).unwrap();
        let positions: Vec<_> = board.neighbors(&corner).iter().map(Cell::position).collect();
        // North and west fall off the board; south comes before east.
        assert_eq!(positions, vec![(1, 0), (0, 1)]);

        let far_corner = board.get_cell(2, 2).unwrap();
        let positions: Vec<_> = board
            .neighbors(&far_corner)
            .iter()
            .map(Cell::position)
            .collect();
        assert_eq!(positions, vec![(1, 2), (2, 1)]);
    }

    #[test]
    fn test_neighbors_skip_walls() {
        let board = board_from_str_array(&[
            ". w .",
            "w s .",
            ". . g",
        ])
        .unwrap();
        let start = board.start().unwrap();
        let positions: Vec<_> = board.neighbors(&start).iter().map(Cell::position).collect();
        assert_eq!(positions, vec![(2, 1), (1, 2)]);
    }

    #[test]
    fn test_neighbors_include_sentinels() {
        let board = board_from_str_array(&["s g"]).unwrap();
        let start = board.start().unwrap();
        let neighbors = board.neighbors(&start);
        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors[0].kind(), CellKind::Goal);
    }

    #[test]
    fn test_neighbors_out_of_bounds_cell() {
        let board = Board::new_open(2, 2).unwrap();
        let outside = Cell::new(5, 5, CellKind::Free);
        assert!(board.neighbors(&outside).is_empty());
    }

    #[test]
    fn test_find_sentinels() {
        let board = board_from_str_array(&[". s", "g ."]).unwrap();
        let (start, goal) = board.endpoints().unwrap();
        assert_eq!(start.position(), (0, 1));
        assert_eq!(goal.position(), (1, 0));
    }

    #[test]
    fn test_missing_sentinel() {
        let board = board_from_str_array(&[". s", ". ."]).unwrap();
        assert!(matches!(
            board.goal(),
            Err(GridError::MissingSentinel(Sentinel::Goal))
        ));
        assert!(matches!(
            board.endpoints(),
            Err(GridError::MissingSentinel(Sentinel::Goal))
        ));
    }

    #[test]
    fn test_duplicate_sentinel() {
        let board = board_from_str_array(&["s s g", ". s ."]).unwrap();
        assert!(matches!(
            board.start(),
            Err(GridError::DuplicateSentinel {
                sentinel: Sentinel::Start,
                count: 3
            })
        ));
    }

    #[test]
    fn test_new_random_with_seed_determinism() {
        let a = Board::new_random_with_seed(8, 12, 0.3, 42).unwrap();
        let b = Board::new_random_with_seed(8, 12, 0.3, 42).unwrap();
        let c = Board::new_random_with_seed(8, 12, 0.3, 43).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_input_string(), b.to_input_string());
    }

    #[test]
    fn test_new_random_with_seed_has_distinct_endpoints() {
        for seed in 0..50 {
            let board = Board::new_random_with_seed(2, 3, 0.5, seed).unwrap();
            let (start, goal) = board.endpoints().unwrap();
            assert_ne!(start, goal, "seed {} placed both endpoints together", seed);
        }
    }

    #[test]
    fn test_new_random_with_seed_density_extremes() {
        let open = Board::new_random_with_seed(5, 5, 0.0, 7).unwrap();
        assert_eq!(open.cells().filter(|c| c.kind() == CellKind::Wall).count(), 0);

        let closed = Board::new_random_with_seed(5, 5, 1.0, 7).unwrap();
        assert_eq!(closed.cells().filter(|c| c.kind() == CellKind::Wall).count(), 23);

        // Out-of-range densities are clamped rather than rejected.
        assert!(Board::new_random_with_seed(5, 5, 4.2, 7).is_ok());
        assert!(Board::new_random_with_seed(5, 5, f64::NAN, 7).is_ok());
    }

    #[test]
    fn test_new_random_with_seed_too_small() {
        assert!(matches!(
            Board::new_random_with_seed(1, 1, 0.0, 0),
            Err(GridError::InvalidDimensions { rows: 1, cols: 1 })
        ));
    }

    #[test]
    fn test_display_with_path() {
        let board = board_from_str_array(&["s . .", "w w .", "g . ."]).unwrap();
        let path: Vec<Cell> = [(0, 0), (0, 1), (0, 2), (1, 2), (2, 2), (2, 1), (2, 0)]
            .iter()
            .map(|&(r, c)| board.get_cell(r, c).unwrap())
            .collect();
        let rendered = board.to_string_with_path(&path);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "  0 1 2 ");
        assert_eq!(lines[1], "0 S * * ");
        assert_eq!(lines[2], "1 # # * ");
        assert_eq!(lines[3], "2 G * * ");

        let plain = format!("{}", board);
        assert!(plain.contains("0 S . . "));
    }

    #[test]
    fn test_display_pads_multi_digit_indices() {
        let board = Board::new_open(11, 12).unwrap();
        let rendered = format!("{}", board);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[0].starts_with("   0  1  2 "));
        assert!(lines[0].ends_with(" 9  10 11 "));
        assert!(lines[1].starts_with("0  .  . "));
        assert!(lines[11].starts_with("10 .  . "));
        // Every row line has the same width as the header.
        assert!(lines.iter().all(|line| line.len() == lines[0].len()));
    }

    #[test]
    fn test_new_random_with_seed_dimension_overflow() {
        assert!(matches!(
            Board::new_random_with_seed(usize::MAX, 2, 0.0, 0),
            Err(GridError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_to_input_string_reparses() {
        let board = Board::new_random_with_seed(4, 6, 0.25, 9).unwrap();
        let text = board.to_input_string();
        assert!(text.starts_with("4 6\n"));
        let reparsed = board_from_str(&text).unwrap();
        assert_eq!(reparsed, board);
    }
}
