//! # Grid Path Solver Library
//!
//! This library reads a rectangular grid of labeled cells, locates the start and
//! goal cells, and finds a shortest path between them with breadth-first search.
//!
//! It is used by three binaries:
//! - `path_finder`: reads a grid from a file or standard input and prints the path.
//! - `grid_generator`: writes a seeded random grid in the input format.
//! - `reachability_evaluator`: runs the search over many random grids and
//!   summarizes how often the goal is reachable.
//!
//! ## Modules
//! - `engine`: the grid data model (`Cell`, `CellKind`, `Board`) and neighbor queries.
//! - `node`: search-tree nodes stored in an index-based arena.
//! - `solver`: the BFS engine (`Bfs`, `solve_bfs`) and its results.
//! - `utils`: parsing grids from text and formatting paths.
//! - `error`: the `GridError` type for setup failures.

pub mod engine;
pub mod error;
pub mod node;
pub mod solver;
pub mod utils;

pub use crate::engine::{Board, Cell, CellKind};
pub use crate::error::{GridError, Sentinel};
pub use crate::solver::{solve_bfs, Bfs, Path, SearchDirection, SearchOutcome, SearchReport};
