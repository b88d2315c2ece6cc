//! Sliding tile puzzle solver.
//!
//! Solves W x H generalisations of the 15-puzzle with depth-limited DFS,
//! BFS, or heuristic best-first search, and reports the move sequence along
//! with node statistics.

pub mod heuristic;
pub mod puzzle;
pub mod report;
pub mod search;
pub mod tree;

pub use heuristic::Heuristic;
pub use puzzle::{Board, BoardError, Move};
pub use report::{RunStats, SearchReport};
pub use search::{solve, solve_named, SearchConfig, SearchError, Strategy};
pub use tree::BoardRecall;
