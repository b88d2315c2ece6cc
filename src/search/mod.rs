//! Search engine: one invocation context shared by three strategies.
//!
//! A [`Search`] owns everything a single solve mutates (the tree, the
//! visited fingerprints, the counters) and is dropped once the report has
//! been produced. Strategies only drive [`Search::expand`] and decide which
//! node to expand next.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::heuristic::Heuristic;
use crate::puzzle::{Board, Move};
use crate::report::{RunStats, SearchReport};
use crate::tree::{BoardRecall, NodeId, SearchTree};

pub mod best_first;
pub mod breadth_first;
pub mod depth_first;

pub const DEFAULT_DEPTH_LIMIT: usize = 20;

/// Expansion order used when the caller does not supply one.
pub const DEFAULT_ORDER: [Move; 4] = [Move::Right, Move::Left, Move::Up, Move::Down];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("unknown strategy '{0}', expected one of dfs, bfs, astr")]
    UnknownStrategy(String),
    #[error("unknown heuristic '{0}', expected manh or hamm")]
    UnknownHeuristic(String),
    #[error("unknown move symbol '{0}', expected one of U, D, L, R")]
    UnknownMove(char),
}

/// Reads a move order such as `"RLUD"`. Symbols are taken verbatim, so
/// repeats and omissions are kept.
pub fn parse_move_order(order: &str) -> Result<Vec<Move>, SearchError> {
    order
        .chars()
        .map(|c| Move::from_symbol(c).ok_or(SearchError::UnknownMove(c)))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Depth-limited depth-first search, no duplicate detection.
    DepthFirst { order: Vec<Move> },
    /// Level-order search with global duplicate detection.
    BreadthFirst { order: Vec<Move> },
    /// Expands the cheapest `depth + heuristic` candidate next.
    BestFirst { heuristic: Heuristic },
}

impl Strategy {
    /// Builds a strategy from its short name (`dfs`, `bfs`, `astr`) and
    /// option string (a move order, or a heuristic name for `astr`).
    pub fn parse(kind: &str, option: &str) -> Result<Self, SearchError> {
        match kind.to_ascii_lowercase().as_str() {
            "dfs" => Ok(Strategy::DepthFirst {
                order: parse_move_order(option)?,
            }),
            "bfs" => Ok(Strategy::BreadthFirst {
                order: parse_move_order(option)?,
            }),
            "astr" => Ok(Strategy::BestFirst {
                heuristic: option.parse()?,
            }),
            _ => Err(SearchError::UnknownStrategy(kind.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::DepthFirst { .. } => "dfs",
            Strategy::BreadthFirst { .. } => "bfs",
            Strategy::BestFirst { .. } => "astr",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub strategy: Strategy,
    /// Ignored by best-first search.
    pub depth_limit: usize,
    /// Stop after this many expansions and report no solution.
    pub max_expansions: Option<u64>,
    pub recall: BoardRecall,
}

impl SearchConfig {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            depth_limit: DEFAULT_DEPTH_LIMIT,
            max_expansions: None,
            recall: BoardRecall::default(),
        }
    }

    pub fn with_depth_limit(mut self, depth_limit: usize) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    pub fn with_max_expansions(mut self, max_expansions: Option<u64>) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    pub fn with_recall(mut self, recall: BoardRecall) -> Self {
        self.recall = recall;
        self
    }
}

/// Runs the configured strategy on `board` to completion.
pub fn solve(board: Board, config: &SearchConfig) -> SearchReport {
    let started = Instant::now();

    if !board.is_solvable() {
        warn!(
            "{}x{} start board has the wrong parity; the goal is unreachable",
            board.width(),
            board.height()
        );
    }

    if board.is_solved() {
        info!("start board is already solved");
        return SearchReport {
            solution: Some(Vec::new()),
            stats: RunStats {
                elapsed: started.elapsed(),
                ..RunStats::default()
            },
        };
    }

    let mut search = Search::new(board, config);
    debug!(
        "running {} (depth limit {}, recall {:?})",
        config.strategy.name(),
        config.depth_limit,
        config.recall
    );

    match &config.strategy {
        Strategy::DepthFirst { order } => depth_first::run(&mut search, order, config.depth_limit),
        Strategy::BreadthFirst { order } => {
            breadth_first::run(&mut search, order, config.depth_limit)
        }
        Strategy::BestFirst { heuristic } => best_first::run(&mut search, *heuristic),
    }

    search.finish(started.elapsed())
}

/// Parses the strategy strings and solves. Fails before any search work
/// when the strategy, move order or heuristic is not recognised.
pub fn solve_named(
    board: Board,
    kind: &str,
    option: &str,
    depth_limit: usize,
) -> Result<SearchReport, SearchError> {
    let config = SearchConfig::new(Strategy::parse(kind, option)?).with_depth_limit(depth_limit);
    Ok(solve(board, &config))
}

/// State owned by one in-progress solve.
pub struct Search {
    tree: SearchTree,
    visited: HashSet<u64>,
    solution: Option<NodeId>,
    halted: bool,
    max_expansions: Option<u64>,
    stats: RunStats,
}

impl Search {
    pub fn new(board: Board, config: &SearchConfig) -> Self {
        let mut visited = HashSet::new();
        visited.insert(board.fingerprint());

        Self {
            tree: SearchTree::new(board, config.recall),
            visited,
            solution: None,
            halted: false,
            max_expansions: config.max_expansions,
            stats: RunStats::default(),
        }
    }

    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn solution(&self) -> Option<NodeId> {
        self.solution
    }

    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    /// Solved, or stopped by the expansion cap.
    pub fn is_done(&self) -> bool {
        self.solution.is_some() || self.halted
    }

    /// Generates the children of `node` in `order` and returns the ones
    /// created.
    ///
    /// Edge moves and the move undoing the one that produced `node` are
    /// skipped. With `deduplicate`, configurations already fingerprinted
    /// during this solve are skipped too, the goal included. The first child
    /// reaching the goal is recorded as the solution; the remaining
    /// directions are still generated.
    pub fn expand(&mut self, node: NodeId, order: &[Move], deduplicate: bool) -> Vec<NodeId> {
        if let Some(cap) = self.max_expansions {
            if self.stats.processed >= cap {
                if !self.halted {
                    warn!("stopping after {} expansions", cap);
                }
                self.halted = true;
                return Vec::new();
            }
        }
        self.stats.processed += 1;

        let came_by = self.tree.step(node);
        let mut created = Vec::with_capacity(order.len());

        for &direction in order {
            let mut board = self.tree.reconstruct(node);
            if !board.apply_move(direction) {
                continue;
            }
            if came_by == Some(direction.opposite()) {
                continue;
            }

            let solved = board.is_solved();
            if deduplicate && !self.visited.insert(board.fingerprint()) {
                continue;
            }

            let child = self.tree.create_child(node, direction, board);
            let depth = self.tree.depth_of(child);
            if depth > self.stats.max_depth {
                self.stats.max_depth = depth;
            }
            self.stats.visited += 1;

            if solved && self.solution.is_none() {
                info!("solved at depth {}", depth);
                self.solution = Some(child);
            }
            created.push(child);
        }

        created
    }

    pub fn finish(self, elapsed: Duration) -> SearchReport {
        let solution = self.solution.map(|id| self.tree.path_to(id));
        if solution.is_none() {
            debug!(
                "no solution after {} expansions ({} nodes)",
                self.stats.processed, self.stats.visited
            );
        }
        SearchReport {
            solution,
            stats: RunStats {
                elapsed,
                ..self.stats
            },
        }
    }
}
