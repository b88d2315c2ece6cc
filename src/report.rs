//! Outcome of one solve and its two text renderings.

use std::time::Duration;

use serde::Serialize;

use crate::puzzle::{Board, Move};

/// Written in place of a move count when nothing was found.
pub const NO_SOLUTION: &str = "-1";

/// Counters accumulated over a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RunStats {
    /// Nodes created (children attached to the tree).
    pub visited: u64,
    /// Nodes expanded.
    pub processed: u64,
    pub max_depth: usize,
    #[serde(serialize_with = "serialize_millis", rename = "elapsed_ms")]
    pub elapsed: Duration,
}

impl RunStats {
    pub fn elapsed_ms(&self) -> f64 {
        millis(self.elapsed)
    }
}

fn millis(elapsed: Duration) -> f64 {
    elapsed.as_nanos() as f64 / 1_000_000.0
}

fn serialize_millis<S: serde::Serializer>(elapsed: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(millis(*elapsed))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchReport {
    /// Moves from the start board, oldest first. `None` when unsolved.
    #[serde(serialize_with = "serialize_moves")]
    pub solution: Option<Vec<Move>>,
    pub stats: RunStats,
}

fn serialize_moves<S: serde::Serializer>(
    moves: &Option<Vec<Move>>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match moves {
        Some(moves) => s.serialize_some(&moves_to_string(moves)),
        None => s.serialize_none(),
    }
}

pub fn moves_to_string(moves: &[Move]) -> String {
    moves.iter().map(Move::symbol).collect()
}

impl SearchReport {
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    pub fn move_count(&self) -> Option<usize> {
        self.solution.as_ref().map(Vec::len)
    }

    /// `-1`, or the move count and the move letters on two lines.
    pub fn result_text(&self) -> String {
        match &self.solution {
            None => NO_SOLUTION.to_string(),
            Some(moves) => format!("{}\n{}", moves.len(), moves_to_string(moves)),
        }
    }

    /// First line of [`Self::result_text`], then visited, processed, max
    /// depth and elapsed milliseconds.
    pub fn stats_text(&self) -> String {
        let result = self.result_text();
        let headline = result.lines().next().unwrap_or(NO_SOLUTION);

        format!(
            "{}\n{}\n{}\n{}\n{:.3}",
            headline,
            self.stats.visited,
            self.stats.processed,
            self.stats.max_depth,
            self.stats.elapsed_ms()
        )
    }

    /// Applies the solution to a copy of `start`, stopping at the first
    /// illegal move. `None` when there is no solution or a move is illegal.
    pub fn replay(&self, start: &Board) -> Option<Board> {
        let moves = self.solution.as_ref()?;
        let mut board = start.clone();
        for &m in moves {
            if !board.apply_move(m) {
                return None;
            }
        }
        Some(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> RunStats {
        RunStats {
            visited: 12,
            processed: 5,
            max_depth: 3,
            elapsed: Duration::from_micros(1_234_567),
        }
    }

    #[test]
    fn unsolved_renders_sentinel() {
        let report = SearchReport {
            solution: None,
            stats: stats(),
        };
        assert_eq!(report.result_text(), "-1");
        assert_eq!(report.stats_text(), "-1\n12\n5\n3\n1234.567");
        assert_eq!(report.move_count(), None);
    }

    #[test]
    fn solved_renders_count_and_moves() {
        let report = SearchReport {
            solution: Some(vec![Move::Right, Move::Up, Move::Left]),
            stats: stats(),
        };
        assert_eq!(report.result_text(), "3\nRUL");
        assert!(report.stats_text().starts_with("3\n12\n5\n3\n"));
    }

    #[test]
    fn empty_solution_keeps_two_lines() {
        let report = SearchReport {
            solution: Some(Vec::new()),
            stats: RunStats::default(),
        };
        assert_eq!(report.result_text(), "0\n");
        assert_eq!(report.stats_text(), "0\n0\n0\n0\n0.000");
    }

    #[test]
    fn replay_checks_legality() {
        let start = Board::new(2, 2, vec![1, 2, 0, 3]).unwrap();
        let good = SearchReport {
            solution: Some(vec![Move::Right]),
            stats: RunStats::default(),
        };
        assert!(good.replay(&start).unwrap().is_solved());

        let bad = SearchReport {
            solution: Some(vec![Move::Left]),
            stats: RunStats::default(),
        };
        assert_eq!(bad.replay(&start), None);
    }

    #[test]
    fn serializes_to_json() {
        let report = SearchReport {
            solution: Some(vec![Move::Down, Move::Right]),
            stats: RunStats {
                elapsed: Duration::from_millis(2),
                ..stats()
            },
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["solution"], "DR");
        assert_eq!(json["stats"]["visited"], 12);
        assert_eq!(json["stats"]["elapsed_ms"], 2.0);
    }
}
