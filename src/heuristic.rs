//! Distance estimates used to order best-first search.

use std::fmt;
use std::str::FromStr;

use crate::puzzle::Board;
use crate::search::SearchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// Sum of row and column offsets of every tile from its goal cell.
    Manhattan,
    /// Number of cells, blank included, holding the wrong value.
    Hamming,
}

impl Heuristic {
    pub fn distance(&self, board: &Board) -> usize {
        match self {
            Heuristic::Manhattan => manhattan_distance(board),
            Heuristic::Hamming => hamming_distance(board),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::Manhattan => "manh",
            Heuristic::Hamming => "hamm",
        }
    }
}

impl FromStr for Heuristic {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manh" => Ok(Heuristic::Manhattan),
            "hamm" => Ok(Heuristic::Hamming),
            other => Err(SearchError::UnknownHeuristic(other.to_string())),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn manhattan_distance(board: &Board) -> usize {
    let width = board.width();
    let mut distance = 0;
    for y in 0..board.height() {
        for x in 0..width {
            let value = board.cell(x, y) as usize;
            if value != 0 {
                let target_x = (value - 1) % width;
                let target_y = (value - 1) / width;
                distance += x.abs_diff(target_x);
                distance += y.abs_diff(target_y);
            }
        }
    }
    distance
}

pub fn hamming_distance(board: &Board) -> usize {
    let goal = board.solved_reference();
    board
        .cells()
        .iter()
        .zip(goal.cells())
        .filter(|(have, want)| have != want)
        .count()
}
