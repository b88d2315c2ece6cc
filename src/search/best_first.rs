//! Heuristic-guided best-first search.
//!
//! Every generated node stays a candidate until it is picked. The pick is the
//! lowest `depth + heuristic`, ties going to the earliest generated node, so
//! runs are reproducible. There is no duplicate detection and no depth bound.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::debug;

use crate::heuristic::Heuristic;
use crate::tree::NodeId;

use super::{Search, DEFAULT_ORDER};

pub fn run(search: &mut Search, heuristic: Heuristic) {
    // (cost, generation sequence, node)
    let mut candidates: BinaryHeap<Reverse<(usize, u64, NodeId)>> = BinaryHeap::new();
    let mut sequence = 0u64;
    let mut current = search.tree().root();

    while !search.is_done() {
        let children = search.expand(current, &DEFAULT_ORDER, false);
        if search.is_done() {
            break;
        }

        for child in children {
            let board = search.tree().reconstruct(child);
            let cost = search.tree().depth_of(child) + heuristic.distance(&board);
            candidates.push(Reverse((cost, sequence, child)));
            sequence += 1;
        }

        match candidates.pop() {
            Some(Reverse((_, _, next))) => current = next,
            None => {
                debug!("best-first ran out of candidates");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{Board, Move};
    use crate::search::{SearchConfig, Strategy};

    fn search_for(board: Board, heuristic: Heuristic) -> Search {
        Search::new(board, &SearchConfig::new(Strategy::BestFirst { heuristic }))
    }

    #[test]
    fn manhattan_walks_straight_to_goal() {
        let board = Board::new(3, 3, vec![1, 2, 3, 4, 5, 6, 0, 7, 8]).unwrap();
        let mut search = search_for(board, Heuristic::Manhattan);
        run(&mut search, Heuristic::Manhattan);

        let id = search.solution().expect("solvable");
        assert_eq!(search.tree().path_to(id), vec![Move::Right, Move::Right]);
        // Root and the first R child.
        assert_eq!(search.stats().processed, 2);
    }

    fn scramble(moves: &str) -> Board {
        let mut board = Board::solved(3, 3);
        for symbol in moves.chars() {
            board.apply_move(Move::from_symbol(symbol).unwrap());
        }
        board
    }

    /// Keeps candidates in generation order and scans for the first
    /// strictly cheaper one.
    fn linear_scan(board: Board, heuristic: Heuristic) -> (Option<Vec<Move>>, u64) {
        let config = SearchConfig::new(Strategy::BestFirst { heuristic })
            .with_max_expansions(Some(300));
        let mut search = Search::new(board, &config);
        let cost = |s: &Search, id: NodeId| {
            s.tree().depth_of(id) + heuristic.distance(&s.tree().reconstruct(id))
        };

        let mut pending: Vec<NodeId> = Vec::new();
        let mut current = search.tree().root();
        while !search.is_done() {
            pending.extend(search.expand(current, &DEFAULT_ORDER, false));
            if search.is_done() || pending.is_empty() {
                break;
            }
            let mut best = 0;
            for i in 1..pending.len() {
                if cost(&search, pending[i]) < cost(&search, pending[best]) {
                    best = i;
                }
            }
            current = pending.remove(best);
        }
        (
            search.solution().map(|id| search.tree().path_to(id)),
            search.stats().processed,
        )
    }

    #[test]
    fn ties_go_to_earliest_candidate() {
        for moves in ["ULDR", "UULLDR", "LUURDL", "ULURDDLU", "LLUURDRU"] {
            for heuristic in [Heuristic::Manhattan, Heuristic::Hamming] {
                let board = scramble(moves);
                let config = SearchConfig::new(Strategy::BestFirst { heuristic })
                    .with_max_expansions(Some(300));
                let mut search = Search::new(board.clone(), &config);
                run(&mut search, heuristic);

                let found = search.solution().map(|id| search.tree().path_to(id));
                let expected = linear_scan(board, heuristic);
                assert_eq!(
                    (found, search.stats().processed),
                    expected,
                    "{moves} {heuristic}"
                );
            }
        }
    }

    #[test]
    fn degenerate_board_runs_out_of_candidates() {
        // 1x3 with the tiles in the wrong order can never be solved.
        let board = Board::new(3, 1, vec![2, 1, 0]).unwrap();
        let mut search = search_for(board, Heuristic::Manhattan);
        run(&mut search, Heuristic::Manhattan);
        assert!(!search.is_solved());
        assert_eq!(search.stats().visited, 2);
        assert_eq!(search.stats().processed, 3);
    }

    #[test]
    fn respects_expansion_cap() {
        let board = Board::new(3, 3, vec![8, 7, 6, 5, 4, 3, 2, 1, 0]).unwrap();
        let config = SearchConfig::new(Strategy::BestFirst {
            heuristic: Heuristic::Hamming,
        })
        .with_max_expansions(Some(50));
        let mut search = Search::new(board, &config);
        run(&mut search, Heuristic::Hamming);
        assert!(search.stats().processed <= 50);
    }
}
