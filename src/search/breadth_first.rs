//! Level-order search with global duplicate detection.

use std::collections::VecDeque;

use log::debug;

use crate::puzzle::Move;

use super::Search;

/// Children deeper than `depth_limit` are generated but never queued.
pub fn run(search: &mut Search, order: &[Move], depth_limit: usize) {
    let mut frontier = VecDeque::from([search.tree().root()]);

    while let Some(node) = frontier.pop_front() {
        if search.is_done() {
            break;
        }
        for child in search.expand(node, order, true) {
            if search.tree().depth_of(child) <= depth_limit {
                frontier.push_back(child);
            }
        }
    }

    if !search.is_solved() {
        debug!("bfs frontier exhausted");
    }
}
