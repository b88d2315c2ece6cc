//! Depth-limited depth-first search.
//!
//! Configurations are not deduplicated, so the same board can be expanded
//! many times along different paths. Finished subtrees are detached, which
//! keeps the tree to the active path plus its pending siblings.

use log::debug;

use crate::puzzle::Move;
use crate::tree::NodeId;

use super::Search;

pub fn run(search: &mut Search, order: &[Move], depth_limit: usize) {
    let root = search.tree().root();
    visit(search, root, order, depth_limit);
    if !search.is_solved() {
        debug!("dfs exhausted the tree to depth {}", depth_limit);
    }
}

fn visit(search: &mut Search, node: NodeId, order: &[Move], depth_limit: usize) {
    if search.is_done() || search.tree().depth_of(node) == depth_limit {
        return;
    }

    let children = search.expand(node, order, false);
    for child in children {
        visit(search, child, order, depth_limit);
    }

    // Keep the path to the solution addressable.
    if !search.is_solved() {
        search.tree.detach_children(node);
    }
}
