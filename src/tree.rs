//! Arena-backed search tree.
//!
//! Nodes record only the move that produced them and a handle to their
//! parent. The board a node stands for is recovered by replaying the move
//! chain from the root board, unless the tree was built with
//! [`BoardRecall::Cached`], in which case each node also keeps the board its
//! move produced. Released slots are recycled, so a depth-first walk that
//! detaches finished subtrees keeps the arena small.

use crate::puzzle::{Board, Move};

/// Stable handle into a [`SearchTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// How a node's board is recovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoardRecall {
    /// Replay the move chain from the root every time.
    #[default]
    Replay,
    /// Keep the board produced by each move alongside its node.
    Cached,
}

#[derive(Debug)]
struct Node {
    step: Option<Move>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    board: Option<Board>,
}

#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<Node>,
    free: Vec<usize>,
    root_board: Board,
    recall: BoardRecall,
}

impl SearchTree {
    pub fn new(root_board: Board, recall: BoardRecall) -> Self {
        let root = Node {
            step: None,
            parent: None,
            children: Vec::new(),
            board: None,
        };
        Self {
            nodes: vec![root],
            free: Vec::new(),
            root_board,
            recall,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root_board(&self) -> &Board {
        &self.root_board
    }

    /// Allocates a child of `parent` reached by `step` and attaches it.
    ///
    /// `board` is the configuration after `step`; it is only retained under
    /// [`BoardRecall::Cached`].
    pub fn create_child(&mut self, parent: NodeId, step: Move, board: Board) -> NodeId {
        let node = Node {
            step: Some(step),
            parent: Some(parent),
            children: Vec::new(),
            board: match self.recall {
                BoardRecall::Cached => Some(board),
                BoardRecall::Replay => None,
            },
        };
        let id = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                NodeId(slot)
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        };
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Drops every descendant of `id`, returning their slots for reuse.
    pub fn detach_children(&mut self, id: NodeId) {
        let mut pending = std::mem::take(&mut self.nodes[id.0].children);
        while let Some(child) = pending.pop() {
            let node = &mut self.nodes[child.0];
            pending.append(&mut node.children);
            node.board = None;
            node.parent = None;
            self.free.push(child.0);
        }
    }

    pub fn step(&self, id: NodeId) -> Option<Move> {
        self.nodes[id.0].step
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Number of ancestors; the root sits at depth 0.
    pub fn depth_of(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.nodes[current.0].parent {
            current = parent;
            depth += 1;
        }
        depth
    }

    /// Moves from the root to `id`, oldest first.
    pub fn path_to(&self, id: NodeId) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut current = id;
        while let Some(step) = self.nodes[current.0].step {
            moves.push(step);
            match self.nodes[current.0].parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        moves.reverse();
        moves
    }

    /// The configuration `id` stands for.
    pub fn reconstruct(&self, id: NodeId) -> Board {
        if let Some(board) = &self.nodes[id.0].board {
            return board.clone();
        }
        let mut board = self.root_board.clone();
        for step in self.path_to(id) {
            board.apply_move(step);
        }
        board
    }

    /// Nodes currently allocated, root included.
    pub fn live_nodes(&self) -> usize {
        self.nodes.len() - self.free.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> Board {
        Board::new(3, 3, vec![1, 2, 3, 4, 0, 5, 6, 7, 8]).unwrap()
    }

    fn grow(tree: &mut SearchTree, parent: NodeId, step: Move) -> NodeId {
        let board = tree.reconstruct(parent).try_move(step).unwrap();
        tree.create_child(parent, step, board)
    }

    #[test]
    fn root_has_no_move_and_depth_zero() {
        let tree = SearchTree::new(start(), BoardRecall::Replay);
        let root = tree.root();
        assert_eq!(tree.step(root), None);
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.depth_of(root), 0);
        assert!(tree.path_to(root).is_empty());
        assert_eq!(tree.reconstruct(root), start());
    }

    #[test]
    fn reconstruct_replays_chain() {
        for recall in [BoardRecall::Replay, BoardRecall::Cached] {
            let mut tree = SearchTree::new(start(), recall);
            let root = tree.root();
            let a = grow(&mut tree, root, Move::Up);
            let b = grow(&mut tree, a, Move::Left);
            let c = grow(&mut tree, b, Move::Down);

            assert_eq!(tree.depth_of(c), 3);
            assert_eq!(tree.parent(c), Some(b));
            assert_eq!(tree.path_to(c), vec![Move::Up, Move::Left, Move::Down]);

            let mut expected = start();
            for m in [Move::Up, Move::Left, Move::Down] {
                expected.apply_move(m);
            }
            assert_eq!(tree.reconstruct(c), expected);
            assert_eq!(tree.root_board(), &start());
        }
    }

    #[test]
    fn detach_releases_whole_subtree_and_reuses_slots() {
        let mut tree = SearchTree::new(start(), BoardRecall::Replay);
        let root = tree.root();
        let a = grow(&mut tree, root, Move::Up);
        let b = grow(&mut tree, root, Move::Down);
        grow(&mut tree, a, Move::Left);
        grow(&mut tree, a, Move::Right);
        assert_eq!(tree.live_nodes(), 5);
        assert_eq!(tree.children(root), &[a, b]);

        tree.detach_children(a);
        assert!(tree.children(a).is_empty());
        assert_eq!(tree.live_nodes(), 3);

        let c = grow(&mut tree, b, Move::Left);
        assert_eq!(tree.live_nodes(), 4);
        assert_eq!(tree.path_to(c), vec![Move::Down, Move::Left]);

        tree.detach_children(root);
        assert_eq!(tree.live_nodes(), 1);
    }
}
