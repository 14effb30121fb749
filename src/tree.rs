//! Search tree for Monte Carlo Tree Search
//!
//! Nodes live in a single arena owned by [`SearchTree`] and refer to each other
//! through [`NodeId`] indices. A node's parent index is only used to walk back
//! towards the root during backpropagation; ownership always stays with the arena,
//! which is dropped as a whole once a search is over.

use std::fmt::Write;

use rand::{Rng, RngCore};

use crate::board::{Board, IllegalMoveError};

/// Index of a node in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// One explored position of the search
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Position represented by this node
    pub state: Board,

    /// Column that produced this position (None for the root)
    pub action: Option<usize>,

    /// Parent node (None for the root)
    pub parent: Option<NodeId>,

    /// Expanded children, in expansion order
    pub children: Vec<NodeId>,

    /// Moves not expanded into children yet
    pub untried_moves: Vec<usize>,

    /// Number of simulations that passed through this node
    pub visits: u64,

    /// Sum of rewards, seen from the player who moved into this node
    pub reward_sum: f64,

    /// Distance from the root
    pub depth: usize,
}

impl SearchNode {
    fn new(state: Board, action: Option<usize>, parent: Option<NodeId>, depth: usize) -> Self {
        let untried_moves = state.playable_moves();
        SearchNode {
            state,
            action,
            parent,
            children: Vec::new(),
            untried_moves,
            visits: 0,
            reward_sum: 0.0,
            depth,
        }
    }

    /// Mean reward, or 0 for an unvisited node
    pub fn value(&self) -> f64 {
        crate::utils::mean_reward(self.reward_sum, self.visits)
    }

    /// Returns true if every playable move has a child
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_moves.is_empty()
    }

    /// Returns true if the position is won or drawn
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Returns true if the node is terminal or has no children yet
    pub fn is_leaf(&self) -> bool {
        self.is_terminal() || self.children.is_empty()
    }
}

/// Arena of search nodes rooted at the position being decided
#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    /// Creates a tree holding only the root
    pub fn new(root_state: Board) -> Self {
        SearchTree {
            nodes: vec![SearchNode::new(root_state, None, None, 0)],
        }
    }

    /// Root node id
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0]
    }

    /// Number of nodes in the tree
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is created with the tree
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over the children of a node
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &SearchNode> + '_ {
        self.get(id).children.iter().map(move |&child| self.get(child))
    }

    /// Expands the untried move at `index` of `parent` into a new child
    pub fn expand(&mut self, parent: NodeId, index: usize) -> Result<NodeId, IllegalMoveError> {
        let node = self.get(parent);
        let column = node.untried_moves[index];
        let state = node.state.apply_move(column)?;
        let depth = node.depth + 1;

        let id = NodeId(self.nodes.len());
        self.nodes
            .push(SearchNode::new(state, Some(column), Some(parent), depth));

        let node = self.get_mut(parent);
        node.untried_moves.swap_remove(index);
        node.children.push(id);

        Ok(id)
    }

    /// Expands one untried move of `parent`, chosen uniformly at random
    ///
    /// Returns `Ok(None)` when there is nothing left to expand.
    pub fn expand_random(
        &mut self,
        parent: NodeId,
        rng: &mut dyn RngCore,
    ) -> Result<Option<NodeId>, IllegalMoveError> {
        let untried = self.get(parent).untried_moves.len();
        if untried == 0 {
            return Ok(None);
        }

        let index = rng.gen_range(0..untried);
        self.expand(parent, index).map(Some)
    }

    /// Walks from `leaf` to the root, counting one visit on every node
    ///
    /// `reward` is the playout result seen from the player to move at `leaf`.
    /// Each node stores rewards from the perspective of the player who moved into
    /// it, so the leaf receives `-reward` and the sign alternates on the way up.
    pub fn backpropagate(&mut self, leaf: NodeId, reward: f64) {
        let mut current = Some(leaf);
        let mut value = -reward;

        while let Some(id) = current {
            let node = self.get_mut(id);
            node.visits += 1;
            node.reward_sum += value;

            value = -value;
            current = node.parent;
        }
    }

    /// Ids of the nodes from `id` up to the root, inclusive
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = self.get(id).parent;
        while let Some(parent) = current {
            path.push(parent);
            current = self.get(parent).parent;
        }
        path
    }

    /// Deepest node depth in the tree
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }

    /// Indented text dump of the tree down to `max_depth`
    pub fn visualize(&self, max_depth: usize) -> String {
        let mut output = String::new();
        self.visualize_node(self.root(), max_depth, &mut output);
        output
    }

    fn visualize_node(&self, id: NodeId, max_depth: usize, output: &mut String) {
        let node = self.get(id);
        let indent = "  ".repeat(node.depth);
        let label = match node.action {
            Some(column) => format!("Column {}", column),
            None => "Root".to_string(),
        };

        let _ = writeln!(
            output,
            "{}{} (visits: {}, value: {:.3})",
            indent,
            label,
            node.visits,
            node.value()
        );

        if node.depth < max_depth {
            for &child in &node.children {
                self.visualize_node(child, max_depth, output);
            }
        }
    }
}
