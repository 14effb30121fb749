//! Selection policies for the search
//!
//! Selection policies decide which child to descend into while walking down
//! a fully expanded part of the tree, balancing exploration and exploitation.

use rand::RngCore;

use crate::{
    tree::{NodeId, SearchTree},
    utils::{argmax_random_tie, ucb1_value},
};

/// Trait for policies that select the child to explore
pub trait SelectionPolicy: Send + Sync {
    /// Picks a child of `node`, or None if it has no children
    fn select_child(&self, tree: &SearchTree, node: NodeId, rng: &mut dyn RngCore)
        -> Option<NodeId>;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SelectionPolicy>;
}

/// Upper Confidence Bound 1 (UCB1) selection policy
///
/// ```text
/// UCB1 = reward_sum / visits + C * sqrt(ln(parent_visits) / visits)
/// ```
///
/// Children that were never visited score infinity and are always tried first.
/// Equal scores, including several unvisited children, are broken uniformly at
/// random so the expansion order never biases the search.
#[derive(Debug, Clone)]
pub struct UCB1Policy {
    /// Exploration constant `C`
    pub exploration_constant: f64,
}

impl UCB1Policy {
    /// Creates a new UCB1 policy with the given exploration constant
    pub fn new(exploration_constant: f64) -> Self {
        UCB1Policy {
            exploration_constant,
        }
    }

    /// UCB1 score of a child with the given statistics
    pub fn score(&self, reward_sum: f64, child_visits: u64, parent_visits: u64) -> f64 {
        ucb1_value(
            reward_sum,
            child_visits,
            parent_visits,
            self.exploration_constant,
        )
    }
}

impl Default for UCB1Policy {
    fn default() -> Self {
        Self::new(std::f64::consts::SQRT_2)
    }
}

impl SelectionPolicy for UCB1Policy {
    fn select_child(
        &self,
        tree: &SearchTree,
        node: NodeId,
        rng: &mut dyn RngCore,
    ) -> Option<NodeId> {
        let parent = tree.get(node);
        let scores = tree
            .children(node)
            .map(|child| self.score(child.reward_sum, child.visits, parent.visits));

        argmax_random_tie(scores, rng).map(|index| parent.children[index])
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy> {
        Box::new(self.clone())
    }
}

impl SelectionPolicy for Box<dyn SelectionPolicy> {
    fn select_child(
        &self,
        tree: &SearchTree,
        node: NodeId,
        rng: &mut dyn RngCore,
    ) -> Option<NodeId> {
        (**self).select_child(tree, node, rng)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy> {
        (**self).clone_box()
    }
}
