//! Main implementation of the Monte Carlo Tree Search algorithm
//!
//! This module contains the search engine, orchestrating the four phases of
//! selection, expansion, simulation, and backpropagation over a tree that is
//! rebuilt from scratch for every search.

use std::time::{Duration, Instant};

use log::{debug, info};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{
    board::Board,
    config::{Budget, SearchConfig},
    policy::{
        selection::{SelectionPolicy, UCB1Policy},
        simulation::{rollout_policy_for, RolloutPolicy},
    },
    stats::SearchStatistics,
    tree::{NodeId, SearchTree},
    utils::argmax_random_tie,
    Error, Result,
};

/// The Monte Carlo Tree Search engine
///
/// An `Mcts` owns a snapshot of the position to decide from. Every call to
/// [`Mcts::search`] builds a fresh tree, so nothing is shared between searches
/// apart from the random generator. The engine is `Send` and can be moved onto a
/// worker thread; the caller's board is never touched.
pub struct Mcts {
    /// Position to choose a move for
    root_state: Board,

    /// Tree of the last search
    tree: SearchTree,

    /// Configuration for the search
    config: SearchConfig,

    /// Statistics gathered during the last search
    statistics: SearchStatistics,

    /// Policy for selecting nodes during the selection phase
    selection_policy: Box<dyn SelectionPolicy>,

    /// Policy for playing out simulated games
    rollout_policy: Box<dyn RolloutPolicy>,

    /// Source of every random decision of the search
    rng: StdRng,
}

impl Mcts {
    /// Creates a searcher for `initial_state`
    ///
    /// Fails with [`Error::InvalidState`] if the game is already decided, since
    /// there is no move to choose.
    pub fn new(initial_state: Board, config: SearchConfig) -> Result<Self> {
        config.validate()?;

        let status = initial_state.terminal_status();
        if status.is_terminal() {
            return Err(Error::InvalidState(status));
        }
        if initial_state.playable_moves().is_empty() {
            return Err(Error::NoLegalMoves);
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Mcts {
            tree: SearchTree::new(initial_state.clone()),
            root_state: initial_state,
            selection_policy: Box::new(UCB1Policy::new(config.exploration_constant)),
            rollout_policy: rollout_policy_for(config.rollout_policy),
            statistics: SearchStatistics::new(),
            config,
            rng,
        })
    }

    /// Sets the selection policy to use
    pub fn with_selection_policy<P: SelectionPolicy + 'static>(mut self, policy: P) -> Self {
        self.selection_policy = Box::new(policy);
        self
    }

    /// Sets the rollout policy to use
    pub fn with_rollout_policy<P: RolloutPolicy + 'static>(mut self, policy: P) -> Self {
        self.rollout_policy = Box::new(policy);
        self
    }

    /// Replaces the random generator
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Runs a search under the configured budget and returns the chosen column
    pub fn search(&mut self) -> Result<usize> {
        self.search_with_budget(self.config.budget)
    }

    /// Runs a search limited to `iterations` iterations
    pub fn search_for_iterations(&mut self, iterations: usize) -> Result<usize> {
        self.search_with_budget(Budget::Iterations(iterations))
    }

    /// Runs a search limited to `duration` of wall-clock time
    pub fn search_for_time(&mut self, duration: Duration) -> Result<usize> {
        self.search_with_budget(Budget::Time(duration))
    }

    fn search_with_budget(&mut self, budget: Budget) -> Result<usize> {
        self.tree = SearchTree::new(self.root_state.clone());
        self.statistics = SearchStatistics::new();

        let start_time = Instant::now();
        match budget {
            Budget::Iterations(iterations) => {
                for _ in 0..iterations {
                    self.execute_iteration()?;
                }
            }
            Budget::Time(limit) => {
                while start_time.elapsed() < limit {
                    self.execute_iteration()?;
                }
                self.statistics.stopped_by_time = true;
            }
        }

        self.statistics.total_time = start_time.elapsed();
        self.statistics.tree_size = self.tree.len();
        self.statistics.max_depth = self.tree.max_depth();

        let column = self.select_best_move()?;
        debug!(
            "Search chose column {} after {} iterations ({} nodes, {:.1} it/s)",
            column,
            self.statistics.iterations,
            self.statistics.tree_size,
            self.statistics.iterations_per_second()
        );

        Ok(column)
    }

    /// Execute a single iteration of the search
    fn execute_iteration(&mut self) -> Result<()> {
        // 1. Selection
        let selected = self.selection();

        // 2. Expansion
        let leaf = self.expansion(selected)?;

        // 3. Simulation
        let state = &self.tree.get(leaf).state;
        let mover = state.to_move();
        let playout = self.rollout_policy.rollout(state, &mut self.rng);
        if playout.truncated {
            self.statistics.truncated_rollouts += 1;
        }

        // 4. Backpropagation
        self.tree.backpropagate(leaf, playout.reward_for(mover));

        self.statistics.iterations += 1;
        Ok(())
    }

    /// Descends from the root while nodes are fully expanded and undecided
    fn selection(&mut self) -> NodeId {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);
            if node.is_terminal() || !node.is_fully_expanded() {
                return current;
            }

            match self
                .selection_policy
                .select_child(&self.tree, current, &mut self.rng)
            {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    /// Adds one random untried child to `node`, or returns `node` if it is
    /// terminal or fully expanded
    fn expansion(&mut self, node: NodeId) -> Result<NodeId> {
        if self.tree.get(node).is_terminal() {
            return Ok(node);
        }

        Ok(self.tree.expand_random(node, &mut self.rng)?.unwrap_or(node))
    }

    /// Picks the visited root child with the best mean reward
    ///
    /// Falls back to a uniformly random playable column if no child was visited,
    /// which happens when the budget ran out before the first iteration.
    fn select_best_move(&mut self) -> Result<usize> {
        let root = self.tree.root();
        let visited: Vec<_> = self
            .tree
            .children(root)
            .filter(|child| child.visits > 0)
            .collect();

        if visited.is_empty() {
            self.statistics.used_fallback = true;
            info!("No iteration completed, choosing a random column");
            return self
                .root_state
                .playable_moves()
                .choose(&mut self.rng)
                .copied()
                .ok_or(Error::NoLegalMoves);
        }

        let best = argmax_random_tie(visited.iter().map(|child| child.value()), &mut self.rng)
            .ok_or(Error::NoLegalMoves)?;

        visited[best].action.ok_or(Error::NoLegalMoves)
    }

    /// Position being searched
    pub fn root_state(&self) -> &Board {
        &self.root_state
    }

    /// Tree built by the last search
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Configuration of this searcher
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Returns the statistics of the last search
    pub fn get_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Returns a text dump of the last search tree down to `max_depth`
    pub fn visualize_tree(&self, max_depth: usize) -> String {
        self.tree.visualize(max_depth)
    }
}

/// Searches `board` once with `config` and returns the chosen column
pub fn search(board: &Board, config: &SearchConfig) -> Result<usize> {
    Mcts::new(board.clone(), config.clone())?.search()
}
