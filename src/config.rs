//! Configuration options for the search
//!
//! This module defines the parameters that control how a move is searched for:
//! the UCB1 exploration constant, the search budget, the rollout policy and an
//! optional seed for reproducible runs.

use std::time::Duration;

use crate::{Error, Result};

/// How long a search may run
///
/// Exactly one limit is active per search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// Stop after this many iterations
    Iterations(usize),

    /// Stop once this much wall-clock time has elapsed
    ///
    /// The clock is checked between iterations, so a search may overrun the
    /// budget by the duration of one iteration.
    Time(Duration),
}

/// Strategy used to play out simulated games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RolloutKind {
    /// Every move is chosen uniformly among the open columns
    #[default]
    Random,

    /// Win if possible, otherwise block an immediate loss, otherwise play randomly
    ///
    /// Playouts look more like real games, which lowers the variance of the
    /// estimates at the price of checking every column on every ply.
    HeuristicGreedy,
}

/// Configuration for a search
///
/// # Example
///
/// ```
/// use connect_four_mcts::config::{RolloutKind, SearchConfig};
/// use std::time::Duration;
///
/// let config = SearchConfig::default()
///     .with_exploration_constant(1.5)
///     .with_max_time(Duration::from_millis(500))
///     .with_rollout_policy(RolloutKind::HeuristicGreedy)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Exploration constant `C` of UCB1
    ///
    /// Higher values favor less visited children. The standard value is sqrt(2).
    pub exploration_constant: f64,

    /// Iteration or time limit
    pub budget: Budget,

    /// Playout strategy
    pub rollout_policy: RolloutKind,

    /// Seed for the search's random generator; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            exploration_constant: std::f64::consts::SQRT_2,
            budget: Budget::Iterations(10_000),
            rollout_policy: RolloutKind::Random,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Sets the exploration constant
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets the budget
    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    /// Limits the search to a number of iterations
    pub fn with_max_iterations(self, iterations: usize) -> Self {
        self.with_budget(Budget::Iterations(iterations))
    }

    /// Limits the search to a wall-clock duration
    pub fn with_max_time(self, duration: Duration) -> Self {
        self.with_budget(Budget::Time(duration))
    }

    /// Sets the playout strategy
    pub fn with_rollout_policy(mut self, kind: RolloutKind) -> Self {
        self.rollout_policy = kind;
        self
    }

    /// Fixes the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that the values can drive a search
    pub fn validate(&self) -> Result<()> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        Ok(())
    }
}
