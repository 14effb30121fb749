//! Policies for the phases of the search
//!
//! - Selection policies: how to descend through the expanded tree
//! - Rollout policies: how to play out simulated games from a node

pub mod selection;
pub mod simulation;

pub use selection::{SelectionPolicy, UCB1Policy};
pub use simulation::{HeuristicRollout, Playout, RandomRollout, RolloutPolicy};
