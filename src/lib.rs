//! # connect-four-mcts
//!
//! A Connect Four rules engine and a Monte Carlo Tree Search (MCTS) player.
//!
//! The crate has two halves:
//!
//! - [`Board`]: the 6x7 gravity-drop board, with legal-move enumeration, move
//!   application and win/draw detection.
//! - [`Mcts`]: a search engine that estimates the value of each move by playing
//!   many simulated games and returns the most promising column.
//!
//! Front ends usually only need [`choose_move`], which dispatches a named
//! [`Strategy`] to the search or to a uniformly random move.
//!
//! ## Basic Usage
//!
//! ```
//! use connect_four_mcts::{choose_move, Board, SearchConfig, Strategy, TerminalResult};
//!
//! fn main() -> Result<(), connect_four_mcts::Error> {
//!     // A plays 0, 1, 2 along the bottom row, B stacks on top
//!     let board = Board::from_moves(&[0, 0, 1, 1, 2, 2])?;
//!     assert_eq!(board.terminal_status(), TerminalResult::InProgress);
//!
//!     let config = SearchConfig::default()
//!         .with_max_iterations(2_000)
//!         .with_seed(42);
//!
//!     let column = choose_move(&board, &Strategy::Search(config))?;
//!     let board = board.apply_move(column)?;
//!     println!("Search played column {}:\n{}", column, board);
//!     Ok(())
//! }
//! ```
//!
//! ## How It Works
//!
//! Each search iteration goes through four phases:
//!
//! 1. **Selection**: starting from the root, descend through fully expanded nodes,
//!    picking the child with the best UCB1 score.
//! 2. **Expansion**: add one child for a random untried column.
//! 3. **Simulation**: play the new position out to the end with a rollout policy
//!    (uniformly random, or greedy win/block/random).
//! 4. **Backpropagation**: walk back to the root, adding one visit and the
//!    playout reward to every node, flipping the reward's sign at each level.
//!
//! Rewards are +1 for a win, 0 for a draw and -1 for a loss. After the budget is
//! spent, the root child with the best mean reward is played.

pub mod board;
pub mod config;
pub mod mcts;
pub mod policy;
pub mod selector;
pub mod stats;
pub mod tree;
pub mod utils;

pub use board::{Board, Cell, IllegalMoveError, Mark, ParseBoardError, Player, TerminalResult};
pub use config::{Budget, RolloutKind, SearchConfig};
pub use mcts::Mcts;
pub use policy::{RolloutPolicy, SelectionPolicy};
pub use selector::{choose_move, MoveSelector, Strategy};
pub use stats::SearchStatistics;
pub use tree::{NodeId, SearchNode, SearchTree};

/// Error types for the crate
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A move was refused by the rules engine
    #[error("Illegal move: {0}")]
    IllegalMove(#[from] IllegalMoveError),

    /// A move was requested for a position that is already decided
    #[error("Invalid state: the game is already over ({0:?})")]
    InvalidState(TerminalResult),

    /// No legal moves are available from the current state
    #[error("No legal moves available from current state")]
    NoLegalMoves,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A strategy name that is not recognised
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),
}

/// Result type for the crate
pub type Result<T> = std::result::Result<T, Error>;
