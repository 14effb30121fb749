//! Move selection entry point for front ends
//!
//! [`MoveSelector`] maps a named [`Strategy`] onto either a tree search or a
//! uniformly random choice among the playable columns. It is the only piece a
//! user interface needs to call to get a computer move.

use std::fmt;
use std::str::FromStr;

use log::trace;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{board::Board, config::SearchConfig, mcts::Mcts, Error, Result};

/// How a computer player picks its moves
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    /// Monte Carlo Tree Search with the given configuration
    Search(SearchConfig),

    /// Uniformly random playable column
    UniformRandom,
}

impl Strategy {
    /// Name accepted by [`Strategy::from_str`]
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Search(_) => "search",
            Strategy::UniformRandom => "uniform-random",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a strategy name; searches use the default configuration
impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "search" | "mcts" | "monte carlo" | "monte-carlo" => {
                Ok(Strategy::Search(SearchConfig::default()))
            }
            "random" | "uniform-random" | "uniform random" => Ok(Strategy::UniformRandom),
            _ => Err(Error::UnknownStrategy(s.to_string())),
        }
    }
}

/// Dispatches move requests to a strategy
///
/// The selector keeps a random generator for [`Strategy::UniformRandom`]; seeding
/// it makes random play reproducible. Searches use the seed of their own
/// configuration.
pub struct MoveSelector {
    strategy: Strategy,
    rng: StdRng,
}

impl MoveSelector {
    /// Creates a selector seeded from the OS
    pub fn new(strategy: Strategy) -> Self {
        MoveSelector {
            strategy,
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a selector with a fixed seed
    pub fn with_seed(strategy: Strategy, seed: u64) -> Self {
        MoveSelector {
            strategy,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Strategy this selector dispatches to
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Chooses a column for the player to move on `board`
    ///
    /// Fails with [`Error::InvalidState`] if the game is already decided.
    pub fn choose_move(&mut self, board: &Board) -> Result<usize> {
        let status = board.terminal_status();
        if status.is_terminal() {
            return Err(Error::InvalidState(status));
        }

        trace!(
            "Choosing a move for {:?} with strategy {}",
            board.to_move(),
            self.strategy
        );

        match &self.strategy {
            Strategy::Search(config) => Mcts::new(board.clone(), config.clone())?.search(),
            Strategy::UniformRandom => board
                .playable_moves()
                .choose(&mut self.rng)
                .copied()
                .ok_or(Error::NoLegalMoves),
        }
    }
}

/// Chooses a column for the player to move on `board` with `strategy`
pub fn choose_move(board: &Board, strategy: &Strategy) -> Result<usize> {
    MoveSelector::new(strategy.clone()).choose_move(board)
}
