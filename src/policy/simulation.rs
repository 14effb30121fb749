//! Rollout policies for the search
//!
//! A rollout policy picks moves for fast simulated games played from a node to
//! the end of the game. The outcome of the playout is the estimate that gets
//! backpropagated through the tree.

use log::warn;
use rand::{seq::SliceRandom, RngCore};

use crate::{
    board::{Board, Player, TerminalResult, CELLS},
    config::RolloutKind,
};

/// Reward for the player who wins a playout
pub const WIN_REWARD: f64 = 1.0;

/// Reward for both players when a playout is drawn
pub const DRAW_REWARD: f64 = 0.0;

/// Reward for the player who loses a playout
pub const LOSS_REWARD: f64 = -1.0;

/// Maps a game outcome to a reward for `player`
///
/// An unfinished game (a truncated playout) counts as a draw.
pub fn reward_for(result: TerminalResult, player: Player) -> f64 {
    match result {
        TerminalResult::Win(winner) if winner == player => WIN_REWARD,
        TerminalResult::Win(_) => LOSS_REWARD,
        TerminalResult::Draw | TerminalResult::InProgress => DRAW_REWARD,
    }
}

/// Outcome of one simulated game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playout {
    /// Final status of the simulated game
    pub result: TerminalResult,

    /// Number of moves played during the simulation
    pub plies: usize,

    /// True if the simulation stopped before reaching a terminal position
    pub truncated: bool,
}

impl Playout {
    /// Reward of this playout for `player`
    pub fn reward_for(&self, player: Player) -> f64 {
        reward_for(self.result, player)
    }
}

/// Trait for policies that play out simulated games
pub trait RolloutPolicy: Send + Sync {
    /// Chooses the next move of a simulated game, None if no move can be played
    fn choose_move(&self, board: &Board, rng: &mut dyn RngCore) -> Option<usize>;

    /// Plays a copy of `board` to the end of the game
    ///
    /// A game can last at most as many plies as there are empty cells, so the
    /// playout is cut off at that depth. Hitting the bound, or a move the board
    /// refuses, means the rules engine is broken; the playout is then reported as
    /// truncated and scored as a draw.
    fn rollout(&self, board: &Board, rng: &mut dyn RngCore) -> Playout {
        let mut state = board.clone();
        let max_plies = CELLS.saturating_sub(state.played_moves());
        let mut plies = 0;

        while !state.is_terminal() {
            if plies >= max_plies {
                warn!("Rollout exceeded {} plies without reaching a result", max_plies);
                return truncated(&state, plies);
            }

            let Some(column) = self.choose_move(&state, rng) else {
                warn!("Rollout policy found no move on an unfinished board:\n{}", state);
                return truncated(&state, plies);
            };

            if let Err(err) = state.play(column) {
                warn!("Rollout policy chose column {}: {}", column, err);
                return truncated(&state, plies);
            }
            plies += 1;
        }

        Playout {
            result: state.terminal_status(),
            plies,
            truncated: false,
        }
    }

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn RolloutPolicy>;
}

fn truncated(state: &Board, plies: usize) -> Playout {
    Playout {
        result: state.terminal_status(),
        plies,
        truncated: true,
    }
}

/// Builds the rollout policy named by a configuration value
pub fn rollout_policy_for(kind: RolloutKind) -> Box<dyn RolloutPolicy> {
    match kind {
        RolloutKind::Random => Box::new(RandomRollout::new()),
        RolloutKind::HeuristicGreedy => Box::new(HeuristicRollout::new()),
    }
}

/// Random rollout policy
///
/// This policy plays uniformly random open columns until the game ends.
#[derive(Debug, Clone)]
pub struct RandomRollout;

impl RandomRollout {
    /// Creates a new random policy
    pub fn new() -> Self {
        RandomRollout
    }
}

impl Default for RandomRollout {
    fn default() -> Self {
        Self::new()
    }
}

impl RolloutPolicy for RandomRollout {
    fn choose_move(&self, board: &Board, rng: &mut dyn RngCore) -> Option<usize> {
        board.playable_moves().choose(rng).copied()
    }

    fn clone_box(&self) -> Box<dyn RolloutPolicy> {
        Box::new(self.clone())
    }
}

/// Greedy heuristic rollout policy
///
/// On every ply the mover:
/// 1. plays the first column (left to right) that wins immediately;
/// 2. otherwise blocks the first column where the opponent would win next turn;
/// 3. otherwise plays a uniformly random open column.
#[derive(Debug, Clone)]
pub struct HeuristicRollout;

impl HeuristicRollout {
    /// Creates a new heuristic policy
    pub fn new() -> Self {
        HeuristicRollout
    }
}

impl Default for HeuristicRollout {
    fn default() -> Self {
        Self::new()
    }
}

impl RolloutPolicy for HeuristicRollout {
    fn choose_move(&self, board: &Board, rng: &mut dyn RngCore) -> Option<usize> {
        let moves = board.playable_moves();
        let mover = board.to_move();

        moves
            .iter()
            .copied()
            .find(|&column| board.would_win(column, mover))
            .or_else(|| {
                moves
                    .iter()
                    .copied()
                    .find(|&column| board.would_win(column, mover.opponent()))
            })
            .or_else(|| moves.choose(rng).copied())
    }

    fn clone_box(&self) -> Box<dyn RolloutPolicy> {
        Box::new(self.clone())
    }
}

impl RolloutPolicy for Box<dyn RolloutPolicy> {
    fn choose_move(&self, board: &Board, rng: &mut dyn RngCore) -> Option<usize> {
        (**self).choose_move(board, rng)
    }

    fn rollout(&self, board: &Board, rng: &mut dyn RngCore) -> Playout {
        (**self).rollout(board, rng)
    }

    fn clone_box(&self) -> Box<dyn RolloutPolicy> {
        (**self).clone_box()
    }
}
