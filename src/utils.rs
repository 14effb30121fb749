//! Numeric helpers shared by the search phases

use rand::{seq::SliceRandom, RngCore};

/// Average reward per visit, 0 for an unvisited node
pub fn mean_reward(reward_sum: f64, visits: u64) -> f64 {
    if visits == 0 {
        return 0.0;
    }
    reward_sum / visits as f64
}

/// Exploration term of UCB1: `c * sqrt(ln(parent_visits) / child_visits)`
pub fn exploration_term(parent_visits: u64, child_visits: u64, exploration_constant: f64) -> f64 {
    if child_visits == 0 {
        return f64::INFINITY;
    }

    // ln(0) is -inf; a parent is always visited before its children are scored
    let parent = (parent_visits.max(1)) as f64;
    exploration_constant * (parent.ln() / child_visits as f64).sqrt()
}

/// UCB1 score of a child. Unvisited children score `+inf`.
pub fn ucb1_value(
    reward_sum: f64,
    visits: u64,
    parent_visits: u64,
    exploration_constant: f64,
) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }

    mean_reward(reward_sum, visits) + exploration_term(parent_visits, visits, exploration_constant)
}

/// Index of the largest score, ties broken uniformly at random
///
/// NaN scores never win. Returns None for an empty input or all-NaN input.
pub fn argmax_random_tie<I>(scores: I, rng: &mut dyn RngCore) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut best = f64::NEG_INFINITY;
    let mut candidates = Vec::new();

    for (index, score) in scores.into_iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        if candidates.is_empty() || score > best {
            best = score;
            candidates.clear();
            candidates.push(index);
        } else if score == best {
            candidates.push(index);
        }
    }

    candidates.choose(rng).copied()
}
