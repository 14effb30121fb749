//! Statistics collection for searches
//!
//! This module provides structures for collecting and reporting statistics
//! about a single search.

use std::time::Duration;

/// Statistics collected during a search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStatistics {
    /// Number of completed iterations
    pub iterations: usize,

    /// Total time spent searching
    pub total_time: Duration,

    /// Total number of nodes in the tree
    pub tree_size: usize,

    /// Maximum depth reached in the tree
    pub max_depth: usize,

    /// Whether the time budget ended the search
    pub stopped_by_time: bool,

    /// Playouts cut off by the depth safety bound
    pub truncated_rollouts: usize,

    /// Whether the move was picked at random because nothing was searched
    pub used_fallback: bool,
}

impl SearchStatistics {
    /// Creates a new, empty statistics object
    pub fn new() -> Self {
        SearchStatistics {
            iterations: 0,
            total_time: Duration::from_secs(0),
            tree_size: 1, // Start with root node
            max_depth: 0,
            stopped_by_time: false,
            truncated_rollouts: 0,
            used_fallback: false,
        }
    }

    /// Returns the average time per iteration in microseconds
    pub fn avg_time_per_iteration_us(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.total_time.as_micros() as f64 / self.iterations as f64
    }

    /// Returns the number of iterations per second
    pub fn iterations_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.iterations as f64 / self.total_time.as_secs_f64()
    }

    /// Returns a summary of the statistics as a string
    pub fn summary(&self) -> String {
        format!(
            "Search Statistics:\n\
             - Iterations: {}\n\
             - Total time: {:.3} seconds\n\
             - Tree size: {} nodes\n\
             - Max depth: {}\n\
             - Avg time per iteration: {:.3} µs\n\
             - Iterations per second: {:.1}\n\
             - Stopped by time: {}\n\
             - Truncated rollouts: {}\n\
             - Random fallback: {}",
            self.iterations,
            self.total_time.as_secs_f64(),
            self.tree_size,
            self.max_depth,
            self.avg_time_per_iteration_us(),
            self.iterations_per_second(),
            self.stopped_by_time,
            self.truncated_rollouts,
            self.used_fallback
        )
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}
