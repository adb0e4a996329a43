//! Statistics collected during a search

use std::time::Duration;

/// Counters and timing gathered over one [`Search::run`](crate::Search::run).
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Iterations actually executed.
    pub iterations: usize,

    /// Playouts simulated.
    pub playouts: usize,

    /// Selections that found nothing to expand (terminal or exhausted
    /// frontier nodes).
    pub useless_selections: usize,

    /// Nodes freed by dead-subtree pruning.
    pub pruned_nodes: usize,

    /// Nodes still allocated when the search finished.
    pub live_states: usize,

    /// Wall-clock time of the run.
    pub total_time: Duration,
}

impl SearchStats {
    pub fn new() -> Self {
        SearchStats::default()
    }

    /// Fraction of iterations whose selection could not be expanded.
    pub fn useless_selection_ratio(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.useless_selections as f64 / self.iterations as f64
    }

    /// Search iterations per second.
    pub fn iterations_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.iterations as f64 / self.total_time.as_secs_f64()
    }

    /// Multi-line human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "Search statistics:\n\
             - Iterations: {}\n\
             - Playouts: {}\n\
             - Useless selections: {} ({:.1}%)\n\
             - Pruned nodes: {}\n\
             - Live states: {}\n\
             - Total time: {:.3} seconds\n\
             - Iterations per second: {:.1}",
            self.iterations,
            self.playouts,
            self.useless_selections,
            self.useless_selection_ratio() * 100.0,
            self.pruned_nodes,
            self.live_states,
            self.total_time.as_secs_f64(),
            self.iterations_per_second(),
        )
    }
}
