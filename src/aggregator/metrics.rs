//! Calculate summary metrics and hot paths from the call tree.
//!
//! Hot paths are the call paths with the most self time.
//! These are the primary targets for optimization.

use super::call_tree::CallForest;
use super::stack_builder::{to_millis, CollapsedStack};
use crate::parser::schema::{CallStack, HotPath};
use log::debug;

/// Calculate hot paths from collapsed stacks
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `stacks` - Collapsed stacks from stack_builder
/// * `top_n` - Number of top paths to return (e.g., 10)
///
/// # Returns
/// Vector of hot paths, sorted by self time (descending)
pub fn calculate_hot_paths(stacks: &[CollapsedStack], top_n: usize) -> Vec<HotPath> {
    debug!("Calculating top {} hot paths from {} stacks", top_n, stacks.len());

    let total_ms = positive_total(stacks);

    let mut ranked: Vec<&CollapsedStack> = stacks.iter().filter(|s| s.weight > 0).collect();
    ranked.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.stack.cmp(&b.stack)));

    ranked
        .into_iter()
        .take(top_n)
        .map(|stack| create_hot_path(stack, total_ms))
        .collect()
}

/// Create a HotPath from a CollapsedStack
///
/// **Public** - conversion used by calculate_hot_paths
pub fn create_hot_path(stack: &CollapsedStack, total_ms: i64) -> HotPath {
    let percentage = if total_ms > 0 {
        (stack.weight as f64 / total_ms as f64) * 100.0
    } else {
        0.0
    };

    HotPath {
        stack: stack.stack.clone(),
        self_ms: stack.weight,
        percentage,
    }
}

/// Sum of all positive weights (what a flamegraph actually draws)
///
/// **Private** - internal utility
fn positive_total(stacks: &[CollapsedStack]) -> i64 {
    stacks.iter().map(|s| s.weight.max(0)).sum()
}

/// Summary statistics of a converted log
///
/// **Public** - returned from calculate_forest_stats
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForestStats {
    /// Number of profiler lines
    pub stack_count: usize,

    /// Sum of sample counts over all lines
    pub total_samples: u64,

    /// Sum of root durations, in milliseconds
    pub total_duration_ms: i64,

    pub root_count: usize,
    pub node_count: usize,
    pub max_depth: usize,

    /// Nodes that received more than one terminal stack
    pub revisited_nodes: usize,
}

/// Calculate statistics over the parsed stacks and the merged tree
///
/// **Public** - provides summary statistics
pub fn calculate_forest_stats(forest: &CallForest, stacks: &[CallStack]) -> ForestStats {
    let mut revisited_nodes = 0;
    let mut pending: Vec<_> = forest.roots().collect();
    while let Some(node) = pending.pop() {
        if node.terminal_hits > 1 {
            revisited_nodes += 1;
        }
        pending.extend(node.child_nodes());
    }

    ForestStats {
        stack_count: stacks.len(),
        total_samples: stacks.iter().map(|s| s.count).sum(),
        total_duration_ms: to_millis(forest.total_duration()),
        root_count: forest.root_count(),
        node_count: forest.node_count(),
        max_depth: forest.max_depth(),
        revisited_nodes,
    }
}

impl ForestStats {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Stacks: {} | Samples: {} | Total: {} ms | Roots: {} | Nodes: {} | Depth: {}",
            self.stack_count,
            self.total_samples,
            self.total_duration_ms,
            self.root_count,
            self.node_count,
            self.max_depth
        )
    }
}
