//! Aggregation of parsed call stacks into a call tree and metrics.
//!
//! This module transforms parsed profiler samples into:
//! - A merged call tree with per-node self time
//! - Collapsed stack format (for flamegraph generation)
//! - Hot path analysis and summary statistics

pub mod call_tree;
pub mod metrics;
pub mod stack_builder;

// Re-export main types and functions
pub use call_tree::{build_forest, CallForest, CallNode, CallSiteKey, FrameKey, MergePolicy};
pub use metrics::{calculate_forest_stats, calculate_hot_paths, ForestStats};
pub use stack_builder::{build_collapsed_stacks, CollapsedStack};
