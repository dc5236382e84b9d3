//! Build collapsed stack format from the merged call tree.
//!
//! Collapsed stacks are the input format for flamegraph generation.
//! Format: "root;callsite;callee;...;callsite;leaf weight"
//!
//! Every call is preceded by an extra frame naming the call site, so a
//! function calling others from different lines shows one bar per line:
//! "siminit.lua:1(main);siminit.lua:1(main)->10;ai.lua:5(think) 6"
//! means main called think from line 10 and think itself took 6 ms.

use super::call_tree::{CallForest, CallNode};
use log::debug;

/// A single collapsed stack entry
///
/// **Public** - used by the folded writer and the flamegraph generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapsedStack {
    /// Stack trace as semicolon-separated string
    pub stack: String,

    /// Self time of the last frame, in whole milliseconds
    pub weight: i64,
}

impl CollapsedStack {
    /// Create a new collapsed stack
    ///
    /// **Public** - constructor
    pub fn new(stack: String, weight: i64) -> Self {
        Self { stack, weight }
    }

    /// Render as a folded line
    pub fn to_line(&self) -> String {
        format!("{} {}", self.stack, self.weight)
    }
}

/// Convert seconds to whole milliseconds, truncating toward zero
pub fn to_millis(seconds: f64) -> i64 {
    (seconds * 1000.0) as i64
}

/// Build collapsed stacks from the call tree
///
/// **Public** - main entry point for stack building
///
/// # Arguments
/// * `forest` - Aggregated call tree
///
/// # Returns
/// One entry per leaf path, plus one per inner node with positive self
/// time, in depth-first key order
pub fn build_collapsed_stacks(forest: &CallForest) -> Vec<CollapsedStack> {
    let mut stacks = Vec::new();

    for root in forest.roots() {
        collect(root, "", &mut stacks);
    }

    debug!("Built {} collapsed stacks", stacks.len());

    stacks
}

/// Depth-first walk emitting one entry per node that carries weight
///
/// **Private** - internal helper for build_collapsed_stacks
fn collect(node: &CallNode, prefix: &str, out: &mut Vec<CollapsedStack>) {
    let stack = format!("{}{}", prefix, node.key);
    let weight = to_millis(node.self_duration());

    if node.is_leaf() || weight > 0 {
        out.push(CollapsedStack::new(stack.clone(), weight));
    } else {
        debug!("Skipping inner frame without self time: {} ({} ms)", stack, weight);
    }

    for (call_site, callees) in &node.children {
        let child_prefix = format!("{};{};", stack, call_site);
        for child in callees.values() {
            collect(child, &child_prefix, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::call_tree::MergePolicy;
    use crate::parser::schema::{CallStack, Frame};

    #[test]
    fn test_collapsed_stack_to_line() {
        let stack = CollapsedStack::new("main;main->3;update".to_string(), 12);
        assert_eq!(stack.to_line(), "main;main->3;update 12");
    }

    #[test]
    fn test_to_millis_truncates() {
        assert_eq!(to_millis(0.0069), 6);
        assert_eq!(to_millis(-0.0069), -6);
        assert_eq!(to_millis(1.0), 1000);
    }

    #[test]
    fn test_inner_frame_with_self_time() {
        let main = Frame::new("A", 1, "main", 10);
        let forest = CallForest::from_stacks(
            &[
                CallStack {
                    frames: vec![main.clone()],
                    count: 1,
                    total_duration: 0.5,
                },
                CallStack {
                    frames: vec![main, Frame::new("B", 2, "b", 0)],
                    count: 1,
                    total_duration: 0.125,
                },
            ],
            MergePolicy::Overwrite,
        );

        let lines: Vec<String> = build_collapsed_stacks(&forest)
            .iter()
            .map(CollapsedStack::to_line)
            .collect();

        assert_eq!(lines, vec!["A:1(main) 375", "A:1(main);A:1(main)->10;B:2(b) 125"]);
    }
}
