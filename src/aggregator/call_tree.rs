//! Merge sampled call stacks into a single call tree.
//!
//! Children are grouped on two levels. The outer key is the call site: the
//! caller frame together with the line it made the call from. The inner key
//! is the callee. So if A calls B on line 10 and C on line 11, the tree reads
//! (schematically) `A > A->10 > B` and `A > A->11 > C`.
//!
//! A node's total duration comes from the stack that ends at it. Self time
//! is derived on demand as total minus the totals of the direct children.

use crate::parser::loud_log::parse_log;
use crate::parser::schema::{CallStack, Frame};
use crate::utils::config::NATIVE_SOURCE;
use crate::utils::error::ParseError;
use log::debug;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Line number stored in keys of native functions, which carry no usable line info
const NATIVE_LINE: i64 = -1;

/// Identity of a function: where it is defined and what it is called
///
/// Native functions are identified by name alone: their line number is
/// replaced by `NATIVE_LINE`, so keys agree with the displayed identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameKey {
    pub source: String,
    pub lineno: i64,
    pub name: String,
}

impl FrameKey {
    pub fn new(source: impl Into<String>, lineno: i64, name: impl Into<String>) -> Self {
        let source = source.into();
        let lineno = if source == NATIVE_SOURCE {
            NATIVE_LINE
        } else {
            lineno
        };
        Self {
            source,
            lineno,
            name: name.into(),
        }
    }

    pub fn is_native(&self) -> bool {
        self.source == NATIVE_SOURCE
    }
}

impl From<&Frame> for FrameKey {
    fn from(frame: &Frame) -> Self {
        Self::new(frame.source.clone(), frame.lineno, frame.name.clone())
    }
}

/// `source:lineno(name)`, or just the name for native functions
impl fmt::Display for FrameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            return f.write_str(&self.name);
        }
        write!(f, "{}:{}", self.source, self.lineno)?;
        if !self.name.is_empty() {
            write!(f, "({})", self.name)?;
        }
        Ok(())
    }
}

/// A caller frame plus the line it made the call from
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallSiteKey {
    pub caller: FrameKey,
    pub return_line: i64,
}

impl CallSiteKey {
    pub fn new(caller: FrameKey, return_line: i64) -> Self {
        let return_line = if caller.is_native() {
            NATIVE_LINE
        } else {
            return_line
        };
        Self {
            caller,
            return_line,
        }
    }
}

impl From<&Frame> for CallSiteKey {
    fn from(frame: &Frame) -> Self {
        Self::new(FrameKey::from(frame), frame.return_line)
    }
}

/// `source:lineno(name)->returnline`; native callers carry no line info
impl fmt::Display for CallSiteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.caller.is_native() {
            return write!(f, "{}", self.caller);
        }
        write!(f, "{}->{}", self.caller, self.return_line)
    }
}

/// How a node combines the durations of several stacks ending at it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// The last stack wins (the profiler's own reading of the data)
    #[default]
    Overwrite,
    /// Durations and counts are added up
    Sum,
}

impl FromStr for MergePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "sum" => Ok(Self::Sum),
            other => Err(format!(
                "unknown merge policy '{}' (expected 'overwrite' or 'sum')",
                other
            )),
        }
    }
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overwrite => f.write_str("overwrite"),
            Self::Sum => f.write_str("sum"),
        }
    }
}

/// Callees invoked from one call site
pub type CalleeMap = BTreeMap<FrameKey, CallNode>;

/// A function in the merged call tree
#[derive(Debug, Clone, PartialEq)]
pub struct CallNode {
    pub key: FrameKey,

    /// Cumulative time (seconds), including callees
    pub total_duration: f64,

    /// Sample count of the stack(s) that ended here
    pub count: u64,

    /// Number of stacks that ended at this node
    pub terminal_hits: u64,

    pub children: BTreeMap<CallSiteKey, CalleeMap>,
}

impl CallNode {
    pub fn new(key: FrameKey) -> Self {
        Self {
            key,
            total_duration: 0.0,
            count: 0,
            terminal_hits: 0,
            children: BTreeMap::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.values().all(|callees| callees.is_empty())
    }

    /// All direct children, flattened across call sites
    pub fn child_nodes(&self) -> impl Iterator<Item = &CallNode> {
        self.children.values().flat_map(|callees| callees.values())
    }

    /// Look up the callee invoked from a given call site
    pub fn child(&self, call_site: &CallSiteKey, callee: &FrameKey) -> Option<&CallNode> {
        self.children.get(call_site)?.get(callee)
    }

    /// Time spent in this function itself
    ///
    /// Not clamped: inconsistent timings yield a negative value.
    pub fn self_duration(&self) -> f64 {
        let children_total: f64 = self.child_nodes().map(|child| child.total_duration).sum();
        self.total_duration - children_total
    }

    fn record(&mut self, stack: &CallStack, policy: MergePolicy) {
        self.terminal_hits += 1;
        match policy {
            MergePolicy::Overwrite => {
                self.total_duration = stack.total_duration;
                self.count = stack.count;
            }
            MergePolicy::Sum => {
                self.total_duration += stack.total_duration;
                self.count += stack.count;
            }
        }
    }

    fn descendant_count(&self) -> usize {
        self.child_nodes()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    fn depth(&self) -> usize {
        1 + self.child_nodes().map(CallNode::depth).max().unwrap_or(0)
    }
}

/// The merged call trees of a whole log, keyed by outermost frame
#[derive(Debug, Clone, Default)]
pub struct CallForest {
    roots: BTreeMap<FrameKey, CallNode>,
    policy: MergePolicy,
}

impl CallForest {
    pub fn new(policy: MergePolicy) -> Self {
        Self {
            roots: BTreeMap::new(),
            policy,
        }
    }

    /// Fold all stacks, in order, into a new forest
    pub fn from_stacks(stacks: &[CallStack], policy: MergePolicy) -> Self {
        let mut forest = Self::new(policy);
        for stack in stacks {
            forest.insert(stack);
        }
        debug!(
            "Aggregated {} stacks into {} nodes under {} roots",
            stacks.len(),
            forest.node_count(),
            forest.roots.len()
        );
        forest
    }

    /// Merge one call stack into the forest
    ///
    /// Nodes along the path are created on first sight and reused after
    /// that; the node of the deepest frame receives the stack's duration.
    pub fn insert(&mut self, stack: &CallStack) {
        let policy = self.policy;
        let Some((first, rest)) = stack.frames.split_first() else {
            debug!("Ignoring empty call stack");
            return;
        };

        let mut node = self
            .roots
            .entry(FrameKey::from(first))
            .or_insert_with_key(|key| CallNode::new(key.clone()));

        let mut caller = first;
        for frame in rest {
            node = node
                .children
                .entry(CallSiteKey::from(caller))
                .or_default()
                .entry(FrameKey::from(frame))
                .or_insert_with_key(|key| CallNode::new(key.clone()));
            caller = frame;
        }

        node.record(stack, policy);
    }

    pub fn roots(&self) -> impl Iterator<Item = &CallNode> {
        self.roots.values()
    }

    pub fn root(&self, key: &FrameKey) -> Option<&CallNode> {
        self.roots.get(key)
    }

    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.roots().map(|root| 1 + root.descendant_count()).sum()
    }

    pub fn max_depth(&self) -> usize {
        self.roots().map(CallNode::depth).max().unwrap_or(0)
    }

    /// Sum of the root totals (seconds)
    pub fn total_duration(&self) -> f64 {
        self.roots().map(|root| root.total_duration).sum()
    }
}

/// Parse a whole profiler log and aggregate it
///
/// **Public** - boundary function from raw log text to call tree
///
/// # Errors
/// Any `ParseError` from the parser; nothing is aggregated in that case
pub fn build_forest(data: &str, policy: MergePolicy) -> Result<CallForest, ParseError> {
    let parsed = parse_log(data)?;
    Ok(CallForest::from_stacks(&parsed.stacks, policy))
}
