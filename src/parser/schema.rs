//! Data model for parsed profiler samples and the JSON profile schema.
//!
//! Frames and call stacks are the in-memory result of parsing a log.
//! `Profile` is the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use serde::{Deserialize, Serialize};

/// One call-stack entry as captured by the profiler
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    /// Source file, relative to the inferred installation prefix
    pub source: String,

    /// Line where the function is defined
    pub lineno: i64,

    /// Function name (empty for anonymous functions)
    pub name: String,

    /// Line in this frame from which the next frame was called
    pub return_line: i64,
}

impl Frame {
    pub fn new(
        source: impl Into<String>,
        lineno: i64,
        name: impl Into<String>,
        return_line: i64,
    ) -> Self {
        Self {
            source: source.into(),
            lineno,
            name: name.into(),
            return_line,
        }
    }
}

/// A sampled call stack, outermost caller first
#[derive(Debug, Clone, PartialEq)]
pub struct CallStack {
    pub frames: Vec<Frame>,

    /// How many times this stack was sampled
    pub count: u64,

    /// Cumulative time (seconds) attributed to the deepest frame
    pub total_duration: f64,
}

impl CallStack {
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

/// Path normalization inferred once per log
///
/// Passed explicitly to the frame parser so parsing stays a pure function
/// of the line and this configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathConfig {
    /// Path separator used by the profiled installation
    pub separator: char,

    /// Installation prefix stripped from every source path
    pub prefix: String,
}

impl PathConfig {
    pub fn new(separator: char, prefix: impl Into<String>) -> Self {
        Self {
            separator,
            prefix: prefix.into(),
        }
    }

    /// Strip the prefix and convert separators to `/`
    pub fn normalize(&self, source: &str) -> String {
        let stripped = if self.prefix.is_empty() {
            source.to_string()
        } else {
            source.replace(&self.prefix, "")
        };

        if self.separator == '/' {
            stripped
        } else {
            stripped.replace(self.separator, "/")
        }
    }
}

/// Top-level profile summary written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Schema version for compatibility checking
    pub version: String,

    /// Log file the profile was built from
    pub source_file: String,

    /// Number of profiler lines parsed
    pub stack_count: usize,

    /// Sum of sample counts over all stacks
    pub total_samples: u64,

    /// Sum of the durations of all root nodes, in milliseconds
    pub total_duration_ms: u64,

    /// Shape of the aggregated call tree
    pub root_count: usize,
    pub node_count: usize,
    pub max_depth: usize,

    /// Top hot paths (ranked by self time)
    pub hot_paths: Vec<HotPath>,

    /// Timestamp when profile was generated
    pub generated_at: String,
}

/// A hot path in the call tree (folded stack with its self time)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotPath {
    /// Folded stack representation (e.g., "siminit.lua:1(main);...")
    pub stack: String,

    /// Self time of the last frame, in milliseconds
    pub self_ms: i64,

    /// Percentage of all positive self time
    pub percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_windows_path() {
        let config = PathConfig::new('\\', "@c:\\games\\supcom");
        assert_eq!(
            config.normalize("@c:\\games\\supcom\\LOUD\\gamedata\\lua\\sim.lua"),
            "/LOUD/gamedata/lua/sim.lua"
        );
    }

    #[test]
    fn test_normalize_empty_prefix() {
        let config = PathConfig::new('/', "");
        assert_eq!(config.normalize("@/opt/loud/a.lua"), "@/opt/loud/a.lua");
    }

    #[test]
    fn test_call_stack_depth() {
        let stack = CallStack {
            frames: vec![Frame::new("a", 1, "f", 2), Frame::new("b", 3, "g", 4)],
            count: 1,
            total_duration: 0.5,
        };
        assert_eq!(stack.frames.last().map(|f| f.name.as_str()), Some("g"));
        assert_eq!(stack.depth(), 2);
    }
}
