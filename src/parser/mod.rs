//! Profiler log parsing and schema definitions.
//!
//! This module handles:
//! - Inferring the installation prefix shared by all source paths
//! - Parsing profiler lines into call stacks
//! - Defining the output schema

pub mod loud_log;
pub mod prefix;
pub mod schema;

// Re-export main types
pub use loud_log::{parse_log, parse_stack_line, ParsedLog};
pub use prefix::infer_path_config;
pub use schema::{CallStack, Frame, HotPath, PathConfig, Profile};
