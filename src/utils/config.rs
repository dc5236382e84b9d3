//! Configuration and constants for the CLI.

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Every profiler sample in a LOUD log starts with this marker
pub const PROFILER_LINE_MARKER: &str = "info: prof: ";

/// Top-level field separator of a profiler line (frames and metrics)
pub const FIELD_SEPARATOR: char = ';';

/// Separator between the sub-fields of a frame or of the metrics segment
pub const SUBFIELD_SEPARATOR: char = ',';

/// Source value the Lua runtime reports for native (C) functions
pub const NATIVE_SOURCE: &str = "=[C]";

// Prefix inference
// The sim entry point is always part of a profiled session, so its path
// reveals the installation directory shared by every other source file.
pub const SENTINEL_SUFFIX: &str = "gamedata/lua/lua/siminit.lua";
pub const WINDOWS_SEPARATOR: char = '\\';
pub const UNIX_SEPARATOR: char = '/';
pub const PATH_MARKER: char = '@';
pub const SEPARATOR_LOOKBACK: usize = 100;
pub const MARKER_LOOKBACK: usize = 1000;

/// Folded output weight unit (self time is reported in milliseconds)
pub const WEIGHT_UNIT: &str = "ms";

// Limits for command arguments
pub const DEFAULT_TOP_PATHS: usize = 20;
pub const MAX_TOP_PATHS: usize = 1000;
pub const DEFAULT_FLAMEGRAPH_WIDTH: usize = 1200;
