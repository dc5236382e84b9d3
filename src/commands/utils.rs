use crate::parser::{parse_log, ParsedLog};
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::Path;

/// Check that a file is a supported profiler log
///
/// Parses every profiler line without writing anything.
pub fn validate_log_file(file_path: &Path) -> Result<ParsedLog> {
    println!("Validating log: {}", file_path.display());

    let data = std::fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;
    let parsed = parse_log(&data)
        .with_context(|| format!("Failed to parse {}", file_path.display()))?;

    let samples: u64 = parsed.stacks.iter().map(|s| s.count).sum();
    let deepest = parsed.stacks.iter().map(|s| s.depth()).max().unwrap_or(0);

    println!("✓ Valid profiler log");
    println!("  Separator: {:?}", parsed.path_config.separator);
    println!("  Prefix: {}", parsed.path_config.prefix);
    println!("  Call Stacks: {}", parsed.stacks.len());
    println!("  Samples: {}", samples);
    println!("  Deepest Stack: {}", deepest);
    println!("  Other Lines: {}", parsed.skipped_lines);

    Ok(parsed)
}

/// Display version information
pub fn display_version() {
    println!("Supcom Flame v{}", env!("CARGO_PKG_VERSION"));
    println!("Profile Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Converts LOUD Lua profiler logs into folded stacks and flamegraphs.");
}
