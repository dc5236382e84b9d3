//! Convert command implementation.
//!
//! The convert command:
//! 1. Reads the profiler log
//! 2. Parses the sampled call stacks
//! 3. Merges them into a call tree
//! 4. Builds collapsed stacks
//! 5. Generates flamegraph and profile (if requested)
//! 6. Writes output files

use super::models::ConvertArgs;
use crate::aggregator::{
    build_collapsed_stacks, calculate_forest_stats, calculate_hot_paths, CallForest, ForestStats,
};
use crate::flamegraph::{generate_flamegraph, generate_text_summary};
use crate::output::{write_folded, write_profile, write_svg};
use crate::parser::parse_log;
use crate::parser::schema::{HotPath, Profile};
use crate::utils::config::{MAX_TOP_PATHS, SCHEMA_VERSION};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// Execute the convert command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Convert command arguments
///
/// # Returns
/// Statistics of the converted log
///
/// # Errors
/// * Unreadable input file
/// * Unsupported or malformed profiler log
/// * File write errors
pub fn execute_convert(args: ConvertArgs) -> Result<ForestStats> {
    let start_time = Instant::now();

    info!("Converting profiler log: {}", args.input.display());

    // Step 1: Read log
    info!("Step 1/6: Reading log...");
    let data = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    // Step 2: Parse log
    info!("Step 2/6: Parsing profiler samples...");
    let parsed = parse_log(&data)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    debug!(
        "Separator {:?}, prefix {:?}, {} stacks",
        parsed.path_config.separator,
        parsed.path_config.prefix,
        parsed.stacks.len()
    );

    // Step 3: Merge into call tree
    info!("Step 3/6: Merging call stacks ({} policy)...", args.merge_policy);
    let forest = CallForest::from_stacks(&parsed.stacks, args.merge_policy);
    let stats = calculate_forest_stats(&forest, &parsed.stacks);
    info!("Call tree: {}", stats.summary());
    if stats.revisited_nodes > 0 {
        debug!(
            "{} functions were the last frame of more than one stack",
            stats.revisited_nodes
        );
    }

    // Step 4: Build collapsed stacks
    info!("Step 4/6: Building collapsed stacks...");
    let stacks = build_collapsed_stacks(&forest);

    // Step 5: Generate flamegraph (if requested)
    let svg_content = if args.output_svg.is_some() {
        info!("Step 5/6: Generating flamegraph...");
        let svg = generate_flamegraph(&stacks, &args.flamegraph_config)
            .context("Failed to generate flamegraph")?;
        Some(svg)
    } else {
        info!("Step 5/6: Skipping flamegraph generation (not requested)");
        None
    };

    // Step 6: Write outputs
    info!("Step 6/6: Writing output files...");

    write_folded(&stacks, &args.output).context("Failed to write folded stacks")?;
    info!("✓ Folded stacks written to: {}", args.output.display());

    if let (Some(svg), Some(svg_path)) = (svg_content, &args.output_svg) {
        write_svg(&svg, svg_path).context("Failed to write flamegraph SVG")?;
        info!("✓ Flamegraph written to: {}", svg_path.display());
    }

    if let Some(json_path) = &args.output_json {
        let hot_paths = calculate_hot_paths(&stacks, args.top_paths);
        let profile = to_profile(&args.input, &stats, hot_paths);
        write_profile(&profile, json_path).context("Failed to write profile JSON")?;
        info!("✓ Profile written to: {}", json_path.display());
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("PROFILE SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Log:           {}", args.input.display());
        println!("Stacks:        {}", stats.stack_count);
        println!("Samples:       {}", stats.total_samples);
        println!("Total time:    {} ms", stats.total_duration_ms);
        println!("Functions:     {}", stats.node_count);
        println!("\n{}", generate_text_summary(&stacks, 10));
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Conversion completed in {:.2}s", elapsed.as_secs_f64());

    Ok(stats)
}

/// Assemble the JSON profile summary
///
/// **Public** - used by execute_convert
pub fn to_profile(source_file: &Path, stats: &ForestStats, hot_paths: Vec<HotPath>) -> Profile {
    use chrono::Utc;

    Profile {
        version: SCHEMA_VERSION.to_string(),
        source_file: source_file.display().to_string(),
        stack_count: stats.stack_count,
        total_samples: stats.total_samples,
        total_duration_ms: stats.total_duration_ms.max(0) as u64,
        root_count: stats.root_count,
        node_count: stats.node_count,
        max_depth: stats.max_depth,
        hot_paths,
        generated_at: Utc::now().to_rfc3339(),
    }
}

/// Validate convert arguments
///
/// **Public** - can be called before execute_convert for early validation
pub fn validate_args(args: &ConvertArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input log path cannot be empty");
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.top_paths == 0 {
        anyhow::bail!("top_paths must be greater than 0");
    }

    if args.top_paths > MAX_TOP_PATHS {
        anyhow::bail!("top_paths is too large (max {})", MAX_TOP_PATHS);
    }

    if args.flamegraph_config.width == 0 {
        anyhow::bail!("Flamegraph width must be greater than 0");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn valid_args() -> ConvertArgs {
        ConvertArgs {
            input: PathBuf::from("loud.log"),
            output: PathBuf::from("loud.folded"),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_args_valid() {
        assert!(validate_args(&valid_args()).is_ok());
    }

    #[test]
    fn test_validate_args_empty_input() {
        let args = ConvertArgs {
            input: PathBuf::new(),
            ..valid_args()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_output() {
        let args = ConvertArgs {
            output: PathBuf::new(),
            ..valid_args()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_top_paths_zero() {
        let args = ConvertArgs {
            top_paths: 0,
            ..valid_args()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_top_paths_too_large() {
        let args = ConvertArgs {
            top_paths: 2000,
            ..valid_args()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_to_profile() {
        let stats = ForestStats {
            stack_count: 2,
            total_samples: 5,
            total_duration_ms: -3,
            root_count: 1,
            node_count: 3,
            max_depth: 2,
            revisited_nodes: 0,
        };

        let profile = to_profile(Path::new("loud.log"), &stats, Vec::new());

        assert_eq!(profile.version, SCHEMA_VERSION);
        assert_eq!(profile.source_file, "loud.log");
        assert_eq!(profile.total_duration_ms, 0);
        assert_eq!(profile.node_count, 3);
    }
}
