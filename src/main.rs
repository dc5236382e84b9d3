//! Supcom Flame CLI
//!
//! Converts LOUD Lua profiler logs into folded stacks and flamegraphs.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use supcom_flame::aggregator::MergePolicy;
use supcom_flame::commands::{
    display_version, execute_convert, validate_args, validate_log_file, ConvertArgs,
};
use supcom_flame::flamegraph::FlamegraphConfig;
use supcom_flame::utils::config::{DEFAULT_FLAMEGRAPH_WIDTH, DEFAULT_TOP_PATHS};

/// Supcom Flame - flamegraphs for the LOUD Lua profiler
#[derive(Parser, Debug)]
#[command(name = "supcom-flame")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a profiler log into folded stacks
    Convert {
        /// Game log containing profiler output
        log: PathBuf,

        /// Output path for folded stacks
        #[arg(short, long)]
        output: PathBuf,

        /// Output path for SVG flamegraph (optional)
        #[arg(short, long)]
        flamegraph: Option<PathBuf>,

        /// Output path for JSON profile summary (optional)
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Number of top hot paths to include in the profile
        #[arg(long, default_value_t = DEFAULT_TOP_PATHS)]
        top_paths: usize,

        /// Flamegraph title
        #[arg(long)]
        title: Option<String>,

        /// Flamegraph width in pixels
        #[arg(long, default_value_t = DEFAULT_FLAMEGRAPH_WIDTH)]
        width: usize,

        /// How stacks ending at the same function combine: overwrite or sum
        #[arg(long, default_value = "overwrite")]
        merge: MergePolicy,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Check that a file contains supported profiler output
    Validate {
        /// Game log containing profiler output
        log: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Convert {
            log,
            output,
            flamegraph,
            profile,
            top_paths,
            title,
            width,
            merge,
            summary,
        } => {
            let mut flamegraph_config = FlamegraphConfig::new().with_width(width);
            if let Some(title) = title {
                flamegraph_config = flamegraph_config.with_title(title);
            }

            let args = ConvertArgs {
                input: log,
                output,
                output_svg: flamegraph,
                output_json: profile,
                top_paths,
                flamegraph_config,
                merge_policy: merge,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_convert(args)?;
        }

        Commands::Validate { log } => {
            validate_log_file(&log)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
