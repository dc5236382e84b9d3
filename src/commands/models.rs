use crate::aggregator::MergePolicy;
use crate::flamegraph::FlamegraphConfig;
use crate::utils::config::DEFAULT_TOP_PATHS;
use std::path::PathBuf;

/// Arguments for the convert command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Profiler log to convert
    pub input: PathBuf,

    /// Output path for folded stacks
    pub output: PathBuf,

    /// Output path for SVG flamegraph (optional)
    pub output_svg: Option<PathBuf>,

    /// Output path for JSON profile summary (optional)
    pub output_json: Option<PathBuf>,

    /// Number of top hot paths to include in the profile
    pub top_paths: usize,

    /// Flamegraph configuration
    pub flamegraph_config: FlamegraphConfig,

    /// How stacks ending at the same function are combined
    pub merge_policy: MergePolicy,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for ConvertArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::from("profile.folded"),
            output_svg: None,
            output_json: None,
            top_paths: DEFAULT_TOP_PATHS,
            flamegraph_config: FlamegraphConfig::default(),
            merge_policy: MergePolicy::default(),
            print_summary: false,
        }
    }
}
