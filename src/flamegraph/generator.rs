//! SVG flamegraph generation with inferno.
//!
//! Collapsed stacks are fed to `inferno::flamegraph` as folded lines.
//! Weights are self times in milliseconds; entries without positive self
//! time carry nothing to draw and are left out.

use crate::aggregator::stack_builder::CollapsedStack;
use crate::utils::config::{DEFAULT_FLAMEGRAPH_WIDTH, WEIGHT_UNIT};
use crate::utils::error::FlamegraphError;
use log::{debug, info};

/// Flamegraph configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlamegraphConfig {
    pub title: String,
    pub width: usize,
}

impl Default for FlamegraphConfig {
    fn default() -> Self {
        Self {
            title: "LOUD Sim Profile".to_string(),
            width: DEFAULT_FLAMEGRAPH_WIDTH,
        }
    }
}

impl FlamegraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

/// Generate SVG flamegraph from collapsed stacks
///
/// **Public** - main entry point for flamegraph rendering
///
/// # Errors
/// * `FlamegraphError::EmptyStacks` - No stack has positive self time
/// * `FlamegraphError::GenerationFailed` - inferno rejected the input
pub fn generate_flamegraph(
    stacks: &[CollapsedStack],
    config: &FlamegraphConfig,
) -> Result<String, FlamegraphError> {
    let lines: Vec<String> = stacks
        .iter()
        .filter(|stack| stack.weight > 0)
        .map(CollapsedStack::to_line)
        .collect();

    if lines.is_empty() {
        return Err(FlamegraphError::EmptyStacks);
    }

    info!("Generating flamegraph with {} stacks", lines.len());
    debug!(
        "Dropped {} stacks without positive self time",
        stacks.len() - lines.len()
    );

    let mut options = inferno::flamegraph::Options::default();
    options.title = config.title.clone();
    options.count_name = WEIGHT_UNIT.to_string();
    options.image_width = Some(config.width);
    options.deterministic = true;

    let mut svg_output = Vec::new();
    inferno::flamegraph::from_lines(
        &mut options,
        lines.iter().map(String::as_str),
        &mut svg_output,
    )
    .map_err(|e| FlamegraphError::GenerationFailed(e.to_string()))?;

    let svg = String::from_utf8(svg_output)
        .map_err(|e| FlamegraphError::GenerationFailed(e.to_string()))?;

    info!("Flamegraph generated successfully ({} bytes)", svg.len());
    Ok(svg)
}

/// Create a plain text table of the hottest stacks
///
/// **Public** - printed by `convert --summary`
pub fn generate_text_summary(stacks: &[CollapsedStack], max_lines: usize) -> String {
    let total_ms: i64 = stacks.iter().map(|s| s.weight.max(0)).sum::<i64>().max(1);

    let mut ranked: Vec<&CollapsedStack> = stacks.iter().filter(|s| s.weight > 0).collect();
    ranked.sort_by(|a, b| b.weight.cmp(&a.weight));

    let mut lines = Vec::new();
    lines.push("  HOT PATHS (self time)".to_string());
    lines.push(format!("  {:<60} {:>10} {:>7}", "Frame", "ms", "%"));
    lines.push(format!("  {}", "-".repeat(79)));

    for stack in ranked.iter().take(max_lines) {
        let percentage = (stack.weight as f64 / total_ms as f64) * 100.0;
        let leaf = stack.stack.rsplit(';').next().unwrap_or(&stack.stack);
        lines.push(format!(
            "  {:<60} {:>10} {:>6.1}%",
            truncate_left(leaf, 60),
            stack.weight,
            percentage
        ));
    }

    if ranked.len() > max_lines {
        lines.push(String::new());
        lines.push(format!(
            "   (Showing top {} of {} weighted paths)",
            max_lines,
            ranked.len()
        ));
    }

    lines.join("\n")
}

/// Keep the tail of long frame names, where the file and function are
///
/// **Private** - internal helper for generate_text_summary
fn truncate_left(name: &str, max_chars: usize) -> String {
    let count = name.chars().count();
    if count <= max_chars {
        return name.to_string();
    }
    let tail: String = name.chars().skip(count - (max_chars - 3)).collect();
    format!("...{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stacks() {
        let result = generate_flamegraph(&[], &FlamegraphConfig::new());
        assert!(matches!(result, Err(FlamegraphError::EmptyStacks)));
    }

    #[test]
    fn test_only_negative_weights_is_empty() {
        let stacks = vec![CollapsedStack::new("main".to_string(), -5)];
        let result = generate_flamegraph(&stacks, &FlamegraphConfig::new());
        assert!(matches!(result, Err(FlamegraphError::EmptyStacks)));
    }

    #[test]
    fn test_generate_flamegraph() {
        let stacks = vec![
            CollapsedStack::new("main;main->10;update".to_string(), 60),
            CollapsedStack::new("main;main->11;render".to_string(), 40),
        ];
        let config = FlamegraphConfig::new().with_title("Test Profile").with_width(800);

        let svg = generate_flamegraph(&stacks, &config).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Test Profile"));
    }

    #[test]
    fn test_text_summary() {
        let stacks = vec![
            CollapsedStack::new("main;main->10;update".to_string(), 75),
            CollapsedStack::new("main;main->11;render".to_string(), 25),
        ];

        let summary = generate_text_summary(&stacks, 1);

        assert!(summary.contains("update"));
        assert!(!summary.contains("render"));
        assert!(summary.contains("75.0%"));
        assert!(summary.contains("Showing top 1 of 2"));
    }

    #[test]
    fn test_truncate_left() {
        assert_eq!(truncate_left("short", 10), "short");
        assert_eq!(truncate_left("abcdefghij", 6), "...hij");
    }
}
