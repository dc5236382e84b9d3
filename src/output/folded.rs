//! Folded stack output writer.
//!
//! Writes one `stack weight` line per collapsed stack, the format read by
//! flamegraph.pl, inferno and speedscope.

use super::{ensure_parent_dir, validate_path};
use crate::aggregator::stack_builder::CollapsedStack;
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write collapsed stacks to a folded text file
///
/// **Public** - main entry point for folded output
///
/// # Arguments
/// * `stacks` - Collapsed stacks from stack_builder
/// * `output_path` - Path to output file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
pub fn write_folded(
    stacks: &[CollapsedStack],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing folded stacks to: {}", output_path.display());

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    for stack in stacks {
        writeln!(writer, "{} {}", stack.stack, stack.weight).map_err(OutputError::WriteFailed)?;
    }

    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("Folded stacks written successfully ({} lines)", stacks.len());

    Ok(())
}

/// Render collapsed stacks as folded text (for testing or in-memory use)
///
/// **Public** - useful for tests and piping into other tools
pub fn folded_to_string(stacks: &[CollapsedStack]) -> String {
    stacks
        .iter()
        .map(|stack| format!("{}\n", stack.to_line()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn sample_stacks() -> Vec<CollapsedStack> {
        vec![
            CollapsedStack::new("a;a->1;b".to_string(), 6),
            CollapsedStack::new("a;a->1;c".to_string(), 4),
        ]
    }

    #[test]
    fn test_write_folded() {
        let temp_file = NamedTempFile::new().unwrap();
        write_folded(&sample_stacks(), temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(content, "a;a->1;b 6\na;a->1;c 4\n");
    }

    #[test]
    fn test_folded_to_string_empty() {
        assert_eq!(folded_to_string(&[]), "");
    }

    #[test]
    fn test_write_folded_rejects_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(write_folded(&sample_stacks(), temp_dir.path()).is_err());
    }
}
