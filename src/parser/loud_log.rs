//! Parser for the LOUD Lua profiler log.
//!
//! The profiler writes one line per sampled call stack:
//!
//! ```text
//! info: prof: <source>,<lineno>,<name>,<returnline>;...;<count>,<duration>
//! ```
//!
//! Frames run from the outermost caller to the innermost callee. The last
//! segment holds the sample count and the cumulative duration in seconds.

use super::prefix::infer_path_config;
use super::schema::{CallStack, Frame, PathConfig};
use crate::utils::config::{FIELD_SEPARATOR, PROFILER_LINE_MARKER, SUBFIELD_SEPARATOR};
use crate::utils::error::ParseError;
use log::debug;
use std::str::FromStr;

/// Parsed log data (internal representation)
#[derive(Debug, Clone)]
pub struct ParsedLog {
    pub path_config: PathConfig,
    pub stacks: Vec<CallStack>,

    /// Lines that did not carry the profiler marker
    pub skipped_lines: usize,
}

/// Parse a complete profiler log
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `data` - Full log text; non-profiler lines are ignored
///
/// # Returns
/// The inferred path configuration and every sampled call stack, in log order
///
/// # Errors
/// * `ParseError::UnsupportedInput` - No installation path could be inferred
/// * `ParseError::MalformedLine` / `MalformedFrame` / `InvalidNumber` - A
///   profiler line could not be parsed; the whole log is rejected
pub fn parse_log(data: &str) -> Result<ParsedLog, ParseError> {
    let path_config = infer_path_config(data)?;

    let mut stacks = Vec::new();
    let mut skipped_lines = 0;

    for line in data.lines() {
        match line.strip_prefix(PROFILER_LINE_MARKER) {
            Some(sample) => stacks.push(parse_stack_line(sample.trim_end(), &path_config)?),
            None => skipped_lines += 1,
        }
    }

    debug!(
        "Parsed {} call stacks ({} other lines skipped)",
        stacks.len(),
        skipped_lines
    );

    Ok(ParsedLog {
        path_config,
        stacks,
        skipped_lines,
    })
}

/// Parse one profiler line (marker and trailing whitespace already removed)
///
/// **Public** - exposed for callers that select lines themselves
pub fn parse_stack_line(line: &str, config: &PathConfig) -> Result<CallStack, ParseError> {
    let segments: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let Some((metrics, frame_segments)) = segments.split_last() else {
        return Err(ParseError::MalformedLine(line.to_string()));
    };
    if frame_segments.is_empty() {
        return Err(ParseError::MalformedLine(line.to_string()));
    }

    let frames = frame_segments
        .iter()
        .map(|segment| parse_frame(segment, config))
        .collect::<Result<Vec<_>, _>>()?;

    let mut metric_fields = metrics.split(SUBFIELD_SEPARATOR);
    let (Some(count), Some(duration)) = (metric_fields.next(), metric_fields.next()) else {
        return Err(ParseError::MalformedFrame(metrics.to_string()));
    };

    Ok(CallStack {
        frames,
        count: parse_number("count", count)?,
        total_duration: parse_number("duration", duration)?,
    })
}

/// Parse a `source,lineno,name,returnline` segment
///
/// **Private** - internal helper for parse_stack_line
fn parse_frame(segment: &str, config: &PathConfig) -> Result<Frame, ParseError> {
    let mut fields = segment.split(SUBFIELD_SEPARATOR);
    let (Some(source), Some(lineno), Some(name), Some(return_line)) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(ParseError::MalformedFrame(segment.to_string()));
    };

    Ok(Frame {
        source: config.normalize(source),
        lineno: parse_number("lineno", lineno)?,
        name: name.to_string(),
        return_line: parse_number("return line", return_line)?,
    })
}

/// Parse a numeric field, naming the field on failure
///
/// **Private** - internal utility
fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T, ParseError> {
    value.trim().parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
