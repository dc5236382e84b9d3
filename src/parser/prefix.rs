//! Installation prefix inference.
//!
//! A typical LOUD installation lives somewhere like
//! `C:\program files (x86)\steam\steamapps\common\supreme commander forged alliance\LOUD`,
//! and the profiler records every source as an absolute path:
//!
//! ```text
//! @c:\program files (x86)\...\supreme commander forged alliance\LOUD\gamedata\lua\lua\siminit.lua
//! ```
//!
//! We locate the sim entry point, walk back to the directory that holds the
//! game folder and to the `@` that opens the path. Everything in between is
//! the prefix shared by all frames.

use super::schema::PathConfig;
use crate::utils::config::{
    MARKER_LOOKBACK, PATH_MARKER, SENTINEL_SUFFIX, SEPARATOR_LOOKBACK, UNIX_SEPARATOR,
    WINDOWS_SEPARATOR,
};
use crate::utils::error::ParseError;
use log::{debug, warn};

/// Infer the path separator and installation prefix of a profiler log
///
/// **Public** - called once per log before any line is parsed
///
/// # Arguments
/// * `data` - The full log text
///
/// # Returns
/// The separator used by the log and the prefix to strip from sources
///
/// # Errors
/// * `ParseError::UnsupportedInput` - The sentinel path is absent
pub fn infer_path_config(data: &str) -> Result<PathConfig, ParseError> {
    let (separator, sentinel_pos) = find_sentinel(data).ok_or(ParseError::UnsupportedInput)?;
    let boundary = match rfind_within(data, separator, sentinel_pos, SEPARATOR_LOOKBACK) {
        Some(pos) => pos,
        None => {
            warn!("No separator before the sentinel path, using the sentinel itself as boundary");
            sentinel_pos
        }
    };

    let prefix = match rfind_within(data, PATH_MARKER, boundary, MARKER_LOOKBACK) {
        Some(start) => data.get(start..boundary).unwrap_or_default(),
        None => {
            warn!("No path marker found before the installation directory, sources are kept as-is");
            ""
        }
    };

    debug!("Inferred separator {:?} and prefix {:?}", separator, prefix);

    Ok(PathConfig::new(separator, prefix))
}

/// Find the sentinel path, trying the Windows spelling first
///
/// **Private** - internal helper for infer_path_config
fn find_sentinel(data: &str) -> Option<(char, usize)> {
    [WINDOWS_SEPARATOR, UNIX_SEPARATOR]
        .into_iter()
        .find_map(|separator| {
            let needle = sentinel_for(separator);
            data.find(&needle).map(|pos| (separator, pos))
        })
}

/// Sentinel suffix spelled with the given separator, leading separator included
///
/// **Private** - internal helper for find_sentinel
fn sentinel_for(separator: char) -> String {
    let mut needle = String::with_capacity(SENTINEL_SUFFIX.len() + 1);
    needle.push(separator);
    needle.extend(SENTINEL_SUFFIX.chars().map(|c| {
        if c == UNIX_SEPARATOR {
            separator
        } else {
            c
        }
    }));
    needle
}

/// Last occurrence of `needle` among the `lookback` characters before `end`
///
/// Windows are counted in characters, so non-ASCII install paths do not
/// shrink them. Returns a byte index into `data`.
///
/// **Private** - internal utility
fn rfind_within(data: &str, needle: char, end: usize, lookback: usize) -> Option<usize> {
    data.get(..end)?
        .char_indices()
        .rev()
        .take(lookback)
        .find(|&(_, c)| c == needle)
        .map(|(pos, _)| pos)
}
