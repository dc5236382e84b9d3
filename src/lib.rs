//! Supcom Flame
//!
//! Converts the Lua profiler output of Supreme Commander: Forged Alliance
//! (LOUD) into folded stacks and flamegraphs.
//!
//! This crate provides the core implementation for the
//! `supcom-flame` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! supcom-flame convert loud.log -o loud.folded --flamegraph loud.svg
//! ```
//!
//! As a library, [`aggregator::build_forest`] turns raw log text into the
//! merged call tree and [`aggregator::build_collapsed_stacks`] folds it.

pub mod aggregator;
pub mod commands;
pub mod flamegraph;
pub mod output;
pub mod parser;
pub mod utils;
