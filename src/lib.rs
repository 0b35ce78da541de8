//! Glyphsnap - Library for emoji registry snapshots and snapshot comparison
//!
//! This library provides functionality to:
//! - Parse Unicode emoji-test registry files into typed records
//! - Render each fully-qualified sequence as a PNG glyph snapshot
//! - Compare two snapshot directories and record pixel-diff previews

pub mod cli;
pub mod compare;
pub mod config;
pub mod diff;
pub mod glyph;
pub mod output;
pub mod pipeline;
pub mod registry;
pub mod terminal;
