//! Genome list input
//!
//! One genome per line, tab-separated; the genome id sits in a fixed column
//! (the second by default, after an organism or assembly label).

use std::path::Path;
use tcsarch_common::Result;
use tracing::warn;

/// 0-based column holding the genome id
pub const DEFAULT_GENOME_COLUMN: usize = 1;

/// Read genome ids from a file
pub fn read_genome_ids(path: &Path, column: usize) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_genome_ids(&content, column))
}

/// Extract genome ids from tab-separated lines, skipping blank lines and
/// lines that lack the column
pub fn parse_genome_ids(content: &str, column: usize) -> Vec<String> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| {
            match line.split('\t').nth(column).map(str::trim) {
                Some(id) if !id.is_empty() => Some(id.to_string()),
                _ => {
                    warn!(line = index + 1, column, "No genome id in line, skipping");
                    None
                },
            }
        })
        .collect()
}
