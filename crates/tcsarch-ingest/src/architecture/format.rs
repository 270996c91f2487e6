//! Architecture formatting
//!
//! Renders a segment sequence into the text fields of an output row, and
//! parses the architecture field back.

use super::roles::RoleTables;
use std::collections::BTreeMap;
use tcsarch_common::types::{Segment, HOLE_NAME};
use tcsarch_common::{Result, TcsError};

/// Text fields derived from one protein's segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchitectureSummary {
    /// `name:env_from-env_to` for every segment, in order
    pub architecture: String,

    /// Sensor, output, and other non-core domain names, in order
    pub sensors_or_regulators: String,

    /// `name:count` over all segment names, sorted by name
    pub domain_counts: String,

    /// Unique segment names, sorted; the protein's combination signature
    pub domain_combination: String,
}

impl ArchitectureSummary {
    pub fn new(segments: &[Segment], roles: &RoleTables) -> Self {
        let architecture = join(segments.iter().map(Segment::to_string));

        let sensors_or_regulators = join(
            segments
                .iter()
                .filter(|s| !s.is_hole() && !roles.is_core(s.family_name()))
                .map(|s| s.name().to_string()),
        );

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for segment in segments {
            *counts.entry(segment.name()).or_default() += 1;
        }

        let domain_counts = join(counts.iter().map(|(name, count)| format!("{}:{}", name, count)));
        let domain_combination = join(counts.keys().map(|name| name.to_string()));

        Self {
            architecture,
            sensors_or_regulators,
            domain_counts,
            domain_combination,
        }
    }
}

fn join(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(",")
}

/// Parse an architecture string produced by [`ArchitectureSummary`].
///
/// `hole` entries become holes and bracketed names become inferred domains.
/// Family names may contain `-` or `:`; the last `:` starts the coordinates.
pub fn parse_architecture(architecture: &str) -> Result<Vec<Segment>> {
    if architecture.is_empty() {
        return Ok(Vec::new());
    }

    architecture.split(',').map(parse_segment).collect()
}

fn parse_segment(entry: &str) -> Result<Segment> {
    let (name, range) = entry
        .rsplit_once(':')
        .ok_or_else(|| TcsError::parse(format!("Missing coordinates in '{}'", entry)))?;

    let (from, to) = range
        .split_once('-')
        .ok_or_else(|| TcsError::parse(format!("Malformed range in '{}'", entry)))?;

    let env_from: i64 = from
        .parse()
        .map_err(|_| TcsError::parse(format!("Invalid start coordinate in '{}'", entry)))?;
    let env_to: i64 = to
        .parse()
        .map_err(|_| TcsError::parse(format!("Invalid end coordinate in '{}'", entry)))?;

    if name.is_empty() {
        return Err(TcsError::parse(format!("Missing domain name in '{}'", entry)));
    }

    let segment = if name == HOLE_NAME {
        Segment::hole(env_from, env_to)
    } else if name.starts_with('<') && name.ends_with('>') {
        Segment::Inferred {
            name: name.to_string(),
            env_from,
            env_to,
        }
    } else {
        Segment::Domain {
            name: name.to_string(),
            env_from,
            env_to,
        }
    };

    Ok(segment)
}
