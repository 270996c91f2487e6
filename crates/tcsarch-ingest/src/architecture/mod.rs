// Domain Architecture Normalizer
//
// Raw scanner hits for a protein overlap, leave gaps, and sometimes miss the
// dimerization domain of a histidine kinase. Normalization runs in two steps:
//
// 1. overlap: one call per region (alignment coordinates, tolerance 10)
// 2. holes: holes for long unannotated stretches, `<HisKA>` inference in
//    front of an orphan catalytic domain (envelope coordinates)
//
// format renders the result into output fields and parses it back.

pub mod format;
pub mod holes;
pub mod overlap;
pub mod roles;

pub use format::{parse_architecture, ArchitectureSummary};
pub use roles::RoleTables;

use serde::{Deserialize, Serialize};
use tcsarch_common::types::{DomainHit, Segment};
use tcsarch_common::Result;

/// Maximum alignment overlap, in residues, between two distinct domains
pub const DEFAULT_OVERLAP_TOLERANCE: i64 = 10;

/// Shortest stretch reported as a hole
pub const DEFAULT_MIN_DOMAIN_LENGTH: i64 = 100;

/// Expected length of an undetected HisKA domain
pub const DEFAULT_MIN_HISKA_LENGTH: i64 = 150;

/// Thresholds used during normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerParams {
    pub overlap_tolerance: i64,
    pub min_domain_length: i64,
    pub min_hiska_length: i64,
}

impl Default for NormalizerParams {
    fn default() -> Self {
        Self {
            overlap_tolerance: DEFAULT_OVERLAP_TOLERANCE,
            min_domain_length: DEFAULT_MIN_DOMAIN_LENGTH,
            min_hiska_length: DEFAULT_MIN_HISKA_LENGTH,
        }
    }
}

/// Reduces raw hits to a gapless domain architecture
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    roles: RoleTables,
    params: NormalizerParams,
}

impl Normalizer {
    pub fn new(roles: RoleTables, params: NormalizerParams) -> Self {
        Self { roles, params }
    }

    /// Normalize one protein's hits.
    ///
    /// Hits are put in `ali_from` order for overlap resolution and the
    /// survivors in `env_from` order for annotation; both sorts are stable.
    /// Segments come out ordered by `env_from`. Holes and inferred domains
    /// never overlap their neighbours, while domains keep their scanner
    /// envelopes, which may overlap when the alignments nearly touch.
    /// An empty list yields no segments.
    pub fn normalize(&self, protein: &str, mut hits: Vec<DomainHit>) -> Result<Vec<Segment>> {
        hits.sort_by_key(|h| h.ali_from);

        let mut resolved =
            overlap::resolve_overlaps(protein, &hits, self.params.overlap_tolerance)?;
        resolved.sort_by_key(|h| h.env_from);

        Ok(holes::annotate(&resolved, &self.roles, &self.params))
    }

    pub fn summarize(&self, segments: &[Segment]) -> ArchitectureSummary {
        ArchitectureSummary::new(segments, &self.roles)
    }
}
