//! Common types used across TCSArch

use serde::{Deserialize, Serialize};

/// Name given to unannotated stretches in an architecture string.
pub const HOLE_NAME: &str = "hole";

/// Name given to an inferred, uncalled dimerization domain.
pub const INFERRED_HISKA_NAME: &str = "<HisKA>";

// ============================================================================
// Domain Hits
// ============================================================================

/// One raw match reported by the domain scanner for a protein.
///
/// Coordinates are 1-based and inclusive. The envelope always contains the
/// alignment: `env_from <= ali_from <= ali_to <= env_to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainHit {
    /// Domain family identifier (e.g. "HATPase_c")
    pub name: String,

    pub ali_from: i64,
    pub ali_to: i64,
    pub env_from: i64,
    pub env_to: i64,

    /// Independent e-value; lower is more confident
    pub significance: Option<f64>,
}

impl DomainHit {
    pub fn new(
        name: impl Into<String>,
        ali_from: i64,
        ali_to: i64,
        env_from: i64,
        env_to: i64,
        significance: Option<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            ali_from,
            ali_to,
            env_from,
            env_to,
            significance,
        }
    }

    /// Length of the alignment region as `ali_to - ali_from`
    pub fn alignment_span(&self) -> i64 {
        self.ali_to - self.ali_from
    }
}

// ============================================================================
// Annotated Segments
// ============================================================================

/// One element of a normalized domain architecture.
///
/// Segments of one protein are ordered by `env_from` and do not overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// A scanner call that survived overlap resolution
    Domain {
        name: String,
        env_from: i64,
        env_to: i64,
    },

    /// A dimerization domain placed by inference; the name is bracket-marked
    Inferred {
        name: String,
        env_from: i64,
        env_to: i64,
    },

    /// An unannotated stretch at least one minimum domain length long
    Hole { env_from: i64, env_to: i64 },
}

impl Segment {
    pub fn hole(env_from: i64, env_to: i64) -> Self {
        Segment::Hole { env_from, env_to }
    }

    pub fn inferred_hiska(env_from: i64, env_to: i64) -> Self {
        Segment::Inferred {
            name: INFERRED_HISKA_NAME.to_string(),
            env_from,
            env_to,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Segment::Domain { name, .. } | Segment::Inferred { name, .. } => name,
            Segment::Hole { .. } => HOLE_NAME,
        }
    }

    pub fn env_from(&self) -> i64 {
        match self {
            Segment::Domain { env_from, .. }
            | Segment::Inferred { env_from, .. }
            | Segment::Hole { env_from, .. } => *env_from,
        }
    }

    pub fn env_to(&self) -> i64 {
        match self {
            Segment::Domain { env_to, .. }
            | Segment::Inferred { env_to, .. }
            | Segment::Hole { env_to, .. } => *env_to,
        }
    }

    pub fn is_hole(&self) -> bool {
        matches!(self, Segment::Hole { .. })
    }

    /// Name with inference brackets removed ("<HisKA>" -> "HisKA")
    pub fn family_name(&self) -> &str {
        let name = self.name();
        let name = name.strip_prefix('<').unwrap_or(name);
        name.strip_suffix('>').unwrap_or(name)
    }
}

impl From<&DomainHit> for Segment {
    fn from(hit: &DomainHit) -> Self {
        Segment::Domain {
            name: hit.name.clone(),
            env_from: hit.env_from,
            env_to: hit.env_to,
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.name(), self.env_from(), self.env_to())
    }
}

// ============================================================================
// Signaling Classification
// ============================================================================

/// Two-component protein class; each class is written to its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProteinKind {
    /// Histidine kinases (classic and hybrid)
    SensorKinase,
    /// Response regulators (classic and hybrid)
    ResponseRegulator,
}

impl std::fmt::Display for ProteinKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProteinKind::SensorKinase => write!(f, "sensKinase"),
            ProteinKind::ResponseRegulator => write!(f, "respReg"),
        }
    }
}

/// Signaling rank under the `tcp` (two-component) category of the
/// annotation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalRank {
    /// Histidine kinase
    Hk,
    /// Hybrid histidine kinase
    Hhk,
    /// Response regulator
    Rr,
    /// Hybrid response regulator
    Hrr,
}

impl SignalRank {
    /// Ranks in retrieval order
    pub const ALL: [SignalRank; 4] = [
        SignalRank::Hk,
        SignalRank::Hhk,
        SignalRank::Rr,
        SignalRank::Hrr,
    ];

    /// Identifier used by the service in counts and filters
    pub fn as_str(self) -> &'static str {
        match self {
            SignalRank::Hk => "hk",
            SignalRank::Hhk => "hhk",
            SignalRank::Rr => "rr",
            SignalRank::Hrr => "hrr",
        }
    }

    pub fn protein_kind(self) -> ProteinKind {
        match self {
            SignalRank::Hk | SignalRank::Hhk => ProteinKind::SensorKinase,
            SignalRank::Rr | SignalRank::Hrr => ProteinKind::ResponseRegulator,
        }
    }
}

impl std::fmt::Display for SignalRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Protein Records
// ============================================================================

/// A normalized protein, ready to be formatted into an output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProteinRecord {
    /// Genome the protein was retrieved for
    pub genome_id: String,

    /// Sequence version identifier (NCBI accession.version)
    pub sequence_version: String,

    /// Stable protein identifier in the annotation service
    pub stable_id: String,

    /// Protein length in residues
    pub protein_length: i64,

    pub segments: Vec<Segment>,
}
