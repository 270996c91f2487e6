//! Hole annotation and HisKA inference
//!
//! Turns resolved hits into the final segment sequence. Unannotated
//! stretches of at least the minimum domain length become `hole` segments.
//! When a kinase has a confidently called catalytic domain but no
//! dimerization domain, the gap in front of the catalytic domain is assumed
//! to hold an undetected HisKA and is marked as `<HisKA>`.

use super::roles::RoleTables;
use super::NormalizerParams;
use tcsarch_common::types::{DomainHit, Segment};

/// Build the segment sequence for hits ordered by position.
///
/// HisKA inference applies only when a catalytic hit exists, at least one
/// hit precedes it, and no dimerization hit is present. Every other layout
/// (complete kinase core, catalytic domain first, dimerization domain only,
/// response regulators, unrecognized proteins) is gap-filled from residue 1.
pub fn annotate(hits: &[DomainHit], roles: &RoleTables, params: &NormalizerParams) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(hits.len() * 2);

    let dimerization = hits.iter().position(|h| roles.is_dimerization(&h.name));
    let catalytic = hits.iter().position(|h| roles.is_catalytic(&h.name));

    match (catalytic, dimerization) {
        (Some(cat), None) if cat > 0 => {
            let catalytic_hit = &hits[cat];

            fill_gaps(&hits[..cat], 1, 1, params.min_domain_length, &mut segments);
            infer_hiska(&hits[cat - 1], catalytic_hit, params, &mut segments);
            fill_gaps(
                &hits[cat + 1..],
                catalytic_hit.env_to,
                catalytic_hit.env_to + 1,
                params.min_domain_length,
                &mut segments,
            );
        },
        _ => fill_gaps(hits, 1, 1, params.min_domain_length, &mut segments),
    }

    segments
}

/// Emit `hits` with holes in front of them where the gap is long enough.
///
/// The leading gap is measured from `lead_anchor` and needs to exceed
/// `min_domain_length`; its hole starts at `hole_start`, the first residue
/// not covered by anything already emitted. Gaps between hits need to reach
/// `min_domain_length`.
fn fill_gaps(
    hits: &[DomainHit],
    lead_anchor: i64,
    hole_start: i64,
    min_domain_length: i64,
    out: &mut Vec<Segment>,
) {
    let Some((first, rest)) = hits.split_first() else {
        return;
    };

    if first.env_from - lead_anchor > min_domain_length {
        out.push(Segment::hole(hole_start, first.env_from - 1));
    }
    out.push(Segment::from(first));

    let mut previous = first;
    for hit in rest {
        if hit.env_from - previous.env_to >= min_domain_length {
            out.push(Segment::hole(previous.env_to + 1, hit.env_from - 1));
        }
        out.push(Segment::from(hit));
        previous = hit;
    }
}

/// Fill the gap between `penultimate` and the catalytic hit with an inferred
/// HisKA of `min_hiska_length` residues, preceded by a hole when the
/// remainder is itself a full domain length.
fn infer_hiska(
    penultimate: &DomainHit,
    catalytic: &DomainHit,
    params: &NormalizerParams,
    out: &mut Vec<Segment>,
) {
    let gap = catalytic.env_from - penultimate.env_to;
    let hole_end = penultimate.env_to + (gap - params.min_hiska_length);

    if gap >= params.min_hiska_length + params.min_domain_length {
        out.push(Segment::hole(penultimate.env_to + 1, hole_end));
    }

    // gaps shorter than a HisKA are taken whole
    let start = (hole_end + 1).max(penultimate.env_to + 1);
    let end = catalytic.env_from - 1;
    if start <= end {
        out.push(Segment::inferred_hiska(start, end));
    }

    out.push(Segment::from(catalytic));
}
