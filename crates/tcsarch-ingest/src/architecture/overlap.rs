//! Overlap resolution
//!
//! Reduces a protein's hits to one call per region with a single left to
//! right sweep. The most recently kept hit is the "winner" that the next hit
//! is compared against; it is always the last element of the result.

use std::cmp::Ordering;
use tcsarch_common::types::DomainHit;
use tcsarch_common::{Result, TcsError};

/// Resolve competing calls in `hits`, which must be sorted by `ali_from`.
///
/// Consecutive hits whose alignments overlap by at most `tolerance` residues
/// are both kept. Larger overlaps are settled by significance (lower
/// e-value wins), then by the longer alignment; an exact tie keeps the
/// earlier hit. The winner replaces the loser in place.
pub fn resolve_overlaps(
    protein: &str,
    hits: &[DomainHit],
    tolerance: i64,
) -> Result<Vec<DomainHit>> {
    if hits.is_empty() {
        return Ok(Vec::new());
    }

    let mut kept: Vec<usize> = vec![0];
    let mut winner = 0;

    for next in 1..hits.len() {
        let overlap = hits[winner].ali_to - hits[next].ali_from;

        if overlap <= tolerance {
            kept.push(next);
            winner = next;
            continue;
        }

        let significant = more_significant(protein, hits, winner, next)?;
        if significant != winner {
            let last = kept.len() - 1;
            kept[last] = significant;
            winner = significant;
        }
    }

    Ok(kept.into_iter().map(|index| hits[index].clone()).collect())
}

/// Pick the index of the more confident of two overlapping hits
fn more_significant(
    protein: &str,
    hits: &[DomainHit],
    current: usize,
    candidate: usize,
) -> Result<usize> {
    let current_evalue = significance(protein, hits, current)?;
    let candidate_evalue = significance(protein, hits, candidate)?;

    let winner = match current_evalue.partial_cmp(&candidate_evalue) {
        Some(Ordering::Less) => current,
        Some(Ordering::Greater) => candidate,
        _ => {
            if hits[current].alignment_span() >= hits[candidate].alignment_span() {
                current
            } else {
                candidate
            }
        },
    };

    Ok(winner)
}

fn significance(protein: &str, hits: &[DomainHit], index: usize) -> Result<f64> {
    match hits[index].significance {
        Some(evalue) if !evalue.is_nan() => Ok(evalue),
        Some(_) => Err(TcsError::malformed_hit(
            protein,
            index,
            format!("{} has a NaN i_evalue", hits[index].name),
        )),
        None => Err(TcsError::malformed_hit(
            protein,
            index,
            format!(
                "{} has no i_evalue, which is required to resolve its overlap",
                hits[index].name
            ),
        )),
    }
}
