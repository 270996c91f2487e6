//! MiST API payloads
//!
//! Only the fields the pipeline reads are modelled; everything else in the
//! responses is ignored.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tcsarch_common::types::{DomainHit, SignalRank};
use tcsarch_common::{Result, TcsError};

/// Category under which two-component ranks are counted
pub const TWO_COMPONENT_CATEGORY: &str = "tcp";

/// One page of the signal transduction matrix
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StpMatrixPage {
    #[serde(default)]
    pub components: Vec<Component>,

    /// Genome-wide counts per category for the components on this page
    #[serde(default)]
    pub counts: HashMap<String, Value>,
}

impl StpMatrixPage {
    /// Components on this page that carry at least one protein of `rank`
    pub fn qualifying(self, rank: SignalRank) -> Vec<Component> {
        if !self.counts.contains_key(TWO_COMPONENT_CATEGORY) {
            return Vec::new();
        }

        self.components
            .into_iter()
            .filter(|c| c.rank_count(rank).is_some_and(|count| count > 0))
            .collect()
    }
}

/// A chromosome, scaffold, or contig
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Component {
    pub id: i64,

    #[serde(default)]
    pub counts: HashMap<String, Value>,
}

impl Component {
    pub fn rank_count(&self, rank: SignalRank) -> Option<u64> {
        self.counts
            .get(TWO_COMPONENT_CATEGORY)?
            .get(rank.as_str())?
            .as_u64()
    }
}

/// Read one entry of a signal-genes page.
///
/// Entries without a `Gene` are not signaling proteins and yield `None`.
/// A gene that does not match the expected shape yields `MalformedGene`, so
/// one bad record never takes its neighbours on the page down with it.
pub fn parse_signal_gene(entry: &Value) -> Option<Result<Gene>> {
    let gene = entry.get("Gene").filter(|g| !g.is_null())?;

    Some(Gene::deserialize(gene).map_err(|e| {
        let protein = gene
            .get("stable_id")
            .and_then(Value::as_str)
            .unwrap_or("<unknown>");
        TcsError::malformed_gene(protein, e.to_string())
    }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct Gene {
    /// MiST protein identifier
    pub stable_id: String,

    /// NCBI accession.version
    #[serde(default)]
    pub version: Option<String>,

    /// Coding sequence length in nucleotides, stop codon included
    #[serde(default)]
    pub length: Option<i64>,

    #[serde(rename = "Aseq")]
    pub aseq: Option<Aseq>,
}

impl Gene {
    /// Residues encoded, without the stop codon
    pub fn protein_length(&self) -> Result<i64> {
        self.length
            .map(|length| length / 3 - 1)
            .ok_or_else(|| TcsError::malformed_gene(&self.stable_id, "missing length"))
    }

    /// Pfam hits as delivered, if the gene was annotated
    pub fn pfam_hits(&self) -> Option<&[Value]> {
        self.aseq.as_ref()?.pfam31.as_deref()
    }

    /// Validate the Pfam hits into domain hits, one by one
    pub fn domain_hits(&self) -> Result<Vec<DomainHit>> {
        self.pfam_hits()
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let raw = RawHit::deserialize(value).map_err(|e| {
                    TcsError::malformed_hit(&self.stable_id, index, format!("unreadable hit: {}", e))
                })?;
                raw.to_domain_hit(&self.stable_id, index)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Aseq {
    /// Kept as raw values so each hit is validated on its own
    #[serde(default)]
    pub pfam31: Option<Vec<Value>>,
}

/// A Pfam hit as delivered by the API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawHit {
    pub name: Option<String>,
    pub ali_from: Option<i64>,
    pub ali_to: Option<i64>,
    pub env_from: Option<i64>,
    pub env_to: Option<i64>,
    pub i_evalue: Option<f64>,
}

impl RawHit {
    pub fn to_domain_hit(&self, protein: &str, index: usize) -> Result<DomainHit> {
        let name = self
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| TcsError::malformed_hit(protein, index, "hit lacks name"))?;

        let coordinate = |value: Option<i64>, field: &str| {
            value.ok_or_else(|| {
                TcsError::malformed_hit(protein, index, format!("{} lacks {}", name, field))
            })
        };

        let hit = DomainHit::new(
            name.clone(),
            coordinate(self.ali_from, "ali_from")?,
            coordinate(self.ali_to, "ali_to")?,
            coordinate(self.env_from, "env_from")?,
            coordinate(self.env_to, "env_to")?,
            self.i_evalue,
        );

        let ordered = hit.env_from <= hit.ali_from
            && hit.ali_from <= hit.ali_to
            && hit.ali_to <= hit.env_to;
        if !ordered {
            return Err(TcsError::malformed_hit(
                protein,
                index,
                format!(
                    "{} has inconsistent coordinates: ali {}-{}, env {}-{}",
                    hit.name, hit.ali_from, hit.ali_to, hit.env_from, hit.env_to
                ),
            ));
        }

        Ok(hit)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_qualifying_components() {
        let page: StpMatrixPage = serde_json::from_value(json!({
            "components": [
                { "id": 1, "counts": { "tcp": { "hk": 4, "rr": 6 } } },
                { "id": 2, "counts": { "tcp": { "rr": 1 } } },
                { "id": 3, "counts": { "tcp": { "hk": 0 } } },
                { "id": 4, "counts": { "ocp": 12 } }
            ],
            "counts": { "tcp": { "hk": 4, "rr": 7 } }
        }))
        .unwrap();

        let ids: Vec<i64> = page.qualifying(SignalRank::Hk).iter().map(|c| c.id).collect();
        assert_eq!(ids, [1]);
    }

    #[test]
    fn test_no_tcp_counts_means_no_components() {
        let page: StpMatrixPage = serde_json::from_value(json!({
            "components": [{ "id": 1, "counts": { "tcp": { "hk": 4 } } }],
            "counts": { "ocp": 9 }
        }))
        .unwrap();
        assert!(page.qualifying(SignalRank::Hk).is_empty());
    }

    #[test]
    fn test_gene_hits_and_length() {
        let entry = json!({
            "Gene": {
                "stable_id": "GCF_000006765.1-PA0464",
                "version": "NP_249155.1",
                "length": 1497,
                "Aseq": { "pfam31": [
                    { "name": "HATPase_c", "ali_from": 380, "ali_to": 480,
                      "env_from": 378, "env_to": 482, "i_evalue": 2.1e-25 }
                ] }
            }
        });

        let gene = parse_signal_gene(&entry).unwrap().unwrap();
        assert_eq!(gene.protein_length().unwrap(), 498);
        let hits = gene.domain_hits().unwrap();
        assert_eq!(hits[0].name, "HATPase_c");
        assert_eq!(hits[0].significance, Some(2.1e-25));
    }

    #[test]
    fn test_gene_without_aseq() {
        let entry = json!({ "Gene": { "stable_id": "x", "length": 30 } });
        let gene = parse_signal_gene(&entry).unwrap().unwrap();
        assert!(gene.pfam_hits().is_none());
        assert!(gene.domain_hits().unwrap().is_empty());
    }

    #[test]
    fn test_entry_without_gene_is_skipped() {
        assert!(parse_signal_gene(&json!({ "id": 5 })).is_none());
        assert!(parse_signal_gene(&json!({ "Gene": null })).is_none());
    }

    #[test]
    fn test_missing_length_is_malformed_gene() {
        let entry = json!({ "Gene": { "stable_id": "WP_7", "Aseq": { "pfam31": [] } } });
        let gene = parse_signal_gene(&entry).unwrap().unwrap();

        let err = gene.protein_length().unwrap_err();
        assert!(matches!(err, TcsError::MalformedGene { ref protein, .. } if protein == "WP_7"));
    }

    #[test]
    fn test_unreadable_gene_names_its_protein() {
        let entry = json!({ "Gene": { "stable_id": "WP_8", "length": "long" } });
        let err = parse_signal_gene(&entry).unwrap().unwrap_err();
        assert!(matches!(err, TcsError::MalformedGene { ref protein, .. } if protein == "WP_8"));
    }

    #[test]
    fn test_bad_hit_is_reported_with_its_index() {
        let entry = json!({ "Gene": { "stable_id": "WP_9", "length": 900, "Aseq": { "pfam31": [
            { "name": "PAS", "ali_from": 10, "ali_to": 60, "env_from": 8, "env_to": 62, "i_evalue": 1e-5 },
            { "ali_from": 100, "ali_to": 160, "env_from": 98, "env_to": 162, "i_evalue": 1e-9 },
            { "name": "HATPase_c", "ali_from": 200.5, "ali_to": 300, "env_from": 198, "env_to": 302 }
        ] } } });
        let gene = parse_signal_gene(&entry).unwrap().unwrap();

        let err = gene.domain_hits().unwrap_err();
        assert!(matches!(err, TcsError::MalformedHit { index: 1, ref protein, .. } if protein == "WP_9"));
        assert!(err.to_string().contains("lacks name"));
    }

    #[test]
    fn test_non_integer_coordinate_is_malformed_hit() {
        let entry = json!({ "Gene": { "stable_id": "WP_9", "length": 900, "Aseq": { "pfam31": [
            { "name": "HATPase_c", "ali_from": 200.5, "ali_to": 300, "env_from": 198, "env_to": 302 }
        ] } } });
        let gene = parse_signal_gene(&entry).unwrap().unwrap();

        let err = gene.domain_hits().unwrap_err();
        assert!(matches!(err, TcsError::MalformedHit { index: 0, .. }));
    }

    #[test]
    fn test_raw_hit_missing_coordinate() {
        let raw = RawHit {
            name: Some("PAS".to_string()),
            ali_from: Some(10),
            ali_to: None,
            env_from: Some(5),
            env_to: Some(90),
            i_evalue: Some(1e-3),
        };
        let err = raw.to_domain_hit("WP_9", 2).unwrap_err();
        assert!(err.to_string().contains("ali_to"));
        assert!(matches!(err, TcsError::MalformedHit { index: 2, .. }));
    }

    #[test]
    fn test_raw_hit_envelope_must_contain_alignment() {
        let raw = RawHit {
            name: Some("PAS".to_string()),
            ali_from: Some(10),
            ali_to: Some(95),
            env_from: Some(12),
            env_to: Some(90),
            i_evalue: None,
        };
        assert!(raw.to_domain_hit("WP_9", 0).is_err());
    }
}
