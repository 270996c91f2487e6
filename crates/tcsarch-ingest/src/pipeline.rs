//! Per-genome pipeline
//!
//! For each genome the four two-component ranks are retrieved in turn
//! (`hk`, `hhk`, `rr`, `hrr`); every gene is normalized, summarized, and
//! appended to the sink under its protein kind. Genomes are processed one
//! after the other.

use crate::architecture::Normalizer;
use crate::mist::{Gene, MistClient, Transport};
use crate::sink::{OutputRow, Sink};
use indicatif::ProgressBar;
use serde::Serialize;
use tcsarch_common::types::{ProteinRecord, SignalRank};
use tcsarch_common::Result;
use tracing::{debug, error, info};

/// Counters for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub genomes: usize,
    pub records: usize,

    /// Genes without Pfam hits
    pub skipped_proteins: usize,

    /// Genes whose hits could not be normalized
    pub malformed_proteins: usize,
}

impl RunSummary {
    fn absorb(&mut self, other: RunSummary) {
        self.genomes += other.genomes;
        self.records += other.records;
        self.skipped_proteins += other.skipped_proteins;
        self.malformed_proteins += other.malformed_proteins;
    }
}

pub struct Pipeline<T> {
    client: MistClient<T>,
    normalizer: Normalizer,
}

impl<T: Transport> Pipeline<T> {
    pub fn new(client: MistClient<T>, normalizer: Normalizer) -> Self {
        Self { client, normalizer }
    }

    /// Process every genome in order
    pub async fn run<S: Sink + ?Sized>(
        &self,
        genome_ids: &[String],
        sink: &mut S,
        progress: &ProgressBar,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for (number, genome_id) in genome_ids.iter().enumerate() {
            progress.set_message(genome_id.clone());
            info!(genome_number = number + 1, genome_id = %genome_id, "Processing genome");

            summary.absorb(self.run_genome(genome_id, sink).await?);
            progress.inc(1);
        }

        Ok(summary)
    }

    /// Retrieve, normalize, and write one genome
    pub async fn run_genome<S: Sink + ?Sized>(
        &self,
        genome_id: &str,
        sink: &mut S,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary {
            genomes: 1,
            ..RunSummary::default()
        };

        for rank in SignalRank::ALL {
            let genes = self.client.signal_genes(genome_id, rank, sink).await?;
            debug!(genome_id, %rank, genes = genes.len(), "Retrieved genes");

            for gene in genes {
                match gene.and_then(|gene| self.normalize_gene(genome_id, &gene)) {
                    Ok(Some(record)) => {
                        let row = OutputRow::new(&record, self.normalizer.summarize(&record.segments));
                        sink.append_record(rank.protein_kind(), &row)?;
                        summary.records += 1;
                    },
                    Ok(None) => summary.skipped_proteins += 1,
                    Err(e) if e.is_malformed() => {
                        error!(genome_id, error = %e, "Skipping protein");
                        summary.malformed_proteins += 1;
                    },
                    Err(e) => return Err(e),
                }
            }
        }

        sink.flush()?;
        info!(
            genome_id,
            records = summary.records,
            skipped = summary.skipped_proteins,
            malformed = summary.malformed_proteins,
            "Genome done"
        );

        Ok(summary)
    }

    /// Normalize a gene's Pfam hits; `None` when it has none
    pub fn normalize_gene(&self, genome_id: &str, gene: &Gene) -> Result<Option<ProteinRecord>> {
        let hits = gene.domain_hits()?;
        if hits.is_empty() {
            return Ok(None);
        }

        let protein_length = gene.protein_length()?;
        let segments = self.normalizer.normalize(&gene.stable_id, hits)?;

        Ok(Some(ProteinRecord {
            genome_id: genome_id.to_string(),
            sequence_version: gene.version.clone().unwrap_or_default(),
            stable_id: gene.stable_id.clone(),
            protein_length,
            segments,
        }))
    }
}
