//! Output sinks
//!
//! The pipeline and the retrieval client write through [`Sink`], so they
//! never touch the filesystem directly. [`TsvSink`] writes the two protein
//! tables and the failure log; [`MemorySink`] keeps everything in memory.

use crate::architecture::ArchitectureSummary;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tcsarch_common::types::{ProteinKind, ProteinRecord};
use tcsarch_common::Result;

/// Column names of the protein tables, in order
pub const TABLE_HEADERS: [&str; 8] = [
    "Genome_id",
    "NCBI_id",
    "MiST_id",
    "protein_length",
    "domain_architecture",
    "sensors_or_regulators",
    "domain_counts",
    "domain_combinations",
];

/// One row of a protein table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub genome_id: String,
    pub sequence_version: String,
    pub stable_id: String,
    pub protein_length: i64,
    pub architecture: String,
    pub sensors_or_regulators: String,
    pub domain_counts: String,
    pub domain_combinations: String,
}

impl OutputRow {
    pub fn new(record: &ProteinRecord, summary: ArchitectureSummary) -> Self {
        Self {
            genome_id: record.genome_id.clone(),
            sequence_version: record.sequence_version.clone(),
            stable_id: record.stable_id.clone(),
            protein_length: record.protein_length,
            architecture: summary.architecture,
            sensors_or_regulators: summary.sensors_or_regulators,
            domain_counts: summary.domain_counts,
            domain_combinations: summary.domain_combination,
        }
    }
}

/// Destination for protein rows and failed genome ids
pub trait Sink {
    fn append_record(&mut self, kind: ProteinKind, row: &OutputRow) -> Result<()>;

    /// Record a genome whose retrieval exhausted its retries
    fn append_failure(&mut self, genome_id: &str) -> Result<()>;

    /// Persist buffered output; called after every genome
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// In-memory sink
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<(ProteinKind, OutputRow)>,
    pub failures: Vec<String>,
}

impl MemorySink {
    pub fn rows(&self, kind: ProteinKind) -> impl Iterator<Item = &OutputRow> {
        self.records
            .iter()
            .filter(move |(k, _)| *k == kind)
            .map(|(_, row)| row)
    }
}

impl Sink for MemorySink {
    fn append_record(&mut self, kind: ProteinKind, row: &OutputRow) -> Result<()> {
        self.records.push((kind, row.clone()));
        Ok(())
    }

    fn append_failure(&mut self, genome_id: &str) -> Result<()> {
        self.failures.push(genome_id.to_string());
        Ok(())
    }
}

/// File locations for [`TsvSink`]
#[derive(Debug, Clone)]
pub struct TsvPaths {
    pub sensor_kinases: PathBuf,
    pub response_regulators: PathBuf,
    pub failures: PathBuf,
}

/// Tab-separated protein tables plus an append-only failure log
pub struct TsvSink {
    sensor_kinases: csv::Writer<File>,
    response_regulators: csv::Writer<File>,
    failures_path: PathBuf,
}

impl TsvSink {
    /// Open the tables.
    ///
    /// With `resume` the tables are appended to as they are; otherwise they
    /// are truncated and given a header row. The failure log is always
    /// appended to.
    pub fn open(paths: &TsvPaths, resume: bool) -> Result<Self> {
        Ok(Self {
            sensor_kinases: open_table(&paths.sensor_kinases, resume)?,
            response_regulators: open_table(&paths.response_regulators, resume)?,
            failures_path: paths.failures.clone(),
        })
    }
}

fn open_table(path: &Path, resume: bool) -> Result<csv::Writer<File>> {
    let file = if resume {
        OpenOptions::new().create(true).append(true).open(path)?
    } else {
        File::create(path)?
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(file);

    if !resume {
        writer.write_record(TABLE_HEADERS)?;
        writer.flush()?;
    }

    Ok(writer)
}

impl Sink for TsvSink {
    fn append_record(&mut self, kind: ProteinKind, row: &OutputRow) -> Result<()> {
        let writer = match kind {
            ProteinKind::SensorKinase => &mut self.sensor_kinases,
            ProteinKind::ResponseRegulator => &mut self.response_regulators,
        };
        writer.serialize(row)?;
        Ok(())
    }

    fn append_failure(&mut self, genome_id: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.failures_path)?;
        writeln!(file, "{}", genome_id)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.sensor_kinases.flush()?;
        self.response_regulators.flush()?;
        Ok(())
    }
}
