//! TCSArch Ingest - two-component domain architectures from MiST

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tcsarch_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use tcsarch_ingest::architecture::Normalizer;
use tcsarch_ingest::config::{Database, MistConfig};
use tcsarch_ingest::genomes::{read_genome_ids, DEFAULT_GENOME_COLUMN};
use tcsarch_ingest::mist::{HttpTransport, MistClient};
use tcsarch_ingest::pipeline::Pipeline;
use tcsarch_ingest::sink::{TsvPaths, TsvSink};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "tcsarch-ingest")]
#[command(author, version, about = "Domain architectures of two-component signaling proteins from MiST")]
struct Cli {
    /// Genome list, tab-separated, one genome per line
    #[arg(short, long)]
    input: PathBuf,

    /// Output table for histidine kinases
    #[arg(short = 'f', long, default_value = "output_HK.tsv")]
    hk_output: PathBuf,

    /// Output table for response regulators
    #[arg(short = 's', long, default_value = "output_RR.tsv")]
    rr_output: PathBuf,

    /// Genomes whose retrieval gave up are appended here
    #[arg(long, default_value = "timeout_genomes.txt")]
    failures: PathBuf,

    /// Genome database to query
    #[arg(short, long, value_enum, default_value_t = Database::Mist)]
    database: Database,

    /// 0-based column of the genome id in the input
    #[arg(long, default_value_t = DEFAULT_GENOME_COLUMN)]
    column: usize,

    /// Append to existing output tables instead of starting new ones
    #[arg(short = 'c', long = "continue")]
    resume: bool,

    /// Directory for log files
    #[arg(long, default_value = "./logs")]
    log_dir: PathBuf,

    /// Verbose output (debug level, with source locations)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // Environment variables take precedence
    let log_config = LogConfig::builder()
        .level(log_level)
        .output(LogOutput::Both)
        .log_dir(cli.log_dir.clone())
        .log_file_prefix("tcsarch-ingest")
        .include_location(cli.verbose)
        .build()
        .with_env_overrides()?;

    let _guard = init_logging(&log_config)?;

    let config = MistConfig::from_env(cli.database)?;
    let genome_ids = read_genome_ids(&cli.input, cli.column)
        .with_context(|| format!("Failed to read genome list {}", cli.input.display()))?;
    info!(genomes = genome_ids.len(), database = ?cli.database, "Starting retrieval");

    let paths = TsvPaths {
        sensor_kinases: cli.hk_output,
        response_regulators: cli.rr_output,
        failures: cli.failures,
    };
    let mut sink = TsvSink::open(&paths, cli.resume).context("Failed to open output tables")?;

    let transport = HttpTransport::new(&config).context("Failed to build HTTP client")?;
    let pipeline = Pipeline::new(MistClient::new(transport, config), Normalizer::default());

    let progress = ProgressBar::new(genome_ids.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("#>-"),
    );

    let summary = pipeline.run(&genome_ids, &mut sink, &progress).await?;
    progress.finish_with_message("done");

    info!(
        genomes = summary.genomes,
        records = summary.records,
        skipped = summary.skipped_proteins,
        malformed = summary.malformed_proteins,
        "Retrieval complete"
    );
    Ok(())
}
