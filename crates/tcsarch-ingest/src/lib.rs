//! TCSArch Ingest Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Retrieves two-component signaling proteins from the MiST genome database
//! and reduces their raw Pfam hits to a gapless domain architecture.
//!
//! # Components
//!
//! - [`mist`]: paginated retrieval client with bounded retry
//! - [`architecture`]: overlap resolution, hole annotation, HisKA inference,
//!   and formatting of the resulting architecture
//! - [`sink`]: where records and failed genome ids end up
//! - [`pipeline`]: ties the above together, one genome at a time
//!
//! # Example
//!
//! ```no_run
//! use tcsarch_ingest::architecture::Normalizer;
//! use tcsarch_ingest::config::MistConfig;
//! use tcsarch_ingest::mist::{HttpTransport, MistClient};
//! use tcsarch_ingest::pipeline::Pipeline;
//! use tcsarch_ingest::sink::MemorySink;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = MistConfig::default();
//!     let client = MistClient::new(HttpTransport::new(&config)?, config);
//!     let pipeline = Pipeline::new(client, Normalizer::default());
//!
//!     let mut sink = MemorySink::default();
//!     pipeline.run_genome("GCF_000006765.1", &mut sink).await?;
//!     Ok(())
//! }
//! ```

pub mod architecture;
pub mod config;
pub mod genomes;
pub mod mist;
pub mod pipeline;
pub mod sink;
