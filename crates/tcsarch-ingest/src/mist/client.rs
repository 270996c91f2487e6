//! Paginated MiST client
//!
//! Every page request goes through the retry policy. When a request
//! exhausts its attempts the genome is written to the sink's failure log
//! and pagination of that resource ends; nothing is raised to the caller.

use super::endpoints::{signal_genes_url, stp_matrix_url};
use super::models::{parse_signal_gene, Component, Gene, StpMatrixPage};
use super::retry::RetryPolicy;
use super::transport::Transport;
use crate::config::MistConfig;
use crate::sink::Sink;
use serde_json::Value;
use tcsarch_common::types::SignalRank;
use tcsarch_common::Result;
use tracing::{debug, error, warn};

/// MiST API client over an injectable transport
pub struct MistClient<T> {
    transport: T,
    config: MistConfig,
    retry: RetryPolicy,
}

impl<T: Transport> MistClient<T> {
    pub fn new(transport: T, config: MistConfig) -> Self {
        let retry = RetryPolicy::new(config.max_attempts, config.retry_backoff());
        Self {
            transport,
            config,
            retry,
        }
    }

    /// Components of `genome_id` that carry at least one gene of `rank`
    pub async fn discover_components<S: Sink + ?Sized>(
        &self,
        genome_id: &str,
        rank: SignalRank,
        sink: &mut S,
    ) -> Result<Vec<Component>> {
        let mut components = Vec::new();

        for page in 1..=self.config.max_pages {
            let url = stp_matrix_url(&self.config.base_url, genome_id, page, self.config.per_page);
            let Some(value) = self.fetch_page(genome_id, &url, sink).await? else {
                break;
            };

            if let Some(name) = error_name(&value) {
                debug!(genome_id, page, error = name, "Component listing ended with error payload");
                break;
            }

            let matrix: StpMatrixPage = match serde_json::from_value(value) {
                Ok(matrix) => matrix,
                Err(e) => {
                    warn!(genome_id, page, error = %e, "Unexpected component page shape");
                    break;
                },
            };

            if matrix.components.is_empty() {
                break;
            }

            let qualifying = matrix.qualifying(rank);
            debug!(genome_id, %rank, page, qualifying = qualifying.len(), "Fetched component page");
            components.extend(qualifying);

            if page == self.config.max_pages {
                warn!(genome_id, max_pages = page, "Component listing hit the page limit");
            }
        }

        Ok(components)
    }

    /// Genes of `rank` on one component.
    ///
    /// Entries are read one by one; an entry that is not a valid gene comes
    /// back as its error and the rest of the page is kept.
    pub async fn fetch_genes<S: Sink + ?Sized>(
        &self,
        genome_id: &str,
        component_id: i64,
        rank: SignalRank,
        sink: &mut S,
    ) -> Result<Vec<Result<Gene>>> {
        let mut genes = Vec::new();

        for page in 1..=self.config.max_pages {
            let url = signal_genes_url(
                &self.config.base_url,
                genome_id,
                component_id,
                rank,
                page,
                self.config.per_page,
            );
            let Some(value) = self.fetch_page(genome_id, &url, sink).await? else {
                break;
            };

            if let Some(name) = error_name(&value) {
                debug!(genome_id, component_id, page, error = name, "Gene listing ended with error payload");
                break;
            }

            let entries = match value {
                Value::Array(entries) => entries,
                other => {
                    warn!(genome_id, component_id, page, payload = %other, "Unexpected gene page shape");
                    break;
                },
            };
            if entries.is_empty() {
                break;
            }

            debug!(genome_id, component_id, %rank, page, genes = entries.len(), "Fetched gene page");
            genes.extend(entries.iter().filter_map(parse_signal_gene));

            if page == self.config.max_pages {
                warn!(genome_id, component_id, max_pages = page, "Gene listing hit the page limit");
            }
        }

        Ok(genes)
    }

    /// All genes of `rank` in the genome, component by component
    pub async fn signal_genes<S: Sink + ?Sized>(
        &self,
        genome_id: &str,
        rank: SignalRank,
        sink: &mut S,
    ) -> Result<Vec<Result<Gene>>> {
        let components = self.discover_components(genome_id, rank, sink).await?;

        let mut genes = Vec::new();
        for component in &components {
            genes.extend(self.fetch_genes(genome_id, component.id, rank, sink).await?);
        }

        Ok(genes)
    }

    /// One page with retries; `None` once the attempts are exhausted
    async fn fetch_page<S: Sink + ?Sized>(
        &self,
        genome_id: &str,
        url: &str,
        sink: &mut S,
    ) -> Result<Option<Value>> {
        match self.retry.run(|| self.transport.get_json(url)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                error!(genome_id, url, error = %e, "Giving up on page after {} attempts", self.retry.max_attempts);
                sink.append_failure(genome_id)?;
                Ok(None)
            },
        }
    }
}

/// The `name` of an error-shaped payload
fn error_name(value: &Value) -> Option<&str> {
    value.as_object()?.get("name")?.as_str()
}
