//! MiST endpoint URL builders

use tcsarch_common::types::SignalRank;

/// Build the signal transduction matrix URL for one page of components
pub fn stp_matrix_url(base_url: &str, genome_id: &str, page: u32, per_page: u32) -> String {
    format!(
        "{}{}/stp-matrix?page={}&per_page={}",
        base_url,
        urlencoding::encode(genome_id),
        page,
        per_page
    )
}

/// Build the signal genes URL for one page of a component's genes
pub fn signal_genes_url(
    base_url: &str,
    genome_id: &str,
    component_id: i64,
    rank: SignalRank,
    page: u32,
    per_page: u32,
) -> String {
    format!(
        "{}{}/signal-genes?where.component_id={}&where.ranks=tcp,{}&count&page={}&per_page={}&fields.Gene.Aseq=pfam31",
        base_url,
        urlencoding::encode(genome_id),
        component_id,
        rank,
        page,
        per_page
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://mib-jouline-db.asc.ohio-state.edu/v1/genomes/";

    #[test]
    fn test_stp_matrix_url() {
        assert_eq!(
            stp_matrix_url(BASE, "GCF_000006765.1", 3, 100),
            "https://mib-jouline-db.asc.ohio-state.edu/v1/genomes/GCF_000006765.1/stp-matrix?page=3&per_page=100"
        );
    }

    #[test]
    fn test_signal_genes_url() {
        assert_eq!(
            signal_genes_url(BASE, "GCF_000006765.1", 4512, SignalRank::Hhk, 1, 100),
            "https://mib-jouline-db.asc.ohio-state.edu/v1/genomes/GCF_000006765.1/signal-genes?where.component_id=4512&where.ranks=tcp,hhk&count&page=1&per_page=100&fields.Gene.Aseq=pfam31"
        );
    }

    #[test]
    fn test_genome_id_is_encoded() {
        let url = stp_matrix_url("http://localhost/", "odd id/1", 1, 10);
        assert_eq!(url, "http://localhost/odd%20id%2F1/stp-matrix?page=1&per_page=10");
    }
}
