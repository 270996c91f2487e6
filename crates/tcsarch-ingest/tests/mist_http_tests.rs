//! Retrieval against a mock MiST server
//!
//! Exercises the reqwest transport, the paginated client, and a full
//! pipeline run written to TSV files.

use serde_json::json;
use std::fs;
use tcsarch_ingest::architecture::Normalizer;
use tcsarch_ingest::config::MistConfig;
use tcsarch_ingest::mist::{HttpTransport, MistClient, Transport, TransportError};
use tcsarch_ingest::pipeline::Pipeline;
use tcsarch_ingest::sink::{MemorySink, TsvPaths, TsvSink, TABLE_HEADERS};
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn config_for(server: &MockServer) -> MistConfig {
    MistConfig {
        base_url: format!("{}/genomes/", server.uri()),
        max_attempts: 2,
        retry_backoff_secs: 0,
        timeout_secs: 5,
        ..MistConfig::default()
    }
}

fn component_page() -> serde_json::Value {
    json!({
        "components": [
            { "id": 42, "name": "NC_002516.2", "counts": { "tcp": { "hk": 1, "rr": 1 } } }
        ],
        "counts": { "tcp": { "hk": 1, "rr": 1 }, "ocp": 30 }
    })
}

fn kinase_gene() -> serde_json::Value {
    json!([{ "Gene": {
        "stable_id": "GCF_000006765.1-PA1611",
        "version": "NP_250302.1",
        "length": 2676,
        "Aseq": { "pfam31": [
            { "name": "HAMP", "ali_from": 190, "ali_to": 240, "env_from": 188, "env_to": 242, "i_evalue": 3.2e-9 },
            { "name": "HisKA", "ali_from": 250, "ali_to": 312, "env_from": 248, "env_to": 313, "i_evalue": 1.1e-15 },
            { "name": "HATPase_c", "ali_from": 360, "ali_to": 470, "env_from": 357, "env_to": 472, "i_evalue": 4.0e-25 },
            { "name": "Response_reg", "ali_from": 770, "ali_to": 880, "env_from": 768, "env_to": 881, "i_evalue": 2.0e-22 }
        ] }
    }}])
}

fn regulator_gene() -> serde_json::Value {
    json!([{ "Gene": {
        "stable_id": "GCF_000006765.1-PA4885",
        "version": "NP_253572.1",
        "length": 687,
        "Aseq": { "pfam31": [
            { "name": "Response_reg", "ali_from": 4, "ali_to": 110, "env_from": 2, "env_to": 112, "i_evalue": 1e-28 },
            { "name": "Trans_reg_C", "ali_from": 150, "ali_to": 220, "env_from": 148, "env_to": 222, "i_evalue": 5e-20 }
        ] }
    }}])
}

async fn mount_genome(server: &MockServer, genome: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/genomes/{}/stp-matrix", genome)))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(component_page()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/genomes/{}/signal-genes", genome)))
        .and(query_param("where.component_id", "42"))
        .and(query_param("where.ranks", "tcp,hk"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kinase_gene()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/genomes/{}/signal-genes", genome)))
        .and(query_param("where.component_id", "42"))
        .and(query_param("where.ranks", "tcp,rr"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(regulator_gene()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_http_transport_returns_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/genomes/GCF_1/stp-matrix"))
        .respond_with(ResponseTemplate::new(200).set_body_json(component_page()))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let transport = HttpTransport::new(&config).unwrap();
    let url = format!("{}GCF_1/stp-matrix?page=1&per_page=100", config.base_url);

    let value = transport.get_json(&url).await.unwrap();
    assert_eq!(value["components"][0]["id"], 42);
}

#[tokio::test]
async fn test_http_transport_not_found_is_error_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "name": "NotFoundError", "message": "Genome not found" })),
        )
        .mount(&server)
        .await;

    let config = config_for(&server);
    let transport = HttpTransport::new(&config).unwrap();

    let value = transport
        .get_json(&format!("{}missing/stp-matrix?page=1", config.base_url))
        .await
        .unwrap();
    assert_eq!(value["name"], "NotFoundError");
}

#[tokio::test]
async fn test_http_transport_not_found_without_body() {
    let server = MockServer::start().await;
    let config = config_for(&server);
    let transport = HttpTransport::new(&config).unwrap();

    let value = transport
        .get_json(&format!("{}missing/stp-matrix?page=1", config.base_url))
        .await
        .unwrap();
    assert!(value.get("name").is_some());
}

#[tokio::test]
async fn test_http_transport_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let transport = HttpTransport::new(&config).unwrap();

    let err = transport
        .get_json(&format!("{}GCF_1/stp-matrix?page=1", config.base_url))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Status { status: 503, .. }));
}

#[tokio::test]
async fn test_http_transport_invalid_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let transport = HttpTransport::new(&config).unwrap();

    let err = transport
        .get_json(&format!("{}GCF_1/stp-matrix?page=1", config.base_url))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Decode { .. }));
}

#[tokio::test]
async fn test_client_retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/genomes/GCF_1/stp-matrix"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/genomes/GCF_1/stp-matrix"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(component_page()))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = MistClient::new(HttpTransport::new(&config).unwrap(), config);
    let mut sink = MemorySink::default();

    let components = client
        .discover_components("GCF_1", tcsarch_common::types::SignalRank::Rr, &mut sink)
        .await
        .unwrap();

    assert_eq!(components.len(), 1);
    assert!(sink.failures.is_empty());
}

#[tokio::test]
async fn test_pipeline_writes_tables() {
    let server = MockServer::start().await;
    mount_genome(&server, "GCF_000006765.1").await;

    let dir = TempDir::new().unwrap();
    let paths = TsvPaths {
        sensor_kinases: dir.path().join("output_HK.tsv"),
        response_regulators: dir.path().join("output_RR.tsv"),
        failures: dir.path().join("timeout_genomes.txt"),
    };

    let config = config_for(&server);
    let client = MistClient::new(HttpTransport::new(&config).unwrap(), config);
    let pipeline = Pipeline::new(client, Normalizer::default());

    let mut sink = TsvSink::open(&paths, false).unwrap();
    let summary = pipeline.run_genome("GCF_000006765.1", &mut sink).await.unwrap();
    assert_eq!(summary.records, 2);

    let hk = fs::read_to_string(&paths.sensor_kinases).unwrap();
    let hk: Vec<&str> = hk.lines().collect();
    assert_eq!(hk[0], TABLE_HEADERS.join("\t"));
    assert_eq!(
        hk[1],
        [
            "GCF_000006765.1",
            "NP_250302.1",
            "GCF_000006765.1-PA1611",
            "891",
            "hole:1-187,HAMP:188-242,HisKA:248-313,HATPase_c:357-472,hole:473-767,Response_reg:768-881",
            "HAMP",
            "HAMP:1,HATPase_c:1,HisKA:1,Response_reg:1,hole:2",
            "HAMP,HATPase_c,HisKA,Response_reg,hole",
        ]
        .join("\t")
    );

    let rr = fs::read_to_string(&paths.response_regulators).unwrap();
    let rr: Vec<&str> = rr.lines().collect();
    assert_eq!(rr.len(), 2);
    assert!(rr[1].contains("Response_reg:2-112,Trans_reg_C:148-222\tTrans_reg_C\t"));

    assert!(!paths.failures.exists());
}

#[tokio::test]
async fn test_pipeline_logs_unreachable_genome() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = MistClient::new(HttpTransport::new(&config).unwrap(), config);
    let pipeline = Pipeline::new(client, Normalizer::default());

    let mut sink = MemorySink::default();
    let summary = pipeline.run_genome("GCF_DOWN", &mut sink).await.unwrap();

    assert_eq!(summary.records, 0);
    // one exhausted component listing per rank
    assert_eq!(sink.failures, ["GCF_DOWN"; 4]);
}
