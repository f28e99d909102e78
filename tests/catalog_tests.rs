//! LibraryCloud client against a mock HTTP server

use mps_batch_order::{
    config::CatalogConfig,
    error::AppError,
    models::normalize,
    services::{CatalogClient, LibraryCloudClient},
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ITEMS_XML: &str = include_str!("fixtures/librarycloud_items.xml");

fn client(server: &MockServer) -> LibraryCloudClient {
    let config = CatalogConfig {
        base_url: format!("{}/", server.uri()),
        limit: 20000,
        timeout_secs: 5,
    };
    LibraryCloudClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_query_sends_term_and_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/items"))
        .and(query_param("q", "AWM LP 2078"))
        .and(query_param("limit", "20000"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(ITEMS_XML)
                .insert_header("Content-Type", "application/xml"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let term = normalize("awm lp 2078").unwrap().remove(0);
    let records = client(&server).query(&term).await.unwrap();

    // Every record of the response is a candidate; filtering happens later
    assert_eq!(records.len(), 3);
    assert_eq!(
        records[0].text_at(&["titleInfo", "title"]),
        "Songs of the Lincoln Battalion"
    );
}

#[tokio::test]
async fn test_error_status_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/items"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let term = normalize("AWM SC 1").unwrap().remove(0);
    let err = client(&server).query(&term).await.unwrap_err();

    assert!(matches!(err, AppError::Transport(_)));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<results><items>"))
        .mount(&server)
        .await;

    let term = normalize("AWM SC 1").unwrap().remove(0);
    let err = client(&server).query(&term).await.unwrap_err();

    assert!(matches!(err, AppError::Parse(_)));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_empty_result_set() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<results xmlns="http://api.lib.harvard.edu/v2/item"><items/></results>"#,
        ))
        .mount(&server)
        .await;

    let term = normalize("AWM CD 7").unwrap().remove(0);
    assert!(client(&server).query(&term).await.unwrap().is_empty());
}
