//! Fatal failures: summary and page requests abort the run

use arena_dl::downloader::{ChannelPipeline, DownloadError};
use arena_dl::fetcher::{ArenaChannelFetcher, HttpConfig};
use arena_dl::ChannelSlug;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pipeline(server: &MockServer, slug: &str, output: &TempDir) -> ChannelPipeline {
    let fetcher = ArenaChannelFetcher::new(
        &HttpConfig::with_base_url(server.uri()),
        ChannelSlug::parse(slug).unwrap(),
    )
    .unwrap();
    ChannelPipeline::new(Box::new(fetcher), output.path(), 10).unwrap()
}

fn page_of(server: &MockServer, ids: std::ops::RangeInclusive<u64>) -> serde_json::Value {
    let contents: Vec<_> = ids
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Block {id}"),
                "image": {
                    "content_type": "image/jpeg",
                    "original": { "url": format!("{}/images/{id}", server.uri()) }
                }
            })
        })
        .collect();
    json!({ "contents": contents })
}

#[tokio::test]
async fn test_page_failure_aborts_before_any_download() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channels/flaky/thumb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "title": "Flaky", "length": 250 })))
        .mount(&server)
        .await;

    for (page, ids) in [(1, 1..=100), (3, 201..=250)] {
        Mock::given(method("GET"))
            .and(path("/channels/flaky/contents"))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_of(&server, ids)))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/channels/flaky/contents"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/images/"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"never".to_vec()))
        .expect(0)
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let err = pipeline(&server, "flaky", &output).run().await.unwrap_err();

    assert!(matches!(err, DownloadError::PageFetch(_)));
    let message = err.to_string();
    assert!(message.contains("page 2"), "{message}");
    assert!(message.contains("500"), "{message}");
    assert!(!output.path().join("flaky").exists());
}

#[tokio::test]
async fn test_summary_failure_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channels/missing/thumb"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channels/missing/contents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "contents": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let err = pipeline(&server, "missing", &output).run().await.unwrap_err();

    assert!(matches!(err, DownloadError::SummaryFetch(_)));
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_malformed_summary_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channels/garbled/thumb"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let err = pipeline(&server, "garbled", &output).run().await.unwrap_err();

    assert!(matches!(err, DownloadError::SummaryFetch(_)));
    assert!(err.to_string().contains("parse error"));
}

#[tokio::test]
async fn test_summary_without_length_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channels/hidden/thumb"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "Channel not found or private" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channels/hidden/contents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "contents": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let err = pipeline(&server, "hidden", &output).run().await.unwrap_err();

    assert!(matches!(err, DownloadError::SummaryFetch(_)));
    assert!(err.to_string().contains("parse error"), "{err}");
}

#[tokio::test]
async fn test_unreachable_api_is_fatal() {
    // Nothing listens on the discard port of localhost
    let fetcher = ArenaChannelFetcher::new(
        &HttpConfig::with_base_url("http://127.0.0.1:9"),
        ChannelSlug::parse("offline").unwrap(),
    )
    .unwrap();
    let output = TempDir::new().unwrap();
    let pipeline = ChannelPipeline::new(Box::new(fetcher), output.path(), 10).unwrap();

    let err = pipeline.run().await.unwrap_err();
    assert!(matches!(err, DownloadError::SummaryFetch(_)));
    assert!(err.to_string().contains("network error"));
}
