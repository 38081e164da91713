//! Unit tests for ArenaHttpClient and ArenaChannelFetcher

use arena_dl::fetcher::{
    ArenaChannelFetcher, ArenaHttpClient, ChannelFetcher, FetcherError, HttpConfig, DEFAULT_USER_AGENT,
};
use arena_dl::{BlockId, ChannelSlug};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(serde::Deserialize, Debug, PartialEq)]
struct Status {
    status: String,
}

#[tokio::test]
async fn test_get_json_decodes_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/ping"))
        .and(query_param("verbose", "1"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let http = ArenaHttpClient::new(&HttpConfig::with_base_url(format!("{}/v2", server.uri()))).unwrap();
    let status: Status = http
        .get_json(&["ping"], &[("verbose", "1".to_string())])
        .await
        .unwrap();

    assert_eq!(status.status, "ok");
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/boom"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let http = ArenaHttpClient::new(&HttpConfig::with_base_url(server.uri())).unwrap();
    let result: Result<serde_json::Value, _> = http.get_json(&["boom"], &[]).await;

    match result {
        Err(FetcherError::HttpError(msg)) => assert!(msg.contains("503"), "{msg}"),
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_bytes_returns_raw_body() {
    let server = MockServer::start().await;
    let payload: Vec<u8> = (0..=255).collect();
    Mock::given(method("GET"))
        .and(path("/files/blob.bin"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.clone()))
        .mount(&server)
        .await;

    let http = ArenaHttpClient::new(&HttpConfig::with_base_url(server.uri())).unwrap();
    let bytes = http
        .get_bytes(&format!("{}/files/blob.bin", server.uri()))
        .await
        .unwrap();

    assert_eq!(bytes.as_ref(), payload.as_slice());
}

#[tokio::test]
async fn test_get_bytes_rejects_invalid_url() {
    let http = ArenaHttpClient::new(&HttpConfig::default()).unwrap();
    let result = http.get_bytes("not a url").await;
    assert!(matches!(result, Err(FetcherError::InvalidUrl(_))));
}

#[tokio::test]
async fn test_request_timeout_applies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let config = HttpConfig {
        request_timeout: Duration::from_millis(200),
        ..HttpConfig::with_base_url(server.uri())
    };
    let http = ArenaHttpClient::new(&config).unwrap();
    let result = http.get_bytes(&format!("{}/slow", server.uri())).await;

    assert!(matches!(result, Err(FetcherError::NetworkError(_))));
}

#[tokio::test]
async fn test_channel_fetcher_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channels/my-channel/thumb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "My Channel",
            "length": 2,
            "status": "public"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channels/my-channel/contents"))
        .and(query_param("page", "1"))
        .and(query_param("per", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contents": [
                { "id": 1, "title": "First", "image": { "content_type": "image/png", "original": { "url": "https://x/1.png" } } },
                { "id": 2, "title": null, "image": null }
            ]
        })))
        .mount(&server)
        .await;

    let fetcher = ArenaChannelFetcher::new(
        &HttpConfig::with_base_url(server.uri()),
        ChannelSlug::parse("my-channel").unwrap(),
    )
    .unwrap();

    let summary = fetcher.fetch_summary().await.unwrap();
    assert_eq!(summary.title, "My Channel");
    assert_eq!(summary.length, 2);

    let page = fetcher.fetch_page(1, 100).await.unwrap();
    assert_eq!(page.contents.len(), 2);
    assert_eq!(page.contents[0].id, BlockId::Numeric(1));
    assert_eq!(page.contents[0].image_url(), Some("https://x/1.png"));
    assert!(page.contents[1].image_url().is_none());
}
