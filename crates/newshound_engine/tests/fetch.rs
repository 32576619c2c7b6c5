use std::net::TcpListener;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use newshound_engine::{
    EngineHandle, ReqwestStoryFetcher, SearchCompletion, SearchError, SearchFailureKind,
    StoryFetcher, StoryRecord,
};

fn record(object_id: &str) -> StoryRecord {
    StoryRecord {
        object_id: object_id.to_owned(),
        title: None,
        url: None,
        author: None,
        num_comments: None,
        points: None,
    }
}

async fn search(server: &MockServer, query: &str) -> Result<Vec<StoryRecord>, SearchError> {
    let url = format!("{}/api/v1/search?query={query}", server.uri());
    ReqwestStoryFetcher::new().search(&url).await
}

#[tokio::test]
async fn search_parses_hits_and_ignores_extra_fields() {
    let server = MockServer::start().await;
    let body = json!({
        "hits": [
            {
                "title": "Rust after the honeymoon",
                "url": "https://example.com/rust",
                "author": "integer32",
                "num_comments": 12,
                "points": 97,
                "objectID": "38971",
                "created_at": "2023-06-01T10:00:00Z"
            },
            {
                "title": "Redux",
                "url": null,
                "author": "Dan Abramov, Andrew Clark",
                "num_comments": 2,
                "points": 5,
                "objectID": "1"
            }
        ],
        "nbHits": 2,
        "page": 0
    });
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .and(query_param("query", "rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let records = search(&server, "rust").await.unwrap();

    assert_eq!(
        records,
        vec![
            StoryRecord {
                object_id: "38971".to_owned(),
                title: Some("Rust after the honeymoon".to_owned()),
                url: Some("https://example.com/rust".to_owned()),
                author: Some("integer32".to_owned()),
                num_comments: Some(12),
                points: Some(97),
            },
            StoryRecord {
                object_id: "1".to_owned(),
                title: Some("Redux".to_owned()),
                url: None,
                author: Some("Dan Abramov, Andrew Clark".to_owned()),
                num_comments: Some(2),
                points: Some(5),
            },
        ]
    );
}

#[tokio::test]
async fn search_tolerates_records_with_missing_fields() {
    let server = MockServer::start().await;
    let body = json!({ "hits": [{ "objectID": "77" }] });
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let records = search(&server, "anything").await.unwrap();

    assert_eq!(records, vec![record("77")]);
}

#[tokio::test]
async fn search_ignores_the_http_status() {
    let server = MockServer::start().await;
    let body = json!({ "hits": [{ "objectID": "9" }] });
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(body))
        .mount(&server)
        .await;

    let records = search(&server, "react").await.unwrap();

    assert_eq!(records, vec![record("9")]);
}

#[tokio::test]
async fn search_rejects_bodies_without_hits() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let err = search(&server, "react").await.unwrap_err();

    assert_eq!(err.kind, SearchFailureKind::Decode);
}

#[tokio::test]
async fn search_rejects_non_json_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("service unavailable"))
        .mount(&server)
        .await;

    let err = search(&server, "react").await.unwrap_err();

    assert_eq!(err.kind, SearchFailureKind::Decode);
}

#[tokio::test]
async fn search_reports_unreachable_servers() {
    // Bind then drop a listener; the freed port refuses connections.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = format!("http://{addr}/api/v1/search?query=react");
    let err = ReqwestStoryFetcher::new().search(&url).await.unwrap_err();

    assert_eq!(err.kind, SearchFailureKind::Network);
}

#[tokio::test]
async fn search_rejects_unparseable_urls() {
    let err = ReqwestStoryFetcher::new()
        .search("not a url")
        .await
        .unwrap_err();

    assert_eq!(err.kind, SearchFailureKind::InvalidUrl);
}

struct StubFetcher;

#[async_trait]
impl StoryFetcher for StubFetcher {
    async fn search(&self, url: &str) -> Result<Vec<StoryRecord>, SearchError> {
        Ok(vec![record(url)])
    }
}

struct FailingFetcher;

#[async_trait]
impl StoryFetcher for FailingFetcher {
    async fn search(&self, _url: &str) -> Result<Vec<StoryRecord>, SearchError> {
        Err(SearchError {
            kind: SearchFailureKind::Network,
            message: "wire cut".to_owned(),
        })
    }
}

fn wait_for_completion(engine: &EngineHandle) -> SearchCompletion {
    let started = Instant::now();
    loop {
        if let Some(completion) = engine.try_recv() {
            return completion;
        }
        assert!(
            started.elapsed() < Duration::from_secs(5),
            "no completion arrived in time"
        );
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn engine_echoes_request_ids_on_completions() {
    let engine = EngineHandle::with_fetcher(Arc::new(StubFetcher));
    engine.issue(7, "alpha");
    engine.issue(8, "beta");

    let mut seen = vec![wait_for_completion(&engine), wait_for_completion(&engine)];
    seen.sort_by_key(|completion| completion.request_id);

    let ids: Vec<_> = seen
        .iter()
        .map(|completion| {
            let records = completion.result.as_ref().unwrap();
            (completion.request_id, records[0].object_id.clone())
        })
        .collect();
    assert_eq!(ids, vec![(7, "alpha".to_owned()), (8, "beta".to_owned())]);
}

#[test]
fn engine_carries_failures_back() {
    let engine = EngineHandle::with_fetcher(Arc::new(FailingFetcher));
    engine.issue(1, "anywhere");

    let completion = wait_for_completion(&engine);

    assert_eq!(completion.request_id, 1);
    let err = completion.result.unwrap_err();
    assert_eq!(err.kind, SearchFailureKind::Network);
    assert_eq!(err.message, "wire cut");
}
