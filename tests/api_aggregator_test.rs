use httpmock::prelude::*;
use std::time::{Duration, Instant};
use trend_fetch::core::api_aggregator::ApiAggregator;
use trend_fetch::{ApiSettings, TrendSource};

const SEARCH_PATH: &str = "/2/tweets/search/recent";

fn settings(server: &MockServer, delay_ms: u64) -> ApiSettings {
    ApiSettings {
        search_endpoint: server.url(SEARCH_PATH),
        queries: ["alpha", "beta", "gamma", "delta"]
            .iter()
            .map(|q| q.to_string())
            .collect(),
        query_delay_ms: delay_ms,
        ..ApiSettings::default()
    }
}

fn full_query(q: &str) -> String {
    format!("{} lang:en -is:retweet", q)
}

fn post(id: &str, text: &str, likes: u64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "text": text,
        "public_metrics": {"like_count": likes, "retweet_count": 0, "reply_count": 0}
    })
}

fn aggregator(server: &MockServer, delay_ms: u64) -> ApiAggregator {
    ApiAggregator::new(Some("test-token".to_string()), settings(server, delay_ms)).unwrap()
}

#[tokio::test]
async fn test_merges_dedups_and_ranks_across_queries() {
    let server = MockServer::start();

    let alpha = server.mock(|when, then| {
        when.method(GET)
            .path(SEARCH_PATH)
            .query_param("query", full_query("alpha"));
        then.status(200).json_body(serde_json::json!({
            "data": [post("1", "Rust 2024 edition", 30), post("2", "Tokio release", 90)]
        }));
    });
    let beta = server.mock(|when, then| {
        when.method(GET)
            .path(SEARCH_PATH)
            .query_param("query", full_query("beta"));
        then.status(200).json_body(serde_json::json!({
            // 與 alpha 的第一筆標題只差大小寫
            "data": [post("3", "RUST 2024 EDITION", 500), post("4", "Serde tips", 60)]
        }));
    });
    let gamma = server.mock(|when, then| {
        when.method(GET)
            .path(SEARCH_PATH)
            .query_param("query", full_query("gamma"));
        then.status(200).json_body(serde_json::json!({"meta": {"result_count": 0}}));
    });
    let delta = server.mock(|when, then| {
        when.method(GET)
            .path(SEARCH_PATH)
            .query_param("query", full_query("delta"));
        then.status(200).json_body(serde_json::json!({"data": [post("5", "Never asked", 99)]}));
    });

    let feed = aggregator(&server, 0).fetch_trending().await.unwrap().unwrap();

    alpha.assert();
    beta.assert();
    gamma.assert();
    // 只查詢前三個
    delta.assert_hits(0);

    let titles: Vec<&str> = feed.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Tokio release", "Serde tips", "Rust 2024 edition"]);
    assert_eq!(feed.items[2].url, "https://twitter.com/i/web/status/1");
}

#[tokio::test]
async fn test_rate_limit_aborts_remaining_queries() {
    let server = MockServer::start();

    let alpha = server.mock(|when, then| {
        when.method(GET)
            .path(SEARCH_PATH)
            .query_param("query", full_query("alpha"));
        then.status(200)
            .json_body(serde_json::json!({"data": [post("1", "Kept before abort", 80)]}));
    });
    let beta = server.mock(|when, then| {
        when.method(GET)
            .path(SEARCH_PATH)
            .query_param("query", full_query("beta"));
        then.status(429)
            .json_body(serde_json::json!({"title": "Too Many Requests"}));
    });
    let gamma = server.mock(|when, then| {
        when.method(GET)
            .path(SEARCH_PATH)
            .query_param("query", full_query("gamma"));
        then.status(200).json_body(serde_json::json!({"data": []}));
    });

    let feed = aggregator(&server, 0).fetch_trending().await.unwrap().unwrap();

    alpha.assert();
    beta.assert();
    gamma.assert_hits(0);
    assert_eq!(feed.items.len(), 1);
    assert_eq!(feed.items[0].title, "Kept before abort");
}

#[tokio::test]
async fn test_unauthorized_aborts_and_yields_no_data() {
    let server = MockServer::start();

    let unauthorized = server.mock(|when, then| {
        when.method(GET).path(SEARCH_PATH);
        then.status(401)
            .json_body(serde_json::json!({"title": "Unauthorized"}));
    });

    let result = aggregator(&server, 0).fetch_trending().await.unwrap();

    unauthorized.assert_hits(1);
    assert!(result.is_none());
}

#[tokio::test]
async fn test_other_failures_only_skip_their_query() {
    let server = MockServer::start();

    let alpha = server.mock(|when, then| {
        when.method(GET)
            .path(SEARCH_PATH)
            .query_param("query", full_query("alpha"));
        then.status(503)
            .json_body(serde_json::json!({"detail": "Service Unavailable"}));
    });
    let beta = server.mock(|when, then| {
        when.method(GET)
            .path(SEARCH_PATH)
            .query_param("query", full_query("beta"));
        then.status(200).body("not json at all");
    });
    let gamma = server.mock(|when, then| {
        when.method(GET)
            .path(SEARCH_PATH)
            .query_param("query", full_query("gamma"));
        then.status(200)
            .json_body(serde_json::json!({"data": [post("9", "Survivor", 25)]}));
    });

    let feed = aggregator(&server, 0).fetch_trending().await.unwrap().unwrap();

    alpha.assert();
    beta.assert();
    gamma.assert();
    assert_eq!(feed.items.len(), 1);
    assert_eq!(feed.items[0].title, "Survivor");
}

#[tokio::test]
async fn test_all_noise_yields_no_data() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path(SEARCH_PATH);
        then.status(200)
            .json_body(serde_json::json!({"data": [post("1", "Low engagement", 20)]}));
    });

    let result = aggregator(&server, 0).fetch_trending().await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_output_is_capped_at_twenty_items() {
    let server = MockServer::start();

    let posts: Vec<serde_json::Value> = (0..10)
        .map(|i| post(&i.to_string(), &format!("distinct topic {i}"), 30 + i))
        .collect();
    for q in ["alpha", "beta", "gamma"] {
        let data: Vec<serde_json::Value> = posts
            .iter()
            .map(|p| {
                let mut p = p.clone();
                p["text"] = format!("{} {}", q, p["text"].as_str().unwrap()).into();
                p
            })
            .collect();
        server.mock(|when, then| {
            when.method(GET)
                .path(SEARCH_PATH)
                .query_param("query", full_query(q));
            then.status(200).json_body(serde_json::json!({"data": data}));
        });
    }

    let feed = aggregator(&server, 0).fetch_trending().await.unwrap().unwrap();
    assert_eq!(feed.items.len(), 20);
}

#[tokio::test]
async fn test_delay_follows_successful_queries_only() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET)
            .path(SEARCH_PATH)
            .query_param("query", full_query("alpha"));
        then.status(429);
    });

    let started = Instant::now();
    let result = aggregator(&server, 2_000).fetch_trending().await.unwrap();
    assert!(result.is_none());
    assert!(started.elapsed() < Duration::from_millis(2_000));

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(SEARCH_PATH);
        then.status(200).json_body(serde_json::json!({"data": []}));
    });

    let started = Instant::now();
    aggregator(&server, 100).fetch_trending().await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(300));
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start();

    let authed = server.mock(|when, then| {
        when.method(GET)
            .path(SEARCH_PATH)
            .header("Authorization", "Bearer test-token")
            .query_param("max_results", "10");
        then.status(200).json_body(serde_json::json!({"data": []}));
    });

    aggregator(&server, 0).fetch_trending().await.unwrap();
    authed.assert_hits(3);
}
