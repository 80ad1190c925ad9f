//! Integration tests for `FeedClient` and `FeedCollector`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no
//! real network traffic is made.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use collabdb_core::FeedSource;
use collabdb_feeds::{ArticleSource, FeedClient, FeedCollector, FeedError};

/// 5-second timeout, descriptive UA, no retries.
fn test_client() -> FeedClient {
    FeedClient::new(5, "collabdb-test/0.1", 0, 0).expect("failed to build test FeedClient")
}

fn test_client_with_retries(max_retries: u32) -> FeedClient {
    FeedClient::new(5, "collabdb-test/0.1", max_retries, 0)
        .expect("failed to build test FeedClient")
}

fn source(server: &MockServer, name: &str, route: &str) -> FeedSource {
    FeedSource {
        name: name.to_string(),
        url: format!("{}{route}", server.uri()),
    }
}

fn rss(titles: &[&str]) -> String {
    let items: String = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            format!(
                "<item><title>{title}</title><link>https://news.example.com/{i}</link>\
                 <description>&lt;p&gt;Story {i}&lt;/p&gt;</description></item>"
            )
        })
        .collect();
    format!(r#"<?xml version="1.0"?><rss version="2.0"><channel><title>Feed</title>{items}</channel></rss>"#)
}

#[tokio::test]
async fn fetch_feed_parses_items_and_attributes_source() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss(&[
            "Supreme x Nike SB Dunk Low",
            "Aime Leon Dore x New Balance 550",
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let articles = test_client()
        .fetch_feed(&source(&server, "Hypebeast", "/feed"), 15)
        .await
        .expect("fetch succeeds");

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title, "Supreme x Nike SB Dunk Low");
    assert_eq!(articles[0].source, "Hypebeast");
    assert_eq!(articles[0].source_url, "https://news.example.com/0");
    assert_eq!(articles[0].description.as_deref(), Some("Story 0"));
}

#[tokio::test]
async fn fetch_feed_respects_max_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss(&["a", "b", "c", "d"])))
        .mount(&server)
        .await;

    let articles = test_client()
        .fetch_feed(&source(&server, "Hypebeast", "/feed"), 2)
        .await
        .expect("fetch succeeds");
    assert_eq!(articles.len(), 2);
}

#[tokio::test]
async fn not_found_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client_with_retries(3)
        .fetch_feed(&source(&server, "Nice Kicks", "/missing"), 15)
        .await;
    assert!(matches!(
        result,
        Err(FeedError::UnexpectedStatus { status: 404, .. })
    ));
}

#[tokio::test]
async fn server_error_is_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss(&["Kith x Asics"])))
        .expect(1)
        .mount(&server)
        .await;

    let articles = test_client_with_retries(2)
        .fetch_feed(&source(&server, "Sneaker News", "/feed"), 15)
        .await
        .expect("retry succeeds");
    assert_eq!(articles.len(), 1);
}

#[tokio::test]
async fn rate_limit_surfaces_after_retries_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(429))
        .expect(2)
        .mount(&server)
        .await;

    let result = test_client_with_retries(1)
        .fetch_feed(&source(&server, "Highsnobiety", "/feed"), 15)
        .await;
    assert!(matches!(result, Err(FeedError::RateLimited { .. })));
}

#[tokio::test]
async fn malformed_body_is_an_xml_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<rss><channel><item><title>x</oops></item></channel></rss>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client_with_retries(2)
        .fetch_feed(&source(&server, "Hypebeast", "/feed"), 15)
        .await;
    assert!(matches!(result, Err(FeedError::Xml(_))));
}

#[tokio::test]
async fn collector_skips_failing_sources_and_dedups_titles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hypebeast"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss(&[
            "Travis Scott x Jordan 1 Low",
            "Fear of God x Adidas Athletics",
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sneakernews"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss(&[
            "TRAVIS SCOTT X JORDAN 1 LOW",
            "Salehe Bembury x Crocs Pollex Clog",
        ])))
        .mount(&server)
        .await;

    let collector = FeedCollector::new(
        test_client(),
        vec![
            source(&server, "Hypebeast", "/hypebeast"),
            source(&server, "Broken", "/broken"),
            source(&server, "Sneaker News", "/sneakernews"),
        ],
        15,
    );

    let articles = collector.fetch_articles().await;
    let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Travis Scott x Jordan 1 Low",
            "Fear of God x Adidas Athletics",
            "Salehe Bembury x Crocs Pollex Clog",
        ]
    );
    assert_eq!(articles[0].source, "Hypebeast");
    assert_eq!(collector.sources().len(), 3);
}

#[tokio::test]
async fn collector_with_no_reachable_sources_yields_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let collector = FeedCollector::new(
        test_client(),
        vec![source(&server, "Hypebeast", "/feed")],
        15,
    );
    assert!(collector.collect_articles().await.is_empty());
}
