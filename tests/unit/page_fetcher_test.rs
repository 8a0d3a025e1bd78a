//! Tests for HttpPageFetcher against a one-shot local HTTP server.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use viewerscan::services::page_fetcher::{HttpPageFetcher, PageFetcher};
use viewerscan::types::errors::{FetchError, ParseError, ScanError};
use viewerscan::types::settings::SourceSettings;
use viewerscan::types::viewer::SnapshotOrder;

const LIST_CLASS: &str = "ipsList_inline ipsList_csv ipsList_noSpacing ipsType_normal";

/// Serves exactly one response and returns the URL to request.
async fn serve_once(status_line: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 8192];
        let _ = socket.read(&mut buf).await;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });

    format!("http://{}/forums/", addr)
}

fn source_for(url: String) -> SourceSettings {
    // Keep any proxy configured in the environment away from the loopback server.
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    SourceSettings {
        target_url: url,
        viewer_list_class: LIST_CLASS.to_string(),
        page_order: SnapshotOrder::MostRecentLast,
        request_timeout_seconds: 5,
        user_agent: "viewerscan-test/0.1".to_string(),
    }
}

fn viewer_page(names: &[&str]) -> String {
    let items: String = names
        .iter()
        .map(|n| format!(r#"<li><a href="/profile/{n}/"><span>{n}</span></a></li>"#, n = n))
        .collect();
    format!(
        r#"<html><body><ul class="{}">{}</ul></body></html>"#,
        LIST_CLASS, items
    )
}

#[tokio::test]
async fn test_fetches_names_in_page_order() {
    let url = serve_once("200 OK", viewer_page(&["first", "second", "third"])).await;
    let fetcher = HttpPageFetcher::new(&source_for(url)).unwrap();

    let snapshot = fetcher.fetch_snapshot().await.unwrap();

    assert_eq!(snapshot.order, SnapshotOrder::MostRecentLast);
    let names: Vec<&str> = snapshot.viewers.iter().map(|v| v.as_str()).collect();
    assert_eq!(names, ["first", "second", "third"]);
}

#[tokio::test]
async fn test_configured_page_order_is_carried() {
    let url = serve_once("200 OK", viewer_page(&["a"])).await;
    let mut source = source_for(url);
    source.page_order = SnapshotOrder::MostRecentFirst;
    let fetcher = HttpPageFetcher::new(&source).unwrap();

    let snapshot = fetcher.fetch_snapshot().await.unwrap();
    assert_eq!(snapshot.order, SnapshotOrder::MostRecentFirst);
}

#[tokio::test]
async fn test_error_status_is_fetch_error() {
    let url = serve_once("503 Service Unavailable", "down".to_string()).await;
    let fetcher = HttpPageFetcher::new(&source_for(url)).unwrap();

    let err = fetcher.fetch_snapshot().await.unwrap_err();
    assert_eq!(err, ScanError::Fetch(FetchError::Status(503)));
}

#[tokio::test]
async fn test_changed_layout_is_parse_error() {
    let url = serve_once("200 OK", "<html><body>redesigned</body></html>".to_string()).await;
    let fetcher = HttpPageFetcher::new(&source_for(url)).unwrap();

    let err = fetcher.fetch_snapshot().await.unwrap_err();
    assert_eq!(
        err,
        ScanError::Parse(ParseError::ListNotFound(LIST_CLASS.to_string()))
    );
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Reserve a port, then free it so nothing is listening there.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = HttpPageFetcher::new(&source_for(format!("http://{}/", addr))).unwrap();
    let err = fetcher.fetch_snapshot().await.unwrap_err();
    assert!(matches!(err, ScanError::Fetch(FetchError::Network(_))), "{:?}", err);
}

#[test]
fn test_rejects_unusable_urls() {
    for url in ["not a url", "ftp://example.com/forums/"] {
        let result = HttpPageFetcher::new(&source_for(url.to_string()));
        assert!(
            matches!(result, Err(FetchError::InvalidUrl(_))),
            "{} should be rejected",
            url
        );
    }
}
