//! Tests for the HTTP catalog client against a local server.

use catalog_browser::catalog::{Catalog, CatalogClient};
use catalog_browser::error::AppError;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const SHOWS_JSON: &str = r#"[
  {
    "id": 1,
    "name": "Under the Dome",
    "genres": ["Drama", "Science-Fiction", "Thriller"],
    "status": "Ended",
    "runtime": 60,
    "rating": {"average": 6.5},
    "image": {"medium": "https://static.tvmaze.com/1.jpg", "original": null},
    "summary": "<p><b>Under the Dome</b> is the story of a small town.</p>"
  },
  {
    "id": 2,
    "name": "Person of Interest",
    "genres": [],
    "status": "Ended",
    "runtime": null,
    "rating": {"average": null},
    "image": null,
    "summary": null
  }
]"#;

const EPISODES_JSON: &str = r#"[
  {
    "id": 10,
    "name": "Pilot",
    "season": 1,
    "number": 1,
    "url": "https://www.tvmaze.com/episodes/10/pilot",
    "image": {"medium": "https://static.tvmaze.com/e10.jpg"},
    "summary": "<p>The dome comes down.</p>"
  },
  {
    "id": 11,
    "name": "Special",
    "season": 1,
    "number": null,
    "url": "https://www.tvmaze.com/episodes/11/special",
    "image": null,
    "summary": null
  }
]"#;

fn response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    )
}

/// Serve canned responses keyed on the request path.
async fn serve(routes: fn(&str) -> String) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }

                let request = String::from_utf8_lossy(&buf);
                let path = request.split_whitespace().nth(1).unwrap_or("/");
                let reply = routes(path);
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

fn client(addr: SocketAddr) -> CatalogClient {
    CatalogClient::with_client(reqwest::Client::new(), format!("http://{}/", addr))
}

fn catalog_routes(path: &str) -> String {
    match path {
        "/shows" => response("200 OK", SHOWS_JSON),
        "/shows/1/episodes" => response("200 OK", EPISODES_JSON),
        "/shows/2/episodes" => response("200 OK", "{not json"),
        "/shows/3/episodes" => response("500 Internal Server Error", r#"{"error":"boom"}"#),
        _ => response("404 Not Found", "{}"),
    }
}

/// Test that the show list decodes, including missing optional fields.
#[tokio::test]
async fn test_fetch_shows_decodes_catalog() {
    let addr = serve(catalog_routes).await;
    let shows = client(addr).fetch_shows().await.unwrap();

    assert_eq!(shows.len(), 2);
    assert_eq!(shows[0].name, "Under the Dome");
    assert_eq!(shows[0].genres, vec!["Drama", "Science-Fiction", "Thriller"]);
    assert_eq!(shows[0].rating, Some(6.5));
    assert_eq!(shows[0].runtime, Some(60));
    assert_eq!(shows[0].image_url.as_deref(), Some("https://static.tvmaze.com/1.jpg"));

    assert_eq!(shows[1].rating, None);
    assert_eq!(shows[1].runtime, None);
    assert_eq!(shows[1].image_url, None);
    assert_eq!(shows[1].summary, "");
}

/// Test that episodes decode and a null number becomes zero.
#[tokio::test]
async fn test_fetch_episodes_decodes_catalog() {
    let addr = serve(catalog_routes).await;
    let episodes = client(addr).fetch_episodes(1).await.unwrap();

    assert_eq!(episodes.len(), 2);
    assert_eq!(episodes[0].to_display(), "S01E01 - Pilot");
    assert_eq!(episodes[1].number, 0);
    assert_eq!(episodes[1].code(), "S01E00");
}

/// Test that a non-2xx status is a network error naming the status.
#[tokio::test]
async fn test_server_error_is_network_error() {
    let addr = serve(catalog_routes).await;
    let err = client(addr).fetch_episodes(3).await.unwrap_err();

    match err {
        AppError::Network(msg) => assert!(msg.contains("500"), "unexpected message: {}", msg),
        other => panic!("expected network error, got {:?}", other),
    }
}

/// Test that a 404 is also reported as a network error.
#[tokio::test]
async fn test_not_found_is_network_error() {
    let addr = serve(catalog_routes).await;
    let err = client(addr).fetch_episodes(99).await.unwrap_err();
    assert!(matches!(err, AppError::Network(_)));
}

/// Test that a malformed body is a parse error.
#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let addr = serve(catalog_routes).await;
    let err = client(addr).fetch_episodes(2).await.unwrap_err();
    assert!(matches!(err, AppError::Parse(_)));
}

/// Test that an unreachable server is a network error.
#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(addr).fetch_shows().await.unwrap_err();
    assert!(matches!(err, AppError::Network(_)));
}
