use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use todos::{DEFAULT_ROOT, MemoryStore, Server};

/// Sends one HTTP/1.1 request with `connection: close` and returns the raw
/// response text.
async fn roundtrip(addr: std::net::SocketAddr, method: &str, path: &str, body: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "{method} {path} HTTP/1.1\r\n\
         host: localhost\r\n\
         content-type: application/json\r\n\
         content-length: {}\r\n\
         connection: close\r\n\
         \r\n\
         {body}",
        body.len()
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn serves_over_tcp_and_shuts_down_gracefully() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = todos::app(Arc::new(MemoryStore::new()), DEFAULT_ROOT);
    let (stop, stopped) = oneshot::channel::<()>();
    let server = tokio::spawn(Server::serve_with_shutdown(listener, app, async move {
        let _ = stopped.await;
    }));

    let created = roundtrip(addr, "POST", DEFAULT_ROOT, r#"{"title":"Learn Kotlin"}"#).await;
    let lower = created.to_ascii_lowercase();
    assert!(created.starts_with("HTTP/1.1 201"), "{created}");
    assert!(lower.contains(&format!("location: {DEFAULT_ROOT}/")), "{created}");
    assert!(lower.contains("content-type: application/hal+json"), "{created}");
    assert!(
        created.contains(&format!(r#"{{"title":"Learn Kotlin","_links":{{"self":{{"href":"{DEFAULT_ROOT}/"#)),
        "{created}"
    );

    let listed = roundtrip(addr, "GET", DEFAULT_ROOT, "").await;
    assert!(listed.starts_with("HTTP/1.1 200"), "{listed}");
    assert!(listed.contains(r#""todoList":[{"title":"Learn Kotlin""#), "{listed}");

    let unsupported = roundtrip(addr, "PROPFIND", DEFAULT_ROOT, "").await;
    assert!(unsupported.starts_with("HTTP/1.1 405"), "{unsupported}");

    stop.send(()).unwrap();
    server.await.unwrap().unwrap();
}

#[tokio::test]
async fn shutdown_closes_idle_keep_alive_connections() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = todos::app(Arc::new(MemoryStore::new()), DEFAULT_ROOT);
    let (stop, stopped) = oneshot::channel::<()>();
    let server = tokio::spawn(Server::serve_with_shutdown(listener, app, async move {
        let _ = stopped.await;
    }));

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /healthz HTTP/1.1\r\nhost: localhost\r\n\r\n")
        .await
        .unwrap();
    let mut response = Vec::new();
    let mut buf = [0u8; 1024];
    while !response.ends_with(b"\r\n\r\nok") {
        let n = stream.read(&mut buf).await.unwrap();
        assert_ne!(n, 0, "connection closed before the response was complete");
        response.extend_from_slice(&buf[..n]);
    }
    assert!(response.starts_with(b"HTTP/1.1 200"));

    stop.send(()).unwrap();

    tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server still running with an idle connection open")
        .unwrap()
        .unwrap();
    let closed = tokio::time::timeout(Duration::from_secs(5), stream.read(&mut buf))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(closed, 0);
}
