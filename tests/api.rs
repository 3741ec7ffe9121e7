//! End-to-end: a live server on an ephemeral port, spoken to over raw TCP.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tollgate::{ApiServer, Config, Server};

async fn spawn_api() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = ApiServer::new(Config::default()).app();
    tokio::spawn(Server::serve_on(listener, app));
    addr
}

/// Sends one HTTP/1.1 request and returns `(status, body)`.
async fn send(addr: SocketAddr, path: &str, authorization: Option<&str>) -> (u16, String) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let auth = authorization
        .map(|v| format!("Authorization: {v}\r\n"))
        .unwrap_or_default();
    let request = format!("GET {path} HTTP/1.1\r\nHost: test\r\n{auth}Connection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let raw = String::from_utf8(raw).unwrap();

    let (head, body) = raw.split_once("\r\n\r\n").unwrap();
    let status = head.split(' ').nth(1).unwrap().parse().unwrap();
    (status, body.to_owned())
}

#[tokio::test]
async fn authorized_user_lookup() {
    let addr = spawn_api().await;

    let (status, body) = send(addr, "/api/v1/users/42", Some("Bearer token")).await;

    assert_eq!(status, 200);
    assert_eq!(body, "User ID: 42");
}

#[tokio::test]
async fn missing_authorization_is_401() {
    let addr = spawn_api().await;

    let (status, body) = send(addr, "/api/v1/users/42", None).await;

    assert_eq!(status, 401);
    assert_eq!(body, "Unauthorized\n");
}

#[tokio::test]
async fn wrong_authorization_is_401_even_for_unknown_paths() {
    let addr = spawn_api().await;

    let (status, _) = send(addr, "/does/not/exist", Some("Bearer wrong")).await;
    assert_eq!(status, 401);

    let (status, body) = send(addr, "/does/not/exist", Some("Bearer token")).await;
    assert_eq!(status, 404);
    assert_eq!(body, "404 page not found\n");
}

#[tokio::test]
async fn serves_concurrent_requests() {
    let addr = spawn_api().await;

    let requests: Vec<_> = (0..16)
        .map(|id| {
            tokio::spawn(async move {
                send(addr, &format!("/api/v1/users/{id}"), Some("Bearer token")).await
            })
        })
        .collect();

    for (id, request) in requests.into_iter().enumerate() {
        let (status, body) = request.await.unwrap();
        assert_eq!(status, 200);
        assert_eq!(body, format!("User ID: {id}"));
    }
}
