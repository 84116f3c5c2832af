use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use bytes::BytesMut;
use httpfromtcp::handler::{HandlerError, make_handler};
use httpfromtcp::protocol::Request;
use httpfromtcp::server::Server;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

fn problem_handler(body: &mut BytesMut, request: Request) -> Result<(), HandlerError> {
    match request.target() {
        "/yourproblem" => Err(HandlerError::bad_request("Your problem is not my problem\n")),
        "/myproblem" => Err(HandlerError::internal_server_error("Woopsie, my bad\n")),
        _ => {
            body.extend_from_slice(b"All good, frfr\n");
            Ok(())
        }
    }
}

async fn start() -> Server {
    Server::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)), make_handler(problem_handler)).await.unwrap()
}

/// Writes `request` in pieces of `chunk_size` bytes and reads until the server closes.
async fn round_trip(server: &Server, request: &[u8], chunk_size: usize) -> String {
    let mut stream = TcpStream::connect(server.local_addr()).await.unwrap();
    stream.set_nodelay(true).unwrap();
    for chunk in request.chunks(chunk_size) {
        stream.write_all(chunk).await.unwrap();
        stream.flush().await.unwrap();
    }

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn your_problem_is_bad_request() {
    let mut server = start().await;

    let response = round_trip(&server, b"GET /yourproblem HTTP/1.1\r\nHost: localhost:42069\r\n\r\n", 1024).await;

    assert_eq!(
        response,
        "HTTP/1.1 400 Bad Request\r\ncontent-length: 31\r\ncontent-type: text/plain\r\n\r\nYour problem is not my problem\n"
    );
    server.close().await.unwrap();
}

#[tokio::test]
async fn my_problem_is_internal_error() {
    let mut server = start().await;

    let response = round_trip(&server, b"GET /myproblem HTTP/1.1\r\nHost: localhost:42069\r\n\r\n", 1024).await;

    assert!(response.starts_with("HTTP/1.1 500 Internal Server Error\r\n"));
    assert!(response.ends_with("\r\n\r\nWoopsie, my bad\n"));
    server.close().await.unwrap();
}

#[tokio::test]
async fn all_good() {
    let mut server = start().await;

    let response = round_trip(&server, b"GET / HTTP/1.1\r\nHost: localhost:42069\r\n\r\n", 1024).await;

    let body = "All good, frfr\n";
    assert_eq!(
        response,
        format!("HTTP/1.1 200 OK\r\ncontent-length: {}\r\ncontent-type: text/plain\r\n\r\n{body}", body.len())
    );
    server.close().await.unwrap();
}

#[tokio::test]
async fn unsupported_version_is_rejected() {
    let mut server = start().await;

    let response = round_trip(&server, b"GET / HTTP/2\r\nHost: localhost:42069\r\n\r\n", 1024).await;

    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    assert!(response.ends_with("unsupported http version: HTTP/2"));
    assert!(!response.contains("All good"));
    server.close().await.unwrap();
}

#[tokio::test]
async fn fragmented_writes_get_identical_response() {
    let mut server = start().await;
    let request = b"POST /submit HTTP/1.1\r\nHost: localhost:42069\r\nContent-Length: 13\r\n\r\nhello world!\n";

    let expected = round_trip(&server, request, request.len()).await;
    for chunk_size in [1, 3, 10] {
        let response = round_trip(&server, request, chunk_size).await;
        assert_eq!(response, expected, "chunk size {chunk_size}");
    }
    assert!(expected.starts_with("HTTP/1.1 200 OK\r\n"));
    server.close().await.unwrap();
}

#[tokio::test]
async fn client_closing_early_gets_bad_request() {
    let mut server = start().await;

    let mut stream = TcpStream::connect(server.local_addr()).await.unwrap();
    stream.write_all(b"POST / HTTP/1.1\r\nContent-Length: 10\r\n\r\nabc").await.unwrap();
    stream.shutdown().await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    assert!(response.contains("incomplete request"));
    server.close().await.unwrap();
}

#[tokio::test]
async fn stalled_connection_does_not_block_others() {
    let mut server = start().await;

    let mut stalled = TcpStream::connect(server.local_addr()).await.unwrap();
    stalled.write_all(b"GET / HTTP/1.1\r\nHost: loc").await.unwrap();

    let response = tokio::time::timeout(
        Duration::from_secs(5),
        round_trip(&server, b"GET / HTTP/1.1\r\nHost: localhost:42069\r\n\r\n", 1024),
    )
    .await
    .expect("second connection should not wait for the stalled one");
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));

    stalled.write_all(b"alhost\r\n\r\n").await.unwrap();
    let mut response = String::new();
    stalled.read_to_string(&mut response).await.unwrap();
    assert!(response.ends_with("All good, frfr\n"));
    server.close().await.unwrap();
}

#[tokio::test]
async fn concurrent_connections() {
    let mut server = start().await;

    let mut tasks = Vec::new();
    for i in 0..16 {
        let addr = server.local_addr();
        tasks.push(tokio::spawn(async move {
            let target = if i % 2 == 0 { "/" } else { "/yourproblem" };
            let mut stream = TcpStream::connect(addr).await.unwrap();
            stream.write_all(format!("GET {target} HTTP/1.1\r\nHost: localhost\r\n\r\n").as_bytes()).await.unwrap();
            let mut response = String::new();
            stream.read_to_string(&mut response).await.unwrap();
            (i, response)
        }));
    }

    for task in tasks {
        let (i, response) = task.await.unwrap();
        let expected_status = if i % 2 == 0 { "HTTP/1.1 200 OK\r\n" } else { "HTTP/1.1 400 Bad Request\r\n" };
        assert!(response.starts_with(expected_status), "connection {i}: {response}");
    }
    server.close().await.unwrap();
}
