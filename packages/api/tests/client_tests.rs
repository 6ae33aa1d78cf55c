//! End-to-end tests of the `Client` facade against local servers

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use greq::{Client, Params, TimingRecord, Worker, MAX_TIMEOUT};
use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    addr
}

fn test_router() -> Router {
    Router::new()
        .route(
            "/verb",
            get(query_handler)
                .post(form_handler)
                .put(form_handler)
                .delete(form_handler),
        )
        .route("/auth", get(auth_handler))
        .route("/host", get(host_handler))
        .route("/echo-header", get(echo_header_handler))
        .route("/slow", get(slow_handler))
}

async fn query_handler(uri: Uri) -> impl IntoResponse {
    if uri.query() == Some("key=TEST_HELLO") {
        (StatusCode::OK, "success")
    } else {
        (StatusCode::BAD_REQUEST, "fail")
    }
}

async fn form_handler(method: Method, headers: HeaderMap, body: String) -> impl IntoResponse {
    let form = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"));
    let verb = matches!(method, Method::POST | Method::PUT | Method::DELETE);

    if form && verb && body == "key=TEST_HELLO" {
        (StatusCode::OK, "success")
    } else {
        (StatusCode::BAD_REQUEST, "fail")
    }
}

async fn auth_handler(headers: HeaderMap) -> impl IntoResponse {
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some("Basic c2NvdHQ6ZmluZQ==") => (StatusCode::OK, "success"),
        _ => (StatusCode::UNAUTHORIZED, "unauthorized"),
    }
}

async fn host_handler(request: Request) -> String {
    request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn echo_header_handler(headers: HeaderMap) -> String {
    let values: Vec<&str> = headers
        .get_all("x-custom-header")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    values.join(",")
}

async fn slow_handler() -> &'static str {
    tokio::time::sleep(Duration::from_secs(2)).await;
    "too late"
}

fn client(trace: bool) -> Client {
    let pool = Arc::new(Worker::new(4).expect("worker pool"));
    Client::new(pool, Duration::from_secs(5), trace)
}

fn capturing_client(trace: bool) -> (Client, Arc<Mutex<Vec<TimingRecord>>>) {
    let records = Arc::new(Mutex::new(Vec::new()));
    let captured = records.clone();
    let client = Client::builder()
        .pool(Arc::new(Worker::new(4).expect("worker pool")))
        .timeout(Duration::from_secs(5))
        .trace(trace)
        .sink(move |record: &TimingRecord| {
            captured.lock().push(record.clone());
        })
        .build()
        .expect("client");
    (client, records)
}

fn hello() -> Params {
    Params::from([("key", "TEST_HELLO")])
}

#[tokio::test]
async fn test_all_verbs_send_params() {
    let addr = serve(test_router()).await;
    let url = format!("http://{addr}/verb");
    let client = client(false);
    let params = hello();

    let responses = [
        client.get(&url, Some(&params)).await.expect("get"),
        client.post(&url, Some(&params)).await.expect("post"),
        client.put(&url, Some(&params)).await.expect("put"),
        client.delete(&url, Some(&params)).await.expect("delete"),
    ];

    for response in responses {
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.text(), "success");
    }
}

#[tokio::test]
async fn test_wrong_param_is_not_success() {
    let addr = serve(test_router()).await;
    let url = format!("http://{addr}/verb");
    let client = client(false);
    let params = Params::from([("key", "WRONG")]);

    let response = client.get(&url, Some(&params)).await.expect("get");
    assert_ne!(response.status(), StatusCode::OK);

    let response = client.post(&url, Some(&params)).await.expect("post");
    assert_ne!(response.status(), StatusCode::OK);
    assert_eq!(response.text(), "fail");
}

#[tokio::test]
async fn test_basic_auth() {
    let addr = serve(test_router()).await;
    let url = format!("http://{addr}/auth");

    let authorized = client(false);
    authorized.set_basic_auth("scott", "fine");
    let response = authorized.get(&url, None).await.expect("get");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text(), "success");

    let rejected = client(false);
    rejected.set_basic_auth("scott", "wrong");
    let response = rejected.get(&url, None).await.expect("get");
    assert_ne!(response.status(), StatusCode::OK);
    assert_ne!(response.text(), "success");
}

#[tokio::test]
async fn test_host_override_reaches_server() {
    let addr = serve(test_router()).await;
    let client = client(false);
    client.set_host("api.internal.example");

    let response = client
        .get(&format!("http://{addr}/host"), None)
        .await
        .expect("get");
    assert_eq!(response.text(), "api.internal.example");

    client.set_host("");
    let response = client
        .get(&format!("http://{addr}/host"), None)
        .await
        .expect("get");
    assert_eq!(response.text(), addr.to_string());
}

#[tokio::test]
async fn test_second_set_header_wins() {
    let addr = serve(test_router()).await;
    let client = client(false);
    client
        .set_header("x-custom-header", "first")
        .set_header("X-CUSTOM-HEADER", "second");

    let response = client
        .get(&format!("http://{addr}/echo-header"), None)
        .await
        .expect("get");
    assert_eq!(response.text(), "second");
}

#[tokio::test]
async fn test_header_names_are_title_cased_on_the_wire() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("address");

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut raw = Vec::new();
        let mut buf = [0u8; 1024];
        while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.expect("read request");
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 7\r\nConnection: close\r\n\r\nsuccess")
            .await
            .expect("write response");
        String::from_utf8_lossy(&raw).into_owned()
    });

    let client = client(false);
    client.set_header("x-mIxEd-case", "value");
    let response = client
        .get(&format!("http://{addr}/raw"), None)
        .await
        .expect("get");
    assert_eq!(response.text(), "success");

    let raw = server.await.expect("server task");
    assert!(raw.starts_with("GET /raw HTTP/1.1\r\n"), "request line: {raw}");
    assert!(raw.contains("\r\nX-Mixed-Case: value\r\n"), "headers: {raw}");
    assert!(raw.contains("\r\nHost: "), "headers: {raw}");
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let addr = serve(test_router()).await;
    let pool = Arc::new(Worker::new(1).expect("worker pool"));
    let client = Client::new(pool, Duration::from_millis(200), false);

    let err = client
        .get(&format!("http://{addr}/slow"), None)
        .await
        .expect_err("deadline should elapse");
    assert!(err.is_timeout(), "unexpected error: {err}");
    assert!(err.url().is_some());
}

#[tokio::test]
async fn test_one_record_per_request_when_tracing() {
    let addr = serve(test_router()).await;
    let (client, records) = capturing_client(true);
    let url = format!("http://{addr}/verb");
    let params = hello();

    client.get(&url, Some(&params)).await.expect("get");
    client.post(&url, Some(&params)).await.expect("post");

    let records = records.lock();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].method, "GET");
    assert_eq!(records[0].param, "key=TEST_HELLO");
    assert_eq!(records[0].body, "success");
    assert_eq!(records[1].method, "POST");
    assert!(records[1].url.ends_with("/verb"));
}

#[tokio::test]
async fn test_plain_http_record_has_no_tls_phase() {
    let addr = serve(test_router()).await;
    let (client, records) = capturing_client(true);

    client
        .get(&format!("http://{addr}/verb"), Some(&hello()))
        .await
        .expect("get");

    let records = records.lock();
    let record = &records[0];
    assert_eq!(record.tls_handshake, Duration::ZERO);
    assert_eq!(record.dns_lookup, Duration::ZERO);
    assert!(record.total >= record.server_processing + record.content_transfer);
    assert!(record.start_transfer >= record.pre_transfer);
    assert_eq!(record.connect, record.pre_transfer);
}

#[tokio::test]
async fn test_no_records_when_tracing_disabled() {
    let addr = serve(test_router()).await;
    let (client, records) = capturing_client(false);

    client
        .get(&format!("http://{addr}/verb"), Some(&hello()))
        .await
        .expect("get");

    assert!(records.lock().is_empty());
}

#[tokio::test]
async fn test_construction_failure_emits_no_record() {
    let (client, records) = capturing_client(true);

    let err = client.get("not a url", None).await.expect_err("malformed url");
    assert!(err.is_builder());

    let err = client
        .post("ftp://127.0.0.1/file", Some(&hello()))
        .await
        .expect_err("unsupported scheme");
    assert!(err.is_builder());

    client.set_header("x-broken", "line\nbreak");
    let err = client
        .get("http://127.0.0.1:9/", None)
        .await
        .expect_err("invalid stored header");
    assert!(err.is_builder());

    assert!(records.lock().is_empty());
}

#[tokio::test]
async fn test_connect_failure_still_emits_one_record() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("address");
    drop(listener);

    let (client, records) = capturing_client(true);
    let err = client
        .get(&format!("http://{addr}/"), None)
        .await
        .expect_err("nothing listening");
    assert!(err.is_connect(), "unexpected error: {err}");

    let records = records.lock();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].body, "");
}

/// Accepts one connection and answers with a head promising more body than sent.
async fn truncated_body_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("address");
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut raw = Vec::new();
        let mut buf = [0u8; 1024];
        while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.expect("read request");
            if n == 0 {
                return;
            }
            raw.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nhello")
            .await
            .expect("write response");
        socket.shutdown().await.expect("shutdown");
    });
    addr
}

#[tokio::test]
async fn test_truncated_body_is_a_body_error() {
    let addr = truncated_body_server().await;
    let (client, records) = capturing_client(true);

    let result = client.get(&format!("http://{addr}/short"), None).await;
    let err = result.expect_err("body ends before Content-Length");
    assert!(err.is_body(), "unexpected error: {err}");
    assert!(!err.is_timeout());
    assert!(err.url().is_some());

    let records = records.lock();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].body, "");
    assert!(records[0].total > Duration::ZERO);
}

#[tokio::test]
async fn test_unbounded_timeout_is_clamped() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("address");
    drop(listener);

    let pool = Arc::new(Worker::new(1).expect("worker pool"));
    let client = Client::new(pool, Duration::MAX, false);
    assert_eq!(client.config().timeout, MAX_TIMEOUT);

    let err = client
        .get(&format!("http://{addr}/"), None)
        .await
        .expect_err("nothing listening");
    assert!(err.is_connect(), "unexpected error: {err}");
}

fn written_value(value: &str) -> bool {
    if value == "initial" {
        return true;
    }
    let Some(rest) = value.strip_prefix("writer-") else {
        return false;
    };
    let mut parts = rest.split('-');
    let writer = parts.next().and_then(|p| p.parse::<usize>().ok());
    let round = parts.next().and_then(|p| p.parse::<usize>().ok());
    matches!((writer, round, parts.next()), (Some(w), Some(r), None) if w < 4 && r < 50)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_header_writes_race_with_in_flight_requests() {
    let addr = serve(test_router()).await;
    let url = format!("http://{addr}/echo-header");
    let pool = Arc::new(Worker::new(8).expect("worker pool"));
    let client = Client::new(pool, Duration::from_secs(5), false);
    client.set_header("x-custom-header", "initial");

    let mut writers = Vec::new();
    for writer in 0..4 {
        let client = client.clone();
        writers.push(tokio::spawn(async move {
            for round in 0..50 {
                client.set_header("x-custom-header", &format!("writer-{writer}-{round}"));
                tokio::task::yield_now().await;
            }
        }));
    }

    let mut requests = Vec::new();
    for _ in 0..16 {
        let client = client.clone();
        let url = url.clone();
        requests.push(tokio::spawn(async move { client.get(&url, None).await }));
    }

    for writer in writers {
        writer.await.expect("writer task");
    }
    for request in requests {
        let response = request.await.expect("request task").expect("request");
        assert_eq!(response.status(), StatusCode::OK);
        let observed = response.text();
        assert!(written_value(&observed), "torn or unknown value: {observed:?}");
    }

    let last = client
        .headers()
        .get("X-Custom-Header")
        .cloned()
        .expect("header stored");
    assert!(last.starts_with("writer-") && written_value(&last), "final value: {last:?}");
}
