//! Admission, deadline and shutdown behaviour of the bundled worker pool

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use greq_client::config::{HttpConfig, SharedDefaults, WorkerConfig};
use greq_client::http::OutboundRequest;
use greq_client::pool::Worker;
use greq_client::trace::NoopSink;
use greq_client::RequestExecutor;
use tokio::net::TcpListener;

async fn slow_server(delay: Duration) -> String {
    let router = Router::new().route(
        "/",
        get(move || async move {
            tokio::time::sleep(delay).await;
            "done"
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    format!("http://{addr}/")
}

fn executor(worker: Arc<Worker>, timeout: Duration) -> RequestExecutor {
    RequestExecutor::new(
        worker,
        Arc::new(SharedDefaults::new()),
        HttpConfig::default().with_timeout(timeout),
        Arc::new(NoopSink),
    )
}

#[test]
fn test_zero_workers_rejected() {
    let err = Worker::new(0).expect_err("zero workers");
    assert!(err.is_builder());
}

#[test]
fn test_config_applies_bound() {
    let config = WorkerConfig::default()
        .with_max_workers(3)
        .with_connect_timeout(Duration::from_secs(1));
    let worker = Worker::with_config(config).expect("worker");
    assert_eq!(worker.max_workers(), 3);
    assert_eq!(worker.available(), 3);
}

#[tokio::test]
async fn test_single_slot_serializes_requests() {
    let url = slow_server(Duration::from_millis(300)).await;
    let worker = Arc::new(Worker::new(1).expect("worker"));
    let executor = executor(worker.clone(), Duration::from_millis(450));

    let first = executor.resolve(OutboundRequest::new(http::Method::GET, &url, None));
    let second = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        executor
            .resolve(OutboundRequest::new(http::Method::GET, &url, None))
            .await
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first.expect("first request").text(), "done");
    let err = second.expect_err("second request waits past its deadline");
    assert!(err.is_timeout(), "unexpected error: {err}");
    assert_eq!(worker.available(), 1);
}

#[tokio::test]
async fn test_slot_released_after_each_request() {
    let url = slow_server(Duration::ZERO).await;
    let worker = Arc::new(Worker::new(2).expect("worker"));
    let executor = executor(worker.clone(), Duration::from_secs(5));

    for _ in 0..3 {
        let response = executor
            .resolve(OutboundRequest::new(http::Method::GET, &url, None))
            .await
            .expect("request");
        assert!(response.is_success());
    }
    assert_eq!(worker.available(), 2);
}

#[tokio::test]
async fn test_closed_pool_rejects_work() {
    let url = slow_server(Duration::ZERO).await;
    let worker = Arc::new(Worker::new(2).expect("worker"));
    worker.close();
    assert!(worker.is_closed());

    let executor = executor(worker, Duration::from_secs(1));
    let err = executor
        .resolve(OutboundRequest::new(http::Method::GET, &url, None))
        .await
        .expect_err("closed pool");
    assert!(err.is_pool(), "unexpected error: {err}");
}
