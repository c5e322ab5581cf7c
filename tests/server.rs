//! Tests against a real listener.

use std::time::{Duration, Instant};

use axum::http::StatusCode;

use payment_latency_api::Config;

mod common;

use common::{RunningServer, PAYMENT_PATH, SECRET};

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn test_serves_health_and_info() {
    let server = RunningServer::start(Config::new(SECRET).with_region("eu-west-1")).await;
    let client = client();

    let res = client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert!(res
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["region"], "eu-west-1");
    assert_eq!(body["database"], "not_configured");

    let res = client.get(server.url("/info")).send().await.unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["name"], "payment-latency-api");

    assert_eq!(server.sink.outcomes().len(), 2);
    server.stop().await;
}

#[tokio::test]
async fn test_payment_wait_does_not_block_other_requests() {
    let server = RunningServer::start(Config::new(SECRET).with_region("xx-test-1")).await;
    let client = client();
    let url = server.url(PAYMENT_PATH);

    let started = Instant::now();
    let tasks: Vec<_> = (0..10)
        .map(|_| {
            let client = client.clone();
            let url = url.clone();
            tokio::spawn(async move {
                client
                    .post(url)
                    .header("X-API-Key", SECRET)
                    .send()
                    .await
                    .unwrap()
                    .status()
            })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), 200);
    }

    // Ten fixed 100 ms waits served one after another would take a full second.
    assert!(started.elapsed() < Duration::from_millis(900));
    assert_eq!(
        server.sink.request_count("POST", PAYMENT_PATH, StatusCode::OK),
        10
    );
    assert_eq!(server.sink.payment_durations().len(), 10);
    server.stop().await;
}

#[tokio::test]
async fn test_rejections_over_the_wire() {
    let server = RunningServer::start(Config::new(SECRET)).await;
    let client = client();

    let res = client.post(server.url(PAYMENT_PATH)).send().await.unwrap();
    assert_eq!(res.status(), 401);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Missing X-API-Key header");

    let res = client
        .post(server.url(PAYMENT_PATH))
        .header("X-API-Key", "guess")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 403);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Invalid API key");

    server.stop().await;
}

#[tokio::test]
async fn test_stops_on_shutdown() {
    let server = RunningServer::start(Config::new(SECRET)).await;
    let addr = server.addr;
    server.stop().await;

    let res = client()
        .get(format!("http://{}/health", addr))
        .timeout(Duration::from_secs(1))
        .send()
        .await;
    assert!(res.is_err());
}
