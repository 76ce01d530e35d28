use anyhow::Result;
use credit_relay::FAILURE_MESSAGE;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::utils::{relay_config, spawn_relay, TEST_TOKEN};

async fn upstream() -> (MockServer, String) {
    let server = MockServer::start().await;
    let base = format!("{}/api/score/address", server.uri());
    (server, base)
}

#[tokio::test]
async fn test_issues_one_get_with_token_header() -> Result<()> {
    let (server, base) = upstream().await;
    Mock::given(method("GET"))
        .and(path("/api/score/address/0xAbC123/"))
        .and(header("authorization", format!("Token {TEST_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"score": 742})))
        .expect(1)
        .mount(&server)
        .await;

    let relay = spawn_relay(relay_config(&base)).await?;
    let response = relay.get("0xAbC123").await?;
    assert_eq!(response.status(), 200);

    server.verify().await;
    Ok(())
}

#[tokio::test]
async fn test_success_body_passes_through_unchanged() -> Result<()> {
    let (server, base) = upstream().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"score": 742}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let relay = spawn_relay(relay_config(&base)).await?;
    let response = relay.get("0xabc").await?;

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str()?,
        "application/json"
    );
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.text().await?, r#"{"score": 742}"#);
    Ok(())
}

#[tokio::test]
async fn test_upstream_404_passes_through_unchanged() -> Result<()> {
    let (server, base) = upstream().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404).set_body_raw(r#"{"error":"not found"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let relay = spawn_relay(relay_config(&base)).await?;
    let response = relay.get("0xunknown").await?;

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await?;
    assert_eq!(body, json!({"error": "not found"}));
    Ok(())
}

#[tokio::test]
async fn test_upstream_5xx_status_is_not_translated() -> Result<()> {
    let (server, base) = upstream().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway upstream"))
        .mount(&server)
        .await;

    let relay = spawn_relay(relay_config(&base)).await?;
    let response = relay.get("0xabc").await?;

    assert_eq!(response.status(), 502);
    assert_eq!(response.text().await?, "bad gateway upstream");
    Ok(())
}

#[tokio::test]
async fn test_connection_refused_is_500_and_relay_keeps_serving() -> Result<()> {
    let relay = spawn_relay(relay_config("http://127.0.0.1:1/api/score/address")).await?;

    for _ in 0..2 {
        let response = relay.get("0xabc").await?;
        assert_eq!(response.status(), 500);
        assert_eq!(response.text().await?, FAILURE_MESSAGE);
    }
    Ok(())
}

#[tokio::test]
async fn test_upstream_timeout_is_500() -> Result<()> {
    let (server, base) = upstream().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"score": 1}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut config = relay_config(&base);
    config.upstream_timeout_ms = 200;
    let relay = spawn_relay(config).await?;

    let response = relay.get("0xslow").await?;
    assert_eq!(response.status(), 500);
    assert_eq!(response.text().await?, FAILURE_MESSAGE);
    Ok(())
}

#[tokio::test]
async fn test_back_to_back_addresses_are_independent() -> Result<()> {
    let (server, base) = upstream().await;
    Mock::given(method("GET"))
        .and(path("/api/score/address/0xaaa/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"score": 100})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/score/address/0xbbb/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"score": 900})))
        .expect(1)
        .mount(&server)
        .await;

    let relay = spawn_relay(relay_config(&base)).await?;

    let first: Value = relay.get("0xaaa").await?.json().await?;
    let second: Value = relay.get("0xbbb").await?.json().await?;
    assert_eq!(first, json!({"score": 100}));
    assert_eq!(second, json!({"score": 900}));

    server.verify().await;
    assert_eq!(server.received_requests().await.map(|r| r.len()), Some(2));
    Ok(())
}

#[tokio::test]
async fn test_shutdown_cancels_in_flight_upstream_call() -> Result<()> {
    let (server, base) = upstream().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"score": 1}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut config = relay_config(&base);
    config.upstream_timeout_ms = 10_000;
    let relay = spawn_relay(config).await?;

    let shutdown = relay.state.shutdown.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        shutdown.cancel();
    });

    let started = Instant::now();
    let response = relay.get("0xabc").await?;
    assert_eq!(response.status(), 500);
    assert!(started.elapsed() < Duration::from_secs(3));
    Ok(())
}

#[tokio::test]
async fn test_caller_disconnect_cancels_upstream_call() -> Result<()> {
    // Upstream that accepts and never answers; reports how long the relay
    // kept the connection open.
    let upstream = TcpListener::bind("127.0.0.1:0").await?;
    let base = format!("http://{}/api/score/address", upstream.local_addr()?);
    let (closed_tx, closed_rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        let Ok((mut socket, _)) = upstream.accept().await else {
            return;
        };
        let accepted = Instant::now();
        let mut buf = [0u8; 1024];
        while let Ok(n) = socket.read(&mut buf).await {
            if n == 0 {
                break;
            }
        }
        let _ = closed_tx.send(accepted.elapsed());
    });

    let mut config = relay_config(&base);
    config.upstream_timeout_ms = 10_000;
    let relay = spawn_relay(config).await?;

    let impatient = reqwest::Client::builder()
        .timeout(Duration::from_millis(300))
        .build()?;
    assert!(impatient.get(relay.url("0xabc")).send().await.is_err());

    let held_open = tokio::time::timeout(Duration::from_secs(5), closed_rx).await??;
    assert!(
        held_open < Duration::from_secs(3),
        "upstream connection held open for {held_open:?}"
    );
    Ok(())
}
