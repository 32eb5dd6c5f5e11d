mod common;

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{Router, http::StatusCode, routing::get};
use feedhub_api::server::services::network_services::{
    NetworkService, NetworkServiceTrait, best_local_ip,
};

use common::spawn_server;

fn v4(a: u8, b: u8, c: u8, d: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(a, b, c, d))
}

async fn text_server(body: &'static str) -> String {
    spawn_server(Router::new().route("/", get(move || async move { body }))).await
}

fn service(endpoints: Vec<String>, timeout: Duration) -> NetworkService {
    NetworkService::with_endpoints(reqwest::Client::new(), endpoints, timeout)
}

#[test]
fn test_best_local_ip_prefers_home_networks() {
    let candidates = vec![
        v4(127, 0, 0, 1),
        v4(172, 17, 0, 1),
        v4(10, 8, 0, 2),
        v4(192, 168, 1, 5),
    ];

    assert_eq!(best_local_ip(candidates), Some(v4(192, 168, 1, 5)));
}

#[test]
fn test_best_local_ip_ranking_falls_through() {
    assert_eq!(
        best_local_ip(vec![v4(172, 20, 0, 3), v4(10, 0, 0, 7)]),
        Some(v4(10, 0, 0, 7))
    );
    assert_eq!(
        best_local_ip(vec![v4(100, 64, 0, 1), v4(172, 20, 0, 3)]),
        Some(v4(172, 20, 0, 3))
    );
    assert_eq!(
        best_local_ip(vec![v4(100, 64, 0, 1), v4(169, 254, 3, 3)]),
        Some(v4(100, 64, 0, 1))
    );
}

#[test]
fn test_best_local_ip_skips_loopback_link_local_and_v6() {
    let candidates = vec![
        v4(127, 0, 0, 1),
        v4(169, 254, 10, 10),
        v4(0, 0, 0, 0),
        IpAddr::V6(Ipv6Addr::LOCALHOST),
    ];

    assert_eq!(best_local_ip(candidates), None);
}

#[tokio::test]
async fn test_first_well_formed_answer_wins() {
    let empty = text_server("").await;
    let garbage = text_server("<html>rate limited</html>").await;
    let good = text_server("203.0.113.7\n").await;

    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let never = spawn_server(Router::new().route(
        "/",
        get(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { "198.51.100.1" }
        }),
    ))
    .await;

    let service = service(vec![empty, garbage, good, never], Duration::from_secs(2));

    assert_eq!(service.public_ip().await, Some(v4(203, 0, 113, 7)));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_error_status_is_skipped() {
    let failing = spawn_server(Router::new().route(
        "/",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "1.1.1.1") }),
    ))
    .await;
    let good = text_server("2001:db8::1").await;

    let service = service(vec![failing, good], Duration::from_secs(2));

    assert_eq!(
        service.public_ip().await,
        Some("2001:db8::1".parse::<IpAddr>().unwrap())
    );
}

#[tokio::test]
async fn test_slow_service_times_out_and_next_is_tried() {
    let slow = spawn_server(Router::new().route(
        "/",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "192.0.2.1"
        }),
    ))
    .await;
    let good = text_server("192.0.2.2").await;

    let service = service(vec![slow, good], Duration::from_millis(300));

    assert_eq!(service.public_ip().await, Some(v4(192, 0, 2, 2)));
}

#[tokio::test]
async fn test_all_services_failing_is_unavailable() {
    let empty = text_server("   ").await;

    // nothing listens on port 1
    let service = service(
        vec!["http://127.0.0.1:1".to_string(), empty],
        Duration::from_secs(1),
    );

    assert_eq!(service.public_ip().await, None);
}

#[tokio::test]
async fn test_no_services_is_unavailable() {
    let service = service(Vec::new(), Duration::from_secs(1));

    assert_eq!(service.public_ip().await, None);
}
