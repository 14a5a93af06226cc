//! Integration tests for the lookup endpoint.
//!
//! These tests bind the real router on an ephemeral port and drive it with
//! reqwest against httptest upstreams. They do not reach the real
//! enrichment providers: every upstream base is either a mock server or a
//! closed local port.

mod helpers;

use httptest::{matchers::*, responders::*, Expectation, Server};
use serde_json::{json, Value};

use helpers::{offline_config, spawn_app};
use ioc_enrich::config::Config;

#[tokio::test]
async fn test_missing_query_returns_400() {
    let base = spawn_app(offline_config()).await;

    let response = reqwest::get(format!("{base}/api/lookup"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("body should be JSON");
    assert!(
        body["error"].is_string(),
        "400 body should carry an error key: {body}"
    );
}

#[tokio::test]
async fn test_empty_query_returns_400() {
    let base = spawn_app(offline_config()).await;

    let response = reqwest::get(format!("{base}/api/lookup?query=%20%20"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_type_hint_contradiction_returns_400() {
    let base = spawn_app(offline_config()).await;

    let response = reqwest::get(format!("{base}/api/lookup?query=example.com&type=ip"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("body should be JSON");
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("contradicts"));
}

#[tokio::test]
async fn test_unknown_type_hint_returns_400() {
    let base = spawn_app(offline_config()).await;

    let response = reqwest::get(format!("{base}/api/lookup?query=8.8.8.8&type=url"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_cors_headers_present_on_every_response() {
    let base = spawn_app(offline_config()).await;

    // Even a validation failure carries the full header set.
    let response = reqwest::get(format!("{base}/api/lookup"))
        .await
        .expect("request should succeed");
    let headers = response.headers();
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "GET");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}

#[tokio::test]
async fn test_ip_lookup_embeds_stubbed_geo_section() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/json/8.8.8.8")).respond_with(
            json_encoded(json!({"status": "success", "country": "United States"})),
        ),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/data/whois/data.json"))
            .respond_with(json_encoded(json!({"data": {"records": []}}))),
    );

    let upstream = format!("http://{}", server.addr());
    let config = Config {
        geo_base: upstream.clone(),
        whois_ip_base: upstream.clone(),
        // The threat section is a keyless stub; no call is made.
        threat_base: upstream,
        ..Default::default()
    };
    let base = spawn_app(config).await;

    let response = reqwest::get(format!("{base}/api/lookup?query=8.8.8.8"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("body should be JSON");
    assert_eq!(body["status"], "success");
    assert_eq!(body["query"], "8.8.8.8");
    assert_eq!(body["ioc_type"], "ip");
    assert_eq!(body["data"]["geo"]["country"], "United States");
    assert_eq!(body["data"]["threat"]["stub"], true);
    assert!(body["data"]["whois"]["data"].is_object());
    assert!(body["timestamp"].is_i64());
}

#[tokio::test]
async fn test_domain_lookup_uses_domain_whois_endpoint() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/json/example.com"))
            .respond_with(json_encoded(json!({"status": "success"}))),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/v1/whois"))
            .respond_with(json_encoded(json!({"registrar": "Example Registrar"}))),
    );

    let upstream = format!("http://{}", server.addr());
    let config = Config {
        geo_base: upstream.clone(),
        whois_domain_base: upstream.clone(),
        threat_base: upstream,
        ..Default::default()
    };
    let base = spawn_app(config).await;

    let response = reqwest::get(format!("{base}/api/lookup?query=example.com"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("body should be JSON");
    assert_eq!(body["ioc_type"], "domain");
    assert_eq!(body["data"]["whois"]["registrar"], "Example Registrar");
    // The reputation provider only takes IPs; the section degrades.
    assert!(body["data"]["threat"]["error"].is_string());
}

#[tokio::test]
async fn test_unreachable_geo_provider_degrades_to_placeholder() {
    // All upstreams refuse connections; the lookup must still succeed.
    let base = spawn_app(offline_config()).await;

    let response = reqwest::get(format!("{base}/api/lookup?query=8.8.8.8"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("body should be JSON");
    assert_eq!(body["status"], "success");
    let geo_error = body["data"]["geo"]["error"]
        .as_str()
        .expect("geo section should be the error placeholder");
    assert!(geo_error.starts_with("geolocation:"));
    let whois_error = body["data"]["whois"]["error"]
        .as_str()
        .expect("whois section should be the error placeholder");
    assert!(whois_error.starts_with("whois:"));
}

#[tokio::test]
async fn test_repeated_lookup_is_served_from_cache() {
    let server = Server::run();
    // Exactly one upstream round per source: the second request must be a
    // cache hit. The server verifies call counts on drop.
    server.expect(
        Expectation::matching(request::method_path("GET", "/json/1.1.1.1"))
            .times(1)
            .respond_with(json_encoded(json!({"status": "success", "country": "Australia"}))),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/data/whois/data.json"))
            .times(1)
            .respond_with(json_encoded(json!({"data": {}}))),
    );

    let upstream = format!("http://{}", server.addr());
    let config = Config {
        geo_base: upstream.clone(),
        whois_ip_base: upstream.clone(),
        threat_base: upstream,
        ..Default::default()
    };
    let base = spawn_app(config).await;

    let url = format!("{base}/api/lookup?query=1.1.1.1");
    let first = reqwest::get(&url)
        .await
        .expect("request should succeed")
        .text()
        .await
        .expect("should read body");
    let second = reqwest::get(&url)
        .await
        .expect("request should succeed")
        .text()
        .await
        .expect("should read body");

    assert_eq!(first, second, "cached replay should be byte-identical");
}

#[tokio::test]
async fn test_cache_is_keyed_by_normalized_query() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/json/9.9.9.9"))
            .times(1)
            .respond_with(json_encoded(json!({"status": "success"}))),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/data/whois/data.json"))
            .times(1)
            .respond_with(json_encoded(json!({"data": {}}))),
    );

    let upstream = format!("http://{}", server.addr());
    let config = Config {
        geo_base: upstream.clone(),
        whois_ip_base: upstream.clone(),
        threat_base: upstream,
        ..Default::default()
    };
    let base = spawn_app(config).await;

    // Scheme, path, and case differences normalize to one cache slot.
    let first = reqwest::get(format!("{base}/api/lookup?query=HTTP%3A%2F%2F9.9.9.9%2F"))
        .await
        .expect("request should succeed");
    assert_eq!(first.status(), 200);
    let body: Value = first.json().await.expect("body should be JSON");
    assert_eq!(body["query"], "9.9.9.9");

    let second = reqwest::get(format!("{base}/api/lookup?query=9.9.9.9"))
        .await
        .expect("request should succeed");
    assert_eq!(second.status(), 200);
}

#[tokio::test]
async fn test_status_endpoint_reports_counters() {
    let base = spawn_app(offline_config()).await;

    // One validation failure, then one lookup with failing upstreams.
    let _ = reqwest::get(format!("{base}/api/lookup"))
        .await
        .expect("request should succeed");
    let _ = reqwest::get(format!("{base}/api/lookup?query=8.8.8.8"))
        .await
        .expect("request should succeed");

    let response = reqwest::get(format!("{base}/status"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("body should be JSON");
    assert_eq!(body["lookups"], 2);
    assert_eq!(body["validation_failures"], 1);
    assert_eq!(body["cached_entries"], 1);
    assert!(
        body["upstream_errors"]["total"].as_u64().expect("total") >= 2,
        "geo and whois failures should be counted: {body}"
    );
}
