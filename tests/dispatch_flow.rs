//! End-to-end dispatch tests over real sockets.

use std::sync::atomic::Ordering;

use front_controller::config::ControllerConfig;

mod common;

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("client")
}

#[tokio::test]
async fn test_page_request_runs_full_lifecycle() {
    let server = common::start_server(ControllerConfig::default()).await;

    let res = client()
        .get(server.url("/view/home"))
        .send()
        .await
        .expect("server reachable");

    assert_eq!(res.status(), 200);
    let body = res.text().await.expect("body");
    assert!(body.contains("view: /view/home"), "body was: {body}");

    assert_eq!(server.counters.acquired.load(Ordering::SeqCst), 1);
    assert_eq!(server.counters.released.load(Ordering::SeqCst), 1);
    assert_eq!(server.counters.executed.load(Ordering::SeqCst), 1);
    assert_eq!(server.counters.rendered.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_disallowed_method_gets_400_before_any_context() {
    let server = common::start_server(ControllerConfig::default()).await;

    // PATCH is outside the canonical HTTP/1.1 default set.
    let res = client()
        .patch(server.url("/view/home"))
        .send()
        .await
        .expect("server reachable");

    assert_eq!(res.status(), 400);
    assert_eq!(server.counters.acquired.load(Ordering::SeqCst), 0);
    assert_eq!(server.counters.executed.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_wildcard_config_admits_any_method() {
    let mut config = ControllerConfig::default();
    config.dispatch.allowed_http_methods = Some("*".to_string());
    let server = common::start_server(config).await;

    let res = client()
        .patch(server.url("/view/home"))
        .send()
        .await
        .expect("server reachable");

    assert_eq!(res.status(), 200);
    assert_eq!(server.counters.acquired.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_reserved_paths_get_404_in_any_casing() {
    let server = common::start_server(ControllerConfig::default()).await;

    for path in [
        "/WEB-INF/web.xml",
        "/WEB-INF",
        "/web-inf/config",
        "/META-INF/MANIFEST.MF",
        "/meta-inf",
    ] {
        let res = client()
            .get(server.url(path))
            .send()
            .await
            .expect("server reachable");
        assert_eq!(res.status(), 404, "{path} should be rejected");
    }

    assert_eq!(server.counters.acquired.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_lifecycle_fault_surfaces_as_error_page_and_still_releases() {
    let server = common::start_server(ControllerConfig::default()).await;

    let res = client()
        .get(server.url("/boom"))
        .send()
        .await
        .expect("server reachable");

    assert_eq!(res.status(), 500);
    let body = res.text().await.expect("body");
    assert!(body.contains("boom page"), "body was: {body}");

    assert_eq!(server.counters.acquired.load(Ordering::SeqCst), 1);
    assert_eq!(server.counters.released.load(Ordering::SeqCst), 1);
    assert_eq!(server.counters.rendered.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_resource_request_bypasses_lifecycle() {
    let server = common::start_server(ControllerConfig::default()).await;

    let res = client()
        .get(server.url("/assets/app.css"))
        .send()
        .await
        .expect("server reachable");

    assert_eq!(res.status(), 200);
    let body = res.text().await.expect("body");
    assert_eq!(body, "asset bytes");

    assert_eq!(server.counters.resource_handled.load(Ordering::SeqCst), 1);
    assert_eq!(server.counters.executed.load(Ordering::SeqCst), 0);
    assert_eq!(server.counters.rendered.load(Ordering::SeqCst), 0);
    assert_eq!(server.counters.released.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_mapping_prefix_scopes_the_reserved_check() {
    let mut config = ControllerConfig::default();
    config.dispatch.mapping_prefix = "/app".to_string();
    let server = common::start_server(config).await;

    // Reserved only relative to the mapping, not the full path.
    let res = client()
        .get(server.url("/app/WEB-INF/x"))
        .send()
        .await
        .expect("server reachable");
    assert_eq!(res.status(), 404);

    let res = client()
        .get(server.url("/app/view/home"))
        .send()
        .await
        .expect("server reachable");
    assert_eq!(res.status(), 200);
}
