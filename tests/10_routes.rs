mod common;

use anyhow::Result;
use axum::http::StatusCode;

#[tokio::test]
async fn root_describes_the_service() -> Result<()> {
    let app = common::test_app();

    let resp = common::send(app, common::get_request("/")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let payload = common::body_json(resp).await;
    assert!(payload["success"].as_bool().unwrap_or(false), "success=false: {}", payload);
    assert_eq!(payload["data"]["name"], "CLIC Content API");
    assert!(payload["data"]["endpoints"].is_object());

    Ok(())
}

#[tokio::test]
async fn health_reports_degraded_when_database_is_unreachable() -> Result<()> {
    let app = common::test_app();

    let resp = common::send(app, common::get_request("/health")).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let payload = common::body_json(resp).await;
    assert_eq!(payload["success"], serde_json::json!(false));
    assert_eq!(payload["data"]["status"], serde_json::json!("degraded"));

    Ok(())
}

#[tokio::test]
async fn unknown_route_is_404() -> Result<()> {
    let app = common::test_app();

    let resp = common::send(app, common::get_request("/api/nothing/here")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn content_routes_require_a_tenant_domain() -> Result<()> {
    for uri in [
        "/api/content/home",
        "/api/content/contact",
        "/api/content/articles",
        "/api/content/properties",
        "/api/content/advisors",
        "/api/content/testimonials",
    ] {
        let app = common::test_app();
        let resp = common::send(app, common::get_request(uri)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);

        let payload = common::body_json(resp).await;
        assert_eq!(payload["success"], serde_json::json!(false));
        assert_eq!(payload["error"], serde_json::json!("Missing tenant domain"));
    }

    Ok(())
}
