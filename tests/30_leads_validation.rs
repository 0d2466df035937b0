mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn lead_without_tenant_domain_is_rejected() -> Result<()> {
    let app = common::test_app();

    let req = common::json_request(
        "POST",
        "/api/leads",
        json!({
            "name": "Ana Pérez",
            "email": "ana@example.com",
            "message": "Quiero más información"
        }),
    );
    let resp = common::send(app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let payload = common::body_json(resp).await;
    assert_eq!(payload["success"], json!(false));
    assert_eq!(payload["error"], json!("Missing tenant domain"));

    Ok(())
}
