mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

const DEVICE: &str = "11111111-1111-4111-8111-111111111111";
const LIST: &str = "22222222-2222-4222-8222-222222222222";
const PROPERTY: &str = "33333333-3333-4333-8333-333333333333";

#[tokio::test]
async fn malformed_device_id_is_rejected_before_storage() -> Result<()> {
    let app = common::test_app();

    let resp = common::send(app, common::get_request("/api/favorites/not-a-uuid")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let payload = common::body_json(resp).await;
    assert_eq!(payload["success"], json!(false));
    assert_eq!(payload["error"], json!("Invalid device id: not a UUID"));

    Ok(())
}

#[tokio::test]
async fn malformed_property_id_in_add_body_is_rejected() -> Result<()> {
    let app = common::test_app();

    let req = common::json_request(
        "POST",
        &format!("/api/favorites/{}/properties", DEVICE),
        json!({ "propertyId": "xyz" }),
    );
    let resp = common::send(app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let payload = common::body_json(resp).await;
    assert_eq!(payload["error"], json!("Invalid property id: not a UUID"));

    Ok(())
}

#[tokio::test]
async fn implausible_email_is_rejected_on_link_and_recover() -> Result<()> {
    for (method, uri) in [
        ("PUT", format!("/api/favorites/{}/email", DEVICE)),
        ("POST", format!("/api/favorites/{}/recover", DEVICE)),
    ] {
        let app = common::test_app();
        let req = common::json_request(method, &uri, json!({ "email": "not-an-email" }));
        let resp = common::send(app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);

        let payload = common::body_json(resp).await;
        assert_eq!(payload["error"], json!("Invalid email address"));
    }

    Ok(())
}

#[tokio::test]
async fn unknown_reaction_kind_is_rejected() -> Result<()> {
    let app = common::test_app();

    let req = common::json_request(
        "POST",
        &format!("/api/favorites/lists/{}/reactions", LIST),
        json!({ "propertyId": PROPERTY, "deviceId": DEVICE, "kind": "love" }),
    );
    let resp = common::send(app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let payload = common::body_json(resp).await;
    assert_eq!(
        payload["error"],
        json!("Reaction kind must be like, dislike or comment")
    );

    Ok(())
}

#[tokio::test]
async fn comment_reaction_requires_text() -> Result<()> {
    let app = common::test_app();

    let req = common::json_request(
        "POST",
        &format!("/api/favorites/lists/{}/reactions", LIST),
        json!({ "propertyId": PROPERTY, "deviceId": DEVICE, "kind": "comment", "comment": "   " }),
    );
    let resp = common::send(app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let payload = common::body_json(resp).await;
    assert_eq!(payload["error"], json!("Comment text is required"));

    Ok(())
}

#[tokio::test]
async fn comment_delete_requires_valid_ids() -> Result<()> {
    let app = common::test_app();

    let req = common::json_request(
        "DELETE",
        "/api/favorites/comments/999",
        json!({ "deviceId": DEVICE }),
    );
    let resp = common::send(app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let payload = common::body_json(resp).await;
    assert_eq!(payload["error"], json!("Invalid comment id: not a UUID"));

    Ok(())
}
