use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::api::text::{plausible_email, sanitize_text};
use crate::config::config;
use crate::database::models::favorites::{CommentRow, FavoritesListRow, ReactionCountRow};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::favorites_service::{FavoritesService, ReactionKind};
use crate::AppState;

use super::parse_id;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesListView {
    id: Uuid,
    device_id: Uuid,
    public_code: String,
    owner_name: Option<String>,
    owner_email: Option<String>,
    property_ids: Vec<Uuid>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<FavoritesListRow> for FavoritesListView {
    fn from(row: FavoritesListRow) -> Self {
        Self {
            id: row.id,
            device_id: row.device_id,
            public_code: row.public_code,
            owner_name: row.owner_name,
            owner_email: row.owner_email,
            property_ids: row.property_ids,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// GET /api/favorites/:device_id - the device's list
pub async fn list_get(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> ApiResult<FavoritesListView> {
    let device_id = parse_id(&device_id, "device id")?;

    let list = FavoritesService::new(state.pool.clone())
        .find_by_device(device_id)
        .await?
        .ok_or_else(|| ApiError::not_found("No favorites list for this device"))?;

    Ok(ApiResponse::success(list.into()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPropertyBody {
    pub property_id: String,
}

/// POST /api/favorites/:device_id/properties - idempotent add. `created`
/// tells the front end the list was just made, so it can prompt for email
/// linking.
pub async fn property_add(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Json(body): Json<AddPropertyBody>,
) -> ApiResult<Value> {
    let device_id = parse_id(&device_id, "device id")?;
    let property_id = parse_id(&body.property_id, "property id")?;

    let (list, created) = FavoritesService::new(state.pool.clone())
        .add_property(device_id, property_id)
        .await?;

    Ok(ApiResponse::success(json!({
        "list": FavoritesListView::from(list),
        "created": created,
    })))
}

/// DELETE /api/favorites/:device_id/properties/:property_id
pub async fn property_remove(
    State(state): State<AppState>,
    Path((device_id, property_id)): Path<(String, String)>,
) -> ApiResult<FavoritesListView> {
    let device_id = parse_id(&device_id, "device id")?;
    let property_id = parse_id(&property_id, "property id")?;

    let list = FavoritesService::new(state.pool.clone())
        .remove_property(device_id, property_id)
        .await?;

    Ok(ApiResponse::success(list.into()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkEmailBody {
    pub email: String,
    pub owner_name: Option<String>,
}

/// PUT /api/favorites/:device_id/email - bind an owner email to the list.
/// An email already bound to a different device is a conflict; without this
/// check two devices could claim the same email non-deterministically.
pub async fn email_link(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Json(body): Json<LinkEmailBody>,
) -> ApiResult<FavoritesListView> {
    let device_id = parse_id(&device_id, "device id")?;

    let email = body.email.trim().to_lowercase();
    if !plausible_email(&email) {
        return Err(ApiError::validation("Invalid email address"));
    }

    let service = FavoritesService::new(state.pool.clone());

    if let Some(existing) = service.find_by_email(&email).await? {
        if existing.device_id != device_id {
            return Err(ApiError::conflict(
                "Email is already linked to another favorites list",
            ));
        }
    }

    let owner_name = body
        .owner_name
        .as_deref()
        .map(|n| sanitize_text(n, config().favorites.max_alias_length))
        .filter(|n| !n.is_empty());

    let list = service
        .link_email(device_id, &email, owner_name.as_deref())
        .await?;

    Ok(ApiResponse::success(list.into()))
}

#[derive(Debug, Deserialize)]
pub struct RecoverBody {
    pub email: String,
}

/// POST /api/favorites/:device_id/recover - merge the list bound to an
/// email into this device's list (new device after losing the old one).
pub async fn recover_post(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Json(body): Json<RecoverBody>,
) -> ApiResult<FavoritesListView> {
    let device_id = parse_id(&device_id, "device id")?;

    let email = body.email.trim().to_lowercase();
    if !plausible_email(&email) {
        return Err(ApiError::validation("Invalid email address"));
    }

    let service = FavoritesService::new(state.pool.clone());

    let source = service
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::not_found("No favorites list linked to this email"))?;

    if source.device_id == device_id {
        return Ok(ApiResponse::success(source.into()));
    }

    let merged = service
        .transfer_favorites(source.device_id, device_id)
        .await?;

    Ok(ApiResponse::success(merged.into()))
}

#[derive(Debug, Deserialize)]
pub struct SharedQuery {
    pub device: Option<String>,
    pub alias: Option<String>,
}

/// GET /api/favorites/shared/:code - open a shared list by its public code.
/// When the viewer passes a device id, they are registered as a visitor so
/// their reactions carry an alias.
pub async fn shared_get(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(q): Query<SharedQuery>,
) -> ApiResult<Value> {
    let code = code.trim().to_uppercase();
    if code.is_empty() {
        return Err(ApiError::validation("Missing share code"));
    }

    let service = FavoritesService::new(state.pool.clone());

    let list = service
        .find_by_public_code(&code)
        .await?
        .ok_or_else(|| ApiError::not_found("No favorites list for this code"))?;

    let visitor = match q.device.as_deref() {
        Some(device) => {
            let device_id = parse_id(device, "device id")?;
            let alias = q
                .alias
                .as_deref()
                .map(|a| sanitize_text(a, config().favorites.max_alias_length))
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| "Invitado".to_string());

            Some(service.register_visitor(list.id, device_id, &alias).await?)
        }
        None => None,
    };

    let (counts, comments) = service.reactions_summary(list.id).await?;

    Ok(ApiResponse::success(json!({
        "list": FavoritesListView::from(list),
        "visitor": visitor.map(|v| json!({
            "id": v.id,
            "deviceId": v.device_id,
            "alias": v.alias,
            "lastSeenAt": v.last_seen_at,
        })),
        "reactions": build_summary(&counts, &comments),
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionBody {
    pub property_id: String,
    pub device_id: String,
    pub kind: String,
    pub comment: Option<String>,
}

/// POST /api/favorites/lists/:list_id/reactions - like, dislike or comment.
/// Like and dislike retract each other; comments stack.
pub async fn reaction_add(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    Json(body): Json<ReactionBody>,
) -> ApiResult<Value> {
    let list_id = parse_id(&list_id, "list id")?;
    let property_id = parse_id(&body.property_id, "property id")?;
    let device_id = parse_id(&body.device_id, "device id")?;

    let service = FavoritesService::new(state.pool.clone());

    let row = match body.kind.as_str() {
        "comment" => {
            let text = body
                .comment
                .as_deref()
                .map(|c| sanitize_text(c, config().favorites.max_comment_length))
                .filter(|c| !c.is_empty())
                .ok_or_else(|| ApiError::validation("Comment text is required"))?;

            service
                .add_comment(list_id, property_id, device_id, &text)
                .await?
        }
        other => {
            let kind = ReactionKind::parse(other).ok_or_else(|| {
                ApiError::validation("Reaction kind must be like, dislike or comment")
            })?;

            service
                .add_reaction(list_id, property_id, device_id, kind)
                .await?
        }
    };

    Ok(ApiResponse::created(json!({
        "id": row.id,
        "propertyId": row.property_id,
        "deviceId": row.device_id,
        "kind": row.reaction_type,
        "comment": row.comment_text,
        "createdAt": row.created_at,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveReactionBody {
    pub property_id: String,
    pub device_id: String,
    pub kind: String,
}

/// DELETE /api/favorites/lists/:list_id/reactions - retract a like/dislike
pub async fn reaction_remove(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    Json(body): Json<RemoveReactionBody>,
) -> ApiResult<Value> {
    let list_id = parse_id(&list_id, "list id")?;
    let property_id = parse_id(&body.property_id, "property id")?;
    let device_id = parse_id(&body.device_id, "device id")?;

    let kind = ReactionKind::parse(&body.kind)
        .ok_or_else(|| ApiError::validation("Reaction kind must be like or dislike"))?;

    FavoritesService::new(state.pool.clone())
        .remove_reaction(list_id, property_id, device_id, kind)
        .await?;

    Ok(ApiResponse::success(json!({ "removed": true })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentBody {
    pub device_id: String,
}

/// DELETE /api/favorites/comments/:comment_id - authors delete their own
/// comments; the device id is the proof of authorship.
pub async fn comment_delete(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
    Json(body): Json<DeleteCommentBody>,
) -> ApiResult<Value> {
    let comment_id = parse_id(&comment_id, "comment id")?;
    let device_id = parse_id(&body.device_id, "device id")?;

    FavoritesService::new(state.pool.clone())
        .delete_comment(comment_id, device_id)
        .await?;

    Ok(ApiResponse::success(json!({ "deleted": true })))
}

/// GET /api/favorites/lists/:list_id/reactions/summary
pub async fn reactions_summary_get(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
) -> ApiResult<Value> {
    let list_id = parse_id(&list_id, "list id")?;

    let (counts, comments) = FavoritesService::new(state.pool.clone())
        .reactions_summary(list_id)
        .await?;

    Ok(ApiResponse::success(build_summary(&counts, &comments)))
}

/// Fold count rows and comment rows into one entry per property.
fn build_summary(counts: &[ReactionCountRow], comments: &[CommentRow]) -> Value {
    #[derive(Default)]
    struct Entry {
        likes: i64,
        dislikes: i64,
        comments: Vec<Value>,
    }

    let mut per_property: BTreeMap<Uuid, Entry> = BTreeMap::new();

    for c in counts {
        let entry = per_property.entry(c.property_id).or_default();
        match c.reaction_type.as_str() {
            "like" => entry.likes = c.count,
            "dislike" => entry.dislikes = c.count,
            _ => {}
        }
    }

    for c in comments {
        per_property
            .entry(c.property_id)
            .or_default()
            .comments
            .push(json!({
                "id": c.id,
                "deviceId": c.device_id,
                "alias": c.alias,
                "text": c.comment_text,
                "createdAt": c.created_at,
            }));
    }

    let items: Vec<Value> = per_property
        .into_iter()
        .map(|(property_id, entry)| {
            json!({
                "propertyId": property_id,
                "likes": entry.likes,
                "dislikes": entry.dislikes,
                "comments": entry.comments,
            })
        })
        .collect();

    json!(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn uuid(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn summary_groups_counts_and_comments_by_property() {
        let (p1, p2) = (uuid(1), uuid(2));
        let counts = vec![
            ReactionCountRow {
                property_id: p1,
                reaction_type: "like".to_string(),
                count: 3,
            },
            ReactionCountRow {
                property_id: p1,
                reaction_type: "dislike".to_string(),
                count: 1,
            },
            ReactionCountRow {
                property_id: p2,
                reaction_type: "like".to_string(),
                count: 2,
            },
        ];
        let comments = vec![CommentRow {
            id: uuid(10),
            property_id: p1,
            device_id: uuid(20),
            comment_text: Some("Me encanta".to_string()),
            alias: Some("Ana".to_string()),
            created_at: Utc::now(),
        }];

        let summary = build_summary(&counts, &comments);
        let items = summary.as_array().unwrap();
        assert_eq!(items.len(), 2);

        let first = items.iter().find(|i| i["propertyId"] == json!(p1)).unwrap();
        assert_eq!(first["likes"], json!(3));
        assert_eq!(first["dislikes"], json!(1));
        assert_eq!(first["comments"].as_array().unwrap().len(), 1);

        let second = items.iter().find(|i| i["propertyId"] == json!(p2)).unwrap();
        assert_eq!(second["likes"], json!(2));
        assert_eq!(second["dislikes"], json!(0));
        assert!(second["comments"].as_array().unwrap().is_empty());
    }

    #[test]
    fn summary_of_nothing_is_empty() {
        assert_eq!(build_summary(&[], &[]), json!([]));
    }
}
