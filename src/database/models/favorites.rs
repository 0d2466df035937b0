use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Row from `device_favorites`. At most one list per device id; the device
/// id is the caller-supplied authorization token for the list.
#[derive(Debug, Clone, FromRow)]
pub struct FavoritesListRow {
    pub id: Uuid,
    pub device_id: Uuid,
    pub property_ids: Vec<Uuid>,
    pub public_code: String,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row from `favorite_visitors`, unique per (list, visiting device)
#[derive(Debug, Clone, FromRow)]
pub struct VisitorRow {
    pub id: Uuid,
    pub list_id: Uuid,
    pub device_id: Uuid,
    pub alias: String,
    pub last_seen_at: DateTime<Utc>,
}

/// Row from `favorite_reactions`
#[derive(Debug, Clone, FromRow)]
pub struct ReactionRow {
    pub id: Uuid,
    pub list_id: Uuid,
    pub property_id: Uuid,
    pub device_id: Uuid,
    pub reaction_type: String,
    pub comment_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Aggregated like/dislike count per (property, kind)
#[derive(Debug, Clone, FromRow)]
pub struct ReactionCountRow {
    pub property_id: Uuid,
    pub reaction_type: String,
    pub count: i64,
}

/// Comment joined with the visitor alias of its author
#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: Uuid,
    pub property_id: Uuid,
    pub device_id: Uuid,
    pub comment_text: Option<String>,
    pub alias: Option<String>,
    pub created_at: DateTime<Utc>,
}
