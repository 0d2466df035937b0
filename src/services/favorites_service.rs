use sqlx::{PgPool, Postgres, Transaction};
use thiserror::Error;
use uuid::Uuid;

use crate::config::config;
use crate::database::models::favorites::{
    CommentRow, FavoritesListRow, ReactionCountRow, ReactionRow, VisitorRow,
};

#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("Favorites list not found: {0}")]
    ListNotFound(String),

    #[error("Comment not found")]
    CommentNotFound,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Like and dislike are mutually exclusive per (list, property, device);
/// comments live in the same table but are repeatable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "like" => Some(ReactionKind::Like),
            "dislike" => Some(ReactionKind::Dislike),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Dislike => "dislike",
        }
    }
}

const LIST_COLUMNS: &str =
    "id, device_id, property_ids, public_code, owner_name, owner_email, created_at, updated_at";

/// Device-scoped favorites store: lists, sharing, merge-on-recovery,
/// visitors and per-property reactions.
pub struct FavoritesService {
    pool: PgPool,
}

impl FavoritesService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_device(
        &self,
        device_id: Uuid,
    ) -> Result<Option<FavoritesListRow>, FavoritesError> {
        let row = sqlx::query_as(&format!(
            "SELECT {} FROM device_favorites WHERE device_id = $1",
            LIST_COLUMNS
        ))
        .bind(device_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Most-recently-updated first when the same email was bound more than
    /// once historically.
    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<FavoritesListRow>, FavoritesError> {
        let row = sqlx::query_as(&format!(
            "SELECT {} FROM device_favorites WHERE owner_email = $1 ORDER BY updated_at DESC LIMIT 1",
            LIST_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find_by_public_code(
        &self,
        code: &str,
    ) -> Result<Option<FavoritesListRow>, FavoritesError> {
        let row = sqlx::query_as(&format!(
            "SELECT {} FROM device_favorites WHERE public_code = $1 ORDER BY updated_at DESC LIMIT 1",
            LIST_COLUMNS
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Returns the device's list, creating an empty one (with a fresh share
    /// code) on first sight. The boolean reports whether the list was just
    /// created, so callers can prompt for email linking.
    pub async fn get_or_create(
        &self,
        device_id: Uuid,
    ) -> Result<(FavoritesListRow, bool), FavoritesError> {
        if let Some(row) = self.find_by_device(device_id).await? {
            return Ok((row, false));
        }

        let code = self.allocate_share_code().await?;

        // ON CONFLICT DO NOTHING covers the race where two first-sight
        // requests arrive together; the loser re-reads the winner's row.
        let inserted: Option<FavoritesListRow> = sqlx::query_as(&format!(
            "INSERT INTO device_favorites (device_id, public_code)
             VALUES ($1, $2)
             ON CONFLICT (device_id) DO NOTHING
             RETURNING {}",
            LIST_COLUMNS
        ))
        .bind(device_id)
        .bind(&code)
        .fetch_optional(&self.pool)
        .await?;

        match inserted {
            Some(row) => Ok((row, true)),
            None => {
                let row = self
                    .find_by_device(device_id)
                    .await?
                    .ok_or_else(|| FavoritesError::ListNotFound(device_id.to_string()))?;
                Ok((row, false))
            }
        }
    }

    /// Idempotent append: a duplicate is removed first, so repeated adds
    /// move the property to the end of the implicit recency order.
    pub async fn add_property(
        &self,
        device_id: Uuid,
        property_id: Uuid,
    ) -> Result<(FavoritesListRow, bool), FavoritesError> {
        let (list, created) = self.get_or_create(device_id).await?;

        let row: FavoritesListRow = sqlx::query_as(&format!(
            "UPDATE device_favorites
             SET property_ids = array_append(array_remove(property_ids, $2), $2),
                 updated_at = now()
             WHERE id = $1
             RETURNING {}",
            LIST_COLUMNS
        ))
        .bind(list.id)
        .bind(property_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((row, created))
    }

    /// Idempotent removal; no-op when the property is absent.
    pub async fn remove_property(
        &self,
        device_id: Uuid,
        property_id: Uuid,
    ) -> Result<FavoritesListRow, FavoritesError> {
        let row: Option<FavoritesListRow> = sqlx::query_as(&format!(
            "UPDATE device_favorites
             SET property_ids = array_remove(property_ids, $2),
                 updated_at = now()
             WHERE device_id = $1
             RETURNING {}",
            LIST_COLUMNS
        ))
        .bind(device_id)
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| FavoritesError::ListNotFound(device_id.to_string()))
    }

    /// Binds an owner email/name to an existing list. Cross-device email
    /// uniqueness is the caller's responsibility (check `find_by_email`
    /// first and reject conflicts).
    pub async fn link_email(
        &self,
        device_id: Uuid,
        email: &str,
        owner_name: Option<&str>,
    ) -> Result<FavoritesListRow, FavoritesError> {
        let row: Option<FavoritesListRow> = sqlx::query_as(&format!(
            "UPDATE device_favorites
             SET owner_email = $2,
                 owner_name = COALESCE($3, owner_name),
                 updated_at = now()
             WHERE device_id = $1
             RETURNING {}",
            LIST_COLUMNS
        ))
        .bind(device_id)
        .bind(email)
        .bind(owner_name)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| FavoritesError::ListNotFound(device_id.to_string()))
    }

    /// Merges the source device's list into the destination device's list:
    /// set union of properties (destination order kept, new source entries
    /// appended), owner fields first-non-null-wins. The source list is left
    /// untouched. Fails when the source does not exist; the destination is
    /// created if absent.
    pub async fn transfer_favorites(
        &self,
        from_device: Uuid,
        to_device: Uuid,
    ) -> Result<FavoritesListRow, FavoritesError> {
        let mut tx = self.pool.begin().await?;

        let source: Option<FavoritesListRow> = sqlx::query_as(&format!(
            "SELECT {} FROM device_favorites WHERE device_id = $1 FOR UPDATE",
            LIST_COLUMNS
        ))
        .bind(from_device)
        .fetch_optional(&mut *tx)
        .await?;

        let source =
            source.ok_or_else(|| FavoritesError::ListNotFound(from_device.to_string()))?;

        let dest: Option<FavoritesListRow> = sqlx::query_as(&format!(
            "SELECT {} FROM device_favorites WHERE device_id = $1 FOR UPDATE",
            LIST_COLUMNS
        ))
        .bind(to_device)
        .fetch_optional(&mut *tx)
        .await?;

        let dest = match dest {
            Some(d) => d,
            None => {
                let code = Self::allocate_share_code_in(&mut tx).await?;
                sqlx::query_as(&format!(
                    "INSERT INTO device_favorites (device_id, public_code)
                     VALUES ($1, $2)
                     RETURNING {}",
                    LIST_COLUMNS
                ))
                .bind(to_device)
                .bind(&code)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        let merged = merge_property_sets(&dest.property_ids, &source.property_ids);
        let owner_name = dest.owner_name.clone().or(source.owner_name.clone());
        let owner_email = dest.owner_email.clone().or(source.owner_email.clone());

        let row: FavoritesListRow = sqlx::query_as(&format!(
            "UPDATE device_favorites
             SET property_ids = $2, owner_name = $3, owner_email = $4, updated_at = now()
             WHERE id = $1
             RETURNING {}",
            LIST_COLUMNS
        ))
        .bind(dest.id)
        .bind(&merged)
        .bind(owner_name)
        .bind(owner_email)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Upsert keyed (list, visiting device): refreshes alias and last-seen.
    pub async fn register_visitor(
        &self,
        list_id: Uuid,
        device_id: Uuid,
        alias: &str,
    ) -> Result<VisitorRow, FavoritesError> {
        self.ensure_list(list_id).await?;

        let row: VisitorRow = sqlx::query_as(
            "INSERT INTO favorite_visitors (list_id, device_id, alias)
             VALUES ($1, $2, $3)
             ON CONFLICT (list_id, device_id)
             DO UPDATE SET alias = EXCLUDED.alias, last_seen_at = now()
             RETURNING id, list_id, device_id, alias, last_seen_at",
        )
        .bind(list_id)
        .bind(device_id)
        .bind(alias)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Sets a like or dislike. The opposite kind is retracted in the same
    /// transaction, so no reader ever observes both.
    pub async fn add_reaction(
        &self,
        list_id: Uuid,
        property_id: Uuid,
        device_id: Uuid,
        kind: ReactionKind,
    ) -> Result<ReactionRow, FavoritesError> {
        self.ensure_list(list_id).await?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM favorite_reactions
             WHERE list_id = $1 AND property_id = $2 AND device_id = $3
               AND reaction_type IN ('like', 'dislike')",
        )
        .bind(list_id)
        .bind(property_id)
        .bind(device_id)
        .execute(&mut *tx)
        .await?;

        let row: ReactionRow = sqlx::query_as(
            "INSERT INTO favorite_reactions (list_id, property_id, device_id, reaction_type)
             VALUES ($1, $2, $3, $4)
             RETURNING id, list_id, property_id, device_id, reaction_type, comment_text, created_at",
        )
        .bind(list_id)
        .bind(property_id)
        .bind(device_id)
        .bind(kind.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Removes a like or dislike; no-op when none exists.
    pub async fn remove_reaction(
        &self,
        list_id: Uuid,
        property_id: Uuid,
        device_id: Uuid,
        kind: ReactionKind,
    ) -> Result<(), FavoritesError> {
        sqlx::query(
            "DELETE FROM favorite_reactions
             WHERE list_id = $1 AND property_id = $2 AND device_id = $3 AND reaction_type = $4",
        )
        .bind(list_id)
        .bind(property_id)
        .bind(device_id)
        .bind(kind.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Comments are not exclusive and may be added repeatedly.
    pub async fn add_comment(
        &self,
        list_id: Uuid,
        property_id: Uuid,
        device_id: Uuid,
        text: &str,
    ) -> Result<ReactionRow, FavoritesError> {
        self.ensure_list(list_id).await?;

        let row: ReactionRow = sqlx::query_as(
            "INSERT INTO favorite_reactions (list_id, property_id, device_id, reaction_type, comment_text)
             VALUES ($1, $2, $3, 'comment', $4)
             RETURNING id, list_id, property_id, device_id, reaction_type, comment_text, created_at",
        )
        .bind(list_id)
        .bind(property_id)
        .bind(device_id)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Deletes a comment, scoped to the device that wrote it.
    pub async fn delete_comment(
        &self,
        comment_id: Uuid,
        device_id: Uuid,
    ) -> Result<(), FavoritesError> {
        let result = sqlx::query(
            "DELETE FROM favorite_reactions
             WHERE id = $1 AND device_id = $2 AND reaction_type = 'comment'",
        )
        .bind(comment_id)
        .bind(device_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(FavoritesError::CommentNotFound);
        }

        Ok(())
    }

    /// Per-property like/dislike counts plus comments (with the visitor
    /// alias of each author) for a list.
    pub async fn reactions_summary(
        &self,
        list_id: Uuid,
    ) -> Result<(Vec<ReactionCountRow>, Vec<CommentRow>), FavoritesError> {
        self.ensure_list(list_id).await?;

        let counts: Vec<ReactionCountRow> = sqlx::query_as(
            "SELECT property_id, reaction_type, COUNT(*) AS count
             FROM favorite_reactions
             WHERE list_id = $1 AND reaction_type IN ('like', 'dislike')
             GROUP BY property_id, reaction_type",
        )
        .bind(list_id)
        .fetch_all(&self.pool)
        .await?;

        let comments: Vec<CommentRow> = sqlx::query_as(
            "SELECT r.id, r.property_id, r.device_id, r.comment_text, v.alias, r.created_at
             FROM favorite_reactions r
             LEFT JOIN favorite_visitors v
               ON v.list_id = r.list_id AND v.device_id = r.device_id
             WHERE r.list_id = $1 AND r.reaction_type = 'comment'
             ORDER BY r.created_at",
        )
        .bind(list_id)
        .fetch_all(&self.pool)
        .await?;

        Ok((counts, comments))
    }

    async fn ensure_list(&self, list_id: Uuid) -> Result<(), FavoritesError> {
        let exists: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM device_favorites WHERE id = $1")
                .bind(list_id)
                .fetch_optional(&self.pool)
                .await?;

        exists
            .map(|_| ())
            .ok_or_else(|| FavoritesError::ListNotFound(list_id.to_string()))
    }

    async fn allocate_share_code(&self) -> Result<String, FavoritesError> {
        let (n,): (i64,) = sqlx::query_as("SELECT nextval('favorite_code_seq')")
            .fetch_one(&self.pool)
            .await?;

        Ok(format_share_code(&config().favorites.share_code_prefix, n))
    }

    async fn allocate_share_code_in(
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<String, FavoritesError> {
        let (n,): (i64,) = sqlx::query_as("SELECT nextval('favorite_code_seq')")
            .fetch_one(&mut **tx)
            .await?;

        Ok(format_share_code(&config().favorites.share_code_prefix, n))
    }
}

/// Set union preserving destination order; source entries the destination
/// does not already hold are appended in source order.
pub fn merge_property_sets(dest: &[Uuid], source: &[Uuid]) -> Vec<Uuid> {
    let mut merged: Vec<Uuid> = dest.to_vec();
    for id in source {
        if !merged.contains(id) {
            merged.push(*id);
        }
    }
    merged
}

const CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Share code from a sequence value: Crockford base32, zero-padded to four
/// characters, with the configured prefix ("CLIC-0423" shape). Sequence
/// allocation makes the code unique by construction; there is no retry loop
/// and no fallback branch.
pub fn format_share_code(prefix: &str, n: i64) -> String {
    let mut n = n.unsigned_abs();
    let mut digits = Vec::new();

    loop {
        digits.push(CODE_ALPHABET[(n % 32) as usize]);
        n /= 32;
        if n == 0 {
            break;
        }
    }
    digits.reverse();

    let encoded = String::from_utf8(digits).expect("alphabet is ASCII");
    format!("{}-{:0>4}", prefix, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uuid(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn merge_is_a_set_union_preserving_dest_order() {
        let (p1, p2, p3) = (uuid(1), uuid(2), uuid(3));
        // dest {p2, p3}, source {p1, p2} -> {p2, p3, p1}
        let merged = merge_property_sets(&[p2, p3], &[p1, p2]);
        assert_eq!(merged, vec![p2, p3, p1]);
    }

    #[test]
    fn merge_with_empty_sides() {
        let (p1, p2) = (uuid(1), uuid(2));
        assert_eq!(merge_property_sets(&[], &[p1, p2]), vec![p1, p2]);
        assert_eq!(merge_property_sets(&[p1, p2], &[]), vec![p1, p2]);
        assert!(merge_property_sets(&[], &[]).is_empty());
    }

    #[test]
    fn merge_never_duplicates() {
        let (p1, p2, p3) = (uuid(1), uuid(2), uuid(3));
        let merged = merge_property_sets(&[p1, p2], &[p2, p3, p1]);
        assert_eq!(merged, vec![p1, p2, p3]);
    }

    #[test]
    fn share_codes_are_prefixed_and_padded() {
        assert_eq!(format_share_code("CLIC", 0), "CLIC-0000");
        assert_eq!(format_share_code("CLIC", 31), "CLIC-000Z");
        assert_eq!(format_share_code("CLIC", 423), "CLIC-00D7");
        assert_eq!(format_share_code("CASA", 32 * 32 * 32 * 32), "CASA-10000");
    }

    #[test]
    fn share_codes_are_distinct_per_sequence_value() {
        let a = format_share_code("CLIC", 1001);
        let b = format_share_code("CLIC", 1002);
        assert_ne!(a, b);
    }

    #[test]
    fn reaction_kind_round_trip() {
        assert_eq!(ReactionKind::parse("like"), Some(ReactionKind::Like));
        assert_eq!(ReactionKind::parse("dislike"), Some(ReactionKind::Dislike));
        assert_eq!(ReactionKind::parse("comment"), None);
        assert_eq!(ReactionKind::parse(""), None);
        assert_eq!(ReactionKind::Like.as_str(), "like");
    }
}
