//! Repository for the `tags` and `post_tags` tables.

use feedback_core::types::DbId;
use sqlx::PgPool;

use crate::models::tag::Tag;

/// Column list for `tags` queries.
const COLUMNS: &str = "id, workspace_id, slug, name, created_at";

/// Provides tag creation, post tagging, and tag-based post lookup.
pub struct TagRepo;

impl TagRepo {
    /// Create a tag in a workspace or return the existing one with the same slug.
    ///
    /// The name is updated on conflict so the most recent casing is kept.
    pub async fn create_or_get(
        pool: &PgPool,
        workspace_id: DbId,
        name: &str,
    ) -> Result<Tag, sqlx::Error> {
        let slug = normalize_tag_slug(name);
        let query = format!(
            "INSERT INTO tags (workspace_id, slug, name) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (workspace_id, slug) DO UPDATE SET name = EXCLUDED.name \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(workspace_id)
            .bind(&slug)
            .bind(name.trim())
            .fetch_one(pool)
            .await
    }

    /// Attach a tag to a post. Re-applying is a no-op.
    pub async fn apply(pool: &PgPool, post_id: DbId, tag_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO post_tags (post_id, tag_id) VALUES ($1, $2) \
             ON CONFLICT (post_id, tag_id) DO NOTHING",
        )
        .bind(post_id)
        .bind(tag_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Distinct ids of posts carrying any of `slugs` within a workspace.
    pub async fn post_ids_for_slugs(
        pool: &PgPool,
        workspace_id: DbId,
        slugs: &[String],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT DISTINCT pt.post_id \
             FROM post_tags pt \
             JOIN tags t ON t.id = pt.tag_id \
             WHERE t.workspace_id = $1 AND t.slug = ANY($2) \
             ORDER BY pt.post_id",
        )
        .bind(workspace_id)
        .bind(slugs)
        .fetch_all(pool)
        .await
    }
}

/// Lowercase, trim, and hyphenate whitespace runs.
fn normalize_tag_slug(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}
