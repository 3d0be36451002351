//! Repository for the `post_merges` table.
//!
//! Edges carry no foreign keys: a merge row outlives either of its posts,
//! so every read that joins back to `posts` must tolerate missing rows.

use feedback_core::store::SYSTEM_BOARD_TYPES;
use feedback_core::types::DbId;
use sqlx::PgPool;

use crate::models::post_merge::{CreatePostMerge, MergeSourceRow, PostMerge};

/// Column list for `post_merges` queries.
const COLUMNS: &str = "id, source_post_id, target_post_id, created_at";

/// Provides edge inserts and merge aggregates.
pub struct PostMergeRepo;

impl PostMergeRepo {
    /// Record that `source_post_id` was merged into `target_post_id`.
    pub async fn create(pool: &PgPool, input: &CreatePostMerge) -> Result<PostMerge, sqlx::Error> {
        let query = format!(
            "INSERT INTO post_merges (source_post_id, target_post_id, created_at) \
             VALUES ($1, $2, COALESCE($3, NOW())) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PostMerge>(&query)
            .bind(input.source_post_id)
            .bind(input.target_post_id)
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    /// Number of edges targeting a post, whether or not the sources still exist.
    pub async fn count_by_target(pool: &PgPool, target_post_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM post_merges WHERE target_post_id = $1")
            .bind(target_post_id)
            .fetch_one(pool)
            .await
    }

    /// Most recent edge for a `(source, target)` pair.
    pub async fn find_edge(
        pool: &PgPool,
        source_post_id: DbId,
        target_post_id: DbId,
    ) -> Result<Option<PostMerge>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM post_merges \
             WHERE source_post_id = $1 AND target_post_id = $2 \
             ORDER BY created_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, PostMerge>(&query)
            .bind(source_post_id)
            .bind(target_post_id)
            .fetch_optional(pool)
            .await
    }

    /// Newest edges into `target_post_id` whose source still exists in the
    /// workspace on a non-system board.
    pub async fn recent_sources(
        pool: &PgPool,
        workspace_id: DbId,
        target_post_id: DbId,
        limit: i64,
    ) -> Result<Vec<MergeSourceRow>, sqlx::Error> {
        let system_types: Vec<String> = SYSTEM_BOARD_TYPES.iter().map(|t| t.to_string()).collect();
        sqlx::query_as::<_, MergeSourceRow>(
            "SELECT p.id AS post_id, p.slug, p.title, p.roadmap_status, \
                    b.name AS board_name, b.slug AS board_slug, m.created_at AS merged_at \
             FROM post_merges m \
             JOIN posts p ON p.id = m.source_post_id \
             JOIN boards b ON b.id = p.board_id \
             WHERE m.target_post_id = $1 \
               AND b.workspace_id = $2 \
               AND (b.system_type IS NULL OR b.system_type <> ALL($3)) \
             ORDER BY m.created_at DESC, m.id DESC \
             LIMIT $4",
        )
        .bind(target_post_id)
        .bind(workspace_id)
        .bind(&system_types)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
