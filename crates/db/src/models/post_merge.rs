//! Merge edge models and DTOs.

use feedback_core::store::{MergeEdge, MergeSourceRecord};
use feedback_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `post_merges` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostMerge {
    pub id: DbId,
    pub source_post_id: DbId,
    pub target_post_id: DbId,
    pub created_at: Timestamp,
}

impl From<PostMerge> for MergeEdge {
    fn from(row: PostMerge) -> Self {
        Self {
            id: row.id,
            source_post_id: row.source_post_id,
            target_post_id: row.target_post_id,
            created_at: row.created_at,
        }
    }
}

/// A merge edge joined to its source post and board.
#[derive(Debug, Clone, FromRow)]
pub struct MergeSourceRow {
    pub post_id: DbId,
    pub slug: String,
    pub title: String,
    pub roadmap_status: String,
    pub board_name: String,
    pub board_slug: String,
    pub merged_at: Timestamp,
}

impl From<MergeSourceRow> for MergeSourceRecord {
    fn from(row: MergeSourceRow) -> Self {
        Self {
            post_id: row.post_id,
            slug: row.slug,
            title: row.title,
            roadmap_status: row.roadmap_status,
            board_name: row.board_name,
            board_slug: row.board_slug,
            merged_at: row.merged_at,
        }
    }
}

/// DTO for recording a merge edge. `created_at` defaults to `now()`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostMerge {
    pub source_post_id: DbId,
    pub target_post_id: DbId,
    pub created_at: Option<Timestamp>,
}
