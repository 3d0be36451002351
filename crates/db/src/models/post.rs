//! Post models, joined read rows, and DTOs.

use feedback_core::store::{PostLink, PostListItem, PostRecord};
use feedback_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    pub board_id: DbId,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub roadmap_status: String,
    pub upvotes: i32,
    pub duplicate_of_id: Option<DbId>,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A post joined to its board.
#[derive(Debug, Clone, FromRow)]
pub struct PostWithBoard {
    pub id: DbId,
    pub board_id: DbId,
    pub slug: String,
    pub title: String,
    pub roadmap_status: String,
    pub created_at: Timestamp,
    pub upvotes: i32,
    pub duplicate_of_id: Option<DbId>,
    pub board_name: String,
    pub board_slug: String,
    pub board_system_type: Option<String>,
}

impl From<PostWithBoard> for PostRecord {
    fn from(row: PostWithBoard) -> Self {
        Self {
            id: row.id,
            board_id: row.board_id,
            slug: row.slug,
            title: row.title,
            roadmap_status: row.roadmap_status,
            created_at: row.created_at,
            upvotes: row.upvotes,
            duplicate_of_id: row.duplicate_of_id,
            board_name: row.board_name,
            board_slug: row.board_slug,
            board_system_type: row.board_system_type,
        }
    }
}

/// Slug and title of a neighboring post.
#[derive(Debug, Clone, FromRow)]
pub struct PostLinkRow {
    pub slug: String,
    pub title: String,
}

impl From<PostLinkRow> for PostLink {
    fn from(row: PostLinkRow) -> Self {
        Self {
            slug: row.slug,
            title: row.title,
        }
    }
}

/// One row of a filtered listing.
#[derive(Debug, Clone, FromRow)]
pub struct PostListRow {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub roadmap_status: String,
    pub upvotes: i32,
    pub created_at: Timestamp,
    pub board_slug: String,
    pub board_name: String,
    pub duplicate_of_id: Option<DbId>,
}

impl From<PostListRow> for PostListItem {
    fn from(row: PostListRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            title: row.title,
            roadmap_status: row.roadmap_status,
            upvotes: row.upvotes,
            created_at: row.created_at,
            board_slug: row.board_slug,
            board_name: row.board_name,
            duplicate_of_id: row.duplicate_of_id,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a post. Omitted fields take the column defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePost {
    pub board_id: DbId,
    pub slug: String,
    pub title: String,
    pub content: Option<String>,
    pub roadmap_status: Option<String>,
    pub upvotes: Option<i32>,
    pub created_at: Option<Timestamp>,
}
