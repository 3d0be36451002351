//! Tag model.

use feedback_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub workspace_id: DbId,
    pub slug: String,
    pub name: String,
    pub created_at: Timestamp,
}
