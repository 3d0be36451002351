//! Board model and DTOs.

use feedback_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `boards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Board {
    pub id: DbId,
    pub workspace_id: DbId,
    pub slug: String,
    pub name: String,
    /// `roadmap`, `changelog`, or `None` for a regular feedback board.
    pub system_type: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a board.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBoard {
    pub workspace_id: DbId,
    pub slug: String,
    pub name: String,
    pub system_type: Option<String>,
}
