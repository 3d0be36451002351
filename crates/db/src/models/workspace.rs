//! Workspace model and DTOs.

use feedback_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `workspaces` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Workspace {
    pub id: DbId,
    pub slug: String,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for creating a workspace.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkspace {
    pub slug: String,
    pub name: String,
}
