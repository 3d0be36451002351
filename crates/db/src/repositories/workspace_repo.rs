//! Repository for the `workspaces` table.

use feedback_core::types::DbId;
use sqlx::PgPool;

use crate::models::workspace::{CreateWorkspace, Workspace};

/// Column list for `workspaces` queries.
const COLUMNS: &str = "id, slug, name, created_at";

/// Provides lookups for workspaces.
pub struct WorkspaceRepo;

impl WorkspaceRepo {
    /// Insert a new workspace, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateWorkspace) -> Result<Workspace, sqlx::Error> {
        let query = format!(
            "INSERT INTO workspaces (slug, name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workspace>(&query)
            .bind(&input.slug)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a workspace by its slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Workspace>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workspaces WHERE slug = $1");
        sqlx::query_as::<_, Workspace>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a workspace slug to its id.
    pub async fn find_id_by_slug(pool: &PgPool, slug: &str) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM workspaces WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await
    }
}
