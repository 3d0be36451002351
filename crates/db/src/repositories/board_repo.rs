//! Repository for the `boards` table.

use sqlx::PgPool;

use crate::models::board::{Board, CreateBoard};

/// Column list for `boards` queries.
const COLUMNS: &str = "id, workspace_id, slug, name, system_type, created_at";

/// Provides inserts for boards.
pub struct BoardRepo;

impl BoardRepo {
    /// Insert a new board, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBoard) -> Result<Board, sqlx::Error> {
        let query = format!(
            "INSERT INTO boards (workspace_id, slug, name, system_type) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Board>(&query)
            .bind(input.workspace_id)
            .bind(&input.slug)
            .bind(&input.name)
            .bind(input.system_type.as_deref())
            .fetch_one(pool)
            .await
    }
}
