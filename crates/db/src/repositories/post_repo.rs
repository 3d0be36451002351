//! Repository for the `posts` table.
//!
//! Besides inserts and point lookups, this builds the candidate-set queries
//! behind navigation and listing. Both share [`push_candidate_predicates`],
//! so a neighbor lookup and a list page always see the same posts.

use feedback_core::filter::search_like_pattern;
use feedback_core::ordering::{seek_plan, KeyField};
use feedback_core::store::{CandidateFilter, ListQuery, NeighborQuery, SYSTEM_BOARD_TYPES};
use feedback_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::post::{CreatePost, Post, PostLinkRow, PostListRow, PostWithBoard};

/// Column list for `posts` queries.
const COLUMNS: &str = "\
    id, board_id, slug, title, content, roadmap_status, upvotes, \
    duplicate_of_id, published_at, created_at";

/// Column list for a post joined to its board (`p` and `b` aliases).
const WITH_BOARD_COLUMNS: &str = "\
    p.id, p.board_id, p.slug, p.title, p.roadmap_status, p.created_at, \
    p.upvotes, p.duplicate_of_id, \
    b.name AS board_name, b.slug AS board_slug, b.system_type AS board_system_type";

/// Column list for listing rows.
const LIST_COLUMNS: &str = "\
    p.id, p.slug, p.title, p.roadmap_status, p.upvotes, p.created_at, \
    b.slug AS board_slug, b.name AS board_name, p.duplicate_of_id";

/// Provides CRUD and candidate-set queries for posts.
pub struct PostRepo;

impl PostRepo {
    /// Insert a new post, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePost) -> Result<Post, sqlx::Error> {
        let query = format!(
            "INSERT INTO posts (board_id, slug, title, content, roadmap_status, upvotes, created_at) \
             VALUES ($1, $2, $3, COALESCE($4, ''), COALESCE($5, 'open'), COALESCE($6, 0), \
                     COALESCE($7, NOW())) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(input.board_id)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(input.content.as_deref())
            .bind(input.roadmap_status.as_deref())
            .bind(input.upvotes)
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    /// Find a post by id regardless of workspace.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a post joined to its board, only if the board is in `workspace_id`.
    pub async fn find_in_workspace(
        pool: &PgPool,
        workspace_id: DbId,
        post_id: DbId,
    ) -> Result<Option<PostWithBoard>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_BOARD_COLUMNS} \
             FROM posts p \
             JOIN boards b ON b.id = p.board_id \
             WHERE p.id = $1 AND b.workspace_id = $2"
        );
        sqlx::query_as::<_, PostWithBoard>(&query)
            .bind(post_id)
            .bind(workspace_id)
            .fetch_optional(pool)
            .await
    }

    /// Point `duplicate_of_id` at another post, or clear it.
    pub async fn set_duplicate_of(
        pool: &PgPool,
        post_id: DbId,
        duplicate_of_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE posts SET duplicate_of_id = $2 WHERE id = $1")
            .bind(post_id)
            .bind(duplicate_of_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete a post. Merge edges referencing it are left in place.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Candidate-set queries
    // -----------------------------------------------------------------------

    /// Nearest candidate strictly on the query's side of the anchor.
    ///
    /// Uses a row-value range over `(order_field, id)` with `LIMIT 1`, so the
    /// cost does not depend on the anchor's position in the list.
    pub async fn find_neighbor(
        pool: &PgPool,
        query: &NeighborQuery<'_>,
    ) -> Result<Option<PostLinkRow>, sqlx::Error> {
        let plan = seek_plan(query.order, query.side);
        let field = query.order.key_field();
        let column = key_column(field);

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT p.slug, p.title FROM posts p JOIN boards b ON b.id = p.board_id",
        );
        push_candidate_predicates(&mut builder, &query.candidates);

        builder.push(format!(
            " AND ({column}, p.id) {} (",
            plan.comparison.sql_operator()
        ));
        match field {
            KeyField::CreatedAt => builder.push_bind(query.anchor.created_at),
            KeyField::Upvotes => builder.push_bind(query.anchor.upvotes),
        };
        builder.push(", ").push_bind(query.anchor.id).push(")");

        let direction = plan.direction.sql_keyword();
        builder.push(format!(
            " ORDER BY {column} {direction}, p.id {direction} LIMIT 1"
        ));

        tracing::trace!(
            sql = builder.sql(),
            order = query.order.as_str(),
            side = ?query.side,
            "Neighbor query"
        );
        builder
            .build_query_as::<PostLinkRow>()
            .fetch_optional(pool)
            .await
    }

    /// A page of candidates in display order.
    pub async fn list_filtered(
        pool: &PgPool,
        query: &ListQuery<'_>,
    ) -> Result<Vec<PostListRow>, sqlx::Error> {
        let column = key_column(query.order.key_field());
        let direction = query.order.display_direction().sql_keyword();

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {LIST_COLUMNS} FROM posts p JOIN boards b ON b.id = p.board_id"
        ));
        push_candidate_predicates(&mut builder, &query.candidates);

        builder
            .push(format!(
                " ORDER BY {column} {direction}, p.id {direction} LIMIT "
            ))
            .push_bind(query.limit)
            .push(" OFFSET ")
            .push_bind(query.offset);

        builder
            .build_query_as::<PostListRow>()
            .fetch_all(pool)
            .await
    }
}

/// SQL expression carrying the primary sort key.
fn key_column(field: KeyField) -> &'static str {
    match field {
        KeyField::CreatedAt => "p.created_at",
        KeyField::Upvotes => "p.upvotes",
    }
}

/// Append the `WHERE` clause that defines a workspace's candidate posts.
///
/// Expects `posts p JOIN boards b` in the `FROM` clause. Inactive filter
/// dimensions add no predicate.
fn push_candidate_predicates(
    builder: &mut QueryBuilder<'_, Postgres>,
    candidates: &CandidateFilter<'_>,
) {
    let filter = candidates.filter;
    let system_types: Vec<String> = SYSTEM_BOARD_TYPES.iter().map(|t| t.to_string()).collect();

    builder
        .push(" WHERE b.workspace_id = ")
        .push_bind(candidates.workspace_id)
        .push(" AND (b.system_type IS NULL OR b.system_type <> ALL(")
        .push_bind(system_types)
        .push("))");

    if !filter.statuses.is_empty() {
        builder
            .push(" AND p.roadmap_status = ANY(")
            .push_bind(filter.statuses.clone())
            .push(")");
    }

    if !filter.board_slugs.is_empty() {
        builder
            .push(" AND b.slug = ANY(")
            .push_bind(filter.board_slugs.clone())
            .push(")");
    }

    if let Some(ids) = candidates.tag_post_ids {
        builder
            .push(" AND p.id = ANY(")
            .push_bind(ids.to_vec())
            .push(")");
    }

    if !filter.search.is_empty() {
        let pattern = search_like_pattern(&filter.search);
        builder
            .push(" AND (p.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR p.content ILIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }
}
