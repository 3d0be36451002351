pub mod health;
pub mod posts;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /workspaces/{workspace_slug}/posts                        list
/// /workspaces/{workspace_slug}/posts/{post_id}/navigation   prev/next
/// /workspaces/{workspace_slug}/posts/{post_id}/merge-info   merge aggregates
/// /workspaces/{workspace_slug}/posts/{post_id}/page         post + merge + navigation
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/workspaces/{workspace_slug}/posts", posts::router())
}
