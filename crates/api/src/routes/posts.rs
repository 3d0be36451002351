//! Route definitions for workspace posts.

use axum::routing::get;
use axum::Router;

use crate::handlers::posts;
use crate::state::AppState;

/// Post routes mounted at `/workspaces/{workspace_slug}/posts`.
///
/// ```text
/// GET /                        -> list_posts
/// GET /{post_id}/navigation    -> get_navigation
/// GET /{post_id}/merge-info    -> get_merge_info
/// GET /{post_id}/page          -> get_post_page
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list_posts))
        .route("/{post_id}/navigation", get(posts::get_navigation))
        .route("/{post_id}/merge-info", get(posts::get_merge_info))
        .route("/{post_id}/page", get(posts::get_post_page))
}
