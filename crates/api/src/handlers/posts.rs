//! Handlers for workspace posts: filtered listing, prev/next navigation,
//! merge info, and the composite post page.
//!
//! Listing and navigation are soft: unknown workspaces or posts yield empty
//! results. Merge info and the post page need a concrete post and return 404
//! otherwise.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use feedback_core::error::CoreError;
use feedback_core::filter::{normalize_filter_params, FilterContext, RawFilterParams};
use feedback_core::listing;
use feedback_core::merge::{resolve_merge_info, MergeInfo};
use feedback_core::navigation::{resolve_navigation, resolve_navigation_from, Navigation};
use feedback_core::store::{FeedbackStore, PostRecord};
use feedback_core::types::DbId;
use serde::Serialize;

use crate::error::AppResult;
use crate::query::{FilterQuery, MergeInfoParams, PaginationParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// A post with everything its detail page renders.
#[derive(Debug, Serialize)]
pub struct PostPage {
    pub post: PostRecord,
    pub merge: MergeInfo,
    pub navigation: Navigation,
    pub filter: FilterContext,
}

/// GET /api/v1/workspaces/{workspace_slug}/posts
///
/// List a page of posts under the given filters and order.
pub async fn list_posts(
    State(state): State<AppState>,
    Path(workspace_slug): Path<String>,
    filter: FilterQuery,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let filter = normalize_filter_params(&RawFilterParams::from(filter));
    let posts =
        listing::list_posts(&state.store, &workspace_slug, &filter, page.limit, page.offset)
            .await?;

    Ok(Json(DataResponse { data: posts }))
}

/// GET /api/v1/workspaces/{workspace_slug}/posts/{post_id}/navigation
///
/// Previous and next posts relative to `post_id` under the given filters.
pub async fn get_navigation(
    State(state): State<AppState>,
    Path((workspace_slug, post_id)): Path<(String, DbId)>,
    filter: FilterQuery,
) -> AppResult<impl IntoResponse> {
    let filter = normalize_filter_params(&RawFilterParams::from(filter));
    let navigation = resolve_navigation(&state.store, &workspace_slug, post_id, &filter).await?;

    Ok(Json(DataResponse { data: navigation }))
}

/// GET /api/v1/workspaces/{workspace_slug}/posts/{post_id}/merge-info
///
/// Merge count, merge target, and optionally the latest merged sources.
pub async fn get_merge_info(
    State(state): State<AppState>,
    Path((workspace_slug, post_id)): Path<(String, DbId)>,
    Query(params): Query<MergeInfoParams>,
) -> AppResult<impl IntoResponse> {
    let (workspace_id, post) = load_post(&state, &workspace_slug, post_id).await?;
    let info = resolve_merge_info(
        &state.store,
        workspace_id,
        post.id,
        post.duplicate_of_id,
        params.include_sources,
    )
    .await?;

    Ok(Json(DataResponse { data: info }))
}

/// GET /api/v1/workspaces/{workspace_slug}/posts/{post_id}/page
///
/// The post, its merge info with sources, and its neighbors under the given
/// filters. Merge and navigation resolve concurrently.
pub async fn get_post_page(
    State(state): State<AppState>,
    Path((workspace_slug, post_id)): Path<(String, DbId)>,
    filter: FilterQuery,
) -> AppResult<impl IntoResponse> {
    let (workspace_id, post) = load_post(&state, &workspace_slug, post_id).await?;
    let filter = normalize_filter_params(&RawFilterParams::from(filter));

    let (merge, navigation) = futures::try_join!(
        resolve_merge_info(
            &state.store,
            workspace_id,
            post.id,
            post.duplicate_of_id,
            true,
        ),
        resolve_navigation_from(&state.store, workspace_id, &post, &filter),
    )?;

    Ok(Json(DataResponse {
        data: PostPage {
            post,
            merge,
            navigation,
            filter,
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the workspace and the post inside it, or fail with 404.
async fn load_post(
    state: &AppState,
    workspace_slug: &str,
    post_id: DbId,
) -> AppResult<(DbId, PostRecord)> {
    if post_id <= 0 {
        return Err(
            CoreError::Validation(format!("post_id must be positive, got {post_id}")).into(),
        );
    }

    let workspace_id = state
        .store
        .find_workspace_id(workspace_slug)
        .await?
        .ok_or_else(|| CoreError::SlugNotFound {
            entity: "Workspace",
            slug: workspace_slug.to_string(),
        })?;

    let post = state
        .store
        .find_post(workspace_id, post_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Post",
            id: post_id,
        })?;

    Ok((workspace_id, post))
}
