//! Filtered post listing.
//!
//! Shares [`FilterContext`], candidate predicates and total order with
//! navigation, so a post's neighbors are always its neighbors in the list.

use crate::filter::FilterContext;
use crate::store::{
    resolve_tag_prepass, CandidateFilter, FeedbackStore, ListQuery, PostListItem, TagPrepass,
};

/// Default number of posts per page.
pub const DEFAULT_LIST_LIMIT: i64 = 20;

/// Maximum number of posts per page.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Clamp a user-provided limit to `1..=MAX_LIST_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// List a page of a workspace's posts under `filter`.
///
/// Unknown workspaces and tag filters matching nothing yield an empty page.
pub async fn list_posts<S: FeedbackStore + ?Sized>(
    store: &S,
    workspace_slug: &str,
    filter: &FilterContext,
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<Vec<PostListItem>, S::Error> {
    let Some(workspace_id) = store.find_workspace_id(workspace_slug).await? else {
        return Ok(Vec::new());
    };

    let tags = resolve_tag_prepass(store, workspace_id, &filter.tag_slugs).await?;
    if tags == TagPrepass::NoMatch {
        return Ok(Vec::new());
    }

    let query = ListQuery {
        candidates: CandidateFilter {
            workspace_id,
            filter,
            tag_post_ids: tags.post_ids(),
        },
        order: filter.order,
        limit: clamp_limit(limit),
        offset: clamp_offset(offset),
    };
    store.list_posts(&query).await
}
