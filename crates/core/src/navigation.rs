//! Contextual prev/next navigation between posts.
//!
//! Neighbors are found with two bounded range queries over the composite
//! order key `(order_field, id)`, one per side, each composed with the
//! active filter predicates. Cost depends on index depth, not on how many
//! posts match the filter.

use serde::Serialize;

use crate::filter::FilterContext;
use crate::ordering::NeighborSide;
use crate::store::{
    resolve_tag_prepass, CandidateFilter, FeedbackStore, NeighborQuery, PostLink, PostRecord,
    TagPrepass,
};
use crate::types::DbId;

/// Neighbors of an anchor post in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Navigation {
    pub prev: Option<PostLink>,
    pub next: Option<PostLink>,
}

/// Resolve the posts immediately before and after `anchor_post_id` under
/// `filter`.
///
/// Unknown workspaces and anchors resolve to no neighbors. An anchor that
/// falls outside the filtered set still navigates from its own order key.
pub async fn resolve_navigation<S: FeedbackStore + ?Sized>(
    store: &S,
    workspace_slug: &str,
    anchor_post_id: DbId,
    filter: &FilterContext,
) -> Result<Navigation, S::Error> {
    let Some(workspace_id) = store.find_workspace_id(workspace_slug).await? else {
        tracing::debug!(workspace_slug, "Navigation requested for unknown workspace");
        return Ok(Navigation::default());
    };

    let Some(anchor) = store.find_post(workspace_id, anchor_post_id).await? else {
        tracing::debug!(workspace_id, anchor_post_id, "Navigation anchor not found");
        return Ok(Navigation::default());
    };

    resolve_navigation_from(store, workspace_id, &anchor, filter).await
}

/// Resolve neighbors for an anchor the caller already loaded from
/// `workspace_id`.
///
/// The anchor is not read again, so its order key is exactly the one the
/// caller rendered.
pub async fn resolve_navigation_from<S: FeedbackStore + ?Sized>(
    store: &S,
    workspace_id: DbId,
    anchor: &PostRecord,
    filter: &FilterContext,
) -> Result<Navigation, S::Error> {
    tracing::debug!(
        workspace_id,
        anchor_post_id = anchor.id,
        order = filter.order.as_str(),
        filtered = !filter.is_unfiltered(),
        "Resolving navigation"
    );

    let tags = resolve_tag_prepass(store, workspace_id, &filter.tag_slugs).await?;
    if tags == TagPrepass::NoMatch {
        return Ok(Navigation::default());
    }

    let candidates = CandidateFilter {
        workspace_id,
        filter,
        tag_post_ids: tags.post_ids(),
    };
    let query = |side| NeighborQuery {
        candidates,
        anchor: anchor.order_key(),
        order: filter.order,
        side,
    };
    let prev_query = query(NeighborSide::Prev);
    let next_query = query(NeighborSide::Next);

    let (prev, next) = futures::try_join!(
        store.find_neighbor(&prev_query),
        store.find_neighbor(&next_query)
    )?;

    Ok(Navigation { prev, next })
}
