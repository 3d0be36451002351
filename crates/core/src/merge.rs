//! Merge graph resolution for a single post.
//!
//! Computes how many posts were merged into a post, which post it was merged
//! into (one hop only), and a bounded preview of its most recent sources.
//! Dangling or out-of-workspace references resolve to `None`; store errors
//! propagate unchanged.

use serde::Serialize;

use crate::store::{FeedbackStore, MergeSourceRecord, PostRecord};
use crate::types::{DbId, Timestamp};

/// Maximum number of merged sources returned in a preview.
pub const MERGED_SOURCES_PREVIEW_LIMIT: i64 = 3;

/// Display summary of one side of a merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub roadmap_status: String,
    pub merged_at: Option<Timestamp>,
    pub board_name: String,
    pub board_slug: String,
}

impl MergeSummary {
    fn from_target(target: PostRecord, merged_at: Option<Timestamp>) -> Self {
        Self {
            id: target.id,
            slug: target.slug,
            title: target.title,
            roadmap_status: target.roadmap_status,
            merged_at,
            board_name: target.board_name,
            board_slug: target.board_slug,
        }
    }
}

impl From<MergeSourceRecord> for MergeSummary {
    fn from(source: MergeSourceRecord) -> Self {
        Self {
            id: source.post_id,
            slug: source.slug,
            title: source.title,
            roadmap_status: source.roadmap_status,
            merged_at: Some(source.merged_at),
            board_name: source.board_name,
            board_slug: source.board_slug,
        }
    }
}

/// Merge aggregates for a post.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MergeInfo {
    /// Number of `post_merges` rows targeting the post.
    pub merged_count: i64,
    /// The post this one was merged into, when resolvable.
    pub merged_into: Option<MergeSummary>,
    /// Most recent sources, only when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged_sources: Option<Vec<MergeSummary>>,
}

/// Resolve merge aggregates for `post_id`.
///
/// `merged_into` is only looked up when `duplicate_of_id` is set, regardless
/// of any edges where the post is a source.
pub async fn resolve_merge_info<S: FeedbackStore + ?Sized>(
    store: &S,
    workspace_id: DbId,
    post_id: DbId,
    duplicate_of_id: Option<DbId>,
    include_sources: bool,
) -> Result<MergeInfo, S::Error> {
    let merged_count = store.count_merges_into(post_id).await?;

    let merged_into = match duplicate_of_id {
        Some(target_id) => resolve_merged_into(store, workspace_id, post_id, target_id).await?,
        None => None,
    };

    let merged_sources = if include_sources {
        let sources = store
            .recent_merge_sources(workspace_id, post_id, MERGED_SOURCES_PREVIEW_LIMIT)
            .await?;
        Some(sources.into_iter().map(MergeSummary::from).collect())
    } else {
        None
    };

    Ok(MergeInfo {
        merged_count,
        merged_into,
        merged_sources,
    })
}

async fn resolve_merged_into<S: FeedbackStore + ?Sized>(
    store: &S,
    workspace_id: DbId,
    post_id: DbId,
    target_id: DbId,
) -> Result<Option<MergeSummary>, S::Error> {
    if target_id == post_id {
        tracing::debug!(post_id, "Post marked as duplicate of itself, ignoring");
        return Ok(None);
    }

    let Some(target) = store.find_post(workspace_id, target_id).await? else {
        tracing::debug!(
            post_id,
            target_id,
            workspace_id,
            "Merge target not found in workspace"
        );
        return Ok(None);
    };

    if target.is_on_system_board() {
        tracing::debug!(post_id, target_id, "Merge target is on a system board");
        return Ok(None);
    }

    let edge = store.find_merge_edge(post_id, target_id).await?;
    if edge.is_none() {
        tracing::debug!(post_id, target_id, "Merge edge missing, merge time unknown");
    }

    Ok(Some(MergeSummary::from_target(
        target,
        edge.map(|e| e.created_at),
    )))
}
