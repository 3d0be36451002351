//! Read primitives the resolvers require from the relational store.
//!
//! The store owns schema, indexing and query execution. Implementations must
//! scope every post lookup to a workspace and exclude system boards from
//! candidate sets; errors are returned unchanged to the resolver's caller.

use async_trait::async_trait;
use serde::Serialize;

use crate::filter::{FilterContext, SortOrder};
use crate::ordering::{NeighborSide, OrderKey};
use crate::types::{DbId, Timestamp};

/// Board types reserved for generated pages. Posts on these boards never
/// appear in merge or navigation candidate sets.
pub const SYSTEM_BOARD_TYPES: &[&str] = &["roadmap", "changelog"];

/// Whether a board `system_type` marks a system board.
pub fn is_system_board(system_type: Option<&str>) -> bool {
    system_type.is_some_and(|t| SYSTEM_BOARD_TYPES.contains(&t))
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A post joined to its board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRecord {
    pub id: DbId,
    pub board_id: DbId,
    pub slug: String,
    pub title: String,
    pub roadmap_status: String,
    pub created_at: Timestamp,
    pub upvotes: i32,
    pub duplicate_of_id: Option<DbId>,
    pub board_name: String,
    pub board_slug: String,
    pub board_system_type: Option<String>,
}

impl PostRecord {
    pub fn order_key(&self) -> OrderKey {
        OrderKey {
            created_at: self.created_at,
            upvotes: self.upvotes,
            id: self.id,
        }
    }

    pub fn is_on_system_board(&self) -> bool {
        is_system_board(self.board_system_type.as_deref())
    }
}

/// A single `post_merges` edge: `source_post_id` was merged into `target_post_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeEdge {
    pub id: DbId,
    pub source_post_id: DbId,
    pub target_post_id: DbId,
    pub created_at: Timestamp,
}

/// A merge edge joined to its source post and the source's board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeSourceRecord {
    pub post_id: DbId,
    pub slug: String,
    pub title: String,
    pub roadmap_status: String,
    pub board_name: String,
    pub board_slug: String,
    pub merged_at: Timestamp,
}

/// Minimal post reference for rendering a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostLink {
    pub slug: String,
    pub title: String,
}

/// One row of a filtered post listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostListItem {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub roadmap_status: String,
    pub upvotes: i32,
    pub created_at: Timestamp,
    pub board_slug: String,
    pub board_name: String,
    pub duplicate_of_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Predicate set defining the candidate posts of a workspace.
///
/// `tag_post_ids` is the result of the tag pre-pass: `None` when no tag
/// filter is active. The filter's own `tag_slugs` are not consulted by
/// stores.
#[derive(Debug, Clone, Copy)]
pub struct CandidateFilter<'a> {
    pub workspace_id: DbId,
    pub filter: &'a FilterContext,
    pub tag_post_ids: Option<&'a [DbId]>,
}

/// Nearest candidate strictly on `side` of `anchor` under `order`.
#[derive(Debug, Clone, Copy)]
pub struct NeighborQuery<'a> {
    pub candidates: CandidateFilter<'a>,
    pub anchor: OrderKey,
    pub order: SortOrder,
    pub side: NeighborSide,
}

/// A page of candidates under `order`.
#[derive(Debug, Clone, Copy)]
pub struct ListQuery<'a> {
    pub candidates: CandidateFilter<'a>,
    pub order: SortOrder,
    pub limit: i64,
    pub offset: i64,
}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// Typed read primitives over workspaces, boards, posts, merges and tags.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Resolve a workspace slug to its id.
    async fn find_workspace_id(&self, workspace_slug: &str) -> Result<Option<DbId>, Self::Error>;

    /// Fetch a post by id, only if its board belongs to `workspace_id`.
    async fn find_post(
        &self,
        workspace_id: DbId,
        post_id: DbId,
    ) -> Result<Option<PostRecord>, Self::Error>;

    /// Count `post_merges` rows whose target is `target_post_id`.
    async fn count_merges_into(&self, target_post_id: DbId) -> Result<i64, Self::Error>;

    /// Fetch the most recent edge for a `(source, target)` pair.
    async fn find_merge_edge(
        &self,
        source_post_id: DbId,
        target_post_id: DbId,
    ) -> Result<Option<MergeEdge>, Self::Error>;

    /// Most recent edges into `target_post_id`, newest first, joined to
    /// source posts of the same workspace on non-system boards.
    async fn recent_merge_sources(
        &self,
        workspace_id: DbId,
        target_post_id: DbId,
        limit: i64,
    ) -> Result<Vec<MergeSourceRecord>, Self::Error>;

    /// Distinct ids of workspace posts carrying any of `tag_slugs`.
    async fn post_ids_for_tags(
        &self,
        workspace_id: DbId,
        tag_slugs: &[String],
    ) -> Result<Vec<DbId>, Self::Error>;

    /// The single nearest candidate on the query's side of the anchor.
    async fn find_neighbor(
        &self,
        query: &NeighborQuery<'_>,
    ) -> Result<Option<PostLink>, Self::Error>;

    /// A page of candidates in display order.
    async fn list_posts(&self, query: &ListQuery<'_>) -> Result<Vec<PostListItem>, Self::Error>;
}

// ---------------------------------------------------------------------------
// Tag pre-pass
// ---------------------------------------------------------------------------

/// Outcome of mapping a filter's tag slugs to post ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagPrepass {
    /// No tag filter is active.
    Inactive,
    /// Tag filter active; candidates are restricted to these posts.
    Matched(Vec<DbId>),
    /// Tag filter active but no post carries any of the tags.
    NoMatch,
}

impl TagPrepass {
    pub fn post_ids(&self) -> Option<&[DbId]> {
        match self {
            Self::Matched(ids) => Some(ids),
            Self::Inactive | Self::NoMatch => None,
        }
    }
}

/// Resolve the tag filter before any candidate query runs.
///
/// An empty `tag_slugs` list is a no-op, never "match nothing".
pub async fn resolve_tag_prepass<S: FeedbackStore + ?Sized>(
    store: &S,
    workspace_id: DbId,
    tag_slugs: &[String],
) -> Result<TagPrepass, S::Error> {
    if tag_slugs.is_empty() {
        return Ok(TagPrepass::Inactive);
    }

    let ids = store.post_ids_for_tags(workspace_id, tag_slugs).await?;
    if ids.is_empty() {
        Ok(TagPrepass::NoMatch)
    } else {
        Ok(TagPrepass::Matched(ids))
    }
}
