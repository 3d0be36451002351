//! sqlx-backed [`FeedbackStore`].

use async_trait::async_trait;
use feedback_core::store::{
    FeedbackStore, ListQuery, MergeEdge, MergeSourceRecord, NeighborQuery, PostLink,
    PostListItem, PostRecord,
};
use feedback_core::types::DbId;

use crate::repositories::{PostMergeRepo, PostRepo, TagRepo, WorkspaceRepo};
use crate::DbPool;

/// Read-side store over a PostgreSQL pool. Cloning shares the pool.
#[derive(Clone)]
pub struct PgFeedbackStore {
    pool: DbPool,
}

impl PgFeedbackStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackStore for PgFeedbackStore {
    type Error = sqlx::Error;

    async fn find_workspace_id(&self, workspace_slug: &str) -> Result<Option<DbId>, sqlx::Error> {
        WorkspaceRepo::find_id_by_slug(&self.pool, workspace_slug).await
    }

    async fn find_post(
        &self,
        workspace_id: DbId,
        post_id: DbId,
    ) -> Result<Option<PostRecord>, sqlx::Error> {
        let row = PostRepo::find_in_workspace(&self.pool, workspace_id, post_id).await?;
        Ok(row.map(PostRecord::from))
    }

    async fn count_merges_into(&self, target_post_id: DbId) -> Result<i64, sqlx::Error> {
        PostMergeRepo::count_by_target(&self.pool, target_post_id).await
    }

    async fn find_merge_edge(
        &self,
        source_post_id: DbId,
        target_post_id: DbId,
    ) -> Result<Option<MergeEdge>, sqlx::Error> {
        let edge = PostMergeRepo::find_edge(&self.pool, source_post_id, target_post_id).await?;
        Ok(edge.map(MergeEdge::from))
    }

    async fn recent_merge_sources(
        &self,
        workspace_id: DbId,
        target_post_id: DbId,
        limit: i64,
    ) -> Result<Vec<MergeSourceRecord>, sqlx::Error> {
        let rows =
            PostMergeRepo::recent_sources(&self.pool, workspace_id, target_post_id, limit).await?;
        Ok(rows.into_iter().map(MergeSourceRecord::from).collect())
    }

    async fn post_ids_for_tags(
        &self,
        workspace_id: DbId,
        tag_slugs: &[String],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let ids = TagRepo::post_ids_for_slugs(&self.pool, workspace_id, tag_slugs).await?;
        tracing::debug!(
            workspace_id,
            tags = tag_slugs.len(),
            matched = ids.len(),
            "Resolved tag filter"
        );
        Ok(ids)
    }

    async fn find_neighbor(
        &self,
        query: &NeighborQuery<'_>,
    ) -> Result<Option<PostLink>, sqlx::Error> {
        let row = PostRepo::find_neighbor(&self.pool, query).await?;
        Ok(row.map(PostLink::from))
    }

    async fn list_posts(&self, query: &ListQuery<'_>) -> Result<Vec<PostListItem>, sqlx::Error> {
        let rows = PostRepo::list_filtered(&self.pool, query).await?;
        Ok(rows.into_iter().map(PostListItem::from).collect())
    }
}
