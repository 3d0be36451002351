//! In-memory [`FeedbackStore`] for resolver tests.
//!
//! Answers every query by scanning all rows, which makes it a simple
//! reference for the range-query behaviour of real stores.

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};

use crate::filter::FilterContext;
use crate::ordering::NeighborSide;
use crate::store::{
    is_system_board, CandidateFilter, FeedbackStore, ListQuery, MergeEdge, MergeSourceRecord,
    NeighborQuery, PostLink, PostListItem, PostRecord,
};
use crate::types::{DbId, Timestamp};

#[derive(Debug, thiserror::Error)]
#[error("store unavailable")]
pub struct StoreUnavailable;

struct Workspace {
    id: DbId,
    slug: String,
}

struct Board {
    id: DbId,
    workspace_id: DbId,
    slug: String,
    system_type: Option<String>,
}

struct Post {
    id: DbId,
    board_id: DbId,
    slug: String,
    title: String,
    content: String,
    roadmap_status: String,
    created_at: Timestamp,
    upvotes: i32,
    duplicate_of_id: Option<DbId>,
}

struct Tag {
    id: DbId,
    workspace_id: DbId,
    slug: String,
}

#[derive(Default)]
pub struct InMemoryStore {
    next_id: DbId,
    workspaces: Vec<Workspace>,
    boards: Vec<Board>,
    posts: Vec<Post>,
    merges: Vec<MergeEdge>,
    tags: Vec<Tag>,
    post_tags: Vec<(DbId, DbId)>,
    failing: bool,
}

fn base_time() -> Timestamp {
    Utc.with_ymd_and_hms(2022, 12, 31, 0, 0, 0).unwrap()
}

impl InMemoryStore {
    fn allocate_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    pub fn add_workspace(&mut self, slug: &str) -> DbId {
        let id = self.allocate_id();
        self.workspaces.push(Workspace {
            id,
            slug: slug.to_string(),
        });
        id
    }

    pub fn add_board(&mut self, workspace_id: DbId, slug: &str, system_type: Option<&str>) -> DbId {
        let id = self.allocate_id();
        self.boards.push(Board {
            id,
            workspace_id,
            slug: slug.to_string(),
            system_type: system_type.map(str::to_string),
        });
        id
    }

    /// Add an `open` post created on `day` January 2023 (day 0 is 2022-12-31).
    pub fn add_post(&mut self, board_id: DbId, slug: &str, day: u32) -> DbId {
        let id = self.allocate_id();
        self.posts.push(Post {
            id,
            board_id,
            slug: slug.to_string(),
            title: format!("Title {slug}"),
            content: String::new(),
            roadmap_status: "open".to_string(),
            created_at: base_time() + Duration::days(i64::from(day)),
            upvotes: 0,
            duplicate_of_id: None,
        });
        id
    }

    pub fn board_of(&self, post_id: DbId) -> DbId {
        self.post(post_id).board_id
    }

    pub fn workspace_of(&self, board_id: DbId) -> DbId {
        self.board(board_id).workspace_id
    }

    pub fn set_status(&mut self, post_id: DbId, status: &str) {
        self.post_mut(post_id).roadmap_status = status.to_string();
    }

    pub fn set_upvotes(&mut self, post_id: DbId, upvotes: i32) {
        self.post_mut(post_id).upvotes = upvotes;
    }

    pub fn set_title(&mut self, post_id: DbId, title: &str) {
        self.post_mut(post_id).title = title.to_string();
    }

    pub fn set_content(&mut self, post_id: DbId, content: &str) {
        self.post_mut(post_id).content = content.to_string();
    }

    pub fn tag(&mut self, post_id: DbId, tag_slug: &str) {
        let workspace_id = self.workspace_of(self.board_of(post_id));
        let existing = self
            .tags
            .iter()
            .find(|t| t.workspace_id == workspace_id && t.slug == tag_slug)
            .map(|t| t.id);
        let tag_id = match existing {
            Some(id) => id,
            None => {
                let id = self.allocate_id();
                self.tags.push(Tag {
                    id,
                    workspace_id,
                    slug: tag_slug.to_string(),
                });
                id
            }
        };
        if !self.post_tags.contains(&(post_id, tag_id)) {
            self.post_tags.push((post_id, tag_id));
        }
    }

    /// Record only the merge edge, `minute` minutes after the base time.
    pub fn add_merge_edge(&mut self, source: DbId, target: DbId, minute: u32) {
        let id = self.allocate_id();
        self.merges.push(MergeEdge {
            id,
            source_post_id: source,
            target_post_id: target,
            created_at: base_time() + Duration::minutes(i64::from(minute)),
        });
    }

    /// Record a full merge: the edge plus the source's `duplicate_of_id`.
    pub fn merge(&mut self, source: DbId, target: DbId, minute: u32) {
        self.add_merge_edge(source, target, minute);
        self.post_mut(source).duplicate_of_id = Some(target);
    }

    /// Delete a post the way the relational store would: tags cascade,
    /// `duplicate_of_id` pointers are nulled, merge edges are left dangling.
    pub fn delete_post(&mut self, post_id: DbId) {
        self.posts.retain(|p| p.id != post_id);
        self.post_tags.retain(|(p, _)| *p != post_id);
        for post in &mut self.posts {
            if post.duplicate_of_id == Some(post_id) {
                post.duplicate_of_id = None;
            }
        }
    }

    pub fn fail_all(&mut self) {
        self.failing = true;
    }

    fn check(&self) -> Result<(), StoreUnavailable> {
        if self.failing {
            Err(StoreUnavailable)
        } else {
            Ok(())
        }
    }

    fn post(&self, id: DbId) -> &Post {
        self.posts.iter().find(|p| p.id == id).expect("unknown post")
    }

    fn post_mut(&mut self, id: DbId) -> &mut Post {
        self.posts
            .iter_mut()
            .find(|p| p.id == id)
            .expect("unknown post")
    }

    fn board(&self, id: DbId) -> &Board {
        self.boards.iter().find(|b| b.id == id).expect("unknown board")
    }

    fn record(&self, post: &Post) -> PostRecord {
        let board = self.board(post.board_id);
        PostRecord {
            id: post.id,
            board_id: board.id,
            slug: post.slug.clone(),
            title: post.title.clone(),
            roadmap_status: post.roadmap_status.clone(),
            created_at: post.created_at,
            upvotes: post.upvotes,
            duplicate_of_id: post.duplicate_of_id,
            board_name: format!("Board {}", board.slug),
            board_slug: board.slug.clone(),
            board_system_type: board.system_type.clone(),
        }
    }

    fn in_workspace(&self, post: &Post, workspace_id: DbId) -> bool {
        self.board(post.board_id).workspace_id == workspace_id
    }

    fn is_candidate(&self, post: &Post, candidates: &CandidateFilter<'_>) -> bool {
        let board = self.board(post.board_id);
        let filter: &FilterContext = candidates.filter;
        let search = filter.search.to_lowercase();

        board.workspace_id == candidates.workspace_id
            && !is_system_board(board.system_type.as_deref())
            && (filter.statuses.is_empty() || filter.statuses.contains(&post.roadmap_status))
            && (filter.board_slugs.is_empty() || filter.board_slugs.contains(&board.slug))
            && candidates
                .tag_post_ids
                .map_or(true, |ids| ids.contains(&post.id))
            && (search.is_empty()
                || post.title.to_lowercase().contains(&search)
                || post.content.to_lowercase().contains(&search))
    }

    fn candidates<'s>(&'s self, candidates: &'s CandidateFilter<'_>) -> Vec<&'s Post> {
        self.posts
            .iter()
            .filter(|p| self.is_candidate(p, candidates))
            .collect()
    }
}

#[async_trait]
impl FeedbackStore for InMemoryStore {
    type Error = StoreUnavailable;

    async fn find_workspace_id(&self, workspace_slug: &str) -> Result<Option<DbId>, Self::Error> {
        self.check()?;
        Ok(self
            .workspaces
            .iter()
            .find(|w| w.slug == workspace_slug)
            .map(|w| w.id))
    }

    async fn find_post(
        &self,
        workspace_id: DbId,
        post_id: DbId,
    ) -> Result<Option<PostRecord>, Self::Error> {
        self.check()?;
        Ok(self
            .posts
            .iter()
            .find(|p| p.id == post_id && self.in_workspace(p, workspace_id))
            .map(|p| self.record(p)))
    }

    async fn count_merges_into(&self, target_post_id: DbId) -> Result<i64, Self::Error> {
        self.check()?;
        Ok(self
            .merges
            .iter()
            .filter(|m| m.target_post_id == target_post_id)
            .count() as i64)
    }

    async fn find_merge_edge(
        &self,
        source_post_id: DbId,
        target_post_id: DbId,
    ) -> Result<Option<MergeEdge>, Self::Error> {
        self.check()?;
        Ok(self
            .merges
            .iter()
            .filter(|m| m.source_post_id == source_post_id && m.target_post_id == target_post_id)
            .max_by_key(|m| (m.created_at, m.id))
            .cloned())
    }

    async fn recent_merge_sources(
        &self,
        workspace_id: DbId,
        target_post_id: DbId,
        limit: i64,
    ) -> Result<Vec<MergeSourceRecord>, Self::Error> {
        self.check()?;
        let mut edges: Vec<&MergeEdge> = self
            .merges
            .iter()
            .filter(|m| m.target_post_id == target_post_id)
            .collect();
        edges.sort_by_key(|m| std::cmp::Reverse((m.created_at, m.id)));

        let sources = edges
            .into_iter()
            .filter_map(|edge| {
                let source = self.posts.iter().find(|p| p.id == edge.source_post_id)?;
                let record = self.record(source);
                let visible = self.in_workspace(source, workspace_id) && !record.is_on_system_board();
                visible.then(|| MergeSourceRecord {
                    post_id: record.id,
                    slug: record.slug,
                    title: record.title,
                    roadmap_status: record.roadmap_status,
                    board_name: record.board_name,
                    board_slug: record.board_slug,
                    merged_at: edge.created_at,
                })
            })
            .take(limit.max(0) as usize)
            .collect();
        Ok(sources)
    }

    async fn post_ids_for_tags(
        &self,
        workspace_id: DbId,
        tag_slugs: &[String],
    ) -> Result<Vec<DbId>, Self::Error> {
        self.check()?;
        let tag_ids: Vec<DbId> = self
            .tags
            .iter()
            .filter(|t| t.workspace_id == workspace_id && tag_slugs.contains(&t.slug))
            .map(|t| t.id)
            .collect();
        let mut ids: Vec<DbId> = self
            .post_tags
            .iter()
            .filter(|(_, tag_id)| tag_ids.contains(tag_id))
            .map(|(post_id, _)| *post_id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }

    async fn find_neighbor(
        &self,
        query: &NeighborQuery<'_>,
    ) -> Result<Option<PostLink>, Self::Error> {
        self.check()?;
        let beyond = self.candidates(&query.candidates).into_iter().filter(|p| {
            self.record(p)
                .order_key()
                .is_beyond(&query.anchor, query.order, query.side)
        });

        // Nearest to the anchor: the last one listed before it, or the
        // first one listed after it.
        let by_display = |a: &&Post, b: &&Post| {
            self.record(a)
                .order_key()
                .display_cmp(&self.record(b).order_key(), query.order)
        };
        let nearest = match query.side {
            NeighborSide::Prev => beyond.max_by(by_display),
            NeighborSide::Next => beyond.min_by(by_display),
        };

        Ok(nearest.map(|p| PostLink {
            slug: p.slug.clone(),
            title: p.title.clone(),
        }))
    }

    async fn list_posts(&self, query: &ListQuery<'_>) -> Result<Vec<PostListItem>, Self::Error> {
        self.check()?;
        let mut posts = self.candidates(&query.candidates);
        posts.sort_by(|a, b| {
            self.record(a)
                .order_key()
                .display_cmp(&self.record(b).order_key(), query.order)
        });

        Ok(posts
            .into_iter()
            .skip(query.offset.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .map(|p| {
                let record = self.record(p);
                PostListItem {
                    id: record.id,
                    slug: record.slug,
                    title: record.title,
                    roadmap_status: record.roadmap_status,
                    upvotes: record.upvotes,
                    created_at: record.created_at,
                    board_slug: record.board_slug,
                    board_name: record.board_name,
                    duplicate_of_id: record.duplicate_of_id,
                }
            })
            .collect())
    }
}
