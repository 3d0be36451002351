//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod board_repo;
pub mod post_merge_repo;
pub mod post_repo;
pub mod tag_repo;
pub mod workspace_repo;

pub use board_repo::BoardRepo;
pub use post_merge_repo::PostMergeRepo;
pub use post_repo::PostRepo;
pub use tag_repo::TagRepo;
pub use workspace_repo::WorkspaceRepo;
