//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Joined read rows converted into `feedback_core` store records

pub mod board;
pub mod post;
pub mod post_merge;
pub mod tag;
pub mod workspace;
