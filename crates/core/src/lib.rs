//! Feedback board domain core.
//!
//! Pure logic with no database access: filter normalization, the order-key
//! model, and the merge and navigation resolvers. Resolvers talk to storage
//! through the [`store::FeedbackStore`] trait.

pub mod error;
pub mod filter;
pub mod listing;
pub mod merge;
pub mod navigation;
pub mod ordering;
pub mod store;
pub mod types;

#[cfg(test)]
mod test_support;
