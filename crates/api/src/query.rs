//! Shared query parameter types for API handlers.

use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use feedback_core::filter::{RawFilterParams, RawParam};
use serde::Deserialize;

/// Raw filter parameters (`?status=&board=&tag=&order=&search=`).
///
/// `status`, `board` and `tag` may repeat (`?tag=bug&tag=ux`); repeated keys
/// collect into [`RawParam::Many`]. A single value stays as given, and
/// `feedback_core::filter` owns the decoding of JSON-encoded and
/// comma-separated lists. For `order` and `search` the first value wins.
#[derive(Debug, Default)]
pub struct FilterQuery {
    pub status: Option<RawParam>,
    pub board: Option<RawParam>,
    pub tag: Option<RawParam>,
    pub order: Option<String>,
    pub search: Option<String>,
}

impl FilterQuery {
    /// Fold decoded `key=value` pairs in query-string order. Unknown keys
    /// are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "status" => push_value(&mut query.status, value),
                "board" => push_value(&mut query.board, value),
                "tag" => push_value(&mut query.tag, value),
                "order" => {
                    query.order.get_or_insert(value);
                }
                "search" => {
                    query.search.get_or_insert(value);
                }
                _ => {}
            }
        }
        query
    }
}

fn push_value(slot: &mut Option<RawParam>, value: String) {
    *slot = Some(match slot.take() {
        None => RawParam::One(value),
        Some(RawParam::One(first)) => RawParam::Many(vec![first, value]),
        Some(RawParam::Many(mut values)) => {
            values.push(value);
            RawParam::Many(values)
        }
    });
}

impl<S: Send + Sync> FromRequestParts<S> for FilterQuery {
    type Rejection = QueryRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state).await?;
        Ok(Self::from_pairs(pairs))
    }
}

impl From<FilterQuery> for RawFilterParams {
    fn from(query: FilterQuery) -> Self {
        Self {
            status: query.status,
            board: query.board,
            tag: query.tag,
            order: query.order,
            search: query.search,
        }
    }
}

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped by `feedback_core::listing`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for the merge-info endpoint.
#[derive(Debug, Deserialize)]
pub struct MergeInfoParams {
    #[serde(default)]
    pub include_sources: bool,
}
