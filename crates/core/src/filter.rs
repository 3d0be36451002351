//! Filter normalization for post listing and navigation.
//!
//! Turns loosely-typed query parameters into a canonical [`FilterContext`].
//! Malformed input never fails: it normalizes to empty lists and the default
//! order.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Status vocabulary
// ---------------------------------------------------------------------------

pub const STATUS_UNDER_REVIEW: &str = "under-review";
pub const STATUS_IN_PROGRESS: &str = "in-progress";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_CLOSED: &str = "closed";

/// Fold a status token into the canonical vocabulary.
///
/// Aliases are matched case-insensitively. Unrecognized tokens are returned
/// as given so custom statuses keep working.
pub fn canonical_status(token: &str) -> String {
    match token.to_ascii_lowercase().as_str() {
        "review" | "under-review" | "underreview" => STATUS_UNDER_REVIEW.to_string(),
        "progress" | "inprogress" | "in-progress" => STATUS_IN_PROGRESS.to_string(),
        "complete" | "completed" => STATUS_COMPLETED.to_string(),
        "close" | "closed" => STATUS_CLOSED.to_string(),
        _ => token.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Sort order
// ---------------------------------------------------------------------------

/// Sort order for post listing and navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// `created_at` descending.
    #[default]
    Newest,
    /// `created_at` ascending.
    Oldest,
    /// `upvotes` descending.
    Likes,
}

impl SortOrder {
    /// Parse a raw `order` value. Anything other than `oldest` or `likes`
    /// (including absence) is [`SortOrder::Newest`].
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("oldest") => Self::Oldest,
            Some("likes") => Self::Likes,
            _ => Self::Newest,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Likes => "likes",
        }
    }
}

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// A raw, array-shaped query value: either a single (possibly JSON-encoded)
/// string or an already-split list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawParam {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for RawParam {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for RawParam {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for RawParam {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

/// Filter parameters exactly as they arrive from a request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFilterParams {
    pub status: Option<RawParam>,
    pub board: Option<RawParam>,
    pub tag: Option<RawParam>,
    pub order: Option<String>,
    pub search: Option<String>,
}

// ---------------------------------------------------------------------------
// Canonical filter
// ---------------------------------------------------------------------------

/// Canonical filter shared by listing and navigation.
///
/// An empty list means "no constraint", never "match nothing".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterContext {
    pub statuses: Vec<String>,
    pub board_slugs: Vec<String>,
    pub tag_slugs: Vec<String>,
    pub order: SortOrder,
    pub search: String,
}

impl FilterContext {
    /// True when no predicate is active (order alone does not filter).
    pub fn is_unfiltered(&self) -> bool {
        self.statuses.is_empty()
            && self.board_slugs.is_empty()
            && self.tag_slugs.is_empty()
            && self.search.is_empty()
    }
}

/// Normalize raw request parameters into a [`FilterContext`].
///
/// - String values starting with `[` or `"` are decoded as JSON; decode
///   failures yield an empty list.
/// - Other string values are comma-separated lists.
/// - Tokens are trimmed, empties dropped, duplicates removed (first wins).
/// - Statuses are folded to the canonical vocabulary; board and tag slugs are
///   lowercased.
pub fn normalize_filter_params(raw: &RawFilterParams) -> FilterContext {
    FilterContext {
        statuses: normalize_list(raw.status.as_ref(), canonical_status),
        board_slugs: normalize_list(raw.board.as_ref(), normalize_slug),
        tag_slugs: normalize_list(raw.tag.as_ref(), normalize_slug),
        order: SortOrder::parse_or_default(raw.order.as_deref()),
        search: raw
            .search
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
    }
}

/// Build a case-insensitive substring pattern for `ILIKE ... ESCAPE '\'`.
///
/// `\`, `%` and `_` in the search term are escaped so they match literally.
pub fn search_like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn normalize_slug(token: &str) -> String {
    token.trim().to_lowercase()
}

fn normalize_list(param: Option<&RawParam>, fold: fn(&str) -> String) -> Vec<String> {
    let Some(param) = param else {
        return Vec::new();
    };

    let mut out: Vec<String> = Vec::new();
    for token in raw_tokens(param) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let folded = fold(token);
        if !out.contains(&folded) {
            out.push(folded);
        }
    }
    out
}

fn raw_tokens(param: &RawParam) -> Vec<String> {
    match param {
        RawParam::Many(values) => values.clone(),
        RawParam::One(value) => {
            let trimmed = value.trim();
            if trimmed.starts_with('[') || trimmed.starts_with('"') {
                decode_json_tokens(trimmed)
            } else {
                trimmed.split(',').map(str::to_string).collect()
            }
        }
    }
}

fn decode_json_tokens(encoded: &str) -> Vec<String> {
    match serde_json::from_str::<RawParam>(encoded) {
        Ok(RawParam::Many(values)) => values,
        Ok(RawParam::One(value)) => vec![value],
        Err(_) => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
