//! Order-key model for post navigation and listing.
//!
//! Every sort order is a strict total order over the composite key
//! `(order_field, id)`. The id tie-break runs in the same direction as the
//! primary field, so two posts never compare equal.

use std::cmp::Ordering;

use crate::filter::SortOrder;
use crate::types::{DbId, Timestamp};

/// Column that carries the primary sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyField {
    CreatedAt,
    Upvotes,
}

impl SortOrder {
    pub fn key_field(self) -> KeyField {
        match self {
            Self::Newest | Self::Oldest => KeyField::CreatedAt,
            Self::Likes => KeyField::Upvotes,
        }
    }

    /// Whether the display order runs from the largest key to the smallest.
    pub fn is_descending(self) -> bool {
        matches!(self, Self::Newest | Self::Likes)
    }

    /// Scan direction over `(order_field, id)` that yields display order.
    pub fn display_direction(self) -> ScanDirection {
        if self.is_descending() {
            ScanDirection::Desc
        } else {
            ScanDirection::Asc
        }
    }
}

/// Which neighbor of the anchor is being looked up, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborSide {
    Prev,
    Next,
}

/// Inequality applied to `(order_field, id)` against the anchor's key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Greater,
    Less,
}

impl Comparison {
    pub fn sql_operator(self) -> &'static str {
        match self {
            Self::Greater => ">",
            Self::Less => "<",
        }
    }
}

/// Scan direction over `(order_field, id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    Asc,
    Desc,
}

impl ScanDirection {
    pub fn sql_keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Range query shape that finds the nearest neighbor on one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekPlan {
    pub comparison: Comparison,
    pub direction: ScanDirection,
}

/// Derive the range inequality and scan direction for a neighbor lookup.
///
/// In a descending display order the previous post has a *larger* key, so
/// the scan walks upward from the anchor; everything else follows by
/// symmetry.
pub fn seek_plan(order: SortOrder, side: NeighborSide) -> SeekPlan {
    let toward_larger = match side {
        NeighborSide::Prev => order.is_descending(),
        NeighborSide::Next => !order.is_descending(),
    };

    if toward_larger {
        SeekPlan {
            comparison: Comparison::Greater,
            direction: ScanDirection::Asc,
        }
    } else {
        SeekPlan {
            comparison: Comparison::Less,
            direction: ScanDirection::Desc,
        }
    }
}

/// Raw order-key fields of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderKey {
    pub created_at: Timestamp,
    pub upvotes: i32,
    pub id: DbId,
}

impl OrderKey {
    /// Ascending comparison of the composite key `(field, id)`.
    pub fn key_cmp(&self, other: &Self, field: KeyField) -> Ordering {
        let primary = match field {
            KeyField::CreatedAt => self.created_at.cmp(&other.created_at),
            KeyField::Upvotes => self.upvotes.cmp(&other.upvotes),
        };
        primary.then(self.id.cmp(&other.id))
    }

    /// Comparison in display order: `Less` means `self` is listed first.
    pub fn display_cmp(&self, other: &Self, order: SortOrder) -> Ordering {
        let ascending = self.key_cmp(other, order.key_field());
        if order.is_descending() {
            ascending.reverse()
        } else {
            ascending
        }
    }

    /// Whether `self` lies strictly on `side` of `anchor` in display order.
    pub fn is_beyond(&self, anchor: &Self, order: SortOrder, side: NeighborSide) -> bool {
        let cmp = self.display_cmp(anchor, order);
        match side {
            NeighborSide::Prev => cmp == Ordering::Less,
            NeighborSide::Next => cmp == Ordering::Greater,
        }
    }
}
