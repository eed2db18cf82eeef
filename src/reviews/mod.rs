//! Reviews
//!
//! Reviews for a product or shop, the summary derived from their ratings, and the list state a
//! review screen works against.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::{
    products::{ProductId, ShopId},
    reviews::rating::Rating,
};

pub mod draft;
pub mod list;
pub mod ordering;
pub mod rating;
pub mod report;
pub mod summary;
pub mod time_ago;

/// Review identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(u64);

impl ReviewId {
    /// Creates a review identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for ReviewId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<u64> for ReviewId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// What a review is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReviewTarget {
    /// A product
    Product(ProductId),

    /// A shop
    Shop(ShopId),
}

impl ReviewTarget {
    /// REST collection the target lives in (`products` or `shops`).
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Product(_) => "products",
            Self::Shop(_) => "shops",
        }
    }

    /// Identifier of the product or shop.
    pub fn id(&self) -> &str {
        match self {
            Self::Product(id) => id.as_str(),
            Self::Shop(id) => id.as_str(),
        }
    }
}

impl Display for ReviewTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Product(id) => write!(f, "product {id}"),
            Self::Shop(id) => write!(f, "shop {id}"),
        }
    }
}

/// A fetched review.
///
/// Everything except `helpful_count` and `is_helpful` is fixed once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Review identifier
    pub id: ReviewId,

    /// Author display name
    pub author: String,

    /// Author avatar URL
    pub author_image: Option<String>,

    /// Star rating
    pub rating: Rating,

    /// Free-text comment
    pub comment: String,

    /// Creation timestamp as sent by the server (ISO-8601)
    pub created_at: String,

    /// Number of users who marked the review helpful
    pub helpful_count: u32,

    /// Relative age, e.g. `"3 days ago"`
    pub time_ago: String,

    /// Whether the current user marked the review helpful
    pub is_helpful: bool,
}
