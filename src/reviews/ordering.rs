//! Review ordering

use std::{
    cmp::Ordering,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use thiserror::Error;

use crate::reviews::Review;

/// Error returned when parsing an unknown ordering name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown review ordering: {0}")]
pub struct UnknownOrdering(String);

/// How a review list is sorted (the tabs of a review screen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReviewOrdering {
    /// Newest first, by creation timestamp
    #[default]
    MostRecent,

    /// Highest helpful count first
    MostHelpful,
}

impl ReviewOrdering {
    /// Every ordering, in tab order.
    pub const ALL: [ReviewOrdering; 2] = [Self::MostRecent, Self::MostHelpful];

    /// Tab label.
    pub fn label(self) -> &'static str {
        match self {
            Self::MostRecent => "Most Recent",
            Self::MostHelpful => "Most Helpful",
        }
    }

    /// Compares two reviews; the review that should come first is `Less`.
    ///
    /// Timestamps are compared as strings, which matches chronological order for ISO-8601 values
    /// in a single offset.
    pub fn compare(self, a: &Review, b: &Review) -> Ordering {
        match self {
            Self::MostRecent => b.created_at.cmp(&a.created_at),
            Self::MostHelpful => b.helpful_count.cmp(&a.helpful_count),
        }
    }
}

impl Display for ReviewOrdering {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

impl FromStr for ReviewOrdering {
    type Err = UnknownOrdering;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised: String = value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalised.as_str() {
            "mostrecent" | "recent" => Ok(Self::MostRecent),
            "mosthelpful" | "helpful" => Ok(Self::MostHelpful),
            _ => Err(UnknownOrdering(value.to_string())),
        }
    }
}

/// Sorts `reviews` in place. The sort is stable: reviews with equal keys keep their relative order.
pub fn sort_reviews(reviews: &mut [Review], ordering: ReviewOrdering) {
    reviews.sort_by(|a, b| ordering.compare(a, b));
}
