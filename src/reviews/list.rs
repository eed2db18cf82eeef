//! Review list state
//!
//! Holds the reviews as fetched plus a view sorted by the selected ordering. The view is always
//! re-derived from the fetched order, so switching orderings back and forth never reshuffles
//! reviews with equal keys.

use crate::reviews::{
    Review, ReviewId,
    ordering::{ReviewOrdering, sort_reviews},
    summary::RatingSummary,
};

/// Server-confirmed helpful state for one review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpfulUpdate {
    /// Review the update applies to
    pub review: ReviewId,

    /// New helpful count
    pub helpful_count: u32,

    /// Whether the current user now marks the review helpful
    pub is_helpful: bool,
}

/// Reviews for one target, their summary and the selected ordering.
#[derive(Debug, Clone, Default)]
pub struct ReviewList {
    fetched: Vec<Review>,
    view: Vec<Review>,
    ordering: ReviewOrdering,
    summary: RatingSummary,
}

impl ReviewList {
    /// Create an empty list with the given ordering.
    pub fn new(ordering: ReviewOrdering) -> Self {
        Self {
            ordering,
            ..Self::default()
        }
    }

    /// Replace the reviews, recompute the summary and re-apply the current ordering.
    pub fn load(&mut self, reviews: Vec<Review>) {
        self.summary = RatingSummary::from_reviews(&reviews);
        self.fetched = reviews;
        self.resort();
    }

    /// Switch ordering and re-sort the loaded reviews.
    pub fn select_ordering(&mut self, ordering: ReviewOrdering) {
        self.ordering = ordering;
        self.resort();
    }

    /// Apply a helpful toggle confirmed by the server.
    ///
    /// Only the review with the matching id changes. The summary depends on ratings alone and is
    /// left as is. Returns `false` when no loaded review has that id.
    pub fn apply_helpful(&mut self, update: HelpfulUpdate) -> bool {
        let Some(review) = self
            .fetched
            .iter_mut()
            .find(|review| review.id == update.review)
        else {
            return false;
        };

        review.helpful_count = update.helpful_count;
        review.is_helpful = update.is_helpful;

        self.resort();

        true
    }

    fn resort(&mut self) {
        let mut view = self.fetched.clone();
        sort_reviews(&mut view, self.ordering);
        self.view = view;
    }

    /// Reviews in the selected ordering.
    pub fn reviews(&self) -> &[Review] {
        &self.view
    }

    /// Reviews in the order they were fetched.
    pub fn fetched(&self) -> &[Review] {
        &self.fetched
    }

    /// Look up a review by id.
    pub fn get(&self, id: ReviewId) -> Option<&Review> {
        self.fetched.iter().find(|review| review.id == id)
    }

    /// Summary of the loaded ratings.
    pub fn summary(&self) -> &RatingSummary {
        &self.summary
    }

    /// Selected ordering.
    pub fn ordering(&self) -> ReviewOrdering {
        self.ordering
    }

    /// Number of loaded reviews.
    pub fn len(&self) -> usize {
        self.fetched.len()
    }

    /// Check if no reviews are loaded.
    pub fn is_empty(&self) -> bool {
        self.fetched.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::reviews::test_support::review;

    use super::*;

    fn ids(reviews: &[Review]) -> Vec<u64> {
        reviews.iter().map(|review| review.id.get()).collect()
    }

    fn loaded() -> ReviewList {
        let mut list = ReviewList::new(ReviewOrdering::MostRecent);

        list.load(vec![
            review(1, 5, "2024-01-01T00:00:00Z", 3),
            review(2, 4, "2024-01-03T00:00:00Z", 1),
            review(3, 2, "2024-01-03T00:00:00Z", 3),
            review(5, 1, "2024-01-02T00:00:00Z", 0),
        ]);

        list
    }

    #[test]
    fn load_sorts_and_summarises() {
        let list = loaded();

        assert_eq!(ids(list.reviews()), vec![2, 3, 5, 1]);
        assert_eq!(list.summary().total(), 4);
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn switching_orderings_round_trip_is_stable() {
        let mut list = loaded();
        let before = list.reviews().to_vec();

        list.select_ordering(ReviewOrdering::MostHelpful);
        assert_eq!(ids(list.reviews()), vec![1, 3, 2, 5]);

        list.select_ordering(ReviewOrdering::MostRecent);
        assert_eq!(list.reviews(), before.as_slice());
    }

    #[test]
    fn apply_helpful_updates_only_matching_review() {
        let mut list = loaded();
        let before = list.fetched().to_vec();
        let summary = list.summary().clone();

        let applied = list.apply_helpful(HelpfulUpdate {
            review: ReviewId::new(5),
            helpful_count: 10,
            is_helpful: true,
        });

        assert!(applied);

        for (old, new) in before.iter().zip(list.fetched()) {
            if new.id == ReviewId::new(5) {
                assert_eq!(new.helpful_count, 10);
                assert!(new.is_helpful);
                assert_eq!(new.rating, old.rating);
            } else {
                assert_eq!(new, old);
            }
        }

        assert_eq!(list.summary(), &summary);
    }

    #[test]
    fn apply_helpful_resorts_under_current_ordering() {
        let mut list = loaded();
        list.select_ordering(ReviewOrdering::MostHelpful);

        list.apply_helpful(HelpfulUpdate {
            review: ReviewId::new(5),
            helpful_count: 10,
            is_helpful: true,
        });

        assert_eq!(list.reviews().first().map(|review| review.id.get()), Some(5));
    }

    #[test]
    fn apply_helpful_unknown_review_is_ignored() {
        let mut list = loaded();
        let before = list.reviews().to_vec();

        let applied = list.apply_helpful(HelpfulUpdate {
            review: ReviewId::new(99),
            helpful_count: 1,
            is_helpful: true,
        });

        assert!(!applied);
        assert_eq!(list.reviews(), before.as_slice());
    }
}
