//! Rating summary

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::reviews::Review;

/// Number of reviews with a given star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarCount {
    /// Star value, 1 to 5
    pub star: u8,

    /// Reviews with exactly that rating
    pub count: usize,
}

/// Average, total and per-star distribution of a set of reviews.
///
/// The distribution holds raw counts for stars 5 down to 1, including stars nobody picked.
/// Percentages are derived from the counts with [`RatingSummary::percentage`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RatingSummary {
    average: Decimal,
    total: usize,
    distribution: SmallVec<[StarCount; 5]>,
}

impl RatingSummary {
    /// Summary of no reviews: zero average, zero total, empty distribution.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Summarises the ratings of `reviews`.
    pub fn from_reviews(reviews: &[Review]) -> Self {
        if reviews.is_empty() {
            return Self::empty();
        }

        let mut counts: FxHashMap<u8, usize> = FxHashMap::default();
        let mut sum: u64 = 0;

        for review in reviews {
            let stars = review.rating.stars();

            *counts.entry(stars).or_default() += 1;
            sum += u64::from(stars);
        }

        let total = reviews.len();
        let average = Decimal::from(sum) / Decimal::from(total);

        let distribution = (1..=5_u8)
            .rev()
            .map(|star| StarCount {
                star,
                count: counts.get(&star).copied().unwrap_or_default(),
            })
            .collect();

        Self {
            average,
            total,
            distribution,
        }
    }

    /// Mean rating.
    pub fn average(&self) -> Decimal {
        self.average
    }

    /// Number of reviews summarised.
    pub fn total(&self) -> usize {
        self.total
    }

    /// `(star, count)` pairs from five stars down to one.
    pub fn distribution(&self) -> &[StarCount] {
        &self.distribution
    }

    /// Number of reviews with exactly `star` stars.
    pub fn count(&self, star: u8) -> usize {
        self.distribution
            .iter()
            .find(|entry| entry.star == star)
            .map_or(0, |entry| entry.count)
    }

    /// Share of reviews with exactly `star` stars, as a fraction of the total.
    pub fn percentage(&self, star: u8) -> Percentage {
        if self.total == 0 {
            return Percentage::from(Decimal::ZERO);
        }

        Percentage::from(Decimal::from(self.count(star)) / Decimal::from(self.total))
    }

    /// Returns true when no reviews were summarised.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
