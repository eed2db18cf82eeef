//! Reviews service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use shopsmart::prelude::*;
use tracing::info;

use crate::{
    api::{
        ApiClient,
        records::{ReviewRecord, ToggleHelpfulRecord},
    },
    domain::reviews::ReviewsServiceError,
};

/// Reviews backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpReviewsService {
    client: ApiClient,
}

impl HttpReviewsService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

/// `products/{id}` or `shops/{id}`, with the id encoded as a single path segment.
fn target_path(target: &ReviewTarget) -> String {
    format!("{}/{}", target.collection(), urlencoding::encode(target.id()))
}

#[async_trait]
impl ReviewsService for HttpReviewsService {
    #[tracing::instrument(
        name = "reviews.service.list_reviews",
        skip(self),
        fields(target = %target, review_count = tracing::field::Empty),
        err
    )]
    async fn list_reviews(&self, target: &ReviewTarget) -> Result<Vec<Review>, ReviewsServiceError> {
        let records: Vec<ReviewRecord> = self
            .client
            .get(&format!("{}/get/reviews/", target_path(target)))
            .await?;

        tracing::Span::current().record("review_count", records.len());

        let now = Timestamp::now();

        Ok(records
            .into_iter()
            .map(|record| record.into_review(now))
            .collect())
    }

    #[tracing::instrument(
        name = "reviews.service.create_review",
        skip(self, review),
        fields(target = %target, rating = review.rating.stars()),
        err
    )]
    async fn create_review(
        &self,
        target: &ReviewTarget,
        review: &NewReview,
    ) -> Result<Review, ReviewsServiceError> {
        let record: ReviewRecord = self
            .client
            .post(&format!("{}/reviews/", target_path(target)), review)
            .await?;

        info!(review_id = record.id, "created review");

        Ok(record.into_review(Timestamp::now()))
    }

    #[tracing::instrument(
        name = "reviews.service.toggle_helpful",
        skip(self),
        fields(target = %target, review = %review),
        err
    )]
    async fn toggle_helpful(
        &self,
        target: &ReviewTarget,
        review: ReviewId,
    ) -> Result<HelpfulUpdate, ReviewsServiceError> {
        let record: ToggleHelpfulRecord = self
            .client
            .post_empty(&format!(
                "{}/reviews/{review}/toggle-helpful/",
                target_path(target)
            ))
            .await?;

        Ok(record.into())
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Every review of the target, in server order.
    async fn list_reviews(&self, target: &ReviewTarget) -> Result<Vec<Review>, ReviewsServiceError>;

    /// Post a new review and return it as stored.
    async fn create_review(
        &self,
        target: &ReviewTarget,
        review: &NewReview,
    ) -> Result<Review, ReviewsServiceError>;

    /// Flip the current user's helpful mark on a review.
    async fn toggle_helpful(
        &self,
        target: &ReviewTarget,
        review: ReviewId,
    ) -> Result<HelpfulUpdate, ReviewsServiceError>;
}
