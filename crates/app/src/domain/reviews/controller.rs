//! Review screen state.

use std::sync::Arc;

use shopsmart::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::{
    ControllerError,
    cancellation::cancellable,
    notices::{Notice, Notices},
    reviews::{ReviewsService, ReviewsServiceError},
};

/// Outcome of the most recent fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loaded,
    Failed(String),
}

/// What happens to the draft when submitting it fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DraftPolicy {
    /// Keep rating and comment so the user can retry.
    #[default]
    KeepOnFailure,

    /// Reset the draft whatever the outcome.
    ClearOnFailure,
}

/// Single owner of one target's review list, draft and notices.
///
/// Every operation takes `&mut self`; results of network calls are applied only after they
/// complete, and never once the controller has been cancelled.
pub struct ReviewsController {
    target: ReviewTarget,
    service: Arc<dyn ReviewsService>,
    list: ReviewList,
    draft: ReviewDraft,
    status: LoadStatus,
    policy: DraftPolicy,
    notices: Notices,
    cancel: CancellationToken,
}

impl std::fmt::Debug for ReviewsController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewsController")
            .field("target", &self.target)
            .field("list", &self.list)
            .field("draft", &self.draft)
            .field("status", &self.status)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl ReviewsController {
    #[must_use]
    pub fn new(target: ReviewTarget, service: Arc<dyn ReviewsService>) -> Self {
        Self {
            target,
            service,
            list: ReviewList::default(),
            draft: ReviewDraft::default(),
            status: LoadStatus::default(),
            policy: DraftPolicy::default(),
            notices: Notices::default(),
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn with_draft_policy(mut self, policy: DraftPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_ordering(mut self, ordering: ReviewOrdering) -> Self {
        self.list.select_ordering(ordering);
        self
    }

    /// Fetch the target's reviews and replace the list.
    ///
    /// # Errors
    ///
    /// Returns an error when the fetch fails or the controller is cancelled. The previous list is
    /// kept either way.
    #[tracing::instrument(name = "reviews.controller.load", skip(self), fields(target = %self.target), err)]
    pub async fn load(&mut self) -> Result<(), ControllerError> {
        let fetched = cancellable(&self.cancel, || self.service.list_reviews(&self.target)).await?;

        self.apply_fetched(fetched)
    }

    /// Re-sort the loaded reviews. No network call.
    pub fn select_ordering(&mut self, ordering: ReviewOrdering) {
        self.list.select_ordering(ordering);
    }

    pub fn select_rating(&mut self, rating: Rating) {
        self.draft.select_rating(rating);
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.draft.set_comment(comment);
    }

    /// Submit the draft, then reload the list so it includes the new review.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Draft`] without any network call when no rating is selected,
    /// or the service error when creating or reloading fails.
    #[tracing::instrument(name = "reviews.controller.submit", skip(self), fields(target = %self.target), err)]
    pub async fn submit(&mut self) -> Result<(), ControllerError> {
        let review = match self.draft.to_new_review() {
            Ok(review) => review,
            Err(error) => return Err(self.fail(error)),
        };

        let created = cancellable(&self.cancel, || {
            self.service.create_review(&self.target, &review)
        })
        .await?;

        if let Err(error) = created {
            if self.policy == DraftPolicy::ClearOnFailure {
                self.draft.clear();
            }

            return Err(self.fail(error));
        }

        self.draft.clear();
        self.notices.push(Notice::info("Review submitted"));

        info!("review submitted, reloading");

        let fetched = cancellable(&self.cancel, || self.service.list_reviews(&self.target)).await?;

        self.apply_fetched(fetched)
    }

    /// Flip the helpful mark on a review and apply the server's count.
    ///
    /// # Errors
    ///
    /// Returns the service error when the toggle fails; local state is untouched.
    #[tracing::instrument(name = "reviews.controller.toggle_helpful", skip(self), fields(target = %self.target), err)]
    pub async fn toggle_helpful(&mut self, review: ReviewId) -> Result<(), ControllerError> {
        let toggled = cancellable(&self.cancel, || {
            self.service.toggle_helpful(&self.target, review)
        })
        .await?;

        match toggled {
            Ok(update) => {
                if !self.list.apply_helpful(update) {
                    debug!(review = %update.review, "helpful update for a review not in the list");
                }

                Ok(())
            }
            Err(error) => Err(self.fail(error)),
        }
    }

    /// Cancel in-flight and future operations.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    /// Token the screen owner can cancel from elsewhere.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Take pending notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain().collect()
    }

    #[must_use]
    pub fn target(&self) -> &ReviewTarget {
        &self.target
    }

    #[must_use]
    pub fn list(&self) -> &ReviewList {
        &self.list
    }

    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        self.list.reviews()
    }

    #[must_use]
    pub fn summary(&self) -> &RatingSummary {
        self.list.summary()
    }

    #[must_use]
    pub fn draft(&self) -> &ReviewDraft {
        &self.draft
    }

    #[must_use]
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    fn apply_fetched(
        &mut self,
        fetched: Result<Vec<Review>, ReviewsServiceError>,
    ) -> Result<(), ControllerError> {
        match fetched {
            Ok(reviews) => {
                debug!(count = reviews.len(), "loaded reviews");

                self.list.load(reviews);
                self.status = LoadStatus::Loaded;

                Ok(())
            }
            Err(error) => {
                self.status = LoadStatus::Failed(error.to_string());

                Err(self.fail(error))
            }
        }
    }

    fn fail(&mut self, error: impl Into<ControllerError>) -> ControllerError {
        let error = error.into();

        warn!(%error, "review operation failed");

        self.notices.push(Notice::error(error.to_string()));

        error
    }
}
