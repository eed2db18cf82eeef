//! Review draft
//!
//! Rating and comment the user is composing before submission.

use serde::Serialize;
use thiserror::Error;

use crate::reviews::rating::Rating;

/// Errors raised when a draft cannot be submitted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    /// No star rating has been picked.
    #[error("select a rating before submitting")]
    MissingRating,
}

/// A review ready to be sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewReview {
    /// Star rating
    pub rating: Rating,

    /// Free-text comment
    pub comment: String,
}

/// Review input state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    rating: Option<Rating>,
    comment: String,
}

impl ReviewDraft {
    /// Pick a star rating.
    pub fn select_rating(&mut self, rating: Rating) {
        self.rating = Some(rating);
    }

    /// Replace the comment text.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    /// Selected rating, if any.
    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    /// Comment text.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Returns true when nothing has been entered.
    pub fn is_empty(&self) -> bool {
        self.rating.is_none() && self.comment.is_empty()
    }

    /// Reset rating and comment.
    pub fn clear(&mut self) {
        self.rating = None;
        self.comment.clear();
    }

    /// Build the review to submit.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::MissingRating`] when no rating has been selected.
    pub fn to_new_review(&self) -> Result<NewReview, DraftError> {
        let rating = self.rating.ok_or(DraftError::MissingRating)?;

        Ok(NewReview {
            rating,
            comment: self.comment.trim().to_string(),
        })
    }
}
