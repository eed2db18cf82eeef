//! ShopSmart prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        Cart, CartError, CartItem, CartMutation, CartTotals, clamp_quantity, receipt::CartReceipt,
    },
    prices::{PriceError, parse_currency, parse_price, price_minor_units},
    products::{ProductId, ProductRef, ShopId},
    reviews::{
        Review, ReviewId, ReviewTarget,
        draft::{DraftError, NewReview, ReviewDraft},
        list::{HelpfulUpdate, ReviewList},
        ordering::{ReviewOrdering, sort_reviews},
        rating::{Rating, RatingError},
        report::RatingReport,
        summary::{RatingSummary, StarCount},
        time_ago::time_ago,
    },
};
