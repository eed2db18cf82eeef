//! Wire records exchanged with the API.

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use shopsmart::prelude::*;

use crate::auth::Credentials;

/// Identifier the server may send as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Number(u64),
    Text(String),
}

impl From<&str> for WireId {
    fn from(value: &str) -> Self {
        value
            .parse()
            .map_or_else(|_| Self::Text(value.to_string()), Self::Number)
    }
}

impl Display for WireId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Number(id) => Display::fmt(id, f),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// Amount the server may send as a number or a formatted string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(serde_json::Number),
    Text(String),
}

impl Default for Amount {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Number(amount) => Display::fmt(amount, f),
            Self::Text(amount) => f.write_str(amount),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReviewRecord {
    pub id: u64,
    pub rating: Rating,

    #[serde(default)]
    pub comment: String,

    #[serde(default)]
    pub user_name: String,

    #[serde(default)]
    pub user_image: Option<String>,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub helpful_count: u32,

    #[serde(default)]
    pub is_helpful: bool,
}

impl ReviewRecord {
    /// Converts to a [`Review`], deriving its age relative to `now`.
    #[must_use]
    pub fn into_review(self, now: Timestamp) -> Review {
        let time_ago = time_ago(&self.created_at, now);

        Review {
            id: ReviewId::new(self.id),
            author: self.user_name,
            author_image: self.user_image.filter(|image| !image.is_empty()),
            rating: self.rating,
            comment: self.comment,
            created_at: self.created_at,
            helpful_count: self.helpful_count,
            time_ago,
            is_helpful: self.is_helpful,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ToggleHelpfulRecord {
    #[serde(default)]
    pub message: String,

    pub review_id: u64,
    pub is_helpful: bool,
    pub helpful_count: u32,
}

impl From<ToggleHelpfulRecord> for HelpfulUpdate {
    fn from(record: ToggleHelpfulRecord) -> Self {
        Self {
            review: ReviewId::new(record.review_id),
            helpful_count: record.helpful_count,
            is_helpful: record.is_helpful,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CartRecord {
    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default)]
    pub items: Vec<CartItemRecord>,

    #[serde(default)]
    pub total_cart_value: Amount,
}

impl CartRecord {
    #[must_use]
    pub fn into_items(self) -> Vec<CartItem> {
        self.items.into_iter().map(CartItemRecord::into_item).collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct CartItemRecord {
    #[serde(default)]
    pub id: Option<u64>,

    pub product: WireId,

    #[serde(default)]
    pub product_name: String,

    #[serde(default)]
    pub price: Amount,

    pub quantity: i64,

    pub shop_id: WireId,

    #[serde(default)]
    pub shop_name: String,

    #[serde(default)]
    pub product_images: Vec<String>,
}

impl CartItemRecord {
    #[must_use]
    pub fn into_item(self) -> CartItem {
        let mut product = ProductRef::new(self.product.to_string(), self.product_name, self.price.to_string())
            .with_shop(self.shop_id.to_string(), self.shop_name);

        product.images = self.product_images;

        CartItem::new(product, self.quantity)
    }
}

#[derive(Debug, Serialize)]
pub struct SetCartLineRequest {
    pub product_id: WireId,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub struct RemoveCartLineRequest {
    pub product_id: WireId,
}

#[derive(Debug, Serialize)]
pub struct CreateOrderRequest<'a> {
    pub shop_id: WireId,
    pub payment_method: &'static str,
    pub shipping_address: &'a str,
}

/// Reply to an order creation: the order and the per-shop order references.
#[derive(Debug, Deserialize)]
pub struct OrderRecord {
    #[serde(default)]
    pub success: String,

    #[serde(default)]
    pub order_id: Option<String>,

    #[serde(default)]
    pub shop_order_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

#[derive(Deserialize)]
pub struct RefreshRecord {
    pub access: String,

    #[serde(default)]
    pub refresh: Option<String>,
}

impl RefreshRecord {
    /// New credentials, keeping `previous_refresh` when the server did not rotate it.
    #[must_use]
    pub fn into_credentials(self, previous_refresh: &str) -> Credentials {
        Credentials::new(
            self.access,
            Some(self.refresh.unwrap_or_else(|| previous_refresh.to_string())),
        )
    }
}
