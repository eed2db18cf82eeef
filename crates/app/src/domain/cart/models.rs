//! Order models.

use shopsmart::prelude::*;

/// How an order is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    CashOnDelivery,
}

impl PaymentMethod {
    /// Code the API expects.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "COD",
        }
    }
}

/// Order for every cart line of one shop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub shop: ShopId,
    pub payment_method: PaymentMethod,
    pub shipping_address: String,
}

/// What the server confirmed, alongside what was ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    /// Customer-facing order reference
    pub order_id: Option<String>,

    /// Reference of the shop's part of the order
    pub shop_order_id: Option<String>,

    pub payment_method: PaymentMethod,
    pub shipping_address: String,
}
