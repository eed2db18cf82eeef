//! Cart Items

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::{
    cart::CartError,
    prices::price_minor_units,
    products::{ProductId, ProductRef},
};

/// A single cart line: product, quantity (never below one) and selection flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    product: ProductRef,
    quantity: u32,
    selected: bool,
}

impl CartItem {
    /// Creates a selected cart line; quantities below one are raised to one.
    pub fn new(product: ProductRef, quantity: i64) -> Self {
        Self {
            product,
            quantity: clamp_quantity(quantity),
            selected: true,
        }
    }

    /// Sets the selection flag.
    #[must_use]
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Returns the product reference.
    pub fn product(&self) -> &ProductRef {
        &self.product
    }

    /// Returns the product identifier.
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Returns the quantity.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns true when the line counts towards the total.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_quantity(&mut self, quantity: i64) {
        self.quantity = clamp_quantity(quantity);
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Line subtotal (price × quantity) in minor units, regardless of selection.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when the price or the product overflows.
    pub fn subtotal_minor(&self) -> Result<i64, CartError> {
        price_minor_units(&self.product.price)?
            .checked_mul(i64::from(self.quantity))
            .ok_or(CartError::Overflow)
    }

    /// Line subtotal as money in the given currency.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when the price or the product overflows.
    pub fn subtotal(&self, currency: &'static Currency) -> Result<Money<'static, Currency>, CartError> {
        Ok(Money::from_minor(self.subtotal_minor()?, currency))
    }
}

/// Raises quantities below one to one and caps the rest at `u32::MAX`.
pub fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(1)).unwrap_or(u32::MAX)
}
