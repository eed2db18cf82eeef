//! Cart
//!
//! The cart is a list of lines plus aggregates derived from them. Every mutation produces the next
//! list of lines, recomputes the aggregates over it, and only then replaces the current state, so a
//! reader never observes lines and totals that disagree.

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{prices::PriceError, products::ProductId};

mod items;
mod mutation;
pub mod receipt;
mod totals;

pub use items::{CartItem, clamp_quantity};
pub use mutation::CartMutation;
pub use totals::{CartTotals, cart_totals};

/// Errors related to cart totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A line price could not be converted to minor units.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// A line subtotal or the cart total overflowed.
    #[error("cart total overflowed")]
    Overflow,
}

/// Cart lines and their derived totals.
#[derive(Debug, Clone)]
pub struct Cart {
    items: Vec<CartItem>,
    currency: &'static Currency,
    totals: CartTotals,
}

impl Cart {
    /// Create an empty cart in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
            totals: CartTotals::empty(currency),
        }
    }

    /// Create a cart with the given lines.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the totals cannot be computed.
    pub fn with_items(
        items: impl Into<Vec<CartItem>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let items = items.into();
        let totals = cart_totals(&items, currency)?;

        Ok(Self {
            items,
            currency,
            totals,
        })
    }

    /// Apply a single mutation and recompute the totals.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the totals of the resulting lines cannot be computed; the cart is
    /// left unchanged in that case.
    pub fn apply(&mut self, mutation: &CartMutation) -> Result<&CartTotals, CartError> {
        let items = mutation.apply_to(&self.items);

        self.commit(items)
    }

    /// Replace the lines with a fresh copy from the server.
    ///
    /// Lines for products already in the cart keep their selection flag; new lines keep the flag
    /// they arrive with.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the totals of the incoming lines cannot be computed.
    pub fn sync(&mut self, incoming: Vec<CartItem>) -> Result<&CartTotals, CartError> {
        let items: Vec<CartItem> = {
            let selection: FxHashMap<&ProductId, bool> = self
                .items
                .iter()
                .map(|item| (item.product_id(), item.is_selected()))
                .collect();

            incoming
                .into_iter()
                .map(|item| match selection.get(item.product_id()) {
                    Some(&selected) => item.with_selected(selected),
                    None => item,
                })
                .collect()
        };

        self.commit(items)
    }

    fn commit(&mut self, items: Vec<CartItem>) -> Result<&CartTotals, CartError> {
        let totals = cart_totals(&items, self.currency)?;

        self.items = items;
        self.totals = totals;

        Ok(&self.totals)
    }

    /// Cart lines in display order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Find the line for a product.
    pub fn item(&self, product: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id() == product)
    }

    /// Lines that count towards the total.
    pub fn selected_items(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter().filter(|item| item.is_selected())
    }

    /// Current totals.
    pub fn totals(&self) -> &CartTotals {
        &self.totals
    }

    /// Sum of the selected lines.
    pub fn total(&self) -> Money<'static, Currency> {
        self.totals.total()
    }

    /// Number of selected lines.
    pub fn selected_count(&self) -> usize {
        self.totals.selected_count()
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
