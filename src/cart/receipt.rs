//! Cart Receipt
//!
//! Plain-text rendering of the cart lines and totals.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::cart::{Cart, CartError};

/// Errors that can occur when writing a cart receipt.
#[derive(Debug, Error)]
pub enum CartReceiptError {
    /// Error calculating a line subtotal.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Failed to write to the output.
    #[error("failed to write cart receipt")]
    Io(#[source] io::Error),
}

/// Renders a cart as a table followed by its totals.
#[derive(Debug)]
pub struct CartReceipt<'a> {
    cart: &'a Cart,
}

impl<'a> CartReceipt<'a> {
    /// Create a receipt for the given cart.
    pub fn new(cart: &'a Cart) -> Self {
        Self { cart }
    }

    /// Write the receipt to `out`.
    ///
    /// # Errors
    ///
    /// Returns a [`CartReceiptError`] if a line subtotal cannot be computed or the output fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), CartReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Shop", "Price", "Qty", "Subtotal"]);

        for item in self.cart.items() {
            let subtotal = item.subtotal(self.cart.currency())?;

            builder.push_record([
                if item.is_selected() { "[x]" } else { "[ ]" }.to_string(),
                item.product().name.clone(),
                item.product().shop_name.clone(),
                item.product().price.clone(),
                item.quantity().to_string(),
                format!("{subtotal}"),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..6), Alignment::right());

        writeln!(out, "\n{table}").map_err(CartReceiptError::Io)?;
        writeln!(
            out,
            "Selected: {} of {}  Total: {}",
            self.cart.selected_count(),
            self.cart.len(),
            self.cart.total()
        )
        .map_err(CartReceiptError::Io)?;

        Ok(())
    }
}
