//! Cart Mutations

use crate::{
    cart::{CartItem, clamp_quantity},
    products::ProductId,
};

/// A single change to the cart lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartMutation {
    /// Replace the quantity of a line (values below one become one).
    SetQuantity {
        /// Product whose line changes
        product: ProductId,

        /// Requested quantity
        quantity: i64,
    },

    /// Add `delta` to the quantity of a line (the result never drops below one).
    AdjustQuantity {
        /// Product whose line changes
        product: ProductId,

        /// Signed quantity change
        delta: i64,
    },

    /// Flip the selection flag of a line.
    ToggleSelection(ProductId),

    /// Select or deselect every line.
    SelectAll(bool),

    /// Remove the line for a product.
    Remove(ProductId),

    /// Remove every line.
    Clear,
}

impl CartMutation {
    /// Returns the lines that result from applying this mutation to `items`.
    ///
    /// Mutations naming a product that is not in the cart leave the lines unchanged.
    pub fn apply_to(&self, items: &[CartItem]) -> Vec<CartItem> {
        match self {
            Self::SetQuantity { product, quantity } => map_matching(items, product, |item| {
                item.set_quantity(*quantity);
            }),
            Self::AdjustQuantity { product, delta } => map_matching(items, product, |item| {
                let next = i64::from(item.quantity()).saturating_add(*delta);
                item.set_quantity(next);
            }),
            Self::ToggleSelection(product) => map_matching(items, product, |item| {
                item.set_selected(!item.is_selected());
            }),
            Self::SelectAll(selected) => items
                .iter()
                .cloned()
                .map(|item| item.with_selected(*selected))
                .collect(),
            Self::Remove(product) => items
                .iter()
                .filter(|item| item.product_id() != product)
                .cloned()
                .collect(),
            Self::Clear => Vec::new(),
        }
    }

    /// Returns the product this mutation targets, if any.
    pub fn product(&self) -> Option<&ProductId> {
        match self {
            Self::SetQuantity { product, .. }
            | Self::AdjustQuantity { product, .. }
            | Self::ToggleSelection(product)
            | Self::Remove(product) => Some(product),
            Self::SelectAll(_) | Self::Clear => None,
        }
    }
}

fn map_matching(
    items: &[CartItem],
    product: &ProductId,
    mut update: impl FnMut(&mut CartItem),
) -> Vec<CartItem> {
    items
        .iter()
        .cloned()
        .map(|mut item| {
            if item.product_id() == product {
                update(&mut item);
            }
            item
        })
        .collect()
}
