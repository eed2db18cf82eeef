//! Cart Totals

use rusty_money::{Money, iso::Currency};

use crate::cart::{CartError, CartItem};

/// Aggregates derived from the cart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    total_minor: i64,
    selected_count: usize,
    currency: &'static Currency,
}

impl CartTotals {
    /// Totals for an empty cart.
    pub fn empty(currency: &'static Currency) -> Self {
        Self {
            total_minor: 0,
            selected_count: 0,
            currency,
        }
    }

    /// Sum of the selected line subtotals.
    pub fn total(&self) -> Money<'static, Currency> {
        Money::from_minor(self.total_minor, self.currency)
    }

    /// Sum of the selected line subtotals in minor units.
    pub fn total_minor(&self) -> i64 {
        self.total_minor
    }

    /// Number of selected lines.
    pub fn selected_count(&self) -> usize {
        self.selected_count
    }
}

/// Recomputes the selected total and selected line count.
///
/// # Errors
///
/// Returns [`CartError::Overflow`] if the total cannot be represented, or a wrapped price error.
pub fn cart_totals(
    items: &[CartItem],
    currency: &'static Currency,
) -> Result<CartTotals, CartError> {
    let selected = items.iter().filter(|item| item.is_selected());

    let total_minor = selected.clone().try_fold(0_i64, |acc, item| {
        acc.checked_add(item.subtotal_minor()?)
            .ok_or(CartError::Overflow)
    })?;

    Ok(CartTotals {
        total_minor,
        selected_count: selected.count(),
        currency,
    })
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::products::ProductRef;

    use super::*;

    #[test]
    fn unselected_items_are_excluded() -> TestResult {
        let items = [
            CartItem::new(ProductRef::new("1", "A", "$10.00"), 2),
            CartItem::new(ProductRef::new("2", "B", "$5.00"), 1).with_selected(false),
        ];

        let totals = cart_totals(&items, iso::USD)?;

        assert_eq!(totals.total(), Money::from_minor(2000, iso::USD));
        assert_eq!(totals.selected_count(), 1);

        Ok(())
    }

    #[test]
    fn empty_cart_totals_are_zero() -> TestResult {
        let totals = cart_totals(&[], iso::INR)?;

        assert_eq!(totals, CartTotals::empty(iso::INR));

        Ok(())
    }

    #[test]
    fn overflowing_total_errors() {
        let items = [
            CartItem::new(ProductRef::new("1", "A", "90000000000000000"), 1),
            CartItem::new(ProductRef::new("2", "B", "90000000000000000"), 1),
        ];

        assert!(matches!(
            cart_totals(&items, iso::USD),
            Err(CartError::Overflow)
        ));
    }
}
