//! Cart screen state.

use std::sync::Arc;

use rusty_money::{Money, iso::Currency};
use shopsmart::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::{
    ControllerError,
    cancellation::cancellable,
    cart::{
        CartService, CartServiceError,
        models::{NewOrder, OrderConfirmation, PaymentMethod},
    },
    notices::{Notice, Notices},
};

/// Single owner of the local cart, kept in step with the server.
///
/// Quantity changes and removals go through the server, whose reply replaces the local lines.
/// Selection is local only.
pub struct CartController {
    service: Arc<dyn CartService>,
    cart: Cart,
    notices: Notices,
    cancel: CancellationToken,
}

impl std::fmt::Debug for CartController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartController")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

impl CartController {
    #[must_use]
    pub fn new(service: Arc<dyn CartService>, currency: &'static Currency) -> Self {
        Self {
            service,
            cart: Cart::new(currency),
            notices: Notices::default(),
            cancel: CancellationToken::new(),
        }
    }

    /// Replace the local lines with the server cart, keeping selection flags.
    ///
    /// # Errors
    ///
    /// Returns an error when the fetch fails; local state is untouched.
    #[tracing::instrument(name = "cart.controller.refresh", skip(self), err)]
    pub async fn refresh(&mut self) -> Result<&CartTotals, ControllerError> {
        let fetched = cancellable(&self.cancel, || self.service.get_cart()).await?;

        self.apply_server_cart(fetched)
    }

    /// Set a product's quantity, clamped to at least one. Adds the line when the product is not
    /// in the cart yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the server rejects the change; local state is untouched.
    #[tracing::instrument(name = "cart.controller.set_quantity", skip(self), fields(product = %product), err)]
    pub async fn set_quantity(
        &mut self,
        product: &ProductId,
        quantity: i64,
    ) -> Result<&CartTotals, ControllerError> {
        let quantity = clamp_quantity(quantity);

        let updated = cancellable(&self.cancel, || {
            self.service.set_quantity(product, quantity)
        })
        .await?;

        self.apply_server_cart(updated)
    }

    /// Change a line's quantity by `delta`, never below one. Unknown products and changes that
    /// clamp to the current quantity make no call.
    ///
    /// # Errors
    ///
    /// Returns an error when the server rejects the change; local state is untouched.
    pub async fn adjust_quantity(
        &mut self,
        product: &ProductId,
        delta: i64,
    ) -> Result<&CartTotals, ControllerError> {
        let Some(current) = self.cart.item(product).map(CartItem::quantity) else {
            debug!(%product, "adjusting a product that is not in the cart");

            return Ok(self.cart.totals());
        };

        let target = i64::from(current).saturating_add(delta);

        if clamp_quantity(target) == current {
            return Ok(self.cart.totals());
        }

        self.set_quantity(product, target).await
    }

    /// Add `quantity` of a product: increases an existing line, otherwise creates one.
    ///
    /// # Errors
    ///
    /// Returns an error when the server rejects the change; local state is untouched.
    pub async fn add(
        &mut self,
        product: &ProductId,
        quantity: i64,
    ) -> Result<&CartTotals, ControllerError> {
        if self.cart.item(product).is_some() {
            self.adjust_quantity(product, quantity.max(1)).await
        } else {
            self.set_quantity(product, quantity).await
        }
    }

    /// Remove a product's line.
    ///
    /// # Errors
    ///
    /// Returns an error when the server rejects the removal; local state is untouched.
    #[tracing::instrument(name = "cart.controller.remove", skip(self), fields(product = %product), err)]
    pub async fn remove(&mut self, product: &ProductId) -> Result<&CartTotals, ControllerError> {
        let updated = cancellable(&self.cancel, || self.service.remove_item(product)).await?;

        self.apply_server_cart(updated)
    }

    /// Flip whether a line counts towards the total. Local only.
    ///
    /// # Errors
    ///
    /// Returns an error when the new total overflows.
    pub fn toggle_selection(&mut self, product: &ProductId) -> Result<&CartTotals, ControllerError> {
        self.apply(&CartMutation::ToggleSelection(product.clone()))
    }

    /// Select or deselect every line. Local only.
    ///
    /// # Errors
    ///
    /// Returns an error when the new total overflows.
    pub fn select_all(&mut self, selected: bool) -> Result<&CartTotals, ControllerError> {
        self.apply(&CartMutation::SelectAll(selected))
    }

    /// Place a cash-on-delivery order for one shop, then refresh the cart.
    ///
    /// Once the order is placed the confirmation is returned even if the refresh fails; that
    /// failure only leaves an error notice and a stale cart.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::EmptyCheckout`] when no selected line belongs to the shop,
    /// [`ControllerError::MissingAddress`] for a blank address, or the order creation error.
    #[tracing::instrument(name = "cart.controller.checkout", skip(self, address), fields(shop = %shop), err)]
    pub async fn checkout(
        &mut self,
        shop: &ShopId,
        address: &str,
    ) -> Result<OrderConfirmation, ControllerError> {
        if !self
            .cart
            .selected_items()
            .any(|item| &item.product().shop_id == shop)
        {
            return Err(self.fail(ControllerError::EmptyCheckout(shop.clone())));
        }

        let address = address.trim();

        if address.is_empty() {
            return Err(self.fail(ControllerError::MissingAddress));
        }

        let order = NewOrder {
            shop: shop.clone(),
            payment_method: PaymentMethod::CashOnDelivery,
            shipping_address: address.to_string(),
        };

        let placed = cancellable(&self.cancel, || self.service.create_order(&order)).await?;

        let confirmation = match placed {
            Ok(confirmation) => confirmation,
            Err(error) => return Err(self.fail(error)),
        };

        info!(order_id = ?confirmation.order_id, "order placed");

        self.notices.push(Notice::info("Order placed"));

        if let Err(error) = self.refresh().await {
            debug!(%error, "cart refresh after checkout failed");
        }

        Ok(confirmation)
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
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn totals(&self) -> &CartTotals {
        self.cart.totals()
    }

    #[must_use]
    pub fn total(&self) -> Money<'static, Currency> {
        self.cart.total()
    }

    fn apply(&mut self, mutation: &CartMutation) -> Result<&CartTotals, ControllerError> {
        if let Some(error) = self.cart.apply(mutation).err() {
            return Err(self.fail(error));
        }

        Ok(self.cart.totals())
    }

    fn apply_server_cart(
        &mut self,
        fetched: Result<Vec<CartItem>, CartServiceError>,
    ) -> Result<&CartTotals, ControllerError> {
        let items = match fetched {
            Ok(items) => items,
            Err(error) => return Err(self.fail(error)),
        };

        if let Some(error) = self.cart.sync(items).err() {
            return Err(self.fail(error));
        }

        debug!(
            lines = self.cart.len(),
            selected = self.cart.selected_count(),
            "cart synced"
        );

        Ok(self.cart.totals())
    }

    fn fail(&mut self, error: impl Into<ControllerError>) -> ControllerError {
        let error = error.into();

        warn!(%error, "cart operation failed");

        self.notices.push(Notice::error(error.to_string()));

        error
    }
}

#[cfg(test)]
mod tests {
    use std::future;

    use async_trait::async_trait;
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::{api::ApiError, domain::cart::MockCartService};

    use super::*;

    fn line(product: &str, price: &str, quantity: i64, shop: &str) -> CartItem {
        CartItem::new(
            ProductRef::new(product, format!("product-{product}"), price).with_shop(shop, "Shop"),
            quantity,
        )
    }

    fn server_cart() -> Vec<CartItem> {
        vec![
            line("1", "₹100.00", 2, "9"),
            line("2", "₹50.50", 1, "9"),
            line("3", "₹10", 4, "8"),
        ]
    }

    fn server_error() -> CartServiceError {
        ApiError::Status {
            status: 500,
            body: "boom".to_string(),
        }
        .into()
    }

    fn confirmation(order: &NewOrder) -> OrderConfirmation {
        OrderConfirmation {
            order_id: Some("QX7T2M9KPL".to_string()),
            shop_order_id: Some("SHOP-4HD8A1".to_string()),
            payment_method: order.payment_method,
            shipping_address: order.shipping_address.clone(),
        }
    }

    async fn loaded(mut service: MockCartService) -> Result<CartController, ControllerError> {
        service
            .expect_get_cart()
            .times(1)
            .returning(|| Ok(server_cart()));

        let mut controller = CartController::new(Arc::new(service), iso::INR);

        controller.refresh().await?;

        Ok(controller)
    }

    #[tokio::test]
    async fn refresh_totals_selected_lines() -> TestResult {
        let controller = loaded(MockCartService::new()).await?;

        assert_eq!(controller.totals().total_minor(), 29_050);
        assert_eq!(controller.totals().selected_count(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn toggle_selection_is_local_and_recomputes() -> TestResult {
        let mut controller = loaded(MockCartService::new()).await?;

        let totals = *controller.toggle_selection(&ProductId::new("1"))?;

        assert_eq!(totals.total_minor(), 9_050);
        assert_eq!(totals.selected_count(), 2);

        controller.select_all(false)?;

        assert_eq!(controller.totals().total_minor(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn set_quantity_syncs_with_server_reply_and_keeps_selection() -> TestResult {
        let mut service = MockCartService::new();

        service
            .expect_set_quantity()
            .withf(|product, quantity| product.as_str() == "2" && *quantity == 3)
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    line("1", "₹100.00", 2, "9"),
                    line("2", "₹50.50", 3, "9"),
                    line("3", "₹10", 4, "8"),
                ])
            });

        let mut controller = loaded(service).await?;

        controller.toggle_selection(&ProductId::new("3"))?;

        let totals = *controller.set_quantity(&ProductId::new("2"), 3).await?;

        assert_eq!(totals.total_minor(), 35_150);
        assert_eq!(totals.selected_count(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn set_quantity_below_one_is_clamped_before_sending() -> TestResult {
        let mut service = MockCartService::new();

        service
            .expect_set_quantity()
            .withf(|_, quantity| *quantity == 1)
            .times(1)
            .returning(|_, _| Ok(server_cart()));

        let mut controller = loaded(service).await?;

        controller.set_quantity(&ProductId::new("2"), -4).await?;

        Ok(())
    }

    #[tokio::test]
    async fn adjust_that_clamps_to_current_quantity_makes_no_call() -> TestResult {
        let mut service = MockCartService::new();

        service.expect_set_quantity().times(0);

        let mut controller = loaded(service).await?;

        controller.adjust_quantity(&ProductId::new("2"), -1).await?;
        controller.adjust_quantity(&ProductId::new("missing"), 5).await?;

        assert_eq!(controller.totals().total_minor(), 29_050);

        Ok(())
    }

    #[tokio::test]
    async fn add_increases_existing_line() -> TestResult {
        let mut service = MockCartService::new();

        service
            .expect_set_quantity()
            .withf(|product, quantity| product.as_str() == "1" && *quantity == 5)
            .times(1)
            .returning(|_, _| Ok(server_cart()));

        let mut controller = loaded(service).await?;

        controller.add(&ProductId::new("1"), 3).await?;

        Ok(())
    }

    #[tokio::test]
    async fn failed_remove_leaves_cart_unchanged() -> TestResult {
        let mut service = MockCartService::new();

        service
            .expect_remove_item()
            .times(1)
            .returning(|_| Err(server_error()));

        let mut controller = loaded(service).await?;
        let before = controller.cart().items().to_vec();

        let result = controller.remove(&ProductId::new("1")).await;

        assert!(result.is_err(), "remove should fail");
        assert_eq!(controller.cart().items(), before.as_slice());

        let notices = controller.take_notices();

        assert_eq!(notices.len(), 1);
        assert!(notices.iter().all(Notice::is_error), "expected an error notice");

        Ok(())
    }

    #[tokio::test]
    async fn checkout_rejects_shop_without_selected_lines() -> TestResult {
        let mut service = MockCartService::new();

        service.expect_create_order().times(0);

        let mut controller = loaded(service).await?;

        controller.toggle_selection(&ProductId::new("3"))?;

        let result = controller.checkout(&ShopId::new("8"), "12 MG Road").await;

        assert!(
            matches!(result, Err(ControllerError::EmptyCheckout(_))),
            "expected EmptyCheckout, got {result:?}"
        );

        let result = controller.checkout(&ShopId::new("9"), "   ").await;

        assert!(
            matches!(result, Err(ControllerError::MissingAddress)),
            "expected MissingAddress, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn checkout_places_cod_order_and_refreshes() -> TestResult {
        let mut service = MockCartService::new();
        let mut fetches = 0;

        service.expect_get_cart().times(2).returning(move || {
            fetches += 1;

            if fetches == 1 {
                Ok(server_cart())
            } else {
                Ok(vec![line("3", "₹10", 4, "8")])
            }
        });
        service
            .expect_create_order()
            .withf(|order| {
                order.shop == ShopId::new("9")
                    && order.payment_method == PaymentMethod::CashOnDelivery
                    && order.shipping_address == "12 MG Road"
            })
            .times(1)
            .returning(|order| Ok(confirmation(order)));

        let mut controller = CartController::new(Arc::new(service), iso::INR);

        controller.refresh().await?;

        let confirmation = controller.checkout(&ShopId::new("9"), " 12 MG Road ").await?;

        assert_eq!(confirmation.order_id.as_deref(), Some("QX7T2M9KPL"));
        assert_eq!(controller.cart().len(), 1);
        assert_eq!(controller.totals().total_minor(), 4_000);
        assert_eq!(controller.take_notices(), vec![Notice::info("Order placed")]);

        Ok(())
    }

    #[tokio::test]
    async fn placed_order_survives_failed_refresh() -> TestResult {
        let mut service = MockCartService::new();
        let mut fetches = 0;

        service.expect_get_cart().times(2).returning(move || {
            fetches += 1;

            if fetches == 1 {
                Ok(server_cart())
            } else {
                Err(server_error())
            }
        });
        service
            .expect_create_order()
            .times(1)
            .returning(|order| Ok(confirmation(order)));

        let mut controller = CartController::new(Arc::new(service), iso::INR);

        controller.refresh().await?;

        let confirmation = controller.checkout(&ShopId::new("9"), "12 MG Road").await?;

        assert_eq!(confirmation.shop_order_id.as_deref(), Some("SHOP-4HD8A1"));
        assert_eq!(controller.cart().len(), 3, "stale cart is kept");

        let notices = controller.take_notices();

        assert_eq!(notices.first(), Some(&Notice::info("Order placed")));
        assert!(
            notices.get(1).is_some_and(Notice::is_error),
            "refresh failure should be reported: {notices:?}"
        );

        Ok(())
    }

    /// Serves a cart, then never answers a write.
    struct StalledCart;

    #[async_trait]
    impl CartService for StalledCart {
        async fn get_cart(&self) -> Result<Vec<CartItem>, CartServiceError> {
            Ok(server_cart())
        }

        async fn set_quantity(
            &self,
            _: &ProductId,
            _: u32,
        ) -> Result<Vec<CartItem>, CartServiceError> {
            future::pending().await
        }

        async fn remove_item(&self, _: &ProductId) -> Result<Vec<CartItem>, CartServiceError> {
            future::pending().await
        }

        async fn create_order(&self, _: &NewOrder) -> Result<OrderConfirmation, CartServiceError> {
            future::pending().await
        }
    }

    #[tokio::test]
    async fn cancelled_controller_discards_in_flight_remove() -> TestResult {
        let mut controller = CartController::new(Arc::new(StalledCart), iso::INR);

        controller.refresh().await?;

        let before = controller.cart().items().to_vec();
        let token = controller.cancellation_token();

        let handle = tokio::spawn(async move {
            let result = controller.remove(&ProductId::new("1")).await.map(|_| ());
            (controller, result)
        });

        token.cancel();

        let (mut controller, result) = handle.await?;

        assert!(
            matches!(result, Err(ControllerError::Cancelled)),
            "expected Cancelled, got {result:?}"
        );
        assert_eq!(controller.cart().items(), before.as_slice());
        assert!(controller.take_notices().is_empty(), "cancellation is not an error notice");

        let result = controller.set_quantity(&ProductId::new("2"), 4).await.map(|_| ());

        assert!(
            matches!(result, Err(ControllerError::Cancelled)),
            "closed controller should reject new calls, got {result:?}"
        );

        Ok(())
    }
}
