//! Cart service.

use async_trait::async_trait;
use mockall::automock;
use shopsmart::prelude::*;
use tracing::info;

use crate::{
    api::{
        ApiClient,
        records::{
            CartRecord, CreateOrderRequest, OrderRecord, RemoveCartLineRequest, SetCartLineRequest,
            WireId,
        },
    },
    domain::cart::{
        CartServiceError,
        models::{NewOrder, OrderConfirmation},
    },
};

const CART_PATH: &str = "orders/cart/";
const CREATE_ORDER_PATH: &str = "orders/create/";

/// Cart backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpCartService {
    client: ApiClient,
}

impl HttpCartService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CartService for HttpCartService {
    #[tracing::instrument(name = "cart.service.get_cart", skip(self), err)]
    async fn get_cart(&self) -> Result<Vec<CartItem>, CartServiceError> {
        let record: CartRecord = self.client.get(CART_PATH).await?;

        Ok(record.into_items())
    }

    #[tracing::instrument(
        name = "cart.service.set_quantity",
        skip(self),
        fields(product = %product),
        err
    )]
    async fn set_quantity(
        &self,
        product: &ProductId,
        quantity: u32,
    ) -> Result<Vec<CartItem>, CartServiceError> {
        let request = SetCartLineRequest {
            product_id: WireId::from(product.as_str()),
            quantity,
        };

        let record: CartRecord = self.client.post(CART_PATH, &request).await?;

        Ok(record.into_items())
    }

    #[tracing::instrument(
        name = "cart.service.remove_item",
        skip(self),
        fields(product = %product),
        err
    )]
    async fn remove_item(&self, product: &ProductId) -> Result<Vec<CartItem>, CartServiceError> {
        let request = RemoveCartLineRequest {
            product_id: WireId::from(product.as_str()),
        };

        self.client.delete(CART_PATH, &request).await?;

        self.get_cart().await
    }

    #[tracing::instrument(
        name = "cart.service.create_order",
        skip(self, order),
        fields(shop = %order.shop, order_id = tracing::field::Empty),
        err
    )]
    async fn create_order(&self, order: &NewOrder) -> Result<OrderConfirmation, CartServiceError> {
        let request = CreateOrderRequest {
            shop_id: WireId::from(order.shop.as_str()),
            payment_method: order.payment_method.as_str(),
            shipping_address: &order.shipping_address,
        };

        let record: OrderRecord = self.client.post(CREATE_ORDER_PATH, &request).await?;

        if let Some(id) = &record.order_id {
            tracing::Span::current().record("order_id", id.as_str());
        }

        info!("created order");

        Ok(OrderConfirmation {
            order_id: record.order_id,
            shop_order_id: record.shop_order_id,
            payment_method: order.payment_method,
            shipping_address: order.shipping_address.clone(),
        })
    }
}

#[automock]
#[async_trait]
pub trait CartService: Send + Sync {
    /// Current server cart.
    async fn get_cart(&self) -> Result<Vec<CartItem>, CartServiceError>;

    /// Set the quantity of a product's line, adding the line if needed. Returns the whole cart.
    async fn set_quantity(
        &self,
        product: &ProductId,
        quantity: u32,
    ) -> Result<Vec<CartItem>, CartServiceError>;

    /// Drop a product's line, then return the whole cart as fetched afterwards.
    async fn remove_item(&self, product: &ProductId) -> Result<Vec<CartItem>, CartServiceError>;

    /// Place an order for one shop's lines.
    async fn create_order(&self, order: &NewOrder) -> Result<OrderConfirmation, CartServiceError>;
}
