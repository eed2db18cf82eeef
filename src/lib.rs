//! ShopSmart
//!
//! ShopSmart client core: cart recalculation, review aggregation and the price parsing both rely on.

pub mod cart;
pub mod prelude;
pub mod prices;
pub mod products;
pub mod reviews;
