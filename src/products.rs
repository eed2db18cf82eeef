//! Products

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Product identifier as used in REST paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

/// Shop identifier as used in REST paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopId(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            /// Creates a new identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_id!(ProductId);
string_id!(ShopId);

/// Product reference carried by a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    /// Product identifier
    pub id: ProductId,

    /// Product display name
    pub name: String,

    /// Display price, possibly prefixed with a currency symbol
    pub price: String,

    /// Owning shop
    pub shop_id: ShopId,

    /// Owning shop display name
    pub shop_name: String,

    /// Product image URLs
    #[serde(default)]
    pub images: Vec<String>,
}

impl ProductRef {
    /// Creates a product reference with no shop details or images.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: price.into(),
            shop_id: ShopId::new(""),
            shop_name: String::new(),
            images: Vec::new(),
        }
    }

    /// Sets the owning shop.
    #[must_use]
    pub fn with_shop(mut self, id: impl Into<ShopId>, name: impl Into<String>) -> Self {
        self.shop_id = id.into();
        self.shop_name = name.into();
        self
    }
}
