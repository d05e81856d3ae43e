use std::fmt;

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Unique product key, supplied by the caller.
///
/// The cart never generates ids; whatever the surrounding catalog uses as a
/// primary key is carried through opaquely.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProductId({})", self.0)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Externally sourced product descriptor.
///
/// This is the shape the surrounding system hands to the cart when the user
/// adds a product. The cart copies the fields it needs into a line item and
/// does not validate the descriptor beyond the ledger invariants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Money,
    /// Pre-discount price; present only for products on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    #[serde(default)]
    pub image_url: String,
}
