use serde::{Deserialize, Serialize};

use cartline_types::{round_half_away, Money, Product, ProductId};

/// One product entry in the cart with its quantity.
///
/// A line item snapshots the product fields it needs at the moment of the
/// first add; later catalog changes do not retroactively reprice a cart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub unit_price: Money,
    /// Pre-discount unit price; present only for items added while on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_unit_price: Option<Money>,
    pub quantity: u32,
    #[serde(default)]
    pub image_ref: String,
}

impl LineItem {
    /// Build a line item from a product descriptor and an initial quantity.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            unit_price: product.price,
            original_unit_price: product.original_price,
            quantity,
            image_ref: product.image_url.clone(),
        }
    }

    /// `unit_price × quantity`.
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }

    /// Percentage off the original unit price, rounded half-away-from-zero.
    ///
    /// Zero when there is no original price, and zero when the original
    /// price is not positive (the division guard).
    pub fn discount_percent(&self) -> i64 {
        let Some(original) = self.original_unit_price else {
            return 0;
        };
        if original.as_minor() <= 0 {
            return 0;
        }
        let delta = (original - self.unit_price).as_minor() as i128;
        round_half_away(delta * 100, original.as_minor() as i128) as i64
    }
}
