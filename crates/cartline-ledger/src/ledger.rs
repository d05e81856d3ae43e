use tracing::debug;

use cartline_types::{Product, ProductId};

use crate::error::CartError;
use crate::item::LineItem;
use crate::pricing::PricingConfig;
use crate::totals::Totals;

/// In-memory cart: an ordered sequence of line items plus derived totals.
///
/// Insertion order defines display order. The ledger is mutated only through
/// the operations below; each one either applies fully or returns an error
/// with the sequence untouched. The ledger is not internally locked — a
/// session owns it exclusively and serializes access.
#[derive(Clone, Debug, Default)]
pub struct CartLedger {
    items: Vec<LineItem>,
    pricing: PricingConfig,
}

impl CartLedger {
    /// An empty cart with the default pricing rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty cart with explicit pricing rules.
    pub fn with_pricing(pricing: PricingConfig) -> Self {
        Self {
            items: Vec::new(),
            pricing,
        }
    }

    /// Rebuild a ledger from line items that crossed a serialization
    /// boundary. Callers that cannot trust the source should run
    /// [`crate::LedgerValidator`] over the result.
    pub fn from_items(items: Vec<LineItem>, pricing: PricingConfig) -> Self {
        Self { items, pricing }
    }

    /// Add `quantity` units of `product`.
    ///
    /// An existing line for the same product id is incremented rather than
    /// duplicated; otherwise a new line is appended. Returns the updated
    /// line. Fails with [`CartError::InvalidQuantity`] when `quantity` is 0.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<&LineItem, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity {
                requested: quantity,
            });
        }

        let index = match self.items.iter().position(|item| item.id == product.id) {
            Some(index) => {
                self.items[index].quantity = self.items[index].quantity.saturating_add(quantity);
                index
            }
            None => {
                self.items.push(LineItem::from_product(product, quantity));
                self.items.len() - 1
            }
        };

        let line = &self.items[index];
        debug!(id = %line.id, quantity = line.quantity, "cart line updated");
        Ok(line)
    }

    /// Set the quantity of the line for `id`.
    ///
    /// A quantity of 0 removes the line and is a no-op when the id is absent.
    /// A positive quantity fails with [`CartError::ItemNotFound`] when the id
    /// is absent.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            self.remove_item(id);
            return Ok(());
        }

        let item = self
            .items
            .iter_mut()
            .find(|item| &item.id == id)
            .ok_or_else(|| CartError::ItemNotFound { id: id.clone() })?;

        item.quantity = quantity;
        debug!(id = %id, quantity, "cart line updated");
        Ok(())
    }

    /// Remove the line for `id`, returning it when present. Never errors.
    pub fn remove_item(&mut self, id: &ProductId) -> Option<LineItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        let removed = self.items.remove(index);
        debug!(id = %id, "cart line removed");
        Some(removed)
    }

    /// Empty the ledger.
    pub fn clear(&mut self) {
        self.items.clear();
        debug!("cart cleared");
    }

    /// The ordered line items, for rendering.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The line for `id`, when present.
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Number of distinct lines (not units).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The pricing rules this ledger computes totals with.
    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    /// Compute the pricing aggregates for the current state.
    ///
    /// Pure derivation: no side effects, no collaborators.
    pub fn totals(&self) -> Totals {
        Totals::compute(&self.items, &self.pricing)
    }
}
