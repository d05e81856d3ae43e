use serde::{Deserialize, Serialize};

use cartline_types::ProductId;

use crate::catalog::ProductCatalog;
use crate::error::CartError;
use crate::ledger::CartLedger;
use crate::pricing::PricingConfig;

/// One cart mutation, in serializable form.
///
/// Operation logs are what UI surfaces emit and what [`ReplayEngine`]
/// consumes; applying a log in order is equivalent to performing the same
/// mutations directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CartOp {
    Add { id: ProductId, quantity: u32 },
    SetQuantity { id: ProductId, quantity: u32 },
    Remove { id: ProductId },
    Clear,
}

impl CartLedger {
    /// Apply one operation, resolving `Add` through the catalog.
    ///
    /// Fails with [`CartError::UnknownProduct`] when an `Add` names an id the
    /// catalog does not carry; the ledger is left unchanged on any failure.
    pub fn apply(&mut self, op: &CartOp, catalog: &ProductCatalog) -> Result<(), CartError> {
        match op {
            CartOp::Add { id, quantity } => {
                let product = catalog
                    .get(id)
                    .ok_or_else(|| CartError::UnknownProduct { id: id.clone() })?;
                self.add_item(product, *quantity)?;
            }
            CartOp::SetQuantity { id, quantity } => self.set_quantity(id, *quantity)?,
            CartOp::Remove { id } => {
                self.remove_item(id);
            }
            CartOp::Clear => self.clear(),
        }
        Ok(())
    }
}

/// Deterministic rebuild of a ledger from an operation log.
pub struct ReplayEngine;

impl ReplayEngine {
    /// Replay `ops` in order against an empty ledger.
    ///
    /// Stops at the first failing operation; the error carries which
    /// operation index failed so callers can report a usable position.
    pub fn replay(
        ops: &[CartOp],
        catalog: &ProductCatalog,
        pricing: PricingConfig,
    ) -> Result<CartLedger, ReplayError> {
        let mut ledger = CartLedger::with_pricing(pricing);
        for (index, op) in ops.iter().enumerate() {
            ledger
                .apply(op, catalog)
                .map_err(|source| ReplayError { index, source })?;
        }
        Ok(ledger)
    }
}

/// An operation log entry that failed to apply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("operation {index} failed: {source}")]
pub struct ReplayError {
    pub index: usize,
    pub source: CartError,
}
